//! Core domain types for code graph retrieval.
//!
//! `NodeRecord` is the flat shape the graph store hands back; `TreeNode` is the
//! rooted, cycle-free shape handed to callers inside a `CodeGraph`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stored in place of a file path for nodes that have none.
pub const UNKNOWN_FILE_PATH: &str = "Unknown";

// ── Identifiers ───────────────────────────────────────────────────

/// Identifier of a repository (project) known to the relational store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a node, unique within one repository's graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ── Flat Store Records ────────────────────────────────────────────

/// One graph node as returned by a subtree fetch, with its direct children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Primary label of the node: "FUNCTION", "CLASS", "FILE", etc.
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default = "unknown_file_path")]
    pub file_path: String,
    pub start_line: Option<i64>,
    pub end_line: Option<i64>,
    #[serde(default)]
    pub children: Vec<ChildRef>,
}

/// A reference from a record to one of its direct children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default = "unknown_file_path")]
    pub file_path: String,
    pub start_line: Option<i64>,
    pub end_line: Option<i64>,
    /// Relationship type of the edge from the parent to this child.
    pub relationship: String,
}

// ── Reconstructed Tree ────────────────────────────────────────────

/// A node of the reconstructed tree.
///
/// `relationship` is `None` only for the root. Dropping a tree is iterative,
/// so arbitrarily deep trees can be released without exhausting the stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub file_path: String,
    pub start_line: Option<i64>,
    pub end_line: Option<i64>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl TreeNode {
    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Number of levels in this subtree; a lone node has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        deepest
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// The response envelope for one retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeGraph {
    pub name: String,
    pub repo_name: String,
    pub branch_name: String,
    pub root_node: TreeNode,
}

// ── Projects ──────────────────────────────────────────────────────

/// Repository metadata held by the relational store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectMeta {
    pub id: ProjectId,
    pub repo_name: String,
    pub branch_name: String,
}

fn unknown_file_path() -> String {
    UNKNOWN_FILE_PATH.to_string()
}
