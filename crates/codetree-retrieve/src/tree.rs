//! Reconstruction of a rooted, cycle-free tree from flat node records.
//!
//! Records are kept in an arena and addressed by position. Expansion is a
//! depth-first walk driven by an explicit stack, with a single visited set
//! shared across the whole walk: every record is expanded at most once, so
//! back-edges, self-loops and second parents in a diamond are dropped at the
//! point they are reached.

use std::collections::HashMap;

use codetree_core::types::{ChildRef, NodeRecord, TreeNode};

/// Counters describing one reconstruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Nodes present in the finished tree.
    pub nodes: usize,
    /// Child references to ids outside the fetched records.
    pub dropped_dangling: usize,
    /// Child references to records already expanded elsewhere.
    pub dropped_revisits: usize,
    /// Levels in the finished tree; the root alone is depth 1.
    pub depth: usize,
}

/// A finished tree plus its counters.
#[derive(Debug, Clone)]
pub struct TreeBuild {
    pub root: TreeNode,
    pub stats: BuildStats,
}

/// One record being expanded.
struct Frame {
    record: usize,
    /// Next position in `records[record].children` to look at.
    cursor: usize,
    node: TreeNode,
}

/// Build the tree rooted at `root_id`. `None` if no record has that id.
pub fn build(records: &[NodeRecord], root_id: &str) -> Option<TreeNode> {
    build_with_stats(records, root_id).map(|b| b.root)
}

/// Like [`build`], also reporting what was pruned.
pub fn build_with_stats(records: &[NodeRecord], root_id: &str) -> Option<TreeBuild> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        index.insert(record.id.as_str(), i);
    }

    let root = *index.get(root_id)?;
    let mut visited = vec![false; records.len()];
    let mut stats = BuildStats::default();

    visited[root] = true;
    stats.depth = 1;
    let mut stack = vec![Frame {
        record: root,
        cursor: 0,
        node: root_node(&records[root]),
    }];

    while let Some(top) = stack.last_mut() {
        let children = &records[top.record].children;

        if let Some(child) = children.get(top.cursor) {
            top.cursor += 1;

            let Some(&child_idx) = index.get(child.id.as_str()) else {
                stats.dropped_dangling += 1;
                continue;
            };
            if visited[child_idx] {
                stats.dropped_revisits += 1;
                continue;
            }

            visited[child_idx] = true;
            stack.push(Frame {
                record: child_idx,
                cursor: 0,
                node: child_node(child),
            });
            stats.depth = stats.depth.max(stack.len());
            continue;
        }

        // All children handled: attach to the parent, or finish at the root.
        let Some(done) = stack.pop() else { break };
        stats.nodes += 1;
        match stack.last_mut() {
            Some(parent) => parent.node.children.push(done.node),
            None => return Some(TreeBuild { root: done.node, stats }),
        }
    }

    None
}

fn root_node(record: &NodeRecord) -> TreeNode {
    TreeNode {
        id: record.id.clone(),
        name: record.name.clone(),
        node_type: record.node_type.clone(),
        file_path: record.file_path.clone(),
        start_line: record.start_line,
        end_line: record.end_line,
        children: Vec::new(),
        relationship: None,
    }
}

fn child_node(child: &ChildRef) -> TreeNode {
    TreeNode {
        id: child.id.clone(),
        name: child.name.clone(),
        node_type: child.node_type.clone(),
        file_path: child.file_path.clone(),
        start_line: child.start_line,
        end_line: child.end_line,
        children: Vec::new(),
        relationship: Some(child.relationship.clone()),
    }
}
