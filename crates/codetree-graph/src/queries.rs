//! Bounded-depth subtree query for the code graph.

use neo4rs::query;
use serde::Deserialize;

use codetree_core::config::RetrievalSettings;
use codetree_core::types::{ChildRef, NodeRecord, UNKNOWN_FILE_PATH};
use codetree_core::{NodeId, ProjectId};

use crate::client::{GraphClient, GraphError};

/// Shape of a subtree traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeQuery {
    /// Maximum number of hops expanded from the start node.
    pub max_depth: u32,
    /// Relationship type never reported as a parent/child edge.
    pub leaf_relationship: String,
    /// Label carried by every code node.
    pub node_label: String,
}

impl Default for SubtreeQuery {
    fn default() -> Self {
        Self::from(&RetrievalSettings::default())
    }
}

impl From<&RetrievalSettings> for SubtreeQuery {
    fn from(settings: &RetrievalSettings) -> Self {
        Self {
            max_depth: settings.max_depth,
            leaf_relationship: settings.leaf_relationship.clone(),
            node_label: settings.node_label.clone(),
        }
    }
}

impl SubtreeQuery {
    /// Cypher text for this traversal. Ids, depth and the leaf relationship
    /// are bound as parameters; only the label is spliced in.
    pub fn cypher(&self) -> String {
        let label = &self.node_label;
        format!(
            "MATCH (start:{label} {{node_id: $node_id, repoId: $repo_id}})
             CALL apoc.path.subgraphAll(start, {{maxLevel: $max_depth}})
             YIELD nodes, relationships
             UNWIND nodes AS node
             OPTIONAL MATCH (node)-[r]->(child:{label})
             WHERE child IN nodes AND type(r) <> $leaf_relationship
             WITH node, collect({{
               id: child.node_id,
               name: child.name,
               type: head(labels(child)),
               file_path: child.file_path,
               start_line: child.start_line,
               end_line: child.end_line,
               relationship: type(r)
             }}) AS children
             RETURN {{
               id: node.node_id,
               name: node.name,
               type: head(labels(node)),
               file_path: node.file_path,
               start_line: node.start_line,
               end_line: node.end_line,
               children: children
             }} AS node_data"
        )
    }
}

/// Row as it comes off the wire. Every property may be null.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawNodeRow {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    node_type: Option<String>,
    file_path: Option<String>,
    start_line: Option<i64>,
    end_line: Option<i64>,
    #[serde(default)]
    children: Vec<RawChildRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawChildRow {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    node_type: Option<String>,
    file_path: Option<String>,
    start_line: Option<i64>,
    end_line: Option<i64>,
    relationship: Option<String>,
}

impl RawNodeRow {
    /// `None` when the node carries no `node_id`.
    pub(crate) fn into_record(self) -> Option<NodeRecord> {
        let id = self.id?;
        let children = self
            .children
            .into_iter()
            .filter_map(RawChildRow::into_child_ref)
            .collect();

        Some(NodeRecord {
            id,
            name: self.name.unwrap_or_default(),
            node_type: self.node_type.unwrap_or_default(),
            file_path: file_path_or_unknown(self.file_path),
            start_line: self.start_line,
            end_line: self.end_line,
            children,
        })
    }
}

impl RawChildRow {
    /// A node without outgoing edges still yields one all-null entry from
    /// `collect`; that entry (and any without an edge type) is discarded.
    fn into_child_ref(self) -> Option<ChildRef> {
        let id = self.id?;
        let relationship = self.relationship.filter(|r| !r.is_empty())?;

        Some(ChildRef {
            id,
            name: self.name.unwrap_or_default(),
            node_type: self.node_type.unwrap_or_default(),
            file_path: file_path_or_unknown(self.file_path),
            start_line: self.start_line,
            end_line: self.end_line,
            relationship,
        })
    }
}

fn file_path_or_unknown(path: Option<String>) -> String {
    match path {
        Some(p) if !p.is_empty() => p,
        _ => UNKNOWN_FILE_PATH.to_string(),
    }
}

impl GraphClient {
    // ── Subtree Queries ──────────────────────────────────────────

    /// Fetch every node within `subtree.max_depth` hops of the start node,
    /// each annotated with its direct children inside the fetched set.
    ///
    /// An empty result means the start node does not exist for this repository.
    pub async fn fetch_subtree(
        &self,
        repo_id: &ProjectId,
        node_id: &NodeId,
        subtree: &SubtreeQuery,
    ) -> Result<Vec<NodeRecord>, GraphError> {
        let q = query(&subtree.cypher())
            .param("node_id", node_id.0.clone())
            .param("repo_id", repo_id.0.clone())
            .param("max_depth", subtree.max_depth as i64)
            .param("leaf_relationship", subtree.leaf_relationship.clone());

        let rows = self.query_rows(q).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: RawNodeRow = row.get("node_data").map_err(|e| {
                GraphError::Serialization(format!("Failed to deserialize node_data: {e}"))
            })?;
            match raw.into_record() {
                Some(record) => records.push(record),
                None => tracing::warn!(
                    repo_id = %repo_id,
                    "Skipping subtree node without a node_id"
                ),
            }
        }

        tracing::debug!(
            repo_id = %repo_id,
            node_id = %node_id,
            records = records.len(),
            "Fetched subtree"
        );
        Ok(records)
    }
}
