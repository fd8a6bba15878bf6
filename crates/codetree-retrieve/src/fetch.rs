//! Subtree fetching from Neo4j via the GraphClient.

use std::sync::Arc;

use async_trait::async_trait;

use codetree_core::{NodeId, NodeRecord, ProjectId};
use codetree_graph::{GraphClient, SubtreeQuery};

use crate::error::Result;

/// Source of the flat records for one subtree.
///
/// An empty vector means the start node does not exist for the project.
#[async_trait]
pub trait GraphFetcher: Send + Sync {
    async fn fetch(&self, project_id: &ProjectId, node_id: &NodeId) -> Result<Vec<NodeRecord>>;
}

#[async_trait]
impl<T: GraphFetcher + ?Sized> GraphFetcher for Arc<T> {
    async fn fetch(&self, project_id: &ProjectId, node_id: &NodeId) -> Result<Vec<NodeRecord>> {
        (**self).fetch(project_id, node_id).await
    }
}

/// `GraphFetcher` backed by the Neo4j knowledge graph.
#[derive(Clone)]
pub struct Neo4jFetcher {
    client: GraphClient,
    subtree: SubtreeQuery,
}

impl Neo4jFetcher {
    pub fn new(client: GraphClient) -> Self {
        Self {
            client,
            subtree: SubtreeQuery::default(),
        }
    }

    /// Override depth, leaf relationship or node label.
    pub fn with_subtree_query(mut self, subtree: SubtreeQuery) -> Self {
        self.subtree = subtree;
        self
    }
}

#[async_trait]
impl GraphFetcher for Neo4jFetcher {
    async fn fetch(&self, project_id: &ProjectId, node_id: &NodeId) -> Result<Vec<NodeRecord>> {
        let records = self
            .client
            .fetch_subtree(project_id, node_id, &self.subtree)
            .await?;
        Ok(records)
    }
}
