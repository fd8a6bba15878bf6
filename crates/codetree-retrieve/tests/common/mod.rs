//! In-memory stand-ins for the relational and graph stores.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use codetree_core::types::ChildRef;
use codetree_core::{NodeId, NodeRecord, ProjectId, ProjectMeta};
use codetree_graph::GraphError;
use codetree_retrieve::error::Result;
use codetree_retrieve::{GraphFetcher, ProjectLookup, RetrieveError};

#[derive(Default)]
pub struct FakeProjects {
    projects: HashMap<String, ProjectMeta>,
    pub calls: AtomicUsize,
}

impl FakeProjects {
    pub fn with(mut self, id: &str, repo_name: &str, branch_name: &str) -> Self {
        self.projects.insert(
            id.to_string(),
            ProjectMeta {
                id: ProjectId::from(id),
                repo_name: repo_name.to_string(),
                branch_name: branch_name.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl ProjectLookup for FakeProjects {
    async fn find(&self, project_id: &ProjectId) -> Result<Option<ProjectMeta>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.projects.get(project_id.as_str()).cloned())
    }
}

/// Serves fixed records per `(project_id, node_id)`.
#[derive(Default)]
pub struct FakeFetcher {
    subtrees: HashMap<(String, String), Vec<NodeRecord>>,
    failure: Option<String>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn with(mut self, project_id: &str, node_id: &str, records: Vec<NodeRecord>) -> Self {
        self.subtrees
            .insert((project_id.to_string(), node_id.to_string()), records);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl GraphFetcher for FakeFetcher {
    async fn fetch(&self, project_id: &ProjectId, node_id: &NodeId) -> Result<Vec<NodeRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(RetrieveError::Graph(GraphError::Connection(message.clone())));
        }
        Ok(self
            .subtrees
            .get(&(project_id.to_string(), node_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Record at `/srv/projects/<instance>/src/<id>.py` with `(child_id, relationship)` children.
pub fn record(id: &str, children: &[(&str, &str)]) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        name: format!("{id}_fn"),
        node_type: "FUNCTION".to_string(),
        file_path: format!("/srv/projects/inst-1/src/{id}.py"),
        start_line: Some(10),
        end_line: Some(20),
        children: children
            .iter()
            .map(|(child, relationship)| ChildRef {
                id: child.to_string(),
                name: format!("{child}_fn"),
                node_type: "FUNCTION".to_string(),
                file_path: format!("/srv/projects/inst-1/src/{child}.py"),
                start_line: Some(10),
                end_line: Some(20),
                relationship: relationship.to_string(),
            })
            .collect(),
    }
}
