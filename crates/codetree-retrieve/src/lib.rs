//! codetree-retrieve: Code graph subtree retrieval.
//!
//! Resolves the repository, fetches a bounded-depth subgraph around a start
//! node from Neo4j, reconstructs it into a rooted cycle-free tree, rewrites
//! file paths relative to the repository root and wraps the result in a
//! `CodeGraph` envelope.

pub mod assemble;
pub mod error;
pub mod fetch;
pub mod paths;
pub mod projects;
pub mod tree;
pub mod types;

pub use error::RetrieveError;
pub use fetch::{GraphFetcher, Neo4jFetcher};
pub use projects::{PgProjectStore, ProjectLookup};
pub use types::{CodeGraphRequest, CodeGraphResponse};

use std::time::Duration;

use codetree_core::{CodeGraph, NodeId, ProjectId};

/// Deepest tree returned when no other limit is configured.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 256;

/// The code graph retrieval service.
///
/// Holds no per-request state; share one instance across tasks behind an `Arc`.
pub struct CodeGraphService<P, G> {
    projects: P,
    fetcher: G,
    request_timeout: Option<Duration>,
    max_tree_depth: usize,
}

impl<P, G> CodeGraphService<P, G>
where
    P: ProjectLookup,
    G: GraphFetcher,
{
    pub fn new(projects: P, fetcher: G) -> Self {
        Self {
            projects,
            fetcher,
            request_timeout: None,
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }

    /// Bound the whole retrieval (lookup, fetch and reconstruction).
    pub fn with_request_timeout(mut self, limit: Duration) -> Self {
        self.request_timeout = Some(limit);
        self
    }

    /// Reject reconstructed trees with more than `limit` levels.
    ///
    /// Serializing the response walks the tree recursively, so this bounds
    /// the stack used per request.
    pub fn with_max_tree_depth(mut self, limit: usize) -> Self {
        self.max_tree_depth = limit;
        self
    }

    /// Retrieve the code graph rooted at `node_id`.
    ///
    /// Never fails: every error is turned into an `error` response. Store
    /// failures are logged in full first.
    pub async fn get_code_graph(
        &self,
        project_id: &ProjectId,
        node_id: &NodeId,
    ) -> CodeGraphResponse {
        match self.try_get_code_graph(project_id, node_id).await {
            Ok(graph) => CodeGraphResponse::Graph { graph },
            Err(e) => {
                if e.is_internal() {
                    tracing::error!(
                        project_id = %project_id,
                        node_id = %node_id,
                        error = ?e,
                        "Code graph retrieval failed"
                    );
                } else {
                    tracing::info!(
                        project_id = %project_id,
                        node_id = %node_id,
                        reason = %e,
                        "Code graph not found"
                    );
                }
                CodeGraphResponse::Error {
                    error: e.user_message(),
                }
            }
        }
    }

    /// Retrieve the code graph, keeping the typed error.
    pub async fn try_get_code_graph(
        &self,
        project_id: &ProjectId,
        node_id: &NodeId,
    ) -> error::Result<CodeGraph> {
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.retrieve(project_id, node_id))
                .await
                .map_err(|_| RetrieveError::Timeout { limit })?,
            None => self.retrieve(project_id, node_id).await,
        }
    }

    /// Orchestrates: project lookup → subtree fetch → tree reconstruction → assembly.
    async fn retrieve(&self, project_id: &ProjectId, node_id: &NodeId) -> error::Result<CodeGraph> {
        let start = std::time::Instant::now();

        let project = self
            .projects
            .find(project_id)
            .await?
            .ok_or_else(|| RetrieveError::ProjectNotFound {
                project_id: project_id.to_string(),
            })?;

        let graph_not_found = || RetrieveError::GraphNotFound {
            node_id: node_id.to_string(),
            project_id: project_id.to_string(),
        };

        let records = self.fetcher.fetch(project_id, node_id).await?;
        if records.is_empty() {
            return Err(graph_not_found());
        }

        let built = tree::build_with_stats(&records, node_id.as_str()).ok_or_else(graph_not_found)?;
        tracing::debug!(
            project_id = %project_id,
            node_id = %node_id,
            records = records.len(),
            nodes = built.stats.nodes,
            dropped_dangling = built.stats.dropped_dangling,
            dropped_revisits = built.stats.dropped_revisits,
            depth = built.stats.depth,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Reconstructed code graph"
        );

        if built.stats.depth > self.max_tree_depth {
            return Err(RetrieveError::TooDeep {
                depth: built.stats.depth,
                limit: self.max_tree_depth,
            });
        }

        Ok(assemble::assemble(built.root, &project))
    }
}
