//! Error types for the codetree-retrieve crate.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrieveError {
    #[error("Project with ID '{project_id}' not found in database")]
    ProjectNotFound { project_id: String },

    #[error("No graph data found for node ID '{node_id}' in repo '{project_id}'")]
    GraphNotFound { node_id: String, project_id: String },

    #[error("Graph error: {0}")]
    Graph(#[from] codetree_graph::GraphError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Request timed out after {limit:?}")]
    Timeout { limit: Duration },

    #[error("Code graph is {depth} levels deep, more than the limit of {limit}")]
    TooDeep { depth: usize, limit: usize },
}

impl RetrieveError {
    /// Store failures, timeouts and oversized trees. These are logged
    /// in full before being reported to the caller.
    pub fn is_internal(&self) -> bool {
        !matches!(
            self,
            Self::ProjectNotFound { .. } | Self::GraphNotFound { .. }
        )
    }

    /// The message placed in the `error` field of a failed response.
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            format!("An unexpected error occurred: {self}")
        } else {
            self.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, RetrieveError>;
