//! Request and response types for code graph retrieval.

use serde::{Deserialize, Serialize};

use codetree_core::{CodeGraph, NodeId, ProjectId};

/// Request for the subtree rooted at one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeGraphRequest {
    pub project_id: ProjectId,
    pub node_id: NodeId,
}

/// Outcome of a retrieval, as handed to callers.
///
/// Serializes as `{"graph": {...}}` on success and `{"error": "..."}` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CodeGraphResponse {
    Graph { graph: CodeGraph },
    Error { error: String },
}

impl CodeGraphResponse {
    pub fn graph(&self) -> Option<&CodeGraph> {
        match self {
            Self::Graph { graph } => Some(graph),
            Self::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Graph { .. } => None,
            Self::Error { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let resp = CodeGraphResponse::Error {
            error: "Project with ID 'x' not found in database".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Project with ID 'x' not found in database"})
        );
        assert!(resp.graph().is_none());
    }

    #[test]
    fn test_request_parses_plain_strings() {
        let req: CodeGraphRequest = serde_json::from_str(
            r#"{"project_id": "550e8400-e29b-41d4-a716-446655440000", "node_id": "n-1"}"#,
        )
        .unwrap();
        assert_eq!(req.project_id.as_str(), "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(req.node_id.as_str(), "n-1");
    }
}
