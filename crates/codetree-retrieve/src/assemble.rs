//! Response assembly: path rewriting and the `CodeGraph` envelope.

use codetree_core::types::{CodeGraph, ProjectMeta, TreeNode};

use crate::paths;

/// Display name given to the graph of a repository.
pub fn graph_name(repo_name: &str) -> String {
    format!("Code Graph for {repo_name}")
}

/// Wrap a finished tree with repository metadata.
///
/// Every `file_path` in the tree is rewritten relative to the repository
/// root; all other fields, including each child's relationship, are kept.
pub fn assemble(mut root: TreeNode, project: &ProjectMeta) -> CodeGraph {
    {
        let mut stack = vec![&mut root];
        while let Some(node) = stack.pop() {
            node.file_path = paths::normalize(&node.file_path);
            stack.extend(node.children.iter_mut());
        }
    }

    CodeGraph {
        name: graph_name(&project.repo_name),
        repo_name: project.repo_name.clone(),
        branch_name: project.branch_name.clone(),
        root_node: root,
    }
}
