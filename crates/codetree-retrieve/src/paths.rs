//! Repository-relative file paths.
//!
//! Parsed repositories are checked out under `.../projects/<instance>/`, and
//! the graph stores the absolute path of every file. Callers only ever see
//! the part below the checkout directory.

use codetree_core::types::UNKNOWN_FILE_PATH;

/// Path segment that marks the start of a checkout.
pub const PATH_ANCHOR: &str = "projects";

/// Rewrite an absolute path into one relative to the repository root.
///
/// Uses the first `projects` segment and skips the instance directory after
/// it. Paths without the anchor are returned unchanged.
pub fn normalize(file_path: &str) -> String {
    if file_path.is_empty() || file_path == UNKNOWN_FILE_PATH {
        return UNKNOWN_FILE_PATH.to_string();
    }

    let parts: Vec<&str> = file_path.split('/').collect();
    match parts.iter().position(|p| *p == PATH_ANCHOR) {
        Some(anchor) => parts
            .get(anchor + 2..)
            .map(|rest| rest.join("/"))
            .unwrap_or_default(),
        None => file_path.to_string(),
    }
}
