//! codetree-graph — Neo4j client for the code graph.
//!
//! All reads against the property-graph store flow through this crate. It
//! owns the pooled connection and the bounded-depth subtree query, and hands
//! back flat `NodeRecord`s for the retrieval engine to reconstruct.

pub mod client;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use queries::SubtreeQuery;
