//! codetree-core: Shared types, configuration, and error handling for codetree.
//!
//! This crate provides the foundational types used across all codetree components:
//! - Flat node records as returned by the graph store
//! - Reconstructed tree nodes and the code graph response envelope
//! - Project metadata resolved from the relational store
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::AppConfig;
pub use error::CoreError;
pub use types::{ChildRef, CodeGraph, NodeId, NodeRecord, ProjectId, ProjectMeta, TreeNode};
