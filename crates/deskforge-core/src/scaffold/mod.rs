//! Scaffold materialization
//!
//! This module provides:
//! - `ScaffoldPlan`, the immutable configuration of one run
//! - The engine with its mutually exclusive populate/reuse paths
//! - Recursive tree copying with root-level exclusions

pub mod copier;
pub mod engine;
pub mod plan;

pub use copier::copy_tree;
pub use engine::{
    available_cache, Materialization, Materialize, OverwriteApproval, ScaffoldEngine,
};
pub use plan::{project_name_from, ScaffoldPlan};
