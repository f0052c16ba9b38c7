//! Index building and reconciliation for mdindex.
//!
//! This crate ties discovery, the index tree, its structured artifact, and the
//! renderers into the operations the CLI exposes (see [`pipeline`]).

pub mod artifact;
pub mod pipeline;
pub mod reconcile;
pub mod tree;
pub mod writer;
