//! Canonicalisation of a parsed graph and its evaluation view.
pub mod builder;
pub mod loader;

// Re-export key types for convenient access
pub use builder::{build, build_from_arcs};
pub use loader::{children_of, load, Adjacency, Children, LoadedGraph};
