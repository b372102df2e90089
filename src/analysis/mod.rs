//! Structural analysis of the loaded graph.
pub mod topology;

pub use topology::{count_reachable, find_cycle, has_cycle, roots, RootOrder};
