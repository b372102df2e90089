//! Human-readable views of a loaded graph.
pub mod function;

pub use function::render;
