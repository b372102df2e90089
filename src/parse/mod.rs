//! Raw-text readers: the arc list and the operation spec.
pub mod arcs;
pub mod error;
pub mod operations;

pub use arcs::{parse, parse_reader, ArcParser, ParsedGraph};
pub use error::{OperationSpecError, StructuralError};
pub use operations::read_operations;
