//! Ingests a text list of ordinal arcs, validates and canonicalises it, and
//! evaluates the resulting graph as a tree of operations.
//!
//! ```
//! use ordinal_graph::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig { operations_framed: false, ..Default::default() };
//! let result = Pipeline::new(config)
//!     .run("(a, b, 0), (c, b, 1)", "b : +\na : 2\nc : 3")
//!     .unwrap();
//! assert_eq!(result.primary(), Some(5.0));
//! ```

pub mod analysis;
pub mod compute;
pub mod config;
pub mod display;
pub mod graph;
pub mod logging;
pub mod parse;
pub mod pipeline;
pub mod store;

pub use analysis::{has_cycle, RootOrder};
pub use compute::{evaluate, EvaluationReport, Operation, OperationMap, SemanticError};
pub use config::{ConfigError, PipelineConfig};
pub use graph::{build, load, Adjacency, LoadedGraph};
pub use parse::{parse, read_operations, ParsedGraph, StructuralError};
pub use pipeline::{Evaluation, Pipeline, PipelineError};
pub use store::{Arc, CanonicalRecord, Vertex};
