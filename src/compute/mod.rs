//! Evaluates a loaded graph as a tree of operations.
pub mod error;
pub mod evaluator;
pub mod fold;
pub mod operation;

pub use error::SemanticError;
pub use evaluator::{evaluate, EvaluationReport, Evaluator, Fault, Outcome};
pub use fold::{fold, Folded, TreeFold};
pub use operation::{Operation, OperationMap};
