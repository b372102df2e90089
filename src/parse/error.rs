//! Errors raised while reading raw text.
use crate::store::{Ordinal, Vertex};
use thiserror::Error;

/// A structural fault in the arc list. Collected, never raised early.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Line {line}: malformed arc '{text}'")]
    Malformed { line: usize, text: String },
    /// Two different sources claim the same argument slot of one target.
    #[error("Line {line}: arc from '{from}' to '{to}' with ordinal {ordinal} is already taken by '{existing}'")]
    OrdinalTaken { line: usize, from: Vertex, to: Vertex, ordinal: Ordinal, existing: Vertex },
    /// One (source, target) pair declared with two different ordinals.
    #[error("Line {line}: conflicting ordinals for pair ({from}, {to}): found {previous} and {current}")]
    OrdinalConflict { line: usize, from: Vertex, to: Vertex, previous: Ordinal, current: Ordinal },
}

impl StructuralError {
    pub fn line(&self) -> usize {
        match self {
            Self::Malformed { line, .. }
            | Self::OrdinalTaken { line, .. }
            | Self::OrdinalConflict { line, .. } => *line,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Line {line}: invalid operation entry '{text}'")]
pub struct OperationSpecError {
    pub line: usize,
    pub text: String,
}
