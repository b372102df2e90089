//! Defines the error types raised after the graph is loaded.
use crate::store::Vertex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Operation for vertex '{vertex}' not found")]
    MissingOperation { vertex: Vertex },
    #[error("Constant '{vertex}' may not have children (found {children})")]
    ConstantWithChildren { vertex: Vertex, children: usize },
    #[error("Unknown operator '{operator}' at vertex '{vertex}'")]
    UnknownOperator { vertex: Vertex, operator: String },
    #[error("No root found: no vertex has out-degree zero")]
    NoRoot,
    #[error("Graph contains a cycle through '{vertex}'")]
    CycleDetected { vertex: Vertex },
    #[error("Dependency chain below '{vertex}' exceeds the depth limit of {limit}")]
    DepthExceeded { vertex: Vertex, limit: usize },
}

impl SemanticError {
    /// Errors after which nothing else in the pass can be evaluated.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NoRoot | Self::CycleDetected { .. } | Self::DepthExceeded { .. })
    }
}
