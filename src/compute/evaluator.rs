//! A synchronous, single-threaded tree evaluator.
use super::error::SemanticError;
use super::fold::{fold, TreeFold};
use super::operation::{Operation, OperationMap};
use crate::analysis::topology::{roots, RootOrder};
use crate::graph::LoadedGraph;
use crate::store::{Child, Vertex};

/// Why a vertex has no value.
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
    /// The fault was raised at this vertex.
    Local(SemanticError),
    /// Some argument has no value.
    Upstream,
}

/// Value of one vertex, or the reason it is absent.
pub type Outcome = Result<f64, Fault>;

/// The result of one evaluation pass: every root in order with its value
/// (`None` when absent), and every fault found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    pub roots: Vec<(Vertex, Option<f64>)>,
    pub errors: Vec<SemanticError>,
}

impl EvaluationReport {
    fn terminal(error: SemanticError) -> Self {
        Self { roots: Vec::new(), errors: vec![error] }
    }

    pub fn is_ok(&self) -> bool { self.errors.is_empty() }

    /// Root values when the pass was clean, otherwise every error.
    pub fn into_result(self) -> Result<Vec<(Vertex, f64)>, Vec<SemanticError>> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        Ok(self
            .roots
            .into_iter()
            .filter_map(|(vertex, value)| value.map(|v| (vertex, v)))
            .collect())
    }
}

struct Calculator<'a> {
    operations: &'a OperationMap,
}

impl TreeFold for Calculator<'_> {
    type Output = Outcome;

    fn enter(&mut self, vertex: &Vertex, children: &[Child]) -> Option<Outcome> {
        match self.operations.get(vertex) {
            None => Some(Err(Fault::Local(SemanticError::MissingOperation { vertex: vertex.clone() }))),
            Some(Operation::Constant(_)) if !children.is_empty() => {
                Some(Err(Fault::Local(SemanticError::ConstantWithChildren {
                    vertex: vertex.clone(),
                    children: children.len(),
                })))
            }
            Some(Operation::Constant(value)) => Some(Ok(*value)),
            Some(_) => None,
        }
    }

    fn combine(&mut self, vertex: &Vertex, _children: &[Child], outputs: &[&Outcome]) -> Outcome {
        let op = match self.operations.get(vertex) {
            Some(op) => op,
            None => return Err(Fault::Upstream),
        };
        if let Operation::Unknown(token) = op {
            return Err(Fault::Local(SemanticError::UnknownOperator {
                vertex: vertex.clone(),
                operator: token.clone(),
            }));
        }

        // An absent argument makes the aggregate absent.
        let args: Vec<f64> = outputs
            .iter()
            .map(|o| match o {
                Ok(v) => Ok(*v),
                Err(_) => Err(Fault::Upstream),
            })
            .collect::<Result<_, _>>()?;
        op.apply(&args).ok_or(Fault::Upstream)
    }
}

pub struct Evaluator<'g> {
    graph: &'g LoadedGraph,
    root_order: RootOrder,
    max_depth: Option<usize>,
}

impl<'g> Evaluator<'g> {
    pub fn new(graph: &'g LoadedGraph) -> Self {
        Self { graph, root_order: RootOrder::Declared, max_depth: None }
    }

    pub fn with_root_order(mut self, order: RootOrder) -> Self {
        self.root_order = order;
        self
    }

    pub fn with_max_depth(mut self, limit: Option<usize>) -> Self {
        self.max_depth = limit;
        self
    }

    /// Evaluates every root. All faults of the pass are collected; each
    /// vertex is evaluated at most once.
    pub fn evaluate(&self, operations: &OperationMap) -> EvaluationReport {
        let roots = roots(self.graph, self.root_order);
        if roots.is_empty() {
            tracing::warn!("no root found");
            return EvaluationReport::terminal(SemanticError::NoRoot);
        }
        tracing::debug!(roots = roots.len(), "evaluating");

        let mut calculator = Calculator { operations };
        let folded = match fold(&self.graph.adjacency, &roots, &mut calculator, self.max_depth) {
            Ok(folded) => folded,
            Err(err) => {
                tracing::warn!(error = %err, "evaluation aborted");
                return EvaluationReport::terminal(err);
            }
        };

        let errors: Vec<SemanticError> = folded
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                Err(Fault::Local(err)) => Some(err.clone()),
                _ => None,
            })
            .collect();
        for err in &errors {
            tracing::warn!(error = %err, "semantic error");
        }

        let roots = roots
            .into_iter()
            .map(|root| {
                let value = folded.get(root.as_str()).and_then(|o| o.as_ref().ok().copied());
                (root.clone(), value)
            })
            .collect();

        EvaluationReport { roots, errors }
    }
}

/// Evaluates with declared root order and no depth limit.
pub fn evaluate(graph: &LoadedGraph, operations: &OperationMap) -> EvaluationReport {
    Evaluator::new(graph).evaluate(operations)
}
