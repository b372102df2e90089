//! End-to-end driver: parse, build, store, load, cycle gate, evaluate.
//!
//! Structural errors stop the run before a record is built. Semantic errors
//! are gathered over the whole evaluation pass and stop numeric output.

use crate::analysis::find_cycle;
use crate::compute::{Evaluator, SemanticError};
use crate::config::PipelineConfig;
use crate::display;
use crate::graph::{build, load, LoadedGraph};
use crate::parse::{parse, read_operations, OperationSpecError, StructuralError};
use crate::store::{read_record, write_record, CanonicalRecord, RecordError, Vertex};
use std::fmt::Display;
use thiserror::Error;

fn join_all<E: Display>(errors: &[E]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Structural errors: {}", join_all(.0))]
    Structural(Vec<StructuralError>),
    #[error("Semantic errors: {}", join_all(.0))]
    Semantic(Vec<SemanticError>),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    OperationSpec(#[from] OperationSpecError),
}

/// Root values of a clean run, in root order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub roots: Vec<(Vertex, f64)>,
}

impl Evaluation {
    /// The first root's value: the result written out by convention.
    pub fn primary(&self) -> Option<f64> {
        self.roots.first().map(|(_, v)| *v)
    }

    pub fn value_of(&self, vertex: &str) -> Option<f64> {
        self.roots.iter().find(|(v, _)| v.as_str() == vertex).map(|(_, value)| *value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parses and canonicalises the arc text, failing fast on structural
    /// errors.
    pub fn canonicalize(&self, arcs_text: &str) -> Result<CanonicalRecord, PipelineError> {
        let parsed = parse(arcs_text);
        build(&parsed).map_err(PipelineError::Structural)
    }

    /// Front half of the pipeline, up to the loaded evaluation view. The
    /// record goes through storage when `record_path` is configured.
    pub fn load_text(&self, arcs_text: &str) -> Result<LoadedGraph, PipelineError> {
        let record = self.canonicalize(arcs_text)?;
        let record = match &self.config.record_path {
            Some(path) => {
                write_record(path, &record)?;
                read_record(path)?
            }
            None => record,
        };
        Ok(load(&record)?)
    }

    /// Runs every stage and returns the root values.
    pub fn run(&self, arcs_text: &str, operations_text: &str) -> Result<Evaluation, PipelineError> {
        let graph = self.load_text(arcs_text)?;
        let operations = read_operations(operations_text, self.config.operations_framed)?;
        Self::cycle_gate(&graph)?;

        let report = Evaluator::new(&graph)
            .with_root_order(self.config.root_order)
            .with_max_depth(self.config.max_depth)
            .evaluate(&operations);
        let roots = report.into_result().map_err(PipelineError::Semantic)?;

        let evaluation = Evaluation { roots };
        tracing::info!(roots = evaluation.roots.len(), primary = ?evaluation.primary(), "evaluation complete");
        Ok(evaluation)
    }

    /// Renders the function representation of the arc text.
    pub fn render(&self, arcs_text: &str) -> Result<String, PipelineError> {
        let graph = self.load_text(arcs_text)?;
        display::render(&graph, self.config.root_order, self.config.max_depth)
            .map_err(|err| PipelineError::Semantic(vec![err]))
    }

    fn cycle_gate(graph: &LoadedGraph) -> Result<(), PipelineError> {
        match find_cycle(&graph.adjacency).and_then(|cycle| cycle.into_iter().next()) {
            Some(vertex) => {
                tracing::warn!(%vertex, "graph contains a cycle");
                Err(PipelineError::Semantic(vec![SemanticError::CycleDetected { vertex }]))
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPS_FRAME: (&str, &str) = ("begin", "end");

    fn framed(body: &str) -> String {
        format!("{}\n{}\n{}", OPS_FRAME.0, body, OPS_FRAME.1)
    }

    #[test]
    fn test_run_in_memory() {
        let result = Pipeline::default()
            .run("(a,b,0),(c,b,1)", &framed("b : +\na : 2\nc : 3"))
            .unwrap();
        assert_eq!(result.primary(), Some(5.0));
        assert_eq!(result.value_of("b"), Some(5.0));
    }

    #[test]
    fn test_run_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let config = PipelineConfig { record_path: Some(path.clone()), ..Default::default() };

        let result = Pipeline::new(config).run("(a,b,0)", &framed("b : exp\na : 0")).unwrap();

        assert_eq!(result.primary(), Some(1.0));
        assert!(path.exists());
    }

    #[test]
    fn test_structural_errors_stop_before_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let config = PipelineConfig { record_path: Some(path.clone()), ..Default::default() };

        let err = Pipeline::new(config).run("(a,b,0),(c,b,0)\n(x,y)", &framed("b : +")).unwrap_err();

        match err {
            PipelineError::Structural(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_cycle_gate_blocks_evaluation() {
        let err = Pipeline::default().run("(a,b,0),(b,a,0)", &framed("a : +\nb : +")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Semantic(ref errors) if matches!(errors[..], [SemanticError::CycleDetected { .. }])
        ));
    }

    #[test]
    fn test_semantic_errors_are_aggregated_in_message() {
        let err = Pipeline::default()
            .run("(a,r,0),(b,r,1)", &framed("r : +"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Semantic errors: "));
        assert!(message.contains("'a' not found; "));
        assert!(message.contains("'b' not found"));
    }

    #[test]
    fn test_bad_operation_entry() {
        let err = Pipeline::default().run("(a,b,0)", &framed("b +")).unwrap_err();
        assert!(matches!(err, PipelineError::OperationSpec(OperationSpecError { line: 2, .. })));
    }

    #[test]
    fn test_render() {
        assert_eq!(Pipeline::default().render("(a,b,0),(c,b,1)").unwrap(), "b(a(), c())");
    }
}
