use crate::analysis::topology::{find_cycle, roots, RootOrder};
use crate::compute::{fold, SemanticError, TreeFold};
use crate::graph::LoadedGraph;
use crate::store::{Child, Vertex};

struct FunctionText;

impl TreeFold for FunctionText {
    type Output = String;

    fn combine(&mut self, vertex: &Vertex, _children: &[Child], outputs: &[&String]) -> String {
        let args: Vec<&str> = outputs.iter().map(|s| s.as_str()).collect();
        format!("{}({})", vertex, args.join(", "))
    }
}

/// Renders every root as a nested call expression, e.g. `b(a(), c())`.
/// Arguments appear in ordinal order; roots are joined with `", "`.
pub fn render(graph: &LoadedGraph, order: RootOrder, max_depth: Option<usize>) -> Result<String, SemanticError> {
    if let Some(cycle) = find_cycle(&graph.adjacency) {
        if let Some(vertex) = cycle.into_iter().next() {
            return Err(SemanticError::CycleDetected { vertex });
        }
    }

    let roots = roots(graph, order);
    if roots.is_empty() {
        return Err(SemanticError::NoRoot);
    }

    let folded = fold(&graph.adjacency, &roots, &mut FunctionText, max_depth)?;
    let parts: Vec<&str> = roots
        .iter()
        .filter_map(|root| folded.get(root.as_str()).map(String::as_str))
        .collect();
    Ok(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_from_arcs, load};
    use crate::store::Arc;

    fn loaded(arcs: &[(&str, &str, u32)]) -> LoadedGraph {
        let arcs: Vec<Arc> = arcs.iter().map(|&(s, t, o)| Arc::new(s, t, o)).collect();
        load(&build_from_arcs(&arcs)).unwrap()
    }

    #[test]
    fn test_arguments_in_ordinal_order() {
        let graph = loaded(&[("c", "b", 1), ("a", "b", 0)]);
        assert_eq!(render(&graph, RootOrder::Declared, None).unwrap(), "b(a(), c())");
    }

    #[test]
    fn test_shared_argument_is_written_at_each_use() {
        let graph = loaded(&[("x", "f", 0), ("x", "g", 0), ("f", "h", 0), ("g", "h", 1)]);
        assert_eq!(render(&graph, RootOrder::Declared, None).unwrap(), "h(f(x()), g(x()))");
    }

    #[test]
    fn test_largest_root_first() {
        let graph = loaded(&[("a", "small", 0), ("b", "mid", 0), ("mid", "big", 0)]);
        assert_eq!(render(&graph, RootOrder::Declared, None).unwrap(), "small(a()), big(mid(b()))");
        assert_eq!(render(&graph, RootOrder::ByReach, None).unwrap(), "big(mid(b())), small(a())");
    }

    #[test]
    fn test_cycle_is_refused() {
        let graph = loaded(&[("a", "r", 0), ("p", "q", 0), ("q", "p", 0)]);
        let err = render(&graph, RootOrder::Declared, None).unwrap_err();
        assert!(matches!(err, SemanticError::CycleDetected { .. }));
    }

    #[test]
    fn test_empty_graph_has_no_root() {
        assert_eq!(render(&LoadedGraph::default(), RootOrder::Declared, None), Err(SemanticError::NoRoot));
    }
}
