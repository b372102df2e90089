use crate::graph::{children_of, Adjacency, LoadedGraph};
use crate::store::Vertex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting, // On the current path
    Visited,
}

/// Returns true if any cycle exists in the adjacency view.
pub fn has_cycle(adjacency: &Adjacency) -> bool {
    find_cycle(adjacency).is_some()
}

/// Depth-first search with an explicit work stack, started from every key of
/// the adjacency so cycles unreachable from any root are found too.
///
/// Returns the vertices of the first cycle met, in adjacency direction
/// (target towards argument), with the closing vertex repeated at the end.
pub fn find_cycle(adjacency: &Adjacency) -> Option<Vec<Vertex>> {
    let mut state: HashMap<&str, VisitState> = HashMap::with_capacity(adjacency.len());

    for start in adjacency.keys() {
        if state.contains_key(start.as_str()) {
            continue;
        }
        state.insert(start.as_str(), VisitState::Visiting);
        let mut stack: Vec<(&str, usize)> = vec![(start.as_str(), 0)];

        while let Some(top) = stack.last_mut() {
            let vertex = top.0;
            match children_of(adjacency, vertex).get(top.1) {
                Some(child) => {
                    top.1 += 1;
                    let next = child.source.as_str();
                    match state.get(next) {
                        Some(VisitState::Visiting) => {
                            let from = stack.iter().position(|&(v, _)| v == next).unwrap_or(0);
                            let mut cycle: Vec<Vertex> = stack[from..].iter().map(|&(v, _)| v.into()).collect();
                            cycle.push(next.into());
                            tracing::debug!(length = cycle.len() - 1, "cycle found");
                            return Some(cycle);
                        }
                        Some(VisitState::Visited) => {}
                        None => {
                            state.insert(next, VisitState::Visiting);
                            stack.push((next, 0));
                        }
                    }
                }
                None => {
                    state.insert(vertex, VisitState::Visited);
                    stack.pop();
                }
            }
        }
    }
    None
}

/// Counts the vertices reachable from `vertex` through its arguments,
/// itself included.
pub fn count_reachable(adjacency: &Adjacency, vertex: &str) -> usize {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut pending = vec![vertex];

    while let Some(current) = pending.pop() {
        if visited.insert(current) {
            pending.extend(children_of(adjacency, current).iter().map(|c| c.source.as_str()));
        }
    }
    visited.len()
}

/// How the root set is ordered; the first root is the primary result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootOrder {
    /// Record order of the vertex list.
    #[default]
    Declared,
    /// Largest reachable subtree first; ties keep record order.
    ByReach,
}

/// Vertices never used as an argument (out-degree zero).
pub fn roots(graph: &LoadedGraph, order: RootOrder) -> Vec<&Vertex> {
    let mut roots: Vec<&Vertex> = graph
        .vertices
        .iter()
        .filter(|v| graph.out_degree(v.as_str()) == 0)
        .collect();

    if order == RootOrder::ByReach {
        // Stable sort keeps record order among equal counts.
        roots.sort_by_cached_key(|v| std::cmp::Reverse(count_reachable(&graph.adjacency, v.as_str())));
    }
    roots
}
