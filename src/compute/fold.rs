//! fold.rs
//! Post-order fold over the adjacency view with one memoised output per
//! vertex. Uses an explicit work stack, so depth is bounded by the heap
//! (or by `max_depth`), not by the call stack.

use super::error::SemanticError;
use crate::graph::{children_of, Adjacency};
use crate::store::{Child, Vertex};
use std::collections::{HashMap, HashSet};

/// A per-vertex combinator driven by [`fold`].
pub trait TreeFold {
    type Output;

    /// Settles a vertex without visiting its arguments. Returning `None`
    /// descends into the children and later calls [`TreeFold::combine`].
    fn enter(&mut self, _vertex: &Vertex, _children: &[Child]) -> Option<Self::Output> {
        None
    }

    /// Combines the outputs of the children, given in ordinal order.
    fn combine(&mut self, vertex: &Vertex, children: &[Child], outputs: &[&Self::Output]) -> Self::Output;
}

/// Memoised outputs plus the order in which vertices were settled.
#[derive(Debug, Clone)]
pub struct Folded<'g, T> {
    values: HashMap<&'g str, T>,
    order: Vec<&'g Vertex>,
}

impl<'g, T> Folded<'g, T> {
    pub fn get(&self, vertex: &str) -> Option<&T> { self.values.get(vertex) }

    /// Every settled vertex with its output, children before parents.
    pub fn iter(&self) -> impl Iterator<Item = (&'g Vertex, &T)> + '_ {
        self.order.iter().filter_map(move |&v| self.values.get(v.as_str()).map(|out| (v, out)))
    }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }
}

/// Folds every root. A vertex reachable through several parents is settled
/// once. Fails if the walk meets a vertex on its own path, or if the path
/// would grow past `max_depth` vertices.
pub fn fold<'g, F: TreeFold>(
    adjacency: &'g Adjacency,
    roots: &[&'g Vertex],
    folder: &mut F,
    max_depth: Option<usize>,
) -> Result<Folded<'g, F::Output>, SemanticError> {
    let mut walk = Walk {
        adjacency,
        folder,
        max_depth,
        stack: Vec::new(),
        on_path: HashSet::new(),
        folded: Folded { values: HashMap::new(), order: Vec::new() },
    };
    for &root in roots {
        walk.run(root)?;
    }
    Ok(walk.folded)
}

struct Frame<'g> {
    vertex: &'g Vertex,
    children: &'g [Child],
    next: usize,
}

struct Walk<'g, 'f, F: TreeFold> {
    adjacency: &'g Adjacency,
    folder: &'f mut F,
    max_depth: Option<usize>,
    stack: Vec<Frame<'g>>,
    on_path: HashSet<&'g str>,
    folded: Folded<'g, F::Output>,
}

impl<'g, 'f, F: TreeFold> Walk<'g, 'f, F> {
    fn run(&mut self, root: &'g Vertex) -> Result<(), SemanticError> {
        self.open(root)?;

        while let Some(top) = self.stack.last_mut() {
            let children = top.children;
            if let Some(child) = children.get(top.next) {
                top.next += 1;
                self.open(&child.source)?;
                continue;
            }

            let Some(frame) = self.stack.pop() else { break };
            self.on_path.remove(frame.vertex.as_str());
            // Every child was settled before its parent frame is popped.
            let output = {
                let outputs: Vec<&F::Output> = frame
                    .children
                    .iter()
                    .filter_map(|c| self.folded.values.get(c.source.as_str()))
                    .collect();
                self.folder.combine(frame.vertex, frame.children, &outputs)
            };
            self.settle(frame.vertex, output);
        }
        Ok(())
    }

    fn open(&mut self, vertex: &'g Vertex) -> Result<(), SemanticError> {
        let name = vertex.as_str();
        if self.folded.values.contains_key(name) {
            return Ok(());
        }
        if self.on_path.contains(name) {
            return Err(SemanticError::CycleDetected { vertex: vertex.clone() });
        }
        if let Some(limit) = self.max_depth {
            if self.stack.len() >= limit {
                return Err(SemanticError::DepthExceeded { vertex: vertex.clone(), limit });
            }
        }

        let children = children_of(self.adjacency, name);
        match self.folder.enter(vertex, children) {
            Some(output) => self.settle(vertex, output),
            None => {
                self.on_path.insert(name);
                self.stack.push(Frame { vertex, children, next: 0 });
            }
        }
        Ok(())
    }

    fn settle(&mut self, vertex: &'g Vertex, output: F::Output) {
        self.folded.values.insert(vertex.as_str(), output);
        self.folded.order.push(vertex);
    }
}
