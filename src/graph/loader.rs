//! loader.rs
//! Rebuilds the evaluation view of a canonical record: arcs are inverted so
//! each target lists its arguments in ordinal order.

use crate::store::{Arc, CanonicalRecord, Child, RecordError, Vertex};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// Ordered arguments of one target.
pub type Children = SmallVec<[Child; 4]>;

/// target -> arguments sorted ascending by ordinal.
pub type Adjacency = HashMap<Vertex, Children>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedGraph {
    /// Vertex set in record order, duplicates dropped.
    pub vertices: Vec<Vertex>,
    pub adjacency: Adjacency,
    /// Number of arcs in which each vertex is the source. Vertices that
    /// never appear as a source have no entry.
    pub out_degree: HashMap<Vertex, usize>,
}

impl LoadedGraph {
    #[inline(always)]
    pub fn children(&self, vertex: &str) -> &[Child] {
        children_of(&self.adjacency, vertex)
    }

    #[inline(always)]
    pub fn out_degree(&self, vertex: &str) -> usize {
        self.out_degree.get(vertex).copied().unwrap_or(0)
    }

    /// The arc multiset, recovered from the inverted view.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.adjacency.iter().flat_map(|(target, children)| {
            children.iter().map(move |c| Arc {
                source: c.source.clone(),
                target: target.clone(),
                ordinal: c.ordinal,
            })
        })
    }
}

#[inline(always)]
pub fn children_of<'a>(adjacency: &'a Adjacency, vertex: &str) -> &'a [Child] {
    adjacency.get(vertex).map(|c| c.as_slice()).unwrap_or(&[])
}

/// Loads a record. Every arc endpoint must be declared in the vertex list.
pub fn load(record: &CanonicalRecord) -> Result<LoadedGraph, RecordError> {
    let mut declared = HashSet::with_capacity(record.vertices.len());
    let mut vertices = Vec::with_capacity(record.vertices.len());
    for vertex in &record.vertices {
        if declared.insert(vertex) {
            vertices.push(vertex.clone());
        }
    }

    let mut adjacency = Adjacency::new();
    let mut out_degree: HashMap<Vertex, usize> = HashMap::new();

    for (index, arc) in record.arcs.iter().enumerate() {
        for endpoint in [&arc.source, &arc.target] {
            if !declared.contains(endpoint) {
                return Err(RecordError::DanglingArc { index, vertex: endpoint.clone() });
            }
        }
        adjacency
            .entry(arc.target.clone())
            .or_default()
            .push(Child { ordinal: arc.ordinal, source: arc.source.clone() });
        *out_degree.entry(arc.source.clone()).or_insert(0) += 1;
    }

    for children in adjacency.values_mut() {
        children.sort();
    }

    tracing::debug!(vertices = vertices.len(), targets = adjacency.len(), "graph loaded");
    Ok(LoadedGraph { vertices, adjacency, out_degree })
}
