//! builder.rs
//! Turns a clean parse into the canonical record handed to storage.

use crate::parse::{ParsedGraph, StructuralError};
use crate::store::{Arc, CanonicalRecord, Vertex};
use std::collections::HashSet;

/// Builds the canonical record. Refuses to run when the parse collected any
/// structural error and hands all of them back instead.
pub fn build(parsed: &ParsedGraph) -> Result<CanonicalRecord, Vec<StructuralError>> {
    if !parsed.is_valid() {
        tracing::debug!(errors = parsed.errors.len(), "build refused: structural errors present");
        return Err(parsed.errors.clone());
    }

    let mut record = build_from_arcs(&parsed.arcs);
    // Vertices outside every arc go last, in set order.
    let listed: HashSet<Vertex> = record.vertices.iter().cloned().collect();
    record.vertices.extend(parsed.vertices.iter().filter(|v| !listed.contains(*v)).cloned());
    Ok(record)
}

/// Vertices in first-seen order (source before target, arcs left to right)
/// and the arcs verbatim.
pub fn build_from_arcs(arcs: &[Arc]) -> CanonicalRecord {
    let mut seen = HashSet::new();
    let mut vertices = Vec::new();
    for arc in arcs {
        for vertex in [&arc.source, &arc.target] {
            if seen.insert(vertex) {
                vertices.push(vertex.clone());
            }
        }
    }
    CanonicalRecord { vertices, arcs: arcs.to_vec() }
}
