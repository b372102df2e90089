//! record.rs
//! The canonical, order-preserving interchange form of a parsed graph
//! and its JSON storage.

use super::types::{Arc, Vertex};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub use self::error::RecordError;
mod error {
    use crate::store::Vertex;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum RecordError {
        #[error("Cannot access graph record: {0}")]
        Io(#[from] std::io::Error),
        #[error("Malformed graph record: {0}")]
        Json(#[from] serde_json::Error),
        #[error("Arc {index} references vertex '{vertex}' which is not declared in the record")]
        DanglingArc { index: usize, vertex: Vertex },
    }
}

/// Vertices in first-seen order followed by the arcs in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub vertices: Vec<Vertex>,
    pub arcs: Vec<Arc>,
}

impl CanonicalRecord {
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(text)?)
    }
}

pub fn write_record(path: impl AsRef<Path>, record: &CanonicalRecord) -> Result<(), RecordError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), arcs = record.arcs.len(), "graph record written");
    Ok(())
}

pub fn read_record(path: impl AsRef<Path>) -> Result<CanonicalRecord, RecordError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let record: CanonicalRecord = serde_json::from_reader(reader)?;
    tracing::debug!(path = %path.display(), arcs = record.arcs.len(), "graph record read");
    Ok(record)
}
