//! Graph vocabulary shared by every stage, and the canonical record.
pub mod record;
pub mod types;

pub use record::{read_record, write_record, CanonicalRecord, RecordError};
pub use types::{Arc, Child, Ordinal, Vertex};
