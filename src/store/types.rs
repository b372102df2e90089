use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Position of an argument among a target vertex's children.
pub type Ordinal = u32;

/// An opaque vertex identifier: a non-empty run of word characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vertex(String);

impl Vertex {
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

    #[inline(always)]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Borrow<str> for Vertex {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for Vertex {
    fn from(name: &str) -> Self { Self(name.to_string()) }
}

impl From<String> for Vertex {
    fn from(name: String) -> Self { Self(name) }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// `source` is the `ordinal`-th argument of `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arc {
    pub source: Vertex,
    pub target: Vertex,
    pub ordinal: Ordinal,
}

impl Arc {
    pub fn new(source: impl Into<Vertex>, target: impl Into<Vertex>, ordinal: Ordinal) -> Self {
        Self { source: source.into(), target: target.into(), ordinal }
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.source, self.target, self.ordinal)
    }
}

/// One entry of a target's ordered argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Child {
    pub ordinal: Ordinal,
    pub source: Vertex,
}
