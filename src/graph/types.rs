//! Core value types for the property graph
//!
//! Ids, labels, relationship types and query directions. Labels and
//! relationship types are identified purely by their name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node or relationship
///
/// Nodes and relationships share a single id space per graph. Ids are
/// assigned in strictly increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    pub fn new(id: u64) -> Self {
        EntityId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id)
    }
}

/// Name tag attached to a node
///
/// A node holds each label at most once, in the order it was first added.
/// Construct one from any string, e.g. `Label::new("NODE")` or
/// `"PROJECTION".into()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Label(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label(s.to_string())
    }
}

/// Relationship type (e.g., "OWNS", "PROJECTIONS")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RelationshipType(String);

impl RelationshipType {
    pub fn new(name: impl Into<String>) -> Self {
        RelationshipType(name.into())
    }

    /// Alias of [`RelationshipType::new`] that reads well at call sites,
    /// e.g. `RelationshipType::with_name("OWNS")`.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        RelationshipType(s)
    }
}

impl From<&str> for RelationshipType {
    fn from(s: &str) -> Self {
        RelationshipType(s.to_string())
    }
}

impl From<&RelationshipType> for RelationshipType {
    fn from(t: &RelationshipType) -> Self {
        t.clone()
    }
}

/// Direction filter for relationship queries, seen from the queried node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Relationships starting at the node
    Outgoing,
    /// Relationships ending at the node
    Incoming,
    /// Every incident relationship
    Both,
}

impl Direction {
    /// Whether a relationship with the given endpoint roles passes this filter
    pub(crate) fn matches(self, is_start: bool, is_end: bool) -> bool {
        match self {
            Direction::Outgoing => is_start,
            Direction::Incoming => is_end,
            Direction::Both => true,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Outgoing => "OUTGOING",
            Direction::Incoming => "INCOMING",
            Direction::Both => "BOTH",
        };
        write!(f, "{}", name)
    }
}
