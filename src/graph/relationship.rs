//! Relationship handles and records
//!
//! A relationship is a typed, directed edge from a start node to an end
//! node. Endpoints and type are fixed at creation; properties stay mutable.
//! Self-loops and parallel relationships of the same type are allowed.

use super::entity::PropertyContainer;
use super::node::Node;
use super::property::{PropertyBag, PropertyValue};
use super::store::{Graph, WeakGraph};
use super::types::{EntityId, RelationshipType};
use std::fmt;

/// Arena record behind a [`Relationship`] handle
#[derive(Debug)]
pub(crate) struct RelationshipRecord {
    pub(crate) properties: PropertyBag,
    pub(crate) start: EntityId,
    pub(crate) end: EntityId,
    pub(crate) relationship_type: RelationshipType,
}

impl RelationshipRecord {
    pub(crate) fn new(start: EntityId, end: EntityId, relationship_type: RelationshipType) -> Self {
        RelationshipRecord {
            properties: PropertyBag::default(),
            start,
            end,
            relationship_type,
        }
    }
}

/// Handle to a relationship of a [`Graph`]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    graph: Graph,
    id: EntityId,
}

impl Relationship {
    pub(crate) fn new(graph: Graph, id: EntityId) -> Self {
        Relationship { graph, id }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Non-owning handle, see [`Node::downgrade`]
    pub fn downgrade(&self) -> WeakRelationship {
        WeakRelationship {
            graph: self.graph.downgrade(),
            id: self.id,
        }
    }

    pub fn start_node(&self) -> Node {
        let start = self.graph.with_relationship(self.id, |r| r.start);
        Node::new(self.graph.clone(), start)
    }

    pub fn end_node(&self) -> Node {
        let end = self.graph.with_relationship(self.id, |r| r.end);
        Node::new(self.graph.clone(), end)
    }

    /// The endpoint opposite to `node`
    ///
    /// Returns the end node when `node` is the start node and the start
    /// node for any other input, without checking that `node` is an
    /// endpoint at all.
    pub fn other_node(&self, node: &Node) -> Node {
        let start = self.start_node();
        if *node == start {
            self.end_node()
        } else {
            start
        }
    }

    pub fn relationship_type(&self) -> RelationshipType {
        self.graph
            .with_relationship(self.id, |r| r.relationship_type.clone())
    }

    pub fn is_type(&self, relationship_type: &RelationshipType) -> bool {
        self.graph
            .with_relationship(self.id, |r| &r.relationship_type == relationship_type)
    }

    /// Start and end node, in that order
    pub fn nodes(&self) -> [Node; 2] {
        [self.start_node(), self.end_node()]
    }

    /// Set a property, returning the handle for chaining
    pub fn property(&self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &Self {
        self.set_property(key, value);
        self
    }
}

impl PropertyContainer for Relationship {
    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn id(&self) -> EntityId {
        self.id
    }
}

impl fmt::Debug for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Relationship").field(&self.id.as_u64()).finish()
    }
}

/// Weak counterpart of [`Relationship`], see [`Relationship::downgrade`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeakRelationship {
    graph: WeakGraph,
    id: EntityId,
}

impl WeakRelationship {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn upgrade(&self) -> Option<Relationship> {
        self.graph
            .upgrade()
            .map(|graph| Relationship::new(graph, self.id))
    }
}
