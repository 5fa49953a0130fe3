//! Entities: the addressable objects of a graph
//!
//! Nodes and relationships are both entities. They share an id space and
//! each carries a property bag, exposed through [`PropertyContainer`].

use super::node::{Node, NodeRecord};
use super::property::{PropertyBag, PropertyMap, PropertyValue};
use super::relationship::{Relationship, RelationshipRecord};
use super::store::{Graph, GraphError, GraphResult};
use super::types::EntityId;

/// Arena slot
#[derive(Debug)]
pub(crate) enum EntityRecord {
    Node(NodeRecord),
    Relationship(RelationshipRecord),
}

impl EntityRecord {
    pub(crate) fn properties(&self) -> &PropertyBag {
        match self {
            EntityRecord::Node(node) => &node.properties,
            EntityRecord::Relationship(relationship) => &relationship.properties,
        }
    }

    pub(crate) fn properties_mut(&mut self) -> &mut PropertyBag {
        match self {
            EntityRecord::Node(node) => &mut node.properties,
            EntityRecord::Relationship(relationship) => &mut relationship.properties,
        }
    }
}

/// Property access shared by every entity handle
///
/// Writes go through the owning graph, so each one is reported to the
/// graph's listener before the call returns.
pub trait PropertyContainer {
    fn graph(&self) -> &Graph;

    fn id(&self) -> EntityId;

    /// Upsert a property, returning the value it replaced
    fn set_property(
        &self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.graph().set_property(self.id(), key.into(), value.into())
    }

    /// Read a property, failing with `PropertyNotFound` when unset
    fn get_property(&self, key: &str) -> GraphResult<PropertyValue> {
        self.graph()
            .with_properties(self.id(), |bag| bag.get(key).cloned())
            .ok_or_else(|| GraphError::PropertyNotFound {
                entity: self.id(),
                key: key.to_string(),
            })
    }

    fn get_property_or(&self, key: &str, default: impl Into<PropertyValue>) -> PropertyValue {
        self.graph()
            .with_properties(self.id(), |bag| bag.get(key).cloned())
            .unwrap_or_else(|| default.into())
    }

    fn has_property(&self, key: &str) -> bool {
        self.graph().with_properties(self.id(), |bag| bag.contains(key))
    }

    /// Independent snapshot of every property, in insertion order
    fn all_properties(&self) -> PropertyMap {
        self.graph().with_properties(self.id(), PropertyBag::snapshot)
    }
}

/// Handle to either kind of entity, as returned by
/// [`Graph::get_entity_by_id`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Node(Node),
    Relationship(Relationship),
}

impl Entity {
    pub fn is_node(&self) -> bool {
        matches!(self, Entity::Node(_))
    }

    pub fn is_relationship(&self) -> bool {
        matches!(self, Entity::Relationship(_))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Entity::Node(node) => Some(node),
            Entity::Relationship(_) => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Entity::Relationship(relationship) => Some(relationship),
            Entity::Node(_) => None,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Entity::Node(node) => Some(node),
            Entity::Relationship(_) => None,
        }
    }

    pub fn into_relationship(self) -> Option<Relationship> {
        match self {
            Entity::Relationship(relationship) => Some(relationship),
            Entity::Node(_) => None,
        }
    }
}

impl PropertyContainer for Entity {
    fn graph(&self) -> &Graph {
        match self {
            Entity::Node(node) => node.graph(),
            Entity::Relationship(relationship) => relationship.graph(),
        }
    }

    fn id(&self) -> EntityId {
        match self {
            Entity::Node(node) => node.id(),
            Entity::Relationship(relationship) => relationship.id(),
        }
    }
}

impl From<Node> for Entity {
    fn from(node: Node) -> Self {
        Entity::Node(node)
    }
}

impl From<Relationship> for Entity {
    fn from(relationship: Relationship) -> Self {
        Entity::Relationship(relationship)
    }
}
