//! Graph mutation events
//!
//! Every mutation is reported to the graph's [`EventListener`] synchronously,
//! after the in-memory state has been updated and before the mutating call
//! returns. Events borrow the owning [`Graph`], so a listener can read the
//! new state back (or even mutate the graph further) from inside a callback.

use super::entity::Entity;
use super::node::Node;
use super::property::PropertyValue;
use super::relationship::Relationship;
use super::store::{Graph, GraphResult};
use super::types::{EntityId, Label};
use std::rc::Rc;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
pub struct NodeCreatedEvent<'a> {
    pub graph: &'a Graph,
    pub node_id: EntityId,
}

impl NodeCreatedEvent<'_> {
    pub fn node(&self) -> GraphResult<Node> {
        self.graph.get_node_by_id(self.node_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RelationshipCreatedEvent<'a> {
    pub graph: &'a Graph,
    pub relationship_id: EntityId,
}

impl RelationshipCreatedEvent<'_> {
    pub fn relationship(&self) -> GraphResult<Relationship> {
        self.graph.get_relationship_by_id(self.relationship_id)
    }
}

/// A property was written on a node or relationship
///
/// `previous_value` is `None` when the key was unset before the write, and
/// `Some(PropertyValue::Null)` when it held an explicit null.
#[derive(Debug, Clone, Copy)]
pub struct PropertyChangedEvent<'a> {
    pub graph: &'a Graph,
    pub entity_id: EntityId,
    pub key: &'a str,
    pub previous_value: Option<&'a PropertyValue>,
    pub new_value: &'a PropertyValue,
}

impl PropertyChangedEvent<'_> {
    pub fn entity(&self) -> GraphResult<Entity> {
        self.graph.get_entity_by_id(self.entity_id)
    }
}

/// A label was added to a node
///
/// Fired on every `add_label` call, including when the node already
/// carried the label.
#[derive(Debug, Clone, Copy)]
pub struct LabelAddedEvent<'a> {
    pub graph: &'a Graph,
    pub node_id: EntityId,
    pub label: &'a Label,
}

impl LabelAddedEvent<'_> {
    pub fn node(&self) -> GraphResult<Node> {
        self.graph.get_node_by_id(self.node_id)
    }
}

/// Observer of graph mutations
///
/// All callbacks default to doing nothing, so implementors only override the
/// events they care about. Callbacks take `&self`; listeners that record
/// state use interior mutability.
///
/// The graph owns its listener. A listener that keeps strong handles
/// resolved from events (a [`Node`], [`Relationship`] or [`Graph`]) forms a
/// reference cycle with it, and neither is ever dropped. Keep
/// [`WeakNode`](super::node::WeakNode) or
/// [`WeakGraph`](super::store::WeakGraph) handles instead.
pub trait EventListener {
    fn node_created(&self, _event: &NodeCreatedEvent<'_>) {}

    fn relationship_created(&self, _event: &RelationshipCreatedEvent<'_>) {}

    fn property_changed(&self, _event: &PropertyChangedEvent<'_>) {}

    fn label_added(&self, _event: &LabelAddedEvent<'_>) {}
}

/// Listener installed when a graph is built without one
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventListener;

impl EventListener for NoopEventListener {}

impl<L: EventListener + ?Sized> EventListener for Rc<L> {
    fn node_created(&self, event: &NodeCreatedEvent<'_>) {
        (**self).node_created(event)
    }

    fn relationship_created(&self, event: &RelationshipCreatedEvent<'_>) {
        (**self).relationship_created(event)
    }

    fn property_changed(&self, event: &PropertyChangedEvent<'_>) {
        (**self).property_changed(event)
    }

    fn label_added(&self, event: &LabelAddedEvent<'_>) {
        (**self).label_added(event)
    }
}

impl<L: EventListener + ?Sized> EventListener for Box<L> {
    fn node_created(&self, event: &NodeCreatedEvent<'_>) {
        (**self).node_created(event)
    }

    fn relationship_created(&self, event: &RelationshipCreatedEvent<'_>) {
        (**self).relationship_created(event)
    }

    fn property_changed(&self, event: &PropertyChangedEvent<'_>) {
        (**self).property_changed(event)
    }

    fn label_added(&self, event: &LabelAddedEvent<'_>) {
        (**self).label_added(event)
    }
}

/// Turns applied mutations into events for the configured listener
///
/// Always holds a listener (the no-op one when none was configured), so the
/// mutation paths in the store never branch on whether anyone is observing.
pub(crate) struct EventNotifier {
    listener: Box<dyn EventListener>,
}

impl EventNotifier {
    pub(crate) fn new(listener: Box<dyn EventListener>) -> Self {
        EventNotifier { listener }
    }

    pub(crate) fn node_created(&self, graph: &Graph, node_id: EntityId) {
        trace!(graph = graph.name(), node = %node_id, "node created");
        self.listener
            .node_created(&NodeCreatedEvent { graph, node_id });
    }

    pub(crate) fn relationship_created(&self, graph: &Graph, relationship_id: EntityId) {
        trace!(graph = graph.name(), relationship = %relationship_id, "relationship created");
        self.listener
            .relationship_created(&RelationshipCreatedEvent { graph, relationship_id });
    }

    pub(crate) fn property_changed(
        &self,
        graph: &Graph,
        entity_id: EntityId,
        key: &str,
        previous_value: Option<&PropertyValue>,
        new_value: &PropertyValue,
    ) {
        trace!(graph = graph.name(), entity = %entity_id, key, "property changed");
        self.listener.property_changed(&PropertyChangedEvent {
            graph,
            entity_id,
            key,
            previous_value,
            new_value,
        });
    }

    pub(crate) fn label_added(&self, graph: &Graph, node_id: EntityId, label: &Label) {
        trace!(graph = graph.name(), node = %node_id, label = label.as_str(), "label added");
        self.listener
            .label_added(&LabelAddedEvent { graph, node_id, label });
    }
}
