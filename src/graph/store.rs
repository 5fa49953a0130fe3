//! In-memory graph registry
//!
//! The [`Graph`] owns every node and relationship record in a single arena
//! indexed by id, hands out lightweight handles, and routes every mutation
//! through the event notifier once it has been applied.
//!
//! A graph is confined to one thread: the handle is reference counted and
//! the arena uses interior mutability, so it is neither `Send` nor `Sync`.
//! No arena borrow is held while a listener runs, which lets callbacks read
//! and mutate the graph reentrantly.

use super::config::GraphConfig;
use super::entity::{Entity, EntityRecord};
use super::event::{EventListener, EventNotifier, NoopEventListener};
use super::node::{Node, NodeRecord};
use super::property::{PropertyBag, PropertyValue};
use super::relationship::{Relationship, RelationshipRecord};
use super::types::{Direction, EntityId, Label, RelationshipType};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Property '{key}' not found on entity {entity}")]
    PropertyNotFound { entity: EntityId, key: String },

    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("Node {0} not found")]
    NodeNotFound(EntityId),

    #[error("Relationship {0} not found")]
    RelationshipNotFound(EntityId),

    #[error("Node {node} has {count} {direction} relationships of type {relationship_type}, expected at most one")]
    AmbiguousRelationship {
        node: EntityId,
        relationship_type: RelationshipType,
        direction: Direction,
        count: usize,
    },

    #[error("Invalid graph configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    /// True for every missing-property and missing-id error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GraphError::PropertyNotFound { .. }
                | GraphError::EntityNotFound(_)
                | GraphError::NodeNotFound(_)
                | GraphError::RelationshipNotFound(_)
        )
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

struct GraphInner {
    config: GraphConfig,
    /// Entity arena, indexed by id
    entities: RefCell<Vec<EntityRecord>>,
    node_count: Cell<usize>,
    relationship_count: Cell<usize>,
    notifier: EventNotifier,
}

/// Handle to an in-memory property graph
///
/// Cloning is cheap and yields another handle to the same graph. Two
/// handles compare equal when they refer to the same graph.
#[derive(Clone)]
pub struct Graph {
    inner: Rc<GraphInner>,
}

impl Graph {
    /// Create an empty graph with the default configuration and no listener
    pub fn new() -> Self {
        GraphBuilder::default().build()
    }

    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn config(&self) -> &GraphConfig {
        &self.inner.config
    }

    /// Non-owning handle to this graph
    ///
    /// Use it for back-references held by the listener or by opaque
    /// property values, which are owned by the graph themselves.
    pub fn downgrade(&self) -> WeakGraph {
        WeakGraph {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Create a node with no labels, properties or relationships
    pub fn create_node(&self) -> Node {
        let id = {
            let mut entities = self.inner.entities.borrow_mut();
            let id = next_id(&entities);
            entities.push(EntityRecord::Node(NodeRecord::default()));
            id
        };
        self.inner.node_count.set(self.inner.node_count.get() + 1);

        self.inner.notifier.node_created(self, id);
        Node::new(self.clone(), id)
    }

    /// Create a relationship `from -[relationship_type]-> to`
    ///
    /// The relationship is appended to the incident list of `from`, then of
    /// `to`; a self-loop therefore shows up twice on its node.
    ///
    /// # Panics
    ///
    /// Panics if either node was created by a different graph.
    pub fn create_relationship(
        &self,
        from: &Node,
        relationship_type: impl Into<RelationshipType>,
        to: &Node,
    ) -> Relationship {
        assert!(
            from.graph() == self,
            "start node {} belongs to graph '{}', not '{}'",
            from.id(),
            from.graph().name(),
            self.name()
        );
        assert!(
            to.graph() == self,
            "end node {} belongs to graph '{}', not '{}'",
            to.id(),
            to.graph().name(),
            self.name()
        );

        let id = {
            let mut entities = self.inner.entities.borrow_mut();
            let id = next_id(&entities);
            entities.push(EntityRecord::Relationship(RelationshipRecord::new(
                from.id(),
                to.id(),
                relationship_type.into(),
            )));
            node_record_mut(&mut entities, from.id()).relationships.push(id);
            node_record_mut(&mut entities, to.id()).relationships.push(id);
            id
        };
        self.inner
            .relationship_count
            .set(self.inner.relationship_count.get() + 1);

        self.inner.notifier.relationship_created(self, id);
        Relationship::new(self.clone(), id)
    }

    pub fn get_entity_by_id(&self, id: EntityId) -> GraphResult<Entity> {
        let entities = self.inner.entities.borrow();
        match entities.get(id.index()) {
            Some(EntityRecord::Node(_)) => Ok(Entity::Node(Node::new(self.clone(), id))),
            Some(EntityRecord::Relationship(_)) => {
                Ok(Entity::Relationship(Relationship::new(self.clone(), id)))
            }
            None => Err(GraphError::EntityNotFound(id)),
        }
    }

    /// Resolve a node; a relationship id fails with `NodeNotFound`
    pub fn get_node_by_id(&self, id: EntityId) -> GraphResult<Node> {
        let entities = self.inner.entities.borrow();
        match entities.get(id.index()) {
            Some(EntityRecord::Node(_)) => Ok(Node::new(self.clone(), id)),
            _ => Err(GraphError::NodeNotFound(id)),
        }
    }

    /// Resolve a relationship; a node id fails with `RelationshipNotFound`
    pub fn get_relationship_by_id(&self, id: EntityId) -> GraphResult<Relationship> {
        let entities = self.inner.entities.borrow();
        match entities.get(id.index()) {
            Some(EntityRecord::Relationship(_)) => Ok(Relationship::new(self.clone(), id)),
            _ => Err(GraphError::RelationshipNotFound(id)),
        }
    }

    /// Every node ever created, in creation order
    ///
    /// The iterator walks the live arena: nodes created while it is being
    /// consumed are visited too.
    pub fn get_all_nodes(&self) -> AllNodes {
        AllNodes {
            graph: self.clone(),
            cursor: 0,
        }
    }

    /// Every relationship ever created, in creation order
    pub fn get_all_relationships(&self) -> AllRelationships {
        AllRelationships {
            graph: self.clone(),
            cursor: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count.get()
    }

    pub fn relationship_count(&self) -> usize {
        self.inner.relationship_count.get()
    }

    // ============================================================
    // Record access for handles
    // ============================================================

    pub(crate) fn with_node<R>(&self, id: EntityId, f: impl FnOnce(&NodeRecord) -> R) -> R {
        let entities = self.inner.entities.borrow();
        match &entities[id.index()] {
            EntityRecord::Node(node) => f(node),
            EntityRecord::Relationship(_) => unreachable!("entity {} is not a node", id),
        }
    }

    pub(crate) fn with_relationship<R>(
        &self,
        id: EntityId,
        f: impl FnOnce(&RelationshipRecord) -> R,
    ) -> R {
        let entities = self.inner.entities.borrow();
        match &entities[id.index()] {
            EntityRecord::Relationship(relationship) => f(relationship),
            EntityRecord::Node(_) => unreachable!("entity {} is not a relationship", id),
        }
    }

    pub(crate) fn with_properties<R>(&self, id: EntityId, f: impl FnOnce(&PropertyBag) -> R) -> R {
        let entities = self.inner.entities.borrow();
        f(entities[id.index()].properties())
    }

    // ============================================================
    // Mutations on existing entities
    // ============================================================

    pub(crate) fn set_property(
        &self,
        id: EntityId,
        key: String,
        value: PropertyValue,
    ) -> Option<PropertyValue> {
        let previous = {
            let mut entities = self.inner.entities.borrow_mut();
            entities[id.index()]
                .properties_mut()
                .set(key.clone(), value.clone())
        };

        self.inner
            .notifier
            .property_changed(self, id, &key, previous.as_ref(), &value);
        previous
    }

    pub(crate) fn add_label(&self, id: EntityId, label: Label) {
        {
            let mut entities = self.inner.entities.borrow_mut();
            node_record_mut(&mut entities, id).labels.insert(label.clone());
        }

        self.inner.notifier.label_added(self, id, &label);
    }

    fn is_node_at(&self, index: usize) -> Option<bool> {
        self.inner
            .entities
            .borrow()
            .get(index)
            .map(|e| matches!(e, EntityRecord::Node(_)))
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Graph {}

impl Hash for Graph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.inner).hash(state);
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Graph");
        s.field("name", &self.name());
        if let Ok(entities) = self.inner.entities.try_borrow() {
            s.field("entities", &entities.len());
        }
        s.finish()
    }
}

/// Weak counterpart of [`Graph`], see [`Graph::downgrade`]
#[derive(Clone)]
pub struct WeakGraph {
    inner: Weak<GraphInner>,
}

impl WeakGraph {
    /// The graph, unless every strong handle to it has been dropped
    pub fn upgrade(&self) -> Option<Graph> {
        self.inner.upgrade().map(|inner| Graph { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl PartialEq for WeakGraph {
    fn eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl Eq for WeakGraph {}

impl Hash for WeakGraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.as_ptr().hash(state);
    }
}

impl fmt::Debug for WeakGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakGraph")
            .field("alive", &self.is_alive())
            .finish()
    }
}

fn next_id(entities: &[EntityRecord]) -> EntityId {
    EntityId::new(entities.len() as u64)
}

fn node_record_mut(entities: &mut [EntityRecord], id: EntityId) -> &mut NodeRecord {
    match &mut entities[id.index()] {
        EntityRecord::Node(node) => node,
        EntityRecord::Relationship(_) => unreachable!("entity {} is not a node", id),
    }
}

/// Builder for [`Graph`]
#[derive(Default)]
pub struct GraphBuilder {
    config: GraphConfig,
    listener: Option<Box<dyn EventListener>>,
}

impl GraphBuilder {
    /// Install the single listener notified of every mutation
    pub fn listener(mut self, listener: impl EventListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    pub fn build(self) -> Graph {
        let observed = self.listener.is_some();
        let listener: Box<dyn EventListener> = match self.listener {
            Some(listener) => listener,
            None => Box::new(NoopEventListener),
        };

        debug!(
            graph = %self.config.name,
            capacity = self.config.initial_capacity,
            observed,
            "Creating graph"
        );

        Graph {
            inner: Rc::new(GraphInner {
                entities: RefCell::new(Vec::with_capacity(self.config.initial_capacity)),
                node_count: Cell::new(0),
                relationship_count: Cell::new(0),
                notifier: EventNotifier::new(listener),
                config: self.config,
            }),
        }
    }
}

/// Lazy iterator over every node of a graph, see [`Graph::get_all_nodes`]
#[derive(Debug, Clone)]
pub struct AllNodes {
    graph: Graph,
    cursor: usize,
}

impl Iterator for AllNodes {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        loop {
            let index = self.cursor;
            let is_node = self.graph.is_node_at(index)?;
            self.cursor += 1;
            if is_node {
                return Some(Node::new(self.graph.clone(), EntityId::new(index as u64)));
            }
        }
    }
}

/// Lazy iterator over every relationship of a graph, see
/// [`Graph::get_all_relationships`]
#[derive(Debug, Clone)]
pub struct AllRelationships {
    graph: Graph,
    cursor: usize,
}

impl Iterator for AllRelationships {
    type Item = Relationship;

    fn next(&mut self) -> Option<Relationship> {
        loop {
            let index = self.cursor;
            let is_node = self.graph.is_node_at(index)?;
            self.cursor += 1;
            if !is_node {
                return Some(Relationship::new(
                    self.graph.clone(),
                    EntityId::new(index as u64),
                ));
            }
        }
    }
}
