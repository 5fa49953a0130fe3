//! Node handles and records
//!
//! A node carries:
//! - Properties (key-value pairs)
//! - An insertion-ordered set of labels
//! - The ordered list of every relationship it takes part in

use super::entity::PropertyContainer;
use super::labels::LabelSet;
use super::property::{PropertyBag, PropertyValue};
use super::relationship::Relationship;
use super::store::{Graph, GraphError, GraphResult, WeakGraph};
use super::types::{Direction, EntityId, Label, RelationshipType};
use std::fmt;

/// Arena record behind a [`Node`] handle
#[derive(Debug, Default)]
pub(crate) struct NodeRecord {
    pub(crate) properties: PropertyBag,
    pub(crate) labels: LabelSet,
    /// Incident relationships in creation order; self-loops appear twice
    pub(crate) relationships: Vec<EntityId>,
}

/// Handle to a node of a [`Graph`]
///
/// Handles are cheap to clone. Two handles are equal when they refer to the
/// same node of the same graph.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Node {
    graph: Graph,
    id: EntityId,
}

impl Node {
    pub(crate) fn new(graph: Graph, id: EntityId) -> Self {
        Node { graph, id }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Non-owning handle, for back-references stored inside the graph
    pub fn downgrade(&self) -> WeakNode {
        WeakNode {
            graph: self.graph.downgrade(),
            id: self.id,
        }
    }

    /// Add a label, returning the handle for chaining
    ///
    /// Adding a label the node already carries leaves the label set
    /// unchanged but is still reported to the listener.
    pub fn add_label(&self, label: impl Into<Label>) -> &Self {
        self.graph.add_label(self.id, label.into());
        self
    }

    pub fn has_label(&self, label: &Label) -> bool {
        self.graph.with_node(self.id, |node| node.labels.contains(label))
    }

    /// Labels in insertion order
    pub fn labels(&self) -> Labels {
        Labels {
            node: self.clone(),
            cursor: 0,
        }
    }

    /// Set a property, returning the handle for chaining
    pub fn property(&self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &Self {
        self.set_property(key, value);
        self
    }

    /// Create a relationship from this node to `other`
    pub fn create_relationship_to(
        &self,
        other: &Node,
        relationship_type: impl Into<RelationshipType>,
    ) -> Relationship {
        self.graph.create_relationship(self, relationship_type, other)
    }

    /// Every incident relationship, unfiltered
    pub fn relationships(&self) -> Relationships {
        self.relationships_by(Direction::Both, &[])
    }

    pub fn relationships_by_direction(&self, direction: Direction) -> Relationships {
        self.relationships_by(direction, &[])
    }

    /// Incident relationships of any of `types`, in either direction
    pub fn relationships_by_type(&self, types: &[RelationshipType]) -> Relationships {
        self.relationships_by(Direction::Both, types)
    }

    /// Incident relationships matching `direction` and any of `types`
    ///
    /// An empty `types` slice matches every type.
    pub fn relationships_by(&self, direction: Direction, types: &[RelationshipType]) -> Relationships {
        Relationships {
            node: self.clone(),
            cursor: 0,
            direction,
            types: types.to_vec(),
        }
    }

    pub fn has_relationship(&self) -> bool {
        self.relationships().next().is_some()
    }

    pub fn has_relationship_by_direction(&self, direction: Direction) -> bool {
        self.relationships_by_direction(direction).next().is_some()
    }

    pub fn has_relationship_by_type(&self, types: &[RelationshipType]) -> bool {
        self.relationships_by_type(types).next().is_some()
    }

    pub fn has_relationship_by(&self, direction: Direction, types: &[RelationshipType]) -> bool {
        self.relationships_by(direction, types).next().is_some()
    }

    /// The only relationship of `relationship_type` in `direction`, if any
    ///
    /// Fails with `AmbiguousRelationship` when more than one matches.
    pub fn single_relationship(
        &self,
        relationship_type: &RelationshipType,
        direction: Direction,
    ) -> GraphResult<Option<Relationship>> {
        let mut matches =
            self.relationships_by(direction, std::slice::from_ref(relationship_type));
        let first = match matches.next() {
            Some(first) => first,
            None => return Ok(None),
        };

        let extra = matches.count();
        if extra > 0 {
            return Err(GraphError::AmbiguousRelationship {
                node: self.id,
                relationship_type: relationship_type.clone(),
                direction,
                count: extra + 1,
            });
        }
        Ok(Some(first))
    }

    fn incident_at(&self, position: usize) -> Option<EntityId> {
        self.graph
            .with_node(self.id, |node| node.relationships.get(position).copied())
    }
}

impl PropertyContainer for Node {
    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn id(&self) -> EntityId {
        self.id
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Node").field(&self.id.as_u64()).finish()
    }
}

/// Weak counterpart of [`Node`], see [`Node::downgrade`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeakNode {
    graph: WeakGraph,
    id: EntityId,
}

impl WeakNode {
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The node, unless its graph has been dropped
    pub fn upgrade(&self) -> Option<Node> {
        self.graph.upgrade().map(|graph| Node::new(graph, self.id))
    }
}

/// Lazy iterator over a node's labels, see [`Node::labels`]
#[derive(Debug, Clone)]
pub struct Labels {
    node: Node,
    cursor: usize,
}

impl Iterator for Labels {
    type Item = Label;

    fn next(&mut self) -> Option<Label> {
        let label = self
            .node
            .graph
            .with_node(self.node.id, |node| node.labels.get(self.cursor).cloned())?;
        self.cursor += 1;
        Some(label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.node.graph.with_node(self.node.id, |node| node.labels.len());
        // Labels may still be added while iterating, so no upper bound
        (len.saturating_sub(self.cursor), None)
    }
}

/// Lazy, filtered iterator over a node's incident relationships
///
/// Walks the node's live incident list, so relationships created during
/// iteration are visited as well.
#[derive(Debug, Clone)]
pub struct Relationships {
    node: Node,
    cursor: usize,
    direction: Direction,
    types: Vec<RelationshipType>,
}

impl Relationships {
    fn accepts(&self, relationship: EntityId) -> bool {
        let node = self.node.id;
        self.node.graph.with_relationship(relationship, |record| {
            self.direction
                .matches(record.start == node, record.end == node)
                && (self.types.is_empty() || self.types.contains(&record.relationship_type))
        })
    }
}

impl Iterator for Relationships {
    type Item = Relationship;

    fn next(&mut self) -> Option<Relationship> {
        loop {
            let relationship = self.node.incident_at(self.cursor)?;
            self.cursor += 1;
            if self.accepts(relationship) {
                return Some(Relationship::new(self.node.graph.clone(), relationship));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knows() -> RelationshipType {
        RelationshipType::new("knows")
    }

    fn owns() -> RelationshipType {
        RelationshipType::new("owns")
    }

    fn uses() -> RelationshipType {
        RelationshipType::new("uses")
    }

    /// Four incoming relationships: knows, knows, owns, uses
    fn with_incoming(graph: &Graph, node: &Node) {
        graph.create_relationship(&graph.create_node(), knows(), node);
        graph.create_relationship(&graph.create_node(), knows(), node);
        graph.create_relationship(&graph.create_node(), owns(), node);
        graph.create_relationship(&graph.create_node(), uses(), node);
    }

    /// Four outgoing relationships: knows, owns, owns, uses
    fn with_outgoing(graph: &Graph, node: &Node) {
        graph.create_relationship(node, knows(), &graph.create_node());
        graph.create_relationship(node, owns(), &graph.create_node());
        graph.create_relationship(node, owns(), &graph.create_node());
        graph.create_relationship(node, uses(), &graph.create_node());
    }

    #[test]
    fn test_empty_node_has_no_relationships() {
        let graph = Graph::new();
        let node = graph.create_node();
        let any = [knows()];

        assert_eq!(node.relationships().count(), 0);
        for direction in [Direction::Both, Direction::Incoming, Direction::Outgoing] {
            assert!(!node.has_relationship_by_direction(direction));
            assert!(!node.has_relationship_by(direction, &any));
            assert_eq!(node.single_relationship(&knows(), direction), Ok(None));
        }
        assert!(!node.has_relationship());
        assert!(!node.has_relationship_by_type(&any));
    }

    #[test]
    fn test_incoming_existence() {
        let graph = Graph::new();
        let node = graph.create_node();
        with_incoming(&graph, &node);

        assert!(node.has_relationship());
        assert!(node.has_relationship_by_type(&[knows()]));
        assert!(node.has_relationship_by_direction(Direction::Both));
        assert!(node.has_relationship_by(Direction::Both, &[owns()]));
        assert!(node.has_relationship_by_direction(Direction::Incoming));
        assert!(node.has_relationship_by(Direction::Incoming, &[uses()]));

        assert!(!node.has_relationship_by_direction(Direction::Outgoing));
        assert!(!node.has_relationship_by(Direction::Outgoing, &[knows()]));
        assert!(!node.has_relationship_by_type(&[RelationshipType::new("unknown")]));
    }

    #[test]
    fn test_outgoing_existence() {
        let graph = Graph::new();
        let node = graph.create_node();
        with_outgoing(&graph, &node);

        assert!(node.has_relationship_by_direction(Direction::Outgoing));
        assert!(node.has_relationship_by(Direction::Outgoing, &[knows()]));
        assert!(!node.has_relationship_by_direction(Direction::Incoming));
        assert!(!node.has_relationship_by(Direction::Incoming, &[uses()]));
    }

    #[test]
    fn test_relationship_counts() {
        let graph = Graph::new();
        let node = graph.create_node();
        with_outgoing(&graph, &node);
        with_incoming(&graph, &node);

        assert_eq!(node.relationships().count(), 8);
        assert_eq!(node.relationships_by_direction(Direction::Both).count(), 8);
        assert_eq!(node.relationships_by(Direction::Both, &[knows()]).count(), 3);
        assert_eq!(node.relationships_by_direction(Direction::Incoming).count(), 4);
        assert_eq!(node.relationships_by(Direction::Incoming, &[owns()]).count(), 1);
        assert_eq!(node.relationships_by_direction(Direction::Outgoing).count(), 4);
        assert_eq!(node.relationships_by(Direction::Outgoing, &[uses()]).count(), 1);
        assert_eq!(node.relationships_by_type(&[owns()]).count(), 3);
        assert_eq!(node.relationships_by_type(&[owns(), uses()]).count(), 5);
        // Empty type list means any type
        assert_eq!(node.relationships_by(Direction::Outgoing, &[]).count(), 4);
    }

    #[test]
    fn test_single_relationship() {
        let graph = Graph::new();
        let node = graph.create_node();
        with_outgoing(&graph, &node);
        with_incoming(&graph, &node);

        assert!(node
            .single_relationship(&uses(), Direction::Incoming)
            .unwrap()
            .is_some());
        assert!(node
            .single_relationship(&knows(), Direction::Outgoing)
            .unwrap()
            .is_some());
        assert!(node
            .single_relationship(&RelationshipType::new("unknown"), Direction::Both)
            .unwrap()
            .is_none());

        let err = node
            .single_relationship(&knows(), Direction::Incoming)
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::AmbiguousRelationship {
                node: node.id(),
                relationship_type: knows(),
                direction: Direction::Incoming,
                count: 2,
            }
        );
        assert!(node.single_relationship(&owns(), Direction::Outgoing).is_err());
    }

    #[test]
    fn test_relationships_preserve_creation_order() {
        let graph = Graph::new();
        let node = graph.create_node();
        let r1 = node.create_relationship_to(&graph.create_node(), knows());
        let r2 = graph.create_relationship(&graph.create_node(), owns(), &node);
        let r3 = node.create_relationship_to(&graph.create_node(), uses());

        assert_eq!(node.relationships().collect::<Vec<_>>(), vec![r1, r2, r3]);
    }

    #[test]
    fn test_self_loop_listed_twice() {
        let graph = Graph::new();
        let node = graph.create_node();
        let r = node.create_relationship_to(&node, knows());

        assert_eq!(node.relationships().collect::<Vec<_>>(), vec![r.clone(), r.clone()]);
        assert_eq!(node.relationships_by_direction(Direction::Outgoing).count(), 2);
        assert_eq!(node.relationships_by_direction(Direction::Incoming).count(), 2);
        assert!(node
            .single_relationship(&knows(), Direction::Outgoing)
            .is_err());
    }

    #[test]
    fn test_labels_in_insertion_order() {
        let graph = Graph::new();
        let node = graph.create_node();
        node.add_label("component").add_label("application");

        assert_eq!(
            node.labels().collect::<Vec<_>>(),
            vec![Label::new("component"), Label::new("application")]
        );
        assert!(node.has_label(&Label::new("component")));
        assert!(!node.has_label(&Label::new("missing")));
    }

    #[test]
    fn test_duplicate_label_ignored() {
        let graph = Graph::new();
        let node = graph.create_node();
        node.add_label("foo");
        node.add_label("foo");

        assert_eq!(node.labels().collect::<Vec<_>>(), vec![Label::new("foo")]);
        assert_eq!(node.labels().count(), 1);
    }

    #[test]
    fn test_labels_iterator_sees_labels_added_during_iteration() {
        let graph = Graph::new();
        let node = graph.create_node();
        node.add_label("a");

        let mut labels = node.labels();
        assert_eq!(labels.size_hint(), (1, None));
        assert_eq!(labels.next(), Some(Label::new("a")));
        assert_eq!(labels.size_hint(), (0, None));

        node.add_label("b");
        assert_eq!(labels.size_hint(), (1, None));
        assert_eq!(labels.next(), Some(Label::new("b")));
        assert_eq!(labels.next(), None);
    }

    #[test]
    fn test_fluent_property() {
        let graph = Graph::new();
        let node = graph.create_node();
        node.add_label("NODE")
            .property("identity", "main")
            .property("name", "main");

        assert_eq!(node.get_property("name"), Ok("main".into()));
        assert_eq!(node.all_properties().len(), 2);
    }

    #[test]
    fn test_weak_node_upgrade() {
        let graph = Graph::new();
        let node = graph.create_node();
        let weak = node.downgrade();

        assert_eq!(weak.id(), node.id());
        assert_eq!(weak.upgrade(), Some(node.clone()));
        assert_eq!(weak, node.downgrade());

        // Any strong handle keeps the graph alive
        drop(graph);
        assert_eq!(weak.upgrade(), Some(node.clone()));
        drop(node);
        assert_eq!(weak.upgrade(), None);
    }

    #[test]
    fn test_debug_format() {
        let graph = Graph::new();
        let node = graph.create_node();
        assert_eq!(format!("{:?}", node), "Node(0)");
    }
}
