//! Modelgraph
//!
//! An embeddable, in-process property graph engine: typed nodes, typed
//! relationships, key/value properties, labels and directional relationship
//! queries, with every mutation reported synchronously to an optional
//! listener.
//!
//! # Model
//!
//! - A [`Graph`] owns all nodes and relationships and assigns their ids.
//!   Nothing is ever deleted, so ids are never reused.
//! - [`Node`] and [`Relationship`] are lightweight handles (graph + id).
//!   Properties are read and written through [`PropertyContainer`].
//! - Relationship queries filter a node's incident relationships by
//!   [`Direction`] and [`RelationshipType`].
//! - An [`EventListener`] installed through [`Graph::builder`] sees every
//!   mutation after it has been applied and before the call returns.
//!
//! A graph is confined to the thread that created it.
//!
//! ## Example Usage
//!
//! ```rust
//! use modelgraph::{Direction, Graph, Label, PropertyContainer, RelationshipType};
//!
//! let graph = Graph::new();
//!
//! let root = graph.create_node();
//! root.add_label("NODE").property("name", "root");
//!
//! let child = graph.create_node();
//! child.add_label("NODE").property("name", "main");
//!
//! let owns = RelationshipType::with_name("OWNS");
//! root.create_relationship_to(&child, owns.clone());
//!
//! // Walk back from the child to its owner
//! let parent = child
//!     .single_relationship(&owns, Direction::Incoming)
//!     .unwrap()
//!     .map(|r| r.start_node());
//! assert_eq!(parent, Some(root.clone()));
//!
//! assert!(child.has_label(&Label::new("NODE")));
//! assert_eq!(child.get_property("name").unwrap().as_string(), Some("main"));
//! ```

#![warn(clippy::all)]

pub mod graph;

// Re-export main types for convenience
pub use graph::{
    AllNodes, AllRelationships, Direction, Entity, EntityId, EventListener, Graph, GraphBuilder,
    GraphConfig, GraphError, GraphResult, Label, LabelAddedEvent, Labels, Node, NodeCreatedEvent,
    NoopEventListener, OpaqueValue, PropertyChangedEvent, PropertyContainer, PropertyMap,
    PropertyValue, Relationship, RelationshipCreatedEvent, RelationshipType, Relationships,
    WeakGraph, WeakNode, WeakRelationship,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
