//! Core property graph implementation
//!
//! This module implements the property graph data model with:
//! - Nodes with insertion-ordered labels and properties
//! - Directed, typed relationships with properties
//! - Self-loops and multiple relationships between the same nodes
//! - Direction and type filtered adjacency queries
//! - Synchronous mutation events delivered to a single listener

pub mod config;
pub mod entity;
pub mod event;
mod labels;
pub mod node;
pub mod property;
pub mod relationship;
pub mod store;
pub mod types;

// Re-export main types
pub use config::GraphConfig;
pub use entity::{Entity, PropertyContainer};
pub use event::{
    EventListener, LabelAddedEvent, NodeCreatedEvent, NoopEventListener, PropertyChangedEvent,
    RelationshipCreatedEvent,
};
pub use node::{Labels, Node, Relationships, WeakNode};
pub use property::{OpaqueValue, PropertyMap, PropertyValue};
pub use relationship::{Relationship, WeakRelationship};
pub use store::{
    AllNodes, AllRelationships, Graph, GraphBuilder, GraphError, GraphResult, WeakGraph,
};
pub use types::{Direction, EntityId, Label, RelationshipType};
