//! Core property graph implementation
//!
//! This module implements the property graph data model with:
//! - Nodes with properties
//! - Directed, labeled edges with properties
//! - Multiple edges between same nodes
//! - In-memory storage with id-indexed arenas and adjacency lists
//! - The [`PropertyGraph`] read capability consumed by the RDF view

pub mod access;
pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use access::{EdgeIter, NodeIter, PropertyGraph};
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, EdgeType, NodeId};
