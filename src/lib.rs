//! Samyama Sail
//!
//! A read-only RDF view over the Samyama property graph. Vertices, edges and
//! their properties are presented as RDF statements generated on demand, so
//! any triple-pattern consumer can query a property graph without the graph
//! ever being converted or copied.
//!
//! # Layout
//!
//! - [`graph`]: the property graph model, the in-memory [`GraphStore`] and the
//!   [`PropertyGraph`] read capability the view is built on
//! - [`rdf`]: identifier codec, literal coercion, statement generators, lazy
//!   statement iteration, pattern dispatch and the Sail connection
//!
//! ## Example Usage
//!
//! ```rust
//! use samyama_sail::{GraphStore, PropertyGraphSail, SailConfig};
//!
//! let mut store = GraphStore::new();
//! let alice = store.create_node();
//! let bob = store.create_node();
//! store.set_node_property(alice, "name", "Alice").unwrap();
//! store.set_node_property(bob, "name", "Bob").unwrap();
//! store.create_edge(alice, bob, "knows").unwrap();
//!
//! // Simple mode: the edge becomes one `alice relation:knows bob` statement
//! let sail = PropertyGraphSail::new(&store, SailConfig::simple()).unwrap();
//! let conn = sail.connection();
//!
//! let alice_uri = sail.codec().vertex_uri(alice);
//! let about_alice = conn
//!     .get_statements(Some(alice_uri.as_ref().into()), None, None, &[])
//!     .unwrap()
//!     .count();
//! // id, type, name, knows
//! assert_eq!(about_alice, 4);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod rdf;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, EdgeType, GraphError, GraphResult, GraphStore, Node, NodeId, PropertyGraph,
    PropertyMap, PropertyValue,
};

pub use rdf::{
    Codec, Namespaces, PatternDispatcher, PropertyGraphSail, SailConfig, SailConnection, SailError,
    SailResult, Statement, StatementIteration,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
