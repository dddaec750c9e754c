//! RDF view over the property graph
//!
//! This module exposes a [`PropertyGraph`](crate::graph::PropertyGraph) as a
//! read-only RDF triple store (a "Sail"). Nothing is materialized: every
//! triple pattern is answered by generating matching statements on demand
//! from the graph.
//!
//! Edges are exposed in one of two ways, fixed per sail:
//! - first-class: each edge is a resource with `pgm:id`, `rdf:type pgm:Edge`,
//!   `pgm:label`, `pgm:head`, `pgm:tail` and its properties
//! - simple: each edge is the single statement `tail relation:label head`
//!
//! # Example
//!
//! ```rust
//! use samyama_sail::graph::GraphStore;
//! use samyama_sail::rdf::{PropertyGraphSail, SailConfig};
//!
//! let mut graph = GraphStore::new();
//! let marko = graph.create_node();
//! let vadas = graph.create_node();
//! graph.set_node_property(marko, "name", "marko").unwrap();
//! graph.create_edge(marko, vadas, "knows").unwrap();
//!
//! let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
//! let conn = sail.connection();
//!
//! let name = sail.codec().property_uri("name");
//! let names: Vec<_> = conn
//!     .get_statements(None, Some(name.as_ref()), None, &[])
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(names.len(), 1);
//! ```

mod codec;
mod config;
mod dispatch;
mod generator;
mod iteration;
mod literal;
mod namespace;
mod sail;

pub use codec::Codec;
pub use config::SailConfig;
pub use dispatch::{PatternDispatcher, PredicateKind, Resolved};
pub use generator::{
    EdgeGenerator, Element, Generator, ObjectFilter, PropertySelection, RelationGenerator, VertexGenerator,
};
pub use iteration::{Base, Source, StatementIteration};
pub use literal::{from_literal, to_literal};
pub use namespace::{Namespace, Namespaces, PrefixError, PrefixResult, DEFAULT_BASE_IRI, RDF_NS};
pub use sail::{PropertyGraphSail, SailConnection};

use crate::graph::GraphError;
use thiserror::Error;

/// A generated RDF statement
pub type Statement = oxrdf::Triple;

/// Sail errors
#[derive(Error, Debug)]
pub enum SailError {
    /// Failure reported by the underlying graph
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Base IRI rejected at construction
    #[error("Invalid base IRI: {0}")]
    InvalidBaseIri(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection used after close
    #[error("Connection is closed")]
    ConnectionClosed,
}

pub type SailResult<T> = Result<T, SailError>;
