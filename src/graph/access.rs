//! Read capabilities a graph backend offers to the RDF view
//!
//! This is the whole surface the [`crate::rdf`] adapter consumes: full scans,
//! point lookups and adjacency. Every call is fallible so that a backend with
//! real I/O can surface its faults; the adapter passes them through unchanged.

use super::edge::Edge;
use super::node::Node;
use super::store::GraphResult;
use super::types::{EdgeId, EdgeType, NodeId};

/// Boxed iterator over nodes borrowed from a graph
pub type NodeIter<'g> = Box<dyn Iterator<Item = GraphResult<&'g Node>> + 'g>;

/// Boxed iterator over edges borrowed from a graph
pub type EdgeIter<'g> = Box<dyn Iterator<Item = GraphResult<&'g Edge>> + 'g>;

/// Minimal read-only property graph
pub trait PropertyGraph {
    /// Scan every node
    fn nodes(&self) -> GraphResult<NodeIter<'_>>;

    /// Scan every edge
    fn edges(&self) -> GraphResult<EdgeIter<'_>>;

    /// Point lookup of a node; `Ok(None)` when absent
    fn node(&self, id: NodeId) -> GraphResult<Option<&Node>>;

    /// Point lookup of an edge; `Ok(None)` when absent
    fn edge(&self, id: EdgeId) -> GraphResult<Option<&Edge>>;

    /// Edges whose tail is `id`, optionally restricted to one label
    fn out_edges(&self, id: NodeId, label: Option<EdgeType>) -> GraphResult<EdgeIter<'_>>;

    /// Edges whose head is `id`, optionally restricted to one label
    fn in_edges(&self, id: NodeId, label: Option<EdgeType>) -> GraphResult<EdgeIter<'_>>;
}

impl<G: PropertyGraph + ?Sized> PropertyGraph for &G {
    fn nodes(&self) -> GraphResult<NodeIter<'_>> {
        (**self).nodes()
    }

    fn edges(&self) -> GraphResult<EdgeIter<'_>> {
        (**self).edges()
    }

    fn node(&self, id: NodeId) -> GraphResult<Option<&Node>> {
        (**self).node(id)
    }

    fn edge(&self, id: EdgeId) -> GraphResult<Option<&Edge>> {
        (**self).edge(id)
    }

    fn out_edges(&self, id: NodeId, label: Option<EdgeType>) -> GraphResult<EdgeIter<'_>> {
        (**self).out_edges(id, label)
    }

    fn in_edges(&self, id: NodeId, label: Option<EdgeType>) -> GraphResult<EdgeIter<'_>> {
        (**self).in_edges(id, label)
    }
}
