//! In-memory graph storage implementation
//!
//! Nodes and edges live in id-indexed arenas; each node slot carries its
//! outgoing and incoming adjacency list. Scans therefore run in id order,
//! which keeps statement sequences stable between identical queries.

use super::access::{EdgeIter, NodeIter, PropertyGraph};
use super::edge::Edge;
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, NodeId};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("Edge {0} already exists")]
    EdgeAlreadyExists(EdgeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Id {0} is beyond the storage range")]
    IdOutOfRange(u64),

    /// Fault raised by a storage backend (I/O, cursor failure, ...)
    #[error("Backend error: {0}")]
    Backend(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Largest id `insert_node`/`insert_edge` accept past the end of an arena
pub const MAX_INSERT_ID: u64 = (1 << 20) - 1;

/// Arena slot for an inserted id, which may grow the arena
fn insert_slot(id: u64, len: usize) -> GraphResult<usize> {
    match usize::try_from(id) {
        Ok(idx) if idx < len || id <= MAX_INSERT_ID => Ok(idx),
        _ => Err(GraphError::IdOutOfRange(id)),
    }
}

/// In-memory graph storage
///
/// - nodes: NodeId -> Node
/// - edges: EdgeId -> Edge
/// - outgoing: NodeId -> Vec<EdgeId> (adjacency list for outgoing edges)
/// - incoming: NodeId -> Vec<EdgeId> (adjacency list for incoming edges)
#[derive(Debug)]
pub struct GraphStore {
    /// Node storage (arena indexed by NodeId)
    nodes: Vec<Option<Node>>,

    /// Edge storage (arena indexed by EdgeId)
    edges: Vec<Option<Edge>>,

    /// Outgoing edges for each node (adjacency list)
    outgoing: Vec<Vec<EdgeId>>,

    /// Incoming edges for each node (adjacency list)
    incoming: Vec<Vec<EdgeId>>,

    /// Next node ID
    next_node_id: u64,

    /// Next edge ID
    next_edge_id: u64,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            nodes: Vec::with_capacity(1024),
            edges: Vec::with_capacity(4096),
            outgoing: Vec::with_capacity(1024),
            incoming: Vec::with_capacity(1024),
            next_node_id: 1,
            next_edge_id: 1,
        }
    }

    /// Create a node with an auto-generated ID
    pub fn create_node(&mut self) -> NodeId {
        self.create_node_with_properties(PropertyMap::new())
    }

    /// Create a node with properties
    pub fn create_node_with_properties(&mut self, properties: PropertyMap) -> NodeId {
        let node_id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        self.place_node(Node::new_with_properties(node_id, properties));
        node_id
    }

    /// Insert a node keeping its existing ID (fixtures, recovery)
    pub fn insert_node(&mut self, node: Node) -> GraphResult<()> {
        if self.has_node(node.id) {
            return Err(GraphError::NodeAlreadyExists(node.id));
        }
        insert_slot(node.id.as_u64(), self.nodes.len())?;
        self.next_node_id = self.next_node_id.max(node.id.as_u64().saturating_add(1));
        self.place_node(node);
        Ok(())
    }

    fn place_node(&mut self, node: Node) {
        let idx = node.id.as_u64() as usize;

        // Ensure storage capacity
        if idx >= self.nodes.len() {
            self.nodes.resize(idx + 1, None);
            self.outgoing.resize(idx + 1, Vec::new());
            self.incoming.resize(idx + 1, Vec::new());
        }

        self.nodes[idx] = Some(node);
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_u64() as usize).and_then(Option::as_ref)
    }

    /// Get a mutable node by ID
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.as_u64() as usize).and_then(Option::as_mut)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    /// Set a property on a node
    pub fn set_node_property(
        &mut self,
        node_id: NodeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<Option<PropertyValue>> {
        let node = self.get_node_mut(node_id).ok_or(GraphError::NodeNotFound(node_id))?;
        Ok(node.set_property(key, value))
    }

    /// Create an edge between two nodes
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
    ) -> GraphResult<EdgeId> {
        self.create_edge_with_properties(source, target, edge_type, PropertyMap::new())
    }

    /// Create an edge with properties
    pub fn create_edge_with_properties(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId> {
        self.validate_endpoints(source, target)?;

        let edge_id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        self.place_edge(Edge::new_with_properties(edge_id, source, target, edge_type, properties));
        Ok(edge_id)
    }

    /// Insert an edge keeping its existing ID (fixtures, recovery)
    /// Note: Source and target nodes must already exist
    pub fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if self.has_edge(edge.id) {
            return Err(GraphError::EdgeAlreadyExists(edge.id));
        }
        self.validate_endpoints(edge.source, edge.target)?;
        insert_slot(edge.id.as_u64(), self.edges.len())?;
        self.next_edge_id = self.next_edge_id.max(edge.id.as_u64().saturating_add(1));
        self.place_edge(edge);
        Ok(())
    }

    fn validate_endpoints(&self, source: NodeId, target: NodeId) -> GraphResult<()> {
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }
        Ok(())
    }

    fn place_edge(&mut self, edge: Edge) {
        let idx = edge.id.as_u64() as usize;

        // Update adjacency lists
        self.outgoing[edge.source.as_u64() as usize].push(edge.id);
        self.incoming[edge.target.as_u64() as usize].push(edge.id);

        // Ensure storage capacity
        if idx >= self.edges.len() {
            self.edges.resize(idx + 1, None);
        }

        self.edges[idx] = Some(edge);
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize).and_then(Option::as_ref)
    }

    /// Get a mutable edge by ID
    pub fn get_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.as_u64() as usize).and_then(Option::as_mut)
    }

    /// Check if an edge exists
    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.get_edge(id).is_some()
    }

    /// Set a property on an edge
    pub fn set_edge_property(
        &mut self,
        edge_id: EdgeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<Option<PropertyValue>> {
        let edge = self.get_edge_mut(edge_id).ok_or(GraphError::EdgeNotFound(edge_id))?;
        Ok(edge.set_property(key, value))
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.adjacent(&self.outgoing, node_id).collect()
    }

    /// Get all incoming edges to a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.adjacent(&self.incoming, node_id).collect()
    }

    fn adjacent<'a>(&'a self, lists: &'a [Vec<EdgeId>], node_id: NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        lists
            .get(node_id.as_u64() as usize)
            .into_iter()
            .flatten()
            .filter_map(move |&id| self.get_edge(id))
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// Iterate over all nodes in id order
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().flatten()
    }

    /// Iterate over all edges in id order
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().flatten()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyGraph for GraphStore {
    fn nodes(&self) -> GraphResult<NodeIter<'_>> {
        Ok(Box::new(self.all_nodes().map(Ok)))
    }

    fn edges(&self) -> GraphResult<EdgeIter<'_>> {
        Ok(Box::new(self.all_edges().map(Ok)))
    }

    fn node(&self, id: NodeId) -> GraphResult<Option<&Node>> {
        Ok(self.get_node(id))
    }

    fn edge(&self, id: EdgeId) -> GraphResult<Option<&Edge>> {
        Ok(self.get_edge(id))
    }

    fn out_edges(&self, id: NodeId, label: Option<EdgeType>) -> GraphResult<EdgeIter<'_>> {
        Ok(Box::new(
            self.adjacent(&self.outgoing, id)
                .filter(move |edge| label.as_ref().map_or(true, |l| edge.label() == l))
                .map(Ok),
        ))
    }

    fn in_edges(&self, id: NodeId, label: Option<EdgeType>) -> GraphResult<EdgeIter<'_>> {
        Ok(Box::new(
            self.adjacent(&self.incoming, id)
                .filter(move |edge| label.as_ref().map_or(true, |l| edge.label() == l))
                .map(Ok),
        ))
    }
}
