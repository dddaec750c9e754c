//! Lazy statement iteration
//!
//! A [`Source`] pairs a base element sequence (a full scan, a single element,
//! or one vertex's adjacency) with a [`Generator`]. A [`StatementIteration`]
//! drains its sources in order:
//!
//! 1. hand out a buffered statement if there is one,
//! 2. otherwise pull one element from the current source and generate into
//!    the buffer,
//! 3. when the current source runs dry, open the next one.
//!
//! A source's base is only opened when the iteration reaches it, so sources
//! behind a closed or abandoned iteration never touch the graph.

use super::codec::Codec;
use super::generator::{Element, Generator};
use super::{SailResult, Statement};
use crate::graph::{EdgeIter, EdgeType, GraphResult, NodeId, NodeIter, PropertyGraph};
use std::collections::VecDeque;
use tracing::trace;

/// Where a source's elements come from
#[derive(Debug, Clone)]
pub enum Base<'g> {
    /// Every vertex
    Nodes,
    /// Every edge
    Edges,
    /// One element already looked up
    Single(Element<'g>),
    /// Edges leaving a vertex, optionally with one label
    OutEdges(NodeId, Option<EdgeType>),
    /// Edges arriving at a vertex, optionally with one label
    InEdges(NodeId, Option<EdgeType>),
}

/// One base sequence and the generator applied to each of its elements
#[derive(Debug, Clone)]
pub struct Source<'g> {
    pub base: Base<'g>,
    pub generator: Generator,
}

impl<'g> Source<'g> {
    pub fn new(base: Base<'g>, generator: Generator) -> Self {
        Self { base, generator }
    }
}

/// An opened base
enum Cursor<'g> {
    Nodes(NodeIter<'g>),
    Edges(EdgeIter<'g>),
    Single(Option<Element<'g>>),
}

impl<'g> Iterator for Cursor<'g> {
    type Item = GraphResult<Element<'g>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Cursor::Nodes(iter) => iter.next().map(|node| node.map(Element::Node)),
            Cursor::Edges(iter) => iter.next().map(|edge| edge.map(Element::Edge)),
            Cursor::Single(element) => element.take().map(Ok),
        }
    }
}

/// Pull-based sequence of statements over a graph
///
/// Yields `Err` only for graph failures; after one the iteration is closed.
pub struct StatementIteration<'g, G: PropertyGraph + ?Sized> {
    graph: &'g G,
    codec: &'g Codec,
    sources: VecDeque<Source<'g>>,
    current: Option<(Cursor<'g>, Generator)>,
    buffer: VecDeque<Statement>,
    closed: bool,
}

impl<'g, G: PropertyGraph + ?Sized> StatementIteration<'g, G> {
    pub fn new(graph: &'g G, codec: &'g Codec, sources: impl IntoIterator<Item = Source<'g>>) -> Self {
        Self {
            graph,
            codec,
            sources: sources.into_iter().collect(),
            current: None,
            buffer: VecDeque::new(),
            closed: false,
        }
    }

    /// An iteration with nothing in it
    pub fn empty(graph: &'g G, codec: &'g Codec) -> Self {
        Self::new(graph, codec, std::iter::empty())
    }

    /// Number of sources not yet opened
    pub fn pending_sources(&self) -> usize {
        self.sources.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release the current base and drop everything not yet produced
    pub fn close(&mut self) {
        if !self.closed {
            trace!("Closing statement iteration with {} pending sources", self.sources.len());
        }
        self.closed = true;
        self.current = None;
        self.sources.clear();
        self.buffer.clear();
    }

    fn open(&self, base: Base<'g>) -> GraphResult<Cursor<'g>> {
        let graph = self.graph;
        let cursor = match base {
            Base::Nodes => Cursor::Nodes(graph.nodes()?),
            Base::Edges => Cursor::Edges(graph.edges()?),
            Base::Single(element) => Cursor::Single(Some(element)),
            Base::OutEdges(id, label) => Cursor::Edges(graph.out_edges(id, label)?),
            Base::InEdges(id, label) => Cursor::Edges(graph.in_edges(id, label)?),
        };
        Ok(cursor)
    }
}

impl<'g, G: PropertyGraph + ?Sized> Iterator for StatementIteration<'g, G> {
    type Item = SailResult<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.closed {
                return None;
            }
            if let Some(statement) = self.buffer.pop_front() {
                return Some(Ok(statement));
            }

            if self.current.is_none() {
                let Some(source) = self.sources.pop_front() else {
                    self.closed = true;
                    return None;
                };
                trace!("Opening source {:?}", source.base);
                match self.open(source.base) {
                    Ok(cursor) => self.current = Some((cursor, source.generator)),
                    Err(e) => {
                        self.close();
                        return Some(Err(e.into()));
                    }
                }
            }

            let Some((cursor, generator)) = self.current.as_mut() else {
                continue;
            };
            match cursor.next() {
                Some(Ok(element)) => generator.generate(element, self.codec, &mut self.buffer),
                Some(Err(e)) => {
                    self.close();
                    return Some(Err(e.into()));
                }
                None => self.current = None,
            }
        }
    }
}
