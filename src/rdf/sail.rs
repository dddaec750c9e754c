//! Read-only Sail over a property graph
//!
//! [`PropertyGraphSail`] owns the graph handle and the immutable
//! configuration; [`SailConnection`] is the query surface. Only the default
//! graph exists: patterns restricted to any named graph match nothing.

use super::codec::Codec;
use super::config::SailConfig;
use super::dispatch::PatternDispatcher;
use super::iteration::StatementIteration;
use super::namespace::{Namespace, Namespaces};
use super::{SailError, SailResult};
use crate::graph::PropertyGraph;
use oxrdf::{GraphNameRef, NamedNode, NamedNodeRef, SubjectRef, TermRef};
use tracing::{debug, info};

/// RDF view of a property graph
pub struct PropertyGraphSail<G: PropertyGraph> {
    graph: G,
    config: SailConfig,
    codec: Codec,
}

impl<G: PropertyGraph> PropertyGraphSail<G> {
    /// Wrap `graph`; fails if the configured base IRI is not a valid IRI
    pub fn new(graph: G, config: SailConfig) -> SailResult<Self> {
        let namespaces =
            Namespaces::new(&config.base_iri).map_err(|e| SailError::InvalidBaseIri(e.to_string()))?;
        let codec = Codec::new(namespaces, config.first_class_edges);
        info!(
            "Property graph sail ready at {} ({} edges)",
            config.base_iri,
            if config.first_class_edges { "first-class" } else { "simple" }
        );
        Ok(Self { graph, config, codec })
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn config(&self) -> &SailConfig {
        &self.config
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn namespaces(&self) -> &Namespaces {
        self.codec.namespaces()
    }

    pub fn connection(&self) -> SailConnection<'_, G> {
        SailConnection { sail: self, open: true }
    }
}

/// Query surface of a [`PropertyGraphSail`]
pub struct SailConnection<'s, G: PropertyGraph> {
    sail: &'s PropertyGraphSail<G>,
    open: bool,
}

impl<'s, G: PropertyGraph> SailConnection<'s, G> {
    fn ensure_open(&self) -> SailResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(SailError::ConnectionClosed)
        }
    }

    /// Statements matching the pattern, produced lazily
    ///
    /// `contexts` empty means the default graph; naming any other graph gives
    /// an empty result.
    pub fn get_statements(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        contexts: &[GraphNameRef<'_>],
    ) -> SailResult<StatementIteration<'s, G>> {
        self.ensure_open()?;
        let sail = self.sail;
        if !default_graph_only(contexts) {
            debug!("Named graph requested, no statements");
            return Ok(StatementIteration::empty(&sail.graph, &sail.codec));
        }
        PatternDispatcher::new(&sail.graph, &sail.codec).dispatch(subject, predicate, object)
    }

    /// Number of statements in the default graph
    ///
    /// Counted from element and property counts, so properties without a
    /// literal form are included.
    pub fn size(&self, contexts: &[GraphNameRef<'_>]) -> SailResult<usize> {
        self.ensure_open()?;
        if !default_graph_only(contexts) {
            return Ok(0);
        }

        let graph = &self.sail.graph;
        let mut size = 0;
        for node in graph.nodes()? {
            size += 2 + node?.property_count();
        }
        let first_class = self.sail.config.first_class_edges;
        for edge in graph.edges()? {
            let edge = edge?;
            size += if first_class { 5 + edge.property_count() } else { 1 };
        }
        Ok(size)
    }

    /// The fixed prefix table
    pub fn namespaces(&self) -> SailResult<Vec<Namespace>> {
        self.ensure_open()?;
        Ok(self.sail.namespaces().prefixes())
    }

    /// Namespace IRI bound to `prefix`
    pub fn namespace(&self, prefix: &str) -> SailResult<Option<&'s str>> {
        self.ensure_open()?;
        Ok(self.sail.namespaces().get_iri(prefix).ok())
    }

    /// Named graphs; there are none
    pub fn context_ids(&self) -> SailResult<Vec<NamedNode>> {
        self.ensure_open()?;
        Ok(Vec::new())
    }

    pub fn is_writable(&self) -> bool {
        false
    }

    /// Accepted and ignored
    pub fn add_statement(
        &mut self,
        subject: SubjectRef<'_>,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
        _contexts: &[GraphNameRef<'_>],
    ) -> SailResult<()> {
        self.ensure_open()?;
        debug!("Ignoring add of {} {} {} on read-only sail", subject, predicate, object);
        Ok(())
    }

    /// Accepted and ignored
    pub fn remove_statements(
        &mut self,
        _subject: Option<SubjectRef<'_>>,
        _predicate: Option<NamedNodeRef<'_>>,
        _object: Option<TermRef<'_>>,
        _contexts: &[GraphNameRef<'_>],
    ) -> SailResult<()> {
        self.ensure_open()?;
        debug!("Ignoring remove on read-only sail");
        Ok(())
    }

    /// Accepted and ignored
    pub fn clear(&mut self, _contexts: &[GraphNameRef<'_>]) -> SailResult<()> {
        self.ensure_open()?;
        debug!("Ignoring clear on read-only sail");
        Ok(())
    }

    pub fn begin(&mut self) -> SailResult<()> {
        self.ensure_open()?;
        debug!("Ignoring begin on read-only sail");
        Ok(())
    }

    pub fn commit(&mut self) -> SailResult<()> {
        self.ensure_open()?;
        debug!("Ignoring commit on read-only sail");
        Ok(())
    }

    pub fn rollback(&mut self) -> SailResult<()> {
        self.ensure_open()?;
        debug!("Ignoring rollback on read-only sail");
        Ok(())
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

fn default_graph_only(contexts: &[GraphNameRef<'_>]) -> bool {
    contexts.iter().all(|context| context.is_default_graph())
}
