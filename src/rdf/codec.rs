//! Identifier codec
//!
//! Maps native graph identifiers to URIs and back:
//!
//! - vertex `7`            ↔ `<base>vertex/7`
//! - edge `7`              ↔ `<base>edge/7` (first-class edges only)
//! - property key `name`   ↔ `<base>prop/name`
//! - edge label `knows`    ↔ `<base>relation/knows`
//!
//! Keys and labels are percent-encoded so that any string yields a valid IRI.
//! Decoding is the exact inverse of encoding; a URI outside the namespace, a
//! non-canonical id, or an id naming no element is simply "no match".

use super::namespace::Namespaces;
use crate::graph::{Edge, EdgeId, EdgeType, GraphResult, Node, NodeId, PropertyGraph};
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;
use tracing::warn;

/// Everything but RFC 3986 unreserved characters
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Bidirectional id ↔ URI mapping for one sail
#[derive(Debug, Clone)]
pub struct Codec {
    namespaces: Namespaces,
    first_class_edges: bool,
}

impl Codec {
    pub fn new(namespaces: Namespaces, first_class_edges: bool) -> Self {
        Self {
            namespaces,
            first_class_edges,
        }
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    pub fn first_class_edges(&self) -> bool {
        self.first_class_edges
    }

    pub fn vertex_uri(&self, id: NodeId) -> NamedNode {
        // Namespaces are built from a validated base IRI
        NamedNode::new_unchecked(format!("{}{}", self.namespaces.vertex_ns(), id.as_u64()))
    }

    pub fn edge_uri(&self, id: EdgeId) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}", self.namespaces.edge_ns(), id.as_u64()))
    }

    pub fn property_uri(&self, key: &str) -> NamedNode {
        NamedNode::new_unchecked(format!(
            "{}{}",
            self.namespaces.property_ns(),
            utf8_percent_encode(key, SEGMENT)
        ))
    }

    pub fn relation_uri(&self, label: &EdgeType) -> NamedNode {
        NamedNode::new_unchecked(format!(
            "{}{}",
            self.namespaces.relation_ns(),
            utf8_percent_encode(label.as_str(), SEGMENT)
        ))
    }

    /// Decode a vertex URI to its id
    pub fn vertex_id(&self, iri: &str) -> Option<NodeId> {
        decode_id(iri, self.namespaces.vertex_ns()).map(NodeId::new)
    }

    /// Decode an edge URI to its id; never matches with simple edges
    pub fn edge_id(&self, iri: &str) -> Option<EdgeId> {
        if !self.first_class_edges {
            return None;
        }
        decode_id(iri, self.namespaces.edge_ns()).map(EdgeId::new)
    }

    /// Decode a property predicate to its key
    pub fn property_key(&self, iri: &str) -> Option<String> {
        decode_segment(iri, self.namespaces.property_ns()).map(Cow::into_owned)
    }

    /// Decode a relation predicate to its edge label
    pub fn relation_label(&self, iri: &str) -> Option<EdgeType> {
        decode_segment(iri, self.namespaces.relation_ns()).map(|label| EdgeType::new(label.into_owned()))
    }

    /// Resolve a vertex URI against the graph
    pub fn vertex_for_uri<'g, G: PropertyGraph + ?Sized>(
        &self,
        graph: &'g G,
        iri: &str,
    ) -> GraphResult<Option<&'g Node>> {
        match self.vertex_id(iri) {
            Some(id) => graph.node(id),
            None => Ok(None),
        }
    }

    /// Resolve an edge URI against the graph
    pub fn edge_for_uri<'g, G: PropertyGraph + ?Sized>(
        &self,
        graph: &'g G,
        iri: &str,
    ) -> GraphResult<Option<&'g Edge>> {
        match self.edge_id(iri) {
            Some(id) => graph.edge(id),
            None => Ok(None),
        }
    }

    /// Element id as an `xsd:long` literal
    ///
    /// Ids above `i64::MAX` have no `xsd:long` form and get no id statement.
    pub fn id_literal(&self, id: u64) -> Option<Literal> {
        match i64::try_from(id) {
            Ok(id) => Some(Literal::new_typed_literal(id.to_string(), xsd::LONG)),
            Err(_) => {
                warn!("Element id {} does not fit xsd:long, id statement skipped", id);
                None
            }
        }
    }
}

fn decode_id(iri: &str, namespace: &str) -> Option<u64> {
    let suffix = iri.strip_prefix(namespace)?;
    let id: u64 = suffix.parse().ok()?;
    // Reject "+7", "07" and friends so one id has exactly one URI
    (id.to_string() == suffix).then_some(id)
}

fn decode_segment<'a>(iri: &'a str, namespace: &str) -> Option<Cow<'a, str>> {
    let suffix = iri.strip_prefix(namespace)?;
    let decoded = percent_decode_str(suffix).decode_utf8().ok()?;
    // Only accept what property_uri/relation_uri would have produced
    (utf8_percent_encode(&decoded, SEGMENT).to_string() == suffix).then_some(decoded)
}
