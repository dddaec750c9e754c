//! Namespaces and ontology resources of the property graph model
//!
//! Every URI the RDF view produces lives under one base IRI:
//!
//! | prefix   | namespace                 | holds                       |
//! |----------|---------------------------|-----------------------------|
//! | `pgm`    | `<base>ontology#`         | `id`, `label`, `head`, ...  |
//! | `vertex` | `<base>vertex/`           | one URI per vertex id       |
//! | `edge`   | `<base>edge/`             | one URI per edge id         |
//! | `prop`   | `<base>prop/`             | one predicate per key       |
//! |          | `<base>relation/`         | one predicate per label     |
//!
//! The namespaces are pairwise disjoint, so a URI belongs to at most one of
//! them. A [`Namespaces`] value is built once from the configuration and
//! shared read-only by every connection.

use indexmap::IndexMap;
use oxrdf::vocab::rdf;
use oxrdf::NamedNode;
use thiserror::Error;

/// Base IRI of the property graph model vocabulary
pub const DEFAULT_BASE_IRI: &str = "http://tinkerpop.com/pgm/";

/// RDF syntax namespace
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Prefix errors
#[derive(Error, Debug, PartialEq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Immutable namespace table and ontology resources
#[derive(Debug, Clone)]
pub struct Namespaces {
    ontology: String,
    vertex: String,
    edge: String,
    property: String,
    relation: String,

    rdf_type: NamedNode,
    id: NamedNode,
    label: NamedNode,
    head: NamedNode,
    tail: NamedNode,
    vertex_class: NamedNode,
    edge_class: NamedNode,

    /// Prefix → IRI mappings, in declaration order
    prefixes: IndexMap<String, String>,
}

impl Namespaces {
    /// Build the namespace table under `base_iri`
    pub fn new(base_iri: &str) -> PrefixResult<Self> {
        NamedNode::new(base_iri).map_err(|e| PrefixError::InvalidIri(format!("{}: {}", base_iri, e)))?;
        Ok(Self::build(base_iri))
    }

    /// `base_iri` must already be a valid IRI
    fn build(base_iri: &str) -> Self {
        let ontology = format!("{}ontology#", base_iri);
        let vertex = format!("{}vertex/", base_iri);
        let edge = format!("{}edge/", base_iri);
        let property = format!("{}prop/", base_iri);
        let relation = format!("{}relation/", base_iri);

        // The base IRI is valid and every suffix is plain ASCII
        let term = |local: &str| NamedNode::new_unchecked(format!("{}{}", ontology, local));

        let mut prefixes = IndexMap::new();
        prefixes.insert("prop".to_string(), property.clone());
        prefixes.insert("pgm".to_string(), ontology.clone());
        prefixes.insert("vertex".to_string(), vertex.clone());
        prefixes.insert("edge".to_string(), edge.clone());
        prefixes.insert("rdf".to_string(), RDF_NS.to_string());

        Self {
            id: term("id"),
            label: term("label"),
            head: term("head"),
            tail: term("tail"),
            vertex_class: term("Vertex"),
            edge_class: term("Edge"),
            rdf_type: rdf::TYPE.into_owned(),
            ontology,
            vertex,
            edge,
            property,
            relation,
            prefixes,
        }
    }

    pub fn ontology_ns(&self) -> &str {
        &self.ontology
    }

    pub fn vertex_ns(&self) -> &str {
        &self.vertex
    }

    pub fn edge_ns(&self) -> &str {
        &self.edge
    }

    pub fn property_ns(&self) -> &str {
        &self.property
    }

    pub fn relation_ns(&self) -> &str {
        &self.relation
    }

    /// `rdf:type`
    pub fn rdf_type(&self) -> &NamedNode {
        &self.rdf_type
    }

    /// `pgm:id`
    pub fn id(&self) -> &NamedNode {
        &self.id
    }

    /// `pgm:label`
    pub fn label(&self) -> &NamedNode {
        &self.label
    }

    /// `pgm:head`
    pub fn head(&self) -> &NamedNode {
        &self.head
    }

    /// `pgm:tail`
    pub fn tail(&self) -> &NamedNode {
        &self.tail
    }

    /// `pgm:Vertex`
    pub fn vertex_class(&self) -> &NamedNode {
        &self.vertex_class
    }

    /// `pgm:Edge`
    pub fn edge_class(&self) -> &NamedNode {
        &self.edge_class
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        let (prefix, local) = compact_iri
            .split_once(':')
            .ok_or_else(|| PrefixError::InvalidIri(compact_iri.to_string()))?;
        let iri = self.get_iri(prefix)?;
        Ok(format!("{}{}", iri, local))
    }

    /// Compact an IRI using known prefixes
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes.iter().find_map(|(prefix, namespace_iri)| {
            iri.strip_prefix(namespace_iri.as_str())
                .map(|local| format!("{}:{}", prefix, local))
        })
    }

    /// Iterate over (prefix, IRI) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.prefixes.iter().map(|(p, i)| (p.as_str(), i.as_str()))
    }

    /// Get all registered prefixes
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.iter().map(|(prefix, iri)| Namespace::new(prefix, iri)).collect()
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::build(DEFAULT_BASE_IRI)
    }
}
