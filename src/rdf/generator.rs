//! Statement generators
//!
//! A generator turns one graph element into the statements describing it.
//! Which statements come out is controlled by facet switches (id, type,
//! properties, label, head, tail) and by an [`ObjectFilter`] that keeps only
//! statements whose object matches a bound pattern object.
//!
//! Vertex `v` with `name = "marko"`:
//!
//! ```text
//! <vertex/v> pgm:id     "v"^^xsd:long
//! <vertex/v> rdf:type   pgm:Vertex
//! <vertex/v> prop:name  "marko"
//! ```
//!
//! First-class edge `e` (`a -[knows]-> b`) adds `pgm:label "knows"`,
//! `pgm:head <vertex/b>` and `pgm:tail <vertex/a>`; the simple encoding of
//! the same edge is the single statement `<vertex/a> relation:knows <vertex/b>`.

use super::codec::Codec;
use super::literal::to_literal;
use crate::graph::{Edge, EdgeType, Node, PropertyMap, PropertyValue};
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode, NamedNodeRef, Triple};
use std::collections::VecDeque;

/// A graph element a generator can describe
#[derive(Debug, Clone, Copy)]
pub enum Element<'g> {
    Node(&'g Node),
    Edge(&'g Edge),
}

/// Which properties to emit
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySelection {
    None,
    All,
    /// A single key, as named by a property predicate
    Only(String),
}

impl PropertySelection {
    fn is_none(&self) -> bool {
        matches!(self, PropertySelection::None)
    }
}

/// Constraint on statement objects
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectFilter {
    Any,
    /// Object must be this resource
    Resource(NamedNode),
    /// Object must be this literal, term for term
    Literal(Literal),
}

impl ObjectFilter {
    pub fn matches_resource(&self, resource: &NamedNode) -> bool {
        match self {
            ObjectFilter::Any => true,
            ObjectFilter::Resource(expected) => expected == resource,
            ObjectFilter::Literal(_) => false,
        }
    }

    pub fn matches_literal(&self, literal: &Literal) -> bool {
        match self {
            ObjectFilter::Any => true,
            ObjectFilter::Resource(_) => false,
            ObjectFilter::Literal(expected) => expected == literal,
        }
    }

    /// Whether a literal of this datatype could pass
    fn admits_datatype(&self, datatype: NamedNodeRef<'_>) -> bool {
        match self {
            ObjectFilter::Literal(expected) => expected.language().is_none() && expected.datatype() == datatype,
            _ => true,
        }
    }
}

/// Statements about vertices
#[derive(Debug, Clone, PartialEq)]
pub struct VertexGenerator {
    pub id: bool,
    pub rdf_type: bool,
    pub properties: PropertySelection,
    pub object: ObjectFilter,
}

impl VertexGenerator {
    /// Every vertex statement
    pub fn all() -> Self {
        Self {
            id: true,
            rdf_type: true,
            properties: PropertySelection::All,
            object: ObjectFilter::Any,
        }
    }

    /// No facet enabled; switch on what is needed
    pub fn none() -> Self {
        Self {
            id: false,
            rdf_type: false,
            properties: PropertySelection::None,
            object: ObjectFilter::Any,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.id && !self.rdf_type && self.properties.is_none()
    }

    /// Keep only the facets that can produce `object`; `None` if none can
    pub fn restrict(mut self, object: &ObjectFilter, codec: &Codec) -> Option<Self> {
        match object {
            ObjectFilter::Any => {}
            ObjectFilter::Resource(resource) => {
                self.id = false;
                self.properties = PropertySelection::None;
                self.rdf_type &= resource == codec.namespaces().vertex_class();
            }
            ObjectFilter::Literal(_) => {
                self.rdf_type = false;
                self.id &= object.admits_datatype(xsd::LONG);
            }
        }
        self.object = object.clone();
        (!self.is_empty()).then_some(self)
    }

    pub fn generate(&self, node: &Node, codec: &Codec, buf: &mut VecDeque<Triple>) {
        let namespaces = codec.namespaces();
        let subject = codec.vertex_uri(node.id);

        if self.id {
            push_id(&subject, node.id.as_u64(), &self.object, codec, buf);
        }
        if self.rdf_type && self.object.matches_resource(namespaces.vertex_class()) {
            buf.push_back(Triple::new(
                subject.clone(),
                namespaces.rdf_type().clone(),
                namespaces.vertex_class().clone(),
            ));
        }
        push_properties(&subject, &node.properties, &self.properties, &self.object, codec, buf);
    }
}

/// Statements about edges as resources
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeGenerator {
    pub id: bool,
    pub rdf_type: bool,
    pub label: bool,
    pub head: bool,
    pub tail: bool,
    pub properties: PropertySelection,
    pub object: ObjectFilter,
}

impl EdgeGenerator {
    pub fn all() -> Self {
        Self {
            id: true,
            rdf_type: true,
            label: true,
            head: true,
            tail: true,
            properties: PropertySelection::All,
            object: ObjectFilter::Any,
        }
    }

    pub fn none() -> Self {
        Self {
            id: false,
            rdf_type: false,
            label: false,
            head: false,
            tail: false,
            properties: PropertySelection::None,
            object: ObjectFilter::Any,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.id && !self.rdf_type && !self.label && !self.head && !self.tail && self.properties.is_none()
    }

    /// True when only `pgm:head`/`pgm:tail` statements can come out
    pub fn endpoints_only(&self) -> bool {
        !self.id && !self.rdf_type && !self.label && self.properties.is_none()
    }

    pub fn restrict(mut self, object: &ObjectFilter, codec: &Codec) -> Option<Self> {
        match object {
            ObjectFilter::Any => {}
            ObjectFilter::Resource(resource) => {
                self.id = false;
                self.label = false;
                self.properties = PropertySelection::None;
                self.rdf_type &= resource == codec.namespaces().edge_class();
                let is_vertex = codec.vertex_id(resource.as_str()).is_some();
                self.head &= is_vertex;
                self.tail &= is_vertex;
            }
            ObjectFilter::Literal(_) => {
                self.rdf_type = false;
                self.head = false;
                self.tail = false;
                self.id &= object.admits_datatype(xsd::LONG);
                self.label &= object.admits_datatype(xsd::STRING);
            }
        }
        self.object = object.clone();
        (!self.is_empty()).then_some(self)
    }

    /// Same generator reduced to its `pgm:head` facet
    pub fn head_only(&self) -> Option<Self> {
        self.head.then(|| Self {
            head: true,
            object: self.object.clone(),
            ..Self::none()
        })
    }

    /// Same generator reduced to its `pgm:tail` facet
    pub fn tail_only(&self) -> Option<Self> {
        self.tail.then(|| Self {
            tail: true,
            object: self.object.clone(),
            ..Self::none()
        })
    }

    pub fn generate(&self, edge: &Edge, codec: &Codec, buf: &mut VecDeque<Triple>) {
        let namespaces = codec.namespaces();
        let subject = codec.edge_uri(edge.id);

        if self.id {
            push_id(&subject, edge.id.as_u64(), &self.object, codec, buf);
        }
        if self.rdf_type && self.object.matches_resource(namespaces.edge_class()) {
            buf.push_back(Triple::new(
                subject.clone(),
                namespaces.rdf_type().clone(),
                namespaces.edge_class().clone(),
            ));
        }
        if self.label {
            let label = Literal::new_simple_literal(edge.label().as_str());
            if self.object.matches_literal(&label) {
                buf.push_back(Triple::new(subject.clone(), namespaces.label().clone(), label));
            }
        }
        if self.head {
            let head = codec.vertex_uri(edge.head());
            if self.object.matches_resource(&head) {
                buf.push_back(Triple::new(subject.clone(), namespaces.head().clone(), head));
            }
        }
        if self.tail {
            let tail = codec.vertex_uri(edge.tail());
            if self.object.matches_resource(&tail) {
                buf.push_back(Triple::new(subject.clone(), namespaces.tail().clone(), tail));
            }
        }
        push_properties(&subject, &edge.properties, &self.properties, &self.object, codec, buf);
    }
}

/// `tail relation:label head` statements
#[derive(Debug, Clone, PartialEq)]
pub struct RelationGenerator {
    /// Required edge label, any label when `None`
    pub label: Option<EdgeType>,
    pub object: ObjectFilter,
}

impl RelationGenerator {
    pub fn new(label: Option<EdgeType>) -> Self {
        Self {
            label,
            object: ObjectFilter::Any,
        }
    }

    /// Relation objects are always vertices
    pub fn restrict(mut self, object: &ObjectFilter, codec: &Codec) -> Option<Self> {
        let possible = match object {
            ObjectFilter::Any => true,
            ObjectFilter::Resource(resource) => codec.vertex_id(resource.as_str()).is_some(),
            ObjectFilter::Literal(_) => false,
        };
        self.object = object.clone();
        possible.then_some(self)
    }

    pub fn generate(&self, edge: &Edge, codec: &Codec, buf: &mut VecDeque<Triple>) {
        if self.label.as_ref().is_some_and(|label| label != edge.label()) {
            return;
        }
        let head = codec.vertex_uri(edge.head());
        if !self.object.matches_resource(&head) {
            return;
        }
        buf.push_back(Triple::new(
            codec.vertex_uri(edge.tail()),
            codec.relation_uri(edge.label()),
            head,
        ));
    }
}

/// Any of the three generators
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    Vertex(VertexGenerator),
    Edge(EdgeGenerator),
    Relation(RelationGenerator),
}

impl Generator {
    /// Append the statements for `element`; elements of the wrong kind give none
    pub fn generate(&self, element: Element<'_>, codec: &Codec, buf: &mut VecDeque<Triple>) {
        match (self, element) {
            (Generator::Vertex(generator), Element::Node(node)) => generator.generate(node, codec, buf),
            (Generator::Edge(generator), Element::Edge(edge)) => generator.generate(edge, codec, buf),
            (Generator::Relation(generator), Element::Edge(edge)) => generator.generate(edge, codec, buf),
            _ => {}
        }
    }
}

fn push_id(subject: &NamedNode, id: u64, object: &ObjectFilter, codec: &Codec, buf: &mut VecDeque<Triple>) {
    let Some(literal) = codec.id_literal(id) else {
        return;
    };
    if object.matches_literal(&literal) {
        buf.push_back(Triple::new(subject.clone(), codec.namespaces().id().clone(), literal));
    }
}

fn push_properties(
    subject: &NamedNode,
    properties: &PropertyMap,
    selection: &PropertySelection,
    object: &ObjectFilter,
    codec: &Codec,
    buf: &mut VecDeque<Triple>,
) {
    let mut push = |key: &str, value: &PropertyValue| {
        // Unsupported kinds have no literal and are left out
        let Some(literal) = to_literal(value) else {
            return;
        };
        if object.matches_literal(&literal) {
            buf.push_back(Triple::new(subject.clone(), codec.property_uri(key), literal));
        }
    };

    match selection {
        PropertySelection::None => {}
        PropertySelection::All => {
            for (key, value) in properties {
                push(key.as_str(), value);
            }
        }
        PropertySelection::Only(key) => {
            if let Some(value) = properties.get(key) {
                push(key.as_str(), value);
            }
        }
    }
}
