//! Triple pattern dispatch
//!
//! Turns a pattern `(subject?, predicate?, object?)` into a
//! [`StatementIteration`]:
//!
//! - the predicate picks the generators and the facets they emit,
//! - the object prunes facets that cannot produce it and filters the rest,
//! - the subject picks the base: the resolved element itself when bound,
//!   a full scan when unbound, adjacency of the object vertex when that
//!   suffices.
//!
//! Predicates fall into these categories, checked in order:
//!
//! 1. `rdf:type`
//! 2. `pgm:id`
//! 3. `pgm:label`, `pgm:head`, `pgm:tail` (first-class edges only)
//! 4. a property predicate in the `prop/` namespace
//! 5. a relation predicate in the `relation/` namespace (simple edges only)
//!
//! Anything else matches nothing.

use super::codec::Codec;
use super::generator::{
    EdgeGenerator, Element, Generator, ObjectFilter, PropertySelection, RelationGenerator, VertexGenerator,
};
use super::iteration::{Base, Source, StatementIteration};
use super::literal::{from_literal, to_literal};
use super::SailResult;
use crate::graph::{Edge, EdgeType, GraphResult, Node, NodeId, PropertyGraph};
use oxrdf::{NamedNodeRef, SubjectRef, TermRef};
use tracing::debug;

/// What a subject URI refers to in the graph
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'g> {
    Vertex(&'g Node),
    Edge(&'g Edge),
    None,
}

/// Category of a predicate URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateKind {
    Type,
    Id,
    Label,
    Head,
    Tail,
    Property(String),
    Relation(EdgeType),
    Unknown,
}

impl PredicateKind {
    pub fn classify(predicate: NamedNodeRef<'_>, codec: &Codec) -> Self {
        let namespaces = codec.namespaces();
        if predicate == namespaces.rdf_type().as_ref() {
            PredicateKind::Type
        } else if predicate == namespaces.id().as_ref() {
            PredicateKind::Id
        } else if predicate == namespaces.label().as_ref() {
            PredicateKind::Label
        } else if predicate == namespaces.head().as_ref() {
            PredicateKind::Head
        } else if predicate == namespaces.tail().as_ref() {
            PredicateKind::Tail
        } else if let Some(key) = codec.property_key(predicate.as_str()) {
            PredicateKind::Property(key)
        } else if let Some(label) = codec.relation_label(predicate.as_str()) {
            PredicateKind::Relation(label)
        } else {
            PredicateKind::Unknown
        }
    }
}

/// Generators chosen for one pattern
#[derive(Debug, Default)]
struct Plan {
    vertex: Option<VertexGenerator>,
    edge: Option<EdgeGenerator>,
    relation: Option<RelationGenerator>,
}

impl Plan {
    fn for_predicate(predicate: Option<&PredicateKind>, first_class_edges: bool) -> Self {
        let edges = |generator: EdgeGenerator| first_class_edges.then_some(generator);

        match predicate {
            None => Plan {
                vertex: Some(VertexGenerator::all()),
                edge: edges(EdgeGenerator::all()),
                relation: (!first_class_edges).then(|| RelationGenerator::new(None)),
            },
            Some(PredicateKind::Type) => Plan {
                vertex: Some(VertexGenerator {
                    rdf_type: true,
                    ..VertexGenerator::none()
                }),
                edge: edges(EdgeGenerator {
                    rdf_type: true,
                    ..EdgeGenerator::none()
                }),
                relation: None,
            },
            Some(PredicateKind::Id) => Plan {
                vertex: Some(VertexGenerator {
                    id: true,
                    ..VertexGenerator::none()
                }),
                edge: edges(EdgeGenerator {
                    id: true,
                    ..EdgeGenerator::none()
                }),
                relation: None,
            },
            Some(PredicateKind::Label) => Plan {
                edge: edges(EdgeGenerator {
                    label: true,
                    ..EdgeGenerator::none()
                }),
                ..Plan::default()
            },
            Some(PredicateKind::Head) => Plan {
                edge: edges(EdgeGenerator {
                    head: true,
                    ..EdgeGenerator::none()
                }),
                ..Plan::default()
            },
            Some(PredicateKind::Tail) => Plan {
                edge: edges(EdgeGenerator {
                    tail: true,
                    ..EdgeGenerator::none()
                }),
                ..Plan::default()
            },
            Some(PredicateKind::Property(key)) => Plan {
                vertex: Some(VertexGenerator {
                    properties: PropertySelection::Only(key.clone()),
                    ..VertexGenerator::none()
                }),
                edge: edges(EdgeGenerator {
                    properties: PropertySelection::Only(key.clone()),
                    ..EdgeGenerator::none()
                }),
                relation: None,
            },
            Some(PredicateKind::Relation(label)) => Plan {
                relation: (!first_class_edges).then(|| RelationGenerator::new(Some(label.clone()))),
                ..Plan::default()
            },
            Some(PredicateKind::Unknown) => Plan::default(),
        }
    }

    fn restrict(self, object: &ObjectFilter, codec: &Codec) -> Self {
        Plan {
            vertex: self.vertex.and_then(|g| g.restrict(object, codec)),
            edge: self.edge.and_then(|g| g.restrict(object, codec)),
            relation: self.relation.and_then(|g| g.restrict(object, codec)),
        }
    }
}

/// Plans triple patterns against one graph
pub struct PatternDispatcher<'g, G: PropertyGraph + ?Sized> {
    graph: &'g G,
    codec: &'g Codec,
}

impl<'g, G: PropertyGraph + ?Sized> PatternDispatcher<'g, G> {
    pub fn new(graph: &'g G, codec: &'g Codec) -> Self {
        Self { graph, codec }
    }

    /// Resolve a subject to the element it names
    pub fn resolve(&self, subject: SubjectRef<'_>) -> GraphResult<Resolved<'g>> {
        let SubjectRef::NamedNode(node) = subject else {
            return Ok(Resolved::None);
        };
        if let Some(vertex) = self.codec.vertex_for_uri(self.graph, node.as_str())? {
            return Ok(Resolved::Vertex(vertex));
        }
        if let Some(edge) = self.codec.edge_for_uri(self.graph, node.as_str())? {
            return Ok(Resolved::Edge(edge));
        }
        Ok(Resolved::None)
    }

    /// Lazily enumerate every statement matching the pattern
    pub fn dispatch(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> SailResult<StatementIteration<'g, G>> {
        let predicate = predicate.map(|p| PredicateKind::classify(p, self.codec));
        let Some(object) = object_filter(object) else {
            debug!("Pattern object can never match");
            return Ok(self.empty());
        };

        let plan = Plan::for_predicate(predicate.as_ref(), self.codec.first_class_edges()).restrict(&object, self.codec);

        let sources = match subject {
            Some(subject) => {
                let resolved = self.resolve(subject)?;
                self.subject_sources(resolved, plan)
            }
            None => self.scan_sources(plan, &object)?,
        };

        debug!("Pattern predicate {:?} planned as {} sources", predicate, sources.len());
        Ok(StatementIteration::new(self.graph, self.codec, sources))
    }

    fn empty(&self) -> StatementIteration<'g, G> {
        StatementIteration::empty(self.graph, self.codec)
    }

    /// Sources for a bound subject
    fn subject_sources(&self, resolved: Resolved<'g>, plan: Plan) -> Vec<Source<'g>> {
        let mut sources = Vec::new();
        match resolved {
            Resolved::Vertex(node) => {
                if let Some(generator) = plan.vertex {
                    sources.push(Source::new(Base::Single(Element::Node(node)), Generator::Vertex(generator)));
                }
                if let Some(generator) = plan.relation {
                    let base = Base::OutEdges(node.id, generator.label.clone());
                    sources.push(Source::new(base, Generator::Relation(generator)));
                }
            }
            Resolved::Edge(edge) => {
                if let Some(generator) = plan.edge {
                    sources.push(Source::new(Base::Single(Element::Edge(edge)), Generator::Edge(generator)));
                }
            }
            Resolved::None => {}
        }
        sources
    }

    /// Sources for an unbound subject
    fn scan_sources(&self, plan: Plan, object: &ObjectFilter) -> GraphResult<Vec<Source<'g>>> {
        let mut sources = Vec::new();

        if let Some(generator) = plan.vertex {
            sources.push(Source::new(Base::Nodes, Generator::Vertex(generator)));
        }

        // A vertex object can only be reached through its adjacency
        let object_vertex = match vertex_object(object, self.codec) {
            Some(id) => Some(self.graph.node(id)?.map(|node| node.id)),
            None => None,
        };

        if let Some(generator) = plan.edge {
            match object_vertex {
                Some(Some(id)) if generator.endpoints_only() => {
                    if let Some(head) = generator.head_only() {
                        sources.push(Source::new(Base::InEdges(id, None), Generator::Edge(head)));
                    }
                    if let Some(tail) = generator.tail_only() {
                        sources.push(Source::new(Base::OutEdges(id, None), Generator::Edge(tail)));
                    }
                }
                Some(None) => {}
                _ => sources.push(Source::new(Base::Edges, Generator::Edge(generator))),
            }
        }

        if let Some(generator) = plan.relation {
            match object_vertex {
                Some(Some(id)) => {
                    let base = Base::InEdges(id, generator.label.clone());
                    sources.push(Source::new(base, Generator::Relation(generator)));
                }
                Some(None) => {}
                None => sources.push(Source::new(Base::Edges, Generator::Relation(generator))),
            }
        }

        Ok(sources)
    }
}

/// `None` when no generated statement can have this object
fn object_filter(object: Option<TermRef<'_>>) -> Option<ObjectFilter> {
    match object {
        None => Some(ObjectFilter::Any),
        Some(TermRef::NamedNode(node)) => Some(ObjectFilter::Resource(node.into_owned())),
        Some(TermRef::Literal(literal)) => {
            // Generated literals are always in canonical form
            let canonical = from_literal(literal).and_then(|value| to_literal(&value))?;
            (canonical.as_ref() == literal).then(|| ObjectFilter::Literal(literal.into_owned()))
        }
        // Blank nodes are never generated
        Some(_) => None,
    }
}

/// Vertex id named by an object URI, if any
fn vertex_object(object: &ObjectFilter, codec: &Codec) -> Option<NodeId> {
    match object {
        ObjectFilter::Resource(resource) => codec.vertex_id(resource.as_str()),
        _ => None,
    }
}
