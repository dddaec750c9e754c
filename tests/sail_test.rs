/// End-to-end tests of the RDF view through the public connection API.
///
/// Most tests use the two-vertex graph
///   (1 {name: "marko"}) -[7:knows]-> (2 {name: "vadas"})
/// in both edge modes.
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode, Subject, Term, TermRef, Triple};
use samyama_sail::graph::{Edge, EdgeId, EdgeType, GraphStore, Node, NodeId, PropertyValue};
use samyama_sail::rdf::from_literal;
use samyama_sail::{PropertyGraph, PropertyGraphSail, SailConfig, SailConnection, SailError, Statement};
use std::collections::{HashMap, HashSet};
use std::io::Write;

fn scenario_graph() -> GraphStore {
    let mut graph = GraphStore::new();

    let mut marko = Node::new(NodeId::new(1));
    marko.set_property("name", "marko");
    graph.insert_node(marko).unwrap();

    let mut vadas = Node::new(NodeId::new(2));
    vadas.set_property("name", "vadas");
    graph.insert_node(vadas).unwrap();

    graph
        .insert_edge(Edge::new(EdgeId::new(7), NodeId::new(1), NodeId::new(2), "knows"))
        .unwrap();
    graph
}

fn query<G: PropertyGraph>(
    conn: &SailConnection<'_, G>,
    subject: Option<&NamedNode>,
    predicate: Option<&NamedNode>,
    object: Option<TermRef<'_>>,
) -> Vec<Statement> {
    conn.get_statements(subject.map(|s| s.as_ref().into()), predicate.map(|p| p.as_ref()), object, &[])
        .unwrap()
        .collect::<Result<Vec<_>, SailError>>()
        .unwrap()
}

fn as_set(statements: Vec<Statement>) -> HashSet<Statement> {
    statements.into_iter().collect()
}

#[test]
fn test_scenario() {
    let graph = scenario_graph();
    let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let conn = sail.connection();
    let codec = sail.codec();
    let ns = sail.namespaces();

    let v1 = codec.vertex_uri(NodeId::new(1));
    let v2 = codec.vertex_uri(NodeId::new(2));
    let e7 = codec.edge_uri(EdgeId::new(7));
    let name = codec.property_uri("name");

    let statements = query(&conn, Some(&v1), Some(&name), None);
    assert_eq!(
        statements,
        vec![Triple::new(v1.clone(), name, Literal::new_simple_literal("marko"))]
    );

    let statements = query(&conn, Some(&e7), Some(ns.head()), None);
    assert_eq!(statements, vec![Triple::new(e7, ns.head().clone(), v2.clone())]);

    let statements = query(&conn, None, Some(ns.rdf_type()), Some(ns.vertex_class().as_ref().into()));
    assert_eq!(statements.len(), 2);
    let subjects: HashSet<Subject> = statements.into_iter().map(|s| s.subject).collect();
    assert_eq!(subjects, HashSet::from([Subject::from(v1), Subject::from(v2)]));
}

#[test]
fn test_round_trip() {
    let mut graph = GraphStore::new();
    let values = [
        ("s", PropertyValue::String("text with spaces".to_string())),
        ("b", PropertyValue::Boolean(true)),
        ("i8", PropertyValue::Byte(-3)),
        ("i16", PropertyValue::Short(1200)),
        ("i32", PropertyValue::Int(-70_000)),
        ("i64", PropertyValue::Long(9_000_000_000)),
        ("f32", PropertyValue::Float(1.25)),
        ("f64", PropertyValue::Double(-0.1)),
        ("odd key/#?", PropertyValue::Int(1)),
    ];
    let id = graph.create_node_with_properties(values.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect());

    let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let conn = sail.connection();
    let subject = sail.codec().vertex_uri(id);

    for (key, value) in values {
        let predicate = sail.codec().property_uri(key);
        let statements = query(&conn, Some(&subject), Some(&predicate), None);
        assert_eq!(statements.len(), 1, "key {}", key);

        let Term::Literal(literal) = &statements[0].object else {
            panic!("expected a literal for {}", key);
        };
        assert_eq!(from_literal(literal.as_ref()), Some(value), "key {}", key);
    }
}

#[test]
fn test_totality_matches_size() {
    let mut graph = scenario_graph();
    let extra = graph.create_node();
    graph.set_node_property(extra, "age", 32i32).unwrap();
    let e = graph.create_edge(extra, NodeId::new(1), "knows").unwrap();
    graph.set_edge_property(e, "weight", 0.4f32).unwrap();
    graph.create_edge(NodeId::new(2), NodeId::new(2), "likes").unwrap();

    for config in [SailConfig::default(), SailConfig::simple()] {
        let first_class = config.first_class_edges;
        let sail = PropertyGraphSail::new(&graph, config).unwrap();
        let conn = sail.connection();
        let all = query(&conn, None, None, None);
        assert_eq!(all.len(), conn.size(&[]).unwrap(), "first_class_edges = {}", first_class);
        // no duplicates either
        assert_eq!(as_set(all.clone()).len(), all.len());
    }
}

#[test]
fn test_mode_sensitivity() {
    let mut graph = GraphStore::new();
    let tail = graph.create_node();
    let head = graph.create_node();
    let mut props = HashMap::new();
    props.insert("since".to_string(), PropertyValue::Int(2009));
    props.insert("weight".to_string(), PropertyValue::Double(0.5));
    graph.create_edge_with_properties(tail, head, "knows", props).unwrap();

    // each bare vertex contributes id and type
    let vertex_statements = 2 * 2;

    let first_class = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let all = query(&first_class.connection(), None, None, None);
    assert_eq!(all.len() - vertex_statements, 7);

    let simple = PropertyGraphSail::new(&graph, SailConfig::simple()).unwrap();
    let all = query(&simple.connection(), None, None, None);
    assert_eq!(all.len() - vertex_statements, 1);

    let codec = simple.codec();
    let relation = codec.relation_uri(&EdgeType::new("knows"));
    let statements = query(&simple.connection(), None, Some(&relation), None);
    assert_eq!(
        statements,
        vec![Triple::new(codec.vertex_uri(tail), relation, codec.vertex_uri(head))]
    );
}

#[test]
fn test_symmetry() {
    let graph = scenario_graph();

    for config in [SailConfig::default(), SailConfig::simple()] {
        let sail = PropertyGraphSail::new(&graph, config).unwrap();
        let conn = sail.connection();
        let codec = sail.codec();
        let ns = sail.namespaces();

        let subjects = [
            codec.vertex_uri(NodeId::new(1)),
            codec.vertex_uri(NodeId::new(2)),
            codec.edge_uri(EdgeId::new(7)),
        ];
        let predicates = [
            ns.rdf_type().clone(),
            ns.id().clone(),
            ns.label().clone(),
            ns.head().clone(),
            ns.tail().clone(),
            codec.property_uri("name"),
            codec.property_uri("missing"),
            codec.relation_uri(&EdgeType::new("knows")),
            codec.relation_uri(&EdgeType::new("created")),
        ];

        for subject in &subjects {
            let everything = query(&conn, Some(subject), None, None);
            for predicate in &predicates {
                let direct = as_set(query(&conn, Some(subject), Some(predicate), None));
                let filtered: HashSet<Statement> = everything
                    .iter()
                    .filter(|s| &s.predicate == predicate)
                    .cloned()
                    .collect();
                assert_eq!(direct, filtered, "{} {}", subject, predicate);
            }
        }
    }
}

#[test]
fn test_bound_object_is_returned_verbatim() {
    let mut graph = scenario_graph();
    graph.set_node_property(NodeId::new(1), "age", 29i32).unwrap();
    graph.set_node_property(NodeId::new(2), "ratio", f64::NAN).unwrap();
    let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let conn = sail.connection();

    // every statement for a bound object carries that exact term
    let everything = query(&conn, None, None, None);
    for statement in &everything {
        let matched = query(&conn, None, None, Some(statement.object.as_ref()));
        assert!(matched.contains(statement), "{}", statement);
        assert!(matched.iter().all(|s| s.object == statement.object), "{}", statement);
    }

    let tagged = Literal::new_language_tagged_literal("marko", "de").unwrap();
    assert!(query(&conn, None, None, Some(tagged.as_ref().into())).is_empty());

    let padded = Literal::new_typed_literal("029", xsd::INT);
    assert!(query(&conn, None, None, Some(padded.as_ref().into())).is_empty());
    let plain = Literal::new_typed_literal("29", xsd::INT);
    assert_eq!(query(&conn, None, None, Some(plain.as_ref().into())).len(), 1);

    let nan = Literal::new_typed_literal("NaN", xsd::DOUBLE);
    let statements = query(&conn, None, None, Some(nan.as_ref().into()));
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].object, Term::from(nan));
}

#[test]
fn test_idempotence() {
    let graph = scenario_graph();
    let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let conn = sail.connection();
    let name = sail.codec().property_uri("name");

    assert_eq!(query(&conn, None, None, None), query(&conn, None, None, None));
    assert_eq!(query(&conn, None, Some(&name), None), query(&conn, None, Some(&name), None));
}

#[test]
fn test_unsupported_literal_absent() {
    let mut graph = scenario_graph();
    let mut tags = HashMap::new();
    tags.insert("a".to_string(), PropertyValue::Int(1));
    graph.set_node_property(NodeId::new(1), "tags", PropertyValue::Map(tags)).unwrap();
    graph.set_node_property(NodeId::new(1), "born", PropertyValue::DateTime(0)).unwrap();

    let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let conn = sail.connection();
    let codec = sail.codec();
    let v1 = codec.vertex_uri(NodeId::new(1));

    let tags = codec.property_uri("tags");
    assert!(query(&conn, Some(&v1), Some(&tags), None).is_empty());
    assert!(query(&conn, None, Some(&tags), None).is_empty());

    let about_marko = query(&conn, Some(&v1), None, None);
    assert_eq!(about_marko.len(), 3);
    assert!(about_marko.iter().all(|s| s.predicate != tags));

    // size counts from property counts and so overcounts here
    assert_eq!(query(&conn, None, None, None).len() + 2, conn.size(&[]).unwrap());
}

#[test]
fn test_all_pattern_shapes_first_class() {
    let graph = scenario_graph();
    let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let conn = sail.connection();
    let codec = sail.codec();
    let ns = sail.namespaces();

    let v1 = codec.vertex_uri(NodeId::new(1));
    let v2 = codec.vertex_uri(NodeId::new(2));
    let e7 = codec.edge_uri(EdgeId::new(7));
    let name = codec.property_uri("name");
    let marko = Literal::new_simple_literal("marko");
    let knows = Literal::new_simple_literal("knows");

    // (?,?,?)
    assert_eq!(query(&conn, None, None, None).len(), 11);
    // (S,?,?)
    assert_eq!(query(&conn, Some(&v1), None, None).len(), 3);
    assert_eq!(query(&conn, Some(&e7), None, None).len(), 5);
    // (S,P,?)
    assert_eq!(query(&conn, Some(&v1), Some(&name), None).len(), 1);
    assert_eq!(query(&conn, Some(&e7), Some(ns.tail()), None).len(), 1);
    assert_eq!(query(&conn, Some(&v1), Some(ns.head()), None).len(), 0);
    // (S,?,O)
    assert_eq!(query(&conn, Some(&v1), None, Some(marko.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, Some(&e7), None, Some(v2.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, Some(&e7), None, Some(ns.edge_class().as_ref().into())).len(), 1);
    // (?,?,O)
    assert_eq!(query(&conn, None, None, Some(marko.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, None, None, Some(v2.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, None, None, Some(knows.as_ref().into())).len(), 1);
    // (?,P,O)
    assert_eq!(query(&conn, None, Some(ns.rdf_type()), Some(ns.edge_class().as_ref().into())).len(), 1);
    assert_eq!(query(&conn, None, Some(ns.tail()), Some(v1.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, None, Some(ns.tail()), Some(v2.as_ref().into())).len(), 0);
    // (?,P,?)
    assert_eq!(query(&conn, None, Some(ns.rdf_type()), None).len(), 3);
    assert_eq!(query(&conn, None, Some(ns.id()), None).len(), 3);
    assert_eq!(query(&conn, None, Some(&name), None).len(), 2);
    // (S,P,O)
    assert_eq!(query(&conn, Some(&v1), Some(&name), Some(marko.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, Some(&v2), Some(&name), Some(marko.as_ref().into())).len(), 0);
    let seven = Literal::new_typed_literal("7", xsd::LONG);
    assert_eq!(query(&conn, Some(&e7), Some(ns.id()), Some(seven.as_ref().into())).len(), 1);
    // relation predicates do not exist with first-class edges
    let relation = codec.relation_uri(&EdgeType::new("knows"));
    assert_eq!(query(&conn, Some(&v1), Some(&relation), None).len(), 0);
}

#[test]
fn test_all_pattern_shapes_simple() {
    let graph = scenario_graph();
    let sail = PropertyGraphSail::new(&graph, SailConfig::simple()).unwrap();
    let conn = sail.connection();
    let codec = sail.codec();
    let ns = sail.namespaces();

    let v1 = codec.vertex_uri(NodeId::new(1));
    let v2 = codec.vertex_uri(NodeId::new(2));
    let e7 = codec.edge_uri(EdgeId::new(7));
    let name = codec.property_uri("name");
    let knows = codec.relation_uri(&EdgeType::new("knows"));
    let vadas = Literal::new_simple_literal("vadas");

    // (?,?,?)
    assert_eq!(query(&conn, None, None, None).len(), 7);
    // (S,?,?)
    assert_eq!(query(&conn, Some(&v1), None, None).len(), 4);
    assert_eq!(query(&conn, Some(&v2), None, None).len(), 3);
    assert_eq!(query(&conn, Some(&e7), None, None).len(), 0);
    // (S,P,?)
    assert_eq!(query(&conn, Some(&v1), Some(&knows), None).len(), 1);
    assert_eq!(query(&conn, Some(&v2), Some(&knows), None).len(), 0);
    assert_eq!(query(&conn, Some(&v1), Some(ns.label()), None).len(), 0);
    // (S,?,O)
    assert_eq!(query(&conn, Some(&v1), None, Some(v2.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, Some(&v2), None, Some(v1.as_ref().into())).len(), 0);
    // (?,?,O)
    assert_eq!(query(&conn, None, None, Some(v2.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, None, None, Some(vadas.as_ref().into())).len(), 1);
    // (?,P,O)
    assert_eq!(query(&conn, None, Some(&knows), Some(v2.as_ref().into())).len(), 1);
    assert_eq!(query(&conn, None, Some(&knows), Some(v1.as_ref().into())).len(), 0);
    assert_eq!(query(&conn, None, Some(ns.head()), Some(v2.as_ref().into())).len(), 0);
    // (?,P,?)
    assert_eq!(query(&conn, None, Some(&knows), None).len(), 1);
    assert_eq!(query(&conn, None, Some(&name), None).len(), 2);
    assert_eq!(query(&conn, None, Some(ns.rdf_type()), None).len(), 2);
    // (S,P,O)
    let statements = query(&conn, Some(&v1), Some(&knows), Some(v2.as_ref().into()));
    assert_eq!(statements, vec![Triple::new(v1.clone(), knows.clone(), v2.clone())]);
    assert_eq!(query(&conn, Some(&v2), Some(&knows), Some(v1.as_ref().into())).len(), 0);
}

#[test]
fn test_foreign_uris_match_nothing() {
    let graph = scenario_graph();
    let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let conn = sail.connection();

    let foreign = NamedNode::new("http://example.org/alice").unwrap();
    let dangling = sail.codec().vertex_uri(NodeId::new(404));
    let odd = NamedNode::new("http://tinkerpop.com/pgm/vertex/01").unwrap();

    for subject in [&foreign, &dangling, &odd] {
        assert!(query(&conn, Some(subject), None, None).is_empty());
    }
    assert!(query(&conn, None, Some(&foreign), None).is_empty());
    assert!(query(&conn, None, None, Some(foreign.as_ref().into())).is_empty());
    assert!(query(&conn, None, None, Some(dangling.as_ref().into())).is_empty());
}

#[test]
fn test_custom_base_iri() {
    let graph = scenario_graph();
    let config = SailConfig::new("http://example.org/social/", true);
    let sail = PropertyGraphSail::new(&graph, config).unwrap();
    let conn = sail.connection();

    let all = query(&conn, None, None, None);
    assert_eq!(all.len(), 11);
    assert!(all.iter().all(|s| match &s.subject {
        Subject::NamedNode(n) => n.as_str().starts_with("http://example.org/social/"),
        _ => false,
    }));

    // URIs of the default base are foreign here
    let default_v1 = NamedNode::new("http://tinkerpop.com/pgm/vertex/1").unwrap();
    assert!(query(&conn, Some(&default_v1), None, None).is_empty());
}

#[test]
fn test_config_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "base_iri: \"http://example.org/g/\"").unwrap();
    writeln!(file, "first_class_edges: false").unwrap();

    let config = SailConfig::from_file(file.path()).unwrap();
    assert_eq!(config.base_iri, "http://example.org/g/");
    assert!(!config.first_class_edges);

    let graph = scenario_graph();
    let sail = PropertyGraphSail::new(&graph, config).unwrap();
    assert_eq!(sail.connection().size(&[]).unwrap(), 7);
}

#[test]
fn test_iteration_close() {
    let graph = scenario_graph();
    let sail = PropertyGraphSail::new(&graph, SailConfig::default()).unwrap();
    let conn = sail.connection();

    let mut statements = conn.get_statements(None, None, None, &[]).unwrap();
    assert!(statements.next().is_some());
    statements.close();
    assert!(statements.is_closed());
    assert!(statements.next().is_none());
}
