//! samyama-sail: query the RDF view of a sample property graph
//!
//! ```text
//! samyama-sail query --subject vertex:1
//! samyama-sail --simple query --predicate '<http://tinkerpop.com/pgm/relation/knows>'
//! samyama-sail query --predicate prop:name --object '"marko"'
//! samyama-sail size
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use oxrdf::{Literal, NamedNode, Term};
use samyama_sail::graph::{Edge, EdgeId, GraphStore, Node, NodeId, PropertyValue};
use samyama_sail::{Namespaces, PropertyGraphSail, SailConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "samyama-sail", version, about = "RDF view over a Samyama property graph")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Expose edges as single relation statements
    #[arg(long, global = true)]
    simple: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statements matching a triple pattern as N-Triples
    Query {
        /// Subject: `prefix:local` or `<iri>`
        #[arg(long)]
        subject: Option<String>,

        /// Predicate: `prefix:local` or `<iri>`
        #[arg(long)]
        predicate: Option<String>,

        /// Object: `prefix:local`, `<iri>`, `"text"` or `"lexical"^^datatype`
        #[arg(long)]
        object: Option<String>,
    },
    /// Print the number of statements
    Size,
    /// Print the namespace prefixes
    Namespaces,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SailConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SailConfig::default(),
    };
    if cli.simple {
        config = config.with_first_class_edges(false);
    }

    let graph = sample_graph().context("building sample graph")?;
    info!("Sample graph: {} vertices, {} edges", graph.node_count(), graph.edge_count());

    let sail = PropertyGraphSail::new(&graph, config)?;
    let conn = sail.connection();
    let namespaces = sail.namespaces();

    match cli.command {
        Commands::Query {
            subject,
            predicate,
            object,
        } => {
            let subject = subject.as_deref().map(|s| parse_resource(s, namespaces)).transpose()?;
            let predicate = predicate.as_deref().map(|p| parse_resource(p, namespaces)).transpose()?;
            let object = object.as_deref().map(|o| parse_term(o, namespaces)).transpose()?;

            let statements = conn.get_statements(
                subject.as_ref().map(|s| s.as_ref().into()),
                predicate.as_ref().map(|p| p.as_ref()),
                object.as_ref().map(|o| o.as_ref()),
                &[],
            )?;
            let mut count = 0;
            for statement in statements {
                println!("{} .", statement?);
                count += 1;
            }
            info!("{} statements", count);
        }
        Commands::Size => println!("{}", conn.size(&[])?),
        Commands::Namespaces => {
            for namespace in conn.namespaces()? {
                println!("@prefix {}: <{}> .", namespace.prefix, namespace.iri);
            }
        }
    }

    Ok(())
}

/// `<iri>` or `prefix:local`
fn parse_resource(input: &str, namespaces: &Namespaces) -> Result<NamedNode> {
    let iri = match input.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(iri) => iri.to_string(),
        None => namespaces.expand(input)?,
    };
    NamedNode::new(iri.as_str()).with_context(|| format!("invalid IRI {}", iri))
}

/// A resource, `"text"` or `"lexical"^^datatype`
fn parse_term(input: &str, namespaces: &Namespaces) -> Result<Term> {
    let Some(rest) = input.strip_prefix('"') else {
        return Ok(parse_resource(input, namespaces)?.into());
    };
    let Some((value, suffix)) = rest.rsplit_once('"') else {
        bail!("unterminated literal {}", input);
    };
    let literal = match suffix.strip_prefix("^^") {
        Some(datatype) => Literal::new_typed_literal(value, parse_datatype(datatype, namespaces)?),
        None if suffix.is_empty() => Literal::new_simple_literal(value),
        None => bail!("unexpected {:?} after literal", suffix),
    };
    Ok(literal.into())
}

/// Datatypes may also use the `xsd:` prefix
fn parse_datatype(input: &str, namespaces: &Namespaces) -> Result<NamedNode> {
    match input.strip_prefix("xsd:") {
        Some(local) => Ok(NamedNode::new(format!("http://www.w3.org/2001/XMLSchema#{}", local))?),
        None => parse_resource(input, namespaces),
    }
}

/// The classic six-vertex TinkerPop graph
fn sample_graph() -> Result<GraphStore> {
    let mut graph = GraphStore::new();

    let people: [(u64, &str, i32); 4] = [(1, "marko", 29), (2, "vadas", 27), (4, "josh", 32), (6, "peter", 35)];
    for (id, name, age) in people {
        let mut node = Node::new(NodeId::new(id));
        node.set_property("name", name);
        node.set_property("age", age);
        graph.insert_node(node)?;
    }
    for (id, name) in [(3u64, "lop"), (5, "ripple")] {
        let mut node = Node::new(NodeId::new(id));
        node.set_property("name", name);
        node.set_property("lang", "java");
        graph.insert_node(node)?;
    }

    let edges: [(u64, u64, &str, u64, f32); 6] = [
        (7, 1, "knows", 2, 0.5),
        (8, 1, "knows", 4, 1.0),
        (9, 1, "created", 3, 0.4),
        (10, 4, "created", 5, 1.0),
        (11, 4, "created", 3, 0.4),
        (12, 6, "created", 3, 0.2),
    ];
    for (id, tail, label, head, weight) in edges {
        let mut edge = Edge::new(EdgeId::new(id), NodeId::new(tail), NodeId::new(head), label);
        edge.set_property("weight", PropertyValue::Float(weight));
        graph.insert_edge(edge)?;
    }

    Ok(graph)
}
