//! godag CLI
//!
//! Command-line interface for the Gene Ontology DAG engine:
//! - Loading OBO dumps into a snapshot (`.dagon`)
//! - Running ancestor queries and formatting reports
//! - Exporting Graphviz DOT renderings
//! - Seeding a small demo ontology

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use godag_core::{infer_ancestors, Aspect, Ontology, RelationKind, Term, TermId};
use std::path::PathBuf;

mod report;
mod viz;

#[derive(Parser)]
#[command(name = "godag")]
#[command(
    author,
    version,
    about = "Gene Ontology DAG: term store, inference, reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RelationArg {
    #[value(name = "is_a")]
    IsA,
    #[value(name = "part_of")]
    PartOf,
}

impl From<RelationArg> for RelationKind {
    fn from(value: RelationArg) -> Self {
        match value {
            RelationArg::IsA => RelationKind::IsA,
            RelationArg::PartOf => RelationKind::PartOf,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an OBO dump and save it as an ontology snapshot.
    Load {
        /// Input OBO file
        input: PathBuf,
        /// Output snapshot path
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Query all ancestors of a term under a relation's semantics.
    Ancestors {
        /// Ontology snapshot
        db: PathBuf,
        /// Start term id (e.g. GO:0016043)
        term: String,
        /// Relation semantics to close over
        #[arg(short, long, value_enum, default_value = "is_a")]
        relation: RelationArg,
        /// Report format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Export the ontology graph as Graphviz DOT.
    Dot {
        /// Ontology snapshot
        db: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Build the three-aspect demo ontology and save it.
    Demo {
        /// Output snapshot path
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Load { input, out } => cmd_load(&input, &out),
        Commands::Ancestors {
            db,
            term,
            relation,
            format,
        } => cmd_ancestors(&db, &term, relation.into(), format),
        Commands::Dot { db, out } => cmd_dot(&db, out.as_deref()),
        Commands::Demo { out } => cmd_demo(&out),
    }
}

fn cmd_load(input: &std::path::Path, out: &std::path::Path) -> Result<()> {
    let (onto, stats) = godag_obo::ontology_from_obo_file(input)?;
    godag_storage::save(&onto, out)?;

    println!(
        "{} {} terms, {} relations ({} obsolete dropped, {} records skipped)",
        "loaded".green().bold(),
        stats.terms,
        stats.relations,
        stats.obsolete,
        stats.skipped,
    );
    println!("snapshot written to {}", out.display());
    Ok(())
}

fn cmd_ancestors(
    db: &std::path::Path,
    term: &str,
    kind: RelationKind,
    format: ReportFormat,
) -> Result<()> {
    let onto = godag_storage::load(db)?;
    let start = TermId::from(term);

    let ancestors = infer_ancestors(&onto, &start, kind)?;
    let entries = report::ancestor_entries(&onto, &ancestors)?;

    match format {
        ReportFormat::Text => print!("{}", report::format_text(&start, kind, &entries)),
        ReportFormat::Json => println!("{}", report::format_json(&entries)?),
    }
    Ok(())
}

fn cmd_dot(db: &std::path::Path, out: Option<&std::path::Path>) -> Result<()> {
    let onto = godag_storage::load(db)?;
    let dot = viz::ontology_to_dot(&onto);
    match out {
        Some(path) => {
            std::fs::write(path, dot)?;
            println!("DOT graph written to {}", path.display());
        }
        None => print!("{dot}"),
    }
    Ok(())
}

/// The sample graph from the original teaching walkthrough: nine
/// molecular-function terms hung under the MF root with mixed edge kinds,
/// including the diamond around GO:0000004.
fn demo_ontology() -> Result<Ontology> {
    let mut onto = Ontology::with_roots();

    for (id, name) in [
        ("GO:0000004", "1"),
        ("GO:0000005", "2"),
        ("GO:0000006", "0"),
        ("GO:0000007", "3"),
        ("GO:0000008", "4"),
        ("GO:0000009", "5"),
        ("GO:0000010", "6"),
        ("GO:0000011", "7"),
        ("GO:0000012", "8"),
    ] {
        onto.add_term(Term::new(id, name, Aspect::MolecularFunction, ""));
    }

    for (source, target, kind) in [
        ("GO:0000004", godag_core::ROOT_MF, RelationKind::IsA),
        ("GO:0000005", godag_core::ROOT_MF, RelationKind::IsA),
        ("GO:0000004", "GO:0000006", RelationKind::PartOf),
        ("GO:0000007", "GO:0000004", RelationKind::IsA),
        ("GO:0000008", "GO:0000004", RelationKind::IsA),
        ("GO:0000008", "GO:0000005", RelationKind::PartOf),
        ("GO:0000009", "GO:0000005", RelationKind::PartOf),
        ("GO:0000010", "GO:0000007", RelationKind::IsA),
        ("GO:0000011", "GO:0000004", RelationKind::IsA),
        ("GO:0000011", "GO:0000008", RelationKind::PartOf),
        ("GO:0000012", "GO:0000009", RelationKind::IsA),
    ] {
        onto.add_relation(&TermId::from(source), &TermId::from(target), kind)?;
    }

    Ok(onto)
}

fn cmd_demo(out: &std::path::Path) -> Result<()> {
    let onto = demo_ontology()?;
    godag_storage::save(&onto, out)?;
    println!(
        "{} demo ontology: {} terms, {} relations -> {}",
        "saved".green().bold(),
        onto.term_count(),
        onto.relation_count(),
        out.display()
    );
    Ok(())
}
