//! Graph rendering helpers.
//!
//! This module intentionally lives in the CLI crate: it is tooling, and it
//! should not pull layout concerns into the core graph crate. The output is
//! Graphviz DOT; layout itself is left to external tooling (`dot -Tsvg`).
//!
//! The export consumes only term ids/names and typed edges.

use godag_core::{Ontology, RelationKind};
use std::fmt::Write;

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the whole ontology as a DOT digraph. `is_a` edges are solid,
/// `part_of` edges dashed; dangling edge endpoints come out as bare nodes.
pub fn ontology_to_dot(onto: &Ontology) -> String {
    let mut out = String::new();
    out.push_str("digraph godag {\n");
    out.push_str("  rankdir=BT;\n");
    out.push_str("  node [shape=box, fontsize=10];\n\n");

    for term in onto.terms() {
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\\n{}\"];",
            escape_label(term.id.as_str()),
            escape_label(term.id.as_str()),
            escape_label(&term.name),
        );
    }

    out.push('\n');
    for rel in onto.relations() {
        let style = match rel.kind {
            RelationKind::IsA => "solid",
            RelationKind::PartOf => "dashed",
        };
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\" [label=\"{}\", style={}];",
            escape_label(rel.source.as_str()),
            escape_label(rel.target.as_str()),
            rel.kind,
            style,
        );
    }

    out.push_str("}\n");
    out
}
