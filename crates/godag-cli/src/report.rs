//! Plain-text / JSON ancestor reports.
//!
//! Pure formatting over the store's accessors: no graph logic lives here.
//! Each ancestor is rendered as an id/name/namespace/definition block, read
//! back through `get_term` so dangling edge endpoints (ids with no term
//! record) are reported as such instead of silently dropped.

use anyhow::Result;
use godag_core::{Ontology, OntologyError, RelationKind, TermId};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub id: String,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub definition: Option<String>,
}

/// Resolve ancestor ids into report entries via `get_term`.
pub fn ancestor_entries(
    onto: &Ontology,
    ancestors: &BTreeSet<TermId>,
) -> Result<Vec<ReportEntry>> {
    let mut entries = Vec::with_capacity(ancestors.len());
    for id in ancestors {
        match onto.get_term(id) {
            Ok(term) => entries.push(ReportEntry {
                id: term.id.to_string(),
                name: Some(term.name.clone()),
                namespace: Some(term.aspect.label().to_string()),
                definition: Some(term.definition.clone()),
            }),
            Err(OntologyError::NotFound(_)) => entries.push(ReportEntry {
                id: id.to_string(),
                name: None,
                namespace: None,
                definition: None,
            }),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(entries)
}

/// Human-readable report, one block per ancestor.
pub fn format_text(
    start: &TermId,
    kind: RelationKind,
    entries: &[ReportEntry],
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Ancestors of {start} under {kind} semantics: {}\n",
        entries.len()
    ));
    for entry in entries {
        out.push('\n');
        out.push_str(&format!("id:         {}\n", entry.id));
        match (&entry.name, &entry.namespace, &entry.definition) {
            (Some(name), Some(ns), Some(def)) => {
                out.push_str(&format!("name:       {name}\n"));
                out.push_str(&format!("namespace:  {ns}\n"));
                out.push_str(&format!("definition: {def}\n"));
            }
            _ => out.push_str("            (no term record in the store)\n"),
        }
    }
    out
}

pub fn format_json(entries: &[ReportEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}
