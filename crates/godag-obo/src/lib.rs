//! OBO 1.2 flat-file ingestion for godag (boundary adapter).
//!
//! This crate sits at the interop boundary:
//!
//! - It parses `[Term]` stanzas out of an OBO dump (untrusted input).
//! - It emits plain [`TermFrame`] records.
//! - It bulk-loads records into an [`Ontology`] in two passes, because a
//!   relation's target term routinely appears later in the file than the
//!   relation referencing it.
//!
//! Only the tags the graph model consumes are interpreted (`id`, `name`,
//! `namespace`, `def`, `is_a`, `relationship: part_of`, `is_obsolete`);
//! everything else in the stanza is ignored.

use anyhow::{anyhow, Context, Result};
use godag_core::{Aspect, Ontology, RelationKind, Term, TermId};
use std::path::Path;

// ============================================================================
// Term frames
// ============================================================================

/// One raw `[Term]` stanza, before any validation against the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrame {
    pub id: String,
    pub name: String,
    /// Namespace label as written in the file (`biological_process`, ...).
    pub namespace: String,
    pub definition: String,
    pub is_obsolete: bool,
    /// Parent ids from `is_a:` tags.
    pub is_a: Vec<String>,
    /// Target ids from `relationship: part_of` tags.
    pub part_of: Vec<String>,
}

/// Counters reported by [`load_into`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub terms: usize,
    pub obsolete: usize,
    pub relations: usize,
    /// Records dropped with a warning: unknown namespaces and relations the
    /// store rejected (aspect mismatch / cycle in a malformed dump).
    pub skipped: usize,
}

// ============================================================================
// Parsing
// ============================================================================

/// Strip a trailing `! comment` from a tag value (OBO id references carry
/// the target's label after a bang).
fn strip_trailing_comment(value: &str) -> &str {
    match value.find(" !") {
        Some(idx) => value[..idx].trim(),
        None => value.trim(),
    }
}

/// Extract the quoted text of a `def:` value, unescaping `\"` and `\\`.
/// The dbxref list after the closing quote is dropped.
fn parse_def_value(value: &str) -> Result<String> {
    let rest = value
        .trim()
        .strip_prefix('"')
        .ok_or_else(|| anyhow!("def value does not start with a quote: {value}"))?;

    let mut out = String::with_capacity(rest.len());
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(out),
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => return Err(anyhow!("def value ends mid-escape: {value}")),
            },
            _ => out.push(c),
        }
    }
    Err(anyhow!("def value has no closing quote: {value}"))
}

/// Parse an OBO document into term frames. Stanzas other than `[Term]`
/// (e.g. `[Typedef]`) and the header block are skipped wholesale.
pub fn parse_obo_str(text: &str) -> Result<Vec<TermFrame>> {
    let mut frames: Vec<TermFrame> = Vec::new();
    let mut current: Option<TermFrame> = None;

    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if let Some(frame) = current.take() {
                frames.push(frame);
            }
            if line == "[Term]" {
                current = Some(TermFrame::default());
            }
            continue;
        }

        let Some(frame) = current.as_mut() else {
            continue;
        };

        let (tag, value) = line
            .split_once(':')
            .ok_or_else(|| anyhow!("line {}: malformed tag line: {line}", lineno + 1))?;
        let value = value.trim();

        match tag.trim() {
            "id" => frame.id = strip_trailing_comment(value).to_string(),
            "name" => frame.name = value.to_string(),
            "namespace" => frame.namespace = value.to_string(),
            "def" => {
                frame.definition = parse_def_value(value)
                    .with_context(|| format!("line {}", lineno + 1))?;
            }
            "is_a" => frame.is_a.push(strip_trailing_comment(value).to_string()),
            "is_obsolete" => frame.is_obsolete = value == "true",
            "relationship" => {
                let value = strip_trailing_comment(value);
                if let Some(target) = value.strip_prefix("part_of ") {
                    frame.part_of.push(target.trim().to_string());
                }
                // Other relationship kinds (regulates, ...) are out of scope.
            }
            _ => {}
        }
    }

    if let Some(frame) = current.take() {
        frames.push(frame);
    }

    for frame in &frames {
        if frame.id.is_empty() {
            return Err(anyhow!("[Term] stanza without an id tag"));
        }
    }

    Ok(frames)
}

pub fn parse_obo_file(path: &Path) -> Result<Vec<TermFrame>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_obo_str(&text)
}

// ============================================================================
// Two-pass bulk load
// ============================================================================

/// Load parsed frames into the store: all non-obsolete terms first, then all
/// relations. Relations the store rejects are logged and skipped rather than
/// aborting the load; a handful of bad edges should not waste an otherwise
/// usable dump.
pub fn load_into(onto: &mut Ontology, frames: &[TermFrame]) -> LoadStats {
    let mut stats = LoadStats::default();

    for frame in frames {
        if frame.is_obsolete {
            stats.obsolete += 1;
            continue;
        }
        let Some(aspect) = Aspect::parse(&frame.namespace) else {
            tracing::warn!(
                id = %frame.id,
                namespace = %frame.namespace,
                "skipping term with unknown namespace"
            );
            stats.skipped += 1;
            continue;
        };
        onto.add_term(Term::new(
            frame.id.clone(),
            frame.name.clone(),
            aspect,
            frame.definition.clone(),
        ));
        stats.terms += 1;
    }

    for frame in frames {
        if frame.is_obsolete {
            continue;
        }
        let source = TermId::new(frame.id.clone());
        let targets = frame
            .is_a
            .iter()
            .map(|t| (t, RelationKind::IsA))
            .chain(frame.part_of.iter().map(|t| (t, RelationKind::PartOf)));
        for (target, kind) in targets {
            let target = TermId::new(target.clone());
            match onto.add_relation(&source, &target, kind) {
                Ok(()) => stats.relations += 1,
                Err(err) => {
                    tracing::warn!(
                        source = %source,
                        target = %target,
                        kind = %kind,
                        error = %err,
                        "skipping rejected relation"
                    );
                    stats.skipped += 1;
                }
            }
        }
    }

    stats
}

/// Convenience: parse a file and load it into a fresh store.
pub fn ontology_from_obo_file(path: &Path) -> Result<(Ontology, LoadStats)> {
    let frames = parse_obo_file(path)?;
    let mut onto = Ontology::new();
    let stats = load_into(&mut onto, &frames);
    Ok((onto, stats))
}
