//! Ancestry inference over the ontology DAG.
//!
//! Two closure rules, one per relation kind:
//!
//! - `is_a`: every term reachable by one or more `is_a` edges.
//! - `part_of`: every term reachable by a path matching
//!   `is_a* . part_of . (is_a | part_of)*`, which encodes the GO rules
//!   "A is_a B and B part_of C => A part_of C" and
//!   "A part_of B and B is_a C => A part_of C" plus plain `part_of`
//!   transitivity.
//!
//! Traversal is iterative with an explicit stack, and each phase carries a
//! visited set so a node is expanded at most once. The DAG invariant alone
//! guarantees termination, but without the guard a diamond-heavy graph
//! re-expands shared ancestors exponentially.

use crate::{Ontology, OntologyError, RelationKind, TermId};
use std::collections::BTreeSet;

/// Complete set of ancestor ids of `term` under `kind` semantics.
///
/// Read-only over the store; fails with [`OntologyError::NotFound`] when the
/// start term does not exist. The start term is never part of the result.
pub fn infer_ancestors(
    onto: &Ontology,
    term: &TermId,
    kind: RelationKind,
) -> Result<BTreeSet<TermId>, OntologyError> {
    onto.get_term(term)?;
    Ok(match kind {
        RelationKind::IsA => is_a_closure(onto, term),
        RelationKind::PartOf => part_of_closure(onto, term),
    })
}

/// Targets of all `is_a`-only paths of length >= 1. The visited set doubles
/// as the result.
fn is_a_closure(onto: &Ontology, start: &TermId) -> BTreeSet<TermId> {
    let mut seen: BTreeSet<TermId> = BTreeSet::new();
    let mut stack: Vec<TermId> = vec![start.clone()];

    while let Some(id) = stack.pop() {
        for nbr in onto.neighbors_by_relation(&id, RelationKind::IsA) {
            if seen.insert(nbr.clone()) {
                stack.push(nbr.clone());
            }
        }
    }

    seen
}

/// Two-phase traversal for the `is_a* . part_of . (is_a | part_of)*`
/// pattern.
///
/// The leading phase walks `is_a` edges without collecting anything; the
/// first `part_of` edge crossed moves the walk into the trailing phase,
/// where every edge of either kind extends the ancestor set. The two phases
/// keep separate visited sets: a term skipped in the leading phase may still
/// legitimately enter the result through a later `part_of` hop.
fn part_of_closure(onto: &Ontology, start: &TermId) -> BTreeSet<TermId> {
    let mut ancestors: BTreeSet<TermId> = BTreeSet::new();

    let mut lead_seen: BTreeSet<TermId> = BTreeSet::new();
    lead_seen.insert(start.clone());
    let mut lead_stack: Vec<TermId> = vec![start.clone()];
    let mut tail_stack: Vec<TermId> = Vec::new();

    while let Some(id) = lead_stack.pop() {
        for (nbr, kind) in onto.outgoing(&id) {
            match kind {
                RelationKind::PartOf => {
                    if ancestors.insert(nbr.clone()) {
                        tail_stack.push(nbr.clone());
                    }
                }
                RelationKind::IsA => {
                    if lead_seen.insert(nbr.clone()) {
                        lead_stack.push(nbr.clone());
                    }
                }
            }
        }
    }

    while let Some(id) = tail_stack.pop() {
        for (nbr, _) in onto.outgoing(&id) {
            if ancestors.insert(nbr.clone()) {
                tail_stack.push(nbr.clone());
            }
        }
    }

    ancestors
}
