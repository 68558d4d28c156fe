//! Gene Ontology as a directed acyclic graph.
//!
//! The ontology is a set of typed terms connected by typed, directed
//! relations. Two invariants are enforced on every relation insertion:
//!
//! - both endpoints (when present) belong to the same aspect, and
//! - the edge set stays acyclic across the whole graph.
//!
//! A failed insertion rolls back completely: the store after the call
//! compares equal to the store before it.
//!
//! Queries live in [`infer`]: ancestor closures under the `is_a` and
//! `part_of` relation semantics.

pub mod infer;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

pub use infer::infer_ancestors;

// ============================================================================
// Identifiers and vocabularies
// ============================================================================

/// Caller-supplied term identifier (e.g. `GO:0008150`). The format is not
/// validated here; uniqueness is enforced by the term map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(String);

impl TermId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TermId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TermId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The three top-level GO aspects. Relations are only valid within one
/// aspect, so this is a closed vocabulary rather than an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Aspect {
    CellularComponent,
    BiologicalProcess,
    MolecularFunction,
}

impl Aspect {
    /// Parse from the namespace label used in GO distributions.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "cellular_component" => Some(Self::CellularComponent),
            "biological_process" => Some(Self::BiologicalProcess),
            "molecular_function" => Some(Self::MolecularFunction),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CellularComponent => "cellular_component",
            Self::BiologicalProcess => "biological_process",
            Self::MolecularFunction => "molecular_function",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relation vocabulary. Real GO has more kinds (`regulates`, ...); this
/// model intentionally supports only the two with inference semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationKind {
    IsA,
    PartOf,
}

impl RelationKind {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "is_a" => Some(Self::IsA),
            "part_of" => Some(Self::PartOf),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::IsA => "is_a",
            Self::PartOf => "part_of",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Terms and relations
// ============================================================================

/// One ontology concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub aspect: Aspect,
    pub definition: String,
}

impl Term {
    pub fn new(
        id: impl Into<TermId>,
        name: impl Into<String>,
        aspect: Aspect,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aspect,
            definition: definition.into(),
        }
    }
}

/// A directed, typed edge between two terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relation {
    pub source: TermId,
    pub target: TermId,
    pub kind: RelationKind,
}

// ============================================================================
// Errors
// ============================================================================

// Display/Error are hand-written: `source`/`target` here are relation
// endpoints, and a thiserror derive would treat a field named `source` as
// the error cause (requiring `TermId: Error`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OntologyError {
    NotFound(TermId),

    AspectMismatch { source: TermId, target: TermId },

    CycleDetected {
        source: TermId,
        target: TermId,
        kind: RelationKind,
    },
}

impl fmt::Display for OntologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "term not found: {id}"),
            Self::AspectMismatch { source, target } => {
                write!(f, "terms {source} and {target} belong to different aspects")
            }
            Self::CycleDetected {
                source,
                target,
                kind,
            } => {
                write!(
                    f,
                    "relation {source} -[{kind}]-> {target} would create a cycle"
                )
            }
        }
    }
}

impl std::error::Error for OntologyError {}

// ============================================================================
// Ontology store
// ============================================================================

/// The ontology: term map plus directed edge set with a per-source
/// adjacency index. Owned by the caller; queries borrow it read-only.
///
/// At most one edge is kept per `(source, target)` direction; re-inserting
/// the same edge overwrites its kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    terms: BTreeMap<TermId, Term>,
    /// source -> (target -> kind)
    edges: BTreeMap<TermId, BTreeMap<TermId, RelationKind>>,
}

/// Seed ids for the three aspect roots used by [`Ontology::with_roots`].
pub const ROOT_CC: &str = "GO:0000001";
pub const ROOT_BP: &str = "GO:0000002";
pub const ROOT_MF: &str = "GO:0000003";

impl Ontology {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the three aspect root terms that every other term
    /// ultimately connects to.
    pub fn with_roots() -> Self {
        let mut onto = Self::new();
        onto.add_term(Term::new(
            ROOT_CC,
            "cellular_component",
            Aspect::CellularComponent,
            "cellular component aspect of the GO",
        ));
        onto.add_term(Term::new(
            ROOT_BP,
            "biological_process",
            Aspect::BiologicalProcess,
            "biological process aspect of the GO",
        ));
        onto.add_term(Term::new(
            ROOT_MF,
            "molecular function",
            Aspect::MolecularFunction,
            "molecular function aspect of the GO",
        ));
        onto
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert or overwrite a term. Last write wins; always succeeds.
    pub fn add_term(&mut self, term: Term) {
        self.terms.insert(term.id.clone(), term);
    }

    /// Attempt to add a directed edge `source -[kind]-> target`.
    ///
    /// Fails with [`OntologyError::AspectMismatch`] when both endpoints exist
    /// in different aspects, and with [`OntologyError::CycleDetected`] when
    /// the edge would close a directed cycle anywhere in the graph. Either
    /// failure leaves the store exactly as it was before the call.
    ///
    /// Endpoints that are not (yet) terms are accepted: bulk loads insert
    /// relations whose targets arrive later in the source stream.
    pub fn add_relation(
        &mut self,
        source: &TermId,
        target: &TermId,
        kind: RelationKind,
    ) -> Result<(), OntologyError> {
        if let (Some(s), Some(t)) = (self.terms.get(source), self.terms.get(target)) {
            if s.aspect != t.aspect {
                return Err(OntologyError::AspectMismatch {
                    source: source.clone(),
                    target: target.clone(),
                });
            }
        }

        // Speculative insert, then a whole-graph acyclicity check. The store
        // keeps no incremental certificate, so the check is global.
        let previous = self
            .edges
            .entry(source.clone())
            .or_default()
            .insert(target.clone(), kind);

        if self.is_acyclic() {
            return Ok(());
        }

        // Rollback to the exact pre-call state.
        match previous {
            Some(old_kind) => {
                if let Some(out) = self.edges.get_mut(source) {
                    out.insert(target.clone(), old_kind);
                }
            }
            None => {
                if let Some(out) = self.edges.get_mut(source) {
                    out.remove(target);
                    if out.is_empty() {
                        self.edges.remove(source);
                    }
                }
            }
        }

        Err(OntologyError::CycleDetected {
            source: source.clone(),
            target: target.clone(),
            kind,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn get_term(&self, id: &TermId) -> Result<&Term, OntologyError> {
        self.terms
            .get(id)
            .ok_or_else(|| OntologyError::NotFound(id.clone()))
    }

    pub fn contains_term(&self, id: &TermId) -> bool {
        self.terms.contains_key(id)
    }

    /// Target ids one outgoing `kind`-edge away from `id`. The iterator is
    /// cheap to restart; no ordering is guaranteed by the contract.
    pub fn neighbors_by_relation<'a>(
        &'a self,
        id: &TermId,
        kind: RelationKind,
    ) -> impl Iterator<Item = &'a TermId> + 'a {
        self.edges
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |(target, k)| (*k == kind).then_some(target))
    }

    /// All outgoing edges of `id`, with their kinds.
    pub fn outgoing<'a>(
        &'a self,
        id: &TermId,
    ) -> impl Iterator<Item = (&'a TermId, RelationKind)> + 'a {
        self.edges
            .get(id)
            .into_iter()
            .flatten()
            .map(|(target, k)| (target, *k))
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    /// Materialized view of every edge in the store.
    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.edges.iter().flat_map(|(source, out)| {
            out.iter().map(move |(target, kind)| Relation {
                source: source.clone(),
                target: target.clone(),
                kind: *kind,
            })
        })
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn relation_count(&self) -> usize {
        self.edges.values().map(|out| out.len()).sum()
    }

    // ========================================================================
    // Acyclicity (Kahn)
    // ========================================================================

    /// Whole-graph cycle check via Kahn's algorithm: repeatedly strip
    /// zero-in-degree nodes; leftovers mean a cycle. Edge endpoints that are
    /// not terms still participate as graph nodes.
    fn is_acyclic(&self) -> bool {
        let mut in_degree: BTreeMap<&TermId, usize> = BTreeMap::new();
        for (source, out) in &self.edges {
            in_degree.entry(source).or_insert(0);
            for target in out.keys() {
                *in_degree.entry(target).or_insert(0) += 1;
            }
        }

        let mut queue: VecDeque<&TermId> = in_degree
            .iter()
            .filter_map(|(id, deg)| (*deg == 0).then_some(*id))
            .collect();

        let total = in_degree.len();
        let mut visited = 0usize;
        while let Some(id) = queue.pop_front() {
            visited += 1;
            if let Some(out) = self.edges.get(id) {
                for target in out.keys() {
                    if let Some(deg) = in_degree.get_mut(target) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push_back(target);
                        }
                    }
                }
            }
        }

        visited == total
    }
}
