//! Ancestry inference scenarios: the two closure rules over small graphs.

use godag_core::{infer_ancestors, Aspect, Ontology, OntologyError, RelationKind, Term, TermId};
use std::collections::BTreeSet;

fn onto_with(ids: &[&str]) -> Ontology {
    let mut onto = Ontology::new();
    for id in ids {
        onto.add_term(Term::new(*id, *id, Aspect::MolecularFunction, ""));
    }
    onto
}

fn ids(members: &[&str]) -> BTreeSet<TermId> {
    members.iter().map(|s| TermId::from(*s)).collect()
}

#[test]
fn is_a_chain_reaches_every_ancestor() {
    // T2 -is_a-> T1 -is_a-> MF
    let mut onto = Ontology::with_roots();
    onto.add_term(Term::new("T1", "1", Aspect::MolecularFunction, ""));
    onto.add_term(Term::new("T2", "2", Aspect::MolecularFunction, ""));
    onto.add_relation(
        &TermId::from("T1"),
        &TermId::from(godag_core::ROOT_MF),
        RelationKind::IsA,
    )
    .unwrap();
    onto.add_relation(&TermId::from("T2"), &TermId::from("T1"), RelationKind::IsA)
        .unwrap();

    let ancestors = infer_ancestors(&onto, &TermId::from("T2"), RelationKind::IsA).unwrap();
    assert_eq!(ancestors, ids(&["T1", godag_core::ROOT_MF]));
}

#[test]
fn is_a_closure_is_transitive() {
    let mut onto = onto_with(&["A", "B", "C", "D"]);
    onto.add_relation(&TermId::from("A"), &TermId::from("B"), RelationKind::IsA)
        .unwrap();
    onto.add_relation(&TermId::from("B"), &TermId::from("C"), RelationKind::IsA)
        .unwrap();
    onto.add_relation(&TermId::from("C"), &TermId::from("D"), RelationKind::IsA)
        .unwrap();

    let of_a = infer_ancestors(&onto, &TermId::from("A"), RelationKind::IsA).unwrap();
    let of_b = infer_ancestors(&onto, &TermId::from("B"), RelationKind::IsA).unwrap();

    // Everything in the closure of B is in the closure of A.
    assert!(of_b.is_subset(&of_a));
    assert_eq!(of_a, ids(&["B", "C", "D"]));
}

#[test]
fn is_a_closure_ignores_part_of_edges() {
    let mut onto = onto_with(&["A", "B", "C"]);
    onto.add_relation(&TermId::from("A"), &TermId::from("B"), RelationKind::IsA)
        .unwrap();
    onto.add_relation(&TermId::from("B"), &TermId::from("C"), RelationKind::PartOf)
        .unwrap();

    let ancestors = infer_ancestors(&onto, &TermId::from("A"), RelationKind::IsA).unwrap();
    assert_eq!(ancestors, ids(&["B"]));
}

#[test]
fn part_of_steps_over_leading_is_a() {
    // A -is_a-> B -part_of-> C: A part_of C.
    let mut onto = onto_with(&["A", "B", "C"]);
    onto.add_relation(&TermId::from("A"), &TermId::from("B"), RelationKind::IsA)
        .unwrap();
    onto.add_relation(&TermId::from("B"), &TermId::from("C"), RelationKind::PartOf)
        .unwrap();

    let ancestors = infer_ancestors(&onto, &TermId::from("A"), RelationKind::PartOf).unwrap();
    assert_eq!(ancestors, ids(&["C"]));
}

#[test]
fn part_of_follows_trailing_is_a() {
    // A -part_of-> B -is_a-> C: A part_of C.
    let mut onto = onto_with(&["A", "B", "C"]);
    onto.add_relation(&TermId::from("A"), &TermId::from("B"), RelationKind::PartOf)
        .unwrap();
    onto.add_relation(&TermId::from("B"), &TermId::from("C"), RelationKind::IsA)
        .unwrap();

    let ancestors = infer_ancestors(&onto, &TermId::from("A"), RelationKind::PartOf).unwrap();
    assert_eq!(ancestors, ids(&["B", "C"]));
}

#[test]
fn part_of_requires_at_least_one_part_of_edge() {
    // Pure is_a paths contribute nothing to the part_of closure.
    let mut onto = onto_with(&["A", "B", "C"]);
    onto.add_relation(&TermId::from("A"), &TermId::from("B"), RelationKind::IsA)
        .unwrap();
    onto.add_relation(&TermId::from("B"), &TermId::from("C"), RelationKind::IsA)
        .unwrap();

    let ancestors = infer_ancestors(&onto, &TermId::from("A"), RelationKind::PartOf).unwrap();
    assert!(ancestors.is_empty());
}

#[test]
fn part_of_collects_everything_past_the_first_hop() {
    // A -is_a-> B -part_of-> C -is_a-> D -part_of-> E
    let mut onto = onto_with(&["A", "B", "C", "D", "E"]);
    onto.add_relation(&TermId::from("A"), &TermId::from("B"), RelationKind::IsA)
        .unwrap();
    onto.add_relation(&TermId::from("B"), &TermId::from("C"), RelationKind::PartOf)
        .unwrap();
    onto.add_relation(&TermId::from("C"), &TermId::from("D"), RelationKind::IsA)
        .unwrap();
    onto.add_relation(&TermId::from("D"), &TermId::from("E"), RelationKind::PartOf)
        .unwrap();

    let ancestors = infer_ancestors(&onto, &TermId::from("A"), RelationKind::PartOf).unwrap();
    assert_eq!(ancestors, ids(&["C", "D", "E"]));
}

#[test]
fn diamond_fanin_visits_shared_ancestor_once() {
    // A -> B, A -> C, B -> D, C -> D (all is_a): D appears once.
    let mut onto = onto_with(&["A", "B", "C", "D", "E"]);
    for (s, t) in [("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "E")] {
        onto.add_relation(&TermId::from(s), &TermId::from(t), RelationKind::IsA)
            .unwrap();
    }

    let ancestors = infer_ancestors(&onto, &TermId::from("A"), RelationKind::IsA).unwrap();
    assert_eq!(ancestors, ids(&["B", "C", "D", "E"]));
}

#[test]
fn start_term_is_never_its_own_ancestor() {
    let mut onto = onto_with(&["A", "B"]);
    onto.add_relation(&TermId::from("A"), &TermId::from("B"), RelationKind::IsA)
        .unwrap();

    let ancestors = infer_ancestors(&onto, &TermId::from("A"), RelationKind::IsA).unwrap();
    assert!(!ancestors.contains(&TermId::from("A")));
}

#[test]
fn unknown_start_term_is_not_found() {
    let onto = Ontology::new();
    let err = infer_ancestors(&onto, &TermId::from("GO:404"), RelationKind::IsA).unwrap_err();
    assert_eq!(err, OntologyError::NotFound(TermId::from("GO:404")));
}

#[test]
fn part_of_query_is_deterministic_across_runs() {
    let mut onto = onto_with(&["A", "B", "C", "D", "E", "F"]);
    for (s, t, k) in [
        ("A", "B", RelationKind::IsA),
        ("A", "C", RelationKind::PartOf),
        ("B", "D", RelationKind::PartOf),
        ("C", "E", RelationKind::IsA),
        ("D", "F", RelationKind::PartOf),
    ] {
        onto.add_relation(&TermId::from(s), &TermId::from(t), k)
            .unwrap();
    }

    let first = infer_ancestors(&onto, &TermId::from("A"), RelationKind::PartOf).unwrap();
    for _ in 0..5 {
        let again = infer_ancestors(&onto, &TermId::from("A"), RelationKind::PartOf).unwrap();
        assert_eq!(first, again);
    }
}
