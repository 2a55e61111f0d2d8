use kin_domain::{BondOrder, DomainError, Reaction, ReactionData, Species, SpeciesId, Structure};
use kinengine::DigestCanonicalizer;

fn hydroxyl() -> Structure {
    let mut s = Structure::new("[OH]").with_multiplicity(2);
    let o = s.add_atom("O");
    s.add_hydrogens(o, 1).unwrap();
    s
}

fn water() -> Structure {
    let mut s = Structure::new("O").with_symmetry_number(2);
    let o = s.add_atom("O");
    s.add_hydrogens(o, 2).unwrap();
    s
}

fn dihydrogen() -> Structure {
    let mut s = Structure::new("[H][H]").with_symmetry_number(2);
    let a = s.add_atom("H");
    let b = s.add_atom("H");
    s.add_bond(a, b, BondOrder::Single).unwrap();
    s
}

fn hydrogen_atom() -> Structure {
    let mut s = Structure::new("[H]").with_multiplicity(2);
    s.add_atom("H");
    s
}

fn ts() -> Structure {
    let mut s = Structure::new("").with_multiplicity(2);
    let o = s.add_atom("O");
    s.add_hydrogens(o, 2).unwrap();
    let h = s.add_atom("H");
    s.add_bond(2, h, BondOrder::Single).unwrap();
    s
}

#[test]
fn reaction_builds_initial_data_from_structures() {
    let rxn = Reaction::new("OH+H2", vec![hydroxyl(), dihydrogen()], vec![water(), hydrogen_atom()], ts()).unwrap();
    assert_eq!(rxn.label(), "OH+H2");
    assert_eq!(rxn.data().reactants.len(), 2);
    assert_eq!(rxn.data().reactants[0].label, "[OH]");
    assert_eq!(rxn.data().products[0].molecules[0], water());
    assert!(rxn.data().kinetics.is_none());
    assert_eq!(rxn.species_structures().count(), 4);
    assert_eq!(rxn.to_string(), "OH+H2: [OH] + [H][H] <=> O + [H]");
}

#[test]
fn reaction_label_is_validated() {
    let err = Reaction::new("  ", vec![], vec![], ts()).unwrap_err();
    assert!(matches!(err, DomainError::ValidationError(_)));
    assert!(Reaction::new("a/b", vec![], vec![], ts()).is_err());
}

#[test]
fn with_data_replaces_only_the_data_object() {
    let rxn = Reaction::new("r", vec![hydroxyl(), dihydrogen()], vec![water(), hydrogen_atom()], ts()).unwrap();
    let data = ReactionData { label: "r".into(),
                              reactants: vec![Species { label: "[OH]".into(),
                                                        molecules: vec![] }],
                              products: vec![],
                              transition_state: Some("TS".into()),
                              tunneling: Some("Eckart".into()),
                              kinetics: None };
    let updated = rxn.clone().with_data(data.clone());
    assert_eq!(updated.data(), &data);
    assert_eq!(updated.reactants(), rxn.reactants());
    assert_eq!(updated.transition_state(), rxn.transition_state());
}

#[test]
fn distinct_structures_get_distinct_identifiers() {
    let corpus = [hydroxyl(), water(), dihydrogen(), hydrogen_atom()];
    let mut ids: Vec<SpeciesId> = corpus.iter()
                                        .map(|s| SpeciesId::derive(s, &DigestCanonicalizer).unwrap())
                                        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), corpus.len());
}

#[test]
fn structure_survives_json_round_trip() {
    let s = water();
    let json = serde_json::to_string(&s).unwrap();
    let back: Structure = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
    assert_eq!(back.bond_count(), 2);
}
