//! Estructuras de referencia construidas a mano (hidrógenos explícitos).
//!
//! Cubren la abstracción de H de etano por ·OH y la reacción identidad
//! CH4 + ·CH3 → ·CH3 + CH4. Se usan en pruebas y demostraciones.
use crate::{BondOrder, DomainError, Reaction, Structure};

fn build(smiles: &str, symmetry: u32, multiplicity: u32, f: impl FnOnce(&mut Structure) -> Result<(), DomainError>) -> Structure {
    let mut s = Structure::new(smiles).with_symmetry_number(symmetry)
                                      .with_multiplicity(multiplicity);
    // Las construcciones de abajo usan índices válidos por construcción.
    if let Err(e) = f(&mut s) {
        panic!("fixture '{smiles}' inválida: {e}");
    }
    s
}

pub fn ethane() -> Structure {
    build("CC", 18, 1, |s| {
        let c1 = s.add_atom("C");
        let c2 = s.add_atom("C");
        s.add_bond(c1, c2, BondOrder::Single)?;
        s.add_hydrogens(c1, 3)?;
        s.add_hydrogens(c2, 3)
    })
}

pub fn hydroxyl() -> Structure {
    build("[OH]", 1, 2, |s| {
        let o = s.add_atom("O");
        s.add_hydrogens(o, 1)
    })
}

pub fn ethyl() -> Structure {
    build("C[CH2]", 6, 2, |s| {
        let c1 = s.add_atom("C");
        let c2 = s.add_atom("C");
        s.add_bond(c1, c2, BondOrder::Single)?;
        s.add_hydrogens(c1, 3)?;
        s.add_hydrogens(c2, 2)
    })
}

pub fn water() -> Structure {
    build("O", 2, 1, |s| {
        let o = s.add_atom("O");
        s.add_hydrogens(o, 2)
    })
}

pub fn methane() -> Structure {
    build("C", 12, 1, |s| {
        let c = s.add_atom("C");
        s.add_hydrogens(c, 4)
    })
}

pub fn methyl() -> Structure {
    build("[CH3]", 6, 2, |s| {
        let c = s.add_atom("C");
        s.add_hydrogens(c, 3)
    })
}

/// CH3-CH2···H···OH
pub fn ethane_oh_ts() -> Structure {
    build("", 1, 2, |s| {
        let c1 = s.add_atom("C");
        let c2 = s.add_atom("C");
        s.add_bond(c1, c2, BondOrder::Single)?;
        s.add_hydrogens(c1, 3)?;
        s.add_hydrogens(c2, 2)?;
        let h = s.add_atom("H");
        s.add_bond(c2, h, BondOrder::Single)?;
        let o = s.add_atom("O");
        s.add_bond(h, o, BondOrder::Single)?;
        s.add_hydrogens(o, 1)
    })
}

/// H3C···H···CH3
pub fn methane_methyl_ts() -> Structure {
    build("", 6, 2, |s| {
        let c1 = s.add_atom("C");
        let c2 = s.add_atom("C");
        s.add_hydrogens(c1, 3)?;
        s.add_hydrogens(c2, 3)?;
        let h = s.add_atom("H");
        s.add_bond(c1, h, BondOrder::Single)?;
        s.add_bond(h, c2, BondOrder::Single)
    })
}

/// CC + [OH] <=> C[CH2] + O
pub fn ethane_h_abstraction() -> Reaction {
    Reaction::new("CC+[OH]_C[CH2]+O",
                  vec![ethane(), hydroxyl()],
                  vec![ethyl(), water()],
                  ethane_oh_ts()).unwrap_or_else(|e| panic!("reacción de referencia inválida: {e}"))
}

/// C + [CH3] <=> [CH3] + C
pub fn methyl_identity() -> Reaction {
    Reaction::new("C+[CH3]_[CH3]+C",
                  vec![methane(), methyl()],
                  vec![methyl(), methane()],
                  methane_methyl_ts()).unwrap_or_else(|e| panic!("reacción de referencia inválida: {e}"))
}
