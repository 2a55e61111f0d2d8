//! Grafo molecular mínimo: átomos, enlaces con orden, número de simetría,
//! multiplicidad de espín y SMILES canónico.
//!
//! Cada enlace se guarda en la lista de adyacencia de sus dos extremos, de
//! modo que recorrer los enlaces átomo por átomo visita cada enlace dos veces
//! (ver `bond_incidences`). El clasificador es quien deduplica.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{DomainError, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
}

impl BondOrder {
    /// Símbolo usado en las etiquetas de tipo de enlace (`C-H`, `C=O`, `N#N`).
    pub fn symbol(self) -> char {
        match self {
            BondOrder::Single => '-',
            BondOrder::Double => '=',
            BondOrder::Triple => '#',
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BondOrder::Single => "single",
            BondOrder::Double => "double",
            BondOrder::Triple => "triple",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    symbol: String,
    /// vecino → orden de enlace
    bonds: BTreeMap<usize, BondOrder>,
}

impl Atom {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
    pub fn element(&self) -> Option<Element> {
        Element::from_symbol(&self.symbol)
    }
    pub fn bonds(&self) -> &BTreeMap<usize, BondOrder> {
        &self.bonds
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    smiles: String,
    atoms: Vec<Atom>,
    symmetry_number: u32,
    multiplicity: u32,
}

impl Structure {
    /// Estructura vacía; simetría y multiplicidad empiezan en 1.
    pub fn new(smiles: impl Into<String>) -> Self {
        Self { smiles: smiles.into(),
               atoms: Vec::new(),
               symmetry_number: 1,
               multiplicity: 1 }
    }

    pub fn with_symmetry_number(mut self, symmetry_number: u32) -> Self {
        self.symmetry_number = symmetry_number;
        self
    }

    pub fn with_multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    /// Añade un átomo y devuelve su índice.
    pub fn add_atom(&mut self, symbol: &str) -> usize {
        self.atoms.push(Atom { symbol: symbol.to_string(),
                               bonds: BTreeMap::new() });
        self.atoms.len() - 1
    }

    /// Enlaza `a` y `b` (simétrico).
    ///
    /// # Errores
    /// `DomainError::ValidationError` si algún índice no existe, si `a == b`
    /// o si el enlace ya existe.
    pub fn add_bond(&mut self, a: usize, b: usize, order: BondOrder) -> Result<(), DomainError> {
        if a >= self.atoms.len() || b >= self.atoms.len() {
            return Err(DomainError::ValidationError(format!("Índice de átomo fuera de rango en enlace {a}-{b} ({} átomos)",
                                                            self.atoms.len())));
        }
        if a == b {
            return Err(DomainError::ValidationError(format!("Un átomo no puede enlazarse consigo mismo ({a})")));
        }
        if self.atoms[a].bonds.contains_key(&b) {
            return Err(DomainError::ValidationError(format!("Enlace duplicado {a}-{b}")));
        }
        self.atoms[a].bonds.insert(b, order);
        self.atoms[b].bonds.insert(a, order);
        Ok(())
    }

    /// Añade `count` hidrógenos unidos por enlace simple a `atom`.
    pub fn add_hydrogens(&mut self, atom: usize, count: usize) -> Result<(), DomainError> {
        for _ in 0..count {
            let h = self.add_atom("H");
            self.add_bond(atom, h, BondOrder::Single)?;
        }
        Ok(())
    }

    pub fn smiles(&self) -> &str {
        &self.smiles
    }
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }
    pub fn symmetry_number(&self) -> u32 {
        self.symmetry_number
    }
    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    /// Número de enlaces distintos.
    pub fn bond_count(&self) -> usize {
        self.atoms.iter().map(|a| a.bonds.len()).sum::<usize>() / 2
    }

    /// Recorre los enlaces átomo por átomo: `(átomo, vecino, orden)`. Cada
    /// enlace aparece dos veces, una desde cada extremo.
    pub fn bond_incidences(&self) -> impl Iterator<Item = (usize, usize, BondOrder)> + '_ {
        self.atoms
            .iter()
            .enumerate()
            .flat_map(|(i, atom)| atom.bonds.iter().map(move |(&j, &order)| (i, j, order)))
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<smiles: {}, átomos: {}, enlaces: {}>", self.smiles, self.atom_count(), self.bond_count())
    }
}
