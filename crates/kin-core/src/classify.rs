//! Clasificador estructural: conteo de átomos por elemento y de enlaces por
//! tipo (`C-H`, `C=O`, `N#N`, ...).
//!
//! La tabla de enlaces es simétrica: se indexa por `(orden, par ordenado de
//! elementos)`, así `C-H` y `H-C` caen en la misma entrada. Extender la
//! química soportada es insertar filas, no añadir ramas.
use kin_domain::{BondOrder, Element, Structure};
use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::errors::ClassifyError;

pub type AtomCounts = BTreeMap<Element, usize>;
pub type BondCounts = BTreeMap<String, usize>;

/// Qué hacer con un enlace cuyo `(orden, par)` no está en la tabla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnclassifiedBondPolicy {
    /// Error inmediato; no se genera artefacto.
    #[default]
    Fail,
    /// Se omite el enlace con un `warn!` y se contabiliza en
    /// `Classification::unclassified`.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct BondTable {
    labels: HashMap<(BondOrder, Element, Element), String>,
}

fn sorted(a: Element, b: Element) -> (Element, Element) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

static STANDARD_TABLE: Lazy<BondTable> = Lazy::new(|| {
    use BondOrder::*;
    use Element::*;
    let mut table = BondTable::default();
    let rows: [(BondOrder, Element, Element, &str); 23] = [(Single, C, C, "C-C"),
                                                           (Single, H, H, "H-H"),
                                                           (Single, C, H, "C-H"),
                                                           (Single, O, O, "O-O"),
                                                           (Single, C, O, "C-O"),
                                                           (Single, O, H, "O-H"),
                                                           (Single, N, N, "N-N"),
                                                           (Single, N, C, "N-C"),
                                                           (Single, N, O, "N-O"),
                                                           (Single, N, H, "N-H"),
                                                           (Single, S, S, "S-S"),
                                                           (Single, S, H, "S-H"),
                                                           (Single, C, S, "C-S"),
                                                           (Double, C, C, "C=C"),
                                                           (Double, O, O, "O=O"),
                                                           (Double, C, O, "C=O"),
                                                           (Double, N, N, "N=N"),
                                                           (Double, N, C, "N=C"),
                                                           (Double, N, O, "N=O"),
                                                           (Double, S, O, "S=O"),
                                                           (Triple, C, C, "C#C"),
                                                           (Triple, N, N, "N#N"),
                                                           (Triple, N, C, "N#C")];
    for (order, a, b, label) in rows {
        table.insert(order, a, b, label);
    }
    table
});

impl BondTable {
    /// Tabla estándar para la química C/H/O/N/S.
    pub fn standard() -> &'static BondTable {
        &STANDARD_TABLE
    }

    /// Inserta (o reemplaza) la etiqueta de `(order, {a, b})`.
    pub fn insert(&mut self, order: BondOrder, a: Element, b: Element, label: impl Into<String>) -> Option<String> {
        let (x, y) = sorted(a, b);
        self.labels.insert((order, x, y), label.into())
    }

    pub fn label(&self, order: BondOrder, a: Element, b: Element) -> Option<&str> {
        let (x, y) = sorted(a, b);
        self.labels.get(&(order, x, y)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Resultado de clasificar una estructura. Nunca contiene conteos en cero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub atoms: AtomCounts,
    pub bonds: BondCounts,
    /// Enlaces omitidos bajo `UnclassifiedBondPolicy::Skip`.
    pub unclassified: usize,
}

/// Cuenta átomos por elemento; los elementos no soportados no se categorizan.
pub fn classify_atoms(structure: &Structure) -> AtomCounts {
    let mut counts = AtomCounts::new();
    for element in structure.atoms().iter().filter_map(|a| a.element()) {
        *counts.entry(element).or_insert(0) += 1;
    }
    counts
}

/// Cuenta enlaces distintos por etiqueta.
///
/// Cada enlace se visita desde sus dos extremos; se cuenta una sola vez por
/// par no ordenado de índices.
pub fn classify_bonds(structure: &Structure,
                      table: &BondTable,
                      policy: UnclassifiedBondPolicy)
                      -> Result<(BondCounts, usize), ClassifyError> {
    let atoms = structure.atoms();
    let mut seen: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut counts = BondCounts::new();
    let mut skipped = 0;
    for (i, j, order) in structure.bond_incidences() {
        if !seen.insert((i.min(j), i.max(j))) {
            continue;
        }
        let (first, second) = (&atoms[i], &atoms[j]);
        let label = match (first.element(), second.element()) {
            (Some(a), Some(b)) => table.label(order, a, b),
            _ => None,
        };
        match (label, policy) {
            (Some(label), _) => *counts.entry(label.to_string()).or_insert(0) += 1,
            (None, UnclassifiedBondPolicy::Skip) => {
                warn!("skipping unclassified {order} bond {}{}{} in '{}'",
                      first.symbol(),
                      order.symbol(),
                      second.symbol(),
                      structure.smiles());
                skipped += 1;
            }
            (None, UnclassifiedBondPolicy::Fail) => {
                return Err(ClassifyError::UnclassifiedBond { smiles: structure.smiles().to_string(),
                                                             order,
                                                             first: first.symbol().to_string(),
                                                             second: second.symbol().to_string() })
            }
        }
    }
    Ok((counts, skipped))
}

pub fn classify(structure: &Structure,
                table: &BondTable,
                policy: UnclassifiedBondPolicy)
                -> Result<Classification, ClassifyError> {
    let (bonds, unclassified) = classify_bonds(structure, table, policy)?;
    Ok(Classification { atoms: classify_atoms(structure),
                        bonds,
                        unclassified })
}
