//! Reacción: estructuras de reactivos/productos, estado de transición y el
//! objeto de datos subyacente (especies) que la reconciliación reemplaza.
use kinengine::ArrheniusFit;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DomainError, Structure};

/// Especie del objeto de datos: etiqueta más las estructuras ligadas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub label: String,
    pub molecules: Vec<Structure>,
}

impl Species {
    /// Especie con una única estructura, etiquetada por su SMILES.
    pub fn from_structure(structure: &Structure) -> Self {
        Self { label: structure.smiles().to_string(),
               molecules: vec![structure.clone()] }
    }
}

/// Objeto de datos de la reacción. Antes del cálculo sólo contiene las
/// especies; tras reconciliar incorpora lo que reportó el motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionData {
    pub label: String,
    pub reactants: Vec<Species>,
    pub products: Vec<Species>,
    pub transition_state: Option<String>,
    pub tunneling: Option<String>,
    pub kinetics: Option<ArrheniusFit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    label: String,
    reactants: Vec<Structure>,
    products: Vec<Structure>,
    transition_state: Structure,
    data: ReactionData,
}

impl Reaction {
    /// Crea una reacción y su objeto de datos inicial.
    ///
    /// La cardinalidad no se valida aquí: la comprueban los escritores antes
    /// de generar cualquier archivo.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si la etiqueta está vacía o contiene
    /// separadores de ruta.
    pub fn new(label: &str,
               reactants: Vec<Structure>,
               products: Vec<Structure>,
               transition_state: Structure)
               -> Result<Self, DomainError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(DomainError::ValidationError("La etiqueta de la reacción no puede estar vacía".to_string()));
        }
        if label.contains(['/', '\\']) {
            return Err(DomainError::ValidationError(format!("La etiqueta '{label}' no puede contener separadores de ruta")));
        }
        let data = ReactionData { label: label.to_string(),
                                  reactants: reactants.iter().map(Species::from_structure).collect(),
                                  products: products.iter().map(Species::from_structure).collect(),
                                  transition_state: None,
                                  tunneling: None,
                                  kinetics: None };
        Ok(Reaction { label: label.to_string(),
                      reactants,
                      products,
                      transition_state,
                      data })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn reactants(&self) -> &[Structure] {
        &self.reactants
    }
    pub fn products(&self) -> &[Structure] {
        &self.products
    }
    pub fn transition_state(&self) -> &Structure {
        &self.transition_state
    }
    pub fn data(&self) -> &ReactionData {
        &self.data
    }

    /// Reactivos seguidos de productos.
    pub fn species_structures(&self) -> impl Iterator<Item = &Structure> {
        self.reactants.iter().chain(self.products.iter())
    }

    /// Devuelve una nueva reacción con el objeto de datos reemplazado.
    pub fn with_data(self, data: ReactionData) -> Self {
        Reaction { data, ..self }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |items: &[Structure]| items.iter().map(|s| s.smiles()).collect::<Vec<_>>().join(" + ");
        write!(f, "{}: {} <=> {}", self.label, side(&self.reactants), side(&self.products))
    }
}
