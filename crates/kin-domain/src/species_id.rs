//! Identificador determinista de especie.
//!
//! Se deriva de la InChIKey del SMILES canónico quitando el sufijo de
//! protonación estándar `-N`. Se usa como nombre de archivo de los artefactos
//! (`<id>.py`, `<id>.log`) y como clave de deduplicación del descriptor.
use kinengine::Canonicalizer;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DomainError, Structure};

/// Sufijo de protonación estándar de una InChIKey.
pub const STANDARD_SUFFIX: &str = "-N";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeciesId(String);

impl SpeciesId {
    /// Deriva el identificador de `structure`.
    ///
    /// # Errores
    /// `DomainError::MalformedStructure` si el SMILES está vacío, si el
    /// canonicalizador falla, si la clave no tiene forma de InChIKey o si
    /// queda vacía tras quitar el sufijo.
    pub fn derive<C: Canonicalizer + ?Sized>(structure: &Structure, canonicalizer: &C) -> Result<Self, DomainError> {
        let smiles = structure.smiles();
        if smiles.trim().is_empty() {
            return Err(DomainError::MalformedStructure { smiles: smiles.to_string(),
                                                         reason: "la estructura no tiene SMILES".to_string() });
        }
        let key = canonicalizer.inchikey(smiles)?;
        Self::from_inchikey(smiles, &key)
    }

    /// Normaliza una InChIKey ya calculada.
    pub fn from_inchikey(smiles: &str, inchikey: &str) -> Result<Self, DomainError> {
        let normalized = inchikey.trim().to_uppercase();
        if normalized.len() != 27 || normalized.matches('-').count() < 2 {
            return Err(DomainError::MalformedStructure { smiles: smiles.to_string(),
                                                         reason: format!("InChIKey inválida '{inchikey}'") });
        }
        let stem = normalized.strip_suffix(STANDARD_SUFFIX).unwrap_or(&normalized);
        if stem.is_empty() {
            return Err(DomainError::MalformedStructure { smiles: smiles.to_string(),
                                                         reason: "identificador vacío tras quitar el sufijo".to_string() });
        }
        Ok(SpeciesId(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
