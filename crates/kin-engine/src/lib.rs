//! kinengine: frontera con los colaboradores externos del cálculo.
//!
//! - `Canonicalizer`: SMILES → InChIKey (RDKit en producción, digest en
//!   pruebas).
//! - `KineticsEngine`: ejecuta un job de CanTherm a partir de un archivo de
//!   entrada y expone la lista de jobs resultantes como variantes etiquetadas.
//!
//! El puente con Python embebido vive detrás de la feature `python`.
use thiserror::Error;

pub mod canonical;
pub mod cantherm;
pub mod job;
pub mod mock;
#[cfg(feature = "python")]
pub mod python;

pub use canonical::{Canonicalizer, DigestCanonicalizer};
pub use cantherm::{EngineRequest, KineticsEngine};
pub use job::{ArrheniusFit, EngineJob, KineticsJob, ResultReaction, ResultSpecies};
pub use mock::{MockEngine, ScriptedFailure};
#[cfg(feature = "python")]
pub use python::{PyCanTherm, RdkitCanonicalizer};

#[derive(Debug, Error)]
pub enum EngineError {
    /// Fallo conocido del paso opcional de gráficos (backend Cairo ausente,
    /// etc.). El resultado numérico puede seguir siendo válido.
    #[error("Error de renderizado (no fatal): {0}")]
    Render(String),
    #[error("Error de ejecución del motor: {0}")]
    Execution(String),
    #[error("Error inicializando Python: {0}")]
    Init(String),
    #[error("No se pudo canonicalizar '{smiles}': {reason}")]
    Canonical { smiles: String, reason: String },
    #[error("Error de deserialización: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl EngineError {
    /// Indica si el error pertenece a la clase recuperable (gráficos).
    pub fn is_render_failure(&self) -> bool {
        matches!(self, EngineError::Render(_))
    }
}
