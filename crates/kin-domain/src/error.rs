use kinengine::EngineError;
use thiserror::Error;

/// Errores del modelo de datos de la reacción.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Error de validación: {0}")]
    ValidationError(String),

    /// La estructura no produce un identificador canónico.
    #[error("Estructura malformada '{smiles}': {reason}")]
    MalformedStructure { smiles: String, reason: String },

    #[error("Error externo: {0}")]
    ExternalError(String),
}

impl From<EngineError> for DomainError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Canonical { smiles, reason } => DomainError::MalformedStructure { smiles, reason },
            other => DomainError::ExternalError(other.to_string()),
        }
    }
}
