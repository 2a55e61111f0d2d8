use kin_core::{ArtifactError, CalcStage};
use kinengine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// Errores fatales del orquestador. Cada variante identifica la reacción y la
/// etapa en la que falló la corrida.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("reaction '{reaction}' [artifacts]: {source}")]
    Artifact {
        reaction: String,
        #[source]
        source: ArtifactError,
    },
    #[error("reaction '{reaction}' [invocation]: {source}")]
    Engine {
        reaction: String,
        #[source]
        source: EngineError,
    },
    #[error("reaction '{reaction}' [invocation]: engine produced no kinetics job")]
    MissingKinetics { reaction: String },
    #[error("job descriptor '{}' not found; call generate_all first", .path.display())]
    MissingDescriptor { path: PathBuf },
    #[error("reaction '{reaction}' [reconciliation]: species '{smiles}' has no match in the kinetics result")]
    Unmatched { reaction: String, smiles: String },
    #[error("reaction '{reaction}' [reconciliation]: retained kinetics result belongs to '{result}'")]
    ResultMismatch { reaction: String, result: String },
    #[error("invalid stage: expected {expected}, found {found}")]
    InvalidState { expected: CalcStage, found: CalcStage },
    #[error("configuration: {0}")]
    Config(String),
}

impl CalcError {
    /// Etapa a la que pertenece el error, para el evento `StageFailed`.
    pub fn stage(&self) -> &'static str {
        match self {
            CalcError::Artifact { source: ArtifactError::Classification(_), .. } => "classification",
            CalcError::Artifact { .. } => "rendering",
            CalcError::Engine { .. } | CalcError::MissingKinetics { .. } | CalcError::MissingDescriptor { .. } => "invocation",
            CalcError::Unmatched { .. } | CalcError::ResultMismatch { .. } | CalcError::InvalidState { .. } => "reconciliation",
            CalcError::Config(_) => "configuration",
        }
    }
}
