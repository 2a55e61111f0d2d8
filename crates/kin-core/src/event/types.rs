//! Tipos de evento de una corrida y etapas del orquestador.
//!
//! Rol en el flujo:
//! - El orquestador emite un evento por cada transición observable
//!   (artefacto escrito, motor invocado, fallo recuperado, ...).
//! - La secuencia permite auditar qué se generó y con qué contenido
//!   (`fingerprint` blake3) sin releer los archivos.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Papel de un artefacto generado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactRole {
    Species,
    TransitionState,
    JobDescriptor,
}

/// Etapas del orquestador.
///
/// `Created → ArtifactsWritten → Executed → Reconciled`; cualquier error
/// fatal lleva a `Failed`. Regenerar artefactos es válido desde cualquier
/// etapa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalcStage {
    Created,
    ArtifactsWritten,
    Executed,
    Reconciled,
    Failed,
}

impl fmt::Display for CalcStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalcStage::Created => "created",
            CalcStage::ArtifactsWritten => "artifacts_written",
            CalcStage::Executed => "executed",
            CalcStage::Reconciled => "reconciled",
            CalcStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalcEventKind {
    /// Primer evento de una corrida; fija el fingerprint de la configuración.
    CalculationStarted { reaction: String, config_fingerprint: String },
    /// Un artefacto se escribió (o sobrescribió) en disco.
    ArtifactWritten {
        role: ArtifactRole,
        name: String,
        path: String,
        fingerprint: String,
    },
    EngineInvoked { input_file: String },
    /// Fallo de gráficos del motor tratado como no fatal.
    RenderFailureRecovered { message: String },
    KineticsExtracted { reaction: String, job_count: usize },
    /// Estructura sin especie correspondiente en el resultado.
    SpeciesUnmatched { smiles: String },
    Reconciled { matched: usize, unmatched: usize },
    StageFailed { stage: CalcStage, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcEvent {
    pub seq: u64,
    pub run_id: Uuid,
    pub kind: CalcEventKind,
    pub ts: DateTime<Utc>,
}
