//! Modelo de los jobs completados que reporta el motor.
//!
//! El motor devuelve una lista heterogénea de jobs; aquí se modela como una
//! unión etiquetada (`type`) para que el orquestador pueda hacer pattern
//! matching en lugar de inspeccionar tipos en tiempo de ejecución.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineJob {
    /// Job de mecánica estadística sobre una especie o estado de transición.
    #[serde(rename = "statmech")]
    StatMech { species: String },
    /// Job de cinética sobre una reacción.
    Kinetics(KineticsJob),
    /// Cualquier otro job (termo, presión, ...) que no interesa aquí.
    Other { name: String },
}

impl EngineJob {
    pub fn as_kinetics(&self) -> Option<&KineticsJob> {
        match self {
            EngineJob::Kinetics(job) => Some(job),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticsJob {
    pub reaction: ResultReaction,
}

/// Reacción tal como la reconstruye el motor a partir del descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultReaction {
    pub label: String,
    pub reactants: Vec<ResultSpecies>,
    pub products: Vec<ResultSpecies>,
    #[serde(default)]
    pub transition_state: Option<String>,
    #[serde(default)]
    pub tunneling: Option<String>,
    #[serde(default)]
    pub kinetics: Option<ArrheniusFit>,
}

/// Especie calculada; `label` es el que se declaró en el descriptor (SMILES).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSpecies {
    pub label: String,
}

/// Ajuste Arrhenius modificado k(T) = A (T/T0)^n exp(-Ea/RT), unidades SI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrheniusFit {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "A_units", default)]
    pub a_units: String,
    pub n: f64,
    /// J/mol
    #[serde(rename = "Ea")]
    pub ea: f64,
    /// K
    #[serde(rename = "T0", default = "default_t0")]
    pub t0: f64,
}

fn default_t0() -> f64 {
    1.0
}

impl ArrheniusFit {
    /// Evalúa la constante de velocidad a la temperatura `t` (K).
    pub fn rate_at(&self, t: f64) -> f64 {
        const R: f64 = 8.314_462_618;
        self.a * (t / self.t0).powf(self.n) * (-self.ea / (R * t)).exp()
    }
}
