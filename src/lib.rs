//! kinflow
//!
//! Prepara y conduce un cálculo de cinética de CanTherm para una reacción
//! bimolecular:
//! - `config`: configuración desde el entorno (.env) o por builder.
//! - `calculator`: orquestador `generate_all` → `run` → `reconcile`.
//! - `errors`: `CalcError`, que identifica reacción, especie y etapa.

pub mod calculator;
pub mod config;
pub mod errors;

pub use calculator::CanthermCalculator;
pub use config::{CalcConfig, ReconcileMode};
pub use errors::CalcError;
