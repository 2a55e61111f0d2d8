//! Registro de eventos de una corrida de cálculo (append-only).

pub mod store;
pub mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{ArtifactRole, CalcEvent, CalcEventKind, CalcStage};
