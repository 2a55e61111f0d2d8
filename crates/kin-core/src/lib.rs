//! kin-core: clasificación estructural y generación de los archivos de
//! entrada de CanTherm.
//!
//! - `classify`: conteos de átomos y de tipos de enlace.
//! - `render`: documentos de especie/estado de transición y descriptor.
//! - `writer`: escritura en disco con fingerprint de contenido.
//! - `event`: registro append-only de una corrida.
pub mod classify;
pub mod constants;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod render;
pub mod writer;

pub use classify::{classify, classify_atoms, classify_bonds, BondTable, Classification, UnclassifiedBondPolicy};
pub use errors::{ArtifactError, ClassifyError};
pub use event::{ArtifactRole, CalcEvent, CalcEventKind, CalcStage, EventStore, InMemoryEventStore};
pub use render::{JobDescriptor, SpeciesDeclaration, StatMechDocument};
pub use writer::{require_bimolecular, ArtifactWriter, WrittenArtifact};
