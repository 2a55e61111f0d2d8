// kin-domain library entry point
pub mod element;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod reaction;
pub mod species_id;
pub mod structure;
pub use element::Element;
pub use error::DomainError;
pub use reaction::{Reaction, ReactionData, Species};
pub use species_id::SpeciesId;
pub use structure::{Atom, BondOrder, Structure};
