//! Errores del clasificador y de la generación de artefactos.
use kin_domain::{BondOrder, DomainError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ClassifyError {
    #[error("unclassified {order} bond {first}{}{second} in '{smiles}'", .order.symbol())]
    UnclassifiedBond {
        smiles: String,
        order: BondOrder,
        first: String,
        second: String,
    },
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("classification: {0}")]
    Classification(#[from] ClassifyError),
    #[error("identifier: {0}")]
    Identifier(#[from] DomainError),
    #[error("reaction '{reaction}' has {reactants} reactants and {products} products (expected 2 and 2)")]
    Cardinality {
        reaction: String,
        reactants: usize,
        products: usize,
    },
    #[error("rendering '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
