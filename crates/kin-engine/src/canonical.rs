//! Canonicalización estructura → clave InChIKey.
use sha2::{Digest, Sha256};

use crate::EngineError;

/// Deriva una clave canónica (con forma de InChIKey) a partir de un SMILES.
pub trait Canonicalizer {
    fn inchikey(&self, smiles: &str) -> Result<String, EngineError>;
}

impl<C: Canonicalizer + ?Sized> Canonicalizer for &C {
    fn inchikey(&self, smiles: &str) -> Result<String, EngineError> {
        (**self).inchikey(smiles)
    }
}

/// Canonicalizador determinista sin dependencias externas.
///
/// Produce `XXXXXXXXXXXXXX-YYYYYYYYSA-N` a partir del SHA-256 del SMILES: 14
/// letras para el "esqueleto", 8 letras + `SA` como bloque estándar y `N`
/// como indicador de protonación, igual que una InChIKey estándar. No
/// normaliza SMILES equivalentes escritos de forma distinta.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestCanonicalizer;

fn letters(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(b'A' + b % 26)).collect()
}

impl Canonicalizer for DigestCanonicalizer {
    fn inchikey(&self, smiles: &str) -> Result<String, EngineError> {
        let smiles = smiles.trim();
        if smiles.is_empty() {
            return Err(EngineError::Canonical { smiles: smiles.to_string(),
                                                reason: "SMILES vacío".to_string() });
        }
        let digest = Sha256::digest(smiles.as_bytes());
        Ok(format!("{}-{}SA-N", letters(&digest[..14]), letters(&digest[14..22])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_key_has_inchikey_shape() {
        let key = DigestCanonicalizer.inchikey("CC").unwrap();
        assert_eq!(key.len(), 27);
        assert_eq!(key.matches('-').count(), 2);
        assert!(key.ends_with("SA-N"));
        assert!(key.chars().filter(|c| *c != '-').all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn digest_key_is_deterministic_and_distinguishes_inputs() {
        let a = DigestCanonicalizer.inchikey("CC").unwrap();
        let b = DigestCanonicalizer.inchikey("CC").unwrap();
        let c = DigestCanonicalizer.inchikey("C[CH2]").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_smiles_is_rejected() {
        assert!(DigestCanonicalizer.inchikey("   ").is_err());
    }
}
