//! Configuración del cálculo.
//! Carga variables de entorno (.env) una sola vez y construye un `CalcConfig`
//! con valores por defecto razonables para cualquier variable ausente.
use kin_core::hashing::hash_value;
use kin_core::UnclassifiedBondPolicy;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::CalcError;

pub const DEFAULT_MODEL_CHEMISTRY: &str = "M06-2X/cc-pVTZ";
pub const DEFAULT_FREQ_SCALE_FACTOR: f64 = 0.982;

/// Carga perezosa de `.env`, evaluada una sola vez por proceso.
static DOTENV: Lazy<()> = Lazy::new(|| {
    if dotenvy::dotenv().is_ok() {
        log::debug!("config: .env cargado");
    }
});

/// Qué hacer cuando una estructura no encuentra su especie en el resultado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReconcileMode {
    /// `warn!` + evento `SpeciesUnmatched`; la estructura queda sin ligar.
    #[default]
    Lenient,
    /// `CalcError::Unmatched`; la reacción no se modifica.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Donde se escriben los artefactos y el descriptor.
    pub scratch_dir: PathBuf,
    /// Directorio que recibe el motor para sus propios productos.
    pub output_dir: PathBuf,
    pub model_chemistry: String,
    pub freq_scale_factor: f64,
    pub reconcile_mode: ReconcileMode,
    pub unclassified_bonds: UnclassifiedBondPolicy,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self { scratch_dir: PathBuf::from("scratch"),
               output_dir: PathBuf::from("output"),
               model_chemistry: DEFAULT_MODEL_CHEMISTRY.to_string(),
               freq_scale_factor: DEFAULT_FREQ_SCALE_FACTOR,
               reconcile_mode: ReconcileMode::default(),
               unclassified_bonds: UnclassifiedBondPolicy::default() }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl CalcConfig {
    /// Lee `KINFLOW_*` del entorno (y de `.env`). Valores ausentes o no
    /// interpretables caen en el valor por defecto.
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(dir) = lookup("KINFLOW_SCRATCH_DIR").filter(|v| !v.trim().is_empty()) {
            cfg.scratch_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("KINFLOW_OUTPUT_DIR").filter(|v| !v.trim().is_empty()) {
            cfg.output_dir = PathBuf::from(dir);
        }
        if let Some(mc) = lookup("KINFLOW_MODEL_CHEMISTRY").filter(|v| !v.trim().is_empty()) {
            cfg.model_chemistry = mc.trim().to_string();
        }
        if let Some(f) = lookup("KINFLOW_FREQ_SCALE_FACTOR").and_then(|v| v.trim().parse().ok()) {
            cfg.freq_scale_factor = f;
        }
        if let Some(true) = lookup("KINFLOW_STRICT_RECONCILE").as_deref().and_then(parse_flag) {
            cfg.reconcile_mode = ReconcileMode::Strict;
        }
        match lookup("KINFLOW_UNCLASSIFIED_BONDS").map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("skip") => cfg.unclassified_bonds = UnclassifiedBondPolicy::Skip,
            Some("fail") | None => {}
            Some(other) => log::warn!("config: KINFLOW_UNCLASSIFIED_BONDS='{other}' no reconocido; se usa 'fail'"),
        }
        cfg
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_model_chemistry(mut self, model_chemistry: impl Into<String>) -> Self {
        self.model_chemistry = model_chemistry.into();
        self
    }

    pub fn with_freq_scale_factor(mut self, factor: f64) -> Self {
        self.freq_scale_factor = factor;
        self
    }

    pub fn with_reconcile_mode(mut self, mode: ReconcileMode) -> Self {
        self.reconcile_mode = mode;
        self
    }

    pub fn with_unclassified_bonds(mut self, policy: UnclassifiedBondPolicy) -> Self {
        self.unclassified_bonds = policy;
        self
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        if self.model_chemistry.trim().is_empty() {
            return Err(CalcError::Config("model chemistry must not be empty".to_string()));
        }
        if !self.freq_scale_factor.is_finite() || self.freq_scale_factor <= 0.0 {
            return Err(CalcError::Config(format!("frequency scale factor must be positive, got {}",
                                                 self.freq_scale_factor)));
        }
        Ok(())
    }

    /// blake3 del JSON canónico de la configuración.
    pub fn fingerprint(&self) -> String {
        match serde_json::to_value(self) {
            Ok(value) => hash_value(&value),
            // Sólo falla con claves no textuales; no es el caso de este struct.
            Err(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = CalcConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, CalcConfig::default());
        assert_eq!(cfg.model_chemistry, "M06-2X/cc-pVTZ");
        assert_eq!(cfg.freq_scale_factor, 0.982);
        assert_eq!(cfg.reconcile_mode, ReconcileMode::Lenient);
        assert_eq!(cfg.unclassified_bonds, UnclassifiedBondPolicy::Fail);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = CalcConfig::from_lookup(lookup(&[("KINFLOW_SCRATCH_DIR", "/tmp/s"),
                                                   ("KINFLOW_OUTPUT_DIR", "/tmp/o"),
                                                   ("KINFLOW_MODEL_CHEMISTRY", "CBS-QB3"),
                                                   ("KINFLOW_FREQ_SCALE_FACTOR", "0.99"),
                                                   ("KINFLOW_STRICT_RECONCILE", "true"),
                                                   ("KINFLOW_UNCLASSIFIED_BONDS", "Skip")]));
        assert_eq!(cfg.scratch_dir, PathBuf::from("/tmp/s"));
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/o"));
        assert_eq!(cfg.model_chemistry, "CBS-QB3");
        assert_eq!(cfg.freq_scale_factor, 0.99);
        assert_eq!(cfg.reconcile_mode, ReconcileMode::Strict);
        assert_eq!(cfg.unclassified_bonds, UnclassifiedBondPolicy::Skip);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let cfg = CalcConfig::from_lookup(lookup(&[("KINFLOW_FREQ_SCALE_FACTOR", "abc"),
                                                   ("KINFLOW_STRICT_RECONCILE", "quizás"),
                                                   ("KINFLOW_UNCLASSIFIED_BONDS", "ignore")]));
        assert_eq!(cfg, CalcConfig::default());
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(CalcConfig::default().validate().is_ok());
        assert!(matches!(CalcConfig::default().with_model_chemistry(" ").validate(),
                         Err(CalcError::Config(_))));
        assert!(CalcConfig::default().with_freq_scale_factor(0.0).validate().is_err());
        assert!(CalcConfig::default().with_freq_scale_factor(f64::NAN).validate().is_err());
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = CalcConfig::default();
        assert_eq!(a.fingerprint(), CalcConfig::default().fingerprint());
        assert_ne!(a.fingerprint(), a.clone().with_freq_scale_factor(0.95).fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
