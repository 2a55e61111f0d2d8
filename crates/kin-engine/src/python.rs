//! Puente con Python embebido: RDKit para las claves canónicas y
//! `rmgpy.cantherm` como motor de cinética.
use log::{debug, warn};
use pyo3::ffi::c_str;
use pyo3::prelude::*;
use pyo3::types::PyModule;
use serde::Deserialize;
use std::env;
use std::ffi::CString;
use std::sync::OnceLock;

use crate::{Canonicalizer, EngineError, EngineJob, EngineRequest, KineticsEngine};

static WRAPPER_MODULE: OnceLock<Py<PyModule>> = OnceLock::new();

/// Carga el wrapper de Python una sola vez. Si `KINFLOW_PYTHONPATH` está
/// definido (también vía `.env`) se antepone a `sys.path`.
pub fn init_python() -> Result<(), EngineError> {
    if WRAPPER_MODULE.get().is_some() {
        return Ok(());
    }
    dotenvy::dotenv().ok();
    Python::attach(|py| {
        if let Ok(extra) = env::var("KINFLOW_PYTHONPATH") {
            let sys = py.import("sys")?;
            sys.getattr("path")?.call_method1("insert", (0, extra))?;
        }
        let code = CString::new(include_str!("../python/cantherm_wrapper.py"))?;
        let module = PyModule::from_code(py,
                                         code.as_c_str(),
                                         c_str!("cantherm_wrapper.py"),
                                         c_str!("cantherm_wrapper"))?;
        WRAPPER_MODULE.set(module.unbind()).ok();
        Ok::<(), PyErr>(())
    }).map_err(|e| EngineError::Init(e.to_string()))
}

fn get_module(py: Python<'_>) -> PyResult<Py<PyModule>> {
    WRAPPER_MODULE.get().map(|module| module.clone_ref(py)).ok_or_else(|| {
        PyErr::new::<pyo3::exceptions::PyRuntimeError, _>("init_python() debe llamarse antes de usar el wrapper")
    })
}

/// Canonicalizador basado en RDKit (SMILES → InChI → InChIKey).
pub struct RdkitCanonicalizer {
    _private: (),
}

impl RdkitCanonicalizer {
    pub fn init() -> Result<Self, EngineError> {
        init_python()?;
        Ok(Self { _private: () })
    }
}

impl Canonicalizer for RdkitCanonicalizer {
    fn inchikey(&self, smiles: &str) -> Result<String, EngineError> {
        let key: Option<String> = Python::attach(|py| {
                                      let module = get_module(py)?;
                                      module.bind(py).getattr("molecule_key")?.call1((smiles,))?.extract()
                                  }).map_err(|e| EngineError::Canonical { smiles: smiles.to_string(),
                                                                          reason: e.to_string() })?;
        key.ok_or_else(|| EngineError::Canonical { smiles: smiles.to_string(),
                                                   reason: "RDKit no pudo interpretar el SMILES".to_string() })
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ReportedError {
    Render { message: String },
    Execution { message: String },
}

#[derive(Debug, Deserialize)]
struct RunReport {
    error: Option<ReportedError>,
    jobs: Vec<EngineJob>,
}

/// Motor CanTherm de RMG ejecutado dentro del intérprete embebido.
pub struct PyCanTherm {
    jobs: Vec<EngineJob>,
}

impl PyCanTherm {
    pub fn init() -> Result<Self, EngineError> {
        init_python()?;
        Ok(Self { jobs: Vec::new() })
    }
}

impl KineticsEngine for PyCanTherm {
    fn execute(&mut self, request: &EngineRequest) -> Result<(), EngineError> {
        let input = request.input_file.to_string_lossy().into_owned();
        let output = request.output_directory.to_string_lossy().into_owned();
        let json_str: String = Python::attach(|py| {
                                   let module = get_module(py)?;
                                   module.bind(py).getattr("run_cantherm")?.call1((input, output, request.plot))?.extract()
                               }).map_err(|e| EngineError::Execution(e.to_string()))?;
        let report: RunReport = serde_json::from_str(&json_str)?;
        self.jobs = report.jobs;
        match report.error {
            None => {
                debug!("cantherm: {} jobs completados", self.jobs.len());
                Ok(())
            }
            Some(ReportedError::Render { message }) => {
                warn!("cantherm: fallo de renderizado: {message}");
                Err(EngineError::Render(message))
            }
            Some(ReportedError::Execution { message }) => {
                warn!("cantherm: fallo de ejecución: {message}");
                Err(EngineError::Execution(message))
            }
        }
    }

    fn jobs(&self) -> &[EngineJob] {
        &self.jobs
    }
}
