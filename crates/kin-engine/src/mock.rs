//! Motor simulado: reproduce una lista de jobs guionizada y, opcionalmente,
//! un fallo. Útil para pruebas del orquestador sin Python.
use log::debug;
use std::path::Path;

use crate::{EngineError, EngineJob, EngineRequest, KineticsEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedFailure {
    Render,
    Execution,
}

#[derive(Debug, Default)]
pub struct MockEngine {
    scripted: Vec<EngineJob>,
    failure: Option<ScriptedFailure>,
    jobs: Vec<EngineJob>,
    requests: Vec<EngineRequest>,
}

impl MockEngine {
    pub fn new(scripted: Vec<EngineJob>) -> Self {
        Self { scripted,
               ..Self::default() }
    }

    pub fn failing_with(mut self, failure: ScriptedFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Peticiones recibidas, en orden.
    pub fn requests(&self) -> &[EngineRequest] {
        &self.requests
    }
}

impl KineticsEngine for MockEngine {
    fn execute(&mut self, request: &EngineRequest) -> Result<(), EngineError> {
        debug!("mock:execute input={} failure={:?}", request.input_file.display(), self.failure);
        self.requests.push(request.clone());
        if !Path::new(&request.input_file).is_file() {
            return Err(EngineError::Execution(format!("archivo de entrada no encontrado: {}",
                                                      request.input_file.display())));
        }
        // Igual que el motor real: la lista se carga antes de calcular.
        self.jobs = self.scripted.clone();
        match self.failure {
            Some(ScriptedFailure::Render) => Err(EngineError::Render("no se encontró backend Cairo".into())),
            Some(ScriptedFailure::Execution) => Err(EngineError::Execution("fallo simulado".into())),
            None => Ok(()),
        }
    }

    fn jobs(&self) -> &[EngineJob] {
        &self.jobs
    }
}
