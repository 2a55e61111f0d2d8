//! Contrato del motor de cinética (CanTherm).
use std::path::PathBuf;

use crate::{EngineError, EngineJob};

/// Parámetros de una invocación del motor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRequest {
    /// Descriptor de job de nivel superior.
    pub input_file: PathBuf,
    /// Directorio donde el motor deja sus propios productos.
    pub output_directory: PathBuf,
    pub plot: bool,
}

/// Motor externo, bloqueante y sin timeout.
///
/// La lista de jobs sigue siendo consultable después de un `execute` fallido:
/// el motor la construye al leer la entrada, antes de calcular.
pub trait KineticsEngine {
    fn execute(&mut self, request: &EngineRequest) -> Result<(), EngineError>;
    fn jobs(&self) -> &[EngineJob];
}

impl<E: KineticsEngine + ?Sized> KineticsEngine for Box<E> {
    fn execute(&mut self, request: &EngineRequest) -> Result<(), EngineError> {
        (**self).execute(request)
    }
    fn jobs(&self) -> &[EngineJob] {
        (**self).jobs()
    }
}
