//! Orquestador de un cálculo CanTherm.
//!
//! Secuencia: `generate_all` escribe los artefactos de cada reactivo y
//! producto, el del estado de transición y el descriptor; `run` invoca el
//! motor sobre el descriptor y retiene el job de cinética; `reconcile`
//! devuelve una nueva `Reaction` con las especies del resultado ligadas a
//! sus estructuras originales.
//!
//! Cada transición queda registrada en el `EventStore` de la corrida.
use kin_core::{require_bimolecular, ArtifactError, ArtifactWriter, BondTable, CalcEvent, CalcEventKind, CalcStage, EventStore,
               InMemoryEventStore, WrittenArtifact};
use kin_domain::{Reaction, ReactionData, Species, Structure};
use kinengine::{Canonicalizer, EngineJob, EngineRequest, KineticsEngine, KineticsJob, ResultSpecies};
use log::{error, info, warn};
use uuid::Uuid;

use crate::config::{CalcConfig, ReconcileMode};
use crate::CalcError;

pub struct CanthermCalculator<E, C> {
    config: CalcConfig,
    writer: ArtifactWriter,
    engine: E,
    canonicalizer: C,
    run_id: Uuid,
    events: InMemoryEventStore,
    stage: CalcStage,
    kinetics_job: Option<KineticsJob>,
}

impl<E: KineticsEngine, C: Canonicalizer> CanthermCalculator<E, C> {
    /// # Errores
    /// `CalcError::Config` si la configuración no es válida.
    pub fn new(config: CalcConfig, engine: E, canonicalizer: C) -> Result<Self, CalcError> {
        config.validate()?;
        let writer = ArtifactWriter::new(config.scratch_dir.clone(),
                                         config.model_chemistry.clone(),
                                         config.freq_scale_factor).with_policy(config.unclassified_bonds);
        Ok(Self { config,
                  writer,
                  engine,
                  canonicalizer,
                  run_id: Uuid::new_v4(),
                  events: InMemoryEventStore::default(),
                  stage: CalcStage::Created,
                  kinetics_job: None })
    }

    /// Reemplaza la tabla de tipos de enlace estándar, p. ej. para clasificar
    /// pares que la tabla no cubre.
    pub fn with_bond_table(mut self, table: BondTable) -> Self {
        self.writer = self.writer.with_table(table);
        self
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
    pub fn stage(&self) -> CalcStage {
        self.stage
    }
    pub fn engine(&self) -> &E {
        &self.engine
    }
    pub fn kinetics_job(&self) -> Option<&KineticsJob> {
        self.kinetics_job.as_ref()
    }
    pub fn events(&self) -> Vec<CalcEvent> {
        self.events.list(self.run_id)
    }

    fn record(&mut self, kind: CalcEventKind) {
        self.events.append_kind(self.run_id, kind);
    }

    fn record_artifact(&mut self, written: &WrittenArtifact) {
        self.record(CalcEventKind::ArtifactWritten { role: written.role,
                                                     name: written.name.clone(),
                                                     path: written.path.display().to_string(),
                                                     fingerprint: written.fingerprint.clone() });
    }

    fn fail(&mut self, err: CalcError) -> CalcError {
        error!("calc:failed run={} stage={} {err}", self.run_id, err.stage());
        let stage = self.stage;
        self.record(CalcEventKind::StageFailed { stage,
                                                 message: err.to_string() });
        self.stage = CalcStage::Failed;
        err
    }

    fn artifact_error(&mut self, reaction: &Reaction, source: ArtifactError) -> CalcError {
        self.fail(CalcError::Artifact { reaction: reaction.label().to_string(),
                                        source })
    }

    /// Escribe `<scratch>/<id>.py` para una estructura de `reaction`.
    pub fn write_species_artifact(&mut self, reaction: &Reaction, structure: &Structure) -> Result<WrittenArtifact, CalcError> {
        match self.writer.write_species_artifact(structure, &self.canonicalizer) {
            Ok(written) => {
                self.record_artifact(&written);
                Ok(written)
            }
            Err(source) => Err(self.artifact_error(reaction, source)),
        }
    }

    pub fn write_transition_state_artifact(&mut self, reaction: &Reaction) -> Result<WrittenArtifact, CalcError> {
        match self.writer.write_transition_state_artifact(reaction) {
            Ok(written) => {
                self.record_artifact(&written);
                Ok(written)
            }
            Err(source) => Err(self.artifact_error(reaction, source)),
        }
    }

    pub fn write_job_descriptor(&mut self, reaction: &Reaction) -> Result<WrittenArtifact, CalcError> {
        match self.writer.write_job_descriptor(reaction, &self.canonicalizer) {
            Ok(written) => {
                self.record_artifact(&written);
                Ok(written)
            }
            Err(source) => Err(self.artifact_error(reaction, source)),
        }
    }

    /// Genera todos los artefactos de `reaction`. La cardinalidad se comprueba
    /// antes de escribir nada. Puede repetirse desde cualquier etapa; descarta
    /// un resultado de cinética previo.
    pub fn generate_all(&mut self, reaction: &Reaction) -> Result<Vec<WrittenArtifact>, CalcError> {
        info!("calc:generate run={} {reaction}", self.run_id);
        let config_fingerprint = self.config.fingerprint();
        self.record(CalcEventKind::CalculationStarted { reaction: reaction.label().to_string(),
                                                        config_fingerprint });
        if let Err(source) = require_bimolecular(reaction) {
            return Err(self.artifact_error(reaction, source));
        }
        self.kinetics_job = None;

        let mut written = Vec::new();
        for structure in reaction.species_structures() {
            written.push(self.write_species_artifact(reaction, structure)?);
        }
        written.push(self.write_transition_state_artifact(reaction)?);
        written.push(self.write_job_descriptor(reaction)?);

        self.stage = CalcStage::ArtifactsWritten;
        info!("calc:artifacts_written run={} reaction={} count={}",
              self.run_id,
              reaction.label(),
              written.len());
        Ok(written)
    }

    /// Invoca el motor sobre el descriptor de `reaction` (sin gráficos) y
    /// retiene el job de cinética.
    ///
    /// Un fallo de renderizado se registra y la corrida continúa; cualquier
    /// otro fallo del motor es fatal, igual que la ausencia de job de cinética.
    pub fn run(&mut self, reaction: &Reaction) -> Result<KineticsJob, CalcError> {
        let input_file = self.writer.descriptor_path(reaction.label());
        if !input_file.is_file() {
            return Err(self.fail(CalcError::MissingDescriptor { path: input_file }));
        }
        let request = EngineRequest { input_file,
                                      output_directory: self.config.output_dir.clone(),
                                      plot: false };
        info!("calc:run run={} input={}", self.run_id, request.input_file.display());
        self.record(CalcEventKind::EngineInvoked { input_file: request.input_file.display().to_string() });

        match self.engine.execute(&request) {
            Ok(()) => {}
            Err(e) if e.is_render_failure() => {
                warn!("calc:render_failure run={} reaction={} {e}", self.run_id, reaction.label());
                self.record(CalcEventKind::RenderFailureRecovered { message: e.to_string() });
            }
            Err(source) => {
                return Err(self.fail(CalcError::Engine { reaction: reaction.label().to_string(),
                                                         source }));
            }
        }

        let job_count = self.engine.jobs().len();
        let Some(job) = self.engine.jobs().iter().find_map(EngineJob::as_kinetics).cloned() else {
            return Err(self.fail(CalcError::MissingKinetics { reaction: reaction.label().to_string() }));
        };
        self.record(CalcEventKind::KineticsExtracted { reaction: job.reaction.label.clone(),
                                                       job_count });
        self.kinetics_job = Some(job.clone());
        self.stage = CalcStage::Executed;
        info!("calc:executed run={} reaction={} jobs={job_count}", self.run_id, reaction.label());
        Ok(job)
    }

    /// Liga cada estructura de reactivos (productos) con la especie de los
    /// reactivos (productos) del resultado cuyo label coincide exactamente con
    /// su SMILES y devuelve una nueva reacción cuyo objeto de datos es el del
    /// resultado. El resultado retenido debe ser el de la misma reacción.
    ///
    /// En modo `Strict` la primera estructura sin correspondencia aborta con
    /// `CalcError::Unmatched`; en `Lenient` se registra y se omite.
    pub fn reconcile(&mut self, reaction: &Reaction) -> Result<Reaction, CalcError> {
        let Some(job) = self.kinetics_job.clone() else {
            return Err(self.fail(CalcError::InvalidState { expected: CalcStage::Executed,
                                                           found: self.stage }));
        };
        let result = &job.reaction;
        if result.label != reaction.label() {
            return Err(self.fail(CalcError::ResultMismatch { reaction: reaction.label().to_string(),
                                                             result: result.label.clone() }));
        }

        let data = reaction.data();
        let (reactants, mut unmatched) = bind_side(&data.reactants, &result.reactants);
        let (products, unmatched_products) = bind_side(&data.products, &result.products);
        unmatched.extend(unmatched_products);
        let total = data.reactants
                        .iter()
                        .chain(&data.products)
                        .map(|species| species.molecules.len())
                        .sum::<usize>();
        let matched = total - unmatched.len();

        for smiles in &unmatched {
            match self.config.reconcile_mode {
                ReconcileMode::Strict => {
                    return Err(self.fail(CalcError::Unmatched { reaction: reaction.label().to_string(),
                                                                smiles: smiles.clone() }));
                }
                ReconcileMode::Lenient => {
                    warn!("calc:unmatched run={} reaction={} species='{smiles}'",
                          self.run_id,
                          reaction.label());
                    self.record(CalcEventKind::SpeciesUnmatched { smiles: smiles.clone() });
                }
            }
        }

        let reconciled = ReactionData { label: result.label.clone(),
                                        reactants,
                                        products,
                                        transition_state: result.transition_state.clone(),
                                        tunneling: result.tunneling.clone(),
                                        kinetics: result.kinetics.clone() };

        self.record(CalcEventKind::Reconciled { matched,
                                                unmatched: unmatched.len() });
        self.stage = CalcStage::Reconciled;
        info!("calc:reconciled run={} reaction={} matched={matched} unmatched={}",
              self.run_id,
              reaction.label(),
              unmatched.len());
        Ok(reaction.clone().with_data(reconciled))
    }

    /// `generate_all` → `run` → `reconcile`.
    pub fn calculate(&mut self, reaction: &Reaction) -> Result<Reaction, CalcError> {
        self.generate_all(reaction)?;
        self.run(reaction)?;
        self.reconcile(reaction)
    }
}

/// Liga las estructuras de un lado de la reacción con las especies del mismo
/// lado del resultado. Devuelve las especies ligadas y los SMILES de las
/// estructuras sin correspondencia.
fn bind_side(side: &[Species], result: &[ResultSpecies]) -> (Vec<Species>, Vec<String>) {
    let structures: Vec<&Structure> = side.iter().flat_map(|species| species.molecules.iter()).collect();
    let unmatched = structures.iter()
                              .filter(|s| !result.iter().any(|rs| rs.label == s.smiles()))
                              .map(|s| s.smiles().to_string())
                              .collect();
    let bound = result.iter()
                      .map(|rs| Species { label: rs.label.clone(),
                                          molecules: structures.iter()
                                                               .find(|s| s.smiles() == rs.label)
                                                               .map(|s| vec![(*s).clone()])
                                                               .unwrap_or_default() })
                      .collect();
    (bound, unmatched)
}
