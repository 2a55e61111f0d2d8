//! Escritores de artefactos: especie, estado de transición y descriptor.
//!
//! Todo el contenido se calcula antes de abrir el archivo; un error de
//! clasificación o de identificador no deja artefactos parciales. La
//! escritura sobrescribe el archivo completo.
use indexmap::IndexMap;
use kin_domain::{Reaction, SpeciesId, Structure};
use kinengine::Canonicalizer;
use log::debug;
use std::fs;
use std::path::PathBuf;

use crate::classify::{classify, BondTable, UnclassifiedBondPolicy};
use crate::constants::{ARTIFACT_EXT, DESCRIPTOR_EXT};
use crate::errors::ArtifactError;
use crate::event::ArtifactRole;
use crate::hashing::hash_str;
use crate::render::{JobDescriptor, SpeciesDeclaration, StatMechDocument};

/// Resultado de una escritura.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub role: ArtifactRole,
    /// Identificador de especie o etiqueta de la reacción.
    pub name: String,
    pub path: PathBuf,
    /// blake3 del contenido escrito.
    pub fingerprint: String,
}

/// Exige exactamente dos reactivos y dos productos.
pub fn require_bimolecular(reaction: &Reaction) -> Result<(), ArtifactError> {
    let (reactants, products) = (reaction.reactants().len(), reaction.products().len());
    if reactants != 2 || products != 2 {
        return Err(ArtifactError::Cardinality { reaction: reaction.label().to_string(),
                                                reactants,
                                                products });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    scratch_dir: PathBuf,
    model_chemistry: String,
    freq_scale_factor: f64,
    policy: UnclassifiedBondPolicy,
    table: BondTable,
}

impl ArtifactWriter {
    pub fn new(scratch_dir: impl Into<PathBuf>, model_chemistry: impl Into<String>, freq_scale_factor: f64) -> Self {
        Self { scratch_dir: scratch_dir.into(),
               model_chemistry: model_chemistry.into(),
               freq_scale_factor,
               policy: UnclassifiedBondPolicy::default(),
               table: BondTable::standard().clone() }
    }

    pub fn with_policy(mut self, policy: UnclassifiedBondPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sustituye la tabla estándar de tipos de enlace.
    pub fn with_table(mut self, table: BondTable) -> Self {
        self.table = table;
        self
    }

    pub fn species_path(&self, id: &SpeciesId) -> PathBuf {
        self.scratch_dir.join(format!("{}.{ARTIFACT_EXT}", id))
    }

    pub fn transition_state_path(&self, label: &str) -> PathBuf {
        self.scratch_dir.join(format!("{label}.{ARTIFACT_EXT}"))
    }

    pub fn descriptor_path(&self, label: &str) -> PathBuf {
        self.scratch_dir.join(format!("{label}.{DESCRIPTOR_EXT}"))
    }

    fn render_statmech(&self, structure: &Structure, log_stem: &str) -> Result<String, ArtifactError> {
        let classification = classify(structure, &self.table, self.policy)?;
        Ok(StatMechDocument { classification: &classification,
                              external_symmetry: structure.symmetry_number(),
                              spin_multiplicity: structure.multiplicity(),
                              model_chemistry: &self.model_chemistry,
                              log_stem }.render())
    }

    fn persist(&self, role: ArtifactRole, name: &str, path: PathBuf, content: &str) -> Result<WrittenArtifact, ArtifactError> {
        fs::create_dir_all(&self.scratch_dir).map_err(|source| ArtifactError::Io { path: self.scratch_dir.clone(),
                                                                                    source })?;
        fs::write(&path, content).map_err(|source| ArtifactError::Io { path: path.clone(),
                                                                       source })?;
        let fingerprint = hash_str(content);
        debug!("artifact:written role={role:?} name={name} path={} fp={fingerprint}",
               path.display());
        Ok(WrittenArtifact { role,
                             name: name.to_string(),
                             path,
                             fingerprint })
    }

    /// Escribe `<scratch>/<id>.py` para una especie.
    pub fn write_species_artifact<C>(&self, structure: &Structure, canonicalizer: &C) -> Result<WrittenArtifact, ArtifactError>
        where C: Canonicalizer + ?Sized
    {
        let id = SpeciesId::derive(structure, canonicalizer)?;
        let content = self.render_statmech(structure, id.as_str())?;
        self.persist(ArtifactRole::Species, id.as_str(), self.species_path(&id), &content)
    }

    /// Escribe `<scratch>/<label>.py` para el estado de transición; el log
    /// referenciado es `<label>.log`.
    pub fn write_transition_state_artifact(&self, reaction: &Reaction) -> Result<WrittenArtifact, ArtifactError> {
        let label = reaction.label();
        let content = self.render_statmech(reaction.transition_state(), label)?;
        self.persist(ArtifactRole::TransitionState, label, self.transition_state_path(label), &content)
    }

    /// Construye el descriptor sin escribirlo.
    pub fn job_descriptor<C>(&self, reaction: &Reaction, canonicalizer: &C) -> Result<JobDescriptor, ArtifactError>
        where C: Canonicalizer + ?Sized
    {
        require_bimolecular(reaction)?;
        let smiles = |items: &[Structure]| [items[0].smiles().to_string(), items[1].smiles().to_string()];
        let mut descriptor = JobDescriptor { model_chemistry: self.model_chemistry.clone(),
                                             freq_scale_factor: self.freq_scale_factor,
                                             species: IndexMap::new(),
                                             transition_state_file: format!("{}.{ARTIFACT_EXT}", reaction.label()),
                                             reaction_label: reaction.label().to_string(),
                                             reactants: smiles(reaction.reactants()),
                                             products: smiles(reaction.products()) };
        for structure in reaction.species_structures() {
            let id = SpeciesId::derive(structure, canonicalizer)?;
            let file = format!("{}.{ARTIFACT_EXT}", id);
            descriptor.declare_species(id,
                                       SpeciesDeclaration { label: structure.smiles().to_string(),
                                                            file });
        }
        Ok(descriptor)
    }

    /// Escribe `<scratch>/<label>.canth.py`.
    pub fn write_job_descriptor<C>(&self, reaction: &Reaction, canonicalizer: &C) -> Result<WrittenArtifact, ArtifactError>
        where C: Canonicalizer + ?Sized
    {
        let content = self.job_descriptor(reaction, canonicalizer)?.render();
        let label = reaction.label();
        self.persist(ArtifactRole::JobDescriptor, label, self.descriptor_path(label), &content)
    }
}
