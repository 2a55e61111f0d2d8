#![allow(dead_code)]

use kin_domain::Reaction;
use kinengine::{ArrheniusFit, DigestCanonicalizer, EngineJob, KineticsJob, MockEngine, ResultReaction, ResultSpecies};
use kinflow::{CalcConfig, CanthermCalculator};
use std::path::Path;

pub type MockCalculator = CanthermCalculator<MockEngine, DigestCanonicalizer>;

pub fn config(root: &Path) -> CalcConfig {
    CalcConfig::default().with_scratch_dir(root.join("scratch"))
                         .with_output_dir(root.join("output"))
}

pub fn species(labels: &[&str]) -> Vec<ResultSpecies> {
    labels.iter().map(|l| ResultSpecies { label: l.to_string() }).collect()
}

/// Job de cinética tal como lo reportaría CanTherm para `rxn`.
pub fn kinetics_job(rxn: &Reaction, reactants: &[&str], products: &[&str]) -> EngineJob {
    EngineJob::Kinetics(KineticsJob { reaction: ResultReaction { label: rxn.label().to_string(),
                                                                 reactants: species(reactants),
                                                                 products: species(products),
                                                                 transition_state: Some("TS".into()),
                                                                 tunneling: Some("Eckart".into()),
                                                                 kinetics: Some(ArrheniusFit { a: 1.23e6,
                                                                                               a_units: "m^3/(mol*s)".into(),
                                                                                               n: 1.9,
                                                                                               ea: 4.1e3,
                                                                                               t0: 1.0 }) } })
}

/// Lista de jobs completa: statmech del TS seguido de la cinética.
pub fn matching_jobs(rxn: &Reaction) -> Vec<EngineJob> {
    let smiles = |items: &[kin_domain::Structure]| items.iter().map(|s| s.smiles().to_string()).collect::<Vec<_>>();
    let (r, p) = (smiles(rxn.reactants()), smiles(rxn.products()));
    let r: Vec<&str> = r.iter().map(String::as_str).collect();
    let p: Vec<&str> = p.iter().map(String::as_str).collect();
    vec![EngineJob::StatMech { species: "TS".into() }, kinetics_job(rxn, &r, &p)]
}

pub fn calculator(cfg: CalcConfig, engine: MockEngine) -> MockCalculator {
    CanthermCalculator::new(cfg, engine, DigestCanonicalizer).unwrap()
}
