mod support;

use kin_core::{ArtifactError, ArtifactRole, BondTable, CalcEventKind, CalcStage};
use kin_domain::{fixtures, BondOrder, Element, Reaction, Structure};
use kinengine::{DigestCanonicalizer, EngineJob, MockEngine, ScriptedFailure};
use kinflow::{CalcConfig, CalcError, CanthermCalculator};
use std::fs;
use support::{calculator, config, matching_jobs};

#[test]
fn full_pipeline_writes_artifacts_and_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    let rxn = fixtures::ethane_h_abstraction();
    let cfg = config(dir.path());
    let mut calc = calculator(cfg.clone(), MockEngine::new(matching_jobs(&rxn)));
    assert_eq!(calc.stage(), CalcStage::Created);

    let reconciled = calc.calculate(&rxn).unwrap();
    assert_eq!(calc.stage(), CalcStage::Reconciled);

    // 4 especies + estado de transición + descriptor
    let mut names: Vec<String> = fs::read_dir(&cfg.scratch_dir).unwrap()
                                                               .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                                                               .collect();
    names.sort();
    assert_eq!(names.len(), 6);
    assert!(names.contains(&format!("{}.py", rxn.label())));
    assert!(names.contains(&format!("{}.canth.py", rxn.label())));

    let requests = calc.engine().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].input_file, cfg.scratch_dir.join(format!("{}.canth.py", rxn.label())));
    assert_eq!(requests[0].output_directory, cfg.output_dir);
    assert!(!requests[0].plot);

    assert_eq!(reconciled.data().tunneling.as_deref(), Some("Eckart"));
    assert!(reconciled.data().kinetics.is_some());
    assert_eq!(reconciled.reactants(), rxn.reactants());
}

#[test]
fn events_follow_the_stage_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let rxn = fixtures::ethane_h_abstraction();
    let mut calc = calculator(config(dir.path()), MockEngine::new(matching_jobs(&rxn)));
    calc.calculate(&rxn).unwrap();

    let events = calc.events();
    assert!(events.iter().enumerate().all(|(i, e)| e.seq == i as u64 && e.run_id == calc.run_id()));
    assert!(matches!(&events[0].kind, CalcEventKind::CalculationStarted { reaction, .. } if reaction == rxn.label()));

    let roles: Vec<ArtifactRole> = events.iter()
                                         .filter_map(|e| match &e.kind {
                                             CalcEventKind::ArtifactWritten { role, .. } => Some(*role),
                                             _ => None,
                                         })
                                         .collect();
    assert_eq!(roles.len(), 6);
    assert_eq!(roles[4], ArtifactRole::TransitionState);
    assert_eq!(roles[5], ArtifactRole::JobDescriptor);

    let tail: Vec<&CalcEventKind> = events.iter().skip(7).map(|e| &e.kind).collect();
    assert!(matches!(tail[0], CalcEventKind::EngineInvoked { .. }));
    assert!(matches!(tail[1], CalcEventKind::KineticsExtracted { job_count: 2, .. }));
    assert!(matches!(tail[2], CalcEventKind::Reconciled { matched: 4, unmatched: 0 }));
}

#[test]
fn regeneration_keeps_fingerprints() {
    let dir = tempfile::tempdir().unwrap();
    let rxn = fixtures::ethane_h_abstraction();
    let mut calc = calculator(config(dir.path()), MockEngine::default());
    let first = calc.generate_all(&rxn).unwrap();
    let second = calc.generate_all(&rxn).unwrap();
    let fp = |w: &[kin_core::WrittenArtifact]| w.iter().map(|a| a.fingerprint.clone()).collect::<Vec<_>>();
    assert_eq!(fp(&first), fp(&second));
    assert_eq!(calc.stage(), CalcStage::ArtifactsWritten);
}

#[test]
fn render_failure_is_recovered() {
    let dir = tempfile::tempdir().unwrap();
    let rxn = fixtures::ethane_h_abstraction();
    let engine = MockEngine::new(matching_jobs(&rxn)).failing_with(ScriptedFailure::Render);
    let mut calc = calculator(config(dir.path()), engine);
    calc.generate_all(&rxn).unwrap();

    let job = calc.run(&rxn).unwrap();
    assert_eq!(job.reaction.label, rxn.label());
    assert_eq!(calc.stage(), CalcStage::Executed);
    assert!(calc.events()
                .iter()
                .any(|e| matches!(e.kind, CalcEventKind::RenderFailureRecovered { .. })));
    assert!(calc.reconcile(&rxn).is_ok());
}

#[test]
fn execution_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let rxn = fixtures::ethane_h_abstraction();
    let engine = MockEngine::new(matching_jobs(&rxn)).failing_with(ScriptedFailure::Execution);
    let mut calc = calculator(config(dir.path()), engine);

    let err = calc.calculate(&rxn).unwrap_err();
    assert!(matches!(&err, CalcError::Engine { reaction, .. } if reaction == rxn.label()));
    assert_eq!(calc.stage(), CalcStage::Failed);
    assert!(calc.kinetics_job().is_none());
    let last = calc.events().pop().unwrap();
    assert!(matches!(last.kind, CalcEventKind::StageFailed { stage: CalcStage::ArtifactsWritten, .. }));
}

#[test]
fn missing_kinetics_job_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let rxn = fixtures::ethane_h_abstraction();
    let jobs = vec![EngineJob::StatMech { species: "TS".into() },
                    EngineJob::Other { name: "ThermoJob".into() }];
    let mut calc = calculator(config(dir.path()), MockEngine::new(jobs));
    calc.generate_all(&rxn).unwrap();

    let err = calc.run(&rxn).unwrap_err();
    assert!(matches!(err, CalcError::MissingKinetics { .. }));
    assert!(err.to_string().contains(rxn.label()));
    assert_eq!(calc.stage(), CalcStage::Failed);
}

#[test]
fn run_requires_the_job_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let rxn = fixtures::ethane_h_abstraction();
    let mut calc = calculator(config(dir.path()), MockEngine::new(matching_jobs(&rxn)));
    let err = calc.run(&rxn).unwrap_err();
    assert!(matches!(err, CalcError::MissingDescriptor { .. }));
    assert!(calc.engine().requests().is_empty());
}

#[test]
fn non_bimolecular_reaction_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let rxn = Reaction::new("unimolecular",
                            vec![fixtures::ethane()],
                            vec![fixtures::ethyl(), fixtures::water()],
                            fixtures::ethane_oh_ts()).unwrap();
    let mut calc = calculator(cfg.clone(), MockEngine::default());

    let err = calc.generate_all(&rxn).unwrap_err();
    assert!(matches!(err,
                     CalcError::Artifact { source: ArtifactError::Cardinality { reactants: 1, products: 2, .. }, .. }));
    assert!(!cfg.scratch_dir.exists());
    assert_eq!(calc.stage(), CalcStage::Failed);
}

#[test]
fn invalid_configuration_is_rejected() {
    let cfg = CalcConfig::default().with_freq_scale_factor(-1.0);
    let result = CanthermCalculator::new(cfg, MockEngine::default(), DigestCanonicalizer);
    assert!(matches!(result, Err(CalcError::Config(_))));
}

#[test]
fn custom_bond_table_extends_classification() {
    let dir = tempfile::tempdir().unwrap();
    let rxn = fixtures::ethane_h_abstraction();
    let mut sulfenic = Structure::new("[SH]O");
    let s = sulfenic.add_atom("S");
    let o = sulfenic.add_atom("O");
    sulfenic.add_bond(s, o, BondOrder::Single).unwrap();
    sulfenic.add_hydrogens(s, 1).unwrap();
    sulfenic.add_hydrogens(o, 1).unwrap();

    let mut standard = calculator(config(dir.path()), MockEngine::default());
    let err = standard.write_species_artifact(&rxn, &sulfenic).unwrap_err();
    assert_eq!(err.stage(), "classification");

    let mut table = BondTable::standard().clone();
    table.insert(BondOrder::Single, Element::O, Element::S, "S-O");
    let mut extended = calculator(config(dir.path()), MockEngine::default()).with_bond_table(table);
    let written = extended.write_species_artifact(&rxn, &sulfenic).unwrap();
    let text = fs::read_to_string(&written.path).unwrap();
    assert!(text.contains("'S-O': 1,"));
    assert_eq!(extended.stage(), CalcStage::Created);
}
