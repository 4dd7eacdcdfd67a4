use ledger_core::model::{FlowModel, StageKind};
use ledger_core::{Error, Fixtures, validate_fixtures};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn overrides(name: &str) -> PathBuf {
    workspace_root().join("fixtures").join("overrides").join(name)
}

#[test]
fn default_tables_match_the_published_data() {
    let f = Fixtures::default();
    assert_eq!(f.traditional_flow.nodes.len(), 10);
    assert_eq!(f.traditional_flow.links.len(), 20);
    assert_eq!(f.equitable_flow.nodes.len(), 11);
    assert_eq!(f.equitable_flow.links.len(), 25);
    assert_eq!(f.listening_levels.len(), 5);
    assert_eq!(f.system_dimensions.len(), 5);
    assert_eq!(f.feedback_loops.len(), 3);
    assert_eq!(f.journey_stages.len(), 6);
    assert_eq!(f.journey_stages[0].kind, StageKind::Origin);
    assert_eq!(f.checkpoints.len(), 5);
    assert_eq!(f.evidence_case_studies.len(), 3);
    assert_eq!(f.integration_approaches.len(), 3);
    assert_eq!(f.proximity_entities.len(), 14);
    assert_eq!(f.proximity_connections.len(), 15);
    assert_eq!(f.proximity_interventions.len(), 3);
    assert_eq!(
        f.assessment.as_ref().map(|a| a.organization.as_str()),
        Some("Horizon Foundation")
    );
}

#[test]
fn fixtures_are_fresh_values() {
    let mut a = Fixtures::default();
    a.listening_levels.clear();
    let b = Fixtures::default();
    assert_eq!(b.listening_levels.len(), 5);
}

#[test]
fn yaml_override_replaces_only_named_sections() {
    let f = Fixtures::from_path(overrides("two_branch_flow.yaml")).expect("load yaml");
    assert_eq!(f.flow(FlowModel::Equitable).nodes.len(), 3);
    assert_eq!(f.flow(FlowModel::Traditional).nodes.len(), 10);
    assert_eq!(f.listening_levels.len(), 5);
    validate_fixtures(&f).expect("override still valid");
}

#[test]
fn cyclic_override_fails_validation() {
    let f = Fixtures::from_path(overrides("cyclic_flow.json")).expect("load json");
    let err = validate_fixtures(&f).expect_err("cycle must be rejected");
    assert!(matches!(err, Error::CyclicFlow { .. }), "{err}");
}

#[test]
fn dangling_loop_override_fails_validation() {
    let f = Fixtures::from_path(overrides("dangling_loop.json")).expect("load json");
    let err = validate_fixtures(&f).expect_err("dangling id must be rejected");
    assert!(
        matches!(&err, Error::UnknownDimension { loop_id, dimension }
            if loop_id == "loopX" && dimension == "missing_dimension"),
        "{err}"
    );
}

#[test]
fn unknown_extension_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fixtures.toml");
    std::fs::write(&path, "x = 1").expect("write");
    assert!(matches!(
        Fixtures::from_path(&path),
        Err(Error::InvalidValue { .. })
    ));
}

#[test]
fn json_round_trips_through_serde() {
    let f = Fixtures::default();
    let text = serde_json::to_string(&f).expect("serialize");
    assert!(text.contains("\"sovereigntyLevel\""));
    assert!(text.contains("\"type\":\"origin\""));
    let back = Fixtures::from_json_str(&text).expect("parse");
    assert_eq!(back, f);
}
