use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("ledger-cli"));
    // Keep the user's .env and log settings out of the run.
    cmd.env_remove("RUST_LOG")
        .env_remove("AIRTABLE_API_KEY")
        .env_remove("AIRTABLE_BASE_ID")
        .current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn validate_accepts_the_bundled_fixtures() {
    let out = cli().arg("validate").assert().success().get_output().stdout.clone();
    assert_eq!(String::from_utf8_lossy(&out).trim(), "ok");
}

#[test]
fn validate_rejects_a_cyclic_flow() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let data = tmp.path().join("cyclic.json");
    fs::write(
        &data,
        r#"{ "traditionalFlow": {
              "nodes": [
                { "id": "a", "name": "A", "category": "people" },
                { "id": "b", "name": "B", "category": "institution" }
              ],
              "links": [
                { "source": "a", "target": "b", "value": 1 },
                { "source": "b", "target": "a", "value": 1 }
              ] } }"#,
    )
    .expect("write");

    let out = cli()
        .args(["validate", "--data", data.to_string_lossy().as_ref()])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&out).contains("cycle"));
}

#[test]
fn stats_reports_both_models() {
    let out = cli().arg("stats").assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&out).expect("json");
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["percentageReturn"].is_i64()));
}

#[test]
fn render_writes_svg_to_stdout() {
    let out = cli()
        .args(["render", "systems-model", "--transformed", "--select", "dimension:power_dynamics"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(out).expect("utf8");
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn render_png_to_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("flow.png");
    cli()
        .args([
            "render",
            "flow",
            "--format",
            "png",
            "--scale",
            "0.5",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "output is not a PNG");
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().expect("png header");
    assert_eq!(reader.info().width, 450);
}

#[test]
fn layout_emits_tagged_json() {
    let out = cli()
        .args(["layout", "proximity", "--proximity-intervention", "int1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(json["kind"], "proximity-map");
    assert_eq!(json["intervention"], "int1");
}

#[test]
fn card_prints_the_requested_step() {
    let out = cli()
        .args(["card", "journey", "--step", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert!(json["counter"].as_str().is_some_and(|c| c.starts_with("Stage 2 of")));
}

#[test]
fn unknown_visualization_is_a_usage_failure() {
    cli().args(["render", "pie-chart"]).assert().code(2);
    cli().arg("--help").assert().code(2);
}

#[test]
fn stories_without_credentials_fails_cleanly() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = cli()
        .current_dir(tmp.path())
        .arg("stories")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&out).contains("AIRTABLE_API_KEY"));
}
