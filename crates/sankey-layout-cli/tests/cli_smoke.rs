use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;

const GRAPH: &str = r#"{
  "nodes": [{"name": "A"}, {"name": "B"}, {"name": "C"}],
  "links": [
    {"source": "A", "target": "C", "value": 5},
    {"source": "B", "target": "C", "value": 5}
  ]
}"#;

#[test]
fn cli_lays_out_a_graph_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("graph.json");
    fs::write(&input, GRAPH).expect("write graph");

    let exe = assert_cmd::cargo_bin!("sankey-layout");
    let output = Command::new(exe)
        .args([
            "--node-id",
            "name",
            "--width",
            "100",
            "--height",
            "100",
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run sankey-layout");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let v: Value = serde_json::from_slice(&output.stdout).expect("layout JSON");
    let nodes = v["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[2]["key"], "C");
    assert_eq!(nodes[2]["value"], 10.0);
    assert_eq!(nodes[2]["x1"], 100.0);
    assert_eq!(v["links"].as_array().map(|l| l.len()), Some(2));
}

#[test]
fn cli_reads_options_from_a_config_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("graph.json");
    let config = tmp.path().join("options.json");
    fs::write(&input, GRAPH).expect("write graph");
    fs::write(
        &config,
        r#"{"extent": {"x0": 10, "y0": 0, "x1": 210, "y1": 100}, "nodeWidth": 10}"#,
    )
    .expect("write config");

    let exe = assert_cmd::cargo_bin!("sankey-layout");
    let output = Command::new(exe)
        .args([
            "--node-id",
            "name",
            "--config",
            config.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run sankey-layout");
    assert!(output.status.success());

    let v: Value = serde_json::from_slice(&output.stdout).expect("layout JSON");
    assert_eq!(v["nodes"][0]["x0"], 10.0);
    assert_eq!(v["nodes"][0]["x1"], 20.0);
    assert_eq!(v["nodes"][2]["x1"], 210.0);
}

#[test]
fn cli_reports_missing_nodes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("graph.json");
    fs::write(
        &input,
        r#"{"nodes": [{"name": "A"}], "links": [{"source": "A", "target": "Z", "value": 1}]}"#,
    )
    .expect("write graph");

    let exe = assert_cmd::cargo_bin!("sankey-layout");
    let output = Command::new(exe)
        .args(["--node-id", "name", input.to_string_lossy().as_ref()])
        .output()
        .expect("run sankey-layout");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing node: Z"));
}

#[test]
fn cli_prints_usage_for_unknown_flags() {
    let exe = assert_cmd::cargo_bin!("sankey-layout");
    Command::new(exe).arg("--bogus").assert().code(2);
}
