use std::{fs, path::Path};

use tempfile::tempdir;

use arrange_cli::{Args, CliError, run};

const FLOW: &str = r#"{
    "nodes": [
        {"id": "start", "type": "start", "position": {"x": 0, "y": 0}},
        {"id": "review", "type": "approval", "position": {"x": 0, "y": 0}},
        {"id": "ok", "type": "condition", "position": {"x": 0, "y": 0}},
        {"id": "fix", "type": "process", "position": {"x": 0, "y": 0}},
        {"id": "end", "type": "end", "position": {"x": 0, "y": 0}}
    ],
    "edges": [
        {"id": "e1", "source": "start", "target": "review"},
        {"id": "e2", "source": "review", "target": "ok"},
        {"id": "e3", "source": "ok", "target": "end"},
        {"id": "e4", "source": "ok", "target": "fix"},
        {"id": "e5", "source": "fix", "target": "end"}
    ]
}"#;

fn args(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        algorithm: None,
        seed: Some(7),
        optimize: false,
        log_level: "off".to_string(),
    }
}

fn read_layout(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read layout output");
    serde_json::from_str(&content).expect("Layout output is valid JSON")
}

#[test]
fn e2e_smoke_test_each_algorithm() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("flow.json");
    fs::write(&input, FLOW).expect("Failed to write graph");

    for algorithm in ["hierarchical", "force-directed", "circular", "grid", "tree"] {
        let output = temp_dir.path().join(format!("{algorithm}.json"));
        let args = Args {
            algorithm: Some(algorithm.to_string()),
            ..args(&input, &output)
        };
        run(&args).unwrap_or_else(|err| panic!("{algorithm} failed: {err}"));

        let layout = read_layout(&output);
        let positions = layout["node_positions"]
            .as_object()
            .expect("node_positions is an object");
        assert_eq!(positions.len(), 5, "{algorithm}");
        for (id, position) in positions {
            let x = position["x"].as_f64().expect("x is a number");
            let y = position["y"].as_f64().expect("y is a number");
            assert!(x >= 50.0 - 1e-3 && y >= 50.0 - 1e-3, "{algorithm}: {id} outside margin");
        }
    }
}

#[test]
fn e2e_smoke_test_config_and_optimize() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("flow.json");
    let config = temp_dir.path().join("config.toml");
    let output = temp_dir.path().join("layout.json");
    fs::write(&input, FLOW).expect("Failed to write graph");
    fs::write(
        &config,
        r#"
[optimization]
objectives = ["minimize-crossings", "minimize-area"]
"#,
    )
    .expect("Failed to write config");

    let args = Args {
        config: Some(config.to_string_lossy().to_string()),
        optimize: true,
        ..args(&input, &output)
    };
    run(&args).expect("optimized run succeeds");

    let layout = read_layout(&output);
    let quality = layout["stats"]["quality_score"]
        .as_f64()
        .expect("quality is a number");
    assert!((0.0..=1.0).contains(&quality));
}

#[test]
fn e2e_smoke_test_suggested_algorithm() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("flow.json");
    let output = temp_dir.path().join("layout.json");
    fs::write(&input, FLOW).expect("Failed to write graph");

    run(&args(&input, &output)).expect("run without an algorithm succeeds");
    assert_eq!(read_layout(&output)["edge_paths"].as_object().map(|m| m.len()), Some(5));
}

#[test]
fn e2e_smoke_test_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.json");
    let output = temp_dir.path().join("layout.json");
    fs::write(&input, "{ not json").expect("Failed to write graph");

    let err = run(&args(&input, &output)).expect_err("malformed graph is rejected");
    assert!(matches!(err, CliError::Graph(_)));
    assert!(err.is_input_error());

    fs::write(&input, FLOW).expect("Failed to write graph");
    let unknown = Args {
        algorithm: Some("spiral".to_string()),
        ..args(&input, &output)
    };
    let err = run(&unknown).expect_err("unknown algorithm is rejected");
    assert!(matches!(err, CliError::Layout(_)));
    assert!(err.is_input_error());
    assert!(!output.exists());

    let missing_config = Args {
        config: Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string()),
        ..args(&input, &output)
    };
    let err = run(&missing_config).expect_err("missing config is rejected");
    assert!(matches!(err, CliError::Config(_)));
}
