use std::fs;
use std::process::Command;

use tempfile::tempdir;

const CONFIG: &str = r#"
correlators:
  - [2, -2]
  - [2, 2, -2, -2]
  - [3, -3]
weights:
  phi: { use: true, reset: true }
monte_carlo:
  events: 30
  multiplicity: { fixed: 120 }
  flow_harmonics: [0.0, 0.08, 0.03]
  acceptance:
    phi:
      bins: [1.0, 0.7, 1.0, 0.7]
      weights: [1.0, 1.4285714, 1.0, 1.4285714]
seed_policy: { master_seed: 5 }
threads: 2
"#;

fn flow_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_flow-sim"))
}

#[test]
fn run_writes_report_and_config_copy() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("flow.yaml");
    fs::write(&config, CONFIG).unwrap();
    let out = dir.path().join("out");

    let status = flow_sim()
        .args(["run", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&fs::read(out.join("report.json")).unwrap()).unwrap();
    assert_eq!(report["provenance"]["seed"], 5);
    assert_eq!(report["provenance"]["events"], 30);
    assert_eq!(report["schema_version"]["major"], 1);
    let data = report["results"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[1]["label"], "<<4>>_{2,2,-2,-2}");
    assert_eq!(data[0]["entries"], 30);
    assert_eq!(report["results"]["data-weights-reset"][0]["entries"], 30);
    assert_eq!(report["results"]["theory"][2]["entries"], 1);
    assert_eq!(fs::read_to_string(out.join("config.yaml")).unwrap(), CONFIG);

    let first = fs::read(out.join("report.json")).unwrap();
    let again = dir.path().join("again");
    let status = flow_sim()
        .args(["run", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&again)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(first, fs::read(again.join("report.json")).unwrap());
}

#[test]
fn run_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "correlators: [[4, 4, -4, -4]]\nbounds: { max_harmonic: 4, max_power: 4 }\n")
        .unwrap();
    let output = flow_sim()
        .args(["run", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(dir.path().join("out"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bounds-too-small"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn check_passes_for_consistent_evaluators() {
    let output = flow_sim()
        .args([
            "check",
            "--particles",
            "25",
            "--seed",
            "9",
            "--weighted",
            "--harmonics",
            "2,-2",
            "--harmonics",
            "3,-1,-2",
            "--harmonics",
            "-2,-2,2,2",
            "--harmonics",
            "1,1,1,-1,-1,-1,2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<<3>>_{3,-1,-2}"));
    assert!(stdout.contains("<<7>>_{1,1,1,-1,-1,-1,2}"));
}

#[test]
fn check_emits_json_rows() {
    let output = flow_sim()
        .args(["check", "--json", "--harmonics", "2,-2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let row: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(row["label"], "<<2>>_{2,-2}");
    assert_eq!(row["path"], "closed-form");
    assert!(row["deviation"].as_f64().unwrap() < 1e-9);
}

#[test]
fn check_fails_for_too_small_event() {
    let status = flow_sim()
        .args(["check", "--particles", "2", "--harmonics", "2,2,-2,-2"])
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn labels_lists_bins_in_order() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("flow.yaml");
    fs::write(&config, CONFIG).unwrap();
    let output = flow_sim().args(["labels", "--config"]).arg(&config).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["0\t<<2>>_{2,-2}", "1\t<<4>>_{2,2,-2,-2}", "2\t<<2>>_{3,-3}"]
    );
}
