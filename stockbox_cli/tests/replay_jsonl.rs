use assert_cmd::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_fixture(dir: &tempfile::TempDir, trace: &str) -> (PathBuf, PathBuf) {
    let catalog = dir.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"{"-a": {"nom": "Yaourt", "poids_unitaire": 125, "unites_par_lot": 12},
            "-b": {"nom": "Lait", "poids_unitaire": 1000, "unites_par_lot": 6}}"#,
    )
    .unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(
        &cfg,
        format!(
            "[selector]\nsettle_ms = 0\n[catalog]\nfile = {:?}\n[report]\nzone = \"TWF\"\n",
            catalog.display().to_string()
        ),
    )
    .unwrap();
    let trace_path = dir.path().join("trace.csv");
    fs::write(&trace_path, trace).unwrap();
    (cfg, trace_path)
}

fn replay_lines(args: &[&str], trace: &str) -> Vec<serde_json::Value> {
    let dir = tempdir().unwrap();
    let (cfg, trace_path) = write_fixture(&dir, trace);
    let mut cmd = Command::cargo_bin("stockbox").unwrap();
    cmd.arg("--json").arg("--log-level").arg("warn").arg("--config").arg(&cfg);
    for a in args {
        cmd.arg(a);
    }
    cmd.arg("replay").arg("--trace").arg(&trace_path);
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON: {l}: {e}")))
        .collect()
}

const PLACEMENT: &str = "weight,control\n0,0\n,0\n15,0\n16,0\n50,0\n52,0\n51,0\n0,0\n";

/// One placement produces exactly one report, in the posted payload shape.
#[rstest]
fn replay_reports_one_placement() {
    let lines = replay_lines(&[], PLACEMENT);

    let payloads: Vec<_> = lines.iter().filter(|v| v.get("poids").is_some()).collect();
    assert_eq!(payloads.len(), 1, "lines: {lines:?}");
    let p = payloads[0];
    assert_eq!(p["poids"].as_f64(), Some(16.0));
    assert_eq!(p["zone_prod"], "TWF");
    assert_eq!(p["prod_sortie"], "Yaourt");
    let date = p["date"].as_str().unwrap();
    assert_eq!(date.len(), "2026-01-01 00:00:00".len());

    let events: Vec<&str> = lines
        .iter()
        .filter_map(|v| v.get("event").and_then(|e| e.as_str()))
        .collect();
    assert_eq!(events, vec!["selected", "placed", "reported", "removed"]);

    let summary = lines.last().unwrap();
    assert_eq!(summary["summary"]["ticks"], 8);
    assert_eq!(summary["summary"]["skipped"], 1);
    assert_eq!(summary["summary"]["reports"], 1);
}

#[rstest]
fn replay_without_selection_reports_nothing() {
    // empty catalog file: selection never confirms
    let dir = tempdir().unwrap();
    let (cfg, trace_path) = write_fixture(&dir, PLACEMENT);
    fs::write(dir.path().join("catalog.json"), "[]").unwrap();

    let out = Command::cargo_bin("stockbox")
        .unwrap()
        .arg("--json")
        .arg("--config")
        .arg(&cfg)
        .arg("replay")
        .arg("--trace")
        .arg(&trace_path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("\"poids\""));
    assert!(text.contains("\"not_reported\""));
    assert!(text.contains("\"failed_reports\":1"));
}

#[rstest]
fn max_ticks_stops_early() {
    let lines = replay_lines(&[], "weight,control\n0,0\n0,0\n0,0\n0,0\n");
    assert_eq!(lines.last().unwrap()["summary"]["ticks"], 4);

    let dir = tempdir().unwrap();
    let (cfg, trace_path) = write_fixture(&dir, "weight,control\n0,0\n0,0\n0,0\n0,0\n");
    let out = Command::cargo_bin("stockbox")
        .unwrap()
        .arg("--json")
        .arg("--config")
        .arg(&cfg)
        .arg("replay")
        .arg("--trace")
        .arg(&trace_path)
        .arg("--max-ticks")
        .arg("2")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8(out).unwrap().contains("\"ticks\":2"));
}
