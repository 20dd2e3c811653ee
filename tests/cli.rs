#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const REGIONS: &str = r#"[
    {
        "key": "06037",
        "name": "Los Angeles County",
        "msa": "31080",
        "metrics": {
            "employed_population": 4800000,
            "total_population": 10000000,
            "establishment_count": 260000,
            "annual_payroll": 330000000000,
            "median_income": 76000,
            "labor_force_count": 5100000
        }
    },
    {
        "key": "30031",
        "name": "Gallatin County",
        "metrics": {
            "employed_population": 70000,
            "total_population": 120000,
            "establishment_count": 6000,
            "annual_payroll": 4000000000,
            "median_income": 72000,
            "labor_force_count": 75000
        }
    },
    {
        "key": "48301",
        "name": "Loving County",
        "metrics": {
            "total_population": 60
        }
    }
]"#;

/// Temp dir holding an empty config so the user's own config is never read.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = dir.path().join("config.yaml");
    fs::write(&config, "{}\n").expect("config should be written");
    (dir, config)
}

fn write_regions(dir: &Path) -> PathBuf {
    let path = dir.join("regions.json");
    fs::write(&path, REGIONS).expect("regions should be written");
    path
}

fn offmarket(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("offmarket").expect("binary should compile");
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn value_single_firm_prints_detail() {
    let (_dir, config) = workspace();
    offmarket(&config)
        .args(["value", "--employees", "10", "--revenue", "6000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated value: $5.4M"))
        .stdout(predicate::str::contains("Size: medium (10 employees)"))
        .stdout(predicate::str::contains("Multiple: 0.90x"));
}

#[test]
fn value_single_firm_tsv_applies_both_step_ups() {
    let (_dir, config) = workspace();
    offmarket(&config)
        .args(["value", "--employees", "10", "--revenue", "11000000"])
        .args(["--format", "tsv", "--name", "Acme CPA"])
        .assert()
        .success()
        .stdout("10340000\t0.9400\tmedium\t10\t11000000\tAcme CPA\n");
}

#[test]
fn value_requires_revenue_without_file() {
    let (_dir, config) = workspace();
    offmarket(&config)
        .args(["value", "--employees", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--revenue"));
}

#[test]
fn value_batch_file_sorted_by_value() {
    let (dir, config) = workspace();
    let firms = dir.path().join("firms.yaml");
    fs::write(
        &firms,
        r#"
- name: Corner Bookkeeping
  employee_count: 3
  estimated_revenue: 400000
- name: Regional Law Group
  employee_count: 35
  estimated_revenue: 12000000
"#,
    )
    .unwrap();

    let output = offmarket(&config)
        .args(["value", "--file"])
        .arg(&firms)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Regional Law Group"));
    assert!(lines[0].contains("1.09x"));
    assert!(lines[1].contains("Corner Bookkeeping"));
    assert!(lines[1].contains("0.71x"));
}

#[test]
fn growth_ranks_regions() {
    let (dir, config) = workspace();
    let regions = write_regions(dir.path());

    let output = offmarket(&config)
        .arg("growth")
        .arg(&regions)
        .args(["--format", "tsv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let keys: Vec<&str> = stdout
        .lines()
        .map(|line| line.split('\t').nth(1).unwrap())
        .collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[2], "48301");
}

#[test]
fn buyers_json_leader_scores_one() {
    let (dir, config) = workspace();
    let regions = write_regions(dir.path());

    let output = offmarket(&config)
        .arg("buyers")
        .arg(&regions)
        .args(["--format", "json", "--limit", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["key"], "06037");
    assert!((rows[0]["score"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(rows[0]["color"], "#1a9850");
}

#[test]
fn missing_input_file_exits_with_input_error() {
    let (dir, config) = workspace();
    offmarket(&config)
        .arg("growth")
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn invalid_config_reports_all_errors() {
    let (dir, _) = workspace();
    let config = dir.path().join("bad.yaml");
    fs::write(
        &config,
        r##"
scoring:
  growth:
    caps: { wage: 0 }
scale:
  colors:
    - { range: "top", color: "#00ff00" }
"##,
    )
    .unwrap();

    offmarket(&config)
        .arg("check")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("scoring.growth.caps.wage"))
        .stderr(predicate::str::contains("scale.colors[0].range"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    offmarket(&dir.path().join("missing.yaml"))
        .arg("check")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn init_then_check_succeeds() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("offmarket").join("config.yaml");

    offmarket(&config)
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config written to"));

    assert!(config.exists());

    offmarket(&config)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Config OK"));
}

#[test]
fn scale_lookup_uses_configured_palette() {
    let (dir, _) = workspace();
    let config = dir.path().join("scale.yaml");
    fs::write(
        &config,
        r##"
scale:
  colors:
    - { range: ">=0.5", color: "#123456" }
  heights:
    - { range: ">=0.5", height: 42 }
"##,
    )
    .unwrap();

    offmarket(&config)
        .args(["scale", "0.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Color: #123456"))
        .stdout(predicate::str::contains("Height: 42"));

    offmarket(&config)
        .args(["scale", "0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Color: #cccccc"))
        .stdout(predicate::str::contains("Height: 0"));
}
