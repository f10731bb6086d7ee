// The cargo_bin! macro requires build script setup that's overkill for simple tests.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

const SCENARIO: &str = r#"{
    "rules": {
        "production_types": [
            { "id": "food" },
            { "id": "rations", "difficulty_level_multiplier_applies": true },
            { "id": "production", "difficulty_level_multiplier_applies": true },
            { "id": "gold", "difficulty_level_multiplier_applies": true }
        ],
        "tile_types": [
            { "id": "grassland", "doubled_food": 3 },
            { "id": "hills", "doubled_food": 1, "production_bonus": 3 }
        ],
        "races": [{
            "id": "high_men",
            "population_tasks": [
                { "task": "farmer", "productions": [{ "production_type": "rations", "doubled_amount": 4 }] },
                { "task": "worker", "productions": [{ "production_type": "production", "doubled_amount": 4 }] }
            ]
        }],
        "tax_rates": [{ "id": "tax_1", "doubled_gold_per_person": 2, "unrest_percentage": 10 }]
    },
    "map_size": { "width": 12, "height": 10, "depth": 1 },
    "default_tile_type": "grassland",
    "tiles": [{ "x": 6, "y": 4, "tile_type": "hills" }],
    "cities": [
        { "x": 5, "y": 5, "name": "Ashford", "owner": 1, "race": "high_men", "population": 8000, "minimum_farmers": 3 },
        { "x": 1, "y": 1, "name": "Brindle", "owner": 1, "race": "high_men", "population": 3000, "minimum_farmers": 1 }
    ],
    "players": [{ "player_id": 1, "human": true, "tax_rate": "tax_1" }]
}"#;

fn scenario_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(SCENARIO.as_bytes()).expect("write scenario");
    file
}

#[test]
fn test_missing_scenario_fails_with_path() {
    let output = Command::new(cargo_bin("citycalc"))
        .arg("--scenario")
        .arg("/nonexistent/scenario.json")
        .output()
        .expect("failed to execute process");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("nonexistent") || stderr.contains("No such file"),
        "Should fail with a path error. Stderr: {}",
        stderr
    );
}

#[test]
fn test_help_flag() {
    let output = Command::new(cargo_bin("citycalc"))
        .arg("--help")
        .output()
        .expect("failed to execute");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--scenario"));
}

#[test]
fn test_reports_every_city() {
    let file = scenario_file();
    AssertCommand::cargo_bin("citycalc")
        .unwrap()
        .arg("--scenario")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Brindle at (1, 1, 0)"))
        .stdout(predicate::str::contains("Ashford at (5, 5, 0)"))
        .stdout(predicate::str::contains("rebels 1 of 8 (10% unrest)"));
}

#[test]
fn test_single_city_as_json() {
    let file = scenario_file();
    let output = AssertCommand::cargo_bin("citycalc")
        .unwrap()
        .arg("--scenario")
        .arg(file.path())
        .args(["--x", "5", "--y", "5", "--json"])
        .output()
        .expect("failed to execute");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is one JSON report");
    assert_eq!(report["name"], "Ashford");
    assert_eq!(report["max_city_size"], 25);
    assert_eq!(report["growth"]["state"], "growing");
    assert_eq!(report["unrest"]["final_total"], 1);
}

#[test]
fn test_no_city_at_location() {
    let file = scenario_file();
    AssertCommand::cargo_bin("citycalc")
        .unwrap()
        .arg("--scenario")
        .arg(file.path())
        .args(["--x", "9", "--y", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("City"));
}
