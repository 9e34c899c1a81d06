//! End-to-end tests of the command-line host.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn viz() -> Command {
    let mut cmd = Command::cargo_bin("alexnet-viz").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_stages_lists_totals() {
    viz()
        .arg("stages")
        .assert()
        .success()
        .stdout(predicate::str::contains("Softmax Output"))
        .stdout(predicate::str::contains("Total parameters: 60600040 (60.60M)"));
}

#[test]
fn test_info_prints_panel() {
    viz()
        .args(["info", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stage 2:"))
        .stdout(predicate::str::contains("Step 2 of 9"));
}

#[test]
fn test_info_out_of_range() {
    viz()
        .args(["info", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error:"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_render_writes_svg() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("softmax.svg");

    viz()
        .args(["render", "9", "--sample", "car", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote stage 9"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Sports Car"));
}

#[test]
fn test_render_with_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("viz.json");
    let out = dir.path().join("input.svg");
    fs::write(&config, r#"{ "container_width": 464, "filter_seed": 1 }"#).unwrap();

    viz()
        .arg("--config")
        .arg(&config)
        .args(["render", "1", "--out"])
        .arg(&out)
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"width="400""#));
}

#[test]
fn test_demo_writes_svg() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("pool.svg");

    viz()
        .args(["demo", "pool", "--step", "3", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote pool demo"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Step 4 of 4"));
}

#[test]
fn test_unknown_demo() {
    viz()
        .args(["demo", "sobel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown demo 'sobel'"));
}

#[test]
fn test_glossary_lookup() {
    viz()
        .args(["glossary", "relu"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ReLU:"));

    viz()
        .args(["glossary", "dropout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no glossary entry for 'dropout'"));
}

#[test]
fn test_walk_from_stdin() {
    viz()
        .arg("walk")
        .write_stdin("\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1 of 9"))
        .stdout(predicate::str::contains("Step 2 of 9"));
}
