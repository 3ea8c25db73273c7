// Dweve GEMM Tuner - Benchmark aggregation for GEMM kernel tuning
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end tests of the gemm-tuner binary

use assert_cmd::Command;
use gemm_tuner_test::fixtures::{self, errors};
use gemm_tuner_test::{read_json, write_raw_report_file, write_report_file};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::{tempdir, TempDir};

/// Test helper to create a gemm-tuner command
fn tuner_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gemm-tuner").expect("Failed to find gemm-tuner binary");
    cmd.env_remove("RUST_LOG").env_remove("GEMM_TUNER_MAX_FILE_SIZE");
    cmd
}

fn results_dir(values: &[serde_json::Value]) -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    write_report_file(dir.path(), "sweep", values);
    dir
}

#[test]
fn test_help() {
    tuner_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--benchmark-results"))
        .stdout(predicate::str::contains("--tolerance"));
}

#[test]
fn test_missing_required_argument() {
    tuner_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--benchmark-results"));
}

#[test]
fn test_prints_result_table() {
    let input = results_dir(&fixtures::mixed_sweep());

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("GEMM Tuning Results"))
        .stdout(predicate::str::contains("8 recorded, 0 skipped"))
        .stdout(predicate::str::contains("ReshapedOnlyRHS"))
        .stdout(predicate::str::contains("2/2 votes"))
        .stderr(predicate::str::contains("Searching for benchmark reports"))
        .stderr(predicate::str::contains("Best GEMM config for Native is 4,4,4"));
}

#[test]
fn test_debug_flag_logs_votes() {
    let input = results_dir(&fixtures::vote_sweep());

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("-D")
        .assert()
        .success()
        .stderr(predicate::str::contains("Config votes for Native"))
        .stderr(predicate::str::contains("Content:"));
}

#[test]
fn test_export() {
    let input = results_dir(&fixtures::mixed_sweep());
    let output = tempdir().unwrap();
    let out_dir = output.path().join("tuned");

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 written, 0 skipped"));

    assert_eq!(
        read_json(&out_dir.join("gemm_type_selection.json")),
        json!({
            "128,128,128,1": "ReshapedOnlyRHS",
            "64,64,64,1": "Reshaped",
        })
    );
    let native = read_json(&out_dir.join("gemm_config_native.json"));
    assert_eq!(native["64,64,64,1"][0]["GEMMConfig"], "4,4,4");
    assert_eq!(native["64,64,64,1"].as_array().unwrap().len(), 1);
    assert!(out_dir.join("gemm_config_reshaped.json").is_file());
    assert!(out_dir.join("gemm_config_reshapedonlyrhs.json").is_file());
}

#[test]
fn test_all_configs_export() {
    let input = results_dir(&fixtures::mixed_sweep());
    let output = tempdir().unwrap();

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("--all-configs")
        .assert()
        .success();

    let native = read_json(&output.path().join("gemm_config_native.json"));
    assert_eq!(native["64,64,64,1"].as_array().unwrap().len(), 2);
}

#[test]
fn test_existing_output_prompts() {
    let input = results_dir(&fixtures::near_tie_sweep());
    let output = tempdir().unwrap();
    let selection = output.path().join("gemm_type_selection.json");
    fs::write(&selection, "old").unwrap();

    // Declined: the file is kept
    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("[Y/N]"))
        .stdout(predicate::str::contains("1 written, 1 skipped"));
    assert_eq!(fs::read_to_string(&selection).unwrap(), "old");

    // Accepted: the file is replaced
    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .write_stdin("y\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 written, 0 skipped"));
    assert_eq!(
        read_json(&selection),
        json!({ "32,32,32,1": "Native" })
    );
}

#[test]
fn test_force_overwrites_without_asking() {
    let input = results_dir(&fixtures::near_tie_sweep());
    let output = tempdir().unwrap();
    let selection = output.path().join("gemm_type_selection.json");
    fs::write(&selection, "old").unwrap();

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("--force")
        .assert()
        .success()
        .stderr(predicate::str::contains("[Y/N]").not());
    assert_eq!(read_json(&selection), json!({ "32,32,32,1": "Native" }));
}

#[test]
fn test_bad_reports_are_skipped_or_fatal() {
    let mut values = fixtures::near_tie_sweep();
    values.push(errors::unknown_instrument_report());
    let input = results_dir(&values);

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 recorded, 1 skipped"))
        .stderr(predicate::str::contains("Skipping report"))
        .stderr(predicate::str::contains("WallClockTimer/gemm_kernel"));

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Unknown instrument"));
}

#[test]
fn test_report_without_timings_is_skipped() {
    let mut values = fixtures::near_tie_sweep();
    values.push(json!({
        "CommandLine": "./bin/benchmark_cl_gemm_native --example_args=32,32,32,1,2,2,2",
        "tests": { "examples/benchmark_cl_gemm_native": {} }
    }));
    values.push(json!({
        "CommandLine": "./bin/benchmark_cl_gemm_native --example_args=32,32,32,1,1,1,1",
        "tests": { "examples/benchmark_cl_gemm_native": { "measurements": {} } }
    }));
    let input = results_dir(&values);
    let output = tempdir().unwrap();

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 recorded, 2 skipped"));

    let configs = read_json(&output.path().join("gemm_config_native.json"));
    let best: Vec<&str> = configs["32,32,32,1"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["GEMMConfig"].as_str().unwrap())
        .collect();
    assert_eq!(best, vec!["4,4,4", "8,8,8"]);
}

#[test]
fn test_broken_file_is_skipped() {
    let input = results_dir(&fixtures::near_tie_sweep());
    write_raw_report_file(input.path(), "broken", "not json");

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 recorded, 1 skipped"))
        .stderr(predicate::str::contains("Skipping file"));
}

#[test]
fn test_file_size_limit_from_env() {
    let input = results_dir(&fixtures::near_tie_sweep());

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("--strict")
        .env("GEMM_TUNER_MAX_FILE_SIZE", "10")
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

#[test]
fn test_min_method_and_tolerance() {
    let input = results_dir(&fixtures::near_tie_sweep());

    // With a zero tolerance only the fastest configuration survives
    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .args(["-t", "0", "-m", "min"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 votes"));
}

#[test]
fn test_invalid_arguments() {
    let input = results_dir(&fixtures::near_tie_sweep());

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .arg("--tolerance=-1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance"));

    tuner_cmd()
        .arg("-b")
        .arg(input.path())
        .args(["-m", "median"])
        .assert()
        .failure();
}

#[test]
fn test_missing_or_empty_input() {
    tuner_cmd()
        .args(["-b", "/nonexistent/gemm/results"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));

    let empty = tempdir().unwrap();
    tuner_cmd()
        .arg("-b")
        .arg(empty.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no benchmark observations"));
}
