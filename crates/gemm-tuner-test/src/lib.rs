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

//! GEMM Tuner Test Utilities
//!
//! Shared fixtures for the GEMM tuner crates: report builders producing the
//! benchmark runner's JSON, ready-made sweeps, invalid reports, and helpers
//! for laying report files out on disk.
//!
//! # Quick Start
//!
//! ```rust
//! use gemm_tuner_test::fixtures::{self, builders::ReportBuilder};
//!
//! // A single native run
//! let report = ReportBuilder::native("32,32,32,1", "4,4,4")
//!     .kernel(&[1.0, 1.2])
//!     .build();
//! assert!(report["CommandLine"].as_str().unwrap().contains("example_args=32,32,32,1,4,4,4"));
//!
//! // A complete sweep over two shapes and all three strategies
//! let sweep = fixtures::mixed_sweep();
//! assert_eq!(sweep.len(), 8);
//! ```

pub use gemm_tuner_core::REPORT_EXTENSION;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};

pub mod fixtures;

/// Write `reports` as a JSON list to `dir/<name>.gemmtuner_benchmark`,
/// creating `dir` if needed.
///
/// # Panics
///
/// Panics if the directory or file cannot be written.
pub fn write_report_file(dir: &Path, name: &str, reports: &[JsonValue]) -> PathBuf {
    fs::create_dir_all(dir).expect("create report directory");
    let path = dir.join(format!("{}.{}", name, REPORT_EXTENSION));
    let content = serde_json::to_string_pretty(reports).expect("serialize reports");
    fs::write(&path, content).expect("write report file");
    path
}

/// Write raw text to `dir/<name>.gemmtuner_benchmark`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_raw_report_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("create report directory");
    let path = dir.join(format!("{}.{}", name, REPORT_EXTENSION));
    fs::write(&path, content).expect("write report file");
    path
}

/// Read and parse a JSON file written by an export.
///
/// # Panics
///
/// Panics if the file is missing or not JSON.
pub fn read_json(path: &Path) -> JsonValue {
    let content = fs::read_to_string(path).expect("read exported file");
    serde_json::from_str(&content).expect("exported file is JSON")
}
