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

//! Discovery and streaming tests over report files on disk.

use gemm_tuner_core::{MeasurementMethod, ResultStore, TunerError};
use gemm_tuner_json::{discover_reports, ReadConfig, ReportError, ReportStream};
use gemm_tuner_test::fixtures::{self, errors};
use gemm_tuner_test::{write_raw_report_file, write_report_file};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_discovery_is_recursive_sorted_and_filtered() {
    let dir = TempDir::new().unwrap();
    write_report_file(&dir.path().join("b"), "run", &fixtures::near_tie_sweep());
    write_report_file(dir.path(), "z", &fixtures::vote_sweep());
    write_report_file(&dir.path().join("a/nested"), "run", &fixtures::mixed_sweep());
    fs::write(dir.path().join("notes.json"), "[]").unwrap();

    let files = discover_reports(dir.path()).unwrap();
    let relative: Vec<String> = files
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(
        relative,
        vec![
            "a/nested/run.gemmtuner_benchmark",
            "b/run.gemmtuner_benchmark",
            "z.gemmtuner_benchmark",
        ]
    );
}

#[test]
fn test_discovery_of_file_path_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_report_file(dir.path(), "run", &fixtures::near_tie_sweep());
    assert!(matches!(discover_reports(&file), Err(ReportError::Io { .. })));
}

#[test]
fn test_stream_collects_all_observations() {
    let dir = TempDir::new().unwrap();
    write_report_file(dir.path(), "mixed", &fixtures::mixed_sweep());
    write_report_file(dir.path(), "votes", &fixtures::vote_sweep());

    let store: ResultStore = ReportStream::from_dir(dir.path(), ReadConfig::default())
        .unwrap()
        .observations(MeasurementMethod::Avg)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(store.len(), 14);
    assert_eq!(store.strategies().len(), 3);
}

#[test]
fn test_reports_keep_file_position() {
    let dir = TempDir::new().unwrap();
    let path = write_report_file(dir.path(), "ties", &fixtures::near_tie_sweep());

    let reports: Vec<_> = ReportStream::from_dir(dir.path(), ReadConfig::default())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(reports.len(), 3);
    for (i, sourced) in reports.iter().enumerate() {
        assert_eq!(sourced.path, path);
        assert_eq!(sourced.index, i);
    }
}

#[test]
fn test_bad_reports_fail_alone() {
    let dir = TempDir::new().unwrap();
    let mut values = fixtures::near_tie_sweep();
    for (_, bad) in errors::malformed_reports() {
        values.push(bad);
    }
    values.push(errors::unknown_strategy_report());
    let path = write_report_file(dir.path(), "mixed_quality", &values);

    let results: Vec<_> = ReportStream::from_dir(dir.path(), ReadConfig::default())
        .unwrap()
        .observations(MeasurementMethod::Avg)
        .collect();

    let good = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(good, 3);

    let failures: Vec<&ReportError> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(failures.len(), errors::malformed_reports().len() + 1);
    for err in &failures {
        match err {
            ReportError::Extraction { path: p, index, .. } => {
                assert_eq!(p, &path);
                assert!(*index >= 3);
            }
            other => panic!("expected a per-report error, got {:?}", other),
        }
    }
    assert!(matches!(
        failures.last(),
        Some(ReportError::Extraction {
            source: TunerError::UnknownStrategy(_),
            ..
        })
    ));
}

#[test]
fn test_file_that_is_not_a_list_fails_whole_and_stream_continues() {
    let dir = TempDir::new().unwrap();
    write_raw_report_file(dir.path(), "a_broken", r#"{"CommandLine": "x"}"#);
    write_report_file(dir.path(), "b_good", &fixtures::near_tie_sweep());

    let mut stream = ReportStream::from_dir(dir.path(), ReadConfig::default())
        .unwrap()
        .observations(MeasurementMethod::Avg);

    assert!(matches!(stream.next(), Some(Err(ReportError::Json { .. }))));
    assert_eq!(stream.filter(|r| r.is_ok()).count(), 3);
}

#[test]
fn test_oversized_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_report_file(dir.path(), "run", &fixtures::mixed_sweep());

    let config = ReadConfig { max_file_size: 16 };
    let mut stream = ReportStream::from_dir(dir.path(), config).unwrap();
    match stream.next() {
        Some(Err(ReportError::FileTooLarge { max, actual, .. })) => {
            assert_eq!(max, 16);
            assert!(actual > 16);
        }
        other => panic!("expected FileTooLarge, got {:?}", other),
    }
    assert!(stream.next().is_none());
}

#[test]
fn test_empty_directory_yields_nothing() {
    let dir = TempDir::new().unwrap();
    let mut stream = ReportStream::from_dir(dir.path(), ReadConfig::default()).unwrap();
    assert!(stream.next().is_none());
}
