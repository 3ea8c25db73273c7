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

//! Lazy discovery and reading of benchmark report files.
//!
//! Reports are read one file at a time: [`ReportStream`] holds only the
//! reports of the file currently being consumed, and [`Observations`] turns
//! them into observations as they are pulled. Both are single-pass; to read
//! a directory again, discover it again.

use crate::error::ReportError;
use crate::extract::extract_observation;
use crate::report::BenchmarkReport;
use gemm_tuner_core::{MeasurementMethod, Observation, TunerError};
use serde_json::value::RawValue;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub use gemm_tuner_core::REPORT_EXTENSION;

/// Default maximum report file size (1 GB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Configuration for reading report files.
#[derive(Debug, Clone)]
pub struct ReadConfig {
    /// Files larger than this many bytes are rejected before being read.
    /// Default: 1 GB
    pub max_file_size: u64,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Find every report file under `dir`, recursively, sorted by path.
///
/// # Errors
///
/// Returns `Io` if `dir` is not a readable directory.
pub fn discover_reports(dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    if !dir.is_dir() {
        return Err(ReportError::io(
            dir,
            io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| {
            let path = entry.path();
            path.is_file() && path.extension().is_some_and(|ext| ext == REPORT_EXTENSION)
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();

    debug!("Found {} report files under {}", files.len(), dir.display());
    Ok(files)
}

/// Read one report file as a list of unparsed JSON report elements.
///
/// Elements are kept as raw text so that each one is checked against the
/// report schema on its own, with repeated keys still visible.
///
/// # Errors
///
/// Returns `FileTooLarge` if the file exceeds `config.max_file_size`, `Io` if
/// it cannot be read and `Json` if it is not a JSON list.
pub fn read_report_file(
    path: &Path,
    config: &ReadConfig,
) -> Result<Vec<Box<RawValue>>, ReportError> {
    let metadata = fs::metadata(path).map_err(|e| ReportError::io(path, e))?;
    if metadata.len() > config.max_file_size {
        return Err(ReportError::FileTooLarge {
            path: path.to_path_buf(),
            actual: metadata.len(),
            max: config.max_file_size,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| ReportError::json(path, e))
}

/// A report together with where it was read from.
#[derive(Debug, Clone)]
pub struct SourcedReport {
    pub path: PathBuf,
    /// Position within the file (0-based).
    pub index: usize,
    pub report: BenchmarkReport,
}

/// Lazily reads report files, yielding their reports one by one.
///
/// A file that cannot be read yields a single error and the stream moves on
/// to the next file. An element that does not match the report schema
/// yields an `Extraction` error for that element only.
#[derive(Debug)]
pub struct ReportStream {
    files: std::vec::IntoIter<PathBuf>,
    current: PathBuf,
    pending: VecDeque<(usize, Box<RawValue>)>,
    config: ReadConfig,
}

impl ReportStream {
    /// Stream the given files in order.
    pub fn new(files: Vec<PathBuf>, config: ReadConfig) -> Self {
        Self {
            files: files.into_iter(),
            current: PathBuf::new(),
            pending: VecDeque::new(),
            config,
        }
    }

    /// Discover and stream every report file under `dir`.
    pub fn from_dir(dir: &Path, config: ReadConfig) -> Result<Self, ReportError> {
        Ok(Self::new(discover_reports(dir)?, config))
    }

    /// Extract observations from the streamed reports.
    pub fn observations(self, method: MeasurementMethod) -> Observations<Self> {
        Observations::new(self, method)
    }
}

impl Iterator for ReportStream {
    type Item = Result<SourcedReport, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((index, raw)) = self.pending.pop_front() {
                let path = self.current.clone();
                return Some(match serde_json::from_str::<BenchmarkReport>(raw.get()) {
                    Ok(report) => Ok(SourcedReport {
                        path,
                        index,
                        report,
                    }),
                    Err(e) => Err(ReportError::Extraction {
                        path,
                        index,
                        source: TunerError::malformed(e.to_string()),
                    }),
                });
            }

            let path = self.files.next()?;
            debug!("Reading {}", path.display());
            match read_report_file(&path, &self.config) {
                Ok(values) => {
                    self.pending = values.into_iter().enumerate().collect();
                    self.current = path;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Single-pass adapter from reports to observations.
#[derive(Debug)]
pub struct Observations<I> {
    reports: I,
    method: MeasurementMethod,
}

impl<I> Observations<I> {
    pub fn new(reports: I, method: MeasurementMethod) -> Self {
        Self { reports, method }
    }
}

impl<I> Iterator for Observations<I>
where
    I: Iterator<Item = Result<SourcedReport, ReportError>>,
{
    type Item = Result<Observation, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        let method = self.method;
        self.reports.next().map(|sourced| {
            let sourced = sourced?;
            extract_observation(&sourced.report, method).map_err(|source| {
                ReportError::Extraction {
                    path: sourced.path,
                    index: sourced.index,
                    source,
                }
            })
        })
    }
}
