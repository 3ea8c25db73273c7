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

//! Error types for report reading and export.

use gemm_tuner_core::TunerError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Report I/O and extraction errors.
///
/// File-level failures (`Io`, `Json`, `FileTooLarge`) abandon every report in
/// the file. `Extraction` covers a single report and records where it came
/// from so callers can skip it and carry on.
///
/// # Examples
///
/// ```
/// use gemm_tuner_json::ReportError;
/// use std::io;
///
/// let err = ReportError::io("out/gemm_type_selection.json", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
/// assert!(err.to_string().contains("gemm_type_selection.json"));
/// ```
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    /// File read, write or metadata access failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A report file is not a JSON list of objects, or output could not be
    /// serialized.
    #[error("JSON error for '{path}': {message}")]
    Json {
        /// The file being read or written
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Report file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// The oversized file
        path: PathBuf,
        /// Its size in bytes
        actual: u64,
        /// The configured limit in bytes
        max: u64,
    },

    /// One report in a file could not be turned into an observation.
    #[error("Report #{index} in '{path}': {source}")]
    Extraction {
        /// The file holding the report
        path: PathBuf,
        /// Position of the report in the file (0-based)
        index: usize,
        /// Why extraction failed
        #[source]
        source: TunerError,
    },
}

impl ReportError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a JSON error with path context.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Whether the error concerns a single report rather than a whole file.
    pub fn is_per_report(&self) -> bool {
        matches!(self, Self::Extraction { .. })
    }
}
