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

//! Structured error types for the GEMM tuner CLI.
//!
//! All CLI operations return `Result<T, CliError>`; library errors convert
//! with `?`.

use gemm_tuner_core::TunerError;
use gemm_tuner_json::ReportError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use gemm_tuner_cli::error::CliError;
///
/// fn check_dir(path: &str) -> Result<(), CliError> {
///     std::fs::read_dir(path).map_err(|e| CliError::io_error(path, e))?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed outside of report reading or export.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Reading a report file or writing an export failed.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Invalid tuning parameters or a report rejected in strict mode.
    #[error(transparent)]
    Tuner(#[from] TunerError),

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    ///
    /// ```rust
    /// use gemm_tuner_cli::error::CliError;
    ///
    /// let err = CliError::invalid_input("no benchmark reports found");
    /// assert_eq!(err.to_string(), "Invalid input: no benchmark reports found");
    /// ```
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
