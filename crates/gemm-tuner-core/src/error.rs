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

//! Error types for the GEMM tuner data model.

use thiserror::Error;

/// Errors raised while building or combining tuning observations.
///
/// Extraction failures (`MalformedReport`, `UnknownStrategy`,
/// `UnknownInstrument`) abort processing of the offending report only.
/// `InvalidArgument` and `InvalidOperation` indicate caller mistakes.
///
/// # Examples
///
/// ```
/// use gemm_tuner_core::TunerError;
///
/// let err = TunerError::UnknownStrategy("benchmark_cl_gemm_foo".to_string());
/// assert_eq!(
///     err.to_string(),
///     "Unknown strategy for example 'benchmark_cl_gemm_foo'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TunerError {
    /// The report violates the benchmark report contract (wrong number of
    /// tests, wrong argument count, unparseable fields).
    #[error("Malformed report: {0}")]
    MalformedReport(String),

    /// The example name does not map to any known strategy.
    #[error("Unknown strategy for example '{0}'")]
    UnknownStrategy(String),

    /// A timing instrument does not follow the `OpenCLTimer/<phase>` convention.
    #[error("Unknown instrument '{0}'")]
    UnknownInstrument(String),

    /// A caller-supplied argument is out of range or unrecognized.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An arithmetic operation has no defined result.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl TunerError {
    /// Create a malformed-report error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedReport(msg.into())
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, TunerError>;
