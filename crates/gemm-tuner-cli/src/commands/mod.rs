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

//! CLI command implementations

mod prompt;
mod tune;

pub use prompt::OverwritePrompt;
pub use tune::{tune, TuneOptions, TuneOutcome};

use crate::error::CliError;
use gemm_tuner_json::stream::DEFAULT_MAX_FILE_SIZE;
use gemm_tuner_json::ReadConfig;
use std::io::Write;

/// Environment variable overriding the maximum report file size, in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "GEMM_TUNER_MAX_FILE_SIZE";

/// Get the maximum report file size from the environment or use the default.
///
/// Falls back to 1 GB when the variable is unset or not a number.
pub fn max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Report reading configuration for the CLI.
pub fn read_config() -> ReadConfig {
    ReadConfig {
        max_file_size: max_file_size(),
    }
}

/// Write command output to `out` (stdout in the binary) and flush it.
pub fn write_output<W: Write>(out: &mut W, content: &str) -> Result<(), CliError> {
    out.write_all(content.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| CliError::io_error("<stdout>", e))
}
