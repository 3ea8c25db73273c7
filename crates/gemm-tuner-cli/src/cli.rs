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

//! Command-line arguments.

use crate::commands::{tune, write_output, OverwritePrompt, TuneOptions};
use crate::error::CliError;
use clap::Parser;
use gemm_tuner_core::{MeasurementMethod, DEFAULT_TOLERANCE};
use gemm_tuner_json::OverwritePolicy;
use std::io;
use std::path::PathBuf;

/// GEMM Tuner - pick GEMM kernel configurations from benchmark sweeps
///
/// Reads every `.gemmtuner_benchmark` report under a directory, selects the
/// best configurations per problem shape and strategy, and votes on a default
/// configuration per strategy.
///
/// # Examples
///
/// ```bash
/// # Print the tuning result
/// gemm-tuner -b results/
///
/// # Export JSON files, overwriting previous ones
/// gemm-tuner -b results/ -o tuned/ --force
///
/// # Use a tighter tolerance and the fastest sample of each run
/// gemm-tuner -b results/ -t 0.001 -m min
/// ```
#[derive(Parser, Debug)]
#[command(name = "gemm-tuner")]
#[command(author, version, about = "GEMM Tuner - benchmark aggregation for GEMM kernel tuning", long_about = None)]
pub struct Cli {
    /// Directory holding the benchmark report files (searched recursively)
    #[arg(short = 'b', long = "benchmark-results", value_name = "PATH")]
    pub benchmark_results: PathBuf,

    /// Directory to export the JSON results to
    #[arg(short = 'o', long = "output-dir", value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Maximum cost difference in ms for a configuration to count as best
    #[arg(short = 't', long, value_name = "MS", default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// How the raw samples of a run are reduced: min or avg
    #[arg(short = 'm', long = "measurement-method", default_value_t = MeasurementMethod::Avg)]
    pub measurement_method: MeasurementMethod,

    /// Export every recorded configuration instead of the best ones only
    #[arg(long)]
    pub all_configs: bool,

    /// Overwrite existing output files without asking
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Abort on the first bad report instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(short = 'D', long)]
    pub debug: bool,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_directive(&self) -> String {
        let level = if self.debug { "debug" } else { "info" };
        format!("gemm_tuner_cli={0},gemm_tuner_json={0}", level)
    }

    pub fn options(&self) -> TuneOptions {
        TuneOptions {
            benchmark_results: self.benchmark_results.clone(),
            output_dir: self.output_dir.clone(),
            tolerance: self.tolerance,
            measurement_method: self.measurement_method,
            only_best_config: !self.all_configs,
            strict: self.strict,
        }
    }

    /// Run the pipeline and print the result table to stdout.
    pub fn execute(&self) -> Result<(), CliError> {
        let options = self.options();
        let outcome = if self.force {
            tune(&options, &mut OverwritePolicy::Always)?
        } else {
            tune(&options, &mut OverwritePrompt::stdio())?
        };
        write_output(&mut io::stdout().lock(), &outcome.render())
    }
}
