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

//! GEMM tuner CLI library.
//!
//! Runs the tuning pipeline over a directory of benchmark reports:
//!
//! 1. discover and stream `.gemmtuner_benchmark` files
//! 2. record every observation, skipping bad reports unless `--strict`
//! 3. select best configurations per `(shape, strategy)` and the best
//!    strategy per shape
//! 4. vote on a default configuration per strategy and print the result
//! 5. optionally export the results as JSON to an output directory
//!
//! # Examples
//!
//! ```no_run
//! use gemm_tuner_cli::commands::{tune, TuneOptions};
//! use gemm_tuner_json::OverwritePolicy;
//!
//! # fn main() -> Result<(), gemm_tuner_cli::CliError> {
//! let options = TuneOptions::new("results").with_output_dir("tuned");
//! let outcome = tune(&options, &mut OverwritePolicy::Never)?;
//! print!("{}", outcome.render());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
