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

//! GEMM Tuner JSON
//!
//! Reads the benchmark runner's JSON reports and writes tuning results back
//! out as JSON.
//!
//! # Features
//!
//! - **Report Schema**: serde types for `.gemmtuner_benchmark` report files
//! - **Extraction**: one report to one [`Observation`](gemm_tuner_core::Observation)
//! - **Lazy Reading**: recursive discovery and file-at-a-time streaming
//! - **Export**: strategy selection and per-strategy configuration files,
//!   with explicit overwrite consent
//!
//! # Examples
//!
//! ```rust,no_run
//! use gemm_tuner_core::{
//!     BestConfigSelector, MeasurementMethod, ResultStore, SelectorConfig, StrategySelector,
//! };
//! use gemm_tuner_json::{ExportConfig, OverwritePolicy, ReadConfig, ReportExporter, ReportStream};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = ResultStore::new();
//! for obs in ReportStream::from_dir(Path::new("results"), ReadConfig::default())?
//!     .observations(MeasurementMethod::Avg)
//! {
//!     match obs {
//!         Ok(obs) => store.add(obs),
//!         Err(e) if e.is_per_report() => eprintln!("skipping: {}", e),
//!         Err(e) => return Err(e.into()),
//!     }
//! }
//!
//! let best = BestConfigSelector::new(SelectorConfig::default())?.select(&store);
//! let selection = StrategySelector.select(&store);
//! let summary = ReportExporter::new("out", ExportConfig::default()).export(
//!     &store,
//!     &best,
//!     &selection,
//!     &mut OverwritePolicy::Never,
//! )?;
//! println!("wrote {} files", summary.written.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod extract;
pub mod report;
pub mod stream;

pub use error::ReportError;
pub use export::{
    ConfigEntry, ConfirmOverwrite, ExportConfig, ExportSummary, OverwritePolicy, ReportExporter,
    STRATEGY_SELECTION_FILE,
};
pub use extract::{extract_observation, parse_command_line};
pub use report::{BenchmarkReport, InstrumentSamples, TestEntry};
pub use stream::{
    discover_reports, read_report_file, Observations, ReadConfig, ReportStream, SourcedReport,
    REPORT_EXTENSION,
};
