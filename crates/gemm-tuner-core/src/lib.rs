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

//! GEMM Tuner Core
//!
//! Reduces a sweep of GEMM benchmark observations into tuning decisions:
//!
//! - the best configuration(s) of every `(problem shape, strategy)` pair,
//!   allowing configurations within a tolerance of the fastest one;
//! - the best strategy of every problem shape;
//! - a per-strategy vote across shapes on which configuration to use by
//!   default, with the dispersion of the vote as a confidence signal.
//!
//! The crate performs no I/O. Report parsing and JSON export live in
//! `gemm-tuner-json`.
//!
//! # Data flow
//!
//! ```text
//! Observation ──► ResultStore ──┬──► BestConfigSelector ──► BestConfigs ──► ConfigDistribution
//!                               └──► StrategySelector   ──► StrategySelection
//! ```
//!
//! # Example
//!
//! ```rust
//! use gemm_tuner_core::{
//!     BestConfigSelector, ConfigDistribution, GemmConfig, Measurement, Observation,
//!     ProblemShape, ResultStore, SelectorConfig, Strategy, StrategySelector,
//! };
//!
//! # fn main() -> Result<(), gemm_tuner_core::TunerError> {
//! let mut store = ResultStore::new();
//! for (shape, config, ms) in [
//!     ("32,32,32,1", "4,4,4", 1.0),
//!     ("32,32,32,1", "8,8,8", 1.005),
//!     ("64,64,64,1", "4,4,4", 2.0),
//! ] {
//!     store.add(Observation::new(
//!         shape.parse()?,
//!         GemmConfig::parse(Strategy::Native, config)?,
//!         Measurement::new(0.0, ms)?,
//!     ));
//! }
//!
//! let best = BestConfigSelector::new(SelectorConfig::default())?.select(&store);
//! let strategies = StrategySelector.select(&store);
//! assert_eq!(strategies.get(&ProblemShape::new(64, 64, 64, 1)?), Some(Strategy::Native));
//!
//! for (strategy, dist) in ConfigDistribution::per_strategy(&best) {
//!     let (config, votes) = dist.best_config().expect("at least one vote");
//!     println!("{}: {} ({} votes, dispersion {:.3})", strategy, config, votes, dist.dispersion());
//! }
//! # Ok(())
//! # }
//! ```

/// File extension of the benchmark runner's report files, without the dot.
pub const REPORT_EXTENSION: &str = "gemmtuner_benchmark";

pub mod distribution;
pub mod error;
pub mod measurement;
pub mod observation;
pub mod select;
pub mod shape;
pub mod store;
pub mod strategy;

pub use distribution::ConfigDistribution;
pub use error::{Result, TunerError};
pub use measurement::{Measurement, MeasurementMethod};
pub use observation::{GroupKey, Observation};
pub use select::{
    BestConfigSelector, BestConfigSet, BestConfigs, SelectorConfig, StrategyChoice,
    StrategySelection, StrategySelector, DEFAULT_TOLERANCE,
};
pub use shape::ProblemShape;
pub use store::{ResultStore, StoreSummary, SummaryLevel};
pub use strategy::{GemmConfig, NativeConfig, ReshapedConfig, ReshapedOnlyRhsConfig, Strategy};
