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

//! Tune command - aggregate benchmark reports into tuning decisions

use super::read_config;
use crate::error::CliError;
use colored::Colorize;
use gemm_tuner_core::{
    BestConfigSelector, ConfigDistribution, MeasurementMethod, ResultStore, SelectorConfig,
    Strategy, StrategySelection, StrategySelector, SummaryLevel, DEFAULT_TOLERANCE,
};
use gemm_tuner_json::{ConfirmOverwrite, ExportConfig, ExportSummary, ReportExporter, ReportStream};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Options of one tuning run.
#[derive(Debug, Clone)]
pub struct TuneOptions {
    /// Directory searched recursively for report files.
    pub benchmark_results: PathBuf,
    /// Export destination; nothing is written when `None`.
    pub output_dir: Option<PathBuf>,
    pub tolerance: f64,
    pub measurement_method: MeasurementMethod,
    /// Export only best-configuration sets.
    pub only_best_config: bool,
    /// Fail on the first bad report or file instead of skipping it.
    pub strict: bool,
}

impl TuneOptions {
    pub fn new(benchmark_results: impl Into<PathBuf>) -> Self {
        Self {
            benchmark_results: benchmark_results.into(),
            output_dir: None,
            tolerance: DEFAULT_TOLERANCE,
            measurement_method: MeasurementMethod::default(),
            only_best_config: true,
            strict: false,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_measurement_method(mut self, method: MeasurementMethod) -> Self {
        self.measurement_method = method;
        self
    }

    pub fn with_all_configs(mut self) -> Self {
        self.only_best_config = false;
        self
    }

    pub fn with_strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Result of a tuning run.
#[derive(Debug, Clone)]
pub struct TuneOutcome {
    /// Observations recorded.
    pub recorded: usize,
    /// Reports and files skipped because they could not be read or extracted.
    pub skipped: usize,
    pub selection: StrategySelection,
    /// Configuration vote of every strategy, in first-seen strategy order.
    pub distributions: Vec<(Strategy, ConfigDistribution)>,
    pub export: Option<(PathBuf, ExportSummary)>,
}

impl TuneOutcome {
    /// Human-readable result table.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "GEMM Tuning Results".bold().underline());
        let _ = writeln!(
            out,
            "{}  {} recorded, {} skipped",
            "Observations:".cyan(),
            self.recorded,
            self.skipped
        );

        let _ = writeln!(out, "{}", "Strategy selection:".cyan());
        for (shape, choice) in self.selection.iter() {
            let _ = writeln!(
                out,
                "  {:<20} {} ({:?} ms)",
                shape.to_string(),
                choice.strategy.name().green(),
                choice.measurement.total()
            );
        }

        let _ = writeln!(out, "{}", "Default configurations:".cyan());
        for (strategy, dist) in &self.distributions {
            if let Some((config, votes)) = dist.best_config() {
                let _ = writeln!(
                    out,
                    "  {:<16} {:<20} {}/{} votes, dispersion {:.4}",
                    strategy.name(),
                    config.to_string().green(),
                    votes,
                    dist.total_votes(),
                    dist.dispersion()
                );
            }
        }

        if let Some((dir, summary)) = &self.export {
            let _ = writeln!(
                out,
                "{}  {} written, {} skipped in {}",
                "Export:".cyan(),
                summary.written.len(),
                summary.skipped.len(),
                dir.display()
            );
            for path in &summary.skipped {
                let _ = writeln!(out, "  {} {}", "kept existing".yellow(), path.display());
            }
        }
        out
    }
}

/// Run the tuning pipeline.
///
/// # Errors
///
/// - `Tuner` if the tolerance is invalid, or a report fails extraction in
///   strict mode
/// - `Report` if the input directory cannot be read, a file fails in strict
///   mode, or the export fails
/// - `InvalidInput` if no observation could be recorded
pub fn tune(
    options: &TuneOptions,
    confirm: &mut dyn ConfirmOverwrite,
) -> Result<TuneOutcome, CliError> {
    let selector =
        BestConfigSelector::new(SelectorConfig::default().with_tolerance(options.tolerance))?;

    info!(
        "Searching for benchmark reports in {}",
        options.benchmark_results.display()
    );
    let stream = ReportStream::from_dir(&options.benchmark_results, read_config())?;

    let mut store = ResultStore::new();
    let mut skipped = 0;
    for result in stream.observations(options.measurement_method) {
        match result {
            Ok(obs) => store.add(obs),
            Err(e) if options.strict => return Err(e.into()),
            Err(e) if e.is_per_report() => {
                warn!("Skipping report: {}", e);
                skipped += 1;
            }
            Err(e) => {
                warn!("Skipping file: {}", e);
                skipped += 1;
            }
        }
    }

    if store.is_empty() {
        return Err(CliError::invalid_input(format!(
            "no benchmark observations found in '{}'",
            options.benchmark_results.display()
        )));
    }

    info!("{}", store.summary(SummaryLevel::Short));
    debug!("{}", store.summary(SummaryLevel::Detailed));

    let best = selector.select(&store);
    let selection = StrategySelector.select(&store);
    let distributions = ConfigDistribution::per_strategy(&best);

    for (strategy, dist) in &distributions {
        debug!("Config votes for {}:", strategy);
        for (config, votes) in dist.frequency() {
            debug!("  {}: {}", config, votes);
        }
        if let Some((config, votes)) = dist.best_config() {
            info!(
                "Best GEMM config for {} is {} ({} of {} votes) with std {:.4}",
                strategy,
                config,
                votes,
                dist.total_votes(),
                dist.dispersion()
            );
        }
    }

    let export = match &options.output_dir {
        Some(dir) => {
            let config = ExportConfig {
                only_best_config: options.only_best_config,
            };
            let summary =
                ReportExporter::new(dir, config).export(&store, &best, &selection, confirm)?;
            Some((dir.clone(), summary))
        }
        None => None,
    };

    Ok(TuneOutcome {
        recorded: store.len(),
        skipped,
        selection,
        distributions,
        export,
    })
}
