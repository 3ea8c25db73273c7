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

//! Export of tuning results to a directory of JSON files.
//!
//! The output directory receives:
//!
//! - `gemm_type_selection.json`: problem shape to winning strategy name
//! - `gemm_config_<strategy>.json`: problem shape to a list of
//!   configuration entries, one file per strategy in the store
//!
//! Existing files are never replaced without consent from a
//! [`ConfirmOverwrite`] implementation.

use crate::error::ReportError;
use gemm_tuner_core::{BestConfigs, Observation, ResultStore, Strategy, StrategySelection};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the strategy selection file.
pub const STRATEGY_SELECTION_FILE: &str = "gemm_type_selection.json";

/// Name of the configuration file of one strategy.
///
/// ```
/// use gemm_tuner_core::Strategy;
/// use gemm_tuner_json::export::config_file_name;
///
/// assert_eq!(config_file_name(Strategy::ReshapedOnlyRhs), "gemm_config_reshapedonlyrhs.json");
/// ```
pub fn config_file_name(strategy: Strategy) -> String {
    format!("gemm_config_{}.json", strategy.name().to_lowercase())
}

/// Configuration for export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Export only the best-configuration sets. When false, every recorded
    /// observation is exported.
    /// Default: true
    pub only_best_config: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            only_best_config: true,
        }
    }
}

/// Decides whether an existing output file may be replaced.
pub trait ConfirmOverwrite {
    /// Return true to overwrite `path`, false to leave it untouched.
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
}

/// Fixed overwrite answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Keep every existing file.
    #[default]
    Never,
    /// Replace every existing file.
    Always,
}

impl ConfirmOverwrite for OverwritePolicy {
    fn confirm_overwrite(&mut self, _path: &Path) -> bool {
        matches!(self, OverwritePolicy::Always)
    }
}

impl<F> ConfirmOverwrite for F
where
    F: FnMut(&Path) -> bool,
{
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        self(path)
    }
}

/// One configuration entry of a `gemm_config_*.json` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigEntry {
    #[serde(rename = "GEMMConfig")]
    pub config: String,
    #[serde(rename = "OpenCL_Timer_ms_reshape")]
    pub reshape_ms: String,
    #[serde(rename = "OpenCL_Timer_ms_kernel")]
    pub kernel_ms: String,
}

impl From<&Observation> for ConfigEntry {
    fn from(obs: &Observation) -> Self {
        Self {
            config: obs.config.to_string(),
            reshape_ms: format_ms(obs.measurement.reshape_ms()),
            kernel_ms: format_ms(obs.measurement.kernel_ms()),
        }
    }
}

/// Shortest round-trip digits, with a signed exponent of at least two
/// digits below 1e-4 and from 1e16 up (`1e-05`, `2.5e+16`).
fn format_ms(value: f64) -> String {
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Files written and skipped by one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Problem shape to winning strategy name.
pub fn strategy_selection_json(selection: &StrategySelection) -> BTreeMap<String, String> {
    selection
        .iter()
        .map(|(shape, choice)| (shape.to_string(), choice.strategy.name().to_string()))
        .collect()
}

/// Problem shape to configuration entries, in observation order per shape.
pub fn config_json<'a, I>(observations: I) -> BTreeMap<String, Vec<ConfigEntry>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut out: BTreeMap<String, Vec<ConfigEntry>> = BTreeMap::new();
    for obs in observations {
        out.entry(obs.shape.to_string())
            .or_default()
            .push(ConfigEntry::from(obs));
    }
    out
}

/// Writes tuning results to an output directory.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    out_dir: PathBuf,
    config: ExportConfig,
}

impl ReportExporter {
    pub fn new(out_dir: impl Into<PathBuf>, config: ExportConfig) -> Self {
        Self {
            out_dir: out_dir.into(),
            config,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write the selection file, then one configuration file per strategy
    /// in the order strategies were first recorded.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created, a file's existence
    /// cannot be checked or a file cannot be written.
    pub fn export(
        &self,
        store: &ResultStore,
        best: &BestConfigs,
        selection: &StrategySelection,
        confirm: &mut dyn ConfirmOverwrite,
    ) -> Result<ExportSummary, ReportError> {
        if !self.out_dir.is_dir() {
            fs::create_dir_all(&self.out_dir).map_err(|e| ReportError::io(&self.out_dir, e))?;
            info!("Created output directory {}", self.out_dir.display());
        }

        let mut summary = ExportSummary::default();

        let path = self.out_dir.join(STRATEGY_SELECTION_FILE);
        self.write_json(&path, &strategy_selection_json(selection), confirm, &mut summary)?;

        for &strategy in store.strategies() {
            let entries = if self.config.only_best_config {
                let observations: Vec<Observation> = best.flatten_strategy(strategy).collect();
                config_json(&observations)
            } else {
                config_json(store.all().filter(|obs| obs.strategy == strategy))
            };
            let path = self.out_dir.join(config_file_name(strategy));
            self.write_json(&path, &entries, confirm, &mut summary)?;
        }

        Ok(summary)
    }

    fn write_json<T: Serialize>(
        &self,
        path: &Path,
        value: &T,
        confirm: &mut dyn ConfirmOverwrite,
        summary: &mut ExportSummary,
    ) -> Result<(), ReportError> {
        let exists = path.try_exists().map_err(|e| ReportError::io(path, e))?;
        if exists && !confirm.confirm_overwrite(path) {
            info!("Skipping existing file {}", path.display());
            summary.skipped.push(path.to_path_buf());
            return Ok(());
        }

        let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value).map_err(|e| ReportError::json(path, e))?;
        writer.flush().map_err(|e| ReportError::io(path, e))?;

        info!("Saved {}", path.display());
        summary.written.push(path.to_path_buf());
        Ok(())
    }
}
