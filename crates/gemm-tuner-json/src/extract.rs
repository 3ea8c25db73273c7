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

//! Turn benchmark reports into normalized observations.

use crate::report::BenchmarkReport;
use gemm_tuner_core::{
    Measurement, MeasurementMethod, Observation, ProblemShape, Strategy, TunerError,
};
use std::collections::HashMap;
use tracing::debug;

/// Timing instrument every measurement key must name.
pub const TIMER_INSTRUMENT: &str = "OpenCLTimer";

/// Command-line argument carrying the problem shape and configuration.
pub const EXAMPLE_ARGS: &str = "example_args";

/// Split a benchmark command line into its `name=value` arguments.
///
/// The program path is dropped, leading dashes are stripped from names and
/// tokens without `=` are ignored.
///
/// ```
/// use gemm_tuner_json::extract::parse_command_line;
///
/// let args = parse_command_line("./bench --example_args=1,2 -mode=fast --verbose");
/// assert_eq!(args.get("example_args").map(String::as_str), Some("1,2"));
/// assert_eq!(args.get("mode").map(String::as_str), Some("fast"));
/// assert!(!args.contains_key("verbose"));
/// ```
pub fn parse_command_line(command_line: &str) -> HashMap<String, String> {
    command_line
        .split_whitespace()
        .skip(1)
        .filter_map(|token| token.split_once('='))
        .map(|(name, value)| (name.trim_start_matches('-').to_string(), value.to_string()))
        .collect()
}

/// Extract the observation recorded by one benchmark report.
///
/// # Errors
///
/// - `MalformedReport` if the report does not hold exactly one test, the
///   example arguments are missing or have the wrong field count, a field
///   does not parse, an instrument has no samples, or no kernel phase was
///   timed
/// - `UnknownStrategy` if the example name is not a known GEMM example
/// - `UnknownInstrument` if a measurement key is not `OpenCLTimer/<phase>`
pub fn extract_observation(
    report: &BenchmarkReport,
    method: MeasurementMethod,
) -> Result<Observation, TunerError> {
    if report.tests.len() != 1 {
        return Err(TunerError::malformed(format!(
            "expected exactly 1 test entry, found {}",
            report.tests.len()
        )));
    }
    let Some((example_path, entry)) = report.tests.iter().next() else {
        return Err(TunerError::malformed("report has no test entry"));
    };

    let example = example_path
        .rsplit(&['/', '\\'][..])
        .next()
        .unwrap_or(example_path);
    let strategy = Strategy::from_example_name(example)?;

    let args = parse_command_line(&report.command_line);
    let example_args = args.get(EXAMPLE_ARGS).ok_or_else(|| {
        TunerError::malformed(format!("command line has no '{}' argument", EXAMPLE_ARGS))
    })?;
    let fields: Vec<&str> = example_args.split(',').collect();
    let expected = ProblemShape::ARITY + strategy.config_arity();
    if fields.len() != expected {
        return Err(TunerError::malformed(format!(
            "{} has {} fields, strategy {} expects {}",
            EXAMPLE_ARGS,
            fields.len(),
            strategy,
            expected
        )));
    }
    let (shape_fields, config_fields) = fields.split_at(ProblemShape::ARITY);
    let shape = ProblemShape::from_fields(shape_fields)?;
    let config = strategy.parse_config(config_fields)?;

    let mut reshape_ms = 0.0;
    let mut kernel_ms = None;
    for (key, samples) in &entry.measurements {
        let phase = match key.split_once('/') {
            Some((instrument, phase)) if instrument == TIMER_INSTRUMENT => phase,
            _ => return Err(TunerError::UnknownInstrument(key.clone())),
        };
        let value = method.reduce(&samples.raw).ok_or_else(|| {
            TunerError::malformed(format!("instrument '{}' has no raw samples", key))
        })?;

        if phase.split('_').any(|word| word == "reshape") {
            if !strategy.has_reshape_phase() {
                debug!("{} example reports a reshape phase ('{}')", strategy, key);
            }
            reshape_ms = value;
        } else {
            kernel_ms = Some(value);
        }
    }
    let kernel_ms = kernel_ms.ok_or_else(|| {
        TunerError::malformed(format!("{} run of {} has no kernel timing", strategy, shape))
    })?;

    let measurement = Measurement::new(reshape_ms, kernel_ms)
        .map_err(|e| TunerError::malformed(format!("bad timing for {}: {}", shape, e)))?;

    Ok(Observation::new(shape, config, measurement))
}
