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

//! Fluent builders for benchmark reports and observations.

use gemm_tuner_core::{GemmConfig, Measurement, Observation, ProblemShape, Strategy};
use serde_json::{json, Map, Value as JsonValue};

/// Example binary launched for each strategy.
pub fn example_name(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Native => "benchmark_cl_gemm_native",
        Strategy::ReshapedOnlyRhs => "benchmark_cl_gemm_reshaped_rhs_only",
        Strategy::Reshaped => "benchmark_cl_gemm_reshaped",
    }
}

/// Builder for one report object as the benchmark runner writes it.
///
/// # Examples
///
/// ```
/// use gemm_tuner_test::fixtures::builders::ReportBuilder;
///
/// let report = ReportBuilder::reshaped("64,64,64,1", "4,4,4,2,2,1,0,1")
///     .reshape(&[0.5])
///     .kernel(&[2.0, 2.5])
///     .build();
///
/// let tests = report["tests"].as_object().unwrap();
/// assert_eq!(tests.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    example: String,
    example_args: Option<String>,
    extra_args: Vec<String>,
    measurements: Map<String, JsonValue>,
}

impl ReportBuilder {
    /// Report of `strategy`'s example for `shape` and `config`, both in
    /// comma-separated form.
    pub fn new(strategy: Strategy, shape: &str, config: &str) -> Self {
        Self::for_example(example_name(strategy), format!("{},{}", shape, config))
    }

    pub fn native(shape: &str, config: &str) -> Self {
        Self::new(Strategy::Native, shape, config)
    }

    pub fn reshaped_rhs_only(shape: &str, config: &str) -> Self {
        Self::new(Strategy::ReshapedOnlyRhs, shape, config)
    }

    pub fn reshaped(shape: &str, config: &str) -> Self {
        Self::new(Strategy::Reshaped, shape, config)
    }

    /// Report of an arbitrary example with raw `example_args`.
    pub fn for_example(example: impl Into<String>, example_args: impl Into<String>) -> Self {
        Self {
            example: example.into(),
            example_args: Some(example_args.into()),
            extra_args: Vec::new(),
            measurements: Map::new(),
        }
    }

    /// Drop the `example_args` argument from the command line.
    pub fn without_example_args(mut self) -> Self {
        self.example_args = None;
        self
    }

    /// Append a raw command-line token.
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.extra_args.push(token.into());
        self
    }

    /// Add samples under an arbitrary instrument key.
    pub fn instrument(mut self, key: impl Into<String>, raw: &[f64]) -> Self {
        self.measurements.insert(key.into(), json!({ "raw": raw }));
        self
    }

    /// Add kernel samples (`OpenCLTimer/gemm_kernel`).
    pub fn kernel(self, raw: &[f64]) -> Self {
        self.instrument("OpenCLTimer/gemm_kernel", raw)
    }

    /// Add reshape samples (`OpenCLTimer/reshape_rhs_kernel`).
    pub fn reshape(self, raw: &[f64]) -> Self {
        self.instrument("OpenCLTimer/reshape_rhs_kernel", raw)
    }

    /// Build the report object.
    pub fn build(self) -> JsonValue {
        let mut command_line = format!("./bin/{}", self.example);
        if let Some(args) = &self.example_args {
            command_line.push_str(&format!(" --example_args={}", args));
        }
        for token in &self.extra_args {
            command_line.push(' ');
            command_line.push_str(token);
        }

        let mut tests = Map::new();
        tests.insert(
            format!("examples/{}", self.example),
            json!({ "measurements": JsonValue::Object(self.measurements) }),
        );

        json!({
            "CommandLine": command_line,
            "Version": "benchmark_runner v1",
            "tests": JsonValue::Object(tests),
        })
    }
}

/// Observation shorthand for core-level tests.
///
/// # Panics
///
/// Panics if `shape`, `config` or the timings are invalid.
pub fn observation(
    shape: &str,
    strategy: Strategy,
    config: &str,
    reshape_ms: f64,
    kernel_ms: f64,
) -> Observation {
    let shape: ProblemShape = shape.parse().expect("valid shape");
    let config = GemmConfig::parse(strategy, config).expect("valid config");
    let measurement = Measurement::new(reshape_ms, kernel_ms).expect("valid timing");
    Observation::new(shape, config, measurement)
}
