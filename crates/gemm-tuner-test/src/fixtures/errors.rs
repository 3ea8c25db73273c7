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

//! Reports that must fail extraction.

use super::builders::ReportBuilder;
use serde_json::{json, Value as JsonValue};

/// Reports that extract as `MalformedReport`, with a short description.
pub fn malformed_reports() -> Vec<(&'static str, JsonValue)> {
    vec![
        (
            "wrong_argument_count",
            ReportBuilder::native("8,8,8,1", "4,4").kernel(&[1.0]).build(),
        ),
        (
            "missing_example_args",
            ReportBuilder::native("8,8,8,1", "4,4,4")
                .without_example_args()
                .kernel(&[1.0])
                .build(),
        ),
        (
            "zero_dimension",
            ReportBuilder::native("0,8,8,1", "4,4,4").kernel(&[1.0]).build(),
        ),
        (
            "non_integer_field",
            ReportBuilder::native("8,8,8,1", "4,x,4").kernel(&[1.0]).build(),
        ),
        (
            "bad_flag",
            ReportBuilder::reshaped_rhs_only("8,8,8,1", "4,4,4,2,2,0")
                .kernel(&[1.0])
                .build(),
        ),
        (
            "empty_samples",
            ReportBuilder::native("8,8,8,1", "4,4,4").kernel(&[]).build(),
        ),
        (
            "reshape_without_kernel",
            ReportBuilder::reshaped_rhs_only("8,8,8,1", "4,4,4,2,1,0")
                .reshape(&[0.5])
                .build(),
        ),
        (
            "missing_measurements",
            json!({
                "CommandLine": "./bin/benchmark_cl_gemm_native --example_args=8,8,8,1,4,4,4",
                "tests": { "examples/benchmark_cl_gemm_native": {} }
            }),
        ),
        (
            "two_tests",
            json!({
                "CommandLine": "./bin/benchmark_cl_gemm_native --example_args=8,8,8,1,4,4,4",
                "tests": {
                    "benchmark_cl_gemm_native": { "measurements": {} },
                    "benchmark_cl_gemm_native_copy": { "measurements": {} }
                }
            }),
        ),
        (
            "schema_mismatch",
            json!({ "tests": "not an object" }),
        ),
    ]
}

/// A report of an example that is not a GEMM tuning example.
pub fn unknown_strategy_report() -> JsonValue {
    ReportBuilder::for_example("benchmark_cl_gemm_lowp", "8,8,8,1,4,4,4")
        .kernel(&[1.0])
        .build()
}

/// A report timed with an instrument other than `OpenCLTimer`.
pub fn unknown_instrument_report() -> JsonValue {
    ReportBuilder::native("8,8,8,1", "4,4,4")
        .instrument("WallClockTimer/gemm_kernel", &[1.0])
        .build()
}
