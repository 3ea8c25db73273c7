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

//! Ready-made report sweeps.

use super::builders::ReportBuilder;
use serde_json::Value as JsonValue;

/// Two near-tied and one slow native configuration for shape 32,32,32,1.
///
/// At the default tolerance the best set is `4,4,4` then `8,8,8`.
pub fn near_tie_sweep() -> Vec<JsonValue> {
    vec![
        ReportBuilder::native("32,32,32,1", "4,4,4").kernel(&[1.0]).build(),
        ReportBuilder::native("32,32,32,1", "8,8,8").kernel(&[1.005]).build(),
        ReportBuilder::native("32,32,32,1", "2,2,4").kernel(&[2.0]).build(),
    ]
}

/// Two shapes measured with all three strategies.
///
/// - `64,64,64,1`: Reshaped wins (1.5 ms against Native's 2.0 ms)
/// - `128,128,128,1`: ReshapedOnlyRHS wins (3.0 ms)
/// - native consensus: `4,4,4` on both shapes
pub fn mixed_sweep() -> Vec<JsonValue> {
    vec![
        ReportBuilder::native("64,64,64,1", "4,4,4").kernel(&[2.0]).build(),
        ReportBuilder::native("64,64,64,1", "8,8,8").kernel(&[2.5]).build(),
        ReportBuilder::reshaped("64,64,64,1", "4,4,4,2,2,1,0,1")
            .reshape(&[0.25])
            .kernel(&[1.25])
            .build(),
        ReportBuilder::reshaped_rhs_only("64,64,64,1", "4,4,4,2,1,0")
            .reshape(&[0.5])
            .kernel(&[1.75])
            .build(),
        ReportBuilder::native("128,128,128,1", "4,4,4").kernel(&[6.0]).build(),
        ReportBuilder::native("128,128,128,1", "8,8,8").kernel(&[7.0]).build(),
        ReportBuilder::reshaped("128,128,128,1", "4,4,4,2,2,1,0,1")
            .reshape(&[0.5])
            .kernel(&[3.0])
            .build(),
        ReportBuilder::reshaped_rhs_only("128,128,128,1", "4,4,4,2,1,0")
            .reshape(&[1.0])
            .kernel(&[2.0])
            .build(),
    ]
}

/// Three native shapes where `4,4,4` wins two and `8,8,8` wins one.
pub fn vote_sweep() -> Vec<JsonValue> {
    vec![
        ReportBuilder::native("16,16,16,1", "4,4,4").kernel(&[1.0]).build(),
        ReportBuilder::native("16,16,16,1", "8,8,8").kernel(&[2.0]).build(),
        ReportBuilder::native("32,32,32,1", "4,4,4").kernel(&[1.0]).build(),
        ReportBuilder::native("32,32,32,1", "8,8,8").kernel(&[2.0]).build(),
        ReportBuilder::native("48,48,48,1", "4,4,4").kernel(&[2.0]).build(),
        ReportBuilder::native("48,48,48,1", "8,8,8").kernel(&[1.0]).build(),
    ]
}
