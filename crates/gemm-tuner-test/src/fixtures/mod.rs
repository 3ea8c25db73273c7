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

//! Canonical benchmark reports and sweeps.
//!
//! - **builders**: [`ReportBuilder`](builders::ReportBuilder) and an
//!   observation shorthand
//! - **errors**: reports that must fail extraction, by expected error kind
//! - sweeps (re-exported here): ready-made lists of report values

pub mod builders;
pub mod errors;
mod sweeps;

pub use sweeps::*;
