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

//! Normalized benchmark observations.

use crate::measurement::Measurement;
use crate::shape::ProblemShape;
use crate::strategy::{GemmConfig, Strategy};

/// One benchmark run: which problem, which strategy and configuration, and
/// how long it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub shape: ProblemShape,
    pub strategy: Strategy,
    pub config: GemmConfig,
    pub measurement: Measurement,
}

impl Observation {
    /// Create an observation. The strategy is taken from the configuration.
    pub fn new(shape: ProblemShape, config: GemmConfig, measurement: Measurement) -> Self {
        Self {
            shape,
            strategy: config.strategy(),
            config,
            measurement,
        }
    }

    /// The grouping key used by best-configuration selection.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            shape: self.shape,
            strategy: self.strategy,
        }
    }
}

/// Composite `(problem shape, strategy)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub shape: ProblemShape,
    pub strategy: Strategy,
}

impl GroupKey {
    pub fn new(shape: ProblemShape, strategy: Strategy) -> Self {
        Self { shape, strategy }
    }
}
