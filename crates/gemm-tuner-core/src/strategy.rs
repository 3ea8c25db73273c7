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

//! GEMM execution strategies and their strategy-specific configurations.
//!
//! Each [`Strategy`] owns exactly one configuration record type. The
//! [`GemmConfig`] union carries one variant per strategy, so a configuration
//! always knows which strategy it belongs to and configurations of different
//! strategies never compare equal.

use crate::error::{Result, TunerError};
use crate::shape::{expect_arity, parse_flag, parse_uint};
use std::fmt;

/// Kernel execution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// Operands consumed in their native layout.
    Native,
    /// Only the RHS operand is reshaped before the kernel runs.
    ReshapedOnlyRhs,
    /// Both operands are reshaped before the kernel runs.
    Reshaped,
}

/// Benchmark example binaries and the strategy each one exercises.
const EXAMPLE_STRATEGIES: &[(&str, Strategy)] = &[
    ("benchmark_cl_gemm_native", Strategy::Native),
    ("benchmark_cl_gemm_reshaped_rhs_only", Strategy::ReshapedOnlyRhs),
    ("benchmark_cl_gemm_reshaped", Strategy::Reshaped),
];

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 3] = [Self::Native, Self::ReshapedOnlyRhs, Self::Reshaped];

    /// Display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Native => "Native",
            Self::ReshapedOnlyRhs => "ReshapedOnlyRHS",
            Self::Reshaped => "Reshaped",
        }
    }

    /// Resolve a benchmark example binary name to its strategy.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStrategy` for names outside the example table.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemm_tuner_core::Strategy;
    ///
    /// assert_eq!(
    ///     Strategy::from_example_name("benchmark_cl_gemm_reshaped_rhs_only").unwrap(),
    ///     Strategy::ReshapedOnlyRhs
    /// );
    /// assert!(Strategy::from_example_name("benchmark_cl_gemm_lowp").is_err());
    /// ```
    pub fn from_example_name(name: &str) -> Result<Self> {
        EXAMPLE_STRATEGIES
            .iter()
            .find(|(example, _)| *example == name)
            .map(|(_, strategy)| *strategy)
            .ok_or_else(|| TunerError::UnknownStrategy(name.to_string()))
    }

    /// Number of configuration fields this strategy's kernels take.
    pub fn config_arity(self) -> usize {
        match self {
            Self::Native => NativeConfig::ARITY,
            Self::ReshapedOnlyRhs => ReshapedOnlyRhsConfig::ARITY,
            Self::Reshaped => ReshapedConfig::ARITY,
        }
    }

    /// Whether benchmarks of this strategy time a separate reshape phase.
    pub fn has_reshape_phase(self) -> bool {
        !matches!(self, Self::Native)
    }

    /// Parse configuration fields for this strategy.
    pub fn parse_config(self, fields: &[&str]) -> Result<GemmConfig> {
        Ok(match self {
            Self::Native => GemmConfig::Native(NativeConfig::from_fields(fields)?),
            Self::ReshapedOnlyRhs => {
                GemmConfig::ReshapedOnlyRhs(ReshapedOnlyRhsConfig::from_fields(fields)?)
            }
            Self::Reshaped => GemmConfig::Reshaped(ReshapedConfig::from_fields(fields)?),
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tile configuration of the native kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeConfig {
    /// Rows processed per work item.
    pub m0: u32,
    /// Columns processed per work item.
    pub n0: u32,
    /// Partial accumulations per work item.
    pub k0: u32,
}

impl NativeConfig {
    pub const ARITY: usize = 3;

    fn from_fields(fields: &[&str]) -> Result<Self> {
        expect_arity(fields, Self::ARITY, "Native configuration")?;
        Ok(Self {
            m0: parse_uint(fields[0], "m0")?,
            n0: parse_uint(fields[1], "n0")?,
            k0: parse_uint(fields[2], "k0")?,
        })
    }
}

/// Configuration of the kernel consuming a reshaped RHS only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReshapedOnlyRhsConfig {
    pub m0: u32,
    pub n0: u32,
    pub k0: u32,
    /// Horizontal `k0 x n0` blocks stored on the same output row.
    pub h0: u32,
    pub interleave_rhs: bool,
    /// Transpose RHS (and not LHS) when set.
    pub transpose_rhs: bool,
}

impl ReshapedOnlyRhsConfig {
    pub const ARITY: usize = 6;

    fn from_fields(fields: &[&str]) -> Result<Self> {
        expect_arity(fields, Self::ARITY, "ReshapedOnlyRHS configuration")?;
        Ok(Self {
            m0: parse_uint(fields[0], "m0")?,
            n0: parse_uint(fields[1], "n0")?,
            k0: parse_uint(fields[2], "k0")?,
            h0: parse_uint(fields[3], "h0")?,
            interleave_rhs: parse_flag(fields[4], "interleave_rhs")?,
            transpose_rhs: parse_flag(fields[5], "transpose_rhs")?,
        })
    }
}

/// Configuration of the kernel consuming reshaped LHS and RHS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReshapedConfig {
    pub m0: u32,
    pub n0: u32,
    pub k0: u32,
    /// Vertical `m0 x k0` blocks stored on the same output row.
    pub v0: u32,
    /// Horizontal `k0 x n0` blocks stored on the same output row.
    pub h0: u32,
    pub interleave_lhs: bool,
    pub interleave_rhs: bool,
    pub transpose_rhs: bool,
}

impl ReshapedConfig {
    pub const ARITY: usize = 8;

    fn from_fields(fields: &[&str]) -> Result<Self> {
        expect_arity(fields, Self::ARITY, "Reshaped configuration")?;
        Ok(Self {
            m0: parse_uint(fields[0], "m0")?,
            n0: parse_uint(fields[1], "n0")?,
            k0: parse_uint(fields[2], "k0")?,
            v0: parse_uint(fields[3], "v0")?,
            h0: parse_uint(fields[4], "h0")?,
            interleave_lhs: parse_flag(fields[5], "interleave_lhs")?,
            interleave_rhs: parse_flag(fields[6], "interleave_rhs")?,
            transpose_rhs: parse_flag(fields[7], "transpose_rhs")?,
        })
    }
}

/// A strategy-specific kernel configuration.
///
/// The textual form lists the fields in order, comma separated, with flags
/// written as `1`/`0`. It is parsed back through [`GemmConfig::parse`]
/// because the strategy decides how many fields to expect.
///
/// ```
/// use gemm_tuner_core::{GemmConfig, Strategy};
///
/// let config = GemmConfig::parse(Strategy::ReshapedOnlyRhs, "4,4,4,2,1,0").unwrap();
/// assert_eq!(config.strategy(), Strategy::ReshapedOnlyRhs);
/// assert_eq!(config.to_string(), "4,4,4,2,1,0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemmConfig {
    Native(NativeConfig),
    ReshapedOnlyRhs(ReshapedOnlyRhsConfig),
    Reshaped(ReshapedConfig),
}

impl GemmConfig {
    /// Parse the comma-separated textual form for `strategy`.
    pub fn parse(strategy: Strategy, s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').collect();
        strategy.parse_config(&fields)
    }

    /// The strategy this configuration belongs to.
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Native(_) => Strategy::Native,
            Self::ReshapedOnlyRhs(_) => Strategy::ReshapedOnlyRhs,
            Self::Reshaped(_) => Strategy::Reshaped,
        }
    }
}

impl fmt::Display for GemmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| u8::from(b);
        match self {
            Self::Native(c) => write!(f, "{},{},{}", c.m0, c.n0, c.k0),
            Self::ReshapedOnlyRhs(c) => write!(
                f,
                "{},{},{},{},{},{}",
                c.m0,
                c.n0,
                c.k0,
                c.h0,
                flag(c.interleave_rhs),
                flag(c.transpose_rhs)
            ),
            Self::Reshaped(c) => write!(
                f,
                "{},{},{},{},{},{},{},{}",
                c.m0,
                c.n0,
                c.k0,
                c.v0,
                c.h0,
                flag(c.interleave_lhs),
                flag(c.interleave_rhs),
                flag(c.transpose_rhs)
            ),
        }
    }
}
