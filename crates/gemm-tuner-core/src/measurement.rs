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

//! Timing measurements and their cost relation.

use crate::error::{Result, TunerError};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// How raw timing samples are reduced to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementMethod {
    /// Smallest raw sample.
    Min,
    /// Arithmetic mean of the raw samples.
    #[default]
    Avg,
}

impl MeasurementMethod {
    /// Reduce a list of raw samples.
    ///
    /// Returns `None` for an empty sample list.
    pub fn reduce(self, samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        match self {
            Self::Min => samples.iter().copied().reduce(f64::min),
            Self::Avg => Some(samples.iter().sum::<f64>() / samples.len() as f64),
        }
    }
}

impl FromStr for MeasurementMethod {
    type Err = TunerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(Self::Min),
            "avg" => Ok(Self::Avg),
            other => Err(TunerError::invalid_argument(format!(
                "invalid measurement method '{}' (expected 'min' or 'avg')",
                other
            ))),
        }
    }
}

impl fmt::Display for MeasurementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => write!(f, "min"),
            Self::Avg => write!(f, "avg"),
        }
    }
}

/// Reshape and kernel time of one benchmark run, in milliseconds.
///
/// The cost of a run is [`total`](Self::total). Two measurements are *close*
/// under a tolerance `tol` when their totals differ by strictly less than
/// `tol`; a measurement is *better* than another only when it is cheaper and
/// not close to it.
///
/// # Examples
///
/// ```
/// use gemm_tuner_core::Measurement;
///
/// let a = Measurement::new(0.0, 1.0).unwrap();
/// let b = Measurement::new(0.0, 1.005).unwrap();
///
/// assert!(a.is_close(&b, 0.01));
/// assert!(!a.is_better_than(&b, 0.01));
/// assert!(a.is_better_than(&b, 0.001));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    reshape_ms: f64,
    kernel_ms: f64,
}

impl Measurement {
    /// Create a measurement from raw reshape and kernel times.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either time is negative or not finite.
    pub fn new(reshape_ms: f64, kernel_ms: f64) -> Result<Self> {
        for (name, value) in [("reshape", reshape_ms), ("kernel", kernel_ms)] {
            if !value.is_finite() || value < 0.0 {
                return Err(TunerError::invalid_argument(format!(
                    "{} time must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(Self::raw(reshape_ms, kernel_ms))
    }

    const fn raw(reshape_ms: f64, kernel_ms: f64) -> Self {
        Self {
            reshape_ms,
            kernel_ms,
        }
    }

    /// Time spent in the reshape phase.
    pub fn reshape_ms(&self) -> f64 {
        self.reshape_ms
    }

    /// Time spent in the GEMM kernel.
    pub fn kernel_ms(&self) -> f64 {
        self.kernel_ms
    }

    /// Total cost: reshape plus kernel time.
    pub fn total(&self) -> f64 {
        self.reshape_ms + self.kernel_ms
    }

    /// Whether the totals differ by strictly less than `tol`.
    pub fn is_close(&self, other: &Self, tol: f64) -> bool {
        (self.total() - other.total()).abs() < tol
    }

    /// Whether `self` is cheaper than `other` by at least `tol`.
    pub fn is_better_than(&self, other: &Self, tol: f64) -> bool {
        self.total() < other.total() && !self.is_close(other, tol)
    }

    /// Componentwise division.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if either component of `other` is zero.
    pub fn try_div(&self, other: &Self) -> Result<Self> {
        other.check_divisor()?;
        Ok(Self::raw(
            self.reshape_ms / other.reshape_ms,
            self.kernel_ms / other.kernel_ms,
        ))
    }

    /// Componentwise floor division.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if either component of `other` is zero.
    pub fn try_floor_div(&self, other: &Self) -> Result<Self> {
        other.check_divisor()?;
        Ok(Self::raw(
            (self.reshape_ms / other.reshape_ms).floor(),
            (self.kernel_ms / other.kernel_ms).floor(),
        ))
    }

    /// Raise both components to `power`.
    pub fn powf(&self, power: f64) -> Self {
        Self::raw(self.reshape_ms.powf(power), self.kernel_ms.powf(power))
    }

    /// Componentwise mean of a sequence of measurements.
    ///
    /// Returns `None` when the sequence is empty.
    pub fn mean<I>(measurements: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let (sum, count) = measurements
            .into_iter()
            .fold((Self::default(), 0usize), |(sum, n), m| (sum + m, n + 1));
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Self::raw(sum.reshape_ms / n, sum.kernel_ms / n))
    }

    fn check_divisor(&self) -> Result<()> {
        if self.reshape_ms == 0.0 || self.kernel_ms == 0.0 {
            return Err(TunerError::InvalidOperation(format!(
                "division by measurement with a zero component ({})",
                self
            )));
        }
        Ok(())
    }
}

impl Add for Measurement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::raw(self.reshape_ms + rhs.reshape_ms, self.kernel_ms + rhs.kernel_ms)
    }
}

impl Sub for Measurement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::raw(self.reshape_ms - rhs.reshape_ms, self.kernel_ms - rhs.kernel_ms)
    }
}

impl Mul for Measurement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::raw(self.reshape_ms * rhs.reshape_ms, self.kernel_ms * rhs.kernel_ms)
    }
}

impl Sum for Measurement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?},{:?}", self.reshape_ms, self.kernel_ms)
    }
}
