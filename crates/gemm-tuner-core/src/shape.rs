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

//! GEMM problem shapes and the comma-separated field codec shared with
//! configurations.

use crate::error::{Result, TunerError};
use std::fmt;
use std::str::FromStr;

/// Parse one unsigned integer field of a comma-separated record.
pub(crate) fn parse_uint(field: &str, name: &str) -> Result<u32> {
    field.trim().parse::<u32>().map_err(|_| {
        TunerError::malformed(format!(
            "field '{}' must be an unsigned integer, got '{}'",
            name,
            field.trim()
        ))
    })
}

/// Parse one boolean flag field. Only `1` and `0` are accepted.
pub(crate) fn parse_flag(field: &str, name: &str) -> Result<bool> {
    match parse_uint(field, name)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(TunerError::malformed(format!(
            "flag '{}' must be 0 or 1, got {}",
            name, other
        ))),
    }
}

/// Check that a record has exactly the expected number of fields.
pub(crate) fn expect_arity(fields: &[&str], expected: usize, what: &str) -> Result<()> {
    if fields.len() != expected {
        return Err(TunerError::malformed(format!(
            "{} expects {} fields, got {}",
            what,
            expected,
            fields.len()
        )));
    }
    Ok(())
}

/// Matrix dimensions and batch size of one GEMM problem.
///
/// `M` rows of the LHS, `N` columns of the RHS, `K` the shared dimension and
/// `B` the batch size. All four are positive.
///
/// The textual form is `M,N,K,B`:
///
/// ```
/// use gemm_tuner_core::ProblemShape;
///
/// let shape: ProblemShape = "32,64,128,1".parse().unwrap();
/// assert_eq!(shape, ProblemShape::new(32, 64, 128, 1).unwrap());
/// assert_eq!(shape.to_string(), "32,64,128,1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemShape {
    pub m: u32,
    pub n: u32,
    pub k: u32,
    pub b: u32,
}

impl ProblemShape {
    /// Number of fields in the textual form.
    pub const ARITY: usize = 4;

    /// Create a shape, rejecting zero dimensions.
    pub fn new(m: u32, n: u32, k: u32, b: u32) -> Result<Self> {
        for (name, value) in [("M", m), ("N", n), ("K", k), ("B", b)] {
            if value == 0 {
                return Err(TunerError::malformed(format!(
                    "problem dimension {} must be positive",
                    name
                )));
            }
        }
        Ok(Self { m, n, k, b })
    }

    /// Build a shape from its four textual fields, in `M,N,K,B` order.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        expect_arity(fields, Self::ARITY, "problem shape")?;
        Self::new(
            parse_uint(fields[0], "M")?,
            parse_uint(fields[1], "N")?,
            parse_uint(fields[2], "K")?,
            parse_uint(fields[3], "B")?,
        )
    }
}

impl FromStr for ProblemShape {
    type Err = TunerError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').collect();
        Self::from_fields(&fields)
    }
}

impl fmt::Display for ProblemShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.m, self.n, self.k, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape() {
        let shape: ProblemShape = "100, 200,300,4".parse().unwrap();
        assert_eq!((shape.m, shape.n, shape.k, shape.b), (100, 200, 300, 4));
    }

    #[test]
    fn test_wrong_arity() {
        let err = "1,2,3".parse::<ProblemShape>().unwrap_err();
        assert!(matches!(err, TunerError::MalformedReport(_)));
        assert!(err.to_string().contains("expects 4 fields, got 3"));
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        assert!("0,2,3,4".parse::<ProblemShape>().is_err());
        assert!("1,x,3,4".parse::<ProblemShape>().is_err());
        assert!("1,-2,3,4".parse::<ProblemShape>().is_err());
    }

    #[test]
    fn test_flag_parsing() {
        assert!(parse_flag("1", "f").unwrap());
        assert!(!parse_flag("0", "f").unwrap());
        assert!(parse_flag("2", "f").is_err());
    }
}
