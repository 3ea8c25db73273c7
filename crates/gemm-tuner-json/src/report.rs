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

//! Schema of the benchmark runner's JSON reports.
//!
//! A report file holds a JSON list of run objects:
//!
//! ```json
//! [
//!   {
//!     "CommandLine": "./benchmark_cl_gemm_native --example_args=32,32,32,1,4,4,4",
//!     "tests": {
//!       "examples/benchmark_cl_gemm_native": {
//!         "measurements": {
//!           "OpenCLTimer/gemm_kernel": { "raw": [1.02, 0.98] }
//!         }
//!       }
//!     }
//!   }
//! ]
//! ```
//!
//! Fields not listed here are ignored. Repeated keys in `tests` or
//! `measurements` reject the report.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::btree_map::{BTreeMap, Entry};
use std::fmt;
use std::marker::PhantomData;

/// One benchmark run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkReport {
    /// Full command line the example was launched with.
    #[serde(rename = "CommandLine")]
    pub command_line: String,

    /// Example path to its test data. A well-formed run has exactly one entry.
    #[serde(deserialize_with = "unique_entries")]
    pub tests: BTreeMap<String, TestEntry>,
}

/// Timing data of one example.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TestEntry {
    /// `"<Instrument>/<Phase>"` to raw samples.
    #[serde(deserialize_with = "unique_entries")]
    pub measurements: BTreeMap<String, InstrumentSamples>,
}

/// Raw samples of one timing instrument, in milliseconds.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct InstrumentSamples {
    #[serde(default)]
    pub raw: Vec<f64>,
}

/// Deserialize a JSON object into a map, failing on a repeated key.
fn unique_entries<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueEntries<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueEntries<V> {
        type Value = BTreeMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object with unique keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = BTreeMap::new();
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                match map.entry(key) {
                    Entry::Occupied(e) => {
                        return Err(de::Error::custom(format!("duplicate key '{}'", e.key())))
                    }
                    Entry::Vacant(e) => {
                        e.insert(value);
                    }
                }
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueEntries(PhantomData))
}
