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

//! Append-only record of every benchmark observation.

use crate::observation::Observation;
use crate::shape::ProblemShape;
use crate::strategy::Strategy;
use std::collections::HashSet;
use std::fmt;

/// Insertion-ordered store of observations.
///
/// The store only grows. Duplicate observations are kept; every downstream
/// selection is recomputed from the full record.
///
/// # Examples
///
/// ```
/// use gemm_tuner_core::{GemmConfig, Measurement, Observation, ProblemShape, ResultStore, Strategy};
///
/// let shape = ProblemShape::new(32, 32, 32, 1).unwrap();
/// let config = GemmConfig::parse(Strategy::Native, "4,4,4").unwrap();
///
/// let mut store = ResultStore::new();
/// store.add(Observation::new(shape, config, Measurement::new(0.0, 1.0).unwrap()));
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.strategies(), &[Strategy::Native]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    records: Vec<Observation>,
    strategies: Vec<Strategy>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation.
    pub fn add(&mut self, observation: Observation) {
        if !self.strategies.contains(&observation.strategy) {
            self.strategies.push(observation.strategy);
        }
        self.records.push(observation);
    }

    /// All observations in insertion order.
    pub fn all(&self) -> std::slice::Iter<'_, Observation> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Strategies recorded so far, in first-seen order.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Summarize the record.
    pub fn summary(&self, level: SummaryLevel) -> StoreSummary {
        let mut per_strategy: Vec<(Strategy, Vec<ProblemShape>)> = self
            .strategies
            .iter()
            .map(|&strategy| (strategy, Vec::new()))
            .collect();
        let mut seen = HashSet::new();

        for obs in &self.records {
            if !seen.insert(obs.group_key()) {
                continue;
            }
            if let Some((_, shapes)) = per_strategy.iter_mut().find(|(s, _)| *s == obs.strategy) {
                shapes.push(obs.shape);
            }
        }

        StoreSummary {
            level,
            total: self.records.len(),
            per_strategy,
        }
    }
}

impl Extend<Observation> for ResultStore {
    fn extend<I: IntoIterator<Item = Observation>>(&mut self, iter: I) {
        for observation in iter {
            self.add(observation);
        }
    }
}

impl FromIterator<Observation> for ResultStore {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<'a> IntoIterator for &'a ResultStore {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

/// How much detail a [`StoreSummary`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLevel {
    /// Counts only.
    #[default]
    Short,
    /// Counts plus the list of problem shapes per strategy.
    Detailed,
}

/// Overview of a [`ResultStore`].
#[derive(Debug, Clone)]
pub struct StoreSummary {
    level: SummaryLevel,
    total: usize,
    per_strategy: Vec<(Strategy, Vec<ProblemShape>)>,
}

impl StoreSummary {
    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Distinct problem shapes per strategy, in first-seen order.
    pub fn shapes_per_strategy(&self) -> &[(Strategy, Vec<ProblemShape>)] {
        &self.per_strategy
    }
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.per_strategy.iter().map(|(s, _)| s.name()).collect();

        writeln!(f, "=== Result Store Summary ===")?;
        writeln!(f, "[Global]")?;
        writeln!(f, "Strategies recorded: {}", names.join(", "))?;
        writeln!(f, "Total number of results recorded: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "[Per strategy]")?;
        for (strategy, shapes) in &self.per_strategy {
            writeln!(f, "Strategy {}:", strategy)?;
            writeln!(f, "GEMM parameters:")?;
            writeln!(f, "    Number of: {}", shapes.len())?;
            if self.level == SummaryLevel::Detailed {
                let listed: Vec<String> = shapes.iter().map(|s| format!("({})", s)).collect();
                writeln!(f, "    Content: [{}]", listed.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Measurement;
    use crate::strategy::GemmConfig;

    fn obs(shape: &str, strategy: Strategy, config: &str, kernel: f64) -> Observation {
        Observation::new(
            shape.parse().unwrap(),
            GemmConfig::parse(strategy, config).unwrap(),
            Measurement::new(0.0, kernel).unwrap(),
        )
    }

    #[test]
    fn test_insertion_order_and_duplicates() {
        let a = obs("1,1,1,1", Strategy::Native, "4,4,4", 1.0);
        let b = obs("2,2,2,1", Strategy::Native, "4,4,4", 2.0);

        let mut store = ResultStore::new();
        store.add(a);
        store.add(b);
        store.add(a);

        let all: Vec<_> = store.all().copied().collect();
        assert_eq!(all, vec![a, b, a]);
        // Restartable.
        assert_eq!(store.all().count(), 3);
    }

    #[test]
    fn test_strategies_first_seen() {
        let store: ResultStore = vec![
            obs("1,1,1,1", Strategy::Reshaped, "4,4,4,1,1,0,0,1", 1.0),
            obs("1,1,1,1", Strategy::Native, "4,4,4", 1.0),
            obs("2,1,1,1", Strategy::Reshaped, "4,4,4,1,1,0,0,1", 1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.strategies(), &[Strategy::Reshaped, Strategy::Native]);
    }

    #[test]
    fn test_summary_counts_distinct_shapes() {
        let store: ResultStore = vec![
            obs("1,1,1,1", Strategy::Native, "4,4,4", 1.0),
            obs("1,1,1,1", Strategy::Native, "8,8,8", 1.0),
            obs("2,2,2,1", Strategy::Native, "4,4,4", 1.0),
        ]
        .into_iter()
        .collect();

        let summary = store.summary(SummaryLevel::Short);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.shapes_per_strategy()[0].1.len(), 2);

        let short = summary.to_string();
        assert!(short.contains("Strategies recorded: Native"));
        assert!(short.contains("Number of: 2"));
        assert!(!short.contains("Content"));

        let detailed = store.summary(SummaryLevel::Detailed).to_string();
        assert!(detailed.contains("Content: [(1,1,1,1), (2,2,2,1)]"));
    }
}
