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

//! Cross-shape vote on the default configuration of a strategy.

use crate::measurement::Measurement;
use crate::observation::Observation;
use crate::select::BestConfigs;
use crate::shape::ProblemShape;
use crate::strategy::{GemmConfig, Strategy};
use std::collections::HashMap;

/// Tally of how often each configuration made a best-configuration set.
///
/// Every `(shape, configuration)` entry fed in counts as one vote. Rankings
/// are deterministic: equal tallies keep the order in which configurations
/// were first seen.
///
/// # Examples
///
/// ```
/// use gemm_tuner_core::{ConfigDistribution, GemmConfig, Measurement, Observation, Strategy};
///
/// let x = GemmConfig::parse(Strategy::Native, "4,4,4").unwrap();
/// let m = Measurement::new(0.0, 1.0).unwrap();
///
/// let mut dist = ConfigDistribution::new();
/// dist.add(&Observation::new("32,32,32,1".parse().unwrap(), x, m));
/// dist.add(&Observation::new("64,64,64,1".parse().unwrap(), x, m));
///
/// assert_eq!(dist.best_config(), Some((x, 2)));
/// assert_eq!(dist.dispersion(), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigDistribution {
    votes: Vec<(GemmConfig, Vec<(ProblemShape, Measurement)>)>,
    index: HashMap<GemmConfig, usize>,
}

impl ConfigDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one distribution per strategy from best-configuration sets, in
    /// the order strategies first appear in the flattened sets.
    pub fn per_strategy(best: &BestConfigs) -> Vec<(Strategy, ConfigDistribution)> {
        let mut dists: Vec<(Strategy, ConfigDistribution)> = Vec::new();
        for obs in best.flatten() {
            let slot = match dists.iter().position(|(s, _)| *s == obs.strategy) {
                Some(i) => i,
                None => {
                    dists.push((obs.strategy, ConfigDistribution::new()));
                    dists.len() - 1
                }
            };
            dists[slot].1.add(&obs);
        }
        dists
    }

    /// Record one vote for `observation.config`.
    pub fn add(&mut self, observation: &Observation) {
        let slot = match self.index.get(&observation.config).copied() {
            Some(i) => i,
            None => {
                self.index.insert(observation.config, self.votes.len());
                self.votes.push((observation.config, Vec::new()));
                self.votes.len() - 1
            }
        };
        self.votes[slot]
            .1
            .push((observation.shape, observation.measurement));
    }

    /// The shapes (with their measurements) that voted for each configuration.
    pub fn distribution(
        &self,
    ) -> impl Iterator<Item = (&GemmConfig, &[(ProblemShape, Measurement)])> {
        self.votes.iter().map(|(c, voters)| (c, voters.as_slice()))
    }

    /// Configurations by descending vote count.
    pub fn frequency(&self) -> Vec<(GemmConfig, usize)> {
        let mut freq: Vec<(GemmConfig, usize)> =
            self.votes.iter().map(|(c, voters)| (*c, voters.len())).collect();
        freq.sort_by(|a, b| b.1.cmp(&a.1));
        freq
    }

    /// The consensus configuration and its vote count, or `None` if no votes
    /// were cast.
    pub fn best_config(&self) -> Option<(GemmConfig, usize)> {
        self.frequency().into_iter().next()
    }

    /// Population standard deviation of the vote counts.
    ///
    /// Zero with fewer than two distinct configurations. A larger value means
    /// the votes are more unevenly spread, which is stronger evidence for
    /// the consensus pick.
    pub fn dispersion(&self) -> f64 {
        if self.votes.len() < 2 {
            return 0.0;
        }
        let n = self.votes.len() as f64;
        let counts = self.votes.iter().map(|(_, voters)| voters.len() as f64);
        let mean = counts.clone().sum::<f64>() / n;
        let variance = counts.map(|c| (c - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    }

    /// Total number of votes cast.
    pub fn total_votes(&self) -> usize {
        self.votes.iter().map(|(_, voters)| voters.len()).sum()
    }

    /// Number of distinct configurations voted for.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(dist: &mut ConfigDistribution, shape: &str, config: &str) {
        dist.add(&Observation::new(
            shape.parse().unwrap(),
            GemmConfig::parse(Strategy::Native, config).unwrap(),
            Measurement::new(0.0, 1.0).unwrap(),
        ));
    }

    fn native(s: &str) -> GemmConfig {
        GemmConfig::parse(Strategy::Native, s).unwrap()
    }

    #[test]
    fn test_empty_distribution() {
        let dist = ConfigDistribution::new();
        assert!(dist.is_empty());
        assert_eq!(dist.best_config(), None);
        assert!(dist.frequency().is_empty());
        assert_eq!(dist.dispersion(), 0.0);
    }

    #[test]
    fn test_frequency_ties_keep_first_seen_order() {
        let mut dist = ConfigDistribution::new();
        vote(&mut dist, "1,1,1,1", "2,2,2");
        vote(&mut dist, "2,2,2,1", "4,4,4");
        vote(&mut dist, "3,3,3,1", "4,4,4");
        vote(&mut dist, "4,4,4,1", "8,8,8");
        vote(&mut dist, "5,5,5,1", "2,2,2");

        assert_eq!(
            dist.frequency(),
            vec![(native("2,2,2"), 2), (native("4,4,4"), 2), (native("8,8,8"), 1)]
        );
        assert_eq!(dist.best_config(), Some((native("2,2,2"), 2)));
        assert_eq!(dist.total_votes(), 5);
    }

    #[test]
    fn test_dispersion_values() {
        let mut dist = ConfigDistribution::new();
        vote(&mut dist, "1,1,1,1", "4,4,4");
        vote(&mut dist, "2,2,2,1", "4,4,4");
        vote(&mut dist, "3,3,3,1", "4,4,4");
        vote(&mut dist, "4,4,4,1", "8,8,8");
        // counts [3, 1]: mean 2, variance 1
        assert!((dist.dispersion() - 1.0).abs() < 1e-12);

        let mut even = ConfigDistribution::new();
        vote(&mut even, "1,1,1,1", "4,4,4");
        vote(&mut even, "2,2,2,1", "8,8,8");
        assert_eq!(even.dispersion(), 0.0);
    }

    #[test]
    fn test_distribution_lists_voters() {
        let mut dist = ConfigDistribution::new();
        vote(&mut dist, "1,1,1,1", "4,4,4");
        vote(&mut dist, "2,2,2,1", "4,4,4");
        let (config, voters) = dist.distribution().next().unwrap();
        assert_eq!(*config, native("4,4,4"));
        let shapes: Vec<String> = voters.iter().map(|(s, _)| s.to_string()).collect();
        assert_eq!(shapes, vec!["1,1,1,1", "2,2,2,1"]);
    }
}
