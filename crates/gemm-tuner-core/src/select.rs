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

//! Best-configuration and best-strategy selection.
//!
//! Both selectors are pure functions of a [`ResultStore`]; nothing is cached
//! between calls, so a selection always reflects every observation appended
//! before it was computed.
//!
//! # Tolerance banding
//!
//! [`BestConfigSelector`] groups observations by `(shape, strategy)`, sorts
//! each group by total cost (stable, so equal costs keep insertion order) and
//! keeps the cheapest entry plus every entry within the tolerance of it. A
//! tolerance of `0` keeps only entries whose cost equals the minimum exactly.
//!
//! [`StrategySelector`] applies no banding: each shape gets exactly one
//! winning strategy, the first observed among those with the minimum cost.

use crate::error::{Result, TunerError};
use crate::measurement::Measurement;
use crate::observation::{GroupKey, Observation};
use crate::shape::ProblemShape;
use crate::store::ResultStore;
use crate::strategy::{GemmConfig, Strategy};
use rayon::prelude::*;
use std::collections::HashMap;

/// Default tolerance, in milliseconds.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Configuration for [`BestConfigSelector`].
///
/// # Examples
///
/// ```
/// use gemm_tuner_core::SelectorConfig;
///
/// let config = SelectorConfig::default().with_tolerance(0.05).with_parallel_threshold(8);
/// assert_eq!(config.tolerance, 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Maximum cost difference, in milliseconds, for two configurations to be
    /// considered equivalent.
    /// Default: 0.01
    pub tolerance: f64,

    /// Minimum number of groups before groups are filtered in parallel.
    /// Default: 64
    pub parallel_threshold: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            parallel_threshold: 64,
        }
    }
}

impl SelectorConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

/// Configurations of one `(shape, strategy)` group that performed within
/// tolerance of the best one, cheapest first.
///
/// Never empty: the first entry is always the minimum-cost configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BestConfigSet {
    entries: Vec<(GemmConfig, Measurement)>,
}

impl BestConfigSet {
    fn from_candidates(mut candidates: Vec<(GemmConfig, Measurement)>, tol: f64) -> Self {
        candidates.sort_by(|a, b| a.1.total().total_cmp(&b.1.total()));
        let best = candidates[0].1;
        let entries = candidates
            .into_iter()
            .enumerate()
            .filter(|(i, (_, m))| *i == 0 || m.total() == best.total() || m.is_close(&best, tol))
            .map(|(_, entry)| entry)
            .collect();
        Self { entries }
    }

    /// The minimum-cost configuration and its measurement.
    pub fn best(&self) -> &(GemmConfig, Measurement) {
        &self.entries[0]
    }

    pub fn entries(&self) -> &[(GemmConfig, Measurement)] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (GemmConfig, Measurement)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a set produced by [`BestConfigSelector`].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, config: &GemmConfig) -> bool {
        self.entries.iter().any(|(c, _)| c == config)
    }
}

/// Best-configuration sets for every `(shape, strategy)` group in a store.
///
/// Groups are kept in the order their first observation was recorded.
#[derive(Debug, Clone, Default)]
pub struct BestConfigs {
    groups: Vec<(GroupKey, BestConfigSet)>,
    index: HashMap<GroupKey, usize>,
}

impl BestConfigs {
    pub fn get(&self, key: &GroupKey) -> Option<&BestConfigSet> {
        self.index.get(key).map(|&i| &self.groups[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &BestConfigSet)> {
        self.groups.iter().map(|(k, set)| (k, set))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every surviving configuration as an observation, group by group, each
    /// group in its cheapest-first order.
    pub fn flatten(&self) -> impl Iterator<Item = Observation> + '_ {
        self.groups.iter().flat_map(|(key, set)| {
            set.iter().map(move |&(config, measurement)| Observation {
                shape: key.shape,
                strategy: key.strategy,
                config,
                measurement,
            })
        })
    }

    /// [`flatten`](Self::flatten) restricted to one strategy.
    pub fn flatten_strategy(&self, strategy: Strategy) -> impl Iterator<Item = Observation> + '_ {
        self.flatten().filter(move |obs| obs.strategy == strategy)
    }
}

/// Computes [`BestConfigs`] from a [`ResultStore`].
///
/// # Examples
///
/// ```
/// use gemm_tuner_core::{
///     BestConfigSelector, GemmConfig, GroupKey, Measurement, Observation, ProblemShape,
///     ResultStore, SelectorConfig, Strategy,
/// };
///
/// let shape = ProblemShape::new(32, 32, 32, 1).unwrap();
/// let fast = GemmConfig::parse(Strategy::Native, "4,4,4").unwrap();
/// let slow = GemmConfig::parse(Strategy::Native, "8,8,8").unwrap();
///
/// let mut store = ResultStore::new();
/// store.add(Observation::new(shape, slow, Measurement::new(0.0, 2.0).unwrap()));
/// store.add(Observation::new(shape, fast, Measurement::new(0.0, 1.0).unwrap()));
///
/// let selector = BestConfigSelector::new(SelectorConfig::default()).unwrap();
/// let best = selector.select(&store);
/// let set = best.get(&GroupKey::new(shape, Strategy::Native)).unwrap();
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.best().0, fast);
/// ```
#[derive(Debug, Clone)]
pub struct BestConfigSelector {
    config: SelectorConfig,
}

impl BestConfigSelector {
    /// Create a selector.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the tolerance is negative or not finite.
    pub fn new(config: SelectorConfig) -> Result<Self> {
        if !config.tolerance.is_finite() || config.tolerance < 0.0 {
            return Err(TunerError::invalid_argument(format!(
                "tolerance must be a finite number >= 0, got {}",
                config.tolerance
            )));
        }
        Ok(Self { config })
    }

    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    /// Compute the best-configuration set of every group.
    pub fn select(&self, store: &ResultStore) -> BestConfigs {
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<(GroupKey, Vec<(GemmConfig, Measurement)>)> = Vec::new();

        for obs in store.all() {
            let key = obs.group_key();
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push((obs.config, obs.measurement));
        }

        let tol = self.config.tolerance;
        let groups: Vec<(GroupKey, BestConfigSet)> = if groups.len() >= self.config.parallel_threshold {
            groups
                .into_par_iter()
                .map(|(key, candidates)| (key, BestConfigSet::from_candidates(candidates, tol)))
                .collect()
        } else {
            groups
                .into_iter()
                .map(|(key, candidates)| (key, BestConfigSet::from_candidates(candidates, tol)))
                .collect()
        };

        BestConfigs { groups, index }
    }
}

/// Winning strategy of one problem shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyChoice {
    pub strategy: Strategy,
    pub measurement: Measurement,
}

/// Best strategy per problem shape, in first-seen shape order.
#[derive(Debug, Clone, Default)]
pub struct StrategySelection {
    choices: Vec<(ProblemShape, StrategyChoice)>,
    index: HashMap<ProblemShape, usize>,
}

impl StrategySelection {
    pub fn get(&self, shape: &ProblemShape) -> Option<Strategy> {
        self.choice(shape).map(|c| c.strategy)
    }

    pub fn choice(&self, shape: &ProblemShape) -> Option<&StrategyChoice> {
        self.index.get(shape).map(|&i| &self.choices[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProblemShape, &StrategyChoice)> {
        self.choices.iter().map(|(shape, choice)| (shape, choice))
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// Picks the cheapest strategy of every problem shape.
///
/// Ties on exactly equal cost go to the observation recorded first.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategySelector;

impl StrategySelector {
    pub fn select(&self, store: &ResultStore) -> StrategySelection {
        let mut selection = StrategySelection::default();

        for obs in store.all() {
            let existing = selection.index.get(&obs.shape).copied();
            match existing {
                Some(i) => {
                    let current = &mut selection.choices[i].1;
                    if obs.measurement.total() < current.measurement.total() {
                        *current = StrategyChoice {
                            strategy: obs.strategy,
                            measurement: obs.measurement,
                        };
                    }
                }
                None => {
                    selection.index.insert(obs.shape, selection.choices.len());
                    selection.choices.push((
                        obs.shape,
                        StrategyChoice {
                            strategy: obs.strategy,
                            measurement: obs.measurement,
                        },
                    ));
                }
            }
        }

        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(s: &str) -> ProblemShape {
        s.parse().unwrap()
    }

    fn native(s: &str) -> GemmConfig {
        GemmConfig::parse(Strategy::Native, s).unwrap()
    }

    fn obs(shape_str: &str, config: GemmConfig, kernel: f64) -> Observation {
        Observation::new(shape(shape_str), config, Measurement::new(0.0, kernel).unwrap())
    }

    fn selector(tol: f64) -> BestConfigSelector {
        BestConfigSelector::new(SelectorConfig::default().with_tolerance(tol)).unwrap()
    }

    fn configs_of(set: &BestConfigSet) -> Vec<GemmConfig> {
        set.iter().map(|(c, _)| *c).collect()
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        for tol in [-0.1, f64::NAN, f64::INFINITY] {
            let err = BestConfigSelector::new(SelectorConfig::default().with_tolerance(tol));
            assert!(matches!(err, Err(TunerError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_single_observation_group() {
        let store: ResultStore = vec![obs("8,8,8,1", native("4,4,4"), 3.0)].into_iter().collect();
        let best = selector(0.01).select(&store);
        let set = best.get(&GroupKey::new(shape("8,8,8,1"), Strategy::Native)).unwrap();
        assert_eq!(configs_of(set), vec![native("4,4,4")]);
    }

    #[test]
    fn test_zero_tolerance_keeps_exact_ties_in_insertion_order() {
        let store: ResultStore = vec![
            obs("8,8,8,1", native("8,8,8"), 1.0),
            obs("8,8,8,1", native("2,2,2"), 1.0000001),
            obs("8,8,8,1", native("4,4,4"), 1.0),
        ]
        .into_iter()
        .collect();
        let best = selector(0.0).select(&store);
        let set = best.get(&GroupKey::new(shape("8,8,8,1"), Strategy::Native)).unwrap();
        assert_eq!(configs_of(set), vec![native("8,8,8"), native("4,4,4")]);
    }

    #[test]
    fn test_groups_are_per_strategy() {
        let reshaped = GemmConfig::parse(Strategy::ReshapedOnlyRhs, "4,4,4,1,0,0").unwrap();
        let store: ResultStore = vec![
            obs("8,8,8,1", native("4,4,4"), 1.0),
            obs("8,8,8,1", reshaped, 5.0),
        ]
        .into_iter()
        .collect();
        let best = selector(0.01).select(&store);
        assert_eq!(best.len(), 2);
        assert_eq!(best.flatten_strategy(Strategy::ReshapedOnlyRhs).count(), 1);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut store = ResultStore::new();
        for i in 1..200u32 {
            let s = format!("{},{},{},1", i, i, i);
            store.add(obs(&s, native("4,4,4"), 1.0 + f64::from(i % 7) * 0.001));
            store.add(obs(&s, native("8,8,8"), 1.0 + f64::from(i % 5) * 0.004));
            store.add(obs(&s, native("2,2,2"), 2.0));
        }
        let serial = BestConfigSelector::new(
            SelectorConfig::default().with_parallel_threshold(usize::MAX),
        )
        .unwrap()
        .select(&store);
        let parallel = BestConfigSelector::new(SelectorConfig::default().with_parallel_threshold(1))
            .unwrap()
            .select(&store);

        let a: Vec<_> = serial.flatten().collect();
        let b: Vec<_> = parallel.flatten().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_flatten_preserves_group_order() {
        let store: ResultStore = vec![
            obs("2,2,2,1", native("8,8,8"), 1.001),
            obs("1,1,1,1", native("4,4,4"), 1.0),
            obs("2,2,2,1", native("4,4,4"), 1.0),
        ]
        .into_iter()
        .collect();
        let flat: Vec<_> = selector(0.01).select(&store).flatten().collect();
        let order: Vec<_> = flat.iter().map(|o| (o.shape, o.config)).collect();
        assert_eq!(
            order,
            vec![
                (shape("2,2,2,1"), native("4,4,4")),
                (shape("2,2,2,1"), native("8,8,8")),
                (shape("1,1,1,1"), native("4,4,4")),
            ]
        );
    }

    #[test]
    fn test_strategy_tie_goes_to_first_observed() {
        let reshaped = GemmConfig::parse(Strategy::Reshaped, "4,4,4,1,1,0,0,1").unwrap();
        let store: ResultStore = vec![
            obs("8,8,8,1", reshaped, 1.0),
            obs("8,8,8,1", native("4,4,4"), 1.0),
        ]
        .into_iter()
        .collect();
        let selection = StrategySelector.select(&store);
        assert_eq!(selection.get(&shape("8,8,8,1")), Some(Strategy::Reshaped));
    }

    #[test]
    fn test_strategy_uses_total_cost() {
        let reshaped = GemmConfig::parse(Strategy::Reshaped, "4,4,4,1,1,0,0,1").unwrap();
        let store: ResultStore = vec![
            obs("8,8,8,1", native("4,4,4"), 1.0),
            Observation::new(shape("8,8,8,1"), reshaped, Measurement::new(0.5, 0.6).unwrap()),
        ]
        .into_iter()
        .collect();
        let selection = StrategySelector.select(&store);
        assert_eq!(selection.get(&shape("8,8,8,1")), Some(Strategy::Native));
        assert_eq!(selection.len(), 1);
    }
}
