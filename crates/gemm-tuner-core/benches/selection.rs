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

//! Best-configuration selection over a synthetic sweep.
//!
//! Measures grouping plus filtering for a sweep shaped like a real tuning
//! run: many shapes, a few dozen configurations each, near-tied timings.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gemm_tuner_core::{
    BestConfigSelector, ConfigDistribution, GemmConfig, Measurement, NativeConfig, Observation,
    ProblemShape, ResultStore, SelectorConfig, StrategySelector,
};

fn synthetic_store(shapes: u32, configs_per_shape: u32) -> ResultStore {
    let mut store = ResultStore::new();
    for s in 1..=shapes {
        let shape = ProblemShape::new(s * 8, s * 8, 64, 1).unwrap();
        for c in 0..configs_per_shape {
            let config = GemmConfig::Native(NativeConfig {
                m0: 1 + c % 8,
                n0: 1 + (c / 8) % 8,
                k0: 4,
            });
            let kernel = 1.0 + f64::from((s * 31 + c * 17) % 97) * 0.0007;
            store.add(Observation::new(shape, config, Measurement::new(0.0, kernel).unwrap()));
        }
    }
    store
}

fn bench_best_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_configs");
    for &shapes in &[16u32, 256, 2048] {
        let store = synthetic_store(shapes, 48);
        for (label, threshold) in [("serial", usize::MAX), ("parallel", 1)] {
            let selector = BestConfigSelector::new(
                SelectorConfig::default().with_parallel_threshold(threshold),
            )
            .unwrap();
            group.bench_with_input(BenchmarkId::new(label, shapes), &store, |b, store| {
                b.iter(|| selector.select(black_box(store)))
            });
        }
    }
    group.finish();
}

fn bench_vote(c: &mut Criterion) {
    let store = synthetic_store(1024, 48);
    let best = BestConfigSelector::new(SelectorConfig::default())
        .unwrap()
        .select(&store);

    c.bench_function("config_distribution", |b| {
        b.iter(|| ConfigDistribution::per_strategy(black_box(&best)))
    });
    c.bench_function("strategy_selection", |b| {
        b.iter(|| StrategySelector.select(black_box(&store)))
    });
}

criterion_group!(benches, bench_best_configs, bench_vote);
criterion_main!(benches);
