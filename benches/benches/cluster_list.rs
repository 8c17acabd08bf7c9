// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::convert::Infallible;

use criterion::{
    BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_cluster_list::{
    ClusterConfig, ClusterFrame, ClusterHost, ClusterList, Measurer, PlanInput, Probe, RowContent,
    plan_cluster,
};

const ROW_HEIGHT: f64 = 20.0;
const VIEWPORT: f64 = 600.0;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_offset(&mut self, max: f64) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) * max
    }
}

/// A host that only counts how many rows it was asked to materialize.
struct CountingHost {
    scroll: f64,
    materialized: usize,
}

impl Measurer<f64> for CountingHost {
    type Error = Infallible;

    fn measure(&mut self, max_rows: usize) -> Result<Probe<f64>, Infallible> {
        let rows = self.materialized.min(max_rows);
        Ok(Probe::new(rows as f64 * ROW_HEIGHT, rows))
    }
}

impl ClusterHost<Row, f64> for CountingHost {
    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn viewport_extent(&self) -> f64 {
        VIEWPORT
    }

    fn materialize(&mut self, frame: ClusterFrame<'_, Row, f64>) -> Result<(), Infallible> {
        self.materialized = frame.materialized_len();
        Ok(())
    }

    fn resize_trailing_spacer(&mut self, _extent: f64) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Rows carry no content; only their count matters here.
struct Row;

impl RowContent for Row {}

fn bench_plan_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_list/plan_cluster");

    for total in [10_000usize, 1_000_000, 100_000_000] {
        let content = total as f64 * ROW_HEIGHT;
        let mut rng = Lcg::new(0x5eed);
        let offsets: Vec<f64> = (0..1_024).map(|_| rng.next_offset(content)).collect();
        group.throughput(Throughput::Elements(offsets.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(total), &offsets, |b, offsets| {
            b.iter(|| {
                for &scroll_offset in offsets {
                    let input = PlanInput {
                        scroll_offset,
                        viewport_extent: VIEWPORT,
                        row_height: Some(ROW_HEIGHT),
                        total_rows: total,
                        rows_per_block: 50,
                        blocks_per_cluster: 4,
                        keep_parity: true,
                    };
                    black_box(plan_cluster(black_box(&input)));
                }
            });
        });
    }

    group.finish();
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_list/scroll_sweep");

    // Smooth scrolling: most ticks stay inside the current cluster and must
    // not touch the host.
    for step in [1.0_f64, 40.0, 400.0] {
        let total = 100_000usize;
        let ticks = 2_000usize;
        group.throughput(Throughput::Elements(ticks as u64));

        group.bench_with_input(BenchmarkId::new("step_px", step as u32), &step, |b, &step| {
            let rows: Vec<Row> = (0..total).map(|_| Row).collect();
            let mut list = ClusterList::new(ClusterConfig::default(), rows).unwrap();
            let mut host = CountingHost {
                scroll: 0.0,
                materialized: 0,
            };
            list.attach(&mut host).unwrap();
            b.iter(|| {
                host.scroll = 0.0;
                for _ in 0..ticks {
                    host.scroll += step;
                    list.on_scroll(&mut host).unwrap();
                }
                black_box(list.revision());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan_cluster, bench_scroll_sweep);
criterion_main!(benches);
