//! Scheduler throughput benchmark.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use sheet_ops_core::grid::Dimension;
use sheet_ops_core::ops::{DimensionOperation, OperationKind};
use sheet_ops_engine::schedule;

fn mixed_batch(size: usize) -> Vec<DimensionOperation> {
    (0..size)
        .map(|i| {
            let dimension = if i % 2 == 0 {
                Dimension::Rows
            } else {
                Dimension::Columns
            };
            let kind = match i % 3 {
                0 => OperationKind::Delete {
                    start_index: (i * 7 % 500) as u32,
                    end_index: (i * 7 % 500) as u32 + 1,
                },
                1 => OperationKind::Insert {
                    start_index: (i * 3 % 500) as u32,
                    end_index: (i * 3 % 500) as u32 + 2,
                    inherit_from_before: false,
                },
                _ => OperationKind::Append,
            };
            DimensionOperation { dimension, kind }
        })
        .collect()
}

fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");
    for size in [16usize, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let batch = mixed_batch(size);
            b.iter(|| schedule(batch.clone()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_schedule);
criterion_main!(benches);
