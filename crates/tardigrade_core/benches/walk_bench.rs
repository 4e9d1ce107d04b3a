//! Walk Simulation Benchmarks
//!
//! Full-log recomputation cost: every API read rebuilds the history from
//! scratch, so this bounds request latency.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use tardigrade_core::{
    codec, motor::MotorParameterGenerator, ActivityType, TransactionRecord, WalkConfig,
    WalkSimulator,
};

/// Synthetic log with alternating swap kinds and one transaction per second
fn generate_log(n: usize) -> Vec<TransactionRecord> {
    (0..n)
        .map(|i| TransactionRecord {
            signature: format!("{:064x}", (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
            from: "sender".to_string(),
            to: "receiver".to_string(),
            amount: format!("{}", (i % 97) as f64 * 1.5),
            slot: i as u64,
            block_time: Some(1_700_000_000 + i as i64),
            activity_type: if i % 2 == 0 {
                ActivityType::AggSwap
            } else {
                ActivityType::Swap
            },
        })
        .collect()
}

fn bench_full_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_walk");
    group.measurement_time(Duration::from_secs(5));

    let simulator = WalkSimulator::new(&WalkConfig::default()).unwrap();

    for n in [50, 1_000, 10_000].iter() {
        let log = generate_log(*n);
        group.bench_with_input(BenchmarkId::new("simulate", n), &log, |b, log| {
            b.iter(|| simulator.run(black_box(log)).unwrap());
        });
    }

    group.finish();
}

fn bench_motor_generation(c: &mut Criterion) {
    let generator = MotorParameterGenerator::default();
    let signature = generate_log(50)
        .iter()
        .map(|tx| tx.signature.clone())
        .collect::<Vec<_>>()
        .join("-");

    c.bench_function("motor_layer_50_signatures", |b| {
        b.iter(|| generator.motor_layer(black_box(&signature)).unwrap());
    });

    c.bench_function("sha256_digest", |b| {
        b.iter(|| codec::digest(black_box("5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW")));
    });
}

criterion_group!(benches, bench_full_walk, bench_motor_generation);
criterion_main!(benches);
