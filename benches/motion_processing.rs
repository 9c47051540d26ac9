//! Benchmarks for motion processing operations
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use motion_replay::diff::{BodyList, BodyListDiff};
use motion_replay::playback::MotionPlayer;
use motion_replay::record::MotionRecord;
use motion_replay::types::{convert_root_rotations, QuatXyzw};

fn rotations(n: usize) -> Vec<QuatXyzw> {
    (0..n)
        .map(|i| {
            let half = i as f64 * 0.001;
            QuatXyzw([0.0, 0.0, half.sin(), half.cos()])
        })
        .collect()
}

fn motion(n: usize, dofs: usize) -> MotionRecord {
    MotionRecord {
        fps: 30.0,
        root_pos: (0..n).map(|i| [i as f64 * 0.01, 0.0, 0.8]).collect(),
        root_rot: rotations(n),
        dof_pos: (0..n).map(|i| vec![i as f64 * 0.001; dofs]).collect(),
    }
}

fn bench_rotation_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation_conversion");

    for size in [1_000, 10_000, 100_000].iter() {
        let rots = rotations(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("xyzw_to_wxyz", size), &rots, |b, rots| {
            b.iter(|| convert_root_rotations(black_box(rots)))
        });
    }

    group.finish();
}

fn bench_body_list_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("body_list_diff");

    for size in [50, 500, 5_000].iter() {
        let first = BodyList::new((0..*size).map(|i| format!("link_{}", i)));
        let second = BodyList::new((size / 2..size + size / 2).map(|i| format!("link_{}", i)));
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("between", size),
            &(first, second),
            |b, (first, second)| {
                b.iter(|| BodyListDiff::between(black_box(first), black_box(second)))
            },
        );
    }

    group.finish();
}

fn bench_frame_assembly(c: &mut Criterion) {
    let motion = motion(10_000, 29);
    let player = MotionPlayer::new(&motion, true);

    c.bench_function("frame_assembly", |b| {
        b.iter(|| {
            for index in 0..motion.frame_count() {
                black_box(player.frame(black_box(index)).ok());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_rotation_conversion,
    bench_body_list_diff,
    bench_frame_assembly
);
criterion_main!(benches);
