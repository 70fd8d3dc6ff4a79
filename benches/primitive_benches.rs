use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use bitchess::prelude::*;

// Constants and Setup
const INITIAL_PIECES_BB: BitBoard = BitBoard(0xFFFF00000000FFFF);
const MIDGAME_OCCUPANCY_BB: BitBoard = BitBoard(0x007E8181A5A5FFFF);

// BitBoard Benchmarks
fn bench_bitboard_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitBoard_ops");

    group.bench_function("pop_lsb_loop", |b| {
        b.iter_batched(
            || INITIAL_PIECES_BB,
            |mut bb| {
                while let Some(bit) = bb.pop_lsb() {
                    black_box(bit);
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("iterator_sum", |b| {
        b.iter_batched(
            || INITIAL_PIECES_BB,
            |bb| black_box(bb.iter_bits().sum::<usize>()),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("count_ones", |b| {
        b.iter_batched(
            || INITIAL_PIECES_BB,
            |bb| black_box(bb.pop_count()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");

    group.bench_function("mirror_diagonal", |b| {
        b.iter(|| black_box(black_box(MIDGAME_OCCUPANCY_BB).mirror_diagonal()))
    });

    group.bench_function("mirror_antidiagonal", |b| {
        b.iter(|| black_box(black_box(MIDGAME_OCCUPANCY_BB).mirror_antidiagonal()))
    });

    group.bench_function("rotate_90", |b| {
        b.iter(|| black_box(black_box(MIDGAME_OCCUPANCY_BB).rotate_90()))
    });

    group.finish();
}

fn bench_rays(c: &mut Criterion) {
    let mut group = c.benchmark_group("rays");
    let origin = BitBoard(1 << 27); // d4

    for dir in [Direction::North, Direction::East, Direction::NorthEast] {
        group.bench_function(format!("fill_{dir}"), |b| {
            b.iter(|| black_box(fill(black_box(origin), dir)))
        });
        group.bench_function(format!("span_{dir}"), |b| {
            b.iter(|| black_box(span(black_box(origin), dir)))
        });
    }

    group.bench_function("block_sparse_set", |b| {
        let mut prng = Prng::init(0xBEEF);
        b.iter_batched(
            || BitBoard(prng.sparse_rand()),
            |bb| black_box(block(bb, Direction::SouthWest)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_bitboard_ops, bench_transforms, bench_rays);
criterion_main!(benches);
