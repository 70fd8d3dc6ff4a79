use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use bitchess::prelude::*;

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_gen");
    let classic = Board::classic();
    let slide = Board::new(Layout::Slide);
    let pawns = classic.piece_bb(Piece::Pawn);

    group.bench_function("queen_slide_g4", |b| {
        let g4 = Square::new(30).unwrap();
        b.iter(|| black_box(move_gen::queen_moves(black_box(&slide), g4)))
    });

    group.bench_function("king_slide_e3", |b| {
        let e3 = Square::new(20).unwrap();
        b.iter(|| black_box(move_gen::king_moves(black_box(&slide), e3)))
    });

    group.bench_function("pawn_classic_e2", |b| {
        let e2 = Square::new(12).unwrap();
        b.iter(|| black_box(move_gen::pawn_moves(black_box(&classic), e2, pawns)))
    });

    group.bench_function("moves_for_side_classic", |b| {
        b.iter_batched(
            || classic,
            |board| black_box(move_gen::moves_for_side(&board, Side::White, pawns)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_random_sliders(c: &mut Criterion) {
    let mut prng = Prng::init(0xA11CE);
    c.bench_function("sliding_attack_random", |b| {
        b.iter_batched(
            || {
                let occupied = prng.rand() & prng.rand();
                let white = occupied & prng.rand();
                let board = Board::from_planes([white, occupied & !white, 0, 0, 0, occupied, 0, 0]);
                let square = Square::new((prng.rand() % 64) as usize).unwrap();
                (board, square)
            },
            |(board, square)| black_box(move_gen::rook_moves(&board, square)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_generators, bench_random_sliders);
criterion_main!(benches);
