//! Criterion benchmarks of per-square queries over a whole board.

use boardstate::chess::core::Square;
use boardstate::chess::position::Position;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strum::IntoEnumIterator;

fn scan_board(position: &Position) {
    for square in Square::iter() {
        let _ = black_box(position.piece_at(square));
    }
}

fn empty_squares(position: &Position) -> usize {
    Square::iter()
        .filter(|square| position.is_empty_at(*square))
        .count()
}

fn queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("Square queries");
    for (name, position) in [
        ("starting", Position::starting()),
        ("empty", Position::empty()),
    ] {
        let _ = group.bench_with_input(BenchmarkId::new("piece_at", name), &position, |b, position| {
            b.iter(|| scan_board(position));
        });
        let _ = group.bench_with_input(BenchmarkId::new("is_empty_at", name), &position, |b, position| {
            b.iter(|| empty_squares(black_box(position)));
        });
    }
    group.finish();
}

criterion_group! {
    name = position;
    config = Criterion::default();
    targets = queries
}

criterion_main!(position);
