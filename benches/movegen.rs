use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chesslink::game::{fen::Fen, perft::perft, position::Position};

struct Case {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[Case] = &[
    Case {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    },
    Case {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    Case {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    },
];

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");
    for case in CASES {
        let position: Position = case.fen.parse().expect("benchmark FEN should parse");
        group.bench_with_input(BenchmarkId::new("actions", case.name), &position, |b, p| {
            b.iter(|| black_box(p).actions())
        });
        group.bench_with_input(BenchmarkId::new("perft3", case.name), &position, |b, p| {
            b.iter(|| perft(black_box(p), 3, true))
        });
    }
    group.finish();
}

fn bench_fen(c: &mut Criterion) {
    let mut group = c.benchmark_group("fen");
    for case in CASES {
        group.bench_with_input(BenchmarkId::new("parse", case.name), case.fen, |b, fen| {
            b.iter(|| black_box(fen).parse::<Position>())
        });
        let position: Position = case.fen.parse().expect("benchmark FEN should parse");
        group.bench_with_input(BenchmarkId::new("write", case.name), &position, |b, p| {
            b.iter(|| black_box(p).to_fen_string())
        });
    }
    group.bench_function("syntax_only", |b| {
        b.iter(|| black_box(CASES[1].fen).parse::<Fen>())
    });
    group.finish();
}

criterion_group!(benches, bench_movegen, bench_fen);
criterion_main!(benches);
