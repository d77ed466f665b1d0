//! Benchmarks for the query path: fuzzy resolution against a built engine.
//!
//! Run with: cargo bench --package resolver

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dataset::{MovieCorpus, MovieRecord};
use engine::SimilarityEngine;
use resolver::TitleResolver;

/// Deterministic synthetic engine with enough titles to make the fuzzy
/// scan the dominant cost, as it is against a real catalog.
fn synthetic_engine(movies: usize) -> SimilarityEngine {
    let mut state: u64 = 0x2545F4914F6CDD1D;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let records = (0..movies)
        .map(|id| {
            let tags: Vec<String> = (0..25).map(|_| format!("tag{}", next() % 900)).collect();
            MovieRecord {
                id: id as u32,
                title: format!("Synthetic Movie {}", id),
                tags: tags.join(" "),
            }
        })
        .collect();

    SimilarityEngine::build(&MovieCorpus::from_records(records))
}

fn bench_resolve(c: &mut Criterion) {
    let engine = synthetic_engine(1000);
    let resolver = TitleResolver::new(&engine);

    // Fuzzy scan over every title plus the neighbor ranking
    c.bench_function("resolve_fuzzy_query_1000_titles", |b| {
        b.iter(|| black_box(resolver.resolve(black_box("synthetic movie 500"), 5)))
    });
}

fn bench_neighbors(c: &mut Criterion) {
    let engine = synthetic_engine(1000);
    let resolver = TitleResolver::new(&engine);

    // Neighbor ranking alone, fuzzy match already resolved
    c.bench_function("neighbors_top5_of_1000", |b| {
        b.iter(|| black_box(resolver.neighbors(black_box(500), 5)))
    });
}

criterion_group!(benches, bench_resolve, bench_neighbors);
criterion_main!(benches);
