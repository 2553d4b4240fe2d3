use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hom_count::graph::generators::{complete, cycle, petersen, random_gnp};
use hom_count::heuristic_elimination_order::MinFillDecomposer;
use hom_count::{count_homomorphisms, HomomorphismCounter, NiceTreeDecomposition};

fn evaluation(c: &mut Criterion) {
    let source = petersen();
    let td = MinFillDecomposer::with_graph(&source).compute();
    let ntd = NiceTreeDecomposition::from_tree_decomposition(&td);

    let dense = complete(5);
    c.bench_function("petersen_into_k5", |b| {
        b.iter(|| count_homomorphisms(black_box(&source), black_box(&dense), &ntd))
    });

    let sparse = cycle(12);
    c.bench_function("petersen_into_c12", |b| {
        b.iter(|| count_homomorphisms(black_box(&source), black_box(&sparse), &ntd))
    });
}

fn decomposition(c: &mut Criterion) {
    let graph = random_gnp(60, 0.08, 11);
    c.bench_function("min_fill_nice_decomposition", |b| {
        b.iter(|| {
            let td = MinFillDecomposer::with_graph(black_box(&graph)).compute();
            NiceTreeDecomposition::from_tree_decomposition(&td)
        })
    });
}

fn end_to_end(c: &mut Criterion) {
    let source = random_gnp(20, 0.1, 3);
    let target = random_gnp(8, 0.6, 4);
    let counter = HomomorphismCounter::default();
    c.bench_function("random_end_to_end", |b| {
        b.iter(|| counter.count(black_box(&source), black_box(&target)))
    });
}

criterion_group!(benches, evaluation, decomposition, end_to_end);
criterion_main!(benches);
