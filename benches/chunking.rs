//! Benchmarks for labeling and chunking.

use bilah::{label_blocks, Block, ChunkBuilder, ChunkConfig, Chunker, CueClassifier, Pipeline};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn sample_page(n_blocks: usize) -> Vec<Block> {
    // A realistic mix: headings, concepts, an activity, and questions.
    let lines = [
        "Bab 1 Cahaya",
        "Cahaya adalah gelombang elektromagnetik yang dapat merambat tanpa medium.",
        "Tahukah kamu bahwa bulan tidak memancarkan cahaya sendiri?",
        "Ayo Mencoba",
        "1. Siapkan senter",
        "dan catat hasilnya.",
        "2. Arahkan senter ke dinding yang gelap.",
        "Setelah itu tuliskan warnanya di buku.",
        "Jawablah pertanyaan berikut.",
        "1. Apa yang dimaksud dengan bayangan?",
        "Hak Cipta © 2021 pada Kementerian Pendidikan",
        "Dahulu kala hiduplah seekor kancil yang cerdik.",
    ];
    (0..n_blocks)
        .map(|i| Block::new(format!("B{i}"), lines[i % lines.len()]))
        .collect()
}

fn bench_label(c: &mut Criterion) {
    let mut group = c.benchmark_group("label");
    let classifier = CueClassifier::builtin();

    for n in [100, 1_000, 10_000] {
        let blocks = sample_page(n);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("label_blocks", n), &blocks, |b, blocks| {
            b.iter(|| label_blocks(black_box(blocks), classifier))
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let classifier = CueClassifier::builtin();
    let builder = ChunkBuilder::new(classifier, ChunkConfig::default());

    for n in [100, 1_000, 10_000] {
        let labeled = label_blocks(&sample_page(n), classifier);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("build_chunks", n), &labeled, |b, labeled| {
            b.iter(|| builder.build(black_box(labeled)))
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = Pipeline::default();

    for n in [100, 1_000, 10_000] {
        let blocks = sample_page(n);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("chunk", n), &blocks, |b, blocks| {
            b.iter(|| pipeline.chunk(black_box(blocks)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_label, bench_build, bench_pipeline);
criterion_main!(benches);
