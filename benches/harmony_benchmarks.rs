//! # Harmony Performance Benchmarks
//!
//! Benchmarks for the per-request work: every recommendation reparses the
//! whole catalog and every admin view reparses the whole log, so both scale
//! with file size.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench catalog
//! cargo bench usage_log
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use harmony::catalog::{self, Mood};
use harmony::recommend;
use harmony::storage::MemoryStorage;
use harmony::usage_log::{self, LogSummary};
use std::hint::black_box;

fn build_catalog(rows: usize) -> String {
    let mut csv = String::from("MoodCategory,SongTitle,Artist,YoutubeLink\n");
    for i in 0..rows {
        let mood = Mood::ALL[i % Mood::ALL.len()];
        csv.push_str(&format!(" {mood} ,Song {i},Artist {i},music/{i}.mp3\n"));
    }
    csv
}

fn build_log(rows: usize) -> String {
    (0..rows)
        .map(|i| format!("User{i},Calm,{},Song {i}\n", i % 10 + 1))
        .collect()
}

fn catalog_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    for rows in [100, 1_000, 10_000] {
        let csv = build_catalog(rows);
        group.bench_with_input(BenchmarkId::new("parse", rows), &csv, |b, csv| {
            b.iter(|| catalog::parse_catalog(black_box(csv.as_bytes())))
        });

        let storage = MemoryStorage::with_catalog(csv);
        let mut rng = rand::thread_rng();
        group.bench_with_input(BenchmarkId::new("resolve", rows), &storage, |b, storage| {
            b.iter(|| recommend::resolve(storage, black_box(Mood::Stress), &mut rng))
        });
    }
    group.finish();
}

fn usage_log_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("usage_log");
    for rows in [100, 1_000, 10_000] {
        let log = build_log(rows);
        group.bench_with_input(BenchmarkId::new("parse_and_summarize", rows), &log, |b, log| {
            b.iter(|| {
                let entries = usage_log::parse_log(black_box(log.as_bytes())).unwrap();
                LogSummary::from_entries(&entries)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, catalog_benchmarks, usage_log_benchmarks);
criterion_main!(benches);
