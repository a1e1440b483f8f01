//! Extraction throughput over synthetic dumps.
//!
//! Run with: cargo bench -p cinedump-parse --bench extract_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cinedump_parse::{read_genres, read_ratings, StreamingCombiner};

fn genres_dump(entities: usize) -> String {
    let mut text = String::from("8: THE GENRES LIST\n==================\n\n");
    for i in 0..entities {
        text.push_str(&format!("Title {i} ({}) {{Episode {i}}}\tDrama\n", 1950 + i % 70));
        text.push_str(&format!("Title {i} ({})\tComedy\n", 1950 + i % 70));
        text.push_str(&format!("Title {i} ({})\tThriller\n", 1950 + i % 70));
    }
    text.push_str("--------------------------------------------------------------------------------\n");
    text
}

fn ratings_dump(entities: usize) -> String {
    let mut text = String::from("MOVIE RATINGS REPORT\n\nNew  Distribution  Votes  Rank  Title\n");
    for i in 0..entities {
        text.push_str(&format!(
            "      0000001222  {:>5}   {}.{}  Title {i} ({})\n",
            i % 90_000,
            i % 10,
            i % 7,
            1950 + i % 70
        ));
    }
    text
}

fn extract_genres(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_genres");
    for size in [1_000, 10_000] {
        let dump = genres_dump(size);
        group.throughput(Throughput::Bytes(dump.len() as u64));
        group.bench_with_input(BenchmarkId::new("records", size), &dump, |b, dump| {
            b.iter(|| read_genres(dump.as_bytes()).unwrap().count());
        });
    }
    group.finish();
}

fn extract_ratings(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_ratings");
    let dump = ratings_dump(10_000);
    group.throughput(Throughput::Bytes(dump.len() as u64));
    group.bench_function("records", |b| {
        b.iter(|| read_ratings(dump.as_bytes()).unwrap().count());
    });
    group.finish();
}

fn streaming_combine(c: &mut Criterion) {
    let genres = genres_dump(10_000);
    let ratings = ratings_dump(10_000);
    c.bench_function("streaming_combine_10k", |b| {
        b.iter(|| {
            let mut combiner = StreamingCombiner::new();
            combiner
                .try_push(read_ratings(ratings.as_bytes()).unwrap().map(|r| r.map(|r| r.into_any())))
                .unwrap();
            combiner
                .try_push(read_genres(genres.as_bytes()).unwrap().map(|r| r.map(|r| r.into_any())))
                .unwrap();
            combiner.finish().len()
        });
    });
}

criterion_group!(benches, extract_genres, extract_ratings, streaming_combine);
criterion_main!(benches);
