//! Criterion benchmarks for the Quill speller.
//!
//! Covers the hot paths:
//! - Dictionary construction (delete-index generation)
//! - Lookup at each suggestion level
//! - Word segmentation

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use quill::library::Entry;
use quill::lookup::{LookupOptions, SuggestionLevel};
use quill::segment::SegmentOptions;
use quill::speller::Speller;

/// Generate a deterministic word list for benchmarking.
fn generate_words(count: usize) -> Vec<String> {
    let stems = [
        "spell", "check", "word", "dictionary", "segment", "suggest", "correct", "frequency",
        "index", "delete", "prefix", "distance", "lookup", "entry", "library",
    ];
    (0..count)
        .map(|i| format!("{}{}", stems[i % stems.len()], i / stems.len()))
        .collect()
}

fn build_speller(count: usize) -> Speller {
    let speller = Speller::new();
    for (i, word) in generate_words(count).into_iter().enumerate() {
        speller
            .add_entry(Entry::new(word, (i % 1000) as u64 + 1))
            .unwrap();
    }
    speller
}

fn bench_add_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_entries");

    for count in [100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("serial_{count}"), |b| {
            b.iter(|| {
                let speller = Speller::new();
                for word in generate_words(count) {
                    speller.add_entry(Entry::new(word, 1)).unwrap();
                }
                black_box(speller.word_count())
            })
        });
        group.bench_function(format!("parallel_{count}"), |b| {
            let entries: Vec<Entry> = generate_words(count)
                .into_iter()
                .map(|w| Entry::new(w, 1))
                .collect();
            b.iter(|| {
                let speller = Speller::new();
                speller.add_entries(black_box(entries.clone())).unwrap();
                black_box(speller.word_count())
            })
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let speller = build_speller(1000);
    let mut group = c.benchmark_group("lookup");

    group.bench_function("exact", |b| {
        b.iter(|| {
            black_box(
                speller
                    .lookup(black_box("spell0"), LookupOptions::new())
                    .unwrap(),
            )
        })
    });

    group.bench_function("one_edit_best", |b| {
        b.iter(|| {
            black_box(
                speller
                    .lookup(black_box("spel0"), LookupOptions::new())
                    .unwrap(),
            )
        })
    });

    group.bench_function("two_edits_all", |b| {
        let options = LookupOptions::new().suggestion_level(SuggestionLevel::All);
        b.iter(|| {
            black_box(
                speller
                    .lookup(black_box("sgmet1"), options.clone())
                    .unwrap(),
            )
        })
    });

    group.finish();
}

fn bench_segment(c: &mut Criterion) {
    let speller = Speller::new();
    for (word, frequency) in [
        ("the", 1000),
        ("quick", 50),
        ("brown", 40),
        ("fox", 30),
        ("jumps", 20),
        ("over", 200),
        ("lazy", 10),
        ("dog", 60),
    ] {
        speller.add_entry(Entry::new(word, frequency)).unwrap();
    }

    c.bench_function("segment_sentence", |b| {
        b.iter(|| {
            black_box(
                speller
                    .segment(
                        black_box("thequickbrownfoxjumpsoverthelazydog"),
                        SegmentOptions::new(),
                    )
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_add_entries, bench_lookup, bench_segment);
criterion_main!(benches);
