//! Concurrent use of a single speller from multiple threads.

use std::sync::Arc;
use std::thread;

use quill::library::Entry;
use quill::lookup::LookupOptions;
use quill::speller::Speller;

#[test]
fn test_concurrent_adds_and_lookups() {
    let speller = Arc::new(Speller::new());
    speller.add_entry(Entry::new("example", 1)).unwrap();

    thread::scope(|scope| {
        for worker in 0..4 {
            let speller = Arc::clone(&speller);
            scope.spawn(move || {
                for i in 0..50 {
                    let word = format!("word{worker}x{i}");
                    speller.add_entry(Entry::new(word, 1)).unwrap();

                    let suggestions =
                        speller.lookup("eample", LookupOptions::new()).unwrap();
                    assert_eq!(suggestions.len(), 1);
                    assert_eq!(suggestions[0].word(), "example");
                }
            });
        }
    });

    assert_eq!(speller.word_count(), 201);
    assert_eq!(speller.cumulative_frequency(), 201);
}

#[test]
fn test_concurrent_adds_of_the_same_words() {
    let speller = Arc::new(Speller::new());

    thread::scope(|scope| {
        for _ in 0..4 {
            let speller = Arc::clone(&speller);
            scope.spawn(move || {
                for i in 0..25 {
                    // Overwrites keep the frequency at 2, whichever
                    // thread wins
                    speller
                        .add_entry(Entry::new(format!("shared{i}"), 2))
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(speller.word_count(), 25);
    assert_eq!(speller.cumulative_frequency(), 50);

    for i in 0..25 {
        let word = format!("shared{i}");
        let suggestions = speller.lookup(&word, LookupOptions::new()).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].word(), word);
    }
}

#[test]
fn test_parallel_bulk_insert_matches_serial_contents() {
    let entries: Vec<Entry> = (0..500)
        .map(|i| Entry::new(format!("entry{i}"), (i % 7) as u64 + 1))
        .collect();

    let parallel = Speller::new();
    let added = parallel.add_entries(entries.clone()).unwrap();
    assert_eq!(added, 500);

    let serial = Speller::new();
    for entry in entries {
        serial.add_entry(entry).unwrap();
    }

    assert_eq!(parallel.word_count(), serial.word_count());
    assert_eq!(
        parallel.cumulative_frequency(),
        serial.cumulative_frequency()
    );
    assert_eq!(parallel.get_longest_word(), serial.get_longest_word());

    let suggestions = parallel.lookup("entry42", LookupOptions::new()).unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].distance, 0);
}
