//! The speller: dictionary state plus the operations that maintain it.
//!
//! A [`Speller`] owns a [`Library`] of named dictionaries and the
//! [`DeleteIndex`] derived from it, together with two global counters:
//! the cumulative frequency of all entries and the length of the
//! longest word seen. All operations take `&self` and are safe to call
//! concurrently.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{QuillError, Result};
use crate::index::{delete_hashes, DeleteIndex, DeleteRecord};
use crate::library::{Entry, Library, DEFAULT_DICTIONARY};
use crate::unicode::code_point_count;

const DEFAULT_EDIT_DISTANCE: u32 = 2;
const DEFAULT_PREFIX_LENGTH: u32 = 7;

/// Spelling correction and word segmentation over in-memory
/// dictionaries.
///
/// The two tunables are fixed at construction: the delete variants
/// indexed for a word depend on them, and entries are only indexed
/// once, when they are first added.
#[derive(Debug)]
pub struct Speller {
    /// The maximum number of deletions applied to each dictionary word
    /// when building its delete variants.
    pub(crate) max_edit_distance: u32,

    /// How many leading code points of a word are examined.
    pub(crate) prefix_length: u32,

    pub(crate) cumulative_frequency: AtomicU64,
    pub(crate) longest_word: AtomicU32,
    pub(crate) library: Library,
    pub(crate) index: DeleteIndex,
}

/// A point-in-time summary of a speller's contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellerStats {
    /// Number of words across all dictionaries.
    pub word_count: usize,
    /// Number of dictionaries.
    pub dictionary_count: usize,
    /// Sum of the frequencies of all entries.
    pub cumulative_frequency: u64,
    /// Length of the longest word, in code points.
    pub longest_word: u32,
}

impl Speller {
    /// Create a speller with the default edit distance (2) and prefix
    /// length (7).
    pub fn new() -> Self {
        Speller {
            max_edit_distance: DEFAULT_EDIT_DISTANCE,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            cumulative_frequency: AtomicU64::new(0),
            longest_word: AtomicU32::new(0),
            library: Library::new(),
            index: DeleteIndex::new(),
        }
    }

    /// Create a speller with explicit options. The prefix length must
    /// be at least 1.
    pub fn with_options(max_edit_distance: u32, prefix_length: u32) -> Result<Self> {
        if prefix_length < 1 {
            return Err(QuillError::invalid_argument(
                "prefix length must be greater than 0",
            ));
        }

        let mut speller = Speller::new();
        speller.max_edit_distance = max_edit_distance;
        speller.prefix_length = prefix_length;
        Ok(speller)
    }

    /// The maximum edit distance this speller was built with.
    pub fn max_edit_distance(&self) -> u32 {
        self.max_edit_distance
    }

    /// The prefix length this speller was built with.
    pub fn prefix_length(&self) -> u32 {
        self.prefix_length
    }

    /// Add an entry to the default dictionary. See [`add_entry_in`].
    ///
    /// [`add_entry_in`]: Speller::add_entry_in
    pub fn add_entry(&self, entry: Entry) -> Result<bool> {
        self.add_entry_in(DEFAULT_DICTIONARY, entry)
    }

    /// Add an entry to the named dictionary. If the word already exists
    /// its entry is overwritten and the cumulative frequency adjusted;
    /// the delete index is left untouched since a word's delete
    /// variants never change. Returns `true` if a new word was added.
    pub fn add_entry_in(&self, dictionary: &str, entry: Entry) -> Result<bool> {
        let word = entry.word.clone();
        let frequency = entry.frequency;

        self.cumulative_frequency
            .fetch_add(frequency, Ordering::Relaxed);

        if let Some(previous) = self.library.put(dictionary, entry) {
            self.cumulative_frequency
                .fetch_sub(previous.frequency, Ordering::Relaxed);
            return Ok(false);
        }

        let rune_count = code_point_count(&word) as u32;
        self.longest_word.fetch_max(rune_count, Ordering::Relaxed);

        // One shared record, referenced from every bucket its delete
        // variants hash into.
        let record = Arc::new(DeleteRecord::new(word.as_str()));
        for hash in delete_hashes(&word, self.prefix_length, self.max_edit_distance) {
            self.index.append(dictionary, hash, Arc::clone(&record));
        }

        Ok(true)
    }

    /// Add a batch of entries to the default dictionary in parallel.
    /// Returns the number of new words added.
    pub fn add_entries(&self, entries: Vec<Entry>) -> Result<usize> {
        self.add_entries_in(DEFAULT_DICTIONARY, entries)
    }

    /// Add a batch of entries to the named dictionary in parallel.
    /// Returns the number of new words added.
    pub fn add_entries_in(&self, dictionary: &str, entries: Vec<Entry>) -> Result<usize> {
        let added: Result<Vec<bool>> = entries
            .into_par_iter()
            .map(|entry| self.add_entry_in(dictionary, entry))
            .collect();

        Ok(added?.into_iter().filter(|new| *new).count())
    }

    /// Look up the entry for a word in the default dictionary.
    pub fn get_entry(&self, word: &str) -> Option<Entry> {
        self.get_entry_in(DEFAULT_DICTIONARY, word)
    }

    /// Look up the entry for a word in the named dictionary.
    pub fn get_entry_in(&self, dictionary: &str, word: &str) -> Option<Entry> {
        self.library.get(dictionary, word)
    }

    /// Remove a word from the default dictionary. See
    /// [`remove_entry_in`].
    ///
    /// [`remove_entry_in`]: Speller::remove_entry_in
    pub fn remove_entry(&self, word: &str) -> bool {
        self.remove_entry_in(DEFAULT_DICTIONARY, word)
    }

    /// Remove a word from the named dictionary. Returns whether the
    /// word was present. Stale index records are filtered out at lookup
    /// time, and the global counters keep their values.
    pub fn remove_entry_in(&self, dictionary: &str, word: &str) -> bool {
        self.library.remove(dictionary, word)
    }

    /// The length of the longest word in the dictionary, in code
    /// points. Non-decreasing over the lifetime of the speller.
    pub fn get_longest_word(&self) -> u32 {
        self.longest_word.load(Ordering::Relaxed)
    }

    /// Sum of the frequencies of all entries ever added, adjusted on
    /// overwrite, with wrap-around arithmetic.
    pub fn cumulative_frequency(&self) -> u64 {
        self.cumulative_frequency.load(Ordering::Relaxed)
    }

    /// Total number of words across all dictionaries.
    pub fn word_count(&self) -> usize {
        self.library.word_count()
    }

    /// Number of dictionaries.
    pub fn dictionary_count(&self) -> usize {
        self.library.dictionary_count()
    }

    /// Summarize the speller's contents.
    pub fn stats(&self) -> SpellerStats {
        SpellerStats {
            word_count: self.word_count(),
            dictionary_count: self.dictionary_count(),
            cumulative_frequency: self.cumulative_frequency(),
            longest_word: self.get_longest_word(),
        }
    }

    /// Load a frequency file with format "word frequency" per line into
    /// the default dictionary. Returns the number of new words added.
    pub fn load_frequency_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        self.load_frequency_file_in(DEFAULT_DICTIONARY, path)
    }

    /// Load a frequency file with format "word frequency" per line into
    /// the named dictionary. Lines that do not parse are skipped.
    /// Returns the number of new words added.
    pub fn load_frequency_file_in<P: AsRef<Path>>(
        &self,
        dictionary: &str,
        path: P,
    ) -> Result<usize> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let parts: Vec<&str> = line.split_whitespace().collect();

            if parts.len() >= 2 {
                if let Ok(frequency) = parts[1].parse::<u64>() {
                    entries.push(Entry::new(parts[0], frequency));
                }
            }
        }

        self.add_entries_in(dictionary, entries)
    }
}

impl Default for Speller {
    fn default() -> Self {
        Self::new()
    }
}
