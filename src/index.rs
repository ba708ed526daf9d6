//! The symmetric-delete index.
//!
//! For every dictionary word the index stores, under the FNV-1a hash of
//! each bounded-deletion variant of the word's prefix, a record carrying
//! the original word and its precomputed code points. Lookup mirrors the
//! deletion process on its input and intersects through these buckets,
//! which makes candidate enumeration independent of dictionary size.
//!
//! Buckets are keyed by hash, so unrelated words can share a bucket on
//! collision; all disambiguation happens in the lookup filter cascade.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;

use crate::unicode::{code_point_count, remove_char, string_hash, substring};

/// A word as stored in the delete index: the original spelling plus its
/// code points, cached at insertion time.
///
/// Records are immutable once inserted and shared between all buckets
/// that reference them.
#[derive(Debug, Clone)]
pub struct DeleteRecord {
    /// The original dictionary word.
    pub word: String,
    /// The word's code points, precomputed for distance calculations.
    pub runes: Vec<char>,
    /// Number of code points in the word.
    pub rune_count: usize,
}

impl DeleteRecord {
    /// Build a record for a dictionary word.
    pub fn new<S: Into<String>>(word: S) -> Self {
        let word = word.into();
        let runes: Vec<char> = word.chars().collect();
        let rune_count = runes.len();
        DeleteRecord {
            word,
            runes,
            rune_count,
        }
    }
}

/// Per-dictionary mapping from delete-variant hash to the records whose
/// word produced that variant.
#[derive(Debug, Default)]
pub struct DeleteIndex {
    buckets: RwLock<AHashMap<String, AHashMap<u32, Vec<Arc<DeleteRecord>>>>>,
}

impl DeleteIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        DeleteIndex::default()
    }

    /// Return the bucket for `hash` in `dictionary`, if present. The
    /// returned records are shared, immutable views.
    pub fn get(&self, dictionary: &str, hash: u32) -> Option<Vec<Arc<DeleteRecord>>> {
        let buckets = self.buckets.read();
        buckets.get(dictionary)?.get(&hash).cloned()
    }

    /// Append a record to the bucket for `hash` in `dictionary`,
    /// allocating the dictionary and the bucket lazily. Records keep
    /// their insertion order.
    pub fn append(&self, dictionary: &str, hash: u32, record: Arc<DeleteRecord>) {
        let mut buckets = self.buckets.write();
        buckets
            .entry(dictionary.to_string())
            .or_default()
            .entry(hash)
            .or_default()
            .push(record);
    }
}

/// Compute the delete-variant hashes for a word: the hash of its prefix
/// of at most `prefix_length` code points, plus the hash of every
/// distinct string reachable from that prefix by recursive
/// single-code-point deletion up to `max_edit_distance` rounds.
///
/// A hash already in the set is not expanded again, which both prunes
/// the recursion and terminates it. Single-code-point strings are never
/// deleted down to the empty string.
pub fn delete_hashes(word: &str, prefix_length: u32, max_edit_distance: u32) -> AHashSet<u32> {
    let mut hashes = AHashSet::new();

    let prefix = if code_point_count(word) > prefix_length as usize {
        substring(word, 0, prefix_length as usize)
    } else {
        word
    };

    hashes.insert(string_hash(prefix));
    expand_deletes(prefix, 0, max_edit_distance, &mut hashes);
    hashes
}

fn expand_deletes(word: &str, depth: u32, max_edit_distance: u32, hashes: &mut AHashSet<u32>) {
    let depth = depth + 1;
    let rune_count = code_point_count(word);

    if rune_count > 1 {
        for i in 0..rune_count {
            let deleted = remove_char(word, i);

            if hashes.insert(string_hash(&deleted)) && depth < max_edit_distance {
                expand_deletes(&deleted, depth, max_edit_distance, hashes);
            }
        }
    }
}
