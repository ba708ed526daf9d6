//! Dictionary entries and the named-dictionary library.
//!
//! A [`Library`] holds any number of named dictionaries, each mapping a
//! word to its [`Entry`]. Dictionaries are created lazily on first
//! write. The library supports concurrent readers with exclusive
//! writers; every operation observes a consistent snapshot of the map
//! it touches.

use std::collections::HashMap;

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// The implicit dictionary used when no dictionary name is given.
pub const DEFAULT_DICTIONARY: &str = "default";

/// Open metadata attached to a dictionary entry.
pub type Metadata = HashMap<String, serde_json::Value>;

/// A word in a dictionary, together with its frequency and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The dictionary word itself.
    pub word: String,
    /// How often the word has been seen. Drives suggestion ranking and
    /// segmentation probabilities.
    #[serde(default, skip_serializing_if = "frequency_is_zero")]
    pub frequency: u64,
    /// Arbitrary data associated with the word.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

fn frequency_is_zero(frequency: &u64) -> bool {
    *frequency == 0
}

impl Entry {
    /// Create an entry with a word and frequency and no metadata.
    pub fn new<S: Into<String>>(word: S, frequency: u64) -> Self {
        Entry {
            word: word.into(),
            frequency,
            metadata: Metadata::new(),
        }
    }
}

/// A collection of named dictionaries.
#[derive(Debug, Default)]
pub struct Library {
    dictionaries: RwLock<AHashMap<String, AHashMap<String, Entry>>>,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Library::default()
    }

    /// Look up a word in a dictionary.
    pub fn get(&self, dictionary: &str, word: &str) -> Option<Entry> {
        let dictionaries = self.dictionaries.read();
        dictionaries.get(dictionary)?.get(word).cloned()
    }

    /// Check whether a word is present in a dictionary.
    pub fn contains(&self, dictionary: &str, word: &str) -> bool {
        let dictionaries = self.dictionaries.read();
        dictionaries
            .get(dictionary)
            .is_some_and(|words| words.contains_key(word))
    }

    /// Store an entry in a dictionary, creating the dictionary if it
    /// does not exist yet. Returns the entry that was replaced, if any.
    pub fn put(&self, dictionary: &str, entry: Entry) -> Option<Entry> {
        let mut dictionaries = self.dictionaries.write();
        dictionaries
            .entry(dictionary.to_string())
            .or_default()
            .insert(entry.word.clone(), entry)
    }

    /// Remove a word from a dictionary. Returns whether it was present.
    pub fn remove(&self, dictionary: &str, word: &str) -> bool {
        let mut dictionaries = self.dictionaries.write();
        match dictionaries.get_mut(dictionary) {
            Some(words) => words.remove(word).is_some(),
            None => false,
        }
    }

    /// Total number of words across all dictionaries.
    pub fn word_count(&self) -> usize {
        let dictionaries = self.dictionaries.read();
        dictionaries.values().map(|words| words.len()).sum()
    }

    /// Number of dictionaries that have been created.
    pub fn dictionary_count(&self) -> usize {
        self.dictionaries.read().len()
    }

    /// Deep copy of every dictionary, keyed by dictionary name then
    /// word. Iteration order is unspecified.
    pub fn snapshot(&self) -> HashMap<String, HashMap<String, Entry>> {
        let dictionaries = self.dictionaries.read();
        dictionaries
            .iter()
            .map(|(name, words)| {
                let words = words
                    .iter()
                    .map(|(word, entry)| (word.clone(), entry.clone()))
                    .collect();
                (name.clone(), words)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basic_operations() {
        let library = Library::new();

        assert!(library.get(DEFAULT_DICTIONARY, "example").is_none());
        assert!(!library.contains(DEFAULT_DICTIONARY, "example"));
        assert_eq!(library.word_count(), 0);
        assert_eq!(library.dictionary_count(), 0);

        let previous = library.put(DEFAULT_DICTIONARY, Entry::new("example", 10));
        assert!(previous.is_none());
        assert!(library.contains(DEFAULT_DICTIONARY, "example"));
        assert_eq!(library.word_count(), 1);
        assert_eq!(library.dictionary_count(), 1);

        let entry = library.get(DEFAULT_DICTIONARY, "example").unwrap();
        assert_eq!(entry.frequency, 10);
    }

    #[test]
    fn test_library_overwrite_returns_previous() {
        let library = Library::new();

        library.put(DEFAULT_DICTIONARY, Entry::new("example", 10));
        let previous = library.put(DEFAULT_DICTIONARY, Entry::new("example", 100));

        assert_eq!(previous.unwrap().frequency, 10);
        assert_eq!(
            library.get(DEFAULT_DICTIONARY, "example").unwrap().frequency,
            100
        );
        assert_eq!(library.word_count(), 1);
    }

    #[test]
    fn test_library_namespaces_are_independent() {
        let library = Library::new();

        library.put(DEFAULT_DICTIONARY, Entry::new("example", 1));
        library.put("french", Entry::new("française", 1));

        assert!(library.contains(DEFAULT_DICTIONARY, "example"));
        assert!(!library.contains(DEFAULT_DICTIONARY, "française"));
        assert!(library.contains("french", "française"));
        assert!(!library.contains("french", "example"));
        assert_eq!(library.dictionary_count(), 2);
    }

    #[test]
    fn test_library_remove() {
        let library = Library::new();

        library.put(DEFAULT_DICTIONARY, Entry::new("example", 1));
        assert!(library.remove(DEFAULT_DICTIONARY, "example"));
        assert!(!library.remove(DEFAULT_DICTIONARY, "example"));
        assert!(!library.remove("missing", "example"));
        assert!(library.get(DEFAULT_DICTIONARY, "example").is_none());
    }

    #[test]
    fn test_empty_word_is_a_legal_entry() {
        let library = Library::new();

        library.put(DEFAULT_DICTIONARY, Entry::new("", 1));
        assert!(library.contains(DEFAULT_DICTIONARY, ""));
        assert_eq!(library.get(DEFAULT_DICTIONARY, "").unwrap().frequency, 1);
    }

    #[test]
    fn test_snapshot() {
        let library = Library::new();

        library.put(DEFAULT_DICTIONARY, Entry::new("example", 1));
        library.put("french", Entry::new("française", 2));

        let snapshot = library.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[DEFAULT_DICTIONARY]["example"].frequency, 1);
        assert_eq!(snapshot["french"]["française"].frequency, 2);
    }

    #[test]
    fn test_entry_serialization_omits_defaults() {
        let entry = Entry::new("example", 0);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"word":"example"}"#);

        let entry: Entry = serde_json::from_str(r#"{"word":"example"}"#).unwrap();
        assert_eq!(entry.frequency, 0);
        assert!(entry.metadata.is_empty());
    }
}
