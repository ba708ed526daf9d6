//! Spelling lookup: the candidate search over the delete index.
//!
//! [`Speller::lookup`] mirrors the delete-index construction on its
//! input: it walks the input prefix and its bounded deletions, collects
//! every dictionary record filed under those hashes, and filters the
//! records down to true matches with a cascade of cheap length and
//! identity checks before paying for a real distance calculation.

use std::cmp::{max, min};
use std::fmt;
use std::sync::Arc;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::distance::{default_distance_fn, DistanceFn};
use crate::error::{QuillError, Result};
use crate::library::{Entry, DEFAULT_DICTIONARY};
use crate::speller::Speller;
use crate::unicode::{code_point_count, remove_char, string_hash, substring};

/// How many suggestions a lookup keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionLevel {
    /// Keep a single winner: lowest distance, ties broken by highest
    /// frequency.
    #[default]
    Best,
    /// Keep all suggestions tied at the smallest distance found.
    Closest,
    /// Keep every suggestion within the edit-distance budget.
    All,
}

/// A suggested word from a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The edit distance between this suggestion and the input.
    pub distance: usize,
    /// The dictionary entry for the suggested word.
    pub entry: Entry,
}

impl Suggestion {
    /// The suggested word.
    pub fn word(&self) -> &str {
        &self.entry.word
    }
}

/// Extract the words from a suggestion list.
pub fn suggestion_words(suggestions: &[Suggestion]) -> Vec<String> {
    suggestions.iter().map(|s| s.entry.word.clone()).collect()
}

/// A pluggable ordering for the final suggestion list.
pub type SortFn = Arc<dyn Fn(&mut [Suggestion]) + Send + Sync>;

/// The default ordering: ascending distance, ties broken by descending
/// frequency.
pub fn default_sort_fn() -> SortFn {
    Arc::new(|suggestions| {
        suggestions.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then(b.entry.frequency.cmp(&a.entry.frequency))
        })
    })
}

/// Options controlling how a lookup is performed.
///
/// Unset options fall back to the speller's values. The prefix length
/// is validated when the lookup resolves it and must be at least 1.
#[derive(Clone)]
pub struct LookupOptions {
    pub(crate) edit_distance: Option<u32>,
    pub(crate) prefix_length: Option<u32>,
    pub(crate) distance_fn: Option<DistanceFn>,
    pub(crate) sort_fn: Option<SortFn>,
    pub(crate) suggestion_level: SuggestionLevel,
    pub(crate) dictionary: String,
}

impl LookupOptions {
    /// Options with all defaults: the speller's edit distance and
    /// prefix length, Damerau-Levenshtein distance, distance-then-
    /// frequency ordering, [`SuggestionLevel::Best`] and the default
    /// dictionary.
    pub fn new() -> Self {
        LookupOptions::default()
    }

    /// Set the maximum edit distance for this lookup. Reducing it
    /// improves lookup performance.
    pub fn edit_distance(mut self, edit_distance: u32) -> Self {
        self.edit_distance = Some(edit_distance);
        self
    }

    /// Set how much of the input word is used for the lookup.
    pub fn prefix_length(mut self, prefix_length: u32) -> Self {
        self.prefix_length = Some(prefix_length);
        self
    }

    /// Set the distance metric. The function must return the true
    /// distance between the two code-point sequences when it is within
    /// the cap, and a negative value otherwise.
    pub fn distance_fn(mut self, distance_fn: DistanceFn) -> Self {
        self.distance_fn = Some(distance_fn);
        self
    }

    /// Set the ordering applied to the final suggestion list.
    pub fn sort_fn(mut self, sort_fn: SortFn) -> Self {
        self.sort_fn = Some(sort_fn);
        self
    }

    /// Set how many suggestions are kept.
    pub fn suggestion_level(mut self, suggestion_level: SuggestionLevel) -> Self {
        self.suggestion_level = suggestion_level;
        self
    }

    /// Set the dictionary the lookup runs against.
    pub fn dictionary<S: Into<String>>(mut self, dictionary: S) -> Self {
        self.dictionary = dictionary.into();
        self
    }
}

impl Default for LookupOptions {
    fn default() -> Self {
        LookupOptions {
            edit_distance: None,
            prefix_length: None,
            distance_fn: None,
            sort_fn: None,
            suggestion_level: SuggestionLevel::Best,
            dictionary: DEFAULT_DICTIONARY.to_string(),
        }
    }
}

impl fmt::Debug for LookupOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupOptions")
            .field("edit_distance", &self.edit_distance)
            .field("prefix_length", &self.prefix_length)
            .field("suggestion_level", &self.suggestion_level)
            .field("dictionary", &self.dictionary)
            .finish_non_exhaustive()
    }
}

impl Speller {
    /// Look up suggestions for a possibly misspelled input.
    ///
    /// By default returns the best suggestion for the input if one
    /// exists within the speller's maximum edit distance; see
    /// [`LookupOptions`] for how to change that.
    pub fn lookup(&self, input: &str, options: LookupOptions) -> Result<Vec<Suggestion>> {
        let prefix_length = options.prefix_length.unwrap_or(self.prefix_length);
        if prefix_length < 1 {
            return Err(QuillError::invalid_argument(
                "prefix length must be greater than 0",
            ));
        }

        let mut edit_distance = options.edit_distance.unwrap_or(self.max_edit_distance) as usize;
        let distance_fn = options
            .distance_fn
            .clone()
            .unwrap_or_else(default_distance_fn);
        let sort_fn = options.sort_fn.clone().unwrap_or_else(default_sort_fn);
        let level = options.suggestion_level;
        let dictionary = options.dictionary.as_str();

        let mut results: Vec<Suggestion> = Vec::new();

        // Check for an exact match
        if let Some(entry) = self.library.get(dictionary, input) {
            results.push(Suggestion { distance: 0, entry });

            if level != SuggestionLevel::All {
                return Ok(results);
            }
        }

        // With no edit budget only the exact match can qualify
        if edit_distance == 0 {
            return Ok(results);
        }

        let input_runes: Vec<char> = input.chars().collect();
        let input_len = input_runes.len();
        let prefix_length = prefix_length as usize;
        let input_prefix_len = min(input_len, prefix_length);

        // Deletes we have already enqueued as candidates
        let mut considered_deletes: AHashSet<String> = AHashSet::new();

        // Suggestions we have already scored
        let mut considered_suggestions: AHashSet<String> = AHashSet::new();
        considered_suggestions.insert(input.to_string());

        let mut candidates: Vec<String> =
            vec![substring(input, 0, input_prefix_len).to_string()];

        let mut i = 0;
        while i < candidates.len() {
            let candidate = candidates[i].clone();
            i += 1;

            let candidate_len = code_point_count(&candidate);
            let length_diff = input_prefix_len - candidate_len;

            // Candidates are processed in generation order, so once one
            // is too short every later one is as well
            if length_diff > edit_distance {
                if level == SuggestionLevel::All {
                    continue;
                }
                break;
            }

            if let Some(bucket) = self.index.get(dictionary, string_hash(&candidate)) {
                for record in bucket.iter() {
                    let suggestion_len = record.rune_count;

                    // Ignore the record if it equals the input
                    if record.word == input {
                        continue;
                    }

                    // Skip the record if:
                    // * its length differs from the input by more than
                    //   the edit budget
                    // * it is shorter than the candidate (hash collision)
                    // * it has the candidate's length but is not the
                    //   candidate (hash collision)
                    if suggestion_len.abs_diff(input_len) > edit_distance
                        || suggestion_len < candidate_len
                        || (suggestion_len == candidate_len && record.word != candidate)
                    {
                        continue;
                    }

                    // Skip the record if its prefix sits too far from
                    // the candidate to reach the input
                    let sugg_prefix_len = min(suggestion_len, prefix_length);
                    if sugg_prefix_len > input_prefix_len
                        && sugg_prefix_len - candidate_len > edit_distance
                    {
                        continue;
                    }

                    let distance;

                    if candidate_len == 0 {
                        // The empty candidate's bucket collects every
                        // record whose prefix deletes down to nothing;
                        // the distance is the longer of the two words
                        distance = max(input_len, suggestion_len);
                        if distance > edit_distance
                            || !considered_suggestions.insert(record.word.clone())
                        {
                            continue;
                        }
                    } else if suggestion_len == 1 {
                        // A single-code-point word matches anywhere in
                        // the input, or nowhere
                        distance = if input.contains(record.word.as_str()) {
                            input_len - 1
                        } else {
                            input_len
                        };
                        if distance > edit_distance
                            || !considered_suggestions.insert(record.word.clone())
                        {
                            continue;
                        }
                    } else {
                        if !considered_suggestions.insert(record.word.clone()) {
                            continue;
                        }
                        let computed = distance_fn(&input_runes, &record.runes, edit_distance);
                        if computed < 1 {
                            continue;
                        }
                        distance = computed as usize;
                    }

                    if distance <= edit_distance {
                        // Records can outlive their entries; a word
                        // removed from the library never surfaces
                        let Some(entry) = self.library.get(dictionary, &record.word) else {
                            continue;
                        };

                        if !results.is_empty() {
                            match level {
                                SuggestionLevel::Closest => {
                                    // A strictly closer match discards
                                    // everything found so far
                                    if distance < edit_distance {
                                        results.clear();
                                    }
                                }
                                SuggestionLevel::Best => {
                                    let current_freq = entry.frequency;
                                    let closest_freq = results[0].entry.frequency;

                                    if distance < edit_distance || current_freq > closest_freq {
                                        edit_distance = distance;
                                        results[0] = Suggestion { distance, entry };
                                    }
                                    continue;
                                }
                                SuggestionLevel::All => {}
                            }
                        }

                        if level != SuggestionLevel::All {
                            edit_distance = distance;
                        }

                        results.push(Suggestion { distance, entry });
                    }
                }
            }

            // Derive further candidates from this one
            if length_diff < edit_distance && candidate_len <= prefix_length {
                for index in 0..candidate_len {
                    let delete = remove_char(&candidate, index);

                    if considered_deletes.insert(delete.clone()) {
                        candidates.push(delete);
                    }
                }
            }
        }

        // Order the results
        sort_fn(&mut results);

        Ok(results)
    }
}
