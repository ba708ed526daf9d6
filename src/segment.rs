//! Word segmentation of unspaced or misspelled text.
//!
//! [`Speller::segment`] inserts separators into a run of characters so
//! that the pieces jointly minimize edit distance to dictionary words
//! and maximize their unigram log-probability. The dynamic program
//! keeps one best composition per end position in a circular buffer
//! sized to the longest dictionary word, and scores each candidate
//! piece with a Best-level lookup.

use std::cmp::min;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QuillError, Result};
use crate::library::Entry;
use crate::lookup::LookupOptions;
use crate::speller::Speller;
use crate::unicode::{code_point_count, substring};

/// One piece of a segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// The slice of the input this segment covers.
    pub input: String,
    /// The corrected word chosen for the slice.
    pub word: String,
    /// The dictionary entry for the corrected word, when it has one.
    pub entry: Option<Entry>,
}

/// The result of a segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    /// Total edit distance of the chosen segmentation: separator
    /// insertions plus per-piece correction distances.
    pub distance: usize,
    /// The chosen pieces, in input order.
    pub segments: Vec<Segment>,
}

impl SegmentResult {
    /// The corrected words, in input order.
    pub fn words(&self) -> Vec<String> {
        self.segments.iter().map(|s| s.word.clone()).collect()
    }
}

impl fmt::Display for SegmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words().join(" "))
    }
}

/// Options controlling how a segmentation is performed.
#[derive(Debug, Clone, Default)]
pub struct SegmentOptions {
    pub(crate) lookup: LookupOptions,
}

impl SegmentOptions {
    /// Options with defaults: a Best-level lookup against the default
    /// dictionary with the speller's edit distance and prefix length.
    pub fn new() -> Self {
        SegmentOptions::default()
    }

    /// Set the lookup options used for each candidate piece.
    pub fn lookup_options(mut self, lookup: LookupOptions) -> Self {
        self.lookup = lookup;
        self
    }
}

/// A partial segmentation under consideration, scored by cumulative
/// edit distance and cumulative log-probability.
#[derive(Debug, Clone, Default)]
struct Composition {
    segmented: String,
    corrected: String,
    distance_sum: usize,
    log_prob: f64,
}

impl Speller {
    /// Divide `input`, which may have words concatenated together, into
    /// the most likely sequence of dictionary words, correcting
    /// spelling along the way.
    pub fn segment(&self, input: &str, options: SegmentOptions) -> Result<SegmentResult> {
        let longest_word = self.get_longest_word() as usize;
        if longest_word == 0 {
            return Err(QuillError::segmentation(
                "longest word in dictionary has zero length",
            ));
        }

        let cumulative_frequency = self.cumulative_frequency() as f64;
        if cumulative_frequency == 0.0 {
            return Err(QuillError::segmentation("cumulative frequency is zero"));
        }

        let input_len = code_point_count(input);
        if input_len == 0 {
            return Ok(SegmentResult {
                distance: 0,
                segments: Vec::new(),
            });
        }

        let array_size = min(input_len, longest_word);
        let mut compositions = vec![Composition::default(); array_size];

        // One position before the first write, so the first row lands
        // at index 0
        let mut head = array_size - 1;

        for i in 0..input_len {
            let j_max = min(input_len - i, longest_word);

            for j in 1..=j_max {
                let mut part = substring(input, i, i + j).to_string();
                let mut separator_len = 1;

                // A piece starting at whitespace continues the previous
                // word instead of opening a new one
                if part.chars().next().is_some_and(|c| c.is_whitespace()) {
                    part = substring(input, i + 1, i + j).to_string();
                    separator_len = 0;
                }

                // Interior spaces count as edits once removed
                let mut edit_sum = code_point_count(&part);
                part = part.replace(' ', "");
                edit_sum -= code_point_count(&part);

                let suggestions = self.lookup(&part, options.lookup.clone())?;

                let top_result;
                let top_log_prob;

                if let Some(top) = suggestions.first() {
                    top_result = top.entry.word.clone();
                    edit_sum += top.distance;
                    top_log_prob = (top.entry.frequency as f64 / cumulative_frequency).log10();
                } else {
                    // Unknown word: penalized in proportion to its length
                    top_result = part.clone();
                    edit_sum += code_point_count(&part);
                    top_log_prob = (10.0
                        / (cumulative_frequency
                            * 10_f64.powi(code_point_count(&part) as i32)))
                    .log10();
                }

                let dst = (j + head) % array_size;

                if i == 0 {
                    compositions[dst] = Composition {
                        segmented: part,
                        corrected: top_result,
                        distance_sum: edit_sum,
                        log_prob: top_log_prob,
                    };
                } else {
                    let src = compositions[head].clone();
                    let dst_composition = &compositions[dst];

                    // Take the extension when it is forced at the
                    // longest-word boundary, when it wins on distance,
                    // or when it ties on distance with a better
                    // probability
                    let replace = j == longest_word
                        || ((src.distance_sum + edit_sum == dst_composition.distance_sum
                            || src.distance_sum + separator_len + edit_sum
                                == dst_composition.distance_sum)
                            && dst_composition.log_prob < src.log_prob + top_log_prob)
                        || src.distance_sum + separator_len + edit_sum
                            < dst_composition.distance_sum;

                    if replace {
                        compositions[dst] = Composition {
                            segmented: format!("{} {}", src.segmented, part),
                            corrected: format!("{} {}", src.corrected, top_result),
                            distance_sum: src.distance_sum + separator_len + edit_sum,
                            log_prob: src.log_prob + top_log_prob,
                        };
                    }
                }
            }

            head = (head + 1) % array_size;
        }

        let chosen = &compositions[head];
        let segmented_words: Vec<&str> = chosen.segmented.split(' ').collect();
        let corrected_words: Vec<&str> = chosen.corrected.split(' ').collect();

        let segments = corrected_words
            .iter()
            .enumerate()
            .map(|(index, word)| Segment {
                input: segmented_words.get(index).copied().unwrap_or("").to_string(),
                word: (*word).to_string(),
                entry: self.get_entry_in(&options.lookup.dictionary, word),
            })
            .collect();

        Ok(SegmentResult {
            distance: chosen.distance_sum,
            segments,
        })
    }
}
