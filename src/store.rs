//! Persistence of spellers to disk.
//!
//! A saved speller is a gzip-compressed JSON document holding the
//! construction options and every dictionary entry. The delete index is
//! not persisted; loading replays each entry through the normal add
//! path, which rebuilds the index deterministically.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::{QuillError, Result};
use crate::library::Entry;
use crate::speller::Speller;

#[derive(Debug, Serialize, Deserialize)]
struct StoredOptions {
    #[serde(rename = "editDistance")]
    edit_distance: u32,
    #[serde(rename = "prefixLength")]
    prefix_length: u32,
}

/// The self-describing on-disk document: options plus words grouped by
/// dictionary, then by word.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSpeller {
    options: StoredOptions,
    words: HashMap<String, HashMap<String, Entry>>,
}

impl Speller {
    /// Save a representation of the speller to disk at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let document = StoredSpeller {
            options: StoredOptions {
                edit_distance: self.max_edit_distance,
                prefix_length: self.prefix_length,
            },
            words: self.library.snapshot(),
        };

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        serde_json::to_writer(&mut encoder, &document)?;

        let mut writer = encoder.finish()?;
        writer.flush()?;

        Ok(())
    }

    /// Load a speller previously written by [`save`]. The delete index
    /// is rebuilt by replaying every stored entry.
    ///
    /// [`save`]: Speller::save
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Speller> {
        let file = File::open(path)?;
        let decoder = GzDecoder::new(BufReader::new(file));

        let document: StoredSpeller = serde_json::from_reader(decoder)
            .map_err(|e| QuillError::decode(format!("malformed speller document: {e}")))?;

        let speller = Speller::with_options(
            document.options.edit_distance,
            document.options.prefix_length,
        )?;

        for (dictionary, words) in document.words {
            for entry in words.into_values() {
                speller.add_entry_in(&dictionary, entry)?;
            }
        }

        Ok(speller)
    }
}
