//! Error types for the Quill library.
//!
//! This module provides error handling for all Quill operations. All
//! errors are represented by the [`QuillError`] enum, which provides
//! detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use quill::error::{QuillError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     // Return an error
//!     Err(QuillError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Quill operations.
///
/// This enum represents all possible errors that can occur in the Quill
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for
/// creating specific error types.
#[derive(Error, Debug)]
pub enum QuillError {
    /// I/O errors (file operations, gzip streams, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dictionary-related errors
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Lookup-related errors (invalid options, etc.)
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Segmentation-related errors
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// Decode errors (malformed persisted documents)
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with QuillError.
pub type Result<T> = std::result::Result<T, QuillError>;

impl QuillError {
    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        QuillError::Dictionary(msg.into())
    }

    /// Create a new lookup error.
    pub fn lookup<S: Into<String>>(msg: S) -> Self {
        QuillError::Lookup(msg.into())
    }

    /// Create a new segmentation error.
    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        QuillError::Segmentation(msg.into())
    }

    /// Create a new decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        QuillError::Decode(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        QuillError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        QuillError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
