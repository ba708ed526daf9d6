//! # Quill
//!
//! A fast spelling correction and word segmentation library for Rust,
//! built on the symmetric-delete algorithm.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Sub-linear candidate enumeration via a precomputed delete index
//! - Multiple named dictionaries per speller
//! - Unicode-aware: lengths and indices are counted in code points
//! - Pluggable distance metrics and result ordering
//! - Word segmentation of unspaced text with spelling correction
//! - Gzip-compressed dictionary persistence

pub mod distance;
pub mod error;
pub mod index;
pub mod library;
pub mod lookup;
pub mod segment;
pub mod speller;
pub mod store;
pub mod unicode;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
