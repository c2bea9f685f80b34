//! A miniature, Lucene-style segmented inverted-index search library.
//!
//! The crate is organized around the six components of a small search
//! engine: an [`analyzer::Analyzer`] turning text into normalized terms, a
//! [`document::Document`] model, an [`writer::IndexWriter`] that buffers
//! documents and flushes them as immutable [`segment`]s, an
//! [`reader::IndexReader`] that unions every segment in an index directory,
//! a [`searcher::Searcher`] that ranks boolean term queries, and an
//! [`merger::IndexMerger`] that compacts segments into one.
//!
//! This crate does not walk directories or extract text from files (plain
//! text, HTML, PDF, ...) — that is an ingestion driver's job, built on top
//! of [`writer::IndexWriter::add_document`]/[`writer::IndexWriter::commit`].
//! It also does not serve queries over HTTP or render results — that is a
//! query front-end's job, built on top of
//! [`searcher::Searcher::search_with_scores`]/[`reader::IndexReader::get_document`].
//! `src/bin/segdex.rs` is a minimal stand-in for both, enough to exercise
//! the library end to end from a shell.

pub mod analyzer;
pub mod document;
pub mod error;
pub mod manifest;
pub mod merger;
pub mod query;
pub mod reader;
pub mod searcher;
pub mod segment;
pub mod writer;

pub use analyzer::Analyzer;
pub use document::{Document, Field, FieldType};
pub use error::{Error, Result};
pub use merger::IndexMerger;
pub use query::{Operator, Query};
pub use reader::IndexReader;
pub use searcher::Searcher;
pub use writer::IndexWriter;

use std::path::PathBuf;

/// Groups the knobs an embedder of this library needs: where the index
/// lives, and how the [`Analyzer`] should be configured. Constructed
/// explicitly by the caller; the core has no implicit global configuration
/// (spec.md §9 — the stop-word default is a configuration constant of the
/// analyzer, not process-global state).
pub struct Config {
    pub index_dir: PathBuf,
    pub stopwords: Option<Vec<String>>,
}

impl Config {
    pub fn new(index_dir: impl Into<PathBuf>) -> Self {
        Self {
            index_dir: index_dir.into(),
            stopwords: None,
        }
    }

    pub fn with_stopwords(mut self, stopwords: Vec<String>) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.stopwords.clone())
    }
}
