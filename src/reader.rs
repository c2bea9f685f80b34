use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::manifest::Manifest;
use crate::segment::{self, DocumentStore, InvertedIndex};

/// A read-only, in-memory snapshot of every segment in an index directory,
/// unioned into a single inverted index and document store (spec.md §4.5).
///
/// Construction is the only fallible, blocking operation; once built, a
/// `IndexReader` never fails and does not observe writes that happen after
/// it was opened. Multiple readers may coexist without locking.
pub struct IndexReader {
    inverted_index: InvertedIndex,
    document_store: DocumentStore,
    doc_freq: HashMap<String, u64>,
    total_doc_count: u64,
}

impl IndexReader {
    /// Reads the manifest, loads every segment's inverted index and
    /// document store in manifest order, and folds them together using the
    /// same concatenate-postings / later-field-wins policy the merger uses
    /// (spec.md §4.5, §9).
    pub fn open(index_dir: impl AsRef<Path>) -> Result<Self> {
        let index_dir = index_dir.as_ref();
        let manifest = Manifest::load(index_dir)?;

        let mut inverted_index = InvertedIndex::new();
        let mut document_store = DocumentStore::new();

        for seg in &manifest.segments {
            let seg_inv = segment::load_inverted_index(index_dir, &seg.name)?;
            let seg_store = segment::load_document_store(index_dir, &seg.name)?;
            segment::merge_inverted_index(&mut inverted_index, seg_inv);
            segment::merge_document_store(&mut document_store, seg_store);
        }

        let total_doc_count = document_store.len() as u64;
        let doc_freq = inverted_index
            .iter()
            .map(|(term, postings)| (term.clone(), postings.len() as u64))
            .collect();

        Ok(Self {
            inverted_index,
            document_store,
            doc_freq,
            total_doc_count,
        })
    }

    /// `doc_id -> positions` for every document containing `term`, or an
    /// empty map if the term is absent.
    pub fn terms_docs(&self, term: &str) -> HashMap<String, Vec<u64>> {
        self.inverted_index.get(term).cloned().unwrap_or_default()
    }

    /// The stored fields for `doc_id`, or an empty map if absent.
    pub fn get_document(&self, doc_id: &str) -> HashMap<String, String> {
        self.document_store.get(doc_id).cloned().unwrap_or_default()
    }

    /// Total number of distinct documents across the union of segments.
    pub fn total_doc_count(&self) -> u64 {
        self.total_doc_count
    }

    /// Number of distinct documents containing `term`, across the union of
    /// segments. `0` if the term does not occur.
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }
}
