use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::analyzer::Analyzer;
use crate::document::{Document, FieldType};
use crate::error::Result;
use crate::manifest::{Manifest, SegmentInfo};
use crate::segment::{self, DocumentStore, InvertedIndex};
use std::path::{Path, PathBuf};

/// Accumulates an in-memory inverted index and document store for a batch of
/// added documents; on [`IndexWriter::commit`], flushes them as a new
/// immutable segment (spec.md §4.2–§4.4).
///
/// `add_document` without a following `commit` loses data: this is
/// deliberate, at-most-once-per-commit semantics with no journaling
/// (spec.md §4.2). This is the entry point an out-of-scope ingestion driver
/// (directory walk + text extraction) would call repeatedly before a single
/// `commit`.
pub struct IndexWriter {
    index_dir: PathBuf,
    analyzer: Analyzer,
    inverted_index: InvertedIndex,
    document_store: DocumentStore,
    buffered_doc_count: u64,
    segment_counter: usize,
    progress: Option<Arc<Mutex<Sender<String>>>>,
}

impl IndexWriter {
    /// Opens a writer over `index_dir`, creating it if absent and loading
    /// the existing manifest if present. The in-memory segment counter
    /// starts at the number of segments already recorded.
    pub fn open(index_dir: impl Into<PathBuf>, analyzer: Analyzer) -> Result<Self> {
        let index_dir = index_dir.into();
        std::fs::create_dir_all(&index_dir)
            .map_err(|err| crate::error::Error::io(&index_dir, err))?;
        let manifest = Manifest::load_or_default(&index_dir)?;
        Ok(Self {
            index_dir,
            analyzer,
            inverted_index: InvertedIndex::new(),
            document_store: DocumentStore::new(),
            buffered_doc_count: 0,
            segment_counter: manifest.segments.len(),
            progress: None,
        })
    }

    /// Attaches a sink for operator-facing progress messages (spec.md §7,
    /// §4.9). Without one, progress is printed to stdout.
    pub fn with_progress_sink(mut self, sink: Arc<Mutex<Sender<String>>>) -> Self {
        self.progress = Some(sink);
        self
    }

    fn report(&self, message: String) {
        match &self.progress {
            Some(sink) => {
                if let Ok(sender) = sink.lock() {
                    let _ = sender.send(message);
                }
            }
            None => println!("{message}"),
        }
    }

    /// Buffers `doc` into the in-memory index and document store. Does not
    /// touch disk; never fails (spec.md §4.2, §7).
    ///
    /// For each field: the document store entry is updated (later field with
    /// the same name overwrites earlier). `TEXT` fields are analyzed and
    /// every produced term is posted at its 0-based position in that field's
    /// analyzed stream; positions from a second `TEXT` field in the same
    /// document restart at 0 and land in the *same* per-`(term, doc_id)`
    /// list (spec.md §4.3, §9) — documents that need distinct field
    /// position spaces must be split into distinct documents. `KEYWORD`
    /// fields are lowercased as a single token posted at position 0.
    /// `STORED` fields never reach the inverted index.
    pub fn add_document(&mut self, doc: &Document) {
        let doc_id = &doc.doc_id;
        let store_entry = self.document_store.entry(doc_id.clone()).or_default();

        for field in &doc.fields {
            store_entry.insert(field.name.clone(), field.value.clone());

            match field.field_type {
                FieldType::Text => {
                    let terms = self.analyzer.analyze(&field.value);
                    for (pos, term) in terms.into_iter().enumerate() {
                        self.inverted_index
                            .entry(term)
                            .or_default()
                            .entry(doc_id.clone())
                            .or_default()
                            .push(pos as u64);
                    }
                }
                FieldType::Keyword => {
                    let term = field.value.to_lowercase();
                    self.inverted_index
                        .entry(term)
                        .or_default()
                        .entry(doc_id.clone())
                        .or_default()
                        .push(0);
                }
                FieldType::Stored => {}
            }
        }

        self.buffered_doc_count += 1;
    }

    /// Flushes the current buffers as a new segment named
    /// `segment_<counter zero-padded to 3 digits>`, appends an entry to the
    /// manifest, and clears the buffers. A no-op if nothing was buffered.
    pub fn commit(&mut self) -> Result<()> {
        if self.buffered_doc_count == 0 {
            return Ok(());
        }

        let segment_name = format!("segment_{:03}", self.segment_counter);
        segment::write_segment(
            &self.index_dir,
            &segment_name,
            &self.inverted_index,
            &self.document_store,
        )?;

        let mut manifest = Manifest::load_or_default(&self.index_dir)?;
        manifest.segments.push(SegmentInfo {
            name: segment_name.clone(),
            doc_count: self.buffered_doc_count,
        });
        manifest.save(&self.index_dir)?;

        self.report(format!(
            "committed {segment_name} ({} docs)",
            self.buffered_doc_count
        ));

        self.inverted_index.clear();
        self.document_store.clear();
        self.buffered_doc_count = 0;
        self.segment_counter += 1;

        Ok(())
    }

    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }
}
