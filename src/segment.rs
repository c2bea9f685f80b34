use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const INVERTED_INDEX_FILE: &str = "inverted_index.json";
pub const DOCUMENT_STORE_FILE: &str = "document_store.json";

/// `term -> doc_id -> positions`, the on-disk and in-memory shape of a
/// segment's postings (spec.md §6).
pub type InvertedIndex = HashMap<String, HashMap<String, Vec<u64>>>;

/// `doc_id -> field_name -> field_value`, a segment's document store.
pub type DocumentStore = HashMap<String, HashMap<String, String>>;

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, segment_name: &str) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::segment_corrupt(segment_name, format!("missing file {}", path.display()))
        } else {
            Error::io(path, err)
        }
    })?;
    serde_json::from_str(&contents)
        .map_err(|err| Error::segment_corrupt(segment_name, err.to_string()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)
        .expect("segment serialization is infallible for this shape");
    fs::write(path, body).map_err(|err| Error::io(path, err))
}

/// Loads a segment's inverted index from `<index_dir>/<segment_name>/inverted_index.json`.
pub fn load_inverted_index(index_dir: &Path, segment_name: &str) -> Result<InvertedIndex> {
    let path = index_dir.join(segment_name).join(INVERTED_INDEX_FILE);
    read_json(&path, segment_name)
}

/// Loads a segment's document store from `<index_dir>/<segment_name>/document_store.json`.
pub fn load_document_store(index_dir: &Path, segment_name: &str) -> Result<DocumentStore> {
    let path = index_dir.join(segment_name).join(DOCUMENT_STORE_FILE);
    read_json(&path, segment_name)
}

/// Writes a segment's inverted index and document store to
/// `<index_dir>/<segment_name>/`, creating the directory if needed.
pub fn write_segment(
    index_dir: &Path,
    segment_name: &str,
    inverted_index: &InvertedIndex,
    document_store: &DocumentStore,
) -> Result<()> {
    let segment_dir = index_dir.join(segment_name);
    fs::create_dir_all(&segment_dir).map_err(|err| Error::io(&segment_dir, err))?;
    write_json(&segment_dir.join(INVERTED_INDEX_FILE), inverted_index)?;
    write_json(&segment_dir.join(DOCUMENT_STORE_FILE), document_store)?;
    Ok(())
}

/// Folds `src` into `dst` using the reference engine's merge policy
/// (spec.md §4.5, §4.7, §9): for a `(term, doc_id)` pair already present,
/// positions are *concatenated*, never deduplicated or re-sorted. This is
/// the same policy used whether merging segments into a reader's in-memory
/// union or into the merger's combined segment.
pub fn merge_inverted_index(dst: &mut InvertedIndex, src: InvertedIndex) {
    for (term, postings) in src {
        let dst_postings = dst.entry(term).or_default();
        for (doc_id, positions) in postings {
            dst_postings.entry(doc_id).or_default().extend(positions);
        }
    }
}

/// Folds `src` into `dst` field-by-field, later segment wins per field
/// (spec.md §4.5, §9: "`update`-style merge"). A document whose id appears
/// in two segments ends up with the union of both segments' fields, with
/// the later segment's value winning on any name collision.
pub fn merge_document_store(dst: &mut DocumentStore, src: DocumentStore) {
    for (doc_id, fields) in src {
        dst.entry(doc_id).or_default().extend(fields);
    }
}
