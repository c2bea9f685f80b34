use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::manifest::{Manifest, SegmentInfo};
use crate::segment::{self, DocumentStore, InvertedIndex};

/// Default name for the single segment a merge produces.
pub const DEFAULT_MERGED_SEGMENT: &str = "merged_segment";

/// Compacts every segment in an index directory into exactly one new
/// segment, then rewrites the manifest and deletes the old segment
/// directories (spec.md §4.7).
///
/// Not safe to run concurrently with a writer or with itself (spec.md §5) —
/// nothing in this type enforces that; it is a cooperative, single-writer
/// model, same as the rest of the crate.
pub struct IndexMerger {
    index_dir: PathBuf,
}

impl IndexMerger {
    pub fn open(index_dir: impl Into<PathBuf>) -> Self {
        Self {
            index_dir: index_dir.into(),
        }
    }

    /// Merges all segments into `new_segment_name` (default
    /// [`DEFAULT_MERGED_SEGMENT`]). A no-op, with a logged "no merge
    /// needed", when the manifest has zero or one segment.
    ///
    /// Ordering discipline: the new segment is fully written, then the
    /// manifest is rewritten (atomically, via temp-then-rename) to name only
    /// the new segment, and only then are the old segment directories
    /// deleted. A crash between the manifest rewrite and the deletions
    /// leaves harmless orphan directories on disk; the manifest is the
    /// source of truth for what is "in" the index (spec.md §3, §9).
    pub fn merge_all(&self, new_segment_name: Option<&str>) -> Result<()> {
        let new_segment_name = new_segment_name.unwrap_or(DEFAULT_MERGED_SEGMENT);
        let manifest = Manifest::load(&self.index_dir)?;

        if manifest.segments.len() <= 1 {
            println!("no merge needed");
            return Ok(());
        }

        let mut merged_inverted_index = InvertedIndex::new();
        let mut merged_document_store = DocumentStore::new();

        for seg in &manifest.segments {
            let seg_dir = Manifest::segment_dir(&self.index_dir, &seg.name);
            if !seg_dir.is_dir() {
                return Err(Error::segment_corrupt(
                    &seg.name,
                    format!("segment directory missing: {}", seg_dir.display()),
                ));
            }
            let inv = segment::load_inverted_index(&self.index_dir, &seg.name)?;
            let store = segment::load_document_store(&self.index_dir, &seg.name)?;
            segment::merge_inverted_index(&mut merged_inverted_index, inv);
            segment::merge_document_store(&mut merged_document_store, store);
        }

        segment::write_segment(
            &self.index_dir,
            new_segment_name,
            &merged_inverted_index,
            &merged_document_store,
        )?;

        let new_manifest = Manifest {
            segments: vec![SegmentInfo {
                name: new_segment_name.to_string(),
                doc_count: merged_document_store.len() as u64,
            }],
        };
        new_manifest.save(&self.index_dir)?;

        for seg in &manifest.segments {
            if seg.name == new_segment_name {
                continue;
            }
            let seg_dir = Manifest::segment_dir(&self.index_dir, &seg.name);
            if seg_dir.is_dir() {
                std::fs::remove_dir_all(&seg_dir).map_err(|err| Error::io(&seg_dir, err))?;
            }
        }

        println!("merge complete, new segment: {new_segment_name}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use crate::document::{Document, Field};
    use crate::reader::IndexReader;
    use crate::searcher::Searcher;
    use crate::query::Query;
    use crate::writer::IndexWriter;

    fn text_doc(id: &str, content: &str) -> Document {
        let mut d = Document::new(id);
        d.add_field(Field::text("content", content));
        d
    }

    #[test]
    fn zero_or_one_segment_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = IndexWriter::open(dir.path(), Analyzer::default()).unwrap();
        writer.add_document(&text_doc("1", "hello"));
        writer.commit().unwrap();

        let merger = IndexMerger::open(dir.path());
        merger.merge_all(None).unwrap();

        let manifest = Manifest::load(dir.path()).unwrap();
        assert_eq!(manifest.segments.len(), 1);
        assert_eq!(manifest.segments[0].name, "segment_000");
    }

    #[test]
    fn merge_produces_one_segment_with_summed_doc_count() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = IndexWriter::open(dir.path(), Analyzer::default()).unwrap();
            writer.add_document(&text_doc("1", "apple banana"));
            writer.commit().unwrap();
        }
        {
            let mut writer = IndexWriter::open(dir.path(), Analyzer::default()).unwrap();
            writer.add_document(&text_doc("2", "apple cherry"));
            writer.commit().unwrap();
        }

        let merger = IndexMerger::open(dir.path());
        merger.merge_all(None).unwrap();

        let manifest = Manifest::load(dir.path()).unwrap();
        assert_eq!(manifest.segments.len(), 1);
        assert_eq!(manifest.segments[0].name, DEFAULT_MERGED_SEGMENT);
        assert_eq!(manifest.segments[0].doc_count, 2);
        assert!(dir.path().join(DEFAULT_MERGED_SEGMENT).is_dir());
        assert!(!dir.path().join("segment_000").exists());
        assert!(!dir.path().join("segment_001").exists());
    }

    #[test]
    fn merge_preserves_search_results() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = IndexWriter::open(dir.path(), Analyzer::default()).unwrap();
            writer.add_document(&text_doc("1", "apple banana"));
            writer.commit().unwrap();
        }
        {
            let mut writer = IndexWriter::open(dir.path(), Analyzer::default()).unwrap();
            writer.add_document(&text_doc("2", "apple cherry"));
            writer.commit().unwrap();
        }

        let analyzer = Analyzer::default();
        let before = {
            let reader = IndexReader::open(dir.path()).unwrap();
            let searcher = Searcher::new(&reader, &analyzer);
            searcher.search_with_scores(&Query::or(vec!["apple".to_string()]))
        };

        IndexMerger::open(dir.path()).merge_all(None).unwrap();

        let after = {
            let reader = IndexReader::open(dir.path()).unwrap();
            let searcher = Searcher::new(&reader, &analyzer);
            searcher.search_with_scores(&Query::or(vec!["apple".to_string()]))
        };

        assert_eq!(before, after);
    }

    #[test]
    fn missing_segment_directory_is_segment_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = IndexWriter::open(dir.path(), Analyzer::default()).unwrap();
            writer.add_document(&text_doc("1", "a"));
            writer.commit().unwrap();
        }
        {
            let mut writer = IndexWriter::open(dir.path(), Analyzer::default()).unwrap();
            writer.add_document(&text_doc("2", "b"));
            writer.commit().unwrap();
        }
        std::fs::remove_dir_all(dir.path().join("segment_000")).unwrap();

        let merger = IndexMerger::open(dir.path());
        let err = merger.merge_all(None).unwrap_err();
        assert!(matches!(err, Error::SegmentCorrupt { .. }));
        // the untouched segment must survive an aborted merge
        assert!(dir.path().join("segment_001").is_dir());
    }
}
