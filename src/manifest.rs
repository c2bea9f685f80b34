use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

pub const MANIFEST_FILE: &str = "segments.json";

/// One entry in the manifest: a segment's name and how many documents it
/// holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub name: String,
    pub doc_count: u64,
}

/// The ordered list of segments that make up the logical index, persisted as
/// `<index_dir>/segments.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub segments: Vec<SegmentInfo>,
}

impl Manifest {
    /// Loads the manifest, or an empty one if `segments.json` does not exist
    /// yet (a fresh index directory).
    pub fn load_or_default(index_dir: &Path) -> Result<Self> {
        let path = index_dir.join(MANIFEST_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&path, &contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Manifest::default()),
            Err(err) => Err(Error::io(path, err)),
        }
    }

    /// Loads the manifest, treating a missing file as an error. Used by the
    /// reader and merger, which require an existing index.
    pub fn load(index_dir: &Path) -> Result<Self> {
        let path = index_dir.join(MANIFEST_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&path, &contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::ManifestMissing(path))
            }
            Err(err) => Err(Error::io(path, err)),
        }
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|err| Error::manifest_corrupt(path, err.to_string()))
    }

    /// Writes the manifest atomically: write to a temp file in the index
    /// directory, then rename over `segments.json`. This resolves spec.md
    /// §9's open atomicity question for the writer and merger: a crash
    /// mid-write leaves the old manifest untouched.
    pub fn save(&self, index_dir: &Path) -> Result<()> {
        fs::create_dir_all(index_dir).map_err(|err| Error::io(index_dir, err))?;
        let path = index_dir.join(MANIFEST_FILE);
        let body = serde_json::to_string_pretty(self)
            .expect("Manifest serialization is infallible for this shape");

        let mut tmp = NamedTempFile::new_in(index_dir).map_err(|err| Error::io(index_dir, err))?;
        use std::io::Write;
        tmp.write_all(body.as_bytes())
            .map_err(|err| Error::io(&path, err))?;
        tmp.persist(&path)
            .map_err(|err| Error::io(&path, err.error))?;
        Ok(())
    }

    pub fn segment_dir(index_dir: &Path, segment_name: &str) -> PathBuf {
        index_dir.join(segment_name)
    }
}
