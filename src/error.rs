use std::path::PathBuf;

use thiserror::Error;

/// The typed error surface of this crate.
///
/// The writer's `add_document` never fails (it only touches in-memory
/// buffers); `commit` can surface [`Error::Io`]. The reader surfaces
/// manifest/segment problems once, at construction time, and is infallible
/// afterwards. The searcher surfaces nothing beyond what the reader already
/// surfaced; an empty normalized query is not an error, it is an empty
/// result (see `Searcher::search_with_scores`).
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest missing at {0}")]
    ManifestMissing(PathBuf),

    #[error("manifest corrupt at {path}: {reason}")]
    ManifestCorrupt { path: PathBuf, reason: String },

    #[error("segment {segment} corrupt: {reason}")]
    SegmentCorrupt { segment: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn manifest_corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::ManifestCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn segment_corrupt(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SegmentCorrupt {
            segment: segment.into(),
            reason: reason.into(),
        }
    }
}
