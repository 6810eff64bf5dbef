use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read content file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed tech list {raw:?}")]
    MalformedTags {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no content entry named {slug:?}")]
    NotFound { slug: String },
}
