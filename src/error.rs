use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("Post with id {id} not found")]
    NotFound { id: String },

    #[error("Malformed front matter in {path:?}: {reason}")]
    MalformedFrontMatter { path: PathBuf, reason: String },

    #[error("Missing required field `{field}` in {path:?}")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("Duplicate post id {id}: {first:?} and {second:?}")]
    DuplicateId { id: String, first: PathBuf, second: PathBuf },

    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render post {id}: {reason}")]
    Render { id: String, reason: String },
}

impl PostError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PostError::NotFound { .. })
    }
}

pub type PostResult<T> = Result<T, PostError>;
