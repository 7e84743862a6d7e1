use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Directory does not exist: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("Refusing to replace {} with a symlink", path.display())]
    NotASymlink { path: PathBuf },

    #[error("Could not remove {}: {message}", path.display())]
    RemoveFailed { path: PathBuf, message: String },

    #[error("Invalid JSON: {details}")]
    Json { details: String },

    #[error("IO error ({kind}): {message}")]
    IoError {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl TreeError {
    pub fn remove_failed(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::RemoveFailed {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

impl From<std::io::Error> for TreeError {
    fn from(err: std::io::Error) -> Self {
        TreeError::IoError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::Json {
            details: err.to_string(),
        }
    }
}
