use std::path::PathBuf;

use docver_tree::TreeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Path does not exist: {}", path.display())]
    MissingPath { path: PathBuf },

    #[error("File does not exist: {}", path.display())]
    MissingConfig { path: PathBuf },

    #[error("Invalid JSON in {}: {details}", path.display())]
    InvalidJson { path: PathBuf, details: String },

    #[error("Package version was not found in {}", path.display())]
    MissingPackageVersion { path: PathBuf },

    #[error("Invalid package version in {}: {version}", path.display())]
    InvalidPackageVersion { path: PathBuf, version: String },

    #[error("Missing docs for package.json version: {version}\nDid you forget to run typedoc?")]
    MissingPackageDocs { version: String },

    #[error("Failed to purge {failed} of {total} builds")]
    PurgeFailed { failed: usize, total: usize },

    #[error("IO error ({kind}): {message}")]
    IoError {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl CliError {
    pub fn invalid_json(path: impl Into<PathBuf>, error: &serde_json::Error) -> Self {
        Self::InvalidJson {
            path: path.into(),
            details: error.to_string(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
