use std::path::{Path, PathBuf};

use docver_core::{Channel, DocVersion};

use crate::error::TreeError;

pub const METADATA_FILE: &str = ".typedoc-plugin-versions";
pub const VERSIONS_JS_FILE: &str = "versions.js";
pub const INDEX_HTML_FILE: &str = "index.html";

/// Well-known locations inside a documentation output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsPaths {
    out: PathBuf,
}

impl DocsPaths {
    #[must_use]
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self { out: out.into() }
    }

    /// Like [`DocsPaths::new`], but the directory must already exist.
    ///
    /// # Errors
    /// Returns [`TreeError::MissingDirectory`] when `out` is not a directory.
    pub fn existing(out: impl Into<PathBuf>) -> Result<Self, TreeError> {
        let out = out.into();
        if out.is_dir() {
            Ok(Self { out })
        } else {
            Err(TreeError::MissingDirectory { path: out })
        }
    }

    #[must_use]
    pub fn out(&self) -> &Path {
        &self.out
    }

    #[must_use]
    pub fn version_dir(&self, version: &DocVersion) -> PathBuf {
        self.out.join(version.as_str())
    }

    #[must_use]
    pub fn metadata_file(&self) -> PathBuf {
        self.out.join(METADATA_FILE)
    }

    #[must_use]
    pub fn versions_js(&self) -> PathBuf {
        self.out.join(VERSIONS_JS_FILE)
    }

    #[must_use]
    pub fn index_html(&self) -> PathBuf {
        self.out.join(INDEX_HTML_FILE)
    }

    #[must_use]
    pub fn alias_link(&self, channel: Channel) -> PathBuf {
        self.out.join(channel.as_str())
    }

    #[must_use]
    pub fn minor_link(&self, major: u64, minor: u64) -> PathBuf {
        self.out.join(minor_key(major, minor))
    }
}

/// `v{major}.{minor}`, the name shared by minor links and `versions.js` keys.
#[must_use]
pub fn minor_key(major: u64, minor: u64) -> String {
    format!("v{major}.{minor}")
}

/// `path` relative to `base` when it lies below it, for display.
#[must_use]
pub fn display_label(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
