use std::path::Path;

use docver_core::{BuildLookup, DocVersion, sort_descending};

use crate::error::TreeError;
use crate::paths::DocsPaths;

/// The documentation builds present in an output directory.
#[derive(Debug, Clone)]
pub struct DocsTree {
    paths: DocsPaths,
}

impl DocsTree {
    /// # Errors
    /// Returns [`TreeError::MissingDirectory`] when `out` is not a directory.
    pub fn open(out: impl AsRef<Path>) -> Result<Self, TreeError> {
        Ok(Self {
            paths: DocsPaths::existing(out.as_ref())?,
        })
    }

    #[must_use]
    pub fn paths(&self) -> &DocsPaths {
        &self.paths
    }

    /// Version-named subdirectories, newest first.
    ///
    /// Symlinks (the `stable`/`dev` aliases and minor links) and names that
    /// do not parse as versions are skipped.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be read.
    pub fn versions(&self) -> Result<Vec<DocVersion>, TreeError> {
        let mut versions = Vec::new();
        for entry in std::fs::read_dir(self.paths.out())? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(DocVersion::new) else {
                log::debug!("Skipping non UTF-8 entry {}", entry.path().display());
                continue;
            };
            if name.semver().is_some() {
                versions.push(name);
            }
        }
        sort_descending(&mut versions);
        Ok(versions)
    }
}

impl BuildLookup for DocsTree {
    fn has_build(&self, version: &DocVersion) -> bool {
        self.paths.version_dir(version).is_dir()
    }
}
