use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::atomic::write_atomic;
use crate::error::TreeError;
use crate::metadata::Metadata;
use crate::paths::{DocsPaths, display_label};
use crate::render;

/// A pending change to one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledDiff {
    /// The file's path for display.
    pub label: String,
    /// Unified line diff from the current to the refreshed content.
    pub diff: String,
    path: PathBuf,
    contents: String,
}

impl LabelledDiff {
    /// `None` when `current` and `refreshed` are identical.
    #[must_use]
    pub fn between(label: String, path: PathBuf, current: &str, refreshed: String) -> Option<Self> {
        if current == refreshed {
            return None;
        }
        let diff = TextDiff::from_lines(current, refreshed.as_str())
            .unified_diff()
            .context_radius(3)
            .header(&label, &label)
            .to_string();
        Some(Self {
            label,
            diff,
            path,
            contents: refreshed,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the refreshed content.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), TreeError> {
        write_atomic(&self.path, self.contents.as_bytes())?;
        Ok(())
    }
}

/// A file that does not exist yet reads as empty.
fn read_or_empty(path: &Path) -> Result<String, TreeError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(error) => Err(error.into()),
    }
}

/// Diffs for the metadata sidecar, `versions.js` and `index.html`, keeping
/// only the files that would change. Labels are relative to `base`.
///
/// The metadata is compared as loaded, so formatting-only differences in
/// the sidecar are not reported.
///
/// # Errors
/// Returns an error if the metadata cannot be serialized, or if an existing
/// `versions.js` or `index.html` cannot be read as text.
pub fn pending_changes(
    paths: &DocsPaths,
    current: &Metadata,
    refreshed: &Metadata,
    base: &Path,
) -> Result<Vec<LabelledDiff>, TreeError> {
    let metadata_path = paths.metadata_file();
    let versions_path = paths.versions_js();
    let index_path = paths.index_html();

    let candidates = [
        LabelledDiff::between(
            display_label(&metadata_path, base),
            metadata_path,
            &current.to_json()?,
            refreshed.to_json()?,
        ),
        LabelledDiff::between(
            display_label(&versions_path, base),
            versions_path.clone(),
            &read_or_empty(&versions_path)?,
            render::versions_js(refreshed),
        ),
        LabelledDiff::between(
            display_label(&index_path, base),
            index_path.clone(),
            &read_or_empty(&index_path)?,
            render::index_html(refreshed),
        ),
    ];
    Ok(candidates.into_iter().flatten().collect())
}
