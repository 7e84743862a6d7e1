use std::path::PathBuf;

use docver_core::DocVersion;
use futures_util::future::join_all;

use crate::error::TreeError;
use crate::paths::DocsPaths;

/// The outcome of deleting one build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub version: DocVersion,
    pub path: PathBuf,
    pub result: Result<(), TreeError>,
}

impl Removal {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Delete the build directories of `versions` concurrently.
///
/// Every deletion runs to completion on its own; a failure is reported in
/// its [`Removal`] and never cancels the others. Results keep the order of
/// `versions`.
pub async fn remove_builds(paths: &DocsPaths, versions: &[DocVersion]) -> Vec<Removal> {
    let removals = versions.iter().map(|version| {
        let path = paths.version_dir(version);
        async move {
            let result = tokio::fs::remove_dir_all(&path)
                .await
                .map_err(|error| TreeError::remove_failed(&path, &error));
            match &result {
                Ok(()) => log::debug!("Removed {}", path.display()),
                Err(error) => log::debug!("{error}"),
            }
            Removal {
                version: version.clone(),
                path,
                result,
            }
        }
    });
    join_all(removals).await
}
