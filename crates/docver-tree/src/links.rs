//! `stable`/`dev` alias links and `v{major}.{minor}` links.
//!
//! Links are relative to the output directory so the tree can be moved or
//! published as a whole.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use docver_core::{Channel, DocVersion};

use crate::error::TreeError;
use crate::metadata::Metadata;
use crate::paths::DocsPaths;

/// Recreate every alias and minor link described by `metadata`.
///
/// Returns the links that were written. Existing links are replaced; real
/// files or directories in the way are left alone.
///
/// # Errors
/// Returns an error when a link cannot be inspected, removed or created.
pub fn make_symlinks(paths: &DocsPaths, metadata: &Metadata) -> Result<Vec<PathBuf>, TreeError> {
    let mut written = Vec::new();

    for channel in [Channel::Stable, Channel::Dev] {
        if let Some(target) = metadata.link_target(channel) {
            let link = paths.alias_link(channel);
            if replace_link(&link, target)? {
                written.push(link);
            }
        }
    }

    for ((major, minor), target) in minor_link_targets(&metadata.versions) {
        let link = paths.minor_link(major, minor);
        if replace_link(&link, target)? {
            written.push(link);
        }
    }

    Ok(written)
}

/// Per `(major, minor)`, the highest release, or the highest prerelease
/// when the line has no release yet. Ordered newest line first.
#[must_use]
pub fn minor_link_targets(versions: &[DocVersion]) -> Vec<((u64, u64), &DocVersion)> {
    let rank = |version: &DocVersion| (!version.is_prerelease(), version.semver().cloned());

    let mut best: HashMap<(u64, u64), &DocVersion> = HashMap::new();
    for version in versions {
        let Some(semver) = version.semver() else {
            continue;
        };
        let key = (semver.major, semver.minor);
        if best
            .get(&key)
            .is_none_or(|current| rank(version) > rank(*current))
        {
            best.insert(key, version);
        }
    }

    let mut targets: Vec<_> = best.into_iter().collect();
    targets.sort_by(|(left, _), (right, _)| right.cmp(left));
    targets
}

fn replace_link(link: &Path, target: &DocVersion) -> Result<bool, TreeError> {
    match std::fs::symlink_metadata(link) {
        Ok(meta) if meta.file_type().is_symlink() => remove_link(link)?,
        Ok(_) => {
            log::warn!(
                "{}",
                TreeError::NotASymlink {
                    path: link.to_path_buf()
                }
            );
            return Ok(false);
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
        Err(error) => return Err(error.into()),
    }

    create_link(Path::new(target.as_str()), link)?;
    log::debug!("Linked {} -> {target}", link.display());
    Ok(true)
}

fn create_link(target: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::os::windows::fs::symlink_dir(target, link)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::os::unix::fs::symlink(target, link)
    }
}

fn remove_link(link: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::fs::remove_dir(link).or_else(|_| std::fs::remove_file(link))
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::fs::remove_file(link)
    }
}

#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}

/// A symlink whose target no longer exists. Relative targets resolve
/// against the link's own directory.
#[must_use]
pub fn is_broken_symlink(path: &Path) -> bool {
    is_symlink(path) && std::fs::metadata(path).is_err()
}

/// Remove broken symlinks directly inside `dir`, returning their paths.
///
/// # Errors
/// Returns an error when `dir` cannot be read or a link cannot be removed.
pub fn unlink_broken_symlinks(dir: &Path) -> Result<Vec<PathBuf>, TreeError> {
    let mut removed = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_broken_symlink(&path) {
            remove_link(&path)?;
            log::debug!("Unlinked broken symlink {}", path.display());
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::Path;

    use docver_core::{AliasConfig, DocVersion};

    use super::{
        is_broken_symlink, is_symlink, make_symlinks, minor_link_targets, unlink_broken_symlinks,
    };
    use crate::metadata::Metadata;
    use crate::paths::DocsPaths;

    fn versions(names: &[&str]) -> Vec<DocVersion> {
        names.iter().copied().map(DocVersion::from).collect()
    }

    fn docs_with(names: &[&str]) -> (tempfile::TempDir, DocsPaths) {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        for name in names {
            std::fs::create_dir(temp_dir.path().join(name)).expect("version dir should be created");
        }
        let paths = DocsPaths::new(temp_dir.path());
        (temp_dir, paths)
    }

    fn link_target(path: &Path) -> String {
        std::fs::read_link(path)
            .expect("link should be readable")
            .display()
            .to_string()
    }

    #[test]
    fn minor_targets_prefer_releases() {
        let set = versions(&[
            "v2.0.0-alpha.2",
            "v2.0.0-alpha.1",
            "v1.1.0",
            "v1.1.1-rc.1",
            "v1.0.1",
            "v1.0.0",
        ]);

        let targets: Vec<((u64, u64), &str)> = minor_link_targets(&set)
            .into_iter()
            .map(|(key, version)| (key, version.as_str()))
            .collect();

        assert_eq!(
            targets,
            vec![
                ((2, 0), "v2.0.0-alpha.2"),
                ((1, 1), "v1.1.0"),
                ((1, 0), "v1.0.1"),
            ]
        );
    }

    #[test]
    fn make_symlinks_creates_relative_alias_and_minor_links() {
        let names = ["v2.0.0-alpha.1", "v1.1.0", "v1.0.0"];
        let (_temp_dir, paths) = docs_with(&names);
        let metadata = Metadata::refresh(versions(&names), &AliasConfig::default());

        let written = make_symlinks(&paths, &metadata).expect("symlinks should be created");

        assert_eq!(written.len(), 5);
        assert_eq!(link_target(&paths.out().join("stable")), "v1.1.0");
        assert_eq!(link_target(&paths.out().join("dev")), "v2.0.0-alpha.1");
        assert_eq!(link_target(&paths.out().join("v2.0")), "v2.0.0-alpha.1");
        assert_eq!(link_target(&paths.out().join("v1.1")), "v1.1.0");
        assert_eq!(link_target(&paths.out().join("v1.0")), "v1.0.0");
        assert!(paths.out().join("stable").is_dir());
    }

    #[test]
    fn alias_links_fall_back_to_each_other() {
        let names = ["v1.0.0"];
        let (_temp_dir, paths) = docs_with(&names);
        let metadata = Metadata::refresh(versions(&names), &AliasConfig::default());

        make_symlinks(&paths, &metadata).expect("symlinks should be created");

        assert_eq!(link_target(&paths.out().join("dev")), "v1.0.0");
    }

    #[test]
    fn make_symlinks_replaces_existing_links() {
        let (_temp_dir, paths) = docs_with(&["v1.0.0", "v1.0.1"]);
        std::os::unix::fs::symlink("v1.0.0", paths.out().join("stable"))
            .expect("old link should be created");
        let metadata = Metadata::refresh(versions(&["v1.0.1", "v1.0.0"]), &AliasConfig::default());

        make_symlinks(&paths, &metadata).expect("symlinks should be created");

        assert_eq!(link_target(&paths.out().join("stable")), "v1.0.1");
    }

    #[test]
    fn make_symlinks_leaves_real_directories_alone() {
        let (_temp_dir, paths) = docs_with(&["v1.0.0", "stable"]);
        let metadata = Metadata::refresh(versions(&["v1.0.0"]), &AliasConfig::default());

        let written = make_symlinks(&paths, &metadata).expect("symlinks should be created");

        assert!(!is_symlink(&paths.out().join("stable")));
        assert!(!written.contains(&paths.out().join("stable")));
        assert!(is_symlink(&paths.out().join("dev")));
    }

    #[test]
    fn unlink_broken_symlinks_removes_only_dangling_links() {
        let (_temp_dir, paths) = docs_with(&["v1.0.0"]);
        let out = paths.out();
        std::os::unix::fs::symlink("v1.0.0", out.join("stable")).expect("link should be created");
        std::os::unix::fs::symlink("v0.9.0", out.join("v0.9")).expect("link should be created");
        std::fs::write(out.join("index.html"), "").expect("file should be written");

        assert!(is_broken_symlink(&out.join("v0.9")));
        assert!(!is_broken_symlink(&out.join("stable")));
        assert!(!is_broken_symlink(&out.join("index.html")));

        let removed = unlink_broken_symlinks(out).expect("broken links should be removed");

        assert_eq!(removed, vec![out.join("v0.9")]);
        assert!(is_symlink(&out.join("stable")));
        assert!(out.join("index.html").is_file());
    }
}
