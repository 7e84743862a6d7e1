use crate::alias::{AliasSpec, is_dev, is_pinned, is_stable};
use crate::version::DocVersion;

/// Tells whether a version still has a build on disk.
pub trait BuildLookup {
    fn has_build(&self, version: &DocVersion) -> bool;
}

impl<F> BuildLookup for F
where
    F: Fn(&DocVersion) -> bool,
{
    fn has_build(&self, version: &DocVersion) -> bool {
        self(version)
    }
}

/// A dev build that a stable release has overtaken.
///
/// Pinned versions are never stale.
#[must_use]
pub fn is_stale(
    version: &DocVersion,
    versions: &[DocVersion],
    stable: &AliasSpec,
    dev: &AliasSpec,
) -> bool {
    !is_pinned(version, stable, dev)
        && is_dev(version, dev)
        && versions
            .iter()
            .any(|other| is_stable(other, stable) && other.gt(version))
}

/// The stale members of `versions` that still have a build.
#[must_use]
pub fn stale_versions_to_purge(
    versions: &[DocVersion],
    stable: &AliasSpec,
    dev: &AliasSpec,
    builds: &impl BuildLookup,
) -> Vec<DocVersion> {
    versions
        .iter()
        .filter(|version| builds.has_build(version) && is_stale(version, versions, stable, dev))
        .cloned()
        .collect()
}
