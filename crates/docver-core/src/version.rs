use semver::{BuildMetadata, Version};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::VersionParseError;

/// Parse a version the way node-semver does in loose mode.
///
/// Leading whitespace, `v` and `=` characters are ignored. Build metadata is
/// dropped so that it never takes part in ordering or equality.
///
/// # Errors
/// Returns an error when the remaining text is not a `X.Y.Z[-pre][+build]`
/// version.
pub fn parse_loose(input: &str) -> Result<Version, VersionParseError> {
    let stripped = input
        .trim()
        .trim_start_matches(|c: char| c == 'v' || c == '=' || c.is_whitespace());
    if stripped.is_empty() {
        return Err(VersionParseError::InvalidFormat {
            input: input.to_string(),
        });
    }

    let mut version = Version::parse(stripped).map_err(|e| VersionParseError::Invalid {
        input: input.to_string(),
        reason: e.to_string(),
    })?;
    version.build = BuildMetadata::EMPTY;
    Ok(version)
}

/// A documentation build, named after the directory it lives in.
///
/// Two builds are equal when their names are equal. The semantic value is
/// parsed once on construction; a name that is not a version has none and is
/// treated as non-matching by every filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DocVersion {
    name: String,
    semver: Option<Version>,
}

impl DocVersion {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let semver = parse_loose(&name).ok();
        Self { name, semver }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn semver(&self) -> Option<&Version> {
        self.semver.as_ref()
    }

    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.semver.as_ref().is_some_and(|v| !v.pre.is_empty())
    }

    /// `v{major}.{minor}.{patch}[-pre]`, if the name is a version.
    #[must_use]
    pub fn normalized(&self) -> Option<String> {
        self.semver.as_ref().map(|v| format!("v{v}"))
    }

    /// Semantic comparison; `None` when either side is not a version.
    #[must_use]
    pub fn cmp_semver(&self, other: &Self) -> Option<Ordering> {
        Some(self.semver.as_ref()?.cmp(other.semver.as_ref()?))
    }

    #[must_use]
    pub fn gt(&self, other: &Self) -> bool {
        self.cmp_semver(other) == Some(Ordering::Greater)
    }
}

impl PartialEq for DocVersion {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DocVersion {}

impl Hash for DocVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for DocVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<String> for DocVersion {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for DocVersion {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<DocVersion> for String {
    fn from(version: DocVersion) -> Self {
        version.name
    }
}

/// Newest first. Names that are not versions sort last, by name.
pub fn sort_descending(versions: &mut [DocVersion]) {
    versions.sort_by(|a, b| match (&a.semver, &b.semver) {
        (Some(left), Some(right)) => right.cmp(left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

#[must_use]
pub fn is_sorted_descending(versions: &[DocVersion]) -> bool {
    versions
        .windows(2)
        .all(|pair| pair[0].cmp_semver(&pair[1]) != Some(Ordering::Less))
}
