use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::version::{DocVersion, parse_loose};

const AUTO: &str = "auto";

/// A `stable`/`dev` alias as written in the user's config: either `"auto"`
/// or a pinned version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AliasSpec {
    #[default]
    Auto,
    Pinned(String),
}

impl AliasSpec {
    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Semantic value of an explicit pin. `None` for `auto` and for pins that
    /// do not parse.
    #[must_use]
    pub fn pinned_version(&self) -> Option<Version> {
        match self {
            Self::Auto => None,
            Self::Pinned(pin) => parse_loose(pin).ok(),
        }
    }

    /// Whether `version` is this pin, compared by normalized semantic value.
    #[must_use]
    pub fn pins(&self, version: &DocVersion) -> bool {
        match (self.pinned_version(), version.semver()) {
            (Some(pin), Some(semver)) => pin == *semver,
            _ => false,
        }
    }
}

impl From<String> for AliasSpec {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case(AUTO) {
            Self::Auto
        } else {
            Self::Pinned(value)
        }
    }
}

impl From<&str> for AliasSpec {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AliasSpec> for String {
    fn from(spec: AliasSpec) -> Self {
        match spec {
            AliasSpec::Auto => AUTO.to_string(),
            AliasSpec::Pinned(pin) => pin,
        }
    }
}

impl fmt::Display for AliasSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str(AUTO),
            Self::Pinned(pin) => f.write_str(pin),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    #[serde(default)]
    pub stable: AliasSpec,
    #[serde(default)]
    pub dev: AliasSpec,
}

impl AliasConfig {
    #[must_use]
    pub fn new(stable: impl Into<AliasSpec>, dev: impl Into<AliasSpec>) -> Self {
        Self {
            stable: stable.into(),
            dev: dev.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Stable,
    Dev,
}

impl Channel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The channel a version is published under.
///
/// Explicit pins win (stable first); otherwise prereleases and `0.x`
/// versions are `dev` and everything else is `stable`. A name that is not a
/// version has no channel.
#[must_use]
pub fn channel(version: &DocVersion, stable: &AliasSpec, dev: &AliasSpec) -> Option<Channel> {
    let semver = version.semver()?;
    if stable.pins(version) {
        return Some(Channel::Stable);
    }
    if dev.pins(version) {
        return Some(Channel::Dev);
    }
    if !semver.pre.is_empty() || semver.major == 0 {
        Some(Channel::Dev)
    } else {
        Some(Channel::Stable)
    }
}

#[must_use]
pub fn is_stable(version: &DocVersion, stable: &AliasSpec) -> bool {
    channel(version, stable, &AliasSpec::Auto) == Some(Channel::Stable)
}

#[must_use]
pub fn is_dev(version: &DocVersion, dev: &AliasSpec) -> bool {
    channel(version, &AliasSpec::Auto, dev) == Some(Channel::Dev)
}

/// Whether either explicit alias names `version`. `auto` never pins.
#[must_use]
pub fn is_pinned(version: &DocVersion, stable: &AliasSpec, dev: &AliasSpec) -> bool {
    stable.pins(version) || dev.pins(version)
}

/// Resolve an alias against the versions on disk.
///
/// An explicit pin resolves to the matching member of `versions`, if any.
/// `auto` stable is the highest automatically-stable version; `auto` dev is
/// the highest version overall, prereleases included.
#[must_use]
pub fn resolve_alias<'a>(
    versions: &'a [DocVersion],
    spec: &AliasSpec,
    channel_kind: Channel,
) -> Option<&'a DocVersion> {
    if !spec.is_auto() {
        return versions.iter().find(|v| spec.pins(v));
    }

    let candidates = versions.iter().filter(|v| match channel_kind {
        Channel::Stable => {
            channel(v, &AliasSpec::Auto, &AliasSpec::Auto) == Some(Channel::Stable)
        }
        Channel::Dev => v.semver().is_some(),
    });
    candidates.max_by(|a, b| a.semver().cmp(&b.semver()))
}
