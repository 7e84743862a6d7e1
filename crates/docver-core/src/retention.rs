use semver::Version;
use std::collections::HashMap;
use std::hash::Hash;

use crate::range::{Range, RangeOptions, satisfies};
use crate::version::{DocVersion, is_sorted_descending};

/// How many distinct buckets a count filter keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quota {
    Keep(usize),
    #[default]
    Unbounded,
}

impl Quota {
    /// A count is usable when it is finite and not negative.
    #[must_use]
    pub fn is_valid(count: f64) -> bool {
        count.is_finite() && count >= 0.0
    }

    /// Fractional counts are truncated; invalid counts disable the filter.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_count(count: f64) -> Self {
        if Self::is_valid(count) {
            Self::Keep(count.trunc() as usize)
        } else {
            Self::Unbounded
        }
    }

    /// Normalize a repeated command-line option: only the last value counts.
    #[must_use]
    pub fn from_last(counts: &[f64]) -> Self {
        counts
            .last()
            .copied()
            .map_or(Self::Unbounded, Self::from_count)
    }

    #[must_use]
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::Keep(count) => Some(count),
            Self::Unbounded => None,
        }
    }

    #[must_use]
    pub fn is_bounded(self) -> bool {
        self.limit().is_some()
    }
}

/// A group of versions sharing a release prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Major(u64),
    Minor(u64, u64),
    Patch(u64, u64, u64),
}

impl Bucket {
    fn range(self, options: RangeOptions) -> Range {
        match self {
            Self::Major(major) => Range::major(major, options),
            Self::Minor(major, minor) => Range::minor(major, minor, options),
            Self::Patch(major, minor, patch) => Range::exact(major, minor, patch, options),
        }
    }
}

/// Versions matching any of `patterns`, in input order.
#[must_use]
pub fn versions_to_purge(
    versions: &[DocVersion],
    patterns: &[String],
    options: RangeOptions,
) -> Vec<DocVersion> {
    versions
        .iter()
        .filter(|version| should_exclude(version, patterns, options))
        .cloned()
        .collect()
}

/// Whether `version` satisfies any range in `exclude`.
#[must_use]
pub fn should_exclude(version: &DocVersion, exclude: &[String], options: RangeOptions) -> bool {
    exclude
        .iter()
        .any(|pattern| satisfies(version, pattern, options))
}

/// Keeps the first `quota` distinct majors in input order.
#[must_use]
pub fn major_versions_to_purge(
    versions: &[DocVersion],
    quota: Quota,
    options: RangeOptions,
) -> Vec<DocVersion> {
    purge_buckets(versions, quota, options, "major", |v| {
        ((), Bucket::Major(v.major))
    })
}

/// Keeps the first `quota` distinct minors of every major.
#[must_use]
pub fn minor_versions_to_purge(
    versions: &[DocVersion],
    quota: Quota,
    options: RangeOptions,
) -> Vec<DocVersion> {
    purge_buckets(versions, quota, options, "minor", |v| {
        (v.major, Bucket::Minor(v.major, v.minor))
    })
}

/// Keeps the first `quota` distinct patches of every minor.
#[must_use]
pub fn patch_versions_to_purge(
    versions: &[DocVersion],
    quota: Quota,
    options: RangeOptions,
) -> Vec<DocVersion> {
    purge_buckets(versions, quota, options, "patch", |v| {
        ((v.major, v.minor), Bucket::Patch(v.major, v.minor, v.patch))
    })
}

fn purge_buckets<G>(
    versions: &[DocVersion],
    quota: Quota,
    options: RangeOptions,
    label: &str,
    key: impl Fn(&Version) -> (G, Bucket),
) -> Vec<DocVersion>
where
    G: Eq + Hash,
{
    let Some(keep) = quota.limit() else {
        return Vec::new();
    };
    if !is_sorted_descending(versions) {
        log::warn!(
            "{label} filter received versions out of descending order; the first {keep} buckets seen are kept"
        );
    }

    let dropped: Vec<Range> = dropped_buckets(versions, keep, key)
        .into_iter()
        .map(|bucket| bucket.range(options))
        .collect();
    if dropped.is_empty() {
        return Vec::new();
    }

    versions
        .iter()
        .filter(|version| {
            version
                .semver()
                .is_some_and(|semver| dropped.iter().any(|range| range.matches(semver)))
        })
        .cloned()
        .collect()
}

/// Per group, the distinct buckets in first-seen order past the first `keep`.
fn dropped_buckets<G>(
    versions: &[DocVersion],
    keep: usize,
    key: impl Fn(&Version) -> (G, Bucket),
) -> Vec<Bucket>
where
    G: Eq + Hash,
{
    let mut groups: HashMap<G, Vec<Bucket>> = HashMap::new();
    for semver in versions.iter().filter_map(DocVersion::semver) {
        let (group, bucket) = key(semver);
        let buckets = groups.entry(group).or_default();
        if !buckets.contains(&bucket) {
            buckets.push(bucket);
        }
    }

    groups
        .into_values()
        .flat_map(|buckets| buckets.into_iter().skip(keep))
        .collect()
}
