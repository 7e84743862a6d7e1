//! Version selection and retention for multi-version documentation trees.
//!
//! Everything here is pure: callers hand in the versions found on disk and
//! get back what should be deleted. Filesystem access happens behind
//! [`BuildLookup`].
//! - Loose semantic-version parsing and node-semver range matching.
//! - `stable`/`dev` classification against the user's aliases.
//! - Staleness of dev builds overtaken by a release.
//! - Major/minor/patch retention quotas and the purge planner.

mod alias;
mod error;
mod planner;
mod range;
mod retention;
mod stale;
mod version;

/// Alias configuration and `stable`/`dev` classification.
pub use alias::{
    AliasConfig, AliasSpec, Channel, channel, is_dev, is_pinned, is_stable, resolve_alias,
};
pub use error::{RangeComponent, RangeParseError, VersionParseError};
/// The purge planner.
pub use planner::{PurgeOptions, PurgePlan, plan};
/// Range matching shared by the filters and exclusions.
pub use range::{Range, RangeOptions, satisfies};
/// Individually callable retention filters.
pub use retention::{
    Bucket, Quota, major_versions_to_purge, minor_versions_to_purge, patch_versions_to_purge,
    should_exclude, versions_to_purge,
};
pub use stale::{BuildLookup, is_stale, stale_versions_to_purge};
pub use version::{DocVersion, is_sorted_descending, parse_loose, sort_descending};
