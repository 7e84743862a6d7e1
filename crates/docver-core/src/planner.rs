use std::collections::HashSet;

use crate::alias::AliasConfig;
use crate::range::RangeOptions;
use crate::retention::{
    Quota, major_versions_to_purge, minor_versions_to_purge, patch_versions_to_purge,
    should_exclude, versions_to_purge,
};
use crate::stale::{BuildLookup, stale_versions_to_purge};
use crate::version::DocVersion;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurgeOptions {
    /// Ranges named explicitly for purging.
    pub targets: Vec<String>,
    /// Ranges protected from every filter.
    pub exclude: Vec<String>,
    pub major: Quota,
    pub minor: Quota,
    pub patch: Quota,
    pub stale: bool,
    pub include_prerelease: bool,
    pub aliases: AliasConfig,
}

impl PurgeOptions {
    #[must_use]
    pub fn range_options(&self) -> RangeOptions {
        RangeOptions::with_prerelease(self.include_prerelease)
    }
}

/// Versions selected for deletion, in stage order and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgePlan {
    versions: Vec<DocVersion>,
    seen: HashSet<DocVersion>,
}

impl PurgePlan {
    fn extend(&mut self, selected: Vec<DocVersion>) {
        for version in selected {
            if self.seen.insert(version.clone()) {
                self.versions.push(version);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    #[must_use]
    pub fn versions(&self) -> &[DocVersion] {
        &self.versions
    }

    #[must_use]
    pub fn into_versions(self) -> Vec<DocVersion> {
        self.versions
    }
}

/// Compose exclusion, explicit targets, the major/minor/patch quotas and
/// staleness into one plan.
///
/// Each stage only sees what earlier stages left in the pool. `versions`
/// should be newest first for the quotas to keep the newest buckets.
#[must_use]
pub fn plan(
    versions: &[DocVersion],
    options: &PurgeOptions,
    builds: &impl BuildLookup,
) -> PurgePlan {
    let range_options = options.range_options();
    let mut pool: Vec<DocVersion> = versions
        .iter()
        .filter(|version| !should_exclude(version, &options.exclude, range_options))
        .cloned()
        .collect();
    let mut plan = PurgePlan::default();

    let targeted = versions_to_purge(&pool, &options.targets, range_options);
    take(&mut pool, &mut plan, "explicit", targeted);

    let quotas: [(&str, Quota, QuotaFilter); 3] = [
        ("major", options.major, major_versions_to_purge),
        ("minor", options.minor, minor_versions_to_purge),
        ("patch", options.patch, patch_versions_to_purge),
    ];
    for (stage, quota, filter) in quotas {
        if quota.is_bounded() {
            let selected = filter(&pool, quota, range_options);
            take(&mut pool, &mut plan, stage, selected);
        }
    }

    if options.stale {
        let selected = stale_versions_to_purge(
            &pool,
            &options.aliases.stable,
            &options.aliases.dev,
            builds,
        );
        take(&mut pool, &mut plan, "stale", selected);
    }

    plan
}

type QuotaFilter = fn(&[DocVersion], Quota, RangeOptions) -> Vec<DocVersion>;

fn take(pool: &mut Vec<DocVersion>, plan: &mut PurgePlan, stage: &str, selected: Vec<DocVersion>) {
    if selected.is_empty() {
        return;
    }
    log::debug!(
        "{stage} stage selected {}",
        selected
            .iter()
            .map(DocVersion::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    let selected_set: HashSet<&DocVersion> = selected.iter().collect();
    pool.retain(|version| !selected_set.contains(version));
    plan.extend(selected);
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDLER_VERSIONS: [&str; 10] = [
        "v2.1.0",
        "v2.0.1",
        "v2.0.0",
        "v2.0.0-alpha.1",
        "v1.2.2",
        "v1.2.1",
        "v1.2.0",
        "v1.1.0",
        "v1.0.0",
        "v0.1.0",
    ];

    fn versions(names: &[&str]) -> Vec<DocVersion> {
        names.iter().copied().map(DocVersion::from).collect()
    }

    fn all_present(_: &DocVersion) -> bool {
        true
    }

    fn names(plan: &PurgePlan) -> Vec<&str> {
        plan.versions().iter().map(DocVersion::as_str).collect()
    }

    fn stale_only() -> PurgeOptions {
        PurgeOptions {
            stale: true,
            ..PurgeOptions::default()
        }
    }

    #[test]
    fn empty_input_plans_nothing() {
        let planned = plan(&[], &stale_only(), &all_present);
        assert!(planned.is_empty());
    }

    #[test]
    fn stale_only_selects_superseded_dev_builds() {
        let planned = plan(&versions(&HANDLER_VERSIONS), &stale_only(), &all_present);
        assert_eq!(names(&planned), vec!["v2.0.0-alpha.1", "v0.1.0"]);
    }

    #[test]
    fn no_stale_and_no_filters_plans_nothing() {
        let planned = plan(
            &versions(&HANDLER_VERSIONS),
            &PurgeOptions::default(),
            &all_present,
        );
        assert!(planned.is_empty());
    }

    #[test]
    fn minor_quota_then_stale() {
        let options = PurgeOptions {
            minor: Quota::Keep(1),
            ..stale_only()
        };
        let planned = plan(&versions(&HANDLER_VERSIONS), &options, &all_present);
        assert_eq!(
            names(&planned),
            vec![
                "v2.0.1",
                "v2.0.0",
                "v1.1.0",
                "v1.0.0",
                "v2.0.0-alpha.1",
                "v0.1.0"
            ]
        );
    }

    #[test]
    fn major_quota_then_stale() {
        let options = PurgeOptions {
            major: Quota::Keep(1),
            ..stale_only()
        };
        let planned = plan(&versions(&HANDLER_VERSIONS), &options, &all_present);
        assert_eq!(
            names(&planned),
            vec![
                "v1.2.2",
                "v1.2.1",
                "v1.2.0",
                "v1.1.0",
                "v1.0.0",
                "v0.1.0",
                "v2.0.0-alpha.1"
            ]
        );
    }

    #[test]
    fn patch_quota_then_stale() {
        let options = PurgeOptions {
            patch: Quota::Keep(1),
            ..stale_only()
        };
        let planned = plan(&versions(&HANDLER_VERSIONS), &options, &all_present);
        assert_eq!(
            names(&planned),
            vec!["v2.0.0", "v1.2.1", "v1.2.0", "v2.0.0-alpha.1", "v0.1.0"]
        );
    }

    #[test]
    fn explicit_target_with_stale() {
        let options = PurgeOptions {
            targets: vec!["2.0.1".to_string()],
            ..stale_only()
        };
        let planned = plan(&versions(&HANDLER_VERSIONS), &options, &all_present);
        assert_eq!(names(&planned), vec!["v2.0.1", "v2.0.0-alpha.1", "v0.1.0"]);
    }

    #[test]
    fn malformed_target_selects_nothing() {
        for target in ["v", "=v", "1.2.3.4", "x.y.z"] {
            let options = PurgeOptions {
                targets: vec![target.to_string()],
                ..PurgeOptions::default()
            };
            let planned = plan(&versions(&["v2.0.0", "v1.0.0", "v0.1.0"]), &options, &all_present);
            assert!(planned.is_empty(), "{target} should select nothing");
        }
    }

    #[test]
    fn exclusion_protects_from_every_stage() {
        let options = PurgeOptions {
            exclude: vec![">=2.0.0".to_string()],
            targets: vec!["2.x".to_string()],
            ..stale_only()
        };
        let planned = plan(&versions(&HANDLER_VERSIONS), &options, &all_present);
        assert_eq!(names(&planned), vec!["v0.1.0"]);
    }

    #[test]
    fn exclusion_with_prerelease_included_covers_prereleases() {
        let options = PurgeOptions {
            exclude: vec!["2.x".to_string()],
            include_prerelease: true,
            ..stale_only()
        };
        let planned = plan(&versions(&HANDLER_VERSIONS), &options, &all_present);
        assert_eq!(names(&planned), vec!["v0.1.0"]);
    }

    #[test]
    fn version_selected_twice_appears_once() {
        let options = PurgeOptions {
            targets: vec!["1.0.0".to_string(), "1.x".to_string()],
            minor: Quota::Keep(1),
            ..PurgeOptions::default()
        };
        let planned = plan(&versions(&HANDLER_VERSIONS), &options, &all_present);
        let listed = names(&planned);

        assert_eq!(listed.iter().filter(|name| **name == "v1.0.0").count(), 1);
        assert_eq!(
            listed,
            vec![
                "v1.2.2", "v1.2.1", "v1.2.0", "v1.1.0", "v1.0.0", "v2.0.1", "v2.0.0"
            ]
        );
    }

    #[test]
    fn stale_stage_skips_versions_without_builds() {
        let without_alpha = |v: &DocVersion| v.as_str() != "v2.0.0-alpha.1";
        let planned = plan(&versions(&HANDLER_VERSIONS), &stale_only(), &without_alpha);
        assert_eq!(names(&planned), vec!["v0.1.0"]);
    }

    #[test]
    fn pinned_dev_survives_staleness() {
        let options = PurgeOptions {
            aliases: AliasConfig::new("auto", "v0.1.0"),
            ..stale_only()
        };
        let planned = plan(&versions(&HANDLER_VERSIONS), &options, &all_present);
        assert_eq!(names(&planned), vec!["v2.0.0-alpha.1"]);
    }

    #[test]
    fn malformed_entries_do_not_abort_the_plan() {
        let mut set = versions(&HANDLER_VERSIONS);
        set.insert(3, DocVersion::new("not-a-version"));
        let options = PurgeOptions {
            targets: vec!["???".to_string(), "0.x".to_string()],
            exclude: vec!["[bad".to_string()],
            major: Quota::Keep(0),
            ..stale_only()
        };

        let planned = plan(&set, &options, &all_present);

        assert!(planned.versions().iter().all(|v| v.as_str() != "not-a-version"));
        assert!(planned.versions().iter().any(|v| v.as_str() == "v0.1.0"));
    }
}
