//! node-semver compatible range matching.
//!
//! Ranges are `||`-separated alternatives of whitespace-separated
//! comparators. Every partial form (`1.x`, `~1.2`, `^0.3`, `1 - 2.3`) is
//! desugared into plain `<`/`<=`/`>`/`>=`/`=` comparators on full versions,
//! after which matching is a conjunction per alternative plus the prerelease
//! rule. Parsing is always loose.

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{RangeComponent, RangeParseError};
use crate::version::DocVersion;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeOptions {
    /// Let prerelease versions match ranges that do not name them.
    pub include_prerelease: bool,
}

impl RangeOptions {
    #[must_use]
    pub fn with_prerelease(include_prerelease: bool) -> Self {
        Self { include_prerelease }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        let ordering = version.cmp(&self.version);
        match self.op {
            Op::Eq => ordering.is_eq(),
            Op::Lt => ordering.is_lt(),
            Op::Lte => ordering.is_le(),
            Op::Gt => ordering.is_gt(),
            Op::Gte => ordering.is_ge(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    /// Alternatives; an empty alternative matches any version.
    alternatives: Vec<Vec<Comparator>>,
    options: RangeOptions,
}

impl Range {
    /// Parse a node-semver range.
    ///
    /// # Errors
    /// Returns an error when a comparator has no version, a non-numeric or
    /// extra component, an invalid prerelease, or an operator without a
    /// version.
    pub fn parse(input: &str, options: RangeOptions) -> Result<Self, RangeParseError> {
        let alternatives = input
            .split("||")
            .map(|alternative| parse_alternative(alternative, input, options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            alternatives,
            options,
        })
    }

    /// `{major}.x.x`
    #[must_use]
    pub fn major(major: u64, options: RangeOptions) -> Self {
        let partial = Partial {
            major: Some(major),
            ..Partial::default()
        };
        Self::single(x_range(&partial, options), options)
    }

    /// `{major}.{minor}.x`
    #[must_use]
    pub fn minor(major: u64, minor: u64, options: RangeOptions) -> Self {
        let partial = Partial {
            major: Some(major),
            minor: Some(minor),
            ..Partial::default()
        };
        Self::single(x_range(&partial, options), options)
    }

    /// `{major}.{minor}.{patch}`
    #[must_use]
    pub fn exact(major: u64, minor: u64, patch: u64, options: RangeOptions) -> Self {
        Self::single(
            vec![Comparator::new(Op::Eq, Version::new(major, minor, patch))],
            options,
        )
    }

    fn single(comparators: Vec<Comparator>, options: RangeOptions) -> Self {
        Self {
            alternatives: vec![comparators],
            options,
        }
    }

    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|alternative| alternative_matches(alternative, version, self.options))
    }
}

fn alternative_matches(comparators: &[Comparator], version: &Version, options: RangeOptions) -> bool {
    if !comparators.iter().all(|c| c.matches(version)) {
        return false;
    }
    if version.pre.is_empty() || options.include_prerelease {
        return true;
    }

    // A prerelease only matches when the range itself names a prerelease of
    // the same release.
    comparators.iter().any(|c| {
        !c.version.pre.is_empty()
            && c.version.major == version.major
            && c.version.minor == version.minor
            && c.version.patch == version.patch
    })
}

/// Whether `version` satisfies `range`. Unparseable input on either side
/// never matches.
#[must_use]
pub fn satisfies(version: &DocVersion, range: &str, options: RangeOptions) -> bool {
    let Some(semver) = version.semver() else {
        return false;
    };
    match Range::parse(range, options) {
        Ok(range) => range.matches(semver),
        Err(error) => {
            log::debug!("Ignoring range {range:?}: {error}");
            false
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn full(&self) -> Option<Version> {
        Some(Version {
            major: self.major?,
            minor: self.minor?,
            patch: self.patch?,
            pre: self.pre.clone(),
            build: BuildMetadata::EMPTY,
        })
    }
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

fn parse_partial(text: &str, input: &str) -> Result<Partial, RangeParseError> {
    let text = text.trim_start_matches(|c: char| c == 'v' || c == '=' || c.is_whitespace());
    let text = text.split_once('+').map_or(text, |(core, _build)| core);
    let (core, pre) = text.split_once('-').unwrap_or((text, ""));

    if core.is_empty() {
        return Err(RangeParseError::MissingVersion {
            input: input.to_string(),
        });
    }

    let components = [
        RangeComponent::Major,
        RangeComponent::Minor,
        RangeComponent::Patch,
    ];
    let mut partial = Partial::default();
    let mut wildcard = false;
    let mut parts = core.split('.');
    for component in components {
        let Some(part) = parts.next() else {
            break;
        };
        if is_wildcard(part) {
            wildcard = true;
            continue;
        }
        let value = part
            .parse::<u64>()
            .map_err(|_| RangeParseError::InvalidComponent {
                input: input.to_string(),
                component,
                value: part.to_string(),
            })?;
        // Numbers after a wildcard are allowed but carry no meaning.
        if wildcard {
            continue;
        }
        match component {
            RangeComponent::Major => partial.major = Some(value),
            RangeComponent::Minor => partial.minor = Some(value),
            RangeComponent::Patch => partial.patch = Some(value),
        }
    }
    if let Some(extra) = parts.next() {
        return Err(RangeParseError::ExtraComponent {
            input: input.to_string(),
            value: extra.to_string(),
        });
    }

    if !pre.is_empty() && partial.patch.is_some() {
        partial.pre = Prerelease::new(pre).map_err(|e| RangeParseError::InvalidPrerelease {
            input: input.to_string(),
            details: e.to_string(),
        })?;
    }
    Ok(partial)
}

fn zero_pre() -> Prerelease {
    Prerelease::new("0").unwrap_or(Prerelease::EMPTY)
}

/// `M.m.p-0`, the lowest version of a release line.
fn floor(major: u64, minor: u64, patch: u64) -> Version {
    let mut version = Version::new(major, minor, patch);
    version.pre = zero_pre();
    version
}

/// Lower bound filled in from a partial; `-0` lets prereleases in when they
/// are included.
fn lower(major: u64, minor: u64, patch: u64, options: RangeOptions) -> Comparator {
    let version = if options.include_prerelease {
        floor(major, minor, patch)
    } else {
        Version::new(major, minor, patch)
    };
    Comparator::new(Op::Gte, version)
}

fn below(major: u64, minor: u64, patch: u64) -> Comparator {
    Comparator::new(Op::Lt, floor(major, minor, patch))
}

fn nothing() -> Vec<Comparator> {
    vec![below(0, 0, 0)]
}

fn x_range(partial: &Partial, options: RangeOptions) -> Vec<Comparator> {
    match (partial.major, partial.minor, partial.full()) {
        (_, _, Some(full)) => vec![Comparator::new(Op::Eq, full)],
        (Some(major), Some(minor), None) => vec![
            lower(major, minor, 0, options),
            below(major, minor + 1, 0),
        ],
        (Some(major), None, None) => vec![lower(major, 0, 0, options), below(major + 1, 0, 0)],
        _ => Vec::new(),
    }
}

fn primitive(op: Op, partial: &Partial, options: RangeOptions) -> Vec<Comparator> {
    if let Some(full) = partial.full() {
        return vec![Comparator::new(op, full)];
    }
    match (op, partial.major, partial.minor) {
        (Op::Eq, ..) => x_range(partial, options),
        (Op::Gt | Op::Lt, None, _) => nothing(),
        (Op::Gte | Op::Lte, None, _) => Vec::new(),
        (Op::Gt, Some(major), None) => vec![lower(major + 1, 0, 0, options)],
        (Op::Gt, Some(major), Some(minor)) => vec![lower(major, minor + 1, 0, options)],
        (Op::Gte, Some(major), minor) => vec![lower(major, minor.unwrap_or(0), 0, options)],
        (Op::Lt, Some(major), minor) => vec![below(major, minor.unwrap_or(0), 0)],
        (Op::Lte, Some(major), None) => vec![below(major + 1, 0, 0)],
        (Op::Lte, Some(major), Some(minor)) => vec![below(major, minor + 1, 0)],
    }
}

fn tilde(partial: &Partial, options: RangeOptions) -> Vec<Comparator> {
    match (partial.major, partial.minor, partial.full()) {
        (Some(major), Some(minor), Some(full)) => vec![
            Comparator::new(Op::Gte, full),
            below(major, minor + 1, 0),
        ],
        _ => x_range(partial, options),
    }
}

fn caret(partial: &Partial, options: RangeOptions) -> Vec<Comparator> {
    match (partial.major, partial.minor, partial.full()) {
        (Some(major), Some(minor), Some(full)) => {
            let upper = if major > 0 {
                below(major + 1, 0, 0)
            } else if minor > 0 {
                below(0, minor + 1, 0)
            } else {
                below(0, 0, full.patch + 1)
            };
            vec![Comparator::new(Op::Gte, full), upper]
        }
        (Some(0), Some(minor), None) => vec![lower(0, minor, 0, options), below(0, minor + 1, 0)],
        (Some(major), Some(minor), None) => {
            vec![lower(major, minor, 0, options), below(major + 1, 0, 0)]
        }
        _ => x_range(partial, options),
    }
}

fn hyphen(from: &Partial, to: &Partial, options: RangeOptions) -> Vec<Comparator> {
    let mut comparators = Vec::with_capacity(2);
    if let Some(full) = from.full() {
        comparators.push(Comparator::new(Op::Gte, full));
    } else if let Some(major) = from.major {
        comparators.push(lower(major, from.minor.unwrap_or(0), 0, options));
    }

    if let Some(full) = to.full() {
        comparators.push(Comparator::new(Op::Lte, full));
    } else {
        match (to.major, to.minor) {
            (Some(major), Some(minor)) => comparators.push(below(major, minor + 1, 0)),
            (Some(major), None) => comparators.push(below(major + 1, 0, 0)),
            _ => {}
        }
    }
    comparators
}

const OPERATORS: [&str; 8] = [">=", "<=", "~>", ">", "<", "=", "~", "^"];

fn is_operator(token: &str) -> bool {
    OPERATORS.contains(&token)
}

fn parse_alternative(
    alternative: &str,
    input: &str,
    options: RangeOptions,
) -> Result<Vec<Comparator>, RangeParseError> {
    let tokens: Vec<&str> = alternative.split_whitespace().collect();

    if let [from, "-", to] = tokens.as_slice() {
        return Ok(hyphen(
            &parse_partial(from, input)?,
            &parse_partial(to, input)?,
            options,
        ));
    }

    // Glue operators written apart from their version (`>= 1.2`).
    let mut glued: Vec<String> = Vec::with_capacity(tokens.len());
    let mut pending: Option<&str> = None;
    for token in tokens {
        if is_operator(token) {
            if pending.is_some() {
                return Err(RangeParseError::DanglingOperator {
                    input: input.to_string(),
                });
            }
            pending = Some(token);
        } else {
            glued.push(format!("{}{token}", pending.take().unwrap_or_default()));
        }
    }
    if pending.is_some() {
        return Err(RangeParseError::DanglingOperator {
            input: input.to_string(),
        });
    }

    let mut comparators = Vec::new();
    for token in &glued {
        comparators.extend(parse_comparator(token, input, options)?);
    }
    Ok(comparators)
}

fn parse_comparator(
    token: &str,
    input: &str,
    options: RangeOptions,
) -> Result<Vec<Comparator>, RangeParseError> {
    let (operator, rest) = OPERATORS
        .iter()
        .find_map(|op| token.strip_prefix(op).map(|rest| (*op, rest)))
        .unwrap_or(("", token));
    let partial = parse_partial(rest, input)?;

    Ok(match operator {
        "~" | "~>" => tilde(&partial, options),
        "^" => caret(&partial, options),
        ">=" => primitive(Op::Gte, &partial, options),
        "<=" => primitive(Op::Lte, &partial, options),
        ">" => primitive(Op::Gt, &partial, options),
        "<" => primitive(Op::Lt, &partial, options),
        _ => primitive(Op::Eq, &partial, options),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOOSE: RangeOptions = RangeOptions {
        include_prerelease: false,
    };
    const PRE: RangeOptions = RangeOptions {
        include_prerelease: true,
    };

    fn sat(version: &str, range: &str, options: RangeOptions) -> bool {
        satisfies(&DocVersion::new(version), range, options)
    }

    #[test]
    fn exact_versions_match_with_or_without_prefix() {
        assert!(sat("v1.0.0", "v1.0.0", LOOSE));
        assert!(sat("v1.0.0", "1.0.0", LOOSE));
        assert!(sat("v2.0.0", "=2.0.0", LOOSE));
        assert!(!sat("v2.0.1", "2.0.0", LOOSE));
    }

    #[test]
    fn bare_version_does_not_behave_like_caret() {
        assert!(!sat("v2.1.0", "2.0.1", LOOSE));
    }

    #[test]
    fn x_ranges_cover_their_release_line() {
        assert!(sat("v1.0.0", "v1.0.x", PRE));
        assert!(sat("v1.0.0", "1.x.x", PRE));
        assert!(sat("v1.9.3", "v1.x", PRE));
        assert!(sat("v2.0.0", "2.x", PRE));
        assert!(!sat("v2.0.0", "1.x", PRE));
        assert!(!sat("v1.1.0", "1.0.x", PRE));
    }

    #[test]
    fn comparison_operators() {
        assert!(sat("v2.0.0", ">=1.5", LOOSE));
        assert!(!sat("v1.0.0", ">=1.5", LOOSE));
        assert!(sat("v1.0.0", "<1.5", LOOSE));
        assert!(sat("v1.5.9", "<=1.5", LOOSE));
        assert!(!sat("v1.6.0", "<=1.5", LOOSE));
        assert!(sat("v2.0.0", ">1", LOOSE));
        assert!(!sat("v1.9.9", ">1", LOOSE));
        assert!(sat("v1.2.4", "> 1.2.3", LOOSE));
    }

    #[test]
    fn conjunctions_and_alternatives() {
        assert!(sat("v1.5.0", ">=1.0.0 <2.0.0", LOOSE));
        assert!(!sat("v2.0.0", ">=1.0.0 <2.0.0", LOOSE));
        assert!(sat("v3.0.0", "1.x || >=3", LOOSE));
        assert!(!sat("v2.0.0", "1.x || >=3", LOOSE));
    }

    #[test]
    fn tilde_and_caret() {
        assert!(sat("v1.2.9", "~1.2.3", LOOSE));
        assert!(!sat("v1.3.0", "~1.2.3", LOOSE));
        assert!(sat("v1.9.0", "^1.2.3", LOOSE));
        assert!(!sat("v2.0.0", "^1.2.3", LOOSE));
        assert!(sat("v0.2.9", "^0.2.3", LOOSE));
        assert!(!sat("v0.3.0", "^0.2.3", LOOSE));
        assert!(!sat("v0.0.4", "^0.0.3", LOOSE));
    }

    #[test]
    fn hyphen_ranges() {
        assert!(sat("v1.2.0", "1.2 - 2.3.4", LOOSE));
        assert!(sat("v2.3.4", "1.2 - 2.3.4", LOOSE));
        assert!(!sat("v2.3.5", "1.2 - 2.3.4", LOOSE));
        assert!(sat("v2.3.9", "1.2.3 - 2.3", LOOSE));
        assert!(!sat("v2.4.0", "1.2.3 - 2.3", LOOSE));
    }

    #[test]
    fn wildcard_matches_releases_only_unless_prerelease_included() {
        assert!(sat("v0.0.1", "*", LOOSE));
        assert!(!sat("v1.0.0-alpha.1", "*", LOOSE));
        assert!(sat("v1.0.0-alpha.1", "*", PRE));
    }

    #[test]
    fn prerelease_requires_matching_tuple_in_range() {
        assert!(!sat("v2.0.0-alpha.1", ">=1.0.0", LOOSE));
        assert!(sat("v2.0.0-alpha.1", ">=1.0.0", PRE));
        assert!(sat("v2.0.0-alpha.2", ">=2.0.0-alpha.1", LOOSE));
        assert!(!sat("v2.0.1-alpha.2", ">=2.0.0-alpha.1", LOOSE));
    }

    #[test]
    fn include_prerelease_widens_partial_lower_bounds() {
        assert!(!sat("v2.0.0-alpha.1", "2.x", LOOSE));
        assert!(sat("v2.0.0-alpha.1", "2.x", PRE));
        assert!(!sat("v2.0.0-alpha.1", "1.x", PRE));
    }

    #[test]
    fn exact_bucket_never_matches_prerelease_of_same_patch() {
        let range = Range::exact(2, 0, 0, PRE);
        assert!(range.matches(&Version::new(2, 0, 0)));
        assert!(!range.matches(&"2.0.0-alpha.1".parse().unwrap()));
    }

    #[test]
    fn bucket_ranges_respect_prerelease_option() {
        let alpha: Version = "1.3.0-beta.1".parse().unwrap();
        assert!(!Range::major(1, LOOSE).matches(&alpha));
        assert!(Range::major(1, PRE).matches(&alpha));
        assert!(Range::minor(1, 3, PRE).matches(&alpha));
        assert!(!Range::minor(1, 2, PRE).matches(&alpha));
    }

    #[test]
    fn greater_than_wildcard_matches_nothing() {
        assert!(!sat("v1.0.0", ">*", LOOSE));
        assert!(sat("v1.0.0", ">=*", LOOSE));
    }

    #[test]
    fn malformed_input_fails_closed() {
        assert!(!sat("not-a-version", "*", PRE));
        assert!(!sat("v1.0.0", "1.y", PRE));
        assert!(!sat("v1.0.0", ">=", PRE));
        assert!(Range::parse("banana", LOOSE).is_err());
        for range in ["v", "vvv", "=v", "-", "1.2.3.4", "1.2.3.foo", "x.y.z", "1.0.0 - v"] {
            assert!(!sat("v1.2.3", range, PRE), "{range} should match nothing");
            assert!(Range::parse(range, LOOSE).is_err(), "{range} should not parse");
        }
    }

    #[test]
    fn numbers_after_a_wildcard_are_ignored() {
        assert!(sat("v1.4.0", "1.x.3", LOOSE));
        assert!(!sat("v2.0.0", "1.x.3", LOOSE));
    }

    #[test]
    fn empty_range_matches_any_release() {
        assert!(sat("v1.2.3", "", LOOSE));
    }
}
