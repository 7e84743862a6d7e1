//! Generated files served next to the builds.

use std::fmt::Write as _;

use docver_core::{Channel, DocVersion};

use crate::metadata::Metadata;
use crate::paths::minor_key;

/// Distinct `v{major}.{minor}` keys in the order the versions are listed.
#[must_use]
pub fn minor_keys(metadata: &Metadata) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for semver in metadata.versions.iter().filter_map(DocVersion::semver) {
        let key = minor_key(semver.major, semver.minor);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// The `versions.js` module listing every selectable documentation key.
#[must_use]
pub fn versions_js(metadata: &Metadata) -> String {
    let aliases = [
        (Channel::Stable, metadata.stable.is_some()),
        (Channel::Dev, metadata.dev.is_some()),
    ];
    let keys = aliases
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(channel, _)| channel.as_str().to_string())
        .chain(minor_keys(metadata));

    let mut js = String::from("\"use strict\"\nexport const DOC_VERSIONS = [\n");
    for key in keys {
        let _ = writeln!(js, "\t'{key}',");
    }
    js.push_str("];\n");
    js
}

/// The landing page redirecting to the preferred alias.
#[must_use]
pub fn index_html(metadata: &Metadata) -> String {
    let target = if metadata.stable.is_some() {
        Channel::Stable
    } else {
        Channel::Dev
    };
    format!("<meta http-equiv=\"refresh\" content=\"0; url={target}/\"/>")
}
