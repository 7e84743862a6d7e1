use std::path::Path;

use docver_core::{AliasConfig, Channel, DocVersion, resolve_alias};
use serde::{Deserialize, Serialize};

use crate::atomic::write_atomic;
use crate::error::TreeError;
use crate::paths::DocsPaths;

/// The sidecar file describing which builds exist and where the aliases
/// point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub versions: Vec<DocVersion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable: Option<DocVersion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<DocVersion>,
}

impl Metadata {
    /// Metadata for `versions` (newest first) with both aliases resolved.
    ///
    /// `dev` is left out when it lands on the same build as `stable`.
    #[must_use]
    pub fn refresh(versions: Vec<DocVersion>, aliases: &AliasConfig) -> Self {
        let stable = resolve_alias(&versions, &aliases.stable, Channel::Stable).cloned();
        let dev = resolve_alias(&versions, &aliases.dev, Channel::Dev)
            .filter(|dev| stable.as_ref() != Some(*dev))
            .cloned();
        Self {
            versions,
            stable,
            dev,
        }
    }

    fn load_from_path(path: &Path) -> Option<Self> {
        let data = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&data) {
            Ok(metadata) => Some(metadata),
            Err(error) => {
                log::warn!("Ignoring unreadable metadata {}: {error}", path.display());
                None
            }
        }
    }

    /// Missing or unreadable metadata loads as empty.
    #[must_use]
    pub fn load(paths: &DocsPaths) -> Self {
        Self::load_from_path(&paths.metadata_file()).unwrap_or_default()
    }

    /// Pretty JSON with a trailing newline, as written to disk.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, TreeError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, paths: &DocsPaths) -> Result<(), TreeError> {
        write_atomic(&paths.metadata_file(), self.to_json()?.as_bytes())?;
        Ok(())
    }

    /// The alias link targets: each alias falls back to the other one.
    #[must_use]
    pub fn link_target(&self, channel: Channel) -> Option<&DocVersion> {
        match channel {
            Channel::Stable => self.stable.as_ref().or(self.dev.as_ref()),
            Channel::Dev => self.dev.as_ref().or(self.stable.as_ref()),
        }
    }
}
