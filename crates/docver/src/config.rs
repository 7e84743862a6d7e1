use std::path::{Path, PathBuf};

use docver_core::{AliasConfig, DocVersion};
use serde::Deserialize;

use crate::cli::CommonArgs;
use crate::error::CliError;

const CONFIG_CANDIDATES: [&str; 2] = ["typedoc.json", ".config/typedoc.json"];

/// The parts of a typedoc JSON config this tool reads. Unknown keys are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypedocConfig {
    #[serde(default = "default_out")]
    pub out: PathBuf,

    #[serde(default)]
    pub versions: AliasConfig,
}

fn default_out() -> PathBuf {
    PathBuf::from("docs")
}

impl Default for TypedocConfig {
    fn default() -> Self {
        Self {
            out: default_out(),
            versions: AliasConfig::default(),
        }
    }
}

impl TypedocConfig {
    /// Locate the config file.
    ///
    /// An explicit file is used as is; an explicit directory is searched for
    /// `typedoc.json` then `.config/typedoc.json`. Without an explicit
    /// location `cwd` is searched and finding nothing is not an error.
    ///
    /// # Errors
    /// Returns an error when an explicit location does not exist or holds no
    /// config.
    pub fn find(location: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>, CliError> {
        let Some(location) = location else {
            return Ok(search(cwd));
        };
        let location = cwd.join(location);
        if location.is_file() {
            return Ok(Some(location));
        }
        if !location.exists() {
            return Err(CliError::MissingPath { path: location });
        }
        search(&location)
            .map(Some)
            .ok_or(CliError::MissingConfig { path: location })
    }

    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|error| CliError::invalid_json(path, &error))
    }

    /// # Errors
    /// Returns an error if the config cannot be found or loaded.
    pub fn load(location: Option<&Path>, cwd: &Path) -> Result<Self, CliError> {
        match Self::find(location, cwd)? {
            Some(path) => {
                log::debug!("Using typedoc config {}", path.display());
                Self::load_from_path(&path)
            }
            None => {
                log::debug!("No typedoc config found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

fn search(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|path| path.is_file())
}

/// Settings shared by every command after applying command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Absolute path of the documentation output directory.
    pub out: PathBuf,
    pub aliases: AliasConfig,
}

impl Options {
    /// # Errors
    /// Returns an error if the working directory or the config cannot be
    /// read.
    pub fn resolve(common: &CommonArgs) -> Result<Self, CliError> {
        let cwd = std::env::current_dir()?;
        Self::resolve_in(common, &cwd)
    }

    fn resolve_in(common: &CommonArgs, cwd: &Path) -> Result<Self, CliError> {
        let config = TypedocConfig::load(common.typedoc.as_deref(), cwd)?;
        let out = common.out.clone().unwrap_or(config.out);
        Ok(Self {
            out: cwd.join(out),
            aliases: config.versions,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    version: Option<String>,
}

/// The documentation version for a `package.json`: its version, normalized
/// to `v{major}.{minor}.{patch}[-pre]`.
///
/// # Errors
/// Returns an error if the manifest is missing, unreadable, or has no valid
/// version.
pub fn package_version(path: &Path) -> Result<DocVersion, CliError> {
    if !path.is_file() {
        return Err(CliError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    let data = std::fs::read_to_string(path)?;
    let manifest: PackageManifest =
        serde_json::from_str(&data).map_err(|error| CliError::invalid_json(path, &error))?;
    let version = manifest
        .version
        .ok_or_else(|| CliError::MissingPackageVersion {
            path: path.to_path_buf(),
        })?;

    DocVersion::new(version.as_str())
        .normalized()
        .map(DocVersion::new)
        .ok_or(CliError::InvalidPackageVersion {
            path: path.to_path_buf(),
            version,
        })
}
