//! Optional policy defaults loaded from a YAML file.
//!
//! Precedence is command-line flag, then config file, then built-in default.
//! The file path comes from `--config` or `DRIFT_CHECKER_CONFIG`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::context::ServiceContext;
use crate::error::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "DRIFT_CHECKER_CONFIG";

/// Settings a config file may provide.
///
/// ```yaml
/// strict: true
/// max_deletes: 0
/// max_replaces: 2
/// format: json
/// list: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Enforce the gate.
    #[serde(default)]
    pub strict: bool,
    /// Delete ceiling; negative means unbounded.
    #[serde(default)]
    pub max_deletes: Option<i64>,
    /// Replace ceiling; negative means unbounded.
    #[serde(default)]
    pub max_replaces: Option<i64>,
    /// Report format (`md`, `text`, `json`).
    #[serde(default)]
    pub format: Option<String>,
    /// Include the destructive address list in gate reports.
    #[serde(default)]
    pub list: bool,
}

impl FileConfig {
    /// Resolves the config path and loads it, or returns defaults when no
    /// path is configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid YAML for this schema.
    pub fn load(ctx: &ServiceContext, explicit: Option<&Path>) -> Result<Self, Error> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::load_from(ctx, &path),
            None => Ok(Self::default()),
        }
    }

    /// Loads and parses the config file at `path`.
    ///
    /// # Errors
    ///
    /// See [`FileConfig::load`].
    pub fn load_from(ctx: &ServiceContext, path: &Path) -> Result<Self, Error> {
        let bytes =
            ctx.fs.read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let config: Self = serde_yaml::from_slice(&bytes)
            .map_err(|e| Error::Config { path: path.to_path_buf(), reason: e.to_string() })?;
        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }
}
