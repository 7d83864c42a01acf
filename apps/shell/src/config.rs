use config::{Config, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const DEFAULT_CONFIG_FILE: &str = "scribe";
const ENV_PREFIX: &str = "SCRIBE";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> String {
    context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default()
}

trait ConfigResultExt<T> {
    fn context(self, context: &'static str) -> Result<T, ConfigError>;
}

impl<T> ConfigResultExt<T> for Result<T, config::ConfigError> {
    fn context(self, context: &'static str) -> Result<T, ConfigError> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

/// Settings of the `scribe` binary.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct ShellConfig {
    pub(crate) cipher: CipherConfig,
    pub(crate) log: LogConfig,
}

#[derive(Default, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct CipherConfig {
    /// Hex-encoded key.
    pub(crate) key: Option<String>,
}

impl fmt::Debug for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherConfig")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    pub(crate) level: String,
    /// Directory for rolling log files. Console only when unset.
    pub(crate) path: Option<PathBuf>,
    pub(crate) format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), path: None, format: "compact".to_owned() }
    }
}

/// Loads settings from an optional file overlaid with `SCRIBE__` environment variables.
///
/// Nested keys use double underscores, e.g. `SCRIBE__CIPHER__KEY` maps to `cipher.key`.
/// An explicitly given `path` must exist; the default `scribe.{toml,json,yaml}` in the
/// working directory is optional.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the explicit file is missing, a source is malformed,
/// or the values do not match [`ShellConfig`].
pub(crate) fn load_config<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) =
        path.map_or_else(|| (PathBuf::from(DEFAULT_CONFIG_FILE), false), |p| (p.to_path_buf(), true));

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    debug!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_missing_default_file_yields_defaults() {
        let config: ShellConfig = load_config(None).unwrap();

        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.format, "compact");
        assert!(config.log.path.is_none());
    }

    #[test]
    #[serial]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = load_config::<ShellConfig>(Some(&dir.path().join("absent.toml")));

        assert!(matches!(result, Err(ConfigError::Config { .. })));
    }

    #[test]
    #[serial]
    fn test_loads_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        fs::write(
            &path,
            "[cipher]\nkey = \"000102030405060708090a0b0c0d0e0f\"\n\n[log]\nlevel = \"debug\"\nformat = \"json\"\n",
        )
        .unwrap();

        let config: ShellConfig = load_config(Some(&path)).unwrap();

        assert_eq!(config.cipher.key.as_deref(), Some("000102030405060708090a0b0c0d0e0f"));
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, "json");
        assert!(config.log.path.is_none());
    }

    #[test]
    #[serial]
    fn test_rejects_mistyped_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        fs::write(&path, "[log]\nlevel = [1, 2]\n").unwrap();

        assert!(load_config::<ShellConfig>(Some(&path)).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = CipherConfig { key: Some("deadbeef".to_owned()) };
        let debug = format!("{config:?}");

        assert!(debug.contains("redacted"));
        assert!(!debug.contains("deadbeef"));
    }
}
