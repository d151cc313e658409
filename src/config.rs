use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Session configuration
///
/// Sources, lowest priority first: built-in defaults, the config file
/// (`./tutorsql.toml` when present, or an explicit path), then
/// `TUTORSQL_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of statements kept in the history log.
    pub history_limit: usize,
    /// Start with the starter tables (concepts, properties, relations).
    pub seed: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            seed: true,
        }
    }
}

impl SessionConfig {
    pub const DEFAULT_FILE: &'static str = "tutorsql.toml";
    pub const ENV_PREFIX: &'static str = "TUTORSQL";

    /// Load configuration. An explicit `path` must exist; the default file
    /// is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("history_limit", defaults.history_limit as i64)?
            .set_default("seed", defaults.seed)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(Self::DEFAULT_FILE).required(false)),
        };

        builder
            .add_source(Environment::with_prefix(Self::ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.history_limit, 100);
        assert!(config.seed);
    }

    #[test]
    fn test_load_from_file() {
        let file = config_file("history_limit = 5\nseed = false\n");
        let config = SessionConfig::load(Some(file.path())).unwrap();
        assert_eq!(
            config,
            SessionConfig {
                history_limit: 5,
                seed: false,
            }
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = config_file("seed = false\n");
        let config = SessionConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.history_limit, 100);
        assert!(!config.seed);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(SessionConfig::load(Some(&missing)).is_err());
    }
}
