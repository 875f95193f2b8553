use crate::checker::dictionary::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_WORD_LEN};
use crate::checker::tokenizer::DEFAULT_MAX_TOKEN_LEN;
use crate::error::Error;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".spchk.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Dictionary words longer than this are truncated
    pub max_word_len: usize,

    /// Document tokens longer than this are truncated
    pub max_token_len: usize,

    /// Bytes requested per read, for dictionaries and documents alike
    pub chunk_size: usize,

    /// Extensions of the files checked when walking a directory
    pub extensions: Vec<String>,

    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_word_len: DEFAULT_MAX_WORD_LEN,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            chunk_size: DEFAULT_CHUNK_SIZE,
            extensions: vec!["txt".to_string()],
            parallel: false,
        }
    }
}

/// One config file. Keys absent from the file stay `None` and leave the
/// lower layer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub max_word_len: Option<usize>,
    pub max_token_len: Option<usize>,
    pub chunk_size: Option<usize>,
    pub extensions: Option<Vec<String>>,
    pub parallel: Option<bool>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Values given on the command line; `None` leaves the file setting alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub max_word_len: Option<usize>,
    pub max_token_len: Option<usize>,
    pub chunk_size: Option<usize>,
    pub extensions: Vec<String>,
    pub parallel: bool,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = PartialConfig::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            let local_config = PartialConfig::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        config = config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Layer a config file over the current values.
    pub fn merge(mut self, other: PartialConfig) -> Self {
        if let Some(n) = other.max_word_len {
            self.max_word_len = n;
        }
        if let Some(n) = other.max_token_len {
            self.max_token_len = n;
        }
        if let Some(n) = other.chunk_size {
            self.chunk_size = n;
        }
        if let Some(extensions) = other.extensions {
            self.extensions = extensions;
        }
        if let Some(parallel) = other.parallel {
            self.parallel = parallel;
        }
        self
    }

    fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(n) = overrides.max_word_len {
            self.max_word_len = n;
        }
        if let Some(n) = overrides.max_token_len {
            self.max_token_len = n;
        }
        if let Some(n) = overrides.chunk_size {
            self.chunk_size = n;
        }
        if !overrides.extensions.is_empty() {
            self.extensions = overrides.extensions;
        }
        self.parallel |= overrides.parallel;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), Error> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".to_string()));
        }
        if self.max_token_len == 0 {
            return Err(Error::Config("max_token_len must be at least 1".to_string()));
        }
        if self.max_word_len == 0 {
            return Err(Error::Config("max_word_len must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spchk").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_word_len, 100);
        assert_eq!(config.max_token_len, 1023);
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.extensions, vec!["txt"]);
        assert!(!config.parallel);
    }

    fn layer(text: &str) -> PartialConfig {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_merge_configs() {
        let merged = Config::default().merge(layer("chunk_size = 16\nextensions = [\"md\"]"));
        assert_eq!(merged.chunk_size, 16);
        assert_eq!(merged.extensions, vec!["md"]);
        assert_eq!(merged.max_token_len, 1023);
    }

    #[test]
    fn test_local_layer_only_overrides_keys_it_sets() {
        let global = layer("parallel = true\nchunk_size = 16");
        let local = layer("extensions = [\"md\"]\nchunk_size = 4096");

        let merged = Config::default().merge(global).merge(local);
        assert!(merged.parallel);
        assert_eq!(merged.chunk_size, 4096);
        assert_eq!(merged.extensions, vec!["md"]);
    }

    #[test]
    fn test_local_layer_can_turn_parallel_off() {
        let merged = Config::default()
            .merge(layer("parallel = true"))
            .merge(layer("parallel = false"));
        assert!(!merged.parallel);
    }

    #[test]
    fn test_empty_layer_changes_nothing() {
        let base = Config::default().merge(layer("max_word_len = 7"));
        assert_eq!(base.clone().merge(PartialConfig::default()), base);
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = Config {
            chunk_size: 16,
            ..Default::default()
        }
        .apply(Overrides {
            chunk_size: Some(4),
            parallel: true,
            ..Default::default()
        });
        assert_eq!(config.chunk_size, 4);
        assert!(config.parallel);
        assert_eq!(config.extensions, vec!["txt"]);
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_token_len = 64\nextensions = [\"txt\", \"text\"]").unwrap();

        let partial = PartialConfig::from_file(file.path()).unwrap();
        assert_eq!(partial.max_token_len, Some(64));
        assert_eq!(partial.chunk_size, None);

        let config = Config::default().merge(partial);
        assert_eq!(config.max_token_len, 64);
        assert_eq!(config.extensions, vec!["txt", "text"]);
        assert_eq!(config.chunk_size, 4096);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chunk_size = \"big\"").unwrap();
        assert!(PartialConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = Config {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(Config::default().validate().is_ok());
    }
}
