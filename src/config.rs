//! `huffman.toml` discovery and configuration

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "huffman.toml";
pub const DEFAULT_TABLE_PATH: &str = "LettersProbability.txt";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ConfigParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    table: Option<TableSection>,
    log: Option<LogSection>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TableSection {
    path: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LogSection {
    level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the config was read from, if anywhere
    pub source: Option<PathBuf>,
    /// Probability file used as the prompt hint and subcommand default
    pub table_path: PathBuf,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Search the current directory and its parents for `huffman.toml`
    ///
    /// Falls back to defaults when no file exists.
    pub fn discover() -> Result<Self, ConfigError> {
        let current_dir =
            std::env::current_dir().map_err(|source| ConfigError::ConfigReadError {
                path: PathBuf::from("."),
                source,
            })?;

        match Self::find_config_file(&current_dir) {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load a specific config file; a relative table path resolves against its directory
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_str_in(&content, base, path)
    }

    fn from_str_in(content: &str, base: &Path, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|source| ConfigError::ConfigParseError {
                path: path.to_path_buf(),
                source,
            })?;

        let defaults = Self::default();

        let table_path = file
            .table
            .and_then(|t| t.path)
            .map(|p| base.join(p))
            .unwrap_or(defaults.table_path);

        let log_level = file
            .log
            .and_then(|l| l.level)
            .unwrap_or(defaults.log_level);

        Ok(Self {
            source: Some(path.to_path_buf()),
            table_path,
            log_level,
        })
    }

    fn find_config_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_full_config() {
        let config = Config::from_str_in(
            "[table]\npath = \"data/letters.txt\"\n\n[log]\nlevel = \"debug\"\n",
            Path::new("/project"),
            Path::new("/project/huffman.toml"),
        )
        .unwrap();

        assert_eq!(config.table_path, PathBuf::from("/project/data/letters.txt"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.source, Some(PathBuf::from("/project/huffman.toml")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config =
            Config::from_str_in("", Path::new(""), Path::new("huffman.toml")).unwrap();
        assert_eq!(config.table_path, PathBuf::from(DEFAULT_TABLE_PATH));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_str_in(
            "[table]\nfile = \"x.txt\"\n",
            Path::new(""),
            Path::new("huffman.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[log]\nlevel = \"info\"\n").unwrap();

        let found = Config::find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));

        let config = Config::from_path(&found).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::from_path(Path::new("/no/such/huffman.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigReadError { .. }));
    }
}
