//! Application configuration
//!
//! Read from `{config_dir}/wordhoard/config.toml`. Every field is optional:
//!
//! ```toml
//! data_dir = "/home/me/wordhoard"
//!
//! [speech]
//! enabled = true
//! program = "espeak"
//! args = ["-v", "en-us"]
//! rate = 1.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `data_dir`
pub const DATA_DIR_ENV: &str = "WORDHOARD_DATA_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Text-to-speech settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// External program that speaks its last argument
    pub program: String,
    pub args: Vec<String>,
    /// Playback speed multiplier, 1.0 is normal
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: "espeak".to_string(),
            args: Vec::new(),
            rate: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub speech: SpeechConfig,
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wordhoard").join("config.toml"))
    }

    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve where books and progress live
    ///
    /// Precedence: explicit override, then `WORDHOARD_DATA_DIR`, then the
    /// config file, then the platform data directory.
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        let env_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_data_dir_with(override_dir, env_dir)
    }

    fn resolve_data_dir_with(
        &self,
        override_dir: Option<&Path>,
        env_dir: Option<PathBuf>,
    ) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = env_dir {
            return Ok(dir);
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        default_data_dir()
    }
}

/// Platform data directory, e.g. `~/.local/share/wordhoard`
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join("wordhoard"))
        .ok_or(ConfigError::DataDirNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.program, "espeak");
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "data_dir = \"/tmp/words\"\n\n[speech]\nrate = 1.5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/words")));
        assert_eq!(config.speech.rate, 1.5);
        assert_eq!(config.speech.program, "espeak");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "data_dir = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };

        let dir = config
            .resolve_data_dir_with(Some(Path::new("/from/cli")), Some(PathBuf::from("/from/env")))
            .unwrap();
        assert_eq!(dir, PathBuf::from("/from/cli"));

        let dir = config
            .resolve_data_dir_with(None, Some(PathBuf::from("/from/env")))
            .unwrap();
        assert_eq!(dir, PathBuf::from("/from/env"));

        let dir = config.resolve_data_dir_with(None, None).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config"));
    }
}
