use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sumi_types::LanguageCode;
use thiserror::Error;

use self::ocr::OcrConfig;
use self::ui::UiConfig;

pub mod ocr;
pub mod ui;

/// Startup-fatal configuration failures: an unreadable/malformed config file
/// or translated-string bundle, or a bundle that does not cover every
/// supported language.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("translated-string bundle has no entry for language \"{0}\"")]
    MissingLanguage(LanguageCode),
}

fn default_strings_path() -> PathBuf {
    PathBuf::from("assets/languages.json")
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub ui: UiConfig,
    /// Translated-string bundle location.
    #[serde(default = "default_strings_path")]
    pub strings_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            ui: UiConfig::default(),
            strings_path: default_strings_path(),
        }
    }
}

impl Config {
    /// Defaults plus environment overrides.
    pub fn new() -> Self {
        Config::default().apply_env()
    }

    /// Load configuration, in precedence order: an explicit path, the user
    /// config file, the repo default `config.json`, built-in defaults.
    /// Environment overrides apply on top in every case.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read_file(path).map(Self::apply_env);
        }

        if let Some(path) = user_config_file()
            && path.exists()
        {
            return Self::read_file(&path).map(Self::apply_env);
        }

        let repo_default = Path::new("config.json");
        if repo_default.exists() {
            tracing::info!("loading repo default config");
            return Self::read_file(repo_default).map(Self::apply_env);
        }

        Ok(Self::new())
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(mut self) -> Self {
        if let Ok(path) = env::var("SUMI_STRINGS_PATH")
            && !path.is_empty()
        {
            self.strings_path = PathBuf::from(path);
        }
        if let Ok(dir) = env::var("SUMI_TESSDATA_DIR")
            && !dir.is_empty()
        {
            self.ocr.tessdata_dir = Some(PathBuf::from(dir));
        }
        self
    }
}

fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sumi").join("config.json"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_round_trips() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.strings_path, config.strings_path);
        assert!(back.ui.status_messages);
        assert!(back.ocr.language.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "ocr": {{ "language": "ja" }} }}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.ocr.language, Some(LanguageCode::Ja));
        assert_eq!(config.strings_path, default_strings_path());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::load(Some(file.path())).err().unwrap();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err}");
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let missing = Path::new("/nonexistent/sumi-config.json");
        let err = Config::load(Some(missing)).err().unwrap();
        assert!(matches!(err, ConfigError::Io { .. }), "got {err}");
    }
}
