//! Settings loaded from an optional TOML file and overridden by CLI flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::GameMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Runtime settings for the terminal game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Computer think delay in milliseconds.
    think_ms: u64,

    /// Mode to start in. When unset the mode selector is shown.
    default_mode: Option<GameMode>,

    /// File the tracing subscriber writes to.
    log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            think_ms: 500,
            default_mode: None,
            log_file: PathBuf::from("noughts.log"),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(think_ms = settings.think_ms, mode = ?settings.default_mode, "Settings loaded");
        Ok(settings)
    }

    /// Loads from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies CLI overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        mode: Option<GameMode>,
        think_ms: Option<u64>,
        log_file: Option<PathBuf>,
    ) -> Self {
        if mode.is_some() {
            self.default_mode = mode;
        }
        if let Some(think_ms) = think_ms {
            self.think_ms = think_ms;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        self
    }

    /// The think delay as a [`Duration`].
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(*settings.think_ms(), 500);
        assert_eq!(settings.think_delay(), Duration::from_millis(500));
        assert_eq!(*settings.default_mode(), None);
        assert_eq!(settings.log_file(), &PathBuf::from("noughts.log"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_mode = \"vs_computer\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(*settings.default_mode(), Some(GameMode::VsComputer));
        assert_eq!(*settings.think_ms(), 500);
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "think_ms = 50\ndefault_mode = \"two_player\"\nlog_file = \"/tmp/game.log\""
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(*settings.think_ms(), 50);
        assert_eq!(*settings.default_mode(), Some(GameMode::TwoPlayer));
        assert_eq!(settings.log_file(), &PathBuf::from("/tmp/game.log"));
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "think_ms = \"soon\"").unwrap();

        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));

        let missing = Settings::from_file("/nonexistent/noughts.toml").unwrap_err();
        assert!(missing.message.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default().with_overrides(
            Some(GameMode::VsComputer),
            Some(10),
            Some(PathBuf::from("other.log")),
        );
        assert_eq!(*settings.default_mode(), Some(GameMode::VsComputer));
        assert_eq!(*settings.think_ms(), 10);
        assert_eq!(settings.log_file(), &PathBuf::from("other.log"));

        let untouched = settings.clone().with_overrides(None, None, None);
        assert_eq!(untouched, settings);
    }
}
