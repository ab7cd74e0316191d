//! Settings loading: TOML file with environment variable overrides.
//!
//! Looks for `lightgen.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values, and the first command line argument over both for the
//! input path.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the light configuration is read from.
    pub input: InputSettings,
    /// Where and what to write.
    pub output: OutputSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Configuration file to compile.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// `.json` or `.toml` file.
    pub path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Destination file; empty writes to stdout.
    pub path: PathBuf,
    pub mode: Mode,
}

/// What the run prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The generated statements.
    #[default]
    Compile,
    /// The validated configuration with defaults filled in, as JSON.
    Config,
}

impl std::str::FromStr for Mode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile" => Ok(Self::Compile),
            "config" => Ok(Self::Config),
            other => Err(SettingsError::Validation(format!(
                "unknown mode '{other}', expected 'compile' or 'config'"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Settings {
    /// Load `lightgen.toml` (if present), apply environment overrides, then
    /// the input path given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if an
    /// override holds an unknown mode, or if no input path is set.
    pub fn load(input: Option<String>) -> Result<Self, SettingsError> {
        let mut settings = Self::from_file("lightgen.toml")?;
        settings.apply_env_overrides()?;
        if let Some(input) = input {
            settings.input.path = PathBuf::from(input);
        }
        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &str) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(SettingsError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(SettingsError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), SettingsError> {
        if let Ok(val) = std::env::var("LIGHTGEN_INPUT") {
            self.input.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("LIGHTGEN_OUTPUT") {
            self.output.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("LIGHTGEN_MODE") {
            self.output.mode = val.parse()?;
        }
        if let Ok(val) = std::env::var("LIGHTGEN_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.input.path.as_os_str().is_empty() {
            return Err(SettingsError::Validation(
                "input path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Output file, or `None` for stdout.
    #[must_use]
    pub fn output_path(&self) -> Option<&Path> {
        let path = self.output.path.as_path();
        (!path.as_os_str().is_empty()).then_some(path)
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lights.json"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "lightgen=info".to_string(),
        }
    }
}

/// Settings errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// TOML parse failure.
    #[error("failed to parse settings file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read settings file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid settings: {0}")]
    Validation(String),
}
