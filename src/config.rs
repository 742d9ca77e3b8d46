//! Configuration types for book-extractor
//!
//! Settings are read once from a JSON file (by default `appsettings.json`) and
//! passed explicitly to the components that need them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default settings file name
pub const DEFAULT_CONFIG_FILE: &str = "appsettings.json";

/// API endpoint settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiConfig {
    /// URL of the books endpoint (required, possibly supplied by an override)
    #[serde(default)]
    pub api_url: String,

    /// Request timeout (None = no timeout)
    #[serde(
        default,
        rename = "TimeoutSecs",
        with = "optional_duration_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,
}

/// Report output settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportConfig {
    /// Report file path (default: "result.txt")
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

/// Filter settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterConfig {
    /// State codes a book must carry at least one of (default: NJ, CO)
    #[serde(default = "default_states")]
    pub states: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            states: default_states(),
        }
    }
}

/// Where the settings file path came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// The default path; may be absent when an API URL override is given
    Default(PathBuf),
    /// A path named by the user; must exist
    Explicit(PathBuf),
}

impl ConfigSource {
    /// Classify an optional `--config` argument
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => ConfigSource::Explicit(path),
            None => ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_FILE)),
        }
    }
}

/// Values that take precedence over the settings file
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Replaces `ApiSettings.ApiUrl`
    pub api_url: Option<String>,
    /// Replaces `ReportSettings.OutputPath`
    pub output_path: Option<PathBuf>,
}

/// Top-level configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint settings
    #[serde(rename = "ApiSettings", default)]
    pub api: ApiConfig,

    /// Report output settings
    #[serde(rename = "ReportSettings", default)]
    pub report: ReportConfig,

    /// Filter settings
    #[serde(rename = "FilterSettings", default)]
    pub filter: FilterConfig,
}

impl Config {
    /// Build a configuration for the given API URL with default settings elsewhere
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                api_url: api_url.into(),
                timeout: None,
            },
            report: ReportConfig::default(),
            filter: FilterConfig::default(),
        }
    }

    /// Load and validate configuration from a JSON settings file
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the file is missing, not valid JSON,
    /// or fails [`Config::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::load_unvalidated(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON settings file without validating it
    ///
    /// Callers that layer overrides on top must call [`Config::validate`] afterwards.
    pub fn load_unvalidated(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading configuration");

        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read settings file {}: {}", path.display(), e),
            key: None,
        })?;

        let config = Self::parse(&content)?;
        debug!(api_url = %config.api.api_url, output = %config.report.output_path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config {
            message: format!("invalid settings file: {}", e),
            key: None,
        })
    }

    /// Build the effective configuration from a settings file and overrides
    ///
    /// The file is read unless it is the implicit default, does not exist and
    /// an API URL override is given. An explicitly named file must exist.
    /// Overrides are applied before validation, so they can supply values the
    /// file lacks.
    pub fn resolve(source: &ConfigSource, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match (&overrides.api_url, source) {
            (Some(url), ConfigSource::Default(path)) if !path.exists() => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Config::new(url.clone())
            }
            (_, ConfigSource::Default(path) | ConfigSource::Explicit(path)) => {
                Config::load_unvalidated(path)?
            }
        };

        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Replace file values with the given overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.api_url {
            self.api.api_url = url.clone();
        }
        if let Some(output) = &overrides.output_path {
            self.report.output_path = output.clone();
        }
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        let raw = self.api.api_url.trim();
        if raw.is_empty() {
            return Err(Error::config("ApiSettings.ApiUrl", "API URL must not be empty"));
        }

        let url = url::Url::parse(raw).map_err(|e| {
            Error::config("ApiSettings.ApiUrl", format!("invalid API URL '{}': {}", raw, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(
                "ApiSettings.ApiUrl",
                format!("unsupported URL scheme '{}'", url.scheme()),
            ));
        }

        if let Some(timeout) = self.api.timeout
            && timeout.is_zero()
        {
            return Err(Error::config(
                "ApiSettings.TimeoutSecs",
                "timeout must be greater than zero",
            ));
        }

        if self.filter.states.iter().all(|s| s.is_empty()) {
            return Err(Error::config(
                "FilterSettings.States",
                "at least one state code is required",
            ));
        }

        if self.report.output_path.as_os_str().is_empty() {
            return Err(Error::config(
                "ReportSettings.OutputPath",
                "output path must not be empty",
            ));
        }

        Ok(())
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("result.txt")
}

fn default_states() -> Vec<String> {
    vec!["NJ".to_string(), "CO".to_string()]
}

// Optional Duration serialization helper (whole seconds)
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
