//! Configuration structures for formguard
//!
//! This module provides the configuration types used to point the form at a
//! registration backend and tune its timing. Every section is optional and
//! falls back to defaults.
//!
//! ## Author
//! a13x.h.cc@gmail.com

use crate::fields::{registration_form_with_optional, FieldId, FieldSpec};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub remote_check: RemoteCheckSettings,
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Registration backend settings
///
/// # Example TOML
/// ```toml
/// [api]
/// base_url = "http://localhost:3000/api"
/// submit_timeout_seconds = 30
/// check_timeout_seconds = 5
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_submit_timeout")]
    pub submit_timeout_seconds: u64,
    #[serde(default = "default_check_timeout")]
    pub check_timeout_seconds: u64,
}

/// Username uniqueness check settings
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCheckSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Form layout settings
#[derive(Debug, Clone, Deserialize)]
pub struct FormSettings {
    /// Wire names of fields that are not required
    #[serde(default = "default_optional_fields")]
    pub optional_fields: Vec<String>,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_submit_timeout() -> u64 {
    30
}

fn default_check_timeout() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_optional_fields() -> Vec<String> {
    vec![FieldId::Website.as_str().to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            submit_timeout_seconds: default_submit_timeout(),
            check_timeout_seconds: default_check_timeout(),
        }
    }
}

impl Default for RemoteCheckSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            optional_fields: default_optional_fields(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<(), String> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err("api.base_url must not be empty".to_string());
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!("api.base_url must be an http(s) URL: {}", base));
        }
        if self.api.submit_timeout_seconds == 0 {
            return Err("api.submit_timeout_seconds must be greater than 0".to_string());
        }
        if self.api.check_timeout_seconds == 0 {
            return Err("api.check_timeout_seconds must be greater than 0".to_string());
        }
        self.optional_fields()?;
        Ok(())
    }

    /// Parsed optional fields
    pub fn optional_fields(&self) -> Result<Vec<FieldId>, String> {
        self.form
            .optional_fields
            .iter()
            .map(|name| name.parse::<FieldId>())
            .collect()
    }

    /// Field layout described by this configuration
    pub fn field_specs(&self) -> Result<Vec<FieldSpec>, String> {
        Ok(registration_form_with_optional(&self.optional_fields()?))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.remote_check.debounce_ms)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.api.submit_timeout_seconds)
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.api.check_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[api]
base_url = "https://register.example.org/api"
submit_timeout_seconds = 10

[remote_check]
debounce_ms = 250

[form]
optional_fields = ["website", "phone"]
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://register.example.org/api");
        assert_eq!(config.submit_timeout(), Duration::from_secs(10));
        assert_eq!(config.check_timeout(), Duration::from_secs(5));
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert!(config.remote_check.enabled);
        assert_eq!(
            config.optional_fields().unwrap(),
            vec![FieldId::Website, FieldId::Phone]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.submit_timeout(), Duration::from_secs(30));
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.logging.level, "info");

        let specs = config.field_specs().unwrap();
        assert_eq!(specs.iter().filter(|s| !s.required).count(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.submit_timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.form.optional_fields = vec!["nickname".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.contains("nickname"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[remote_check]\nenabled = false").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(!config.remote_check.enabled);
        assert_eq!(config.remote_check.debounce_ms, 500);
    }
}
