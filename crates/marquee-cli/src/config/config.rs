//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use marquee_api::catalog::CredentialMode;
use marquee_api::locale::{DEFAULT_LOCALE, locale_from_tag};
use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Display language settings.
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Catalog connection settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Display language configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Two-letter locale code overriding the device language.
    #[serde(default)]
    pub code: Option<String>,
}

/// Catalog connection configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Where the API token is attached (`header` or `query`).
    #[serde(default)]
    pub credential: CredentialMode,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// API base URL override (must end with `/`).
    #[serde(default)]
    pub base_url: Option<String>,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            credential: CredentialMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: None,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Resolves the locale code: explicit override, then config, then the
    /// device tag, then `en`. Blank sources are skipped and every source is
    /// reduced to its two-letter code.
    pub fn resolve_locale(&self, cli_override: Option<&str>, device_tag: Option<&str>) -> String {
        let present = |tag: &&str| !tag.trim().is_empty();
        cli_override
            .filter(present)
            .or_else(|| self.locale.code.as_deref().filter(present))
            .or_else(|| device_tag.filter(present))
            .map_or_else(|| String::from(DEFAULT_LOCALE), locale_from_tag)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.locale.code.is_none());
        assert_eq!(config.catalog.credential, CredentialMode::Header);
        assert_eq!(config.catalog.timeout_secs, 10);
        assert!(config.catalog.base_url.is_none());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            locale: LocaleConfig {
                code: Some(String::from("ru")),
            },
            catalog: CatalogConfig {
                credential: CredentialMode::Query,
                timeout_secs: 30,
                base_url: Some(String::from("http://127.0.0.1:8080/3/")),
            },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            locale: LocaleConfig {
                code: Some(String::from("ja")),
            },
            ..AppConfig::default()
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\ncredential = \"query\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.catalog.credential, CredentialMode::Query);
        assert_eq!(config.catalog.timeout_secs, 10);
        assert!(config.locale.code.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_locale_precedence() {
        // Arrange
        let config = AppConfig {
            locale: LocaleConfig {
                code: Some(String::from("de")),
            },
            ..AppConfig::default()
        };

        // Act & Assert
        assert_eq!(config.resolve_locale(Some("FR"), Some("ru_RU.UTF-8")), "fr");
        assert_eq!(config.resolve_locale(None, Some("ru_RU.UTF-8")), "de");
        assert_eq!(
            AppConfig::default().resolve_locale(None, Some("ru_RU.UTF-8")),
            "ru"
        );
        assert_eq!(AppConfig::default().resolve_locale(None, None), "en");
    }

    #[test]
    fn test_resolve_locale_reduces_tags_and_skips_blanks() {
        // Arrange
        let config = AppConfig {
            locale: LocaleConfig {
                code: Some(String::from("de")),
            },
            ..AppConfig::default()
        };
        let regional = AppConfig {
            locale: LocaleConfig {
                code: Some(String::from("pt_BR")),
            },
            ..AppConfig::default()
        };

        // Act & Assert
        assert_eq!(config.resolve_locale(Some("ru-RU"), None), "ru");
        assert_eq!(config.resolve_locale(Some(""), Some("ja_JP.UTF-8")), "de");
        assert_eq!(config.resolve_locale(Some("  "), None), "de");
        assert_eq!(regional.resolve_locale(None, None), "pt");
        assert_eq!(
            AppConfig::default().resolve_locale(Some(""), Some("ko_KR.UTF-8")),
            "ko"
        );
    }
}
