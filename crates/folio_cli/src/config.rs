//! Folio configuration file handling

use anyhow::{Context, Result};
use folio_app::RelayConfig;
use folio_layout::Viewport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "folio.toml";

/// Top-level site configuration (folio.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct FolioConfig {
    pub site: SiteConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SiteConfig {
    pub title: String,
    /// Content file replacing the built-in content (relative to the site root)
    #[serde(default)]
    pub content: Option<String>,
    /// Where the theme choice is persisted
    #[serde(default = "default_theme_store")]
    pub theme_store: String,
}

fn default_theme_store() -> String {
    ".folio/storage.json".to_string()
}

/// Viewport used for rendering and scenarios
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    720.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl From<ViewportConfig> for Viewport {
    fn from(config: ViewportConfig) -> Self {
        Viewport::new(config.width, config.height)
    }
}

impl FolioConfig {
    /// Load configuration from a directory (looks for folio.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `folio init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: FolioConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Create a new configuration with the given site title
    pub fn new(title: &str) -> Self {
        Self {
            site: SiteConfig {
                title: title.to_string(),
                content: None,
                theme_store: default_theme_store(),
            },
            viewport: ViewportConfig::default(),
            relay: RelayConfig::default(),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn theme_store_path(&self, root: &Path) -> PathBuf {
        root.join(&self.site.theme_store)
    }

    pub fn content_path(&self, root: &Path) -> Option<PathBuf> {
        self.site.content.as_ref().map(|p| root.join(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_tables() {
        let config: FolioConfig = toml::from_str(
            r#"
            [site]
            title = "Portfolio"
            "#,
        )
        .unwrap();
        assert_eq!(config.site.theme_store, ".folio/storage.json");
        assert_eq!(config.viewport.width, 1280.0);
        assert_eq!(config.relay, RelayConfig::default());
        assert!(config.content_path(Path::new("site")).is_none());
    }

    #[test]
    fn test_round_trip_through_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FolioConfig::new("Portfolio");
        config.viewport.width = 390.0;
        fs::write(dir.path().join(CONFIG_FILE), config.to_toml().unwrap()).unwrap();

        let loaded = FolioConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(loaded.site.title, "Portfolio");
        assert_eq!(Viewport::from(loaded.viewport), Viewport::new(390.0, 720.0));
    }

    #[test]
    fn test_missing_config_mentions_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = FolioConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("folio init"));
    }
}
