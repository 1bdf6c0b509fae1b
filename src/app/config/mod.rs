// SPDX-License-Identifier: MPL-2.0
//! Loading and saving user preferences in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[server]` - API base URL and the origin serving uploaded images
//! - `[slideshow]` - Transition interval and overlay auto-hide delay
//! - `[previews]` - Preview bounding boxes, JPEG quality and cache budget
//!
//! Every field is optional; missing values fall back to [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use album_lens::app::config;
//!
//! let (mut config, _warning) = config::load();
//! config.slideshow.transition_ms = Some(5000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::media::preview::PreviewSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Where the album service lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_api_url", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default = "default_upload_url", skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            upload_url: default_upload_url(),
        }
    }
}

impl ServerConfig {
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn upload_url(&self) -> &str {
        self.upload_url.as_deref().unwrap_or(DEFAULT_UPLOAD_URL)
    }
}

/// Slideshow timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlideshowConfig {
    #[serde(default = "default_transition_ms", skip_serializing_if = "Option::is_none")]
    pub transition_ms: Option<u64>,

    #[serde(
        default = "default_overlay_timeout_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub overlay_timeout_ms: Option<u64>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            overlay_timeout_ms: default_overlay_timeout_ms(),
        }
    }
}

impl SlideshowConfig {
    /// Transition interval, never shorter than [`MIN_TRANSITION_MS`].
    pub fn transition(&self) -> Duration {
        let ms = self
            .transition_ms
            .unwrap_or(DEFAULT_TRANSITION_MS)
            .max(MIN_TRANSITION_MS);
        Duration::from_millis(ms)
    }

    /// Stores a transition chosen in the slideshow, clamped like [`Self::transition`].
    pub fn set_transition(&mut self, transition: Duration) {
        let ms = u64::try_from(transition.as_millis()).unwrap_or(u64::MAX);
        self.transition_ms = Some(ms.max(MIN_TRANSITION_MS));
    }

    pub fn overlay_timeout(&self) -> Duration {
        let ms = self
            .overlay_timeout_ms
            .unwrap_or(DEFAULT_OVERLAY_TIMEOUT_MS)
            .clamp(MIN_OVERLAY_TIMEOUT_MS, MAX_OVERLAY_TIMEOUT_MS);
        Duration::from_millis(ms)
    }
}

/// Preview generation and caching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_edge: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_quality: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_edge: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_quality: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_mb: Option<u32>,
}

impl Default for PreviewsConfig {
    fn default() -> Self {
        Self {
            local_edge: Some(DEFAULT_LOCAL_PREVIEW_EDGE),
            local_quality: Some(DEFAULT_LOCAL_PREVIEW_QUALITY),
            remote_edge: Some(DEFAULT_REMOTE_PREVIEW_EDGE),
            remote_quality: Some(DEFAULT_REMOTE_PREVIEW_QUALITY),
            cache_mb: Some(DEFAULT_PREVIEW_CACHE_MB),
        }
    }
}

impl PreviewsConfig {
    pub fn local_spec(&self) -> PreviewSpec {
        let edge = self.local_edge.unwrap_or(DEFAULT_LOCAL_PREVIEW_EDGE);
        PreviewSpec::new(
            edge,
            edge,
            self.local_quality.unwrap_or(DEFAULT_LOCAL_PREVIEW_QUALITY),
        )
    }

    pub fn remote_spec(&self) -> PreviewSpec {
        let edge = self.remote_edge.unwrap_or(DEFAULT_REMOTE_PREVIEW_EDGE);
        PreviewSpec::new(
            edge,
            edge,
            self.remote_quality.unwrap_or(DEFAULT_REMOTE_PREVIEW_QUALITY),
        )
    }

    pub fn cache_bytes(&self) -> usize {
        let mb = self
            .cache_mb
            .unwrap_or(DEFAULT_PREVIEW_CACHE_MB)
            .min(MAX_PREVIEW_CACHE_MB);
        mb as usize * 1024 * 1024
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub slideshow: SlideshowConfig,

    #[serde(default)]
    pub previews: PreviewsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_api_url() -> Option<String> {
    Some(DEFAULT_API_URL.to_string())
}

fn default_upload_url() -> Option<String> {
    Some(DEFAULT_UPLOAD_URL.to_string())
}

fn default_transition_ms() -> Option<u64> {
    Some(DEFAULT_TRANSITION_MS)
}

fn default_overlay_timeout_ms() -> Option<u64> {
    Some(DEFAULT_OVERLAY_TIMEOUT_MS)
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Never fails: an unreadable file yields the defaults plus a warning for
/// the user.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded settings");
            (config, None)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file");
            (
                Config::default(),
                Some("Settings could not be read; defaults are in use".to_string()),
            )
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config("no configuration directory available".into())),
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            server: ServerConfig {
                api_url: Some("https://photos.example/api".into()),
                upload_url: Some("https://photos.example".into()),
            },
            slideshow: SlideshowConfig {
                transition_ms: Some(4500),
                overlay_timeout_ms: Some(2000),
            },
            previews: PreviewsConfig {
                cache_mb: Some(16),
                ..PreviewsConfig::default()
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_file_falls_back_to_defaults_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[slideshow]\ntransition_ms = \"soon\"")
            .expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[server]\napi_url = \"http://nas:8080/api\"\n").expect("write");

        let config = load_from_path(&config_path).expect("load");
        assert_eq!(config.server.api_url(), "http://nas:8080/api");
        assert_eq!(config.server.upload_url(), DEFAULT_UPLOAD_URL);
        assert_eq!(config.slideshow.transition(), Duration::from_millis(DEFAULT_TRANSITION_MS));
        assert_eq!(config.previews.local_spec(), PreviewSpec::LOCAL);
        assert_eq!(config.previews.remote_spec(), PreviewSpec::REMOTE);
    }

    #[test]
    fn short_transition_is_raised_to_minimum() {
        let slideshow = SlideshowConfig {
            transition_ms: Some(200),
            overlay_timeout_ms: Some(100),
        };
        assert_eq!(slideshow.transition(), Duration::from_millis(MIN_TRANSITION_MS));
        assert_eq!(
            slideshow.overlay_timeout(),
            Duration::from_millis(MIN_OVERLAY_TIMEOUT_MS)
        );
    }

    #[test]
    fn chosen_transition_is_saved_exactly() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.slideshow.set_transition(Duration::from_secs(4));
        save_with_override(&config, Some(temp_dir.path().to_path_buf())).expect("save");

        let (loaded, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(loaded.slideshow.transition_ms, Some(4000));
        assert_eq!(loaded.slideshow.transition(), Duration::from_secs(4));

        config.slideshow.set_transition(Duration::from_millis(300));
        assert_eq!(config.slideshow.transition_ms, Some(MIN_TRANSITION_MS));
    }

    #[test]
    fn cache_budget_is_capped() {
        let previews = PreviewsConfig {
            cache_mb: Some(100_000),
            ..PreviewsConfig::default()
        };
        assert_eq!(previews.cache_bytes(), MAX_PREVIEW_CACHE_MB as usize * 1024 * 1024);
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.server.api_url(), DEFAULT_API_URL);
        assert_eq!(config.slideshow.transition_ms, Some(3000));
        assert_eq!(config.slideshow.overlay_timeout_ms, Some(3000));
        assert_eq!(config.previews.local_edge, Some(200));
        assert_eq!(config.previews.remote_quality, Some(30));
    }
}
