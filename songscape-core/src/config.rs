use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongscapeConfig {
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub slideshow: SlideshowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Image-generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Gemini API key. When empty, the `GEMINI_API_KEY` environment variable
    /// is used instead.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Number of images generated per slideshow
    #[serde(default = "default_slide_count")]
    pub slide_count: usize,
    /// Per-request timeout in seconds; 0 disables the timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "imagen-4.0-generate-001".to_string()
}

const fn default_slide_count() -> usize {
    5
}

const fn default_request_timeout() -> u64 {
    30
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            slide_count: default_slide_count(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideshowConfig {
    /// Time each slide stays current, in milliseconds
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
}

const fn default_interval() -> u64 {
    5000
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to ~/.config/songscape/songscape.log in addition to the console
    #[serde(default)]
    pub enabled: bool,
}

impl SongscapeConfig {
    /// Get the configuration directory path (~/.config/songscape/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/songscape/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from file or create template on first run
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template on
    /// first run, or an error if the file cannot be read or parsed.
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(&config_path, CONFIG_TEMPLATE)?;

            return Err(CoreError::ConfigNotFound { path: config_path });
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// The API key to use for image generation, from the config file or the
    /// `GEMINI_API_KEY` environment variable.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        let from_file = self.images.api_key.trim();
        if !from_file.is_empty() {
            return Some(from_file.to_string());
        }
        std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

const CONFIG_TEMPLATE: &str = r#"# Songscape Configuration
# ~/.config/songscape/config.toml

[images]
# Gemini API key for image generation.
# Leave empty to use the GEMINI_API_KEY environment variable instead.
api_key = ""
model = "imagen-4.0-generate-001"
# Number of images generated per slideshow
slide_count = 5
# Per-request timeout in seconds; 0 disables the timeout
request_timeout_secs = 30

[slideshow]
# Time each slide stays on screen, in milliseconds
interval_ms = 5000

[logging]
# Write logs to ~/.config/songscape/songscape.log in addition to the console
enabled = false
"#;
