pub mod config;
pub mod controller;
pub mod credential;
pub mod error;
pub mod generate;
pub mod paths;
pub mod player;
pub mod prompt;
pub mod provider;
pub mod style;
pub mod tags;
pub mod track;

pub use config::{ImagesConfig, LoggingConfig, SlideshowConfig, SongscapeConfig};
pub use controller::{SlideshowController, SlideshowEvent, SlideshowState};
pub use credential::CredentialGate;
pub use error::{CoreError, Result};
pub use generate::SlideshowGenerator;
pub use paths::{config_dir, config_path, log_file_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use player::{PlayerEvent, SlideshowPlayer};
pub use prompt::{build_prompts, TEMPLATE_COUNT};
pub use provider::{GeneratedImage, ImageProvider, ImageRequest, ASPECT_RATIO, OUTPUT_MIME_TYPE};
pub use style::ArtStyle;
pub use tags::read_tags;
pub use track::{
    audio_mime, resolve_title, AudioHandle, MediaTags, SelectedTrack, AUDIO_EXTENSIONS,
    DEFAULT_TITLE,
};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
