//! Host credential gate backed by the config file and the environment.

use songscape_core::{CredentialGate, SongscapeConfig};
use std::path::PathBuf;
use tracing::{info, warn};

/// Credential gate for hosts without a key-selection dialog.
///
/// A credential counts as selected when the config file or the
/// `GEMINI_API_KEY` environment variable carries a key. "Selecting" one means
/// editing the config file, so the gate opens it in the default editor.
pub struct AmbientCredential {
    api_key: Option<String>,
    config_path: PathBuf,
}

impl AmbientCredential {
    #[must_use]
    pub fn new(config: &SongscapeConfig) -> Self {
        Self {
            api_key: config.resolve_api_key(),
            config_path: SongscapeConfig::config_path(),
        }
    }

    /// The resolved API key, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl CredentialGate for AmbientCredential {
    fn has_selected_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn open_select_credential(&self) {
        info!(
            "Opening config file for API key selection: {:?}",
            self.config_path
        );
        if let Err(e) = open::that(&self.config_path) {
            warn!("Failed to open config file: {e}");
        }
    }
}
