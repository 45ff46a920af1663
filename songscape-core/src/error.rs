use std::path::PathBuf;
use thiserror::Error;

/// Message fragments that identify a credential rejection in a provider
/// failure. The image provider does not report rejection with a dedicated
/// status, so the failure text is the only signal available.
const CREDENTIAL_REJECTION_MARKERS: &[&str] = &[
    "Requested entity was not found.",
    "API_KEY_INVALID",
    "API key not valid",
];

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created - please edit it and restart.")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // Generation errors
    #[error("No API key selected for image generation")]
    CredentialMissing,

    #[error("API Key issue: the image provider rejected the selected key ({reason})")]
    CredentialRejected { reason: String },

    #[error("No images could be generated. Please check your prompt or API key.")]
    NoImagesProduced,

    #[error("Image provider {provider} failed: {reason}")]
    ImageProviderFailed { provider: String, reason: String },

    // Input acquisition errors
    #[error("Failed to read audio tags: {reason}")]
    TagRead { reason: String },

    // Network errors
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether this failure indicates the provider rejected the credential.
    ///
    /// Rejection is escalated from a per-request failure to a whole-operation
    /// failure by the generator, unlike every other per-request error.
    #[must_use]
    pub fn is_credential_rejection(&self) -> bool {
        if matches!(self, Self::CredentialRejected { .. }) {
            return true;
        }
        let message = self.to_string();
        CREDENTIAL_REJECTION_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_detected_from_marker_in_message() {
        let err = CoreError::ImageProviderFailed {
            provider: "imagen".to_string(),
            reason: "Requested entity was not found.".to_string(),
        };
        assert!(err.is_credential_rejection());
    }

    #[test]
    fn test_rejection_detected_from_api_key_invalid() {
        let err = CoreError::ImageProviderFailed {
            provider: "imagen".to_string(),
            reason: "400 Bad Request: API_KEY_INVALID".to_string(),
        };
        assert!(err.is_credential_rejection());
    }

    #[test]
    fn test_unrelated_failure_is_not_rejection() {
        let err = CoreError::ImageProviderFailed {
            provider: "imagen".to_string(),
            reason: "503 Service Unavailable".to_string(),
        };
        assert!(!err.is_credential_rejection());
    }

    #[test]
    fn test_credential_rejected_variant_is_rejection() {
        let err = CoreError::CredentialRejected {
            reason: "anything".to_string(),
        };
        assert!(err.is_credential_rejection());
    }
}
