use crate::error::CoreError;
use async_trait::async_trait;

/// Aspect ratio requested for every slideshow image (landscape display).
pub const ASPECT_RATIO: &str = "16:9";

/// Output format requested from the provider.
pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// A single image-generation request.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// Prompt text describing the image.
    pub prompt: String,
    /// Images requested per prompt; the slideshow always asks for one.
    pub number_of_images: u32,
    /// Output MIME type.
    pub output_mime_type: String,
    /// Aspect ratio, e.g. "16:9".
    pub aspect_ratio: String,
}

impl ImageRequest {
    /// Create a request for one slideshow-shaped image of `prompt`.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            number_of_images: 1,
            output_mime_type: OUTPUT_MIME_TYPE.to_string(),
            aspect_ratio: ASPECT_RATIO.to_string(),
        }
    }
}

/// An image produced by the generation step.
///
/// Immutable once created; the generation step is the sole producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Displayable resource locator (a `data:` URL).
    pub url: String,
    /// Descriptive text, equal to the prompt that produced the image.
    pub alt: String,
}

/// Trait for image-generation providers.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &'static str;

    /// Generate one image for a request.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider call fails; failures whose message
    /// carries a credential-rejection marker are escalated by the generator.
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_suit_the_slideshow() {
        let request = ImageRequest::new("a prompt");
        assert_eq!(request.number_of_images, 1);
        assert_eq!(request.aspect_ratio, ASPECT_RATIO);
        assert_eq!(request.output_mime_type, OUTPUT_MIME_TYPE);
    }
}
