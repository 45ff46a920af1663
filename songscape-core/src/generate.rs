//! Concurrent slideshow generation against an image provider.

use crate::credential::CredentialGate;
use crate::error::{CoreError, Result};
use crate::prompt::build_prompts;
use crate::provider::{GeneratedImage, ImageProvider, ImageRequest};
use crate::style::ArtStyle;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{info, warn};

const LOG_TARGET: &str = "songscape::generate";

/// Fans a batch of prompts out to the image provider and collects the
/// surviving images.
pub struct SlideshowGenerator {
    provider: Arc<dyn ImageProvider>,
    credential: Arc<dyn CredentialGate>,
}

impl SlideshowGenerator {
    /// Create a generator over a provider and a credential gate.
    pub fn new(provider: Arc<dyn ImageProvider>, credential: Arc<dyn CredentialGate>) -> Self {
        Self {
            provider,
            credential,
        }
    }

    /// Generate up to `count` images for `title` in `style`.
    ///
    /// All requests are issued concurrently; the result preserves prompt
    /// order, not completion order. Individual request failures are logged
    /// and yield no image, so a partial result (fewer than `count` images) is
    /// a valid success.
    ///
    /// # Errors
    ///
    /// - [`CoreError::CredentialMissing`] when no credential is selected;
    ///   checked before any request is issued.
    /// - [`CoreError::CredentialRejected`] when any request's failure carries
    ///   a rejection marker; this aborts the whole batch, not just the slot.
    /// - [`CoreError::NoImagesProduced`] when `count > 0` and every request
    ///   failed.
    pub async fn generate(
        &self,
        title: &str,
        style: ArtStyle,
        count: usize,
    ) -> Result<Vec<GeneratedImage>> {
        if !self.credential.has_selected_credential() {
            return Err(CoreError::CredentialMissing);
        }

        let prompts = build_prompts(title, style, count);
        info!(
            target: LOG_TARGET,
            "Generating {} image(s) for \"{title}\" (style: {style}, provider: {})",
            prompts.len(),
            self.provider.name()
        );

        let requests = prompts.iter().map(|prompt| async move {
            let request = ImageRequest::new(prompt.clone());
            match self.provider.generate(&request).await {
                Ok(image) => Ok(Some(image)),
                Err(e) if e.is_credential_rejection() => Err(CoreError::CredentialRejected {
                    reason: e.to_string(),
                }),
                Err(e) => {
                    warn!(
                        target: LOG_TARGET,
                        "Image request failed for prompt \"{prompt}\": {e}"
                    );
                    Ok(None)
                }
            }
        });

        // A credential rejection short-circuits the join; every other failure
        // settles as an empty slot.
        let settled = try_join_all(requests).await?;
        let images: Vec<GeneratedImage> = settled.into_iter().flatten().collect();

        if images.is_empty() && count > 0 {
            return Err(CoreError::NoImagesProduced);
        }

        info!(
            target: LOG_TARGET,
            "Generated {} of {count} image(s) for \"{title}\"",
            images.len()
        );
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::testing::FixedGate;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// What a scripted provider does for a given prompt.
    enum Outcome {
        /// Succeed after a delay (simulates network completion order).
        Ok(Duration),
        /// Fail with an unrelated provider error.
        Fail,
        /// Fail with the credential-rejection marker in the message.
        Reject,
    }

    /// Provider whose behavior is keyed by prompt text.
    struct ScriptedProvider {
        outcomes: HashMap<String, Outcome>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(outcomes: HashMap<String, Outcome>) -> Arc<Self> {
            Arc::new(Self {
                outcomes,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcomes.get(&request.prompt) {
                Some(Outcome::Ok(delay)) => {
                    tokio::time::sleep(*delay).await;
                    Ok(GeneratedImage {
                        url: format!("data:image/jpeg;base64,{}", request.prompt.len()),
                        alt: request.prompt.clone(),
                    })
                }
                Some(Outcome::Fail) | None => Err(CoreError::ImageProviderFailed {
                    provider: "scripted".to_string(),
                    reason: "503 Service Unavailable".to_string(),
                }),
                Some(Outcome::Reject) => Err(CoreError::ImageProviderFailed {
                    provider: "scripted".to_string(),
                    reason: "Requested entity was not found.".to_string(),
                }),
            }
        }
    }

    fn generator(provider: Arc<ScriptedProvider>, has_credential: bool) -> SlideshowGenerator {
        SlideshowGenerator::new(provider, Arc::new(FixedGate(has_credential)))
    }

    /// Script every prompt with the same outcome constructor.
    fn script_all(
        prompts: &[String],
        mut outcome: impl FnMut(usize) -> Outcome,
    ) -> HashMap<String, Outcome> {
        prompts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), outcome(i)))
            .collect()
    }

    #[tokio::test]
    async fn test_zero_count_yields_empty_success_without_requests() {
        let provider = ScriptedProvider::new(HashMap::new());
        let result = generator(provider.clone(), true)
            .generate("Song", ArtStyle::None, 0)
            .await;
        assert!(matches!(result, Ok(ref images) if images.is_empty()));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_request() {
        let provider = ScriptedProvider::new(HashMap::new());
        let result = generator(provider.clone(), false)
            .generate("Song", ArtStyle::None, 5)
            .await;
        assert!(matches!(result, Err(CoreError::CredentialMissing)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_follows_prompts_not_completion() {
        let prompts = build_prompts("Song", ArtStyle::None, 5);
        // Earlier prompts finish last.
        let outcomes = script_all(&prompts, |i| {
            Outcome::Ok(Duration::from_millis(500 - 100 * i as u64))
        });
        let provider = ScriptedProvider::new(outcomes);

        let images = generator(provider, true)
            .generate("Song", ArtStyle::None, 5)
            .await
            .unwrap_or_default();

        let alts: Vec<_> = images.iter().map(|i| i.alt.clone()).collect();
        assert_eq!(alts, prompts);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure_compacts_in_order() {
        let prompts = build_prompts("Song", ArtStyle::None, 5);
        // Slots 0, 2, and 4 fail; 1 and 3 survive.
        let outcomes = script_all(&prompts, |i| {
            if i % 2 == 0 {
                Outcome::Fail
            } else {
                Outcome::Ok(Duration::from_millis(10))
            }
        });
        let provider = ScriptedProvider::new(outcomes);

        let images = generator(provider, true)
            .generate("Song", ArtStyle::None, 5)
            .await
            .unwrap_or_default();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].alt, prompts[1]);
        assert_eq!(images[1].alt, prompts[3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_rejection_aborts_the_whole_batch() {
        let prompts = build_prompts("Song", ArtStyle::None, 5);
        let outcomes = script_all(&prompts, |i| {
            if i == 2 {
                Outcome::Reject
            } else {
                Outcome::Ok(Duration::from_millis(10))
            }
        });
        let provider = ScriptedProvider::new(outcomes);

        let result = generator(provider, true)
            .generate("Song", ArtStyle::None, 5)
            .await;

        assert!(matches!(result, Err(CoreError::CredentialRejected { .. })));
    }

    #[tokio::test]
    async fn test_all_unrelated_failures_yield_no_images_produced() {
        let prompts = build_prompts("Song", ArtStyle::None, 3);
        let outcomes = script_all(&prompts, |_| Outcome::Fail);
        let provider = ScriptedProvider::new(outcomes);

        let result = generator(provider, true)
            .generate("Song", ArtStyle::None, 3)
            .await;

        assert!(matches!(result, Err(CoreError::NoImagesProduced)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_styled_prompts_carry_the_fragment_as_alt() {
        let prompts = build_prompts("Song", ArtStyle::Abstract, 5);
        let outcomes = script_all(&prompts, |_| Outcome::Ok(Duration::ZERO));
        let provider = ScriptedProvider::new(outcomes);

        let images = generator(provider, true)
            .generate("Song", ArtStyle::Abstract, 5)
            .await
            .unwrap_or_default();

        assert_eq!(images.len(), 5);
        for image in &images {
            assert!(image.alt.contains("Abstract art style"));
        }
    }
}
