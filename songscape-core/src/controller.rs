//! The controller owning all slideshow state.

use crate::credential::CredentialGate;
use crate::error::CoreError;
use crate::generate::SlideshowGenerator;
use crate::provider::{GeneratedImage, ImageProvider};
use crate::style::ArtStyle;
use crate::tags;
use crate::track::{audio_mime, resolve_title, AudioHandle, SelectedTrack};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

const LOG_TARGET: &str = "songscape::controller";

/// Snapshot of the controller-owned state.
#[derive(Debug, Clone, Default)]
pub struct SlideshowState {
    /// Currently selected audio file, if any.
    pub track: Option<SelectedTrack>,
    /// Display title resolved from tags or the file name.
    pub title: Option<String>,
    /// Currently selected art style.
    pub style: ArtStyle,
    /// Images from the most recent generation.
    pub images: Vec<GeneratedImage>,
    /// Whether a generation is in flight.
    pub is_loading: bool,
    /// User-visible error message, if any.
    pub error: Option<String>,
    /// Whether a credential is available for generation.
    pub has_credential: bool,
}

/// Events emitted by the controller.
#[derive(Debug, Clone)]
pub enum SlideshowEvent {
    /// A new audio file was selected.
    TrackSelected {
        title: String,
        file_name: String,
        audio_url: String,
    },
    /// The selection was cleared.
    TrackCleared,
    /// The art style changed.
    StyleChanged { style: ArtStyle },
    /// The user went through credential selection.
    CredentialSelected,
    /// The provider rejected the credential; the user must select again.
    CredentialRequired { message: String },
    /// A generation fan-out started.
    GenerationStarted,
    /// Generation finished with at least one image.
    SlideshowReady { images: Vec<GeneratedImage> },
    /// Generation finished without a usable result.
    GenerationFailed { message: String },
    /// Error outside the generation flow.
    Error { message: String },
}

/// Orchestrates input acquisition, style selection, generation, and the
/// state the presentation layer renders from.
///
/// All shared state is owned here and mutated only through these methods, in
/// response to user actions or generation completion.
pub struct SlideshowController {
    inner: RwLock<SlideshowState>,
    generator: SlideshowGenerator,
    credential: Arc<dyn CredentialGate>,
    slide_count: usize,
    event_tx: broadcast::Sender<SlideshowEvent>,
}

impl SlideshowController {
    /// Create a controller over a provider and a credential gate.
    ///
    /// `slide_count` is the number of images requested per generation.
    #[must_use]
    pub fn new(
        provider: Arc<dyn ImageProvider>,
        credential: Arc<dyn CredentialGate>,
        slide_count: usize,
    ) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(64);
        let has_credential = credential.has_selected_credential();

        Arc::new(Self {
            inner: RwLock::new(SlideshowState {
                has_credential,
                ..SlideshowState::default()
            }),
            generator: SlideshowGenerator::new(provider, Arc::clone(&credential)),
            credential,
            slide_count,
            event_tx,
        })
    }

    /// Subscribe to controller events.
    pub fn subscribe(&self) -> broadcast::Receiver<SlideshowEvent> {
        self.event_tx.subscribe()
    }

    /// Get a snapshot of the current state.
    pub async fn state(&self) -> SlideshowState {
        self.inner.read().await.clone()
    }

    /// Select a new audio file, or clear the selection with `None`.
    ///
    /// Selecting always clears previously generated images and any displayed
    /// error. Tag extraction failure is non-fatal: the audio handle is still
    /// produced and the title falls back to the file name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] when the selected file cannot be read.
    pub async fn select_file(&self, path: Option<PathBuf>) -> Result<(), CoreError> {
        let Some(path) = path else {
            let mut state = self.inner.write().await;
            state.track = None;
            state.title = None;
            state.images.clear();
            state.error = None;
            drop(state);
            info!(target: LOG_TARGET, "Selection cleared");
            let _ = self.event_tx.send(SlideshowEvent::TrackCleared);
            return Ok(());
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let bytes = tokio::fs::read(&path).await?;
        let audio = AudioHandle::from_bytes(audio_mime(&file_name), &bytes);

        // Tag extraction is blocking container I/O; failure only degrades the
        // title.
        let tag_path = path.clone();
        let media_tags = match tokio::task::spawn_blocking(move || tags::read_tags(&tag_path)).await
        {
            Ok(Ok(media_tags)) => Some(media_tags),
            Ok(Err(e)) => {
                warn!(target: LOG_TARGET, "Failed to read tags from {file_name}: {e}");
                None
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "Tag reader task failed for {file_name}: {e}");
                None
            }
        };

        let title = resolve_title(media_tags.as_ref(), &file_name);
        info!(target: LOG_TARGET, "Selected {file_name} (title: {title})");

        let audio_url = audio.url().to_string();
        let mut state = self.inner.write().await;
        state.track = Some(SelectedTrack {
            path,
            file_name: file_name.clone(),
            audio,
        });
        state.title = Some(title.clone());
        state.images.clear();
        state.error = None;
        drop(state);

        let _ = self.event_tx.send(SlideshowEvent::TrackSelected {
            title,
            file_name,
            audio_url,
        });
        Ok(())
    }

    /// Replace the selected art style.
    pub async fn set_style(&self, style: ArtStyle) {
        self.inner.write().await.style = style;
        let _ = self.event_tx.send(SlideshowEvent::StyleChanged { style });
    }

    /// The user walked through credential selection; assume it succeeded and
    /// clear any displayed error.
    pub async fn select_credential(&self) {
        self.credential.open_select_credential();
        let mut state = self.inner.write().await;
        state.has_credential = true;
        state.error = None;
        drop(state);
        let _ = self.event_tx.send(SlideshowEvent::CredentialSelected);
    }

    /// Surface an error outside the generation flow (e.g. an unreadable file).
    pub async fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.inner.write().await.error = Some(message.clone());
        let _ = self.event_tx.send(SlideshowEvent::Error { message });
    }

    /// Run the generation workflow for the current selection.
    ///
    /// Precondition violations (no file, no credential) surface as
    /// user-facing messages without issuing any request. A trigger while a
    /// generation is already in flight is ignored.
    pub async fn generate_slideshow(&self) {
        let (title, style) = {
            let state = self.inner.read().await;
            if state.is_loading {
                return;
            }
            if state.track.is_none() || state.title.is_none() {
                drop(state);
                self.fail_generation("Please select an audio file first.")
                    .await;
                return;
            }
            if !state.has_credential {
                drop(state);
                self.fail_generation("Please select an API key to generate images.")
                    .await;
                return;
            }
            (state.title.clone().unwrap_or_default(), state.style)
        };

        {
            let mut state = self.inner.write().await;
            state.is_loading = true;
            state.error = None;
            state.images.clear();
        }
        let _ = self.event_tx.send(SlideshowEvent::GenerationStarted);

        let result = self
            .generator
            .generate(&title, style, self.slide_count)
            .await;

        let mut state = self.inner.write().await;
        state.is_loading = false;
        match result {
            Ok(images) => {
                state.images.clone_from(&images);
                drop(state);
                let _ = self.event_tx.send(SlideshowEvent::SlideshowReady { images });
            }
            Err(e @ CoreError::CredentialRejected { .. }) => {
                // Reset the flag so the UI re-prompts for selection.
                state.has_credential = false;
                let message = format!("{e} Please select your API key again.");
                state.error = Some(message.clone());
                drop(state);
                warn!(target: LOG_TARGET, "{message}");
                let _ = self
                    .event_tx
                    .send(SlideshowEvent::CredentialRequired { message });
            }
            Err(e) => {
                let message = format!("Failed to generate slideshow: {e}");
                state.error = Some(message.clone());
                drop(state);
                warn!(target: LOG_TARGET, "{message}");
                let _ = self
                    .event_tx
                    .send(SlideshowEvent::GenerationFailed { message });
            }
        }
    }

    async fn fail_generation(&self, message: &str) {
        self.inner.write().await.error = Some(message.to_string());
        let _ = self.event_tx.send(SlideshowEvent::GenerationFailed {
            message: message.to_string(),
        });
    }
}
