use dioxus::prelude::*;
use songscape_core::{ArtStyle, GeneratedImage};

/// UI-facing slideshow state as granular Dioxus signals.
///
/// The event bridge is the only writer; components read. All mutations mirror
/// controller events, so the signals never disagree with the core state for
/// longer than one event delivery.
#[derive(Clone, Copy)]
pub struct SlideshowViewState {
    /// Resolved display title of the selected track
    pub title: Signal<Option<String>>,
    /// File name of the selected track
    pub file_name: Signal<Option<String>>,
    /// Playable audio source URL for the audio element
    pub audio_url: Signal<Option<String>>,
    /// Currently selected art style
    pub style: Signal<ArtStyle>,
    /// Images from the most recent generation
    pub images: Signal<Vec<GeneratedImage>>,
    /// Index of the slide currently shown
    pub current_index: Signal<usize>,
    /// Whether a generation is in flight
    pub is_loading: Signal<bool>,
    /// User-visible error message, if any
    pub error: Signal<Option<String>>,
    /// Whether a credential is available for generation
    pub has_credential: Signal<bool>,
}

impl SlideshowViewState {
    /// Create view state with default values and the given credential flag.
    #[must_use]
    pub fn new(has_credential: bool) -> Self {
        Self {
            title: Signal::new(None),
            file_name: Signal::new(None),
            audio_url: Signal::new(None),
            style: Signal::new(ArtStyle::default()),
            images: Signal::new(Vec::new()),
            current_index: Signal::new(0),
            is_loading: Signal::new(false),
            error: Signal::new(None),
            has_credential: Signal::new(has_credential),
        }
    }

    /// A new track was selected: show it and drop stale images and errors.
    pub fn set_track(&mut self, title: String, file_name: String, audio_url: String) {
        self.title.set(Some(title));
        self.file_name.set(Some(file_name));
        self.audio_url.set(Some(audio_url));
        self.images.set(Vec::new());
        self.current_index.set(0);
        self.error.set(None);
    }

    /// The selection was cleared.
    pub fn clear_track(&mut self) {
        self.title.set(None);
        self.file_name.set(None);
        self.audio_url.set(None);
        self.images.set(Vec::new());
        self.current_index.set(0);
        self.error.set(None);
    }

    /// A generation fan-out started.
    pub fn begin_generation(&mut self) {
        self.is_loading.set(true);
        self.error.set(None);
        self.images.set(Vec::new());
        self.current_index.set(0);
    }

    /// Generation finished with images to show.
    pub fn show_slideshow(&mut self, images: Vec<GeneratedImage>) {
        self.images.set(images);
        self.current_index.set(0);
        self.is_loading.set(false);
    }

    /// Generation finished with a user-facing failure.
    pub fn fail_generation(&mut self, message: String) {
        self.is_loading.set(false);
        self.error.set(Some(message));
    }

    /// The provider rejected the credential; re-prompt for selection.
    pub fn require_credential(&mut self, message: String) {
        self.has_credential.set(false);
        self.fail_generation(message);
    }

    /// The user went through credential selection.
    pub fn credential_selected(&mut self) {
        self.has_credential.set(true);
        self.error.set(None);
    }

    /// The player advanced to a new slide.
    pub fn set_slide(&mut self, index: usize) {
        self.current_index.set(index);
    }
}
