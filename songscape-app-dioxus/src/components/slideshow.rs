use crate::state::SlideshowViewState;
use dioxus::prelude::*;

/// Slideshow display: the current image with its caption and position, plus
/// concurrent audio playback.
///
/// Two states: empty (placeholder copy) and playing (the player's current
/// index drives which image shows). The audio element is keyed on its source
/// URL so a source change reloads and restarts playback; a playback failure
/// stays inside the webview and never blocks the image cycle.
#[component]
pub fn Slideshow() -> Element {
    let view = use_context::<SlideshowViewState>();

    let images = view.images.read();
    let audio_url = view.audio_url.read().clone().unwrap_or_default();

    if images.is_empty() {
        return rsx! {
            div { class: "slideshow slideshow-empty",
                p { class: "placeholder-title", "No slideshow generated yet." }
                p { class: "placeholder-hint", "Pick an audio file and select an art style to begin!" }
            }
        };
    }

    // An index event can land before the image update; clamp to the new length.
    let index = (*view.current_index.read()).min(images.len() - 1);
    let current = images[index].clone();
    let position = index + 1;
    let total = images.len();

    rsx! {
        div { class: "slideshow",
            img {
                class: "slide",
                src: "{current.url}",
                alt: "{current.alt}",
            }
            div { class: "slide-caption",
                p { class: "slide-alt", "{current.alt}" }
                p { class: "slide-position", "Slide {position} of {total}" }
            }

            if !audio_url.is_empty() {
                audio {
                    key: "{audio_url}",
                    class: "slideshow-audio",
                    src: "{audio_url}",
                    autoplay: true,
                    controls: true,
                    r#loop: true,
                }
            }
        }
    }
}
