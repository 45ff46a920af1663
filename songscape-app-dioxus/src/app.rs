use crate::components::{FilePicker, Slideshow, StyleSelector};
use crate::state::SlideshowViewState;
use dioxus::prelude::*;
use songscape_core::SlideshowController;
use std::sync::Arc;

/// Root application component.
/// Lays out the input controls above the slideshow display.
#[component]
pub fn App() -> Element {
    let view = use_context::<SlideshowViewState>();
    let controller = use_context::<Arc<SlideshowController>>();

    let is_loading = *view.is_loading.read();
    let has_credential = *view.has_credential.read();
    let has_track = view.title.read().is_some();
    let error = view.error.read().clone().unwrap_or_default();
    let can_generate = has_track && !is_loading && has_credential;

    let generate = {
        let controller = Arc::clone(&controller);
        move |_| {
            let controller = Arc::clone(&controller);
            spawn(async move {
                controller.generate_slideshow().await;
            });
        }
    };

    let select_credential = {
        let controller = Arc::clone(&controller);
        move |_| {
            let controller = Arc::clone(&controller);
            spawn(async move {
                controller.select_credential().await;
            });
        }
    };

    rsx! {
        div { class: "container",
            h1 { class: "app-title", "Songscape" }

            if !error.is_empty() {
                div { class: "banner banner-error", role: "alert", "{error}" }
            }

            if !has_credential {
                div { class: "banner banner-credential",
                    p { "An API key is required for image generation." }
                    button {
                        class: "credential-button",
                        disabled: is_loading,
                        onclick: select_credential,
                        "Select API key"
                    }
                }
            }

            FilePicker {}
            StyleSelector {}

            button {
                class: "generate-button",
                disabled: !can_generate,
                onclick: generate,
                if is_loading {
                    "Generating slideshow..."
                } else {
                    "Generate slideshow"
                }
            }

            Slideshow {}
        }
    }
}
