use crate::state::SlideshowViewState;
use dioxus::prelude::*;
use songscape_core::{SlideshowController, AUDIO_EXTENSIONS};
use std::sync::Arc;

/// Audio file selection block: a native picker plus the current selection.
#[component]
pub fn FilePicker() -> Element {
    let view = use_context::<SlideshowViewState>();
    let controller = use_context::<Arc<SlideshowController>>();

    let disabled = *view.is_loading.read() || !*view.has_credential.read();
    let file_name = view.file_name.read().clone().unwrap_or_default();
    let title = view.title.read().clone().unwrap_or_default();

    let pick_file = {
        let controller = Arc::clone(&controller);
        move |_| {
            let controller = Arc::clone(&controller);
            spawn(async move {
                let picked = rfd::AsyncFileDialog::new()
                    .set_title("Choose an audio file")
                    .add_filter("Audio", AUDIO_EXTENSIONS)
                    .pick_file()
                    .await;

                // Cancelling the dialog keeps the current selection.
                if let Some(handle) = picked {
                    let path = handle.path().to_path_buf();
                    if let Err(e) = controller.select_file(Some(path)).await {
                        controller
                            .report_error(format!("Failed to read audio file: {e}"))
                            .await;
                    }
                }
            });
        }
    };

    let clear_file = {
        let controller = Arc::clone(&controller);
        move |_| {
            let controller = Arc::clone(&controller);
            spawn(async move {
                let _ = controller.select_file(None).await;
            });
        }
    };

    rsx! {
        div { class: "file-picker",
            span { class: "section-label", "Audio file" }
            div { class: "file-picker-row",
                button {
                    class: "pick-button",
                    disabled,
                    onclick: pick_file,
                    "Choose audio file"
                }
                if !file_name.is_empty() {
                    button {
                        class: "clear-button",
                        disabled,
                        onclick: clear_file,
                        "Clear"
                    }
                }
            }
            if !file_name.is_empty() {
                p { class: "file-info",
                    "Selected: "
                    span { class: "file-info-value", "{file_name}" }
                }
            }
            if !title.is_empty() {
                p { class: "file-info",
                    "Detected title: "
                    span { class: "file-info-value", "{title}" }
                }
            }
            if file_name.is_empty() {
                p { class: "file-hint", "Pick an audio file to get started." }
            }
        }
    }
}
