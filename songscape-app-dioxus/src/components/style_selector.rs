use crate::state::SlideshowViewState;
use dioxus::prelude::*;
use songscape_core::{ArtStyle, SlideshowController};
use std::sync::Arc;

/// Art style dropdown over the closed style enumeration.
#[component]
pub fn StyleSelector() -> Element {
    let view = use_context::<SlideshowViewState>();
    let controller = use_context::<Arc<SlideshowController>>();

    let selected = *view.style.read();
    let disabled = *view.is_loading.read() || !*view.has_credential.read();

    let change_style = move |evt: FormEvent| {
        let value = evt.value();
        let style = ArtStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == value)
            .unwrap_or_default();
        let controller = Arc::clone(&controller);
        spawn(async move {
            controller.set_style(style).await;
        });
    };

    rsx! {
        div { class: "style-selector",
            label { class: "section-label", r#for: "art-style", "Art style" }
            select {
                id: "art-style",
                disabled,
                onchange: change_style,
                for style in ArtStyle::ALL {
                    option {
                        value: "{style.as_str()}",
                        selected: style == selected,
                        "{style.label()}"
                    }
                }
            }
        }
    }
}
