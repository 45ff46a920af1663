use crate::state::SlideshowViewState;
use dioxus::prelude::*;
use songscape_core::{PlayerEvent, SlideshowController, SlideshowEvent, SlideshowPlayer};
use std::sync::Arc;
use tracing::info;

const LOG_TARGET: &str = "songscape::bridge";

/// Bridge controller and player events to Dioxus signals.
/// Spawns async tasks that drain the broadcast channels and update the view
/// state accordingly.
pub fn use_slideshow_bridge(
    controller: &Arc<SlideshowController>,
    player: &Arc<SlideshowPlayer>,
    view: SlideshowViewState,
) {
    let controller = Arc::clone(controller);
    use_future(move || {
        let controller = Arc::clone(&controller);
        async move {
            let mut rx = controller.subscribe();

            loop {
                match rx.recv().await {
                    Ok(event) => handle_controller_event(event, view),
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        info!(target: LOG_TARGET, "Controller event channel closed");
                        break;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        info!(target: LOG_TARGET, "Missed {n} controller events");
                    }
                }
            }
        }
    });

    let player = Arc::clone(player);
    use_future(move || {
        let player = Arc::clone(&player);
        async move {
            let mut rx = player.subscribe();

            loop {
                match rx.recv().await {
                    Ok(event) => handle_player_event(event, view),
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        info!(target: LOG_TARGET, "Player event channel closed");
                        break;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        info!(target: LOG_TARGET, "Missed {n} player events");
                    }
                }
            }
        }
    });
}

fn handle_controller_event(event: SlideshowEvent, mut view: SlideshowViewState) {
    match event {
        SlideshowEvent::TrackSelected {
            title,
            file_name,
            audio_url,
        } => {
            info!(target: LOG_TARGET, "Track selected: {file_name} (title: {title})");
            view.set_track(title, file_name, audio_url);
        }
        SlideshowEvent::TrackCleared => {
            view.clear_track();
        }
        SlideshowEvent::StyleChanged { style } => {
            view.style.set(style);
        }
        SlideshowEvent::CredentialSelected => {
            view.credential_selected();
        }
        SlideshowEvent::CredentialRequired { message } => {
            view.require_credential(message);
        }
        SlideshowEvent::GenerationStarted => {
            view.begin_generation();
        }
        SlideshowEvent::SlideshowReady { images } => {
            info!(target: LOG_TARGET, "Slideshow ready with {} image(s)", images.len());
            view.show_slideshow(images);
        }
        SlideshowEvent::GenerationFailed { message }
        | SlideshowEvent::Error { message } => {
            view.fail_generation(message);
        }
    }
}

fn handle_player_event(event: PlayerEvent, mut view: SlideshowViewState) {
    match event {
        PlayerEvent::SlideChanged { index, .. } => view.set_slide(index),
        PlayerEvent::Emptied => view.set_slide(0),
    }
}
