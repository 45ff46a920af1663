#![cfg_attr(feature = "bundle", windows_subsystem = "windows")]
mod app;
mod bridge;
mod components;
mod credential;
mod state;

use crate::app::App;
use crate::bridge::use_slideshow_bridge;
use crate::credential::AmbientCredential;
use crate::state::SlideshowViewState;
use dioxus::desktop::{LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use songscape_core::{
    CoreError, CredentialGate, SlideshowController, SlideshowEvent, SlideshowPlayer,
    SongscapeConfig, TomlParseError,
};
use songscape_images_imagen::ImagenProvider;

const APP_NAME: &str = "Songscape";

fn main() {
    // Initialize logging with optional file output
    // Check config for logging.enabled before full config load
    let file_logging_enabled = check_file_logging_enabled();
    init_tracing(file_logging_enabled);

    // Load config or create template on first run
    let config = match SongscapeConfig::load_or_create() {
        Ok(config) => config,
        Err(CoreError::ConfigNotFound { path }) => {
            // Config was just created - show dialog informing user
            show_new_config_dialog(&path);
            std::process::exit(0);
        }
        Err(CoreError::ConfigParse(parse_error)) => {
            show_config_parse_error_dialog(&parse_error, &SongscapeConfig::config_path());
            std::process::exit(1);
        }
        Err(e) => {
            error!("{e}");
            show_generic_error_dialog(&e.to_string());
            std::process::exit(1);
        }
    };

    // Create tokio runtime for background tasks
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    // Credential gate over the config file and ambient environment. A missing
    // key is not fatal here: the UI prompts for selection before generating.
    let ambient = Arc::new(AmbientCredential::new(&config));
    let api_key = ambient.api_key().unwrap_or_default().to_string();
    if ambient.api_key().is_none() {
        info!("No API key configured yet; generation stays disabled until one is selected");
    }
    let gate: Arc<dyn CredentialGate> = ambient;

    let timeout = (config.images.request_timeout_secs > 0)
        .then(|| Duration::from_secs(config.images.request_timeout_secs));
    let provider = match ImagenProvider::new(config.images.model.clone(), api_key, timeout) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("Failed to create Imagen provider: {e}");
            show_generic_error_dialog(&e.to_string());
            std::process::exit(1);
        }
    };

    // Initialize the controller owning all slideshow state
    let controller =
        SlideshowController::new(provider, Arc::clone(&gate), config.images.slide_count);

    // Create shared cancellation token for graceful shutdown
    let cancel_token = CancellationToken::new();

    // Set up Ctrl+C handler to trigger graceful shutdown
    let ctrlc_token = cancel_token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down gracefully...");
        ctrlc_token.cancel();
    }) {
        error!("Failed to set Ctrl+C handler: {e}");
    }

    // Create the presentation player with cancellation token
    let player = Arc::new(SlideshowPlayer::new(
        Arc::clone(&controller),
        Duration::from_millis(config.slideshow.interval_ms),
        Some(cancel_token.clone()),
    ));

    // Spawn background tasks
    runtime.spawn(start_player(Arc::clone(&player)));
    runtime.spawn(log_slideshow_events(Arc::clone(&controller)));

    // Configure the main window
    let window = WindowBuilder::new()
        .with_title(APP_NAME)
        .with_resizable(true)
        .with_inner_size(LogicalSize::new(1100.0, 820.0));

    let dioxus_config = dioxus::desktop::Config::default()
        .with_window(window)
        .with_disable_context_menu(true);

    // Launch Dioxus application
    // Use with_context to inject the controller, player, credential gate, and
    // cancellation token before launch
    dioxus::LaunchBuilder::desktop()
        .with_cfg(dioxus_config)
        .with_context(controller)
        .with_context(player)
        .with_context(gate)
        .with_context(cancel_token)
        .launch(root);
}

/// Root component that sets up context and renders the app
fn root() -> Element {
    // The gate answers synchronously, so the initial credential flag is known
    // before first render
    let gate: Arc<dyn CredentialGate> = use_context();
    let view = use_context_provider(|| SlideshowViewState::new(gate.has_selected_credential()));

    let controller: Arc<SlideshowController> = use_context();
    let player: Arc<SlideshowPlayer> = use_context();

    // Bridge controller and player events to Dioxus signals
    use_slideshow_bridge(&controller, &player, view);

    rsx! {
        document::Title { "{APP_NAME}" }
        document::Style { {include_str!("../assets/style.css")} }
        App {}
    }
}

/// Run the presentation player until shutdown
async fn start_player(player: Arc<SlideshowPlayer>) {
    info!("Starting slideshow player...");
    let handle = player.start();
    let _ = handle.await;
}

/// Log all controller events to the console
async fn log_slideshow_events(controller: Arc<SlideshowController>) {
    let mut rx = controller.subscribe();

    loop {
        match rx.recv().await {
            Ok(event) => match &event {
                SlideshowEvent::TrackSelected {
                    title, file_name, ..
                } => {
                    info!("Track selected: {file_name} (title: {title})");
                }
                SlideshowEvent::TrackCleared => {
                    info!("Track selection cleared");
                }
                SlideshowEvent::StyleChanged { style } => {
                    info!("Art style changed: {style}");
                }
                SlideshowEvent::CredentialSelected => {
                    info!("API key selection completed");
                }
                SlideshowEvent::CredentialRequired { message } => {
                    error!("API key rejected: {message}");
                }
                SlideshowEvent::GenerationStarted => {
                    info!("Slideshow generation started");
                }
                SlideshowEvent::SlideshowReady { images } => {
                    info!("Slideshow ready: {} image(s)", images.len());
                }
                SlideshowEvent::GenerationFailed { message } => {
                    error!("Slideshow generation failed: {message}");
                }
                SlideshowEvent::Error { message } => {
                    error!("Error: {message}");
                }
            },
            Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                info!("Controller event channel closed");
                break;
            }
            Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                info!("Missed {n} controller events");
            }
        }
    }
}

/// Show dialog when config is newly created
fn show_new_config_dialog(config_path: &Path) {
    let message = "A configuration file has been created.\n\n\
        Please edit it with your Gemini API key:\n\
        \u{2022} images.api_key\n\n\
        Alternatively, set the GEMINI_API_KEY environment variable.";

    let result = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Songscape - Configuration Created")
        .set_description(message)
        .set_buttons(MessageButtons::OkCancelCustom(
            "Open Config".into(),
            "Exit".into(),
        ))
        .show();

    if matches!(result, MessageDialogResult::Custom(ref s) if s == "Open Config") {
        if let Err(e) = open::that(config_path) {
            error!("Failed to open config file: {e}");
        }
    }
}

/// Show dialog when config file has TOML parsing errors
fn show_config_parse_error_dialog(parse_error: &TomlParseError, config_path: &Path) {
    let message = format!(
        "Your configuration file has a syntax error and cannot be loaded.\n\n\
        Error: {parse_error}\n\n\
        Please open the config file and fix the syntax error."
    );

    let result = MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Songscape - Configuration Error")
        .set_description(&message)
        .set_buttons(MessageButtons::OkCancelCustom(
            "Open Config".into(),
            "Exit".into(),
        ))
        .show();

    if matches!(result, MessageDialogResult::Custom(ref s) if s == "Open Config") {
        if let Err(e) = open::that(config_path) {
            error!("Failed to open config file: {e}");
        }
    }
}

/// Show a generic error dialog for unexpected errors
fn show_generic_error_dialog(error_message: &str) {
    let message = format!(
        "An unexpected error occurred:\n\n{error_message}\n\n\
        Please check your configuration file or report this issue."
    );

    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Songscape - Error")
        .set_description(&message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Check if file logging is enabled by reading the config file.
/// This is done before full config loading to set up tracing first.
/// Returns `false` if config doesn't exist or can't be parsed.
fn check_file_logging_enabled() -> bool {
    // Minimal structs to parse just the logging.enabled field
    #[derive(serde::Deserialize)]
    struct PartialConfig {
        #[serde(default)]
        logging: PartialLoggingConfig,
    }
    #[derive(serde::Deserialize, Default)]
    struct PartialLoggingConfig {
        #[serde(default)]
        enabled: bool,
    }

    let config_path = SongscapeConfig::config_path();
    let Ok(content) = std::fs::read_to_string(&config_path) else {
        return false;
    };

    toml::from_str::<PartialConfig>(&content)
        .map(|c| c.logging.enabled)
        .unwrap_or(false)
}

/// Initialize tracing with console output and optional file logging
fn init_tracing(file_logging_enabled: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer();

    if file_logging_enabled {
        let log_path = songscape_core::log_file_path();

        // Create the config directory if needed
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
