//! Slideshow presentation loop.

use crate::controller::{SlideshowController, SlideshowEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const LOG_TARGET: &str = "songscape::player";

/// Events emitted by the slideshow player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A new slide became current (including the first one of a fresh cycle).
    SlideChanged { index: usize, total: usize },
    /// The slideshow has no images to show.
    Emptied,
}

/// A running image cycle: the interval is the timer resource, dropped and
/// recreated whenever the image sequence changes.
struct SlideCycle {
    interval: Interval,
    index: usize,
    total: usize,
}

/// Advances the current slide on a fixed interval, wrapping after the last
/// image, forever.
///
/// The player listens for controller events: a ready slideshow (re)starts the
/// cycle at index 0, while a new selection or a fresh generation stops it.
/// Audio playback is driven independently by the presentation layer's audio
/// element and never blocks the image cycle.
pub struct SlideshowPlayer {
    controller: Arc<SlideshowController>,
    interval: Duration,
    event_tx: tokio::sync::broadcast::Sender<PlayerEvent>,
    cancel_token: CancellationToken,
}

impl SlideshowPlayer {
    /// Create a player advancing every `interval`.
    ///
    /// # Arguments
    /// * `controller` - Controller whose events drive cycle transitions
    /// * `interval` - Time each slide stays current
    /// * `cancel_token` - Optional external cancellation token for graceful shutdown
    #[must_use]
    pub fn new(
        controller: Arc<SlideshowController>,
        interval: Duration,
        cancel_token: Option<CancellationToken>,
    ) -> Self {
        let (event_tx, _) = tokio::sync::broadcast::channel(64);
        Self {
            controller,
            interval,
            event_tx,
            cancel_token: cancel_token.unwrap_or_default(),
        }
    }

    /// Subscribe to player events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<PlayerEvent> {
        self.event_tx.subscribe()
    }

    /// Get a clone of the cancellation token.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Start the presentation loop in a background task.
    #[must_use]
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Run the presentation loop.
    async fn run(&self) {
        info!(target: LOG_TARGET, "Starting slideshow player (interval: {:?})", self.interval);

        let mut rx = self.controller.subscribe();
        let mut cycle: Option<SlideCycle> = None;

        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!(target: LOG_TARGET, "Slideshow player shutting down");
                    break;
                }
                event = rx.recv() => {
                    match event {
                        Ok(event) => self.handle_event(&event, &mut cycle),
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                            debug!(target: LOG_TARGET, "Missed {n} controller events");
                        }
                    }
                }
                () = Self::next_tick(cycle.as_mut()) => {
                    if let Some(c) = cycle.as_mut() {
                        c.index = (c.index + 1) % c.total;
                        debug!(target: LOG_TARGET, "Advanced to slide {} of {}", c.index + 1, c.total);
                        let _ = self.event_tx.send(PlayerEvent::SlideChanged {
                            index: c.index,
                            total: c.total,
                        });
                    }
                }
            }
        }
    }

    /// Await the next timer tick, or forever when no cycle is running.
    async fn next_tick(cycle: Option<&mut SlideCycle>) {
        match cycle {
            Some(c) => {
                c.interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }

    fn handle_event(&self, event: &SlideshowEvent, cycle: &mut Option<SlideCycle>) {
        match event {
            SlideshowEvent::SlideshowReady { images } => {
                self.restart(cycle, images.len());
            }
            // A new selection or a fresh generation clears the images.
            SlideshowEvent::TrackSelected { .. }
            | SlideshowEvent::TrackCleared
            | SlideshowEvent::GenerationStarted => {
                self.stop(cycle);
            }
            _ => {}
        }
    }

    /// Restart the cycle at index 0 with a fresh timer, or stop it when the
    /// new sequence is empty.
    fn restart(&self, cycle: &mut Option<SlideCycle>, total: usize) {
        if total == 0 {
            self.stop(cycle);
            return;
        }

        // First advance happens a full period after the restart.
        let mut interval = interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        *cycle = Some(SlideCycle {
            interval,
            index: 0,
            total,
        });

        info!(target: LOG_TARGET, "Slideshow restarted with {total} slide(s)");
        let _ = self
            .event_tx
            .send(PlayerEvent::SlideChanged { index: 0, total });
    }

    fn stop(&self, cycle: &mut Option<SlideCycle>) {
        if cycle.take().is_some() {
            debug!(target: LOG_TARGET, "Slideshow stopped");
        }
        let _ = self.event_tx.send(PlayerEvent::Emptied);
    }
}
