//! Playback loop. Drives one session from source load to the final
//! "stopped" notice.
//!
//! # Session flow
//!
//! ```text
//! Cleared, StateChanged(Running), "started"
//!   └─▶ source.load() → segment()
//!         ├─ Err → Error event ─────────────────────────────┐
//!         └─ Ok  → loop {                                    │
//!                    header      ─pause─                     │
//!                    body        ─pause─                     │
//!                    stanza × N  ─pause─ (each)              │
//!                    closing     ─pause─                     │
//!                    cycle += 1; max_cycles? ─────────────────┤
//!                  }                                         │
//! "stopped", StateChanged(Stopped) ◀──────────────────────────┘
//! ```
//!
//! The source load and every pause race against the session's stop
//! channel, and the stop flag is checked again before each emission.  A stop therefore
//! suppresses everything except the terminal "stopped" notice.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::config::{AppConfig, PlaybackConfig};
use crate::source::{SourceError, TextSource};
use crate::text::{sample, segment, SegmentError, SentenceList};

use super::event::{DisplayEvent, PlaybackEvent};
use super::script::Script;
use super::state::{PlaybackState, SharedStatus};

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Failures that end a session before its first cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The speech text could not be obtained.
    #[error("Error loading speech text: {0}")]
    ResourceLoad(#[from] SourceError),

    /// The speech text produced no sentences.
    #[error("Error preparing speech text: {0}")]
    Segmentation(#[from] SegmentError),
}

/// The session must stop emitting: stop was requested or the host went away.
#[derive(Debug)]
struct Halted;

type Step = Result<(), Halted>;

// ---------------------------------------------------------------------------
// PlaybackLoop
// ---------------------------------------------------------------------------

/// One playback session.
///
/// Built by [`Presenter::start`](super::Presenter::start) and consumed by
/// [`run`](Self::run) inside a tokio task.
pub struct PlaybackLoop {
    config: PlaybackConfig,
    script: Script,
    source: Arc<dyn TextSource>,
    status: SharedStatus,
    events: mpsc::Sender<PlaybackEvent>,
    stop_rx: watch::Receiver<bool>,
    rng: StdRng,
    session: u64,
}

impl PlaybackLoop {
    /// Create a session.
    ///
    /// # Arguments
    ///
    /// * `config`: application config; only `playback` and `script` are read.
    /// * `source`: where the speech text comes from.
    /// * `status`: shared status, already marked `Running` by the caller.
    /// * `events`: output channel to the host.
    /// * `stop_rx`: flips to `true` when the host asks to stop.
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn TextSource>,
        status: SharedStatus,
        events: mpsc::Sender<PlaybackEvent>,
        stop_rx: watch::Receiver<bool>,
    ) -> Self {
        let rng = match config.playback.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let session = status.lock().session;

        Self {
            config: config.playback.clone(),
            script: Script::new(config.script.clone(), config.playback.max_exclamations),
            source,
            status,
            events,
            stop_rx,
            rng,
            session,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the session to completion.
    ///
    /// Returns when a stop is requested, when `max_cycles` is reached, when
    /// loading fails, or when the host drops its event receiver.
    pub async fn run(mut self) {
        log::info!("playback: session started");

        if self.announce().await.is_ok() {
            match self.prepare().await {
                Err(Halted) => log::debug!("playback: stopped while loading"),
                Ok(Ok(sentences)) => {
                    log::debug!("playback: {} sentences ready", sentences.len());
                    if self.cycles(&sentences).await.is_err() {
                        log::debug!("playback: halted");
                    }
                }
                Ok(Err(e)) => {
                    log::error!("playback: {e}");
                    {
                        let mut st = self.status.lock();
                        if st.session == self.session {
                            st.error_message = Some(e.to_string());
                        }
                    }
                    let _ = self.emit(self.script.error(e.to_string())).await;
                }
            }
        }

        self.finish().await;
    }

    /// Clear the host, flip its indicator and print the start notice.
    async fn announce(&mut self) -> Step {
        self.send(PlaybackEvent::Cleared).await?;
        self.send(PlaybackEvent::StateChanged(PlaybackState::Running))
            .await?;
        self.emit(self.script.started()).await
    }

    /// Load and segment the speech text.
    ///
    /// The load races the stop channel, so a slow source never holds up a
    /// stop request.
    async fn prepare(&mut self) -> Result<Result<SentenceList, SessionError>, Halted> {
        if self.stop_requested() {
            return Err(Halted);
        }

        let source = Arc::clone(&self.source);
        let loaded = tokio::select! {
            loaded = source.load() => loaded,
            // Either a stop was sent or the sender is gone.
            _ = self.stop_rx.changed() => return Err(Halted),
        };

        Ok(match loaded {
            Ok(raw) => segment(&raw).map_err(SessionError::from),
            Err(e) => Err(e.into()),
        })
    }

    async fn cycles(&mut self, sentences: &SentenceList) -> Step {
        loop {
            let cycle = self.status.lock().cycle;
            log::debug!("playback: cycle {cycle}");

            self.emit(self.script.header(cycle)).await?;
            self.pause(self.config.header_delay()).await?;

            self.emit(self.script.body()).await?;
            self.pause(self.config.body_delay()).await?;

            for _ in 0..self.config.stanzas_per_cycle {
                let picked = sample(
                    sentences.as_slice(),
                    self.config.min_sentences,
                    self.config.max_sentences,
                    &mut self.rng,
                );
                let stanza = self.script.stanza(cycle, &picked);
                self.emit(stanza).await?;
                self.pause(self.config.stanza_delay()).await?;
            }

            self.emit(self.script.closing(cycle)).await?;
            self.pause(self.config.closing_delay()).await?;

            let completed = {
                let mut st = self.status.lock();
                if st.session != self.session {
                    return Err(Halted);
                }
                st.advance();
                st.completed_cycles
            };

            if self.config.max_cycles.is_some_and(|max| completed >= max) {
                log::info!("playback: reached {completed} cycles");
                return Ok(());
            }
        }
    }

    /// Mark the session stopped and send the terminal notice.
    async fn finish(&mut self) {
        {
            let mut st = self.status.lock();
            if st.session == self.session {
                st.state = PlaybackState::Stopped;
            }
        }

        let _ = self.send(PlaybackEvent::Display(self.script.stopped())).await;
        let _ = self
            .send(PlaybackEvent::StateChanged(PlaybackState::Stopped))
            .await;

        log::info!("playback: session stopped");
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn stop_requested(&self) -> bool {
        *self.stop_rx.borrow()
    }

    /// Send a display event unless a stop is pending.
    async fn emit(&self, event: DisplayEvent) -> Step {
        if self.stop_requested() {
            return Err(Halted);
        }
        self.send(PlaybackEvent::Display(event)).await
    }

    async fn send(&self, event: PlaybackEvent) -> Step {
        self.events.send(event).await.map_err(|_| {
            log::debug!("playback: event receiver dropped");
            Halted
        })
    }

    /// Sleep for `delay`, waking early on a stop request.
    async fn pause(&mut self, delay: Duration) -> Step {
        if self.stop_requested() {
            return Err(Halted);
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            changed = self.stop_rx.changed() => {
                // Err means the presenter (and its stop sender) is gone.
                if changed.is_err() {
                    return Err(Halted);
                }
            }
        }

        if self.stop_requested() {
            Err(Halted)
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
