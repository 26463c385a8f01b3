//! Start/stop control surface for playback sessions.
//!
//! [`Presenter`] owns the [`SharedStatus`] and spawns one [`PlaybackLoop`]
//! task per session.  The host calls [`start`](Presenter::start) and
//! [`stop`](Presenter::stop) from its button handlers and reads
//! [`PlaybackEvent`]s from the channel it handed to [`Presenter::new`].
//!
//! # Policy
//!
//! * `start()` while a session is running is ignored.
//! * `stop()` is always safe; it does nothing unless a session is running.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::source::TextSource;

use super::event::PlaybackEvent;
use super::runner::PlaybackLoop;
use super::state::{new_shared_status, PlaybackState, SharedStatus};

/// A running (or just finished) session task.
struct Session {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Drives playback sessions on the current tokio runtime.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use speech_replay::config::AppConfig;
/// use speech_replay::playback::Presenter;
/// use speech_replay::source::InlineSource;
///
/// # async fn example() {
/// let (tx, mut rx) = tokio::sync::mpsc::channel(64);
/// let mut presenter = Presenter::new(
///     AppConfig::default(),
///     Arc::new(InlineSource::new("Hello. Goodbye!")),
///     tx,
/// );
///
/// presenter.start();
/// while let Some(event) = rx.recv().await {
///     println!("{event:?}");
/// }
/// # }
/// ```
pub struct Presenter {
    config: AppConfig,
    source: Arc<dyn TextSource>,
    status: SharedStatus,
    events: mpsc::Sender<PlaybackEvent>,
    session: Option<Session>,
}

impl Presenter {
    /// Create an idle presenter.
    ///
    /// # Arguments
    ///
    /// * `config`: application config, cloned into every session.
    /// * `source`: speech text source, reloaded on every start.
    /// * `events`: channel the host renders from.
    pub fn new(
        config: AppConfig,
        source: Arc<dyn TextSource>,
        events: mpsc::Sender<PlaybackEvent>,
    ) -> Self {
        let status = new_shared_status(config.playback.cycle_base);
        Self {
            config,
            source,
            status,
            events,
            session: None,
        }
    }

    /// Start a fresh session.
    ///
    /// Returns `false` (and changes nothing) when a session is already
    /// running.  Must be called from within a tokio runtime.
    pub fn start(&mut self) -> bool {
        {
            let mut st = self.status.lock();
            if st.state.is_running() {
                log::warn!("presenter: start ignored, a session is already running");
                return false;
            }
            st.begin(self.config.playback.cycle_base);
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let session = PlaybackLoop::new(
            &self.config,
            Arc::clone(&self.source),
            Arc::clone(&self.status),
            self.events.clone(),
            stop_rx,
        );
        // The previous task must finish before the new one clears the host
        // output, or its stopped notice lands inside the fresh session.
        let previous = self.session.take().map(|s| s.handle);
        let handle = tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    log::warn!("presenter: previous session task failed: {e}");
                }
            }
            session.run().await;
        });

        self.session = Some(Session { stop_tx, handle });
        true
    }

    /// Request the running session to stop.
    ///
    /// The state flips to `Stopped` immediately; the session task notices at
    /// its next checkpoint and sends the final "stopped" notice.
    pub fn stop(&mut self) {
        {
            let mut st = self.status.lock();
            if !st.state.is_running() {
                log::debug!("presenter: stop ignored, nothing is running");
                return;
            }
            st.state = PlaybackState::Stopped;
        }

        if let Some(session) = &self.session {
            session.stop_tx.send_replace(true);
        }
        log::info!("presenter: stop requested");
    }

    /// Wait for the current session task to finish.
    ///
    /// Returns immediately when no session was started.  Cancel-safe: if the
    /// returned future is dropped early, a later call keeps waiting on the
    /// same task.
    pub async fn wait(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if let Err(e) = (&mut session.handle).await {
                log::warn!("presenter: session task failed: {e}");
            }
            self.session = None;
        }
    }

    /// Current state of the latest session.
    pub fn state(&self) -> PlaybackState {
        self.status.lock().state
    }

    /// Shared status handle for hosts that poll.
    pub fn status(&self) -> SharedStatus {
        Arc::clone(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
