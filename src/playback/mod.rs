//! Playback module: the timed, cancellable speech loop.
//!
//! This module wires the source → segment → sample → display loop and
//! exposes the start/stop surface plus the shared status the host reads.
//!
//! # Architecture
//!
//! ```text
//! Presenter::start()
//!        │  status.begin(), watch::channel(false)
//!        ▼
//! PlaybackLoop::run()  ← tokio task, one per session
//!        │
//!        ├─ TextSource::load() → segment()
//!        ├─ header / body / stanza × N / closing, each followed by a pause
//!        └─ PlaybackEvent ──mpsc──▶ host renderer
//!
//! Presenter::stop() ── status = Stopped, stop_tx.send(true) ──▶ next checkpoint
//! SharedStatus (Arc<Mutex<SessionStatus>>) ←── read by the host
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use speech_replay::config::AppConfig;
//! use speech_replay::playback::{PlaybackEvent, Presenter};
//! use speech_replay::source;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let (tx, mut rx) = tokio::sync::mpsc::channel(64);
//!     let mut presenter = Presenter::new(config.clone(), source::from_config(&config.source), tx);
//!
//!     presenter.start();
//!     while let Some(event) = rx.recv().await {
//!         if let PlaybackEvent::Display(d) = event {
//!             println!("[{}] {}", d.category, d.text);
//!         }
//!     }
//! }
//! ```

pub mod event;
pub mod presenter;
pub mod runner;
pub mod script;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use event::{Category, DisplayEvent, PlaybackEvent};
pub use presenter::Presenter;
pub use runner::{PlaybackLoop, SessionError};
pub use script::Script;
pub use state::{new_shared_status, PlaybackState, SessionStatus, SharedStatus};
