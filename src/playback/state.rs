//! Playback state machine and shared session status.
//!
//! [`PlaybackState`] drives the presenter's state machine.  The host reads it
//! via [`SharedStatus`] to render its status indicator and enable or disable
//! its start/stop controls.
//!
//! [`SharedStatus`] is a type alias for `Arc<Mutex<SessionStatus>>`, cheap to
//! clone and safe to share across threads.

use std::sync::Arc;

use parking_lot::Mutex;

// ---------------------------------------------------------------------------
// PlaybackState
// ---------------------------------------------------------------------------

/// States of a playback session.
///
/// ```text
/// Idle ──start()──▶ Running ──stop() / max_cycles / load error──▶ Stopped
/// Stopped ──start()──▶ Running   (fresh session, counter reset)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing has been started yet.
    Idle,

    /// A session is emitting events.
    Running,

    /// The last session ended, by request, by completion or by error.
    Stopped,
}

impl PlaybackState {
    /// Returns `true` while a session is active.
    ///
    /// ```
    /// use speech_replay::playback::PlaybackState;
    ///
    /// assert!(!PlaybackState::Idle.is_running());
    /// assert!(PlaybackState::Running.is_running());
    /// assert!(!PlaybackState::Stopped.is_running());
    /// ```
    pub fn is_running(&self) -> bool {
        matches!(self, PlaybackState::Running)
    }

    /// A short human-readable label for a status indicator.
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "Idle",
            PlaybackState::Running => "Generating...",
            PlaybackState::Stopped => "Stopped",
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Idle
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Status of the current (or last) session.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    /// Generation of the latest session.  A finished task only writes to the
    /// status while its generation is still the current one.
    pub session: u64,

    /// Current phase.
    pub state: PlaybackState,

    /// Cycle counter.  Starts at `playback.cycle_base` and only grows during
    /// a session.
    pub cycle: u64,

    /// Cycles that ran to the end in this session.
    pub completed_cycles: u64,

    /// Load or segmentation failure that ended the session, if any.
    pub error_message: Option<String>,
}

impl SessionStatus {
    pub fn new(cycle_base: u64) -> Self {
        Self {
            session: 0,
            state: PlaybackState::Idle,
            cycle: cycle_base,
            completed_cycles: 0,
            error_message: None,
        }
    }

    /// Reset for a fresh session and mark it running.
    /// Returns the new session generation.
    pub fn begin(&mut self, cycle_base: u64) -> u64 {
        let session = self.session + 1;
        *self = Self::new(cycle_base);
        self.session = session;
        self.state = PlaybackState::Running;
        session
    }

    /// Record a finished cycle.
    pub fn advance(&mut self) {
        self.cycle += 1;
        self.completed_cycles += 1;
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::new(1)
    }
}

// ---------------------------------------------------------------------------
// SharedStatus
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionStatus`].
///
/// Lock for a short critical section only; never hold the guard across an
/// `.await` point.
pub type SharedStatus = Arc<Mutex<SessionStatus>>;

/// Construct a new idle [`SharedStatus`].
pub fn new_shared_status(cycle_base: u64) -> SharedStatus {
    Arc::new(Mutex::new(SessionStatus::new(cycle_base)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(PlaybackState::default(), PlaybackState::Idle);
    }

    #[test]
    fn labels() {
        assert_eq!(PlaybackState::Idle.label(), "Idle");
        assert_eq!(PlaybackState::Running.label(), "Generating...");
        assert_eq!(PlaybackState::Stopped.label(), "Stopped");
    }

    #[test]
    fn begin_resets_previous_session() {
        let mut status = SessionStatus::new(1);
        status.begin(1);
        status.advance();
        status.advance();
        status.state = PlaybackState::Stopped;
        status.error_message = Some("boom".into());

        assert_eq!(status.begin(1), 2);
        assert_eq!(status.state, PlaybackState::Running);
        assert_eq!(status.cycle, 1);
        assert_eq!(status.completed_cycles, 0);
        assert!(status.error_message.is_none());
    }

    #[test]
    fn advance_increments_by_one() {
        let mut status = SessionStatus::new(7);
        status.advance();
        assert_eq!(status.cycle, 8);
        assert_eq!(status.completed_cycles, 1);
    }

    #[test]
    fn shared_status_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedStatus>();
    }

    #[test]
    fn shared_status_can_be_cloned_and_mutated() {
        let status = new_shared_status(1);
        let status2 = Arc::clone(&status);

        status.lock().state = PlaybackState::Running;
        assert_eq!(status2.lock().state, PlaybackState::Running);
    }
}
