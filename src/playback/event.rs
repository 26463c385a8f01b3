//! Events delivered from a playback session to the host.

use std::fmt;

/// Rendering category of a [`DisplayEvent`].
///
/// Hosts map each category to a style (CSS class, terminal colour, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `*** SECTION n ***` divider.
    SectionHeader,
    /// The fixed paragraph after each header.
    BodyText,
    /// Greeting plus randomly sampled sentences.
    Stanza,
    /// End-of-cycle line.
    Closing,
    /// Session started / stopped notices.
    System,
    /// Source load or segmentation failure.
    Error,
}

impl Category {
    /// Stable kebab-case name, usable as a style class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SectionHeader => "section-header",
            Category::BodyText => "body-text",
            Category::Stanza => "sampled-stanza",
            Category::Closing => "closing-text",
            Category::System => "system-message",
            Category::Error => "error-message",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of output text.  The core keeps no copy after sending it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEvent {
    pub text: String,
    pub category: Category,
}

impl DisplayEvent {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// Messages on the session output channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A new session started; discard previously rendered output.
    Cleared,
    /// The session state changed (status indicator).
    StateChanged(super::PlaybackState),
    /// Text to render.
    Display(DisplayEvent),
}

impl PlaybackEvent {
    /// The display payload, if this is a [`PlaybackEvent::Display`].
    pub fn as_display(&self) -> Option<&DisplayEvent> {
        match self {
            PlaybackEvent::Display(event) => Some(event),
            _ => None,
        }
    }
}
