//! Builds the text of every [`DisplayEvent`] from [`ScriptConfig`].

use crate::config::ScriptConfig;

use super::event::{Category, DisplayEvent};

/// Formats headers, stanzas and closings for a given cycle.
///
/// # Example
/// ```rust
/// use speech_replay::config::ScriptConfig;
/// use speech_replay::playback::Script;
///
/// let script = Script::new(ScriptConfig::default(), 3);
/// assert_eq!(script.closing(5).text, "Thank you!!!");
/// ```
#[derive(Debug, Clone)]
pub struct Script {
    config: ScriptConfig,
    max_exclamations: usize,
}

impl Script {
    pub fn new(config: ScriptConfig, max_exclamations: usize) -> Self {
        Self {
            config,
            max_exclamations,
        }
    }

    /// `!` repeated once per cycle, capped at `max_exclamations`.
    pub fn exclamations(&self, cycle: u64) -> String {
        let count = usize::try_from(cycle)
            .unwrap_or(usize::MAX)
            .min(self.max_exclamations);
        "!".repeat(count)
    }

    pub fn header(&self, cycle: u64) -> DisplayEvent {
        let text = self.config.header_template.replace("{n}", &cycle.to_string());
        DisplayEvent::new(Category::SectionHeader, text)
    }

    pub fn body(&self) -> DisplayEvent {
        DisplayEvent::new(Category::BodyText, self.config.body_text.clone())
    }

    /// Greeting line, blank line, then the sampled sentences.
    pub fn stanza(&self, cycle: u64, sentences: &[&str]) -> DisplayEvent {
        let text = format!(
            "{}{}\n\n{}",
            self.config.stanza_greeting,
            self.exclamations(cycle),
            sentences.join(self.config.separator.as_str())
        );
        DisplayEvent::new(Category::Stanza, text)
    }

    pub fn closing(&self, cycle: u64) -> DisplayEvent {
        let text = format!("{}{}", self.config.closing_text, self.exclamations(cycle));
        DisplayEvent::new(Category::Closing, text)
    }

    pub fn started(&self) -> DisplayEvent {
        DisplayEvent::new(Category::System, self.config.started_message.clone())
    }

    pub fn stopped(&self) -> DisplayEvent {
        DisplayEvent::new(Category::System, self.config.stopped_message.clone())
    }

    pub fn error(&self, message: impl Into<String>) -> DisplayEvent {
        DisplayEvent::new(Category::Error, message)
    }
}
