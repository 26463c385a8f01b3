//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to each new
//! playback session.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::AppPaths;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Invalid combinations of settings, reported by [`AppConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A stanza must contain at least one sentence.
    #[error("playback.min_sentences must be at least 1")]
    ZeroMinSentences,

    /// The stanza size range is inverted.
    #[error("playback.min_sentences ({min}) is greater than playback.max_sentences ({max})")]
    InvertedSentenceRange { min: usize, max: usize },

    /// A cycle must contain at least one stanza.
    #[error("playback.stanzas_per_cycle must be at least 1")]
    ZeroStanzas,

    /// `max_cycles = 0` would never play anything.
    #[error("playback.max_cycles must be at least 1 when set")]
    ZeroMaxCycles,

    /// The source location is blank.
    #[error("source.location must not be empty")]
    EmptySourceLocation,
}

// ---------------------------------------------------------------------------
// SourceConfig
// ---------------------------------------------------------------------------

/// Where the speech text comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// `http://` / `https://` URL, or a path to a local text file.
    pub location: String,
    /// Maximum seconds to wait for an HTTP response.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: "speech.txt".into(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Cadence and sampling parameters of the playback loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Pause after the section header.
    pub header_delay_ms: u64,
    /// Pause after the fixed body paragraph.
    pub body_delay_ms: u64,
    /// Pause after each sampled stanza.
    pub stanza_delay_ms: u64,
    /// Longer pause after the closing line, before the next cycle.
    pub closing_delay_ms: u64,
    /// Number of sampled stanzas per cycle.
    pub stanzas_per_cycle: usize,
    /// Fewest sentences in one stanza.
    pub min_sentences: usize,
    /// Most sentences in one stanza (clamped to the document length).
    pub max_sentences: usize,
    /// Value of the cycle counter for the first cycle of a session.
    pub cycle_base: u64,
    /// Stop on its own after this many cycles. `None` runs until stopped.
    pub max_cycles: Option<u64>,
    /// Upper bound on the number of `!` appended to greetings and closings.
    pub max_exclamations: usize,
    /// Fixed RNG seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            header_delay_ms: 3_000,
            body_delay_ms: 3_000,
            stanza_delay_ms: 3_000,
            closing_delay_ms: 5_000,
            stanzas_per_cycle: 5,
            min_sentences: 1,
            max_sentences: 8,
            cycle_base: 1,
            max_cycles: None,
            max_exclamations: 10,
            seed: None,
        }
    }
}

impl PlaybackConfig {
    pub fn header_delay(&self) -> Duration {
        Duration::from_millis(self.header_delay_ms)
    }

    pub fn body_delay(&self) -> Duration {
        Duration::from_millis(self.body_delay_ms)
    }

    pub fn stanza_delay(&self) -> Duration {
        Duration::from_millis(self.stanza_delay_ms)
    }

    pub fn closing_delay(&self) -> Duration {
        Duration::from_millis(self.closing_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// ScriptConfig
// ---------------------------------------------------------------------------

/// The fixed wording that frames the sampled stanzas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Section header; `{n}` is replaced with the cycle counter.
    pub header_template: String,
    /// Paragraph shown after every header.
    pub body_text: String,
    /// Opening words of every stanza, followed by the exclamation suffix.
    pub stanza_greeting: String,
    /// Closing line of every cycle, followed by the exclamation suffix.
    pub closing_text: String,
    /// Joins the sampled sentences of one stanza.
    pub separator: String,
    /// System message emitted when a session starts.
    pub started_message: String,
    /// System message emitted when a session ends.
    pub stopped_message: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            header_template: "*** SECTION {n} ***".into(),
            body_text: "I was elected at this session to continue to serve as the president \
                        of the People's Republic of China (PRC). I would like to express my \
                        heartfelt gratitude for the trust placed in me by all the deputies and \
                        the Chinese people of all ethnic groups."
                .into(),
            stanza_greeting: "Fellow deputies".into(),
            closing_text: "Thank you".into(),
            separator: " ".into(),
            started_message: "--- STARTING SPEECH GENERATOR ---".into(),
            stopped_message: "--- SPEECH STOPPED ---".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use speech_replay::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Speech text location.
    pub source: SourceConfig,
    /// Loop cadence and sampling.
    pub playback: PlaybackConfig,
    /// Fixed wording.
    pub script: ScriptConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the playback loop cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pb = &self.playback;
        if pb.min_sentences == 0 {
            return Err(ConfigError::ZeroMinSentences);
        }
        if pb.min_sentences > pb.max_sentences {
            return Err(ConfigError::InvertedSentenceRange {
                min: pb.min_sentences,
                max: pb.max_sentences,
            });
        }
        if pb.stanzas_per_cycle == 0 {
            return Err(ConfigError::ZeroStanzas);
        }
        if pb.max_cycles == Some(0) {
            return Err(ConfigError::ZeroMaxCycles);
        }
        if self.source.location.trim().is_empty() {
            return Err(ConfigError::EmptySourceLocation);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.source.location, default.source.location);
        assert_eq!(config.playback.stanzas_per_cycle, default.playback.stanzas_per_cycle);
        assert_eq!(config.script.closing_text, default.script.closing_text);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.source.location, "speech.txt");
        assert_eq!(cfg.playback.header_delay_ms, 3_000);
        assert_eq!(cfg.playback.closing_delay_ms, 5_000);
        assert_eq!(cfg.playback.stanzas_per_cycle, 5);
        assert_eq!(cfg.playback.min_sentences, 1);
        assert_eq!(cfg.playback.max_sentences, 8);
        assert_eq!(cfg.playback.cycle_base, 1);
        assert!(cfg.playback.max_cycles.is_none());
        assert_eq!(cfg.script.header_template, "*** SECTION {n} ***");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.source.location = "https://example.com/speech.txt".into();
        cfg.playback.stanzas_per_cycle = 4;
        cfg.playback.max_cycles = Some(2);
        cfg.playback.seed = Some(42);
        cfg.script.closing_text = "Merci".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.source.location, "https://example.com/speech.txt");
        assert_eq!(loaded.playback.stanzas_per_cycle, 4);
        assert_eq!(loaded.playback.max_cycles, Some(2));
        assert_eq!(loaded.playback.seed, Some(42));
        assert_eq!(loaded.script.closing_text, "Merci");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "playback = 3").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let mut cfg = AppConfig::default();
        cfg.playback.min_sentences = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMinSentences));

        let mut cfg = AppConfig::default();
        cfg.playback.min_sentences = 5;
        cfg.playback.max_sentences = 2;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvertedSentenceRange { min: 5, max: 2 })
        );

        let mut cfg = AppConfig::default();
        cfg.playback.stanzas_per_cycle = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroStanzas));

        let mut cfg = AppConfig::default();
        cfg.playback.max_cycles = Some(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxCycles));

        let mut cfg = AppConfig::default();
        cfg.source.location = "  ".into();
        assert_eq!(cfg.validate(), Err(ConfigError::EmptySourceLocation));
    }

    #[test]
    fn delays_convert_to_durations() {
        let pb = PlaybackConfig::default();
        assert_eq!(pb.header_delay(), Duration::from_secs(3));
        assert_eq!(pb.closing_delay(), Duration::from_secs(5));
    }
}
