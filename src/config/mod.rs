//! Configuration module for the speech presenter.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the text source,
//! the playback cadence and the script wording, `AppPaths` for the platform
//! config directory, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ConfigError, PlaybackConfig, ScriptConfig, SourceConfig};
