//! Speech text sources.
//!
//! This module provides:
//! * [`TextSource`]: async trait implemented by every source backend.
//! * [`HttpSource`]: fetches the text over HTTP(S) with `reqwest`.
//! * [`FileSource`]: reads a local file with `tokio::fs`.
//! * [`InlineSource`]: fixed in-memory text (tests, embedding hosts).
//! * [`SourceError`]: error variants for loading.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use speech_replay::config::AppConfig;
//! use speech_replay::source;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let source = source::from_config(&config.source);
//!     let text = source.load().await.unwrap();
//!     println!("{} bytes", text.len());
//! }
//! ```

pub mod file;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SourceConfig;

pub use file::FileSource;
pub use http::HttpSource;

// ---------------------------------------------------------------------------
// SourceError
// ---------------------------------------------------------------------------

/// Errors that can occur while obtaining the speech text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The server answered with a non-success status code.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// HTTP transport or connection error.
    #[error("request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The file could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Timeout
        } else if let Some(status) = e.status() {
            SourceError::Status(status.as_u16())
        } else {
            SourceError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// TextSource trait
// ---------------------------------------------------------------------------

/// Async provider of the raw speech text.
///
/// Implementors must be `Send + Sync` so a single source can be shared by
/// successive sessions behind an `Arc<dyn TextSource>`.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn load(&self) -> Result<String, SourceError>;
}

// ---------------------------------------------------------------------------
// InlineSource
// ---------------------------------------------------------------------------

/// A source whose text is already in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    text: String,
}

impl InlineSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextSource for InlineSource {
    async fn load(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }
}

// ---------------------------------------------------------------------------
// from_config
// ---------------------------------------------------------------------------

/// Build the source described by `config`.
///
/// `http://` and `https://` locations are fetched with [`HttpSource`];
/// anything else is treated as a file path.
pub fn from_config(config: &SourceConfig) -> Arc<dyn TextSource> {
    let location = config.location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        log::debug!("source: fetching speech text from {location}");
        Arc::new(HttpSource::from_config(config))
    } else {
        log::debug!("source: reading speech text from file {location}");
        Arc::new(FileSource::new(location))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
