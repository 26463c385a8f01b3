//! Animated speech presenter.
//!
//! Loads a plain-text speech, splits it into sentences and replays randomly
//! sampled excerpts on a timed cadence until stopped.
//!
//! * [`config`]: TOML settings and platform paths.
//! * [`source`]: where the speech text comes from (HTTP, file, inline).
//! * [`text`]: sentence segmentation and stanza sampling.
//! * [`playback`]: the cancellable playback loop and its start/stop surface.

pub mod config;
pub mod playback;
pub mod source;
pub mod text;
