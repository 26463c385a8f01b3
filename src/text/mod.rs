//! Text processing: sentence segmentation and stanza sampling.
//!
//! ```text
//! raw text ──segment()──▶ SentenceList ──sample()──▶ stanza (Vec<&str>)
//! ```

pub mod sampler;
pub mod segmenter;

pub use sampler::sample;
pub use segmenter::{segment, SegmentError, SentenceList};
