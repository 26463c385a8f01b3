//! Random stanza sampling.
//!
//! [`sample`] shuffles a copy of the sentence references and keeps the first
//! `k`, so every stanza holds distinct sentences in a random order.  It only
//! needs to look varied; the RNG is not required to be cryptographic.

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw between `min_k` and `max_k` distinct sentences from `sentences`.
///
/// Both bounds are clamped to `sentences.len()` and `min_k` is raised to 1,
/// so the call never fails.  An empty list yields an empty stanza, which
/// callers treat as "nothing to display".
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use speech_replay::text::sample;
///
/// let sentences = vec!["A.".to_string(), "B.".to_string(), "C.".to_string()];
/// let mut rng = StdRng::seed_from_u64(1);
/// let picked = sample(&sentences, 1, 1, &mut rng);
/// assert_eq!(picked.len(), 1);
/// ```
pub fn sample<'a, R>(sentences: &'a [String], min_k: usize, max_k: usize, rng: &mut R) -> Vec<&'a str>
where
    R: Rng + ?Sized,
{
    if sentences.is_empty() {
        return Vec::new();
    }

    let max_k = max_k.clamp(1, sentences.len());
    let min_k = min_k.clamp(1, max_k);
    let k = rng.random_range(min_k..=max_k);

    let mut picked: Vec<&str> = sentences.iter().map(String::as_str).collect();
    picked.shuffle(rng);
    picked.truncate(k);
    picked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
