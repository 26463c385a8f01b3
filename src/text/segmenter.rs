//! Sentence segmentation.
//!
//! The document is cut right after every `.`, `!` or `?` that is followed by
//! whitespace.  The cut keeps the terminator run as its own fragment, which is
//! then glued back onto the sentence before it, so each [`SentenceList`]
//! entry ends with its own punctuation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Terminator followed by at least one whitespace character.
static BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

// ---------------------------------------------------------------------------
// SegmentError
// ---------------------------------------------------------------------------

/// Reasons a document cannot be turned into a [`SentenceList`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// The document is empty or whitespace only.
    #[error("speech text is empty")]
    EmptyInput,

    /// The document contains only punctuation and whitespace.
    #[error("speech text contains no sentences")]
    NoSentences,
}

// ---------------------------------------------------------------------------
// SentenceList
// ---------------------------------------------------------------------------

/// Ordered, immutable list of trimmed, non-empty sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceList(Vec<String>);

impl SentenceList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a SentenceList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// segment
// ---------------------------------------------------------------------------

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split `raw` into sentences, in document order.
///
/// ```
/// use speech_replay::text::segment;
///
/// let list = segment("A cat sat. A dog ran! Did it jump?").unwrap();
/// assert_eq!(list.as_slice(), ["A cat sat.", "A dog ran!", "Did it jump?"]);
/// ```
///
/// # Errors
///
/// - [`SegmentError::EmptyInput`] when `raw` is blank.
/// - [`SegmentError::NoSentences`] when nothing but punctuation remains.
pub fn segment(raw: &str) -> Result<SentenceList, SegmentError> {
    if raw.trim().is_empty() {
        return Err(SegmentError::EmptyInput);
    }

    let mut sentences: Vec<String> = Vec::new();

    for fragment in fragments(raw) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        if fragment.chars().all(is_terminator) {
            // Separator split off by the boundary scan: reattach it.
            if let Some(last) = sentences.last_mut() {
                last.push_str(fragment);
            }
        } else {
            sentences.push(fragment.to_string());
        }
    }

    if sentences.is_empty() {
        return Err(SegmentError::NoSentences);
    }

    Ok(SentenceList(sentences))
}

/// Alternating content / separator slices covering all of `raw`.
fn fragments(raw: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for m in BOUNDARY.find_iter(raw) {
        out.push(&raw[cursor..m.start()]);
        out.push(m.as_str());
        cursor = m.end();
    }
    out.push(&raw[cursor..]);

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_all_three_terminators() {
        let list = segment("A cat sat. A dog ran! Did it jump?").unwrap();
        assert_eq!(list.as_slice(), ["A cat sat.", "A dog ran!", "Did it jump?"]);
    }

    #[test]
    fn every_sentence_ends_with_a_terminator() {
        let raw = "One.  Two!\nThree?\t\tFour.\n\nFive!";
        let list = segment(raw).unwrap();

        assert_eq!(list.len(), 5);
        for s in &list {
            assert!(!s.trim().is_empty());
            assert!(s.ends_with(is_terminator), "{s:?}");
        }
    }

    #[test]
    fn rejoined_sentences_reconstruct_trimmed_input() {
        let raw = "  First one. Second one! Third one?  ";
        let list = segment(raw).unwrap();
        assert_eq!(list.as_slice().join(" "), raw.trim());
    }

    #[test]
    fn original_separators_reconstruct_trimmed_input() {
        let raw = "\n One.  Two!\n\nThree?\t Four. \r\n";
        let list = segment(raw).unwrap();
        let separators: Vec<&str> = BOUNDARY
            .find_iter(raw.trim())
            .map(|m| &m.as_str()[1..])
            .collect();
        assert_eq!(separators, ["  ", "\n\n", "\t "]);

        let mut rebuilt = String::new();
        for (i, sentence) in list.as_slice().iter().enumerate() {
            rebuilt.push_str(sentence);
            if let Some(sep) = separators.get(i) {
                rebuilt.push_str(sep);
            }
        }
        assert_eq!(rebuilt, raw.trim());
    }

    #[test]
    fn ellipsis_stays_attached() {
        let list = segment("Wait... what happened? Nothing.").unwrap();
        assert_eq!(list.as_slice(), ["Wait...", "what happened?", "Nothing."]);
    }

    #[test]
    fn trailing_text_without_terminator_is_kept() {
        let list = segment("Done. And then").unwrap();
        assert_eq!(list.as_slice(), ["Done.", "And then"]);
    }

    #[test]
    fn terminator_without_whitespace_does_not_split() {
        let list = segment("Version 2.5 shipped. Great!").unwrap();
        assert_eq!(list.as_slice(), ["Version 2.5 shipped.", "Great!"]);
    }

    #[test]
    fn leading_punctuation_is_dropped() {
        let list = segment(". Hello there.").unwrap();
        assert_eq!(list.as_slice(), ["Hello there."]);
    }

    #[test]
    fn stray_punctuation_merges_into_previous_sentence() {
        let list = segment("Really. ? Yes.").unwrap();
        assert_eq!(list.as_slice(), ["Really.?", "Yes."]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(segment(""), Err(SegmentError::EmptyInput));
        assert_eq!(segment("  \n\t "), Err(SegmentError::EmptyInput));
    }

    #[test]
    fn punctuation_only_input_has_no_sentences() {
        assert_eq!(segment(". ! ? "), Err(SegmentError::NoSentences));
    }

    #[test]
    fn segmentation_is_deterministic() {
        let raw = "Alpha. Beta! Gamma? Delta.";
        assert_eq!(segment(raw).unwrap(), segment(raw).unwrap());
    }
}
