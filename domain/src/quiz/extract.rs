//! Splitting recognized screenshot text into a question and its options.
//!
//! OCR output of a multiple-choice screenshot usually reads like
//! `1. Who created C? a) Steve Jobs b) James Gosling c) Dennis Ritchie`.
//! The question ends at the first `?`; options are introduced by
//! consecutive letter markers (`a)`, `(b)`, `C.`) starting at `a`.

use super::option_set::{MAX_OPTIONS, OptionSet};

/// Question text and options recovered from free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedQuestion {
    pub question: String,
    pub options: OptionSet,
}

/// Split recognized text into question and options.
///
/// Without a `?` the whole text is the question and there are no options.
/// Markers must appear in order (`a`, `b`, `c`, ...) at the start of a word;
/// scanning stops at the first missing letter.
pub fn split_question_and_options(raw_text: &str) -> ExtractedQuestion {
    let text = raw_text.replace(['\n', '\r'], " ");

    let (question, rest) = match text.find('?') {
        Some(idx) => (format!("{}?", text[..idx].trim()), &text[idx + 1..]),
        None => (text.trim().to_string(), ""),
    };

    let bytes = rest.as_bytes();
    let mut markers: Vec<(usize, usize)> = Vec::new();
    let mut cursor = 0;
    for letter in (b'a'..=b'z').take(MAX_OPTIONS) {
        match find_marker(bytes, cursor, letter) {
            Some((start, end)) => {
                markers.push((start, end));
                cursor = end;
            }
            None => break,
        }
    }

    let mut options = Vec::new();
    for (i, &(_, body_start)) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map_or(rest.len(), |&(next, _)| next);
        let body = rest[body_start..body_end].trim();
        if !body.is_empty() {
            options.push(body.to_string());
        }
    }

    ExtractedQuestion {
        question,
        options: OptionSet::from_vec_unchecked(options),
    }
}

/// Find the first `letter` marker at or after `from`.
///
/// Returns `(marker_start, body_start)`. All marker bytes are ASCII, so both
/// offsets are valid char boundaries.
fn find_marker(bytes: &[u8], from: usize, letter: u8) -> Option<(usize, usize)> {
    (from..bytes.len()).find_map(|i| {
        let at_word_start = i == 0 || bytes[i - 1].is_ascii_whitespace();
        if !at_word_start {
            return None;
        }
        marker_len(&bytes[i..], letter).map(|len| (i, i + len))
    })
}

fn marker_len(s: &[u8], letter: u8) -> Option<usize> {
    let is_letter = |b: &u8| b.to_ascii_lowercase() == letter;
    match s {
        [b'(', l, b')', ..] if is_letter(l) => Some(3),
        [l, b')', ..] if is_letter(l) => Some(2),
        [l, b'.'] if is_letter(l) => Some(2),
        [l, b'.', next, ..] if is_letter(l) && next.is_ascii_whitespace() => Some(2),
        _ => None,
    }
}
