//! Recognising the unterminated start of a speaker label.
//!
//! A label is `<emoji>[U+FE0F]<gap><name><gap><separator>` where each gap is
//! at most [`LABEL_GAP_LIMIT`] whitespace characters. This is the same
//! grammar the combined pattern in [`super::LabelMatcher`] compiles, walked by
//! hand so a trailing fragment can be classified as a possible prefix.

use crate::speaker::Speaker;

/// Most whitespace characters tolerated between emoji, name and separator.
///
/// Bounds both the compiled pattern and the held-back window, so labels
/// with wider gaps are treated as body text whether or not they were split.
pub const LABEL_GAP_LIMIT: usize = 4;

pub const SEPARATORS: [char; 2] = [':', '：'];

pub const VARIATION_SELECTOR: char = '\u{FE0F}';

// Widest UTF-8 encodings of a whitespace character and of a separator.
const MAX_GAP_CHAR_BYTES: usize = 3;
const MAX_SEPARATOR_BYTES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// The text cannot start this label.
    Mismatch,
    /// The text is a proper prefix of some spelling of this label.
    Incomplete,
    /// The text starts with a full label, separator included.
    Complete,
}

/// The label grammar of one speaker.
#[derive(Debug, Clone)]
pub struct LabelShape {
    emoji: String,
    name: String,
}

#[derive(Clone, Copy)]
enum Part {
    Emoji,
    Selector,
    Gap,
    Name,
}

enum Step<'a> {
    Rest(&'a str),
    Incomplete,
    Mismatch,
}

impl LabelShape {
    pub fn new(speaker: &Speaker) -> Self {
        Self {
            emoji: speaker.emoji_base().to_string(),
            name: speaker.name.clone(),
        }
    }

    pub(crate) fn emoji(&self) -> &str {
        &self.emoji
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Upper bound in bytes of a label match, trailing whitespace excluded.
    pub fn max_len(&self) -> usize {
        self.emoji.len()
            + VARIATION_SELECTOR.len_utf8()
            + 2 * LABEL_GAP_LIMIT * MAX_GAP_CHAR_BYTES
            + self.name.len()
            + MAX_SEPARATOR_BYTES
    }

    pub fn classify(&self, text: &str) -> Prefix {
        let mut rest = text;

        for part in [Part::Emoji, Part::Selector, Part::Gap, Part::Name, Part::Gap] {
            let step = match part {
                Part::Emoji => literal(rest, &self.emoji),
                Part::Selector => variation_selector(rest),
                Part::Gap => gap(rest),
                Part::Name => literal(rest, &self.name),
            };
            match step {
                Step::Rest(r) => rest = r,
                Step::Incomplete => return Prefix::Incomplete,
                Step::Mismatch => return Prefix::Mismatch,
            }
        }

        match rest.chars().next() {
            None => Prefix::Incomplete,
            Some(c) if SEPARATORS.contains(&c) => Prefix::Complete,
            Some(_) => Prefix::Mismatch,
        }
    }
}

fn literal<'a>(text: &'a str, lit: &str) -> Step<'a> {
    match text.strip_prefix(lit) {
        Some(rest) => Step::Rest(rest),
        None if lit.starts_with(text) => Step::Incomplete,
        None => Step::Mismatch,
    }
}

fn variation_selector(text: &str) -> Step<'_> {
    if text.is_empty() {
        return Step::Incomplete;
    }
    Step::Rest(text.strip_prefix(VARIATION_SELECTOR).unwrap_or(text))
}

fn gap(text: &str) -> Step<'_> {
    for (n, (i, c)) in text.char_indices().enumerate() {
        if !c.is_whitespace() {
            return Step::Rest(&text[i..]);
        }
        if n + 1 > LABEL_GAP_LIMIT {
            return Step::Mismatch;
        }
    }
    Step::Incomplete
}

/// Byte offset where a possibly-unterminated label begins at the end of
/// `text`, or `None` when all of `text` is safe body text.
///
/// Only the last `max_len` bytes can hold an incomplete label, so earlier
/// positions are never inspected. The earliest candidate wins: anything
/// before it can no longer become part of a label.
pub fn partial_label_start(text: &str, shapes: &[LabelShape]) -> Option<usize> {
    let window = shapes.iter().map(LabelShape::max_len).max()?;

    let mut from = text.len().saturating_sub(window);
    while !text.is_char_boundary(from) {
        from += 1;
    }

    text[from..]
        .char_indices()
        .map(|(i, _)| from + i)
        .find(|&i| {
            shapes
                .iter()
                .any(|shape| shape.classify(&text[i..]) == Prefix::Incomplete)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(emoji: &str, name: &str) -> LabelShape {
        LabelShape::new(&Speaker::new("id", emoji, name))
    }

    fn panel() -> Vec<LabelShape> {
        vec![
            shape("🎙️", "유재석"),
            shape("😎", "침착맨"),
            shape("🚀", "일론 머스크"),
        ]
    }

    #[test]
    fn classify_walks_each_part() {
        let s = shape("🎙️", "유재석");

        assert_eq!(s.classify("🎙"), Prefix::Incomplete);
        assert_eq!(s.classify("🎙\u{FE0F}"), Prefix::Incomplete);
        assert_eq!(s.classify("🎙️ 유"), Prefix::Incomplete);
        assert_eq!(s.classify("🎙️ 유재석"), Prefix::Incomplete);
        assert_eq!(s.classify("🎙️ 유재석  "), Prefix::Incomplete);
        assert_eq!(s.classify("🎙️ 유재석:"), Prefix::Complete);
        assert_eq!(s.classify("🎙유재석："), Prefix::Complete);
        assert_eq!(s.classify("🎙️ 유재석이"), Prefix::Mismatch);
        assert_eq!(s.classify("🎙️ 박명수"), Prefix::Mismatch);
        assert_eq!(s.classify("안녕"), Prefix::Mismatch);
    }

    #[test]
    fn classify_bounds_gaps() {
        let s = shape("😎", "침착맨");

        assert_eq!(s.classify("😎    침착맨:"), Prefix::Complete);
        assert_eq!(s.classify("😎     침"), Prefix::Mismatch);
        assert_eq!(s.classify("😎 침착맨    "), Prefix::Incomplete);
        assert_eq!(s.classify("😎 침착맨     :"), Prefix::Mismatch);
    }

    #[test]
    fn classify_keeps_interior_name_spacing() {
        let s = shape("🚀", "일론 머스크");

        assert_eq!(s.classify("🚀 일론 "), Prefix::Incomplete);
        assert_eq!(s.classify("🚀 일론  머스크:"), Prefix::Mismatch);
        assert_eq!(s.classify("🚀 일론 머스크 ："), Prefix::Complete);
    }

    #[test]
    fn finds_trailing_partial() {
        let text = "좋은 질문이네요.\n\n😎 침착";
        let start = partial_label_start(text, &panel()).unwrap();
        assert_eq!(&text[start..], "😎 침착");
    }

    #[test]
    fn finds_partial_without_line_break() {
        let text = "그렇죠 🎙";
        let start = partial_label_start(text, &panel()).unwrap();
        assert_eq!(&text[start..], "🎙");
    }

    #[test]
    fn body_text_is_not_held() {
        assert_eq!(partial_label_start("그냥 평범한 문장", &panel()), None);
        assert_eq!(partial_label_start("😎 침착맨이 말했듯이", &panel()), None);
        assert_eq!(partial_label_start("", &panel()), None);
    }

    #[test]
    fn no_shapes_means_nothing_held() {
        assert_eq!(partial_label_start("🎙️ 유", &[]), None);
    }

    #[test]
    fn window_covers_the_longest_label() {
        let shapes = panel();
        let text = format!("{}🚀    일론 머스크    ", "가".repeat(100));
        let start = partial_label_start(&text, &shapes).unwrap();
        assert_eq!(&text[start..], "🚀    일론 머스크    ");
    }
}
