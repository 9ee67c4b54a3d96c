mod partial;

use regex::Regex;

use crate::error::Result;
use crate::speaker::SpeakerRegistry;

pub use partial::{
    LABEL_GAP_LIMIT, LabelShape, Prefix, SEPARATORS, VARIATION_SELECTOR, partial_label_start,
};

/// A confirmed label occurrence. `end` includes the separator and any
/// whitespace after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatch<'m> {
    pub start: usize,
    pub end: usize,
    pub speaker_id: &'m str,
}

/// Recognises speaker labels in raw model output.
///
/// Built once from a [`SpeakerRegistry`]; cheap to share behind an `Arc`
/// across any number of concurrent streams.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    /// `None` for an empty registry.
    pattern: Option<Regex>,
    /// Speaker id per capture group, in alternation order.
    group_ids: Vec<String>,
    shapes: Vec<LabelShape>,
}

impl LabelMatcher {
    pub fn new(registry: &SpeakerRegistry) -> Result<Self> {
        let mut speakers: Vec<_> = registry.speakers().iter().collect();
        // Longest labels first so the alternation never settles on a shorter
        // label when a longer one also fits.
        speakers.sort_by_key(|s| std::cmp::Reverse(s.emoji_base().len() + s.name.len()));

        let shapes: Vec<_> = speakers.iter().map(|s| LabelShape::new(s)).collect();
        let alternatives: Vec<_> = shapes
            .iter()
            .map(|shape| format!("({})", label_pattern(shape)))
            .collect();

        let pattern = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"(?:{})\s*", alternatives.join("|")))?)
        };

        Ok(Self {
            pattern,
            group_ids: speakers.iter().map(|s| s.id.clone()).collect(),
            shapes,
        })
    }

    /// Non-overlapping label matches, left to right.
    pub fn find_iter<'m>(&'m self, text: &str) -> impl Iterator<Item = LabelMatch<'m>> {
        self.pattern
            .iter()
            .flat_map(move |pattern| pattern.captures_iter(text))
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let group = (1..caps.len()).find(|&i| caps.get(i).is_some())?;
                Some(LabelMatch {
                    start: whole.start(),
                    end: whole.end(),
                    speaker_id: self.group_ids.get(group - 1)?,
                })
            })
    }

    /// See [`partial_label_start`].
    pub fn partial_start(&self, text: &str) -> Option<usize> {
        partial_label_start(text, &self.shapes)
    }
}

fn label_pattern(shape: &LabelShape) -> String {
    let separators: String = SEPARATORS.iter().collect();
    format!(
        r"{emoji}\x{{FE0F}}?\s{{0,{gap}}}{name}\s{{0,{gap}}}[{separators}]",
        emoji = regex::escape(shape.emoji()),
        name = regex::escape(shape.name()),
        gap = LABEL_GAP_LIMIT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::panel_registry;
    use crate::speaker::Speaker;

    fn matcher() -> LabelMatcher {
        LabelMatcher::new(&panel_registry().unwrap()).unwrap()
    }

    fn ids<'m>(matches: &[LabelMatch<'m>]) -> Vec<&'m str> {
        matches.iter().map(|m| m.speaker_id).collect()
    }

    #[test]
    fn finds_every_label_in_order() {
        let m = matcher();
        let text = "🎙️ 유재석: 안녕하세요\n\n😎 침착맨: 반가워요\n\n⚽ 손흥민：좋아요";
        let found: Vec<_> = m.find_iter(text).collect();

        assert_eq!(ids(&found), ["yoo-jaesuk", "chimchakman", "son-heungmin"]);
        assert_eq!(found[0].start, 0);
        assert_eq!(&text[found[0].end..found[0].end + 3], "안");
    }

    #[test]
    fn match_swallows_trailing_whitespace() {
        let m = matcher();
        let text = "🚀 일론 머스크 :   \n왜 안 돼?";
        let found: Vec<_> = m.find_iter(text).collect();

        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].end..], "왜 안 돼?");
        assert_eq!(found[0].end - found[0].start, text.len() - "왜 안 돼?".len());
    }

    #[test]
    fn variation_selector_is_optional() {
        let m = matcher();
        let found: Vec<_> = m.find_iter("🎙 유재석: 네").collect();
        assert_eq!(ids(&found), ["yoo-jaesuk"]);
    }

    #[test]
    fn labels_need_a_separator() {
        let m = matcher();
        assert_eq!(m.find_iter("😎 침착맨 말대로 하면 돼요").count(), 0);
        assert_eq!(m.find_iter("유재석: 이모지 없이").count(), 0);
    }

    #[test]
    fn labels_match_mid_line() {
        let m = matcher();
        let found: Vec<_> = m.find_iter("네 🎤 이영지: 와 레전드").collect();
        assert_eq!(ids(&found), ["lee-youngji"]);
        assert_eq!(found[0].start, "네 ".len());
    }

    #[test]
    fn wide_gaps_are_body_text() {
        let m = matcher();
        assert_eq!(m.find_iter("😎     침착맨: 음").count(), 0);
    }

    #[test]
    fn prefers_the_full_label_among_shared_emojis() {
        let registry = SpeakerRegistry::new(vec![
            Speaker::new("short", "🎤", "이영"),
            Speaker::new("long", "🎤", "이영지"),
        ])
        .unwrap();
        let m = LabelMatcher::new(&registry).unwrap();

        let found: Vec<_> = m.find_iter("🎤 이영지: 하이\n🎤 이영: 하이").collect();
        assert_eq!(ids(&found), ["long", "short"]);
    }

    #[test]
    fn names_are_matched_literally() {
        let registry =
            SpeakerRegistry::new(vec![Speaker::new("dot", "🤖", "R2.D2")]).unwrap();
        let m = LabelMatcher::new(&registry).unwrap();

        assert_eq!(m.find_iter("🤖 R2xD2: beep").count(), 0);
        assert_eq!(m.find_iter("🤖 R2.D2: beep").count(), 1);
    }

    #[test]
    fn empty_registry_matches_nothing() {
        let m = LabelMatcher::new(&SpeakerRegistry::new(vec![]).unwrap()).unwrap();
        assert_eq!(m.find_iter("🎙️ 유재석: 안녕").count(), 0);
        assert_eq!(m.partial_start("🎙️ 유"), None);
    }
}
