use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::matcher::{SEPARATORS, VARIATION_SELECTOR};

/// A participant whose turns are delimited by `<emoji> <name>:` in model output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Speaker {
    pub id: String,
    pub emoji: String,
    pub name: String,
}

impl Speaker {
    pub fn new(id: impl Into<String>, emoji: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            emoji: emoji.into(),
            name: name.into(),
        }
    }

    /// Canonical label as producers are asked to write it, without separator.
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }

    /// The emoji with a trailing variation selector removed. Producers emit
    /// both forms, so matching is anchored on this.
    pub fn emoji_base(&self) -> &str {
        self.emoji
            .strip_suffix(VARIATION_SELECTOR)
            .unwrap_or(&self.emoji)
    }
}

/// Ordered, validated set of speakers. Immutable once built.
#[derive(Debug, Clone)]
pub struct SpeakerRegistry {
    speakers: Vec<Speaker>,
}

impl SpeakerRegistry {
    /// Validates that every label can be recognised without ambiguity.
    ///
    /// Rejected: duplicate ids, empty parts, emojis with whitespace or
    /// separators, names with surrounding whitespace or separators, identical
    /// labels, and any emoji that occurs inside a label past its first byte
    /// (one label could then start inside another one's span).
    pub fn new(speakers: Vec<Speaker>) -> Result<Self> {
        let mut ids = HashSet::new();

        for speaker in &speakers {
            if speaker.id.is_empty() || speaker.emoji_base().is_empty() || speaker.name.is_empty()
            {
                return Err(Error::EmptyLabelPart(speaker.id.clone()));
            }
            if !ids.insert(speaker.id.as_str()) {
                return Err(Error::DuplicateSpeakerId(speaker.id.clone()));
            }
            if speaker
                .emoji
                .chars()
                .any(|c| c.is_whitespace() || SEPARATORS.contains(&c))
            {
                return Err(Error::InvalidEmoji(speaker.id.clone()));
            }
            if speaker.name.trim() != speaker.name
                || speaker.name.chars().any(|c| SEPARATORS.contains(&c))
            {
                return Err(Error::InvalidName(speaker.id.clone()));
            }
        }

        for (i, a) in speakers.iter().enumerate() {
            let label = a.label();
            for (j, b) in speakers.iter().enumerate() {
                let nested = label
                    .match_indices(b.emoji_base())
                    .any(|(offset, _)| offset > 0);
                let identical = i != j && a.emoji_base() == b.emoji_base() && a.name == b.name;

                if nested || identical {
                    return Err(Error::AmbiguousLabels {
                        first: a.id.clone(),
                        second: b.id.clone(),
                    });
                }
            }
        }

        Ok(Self { speakers })
    }

    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn get(&self, id: &str) -> Option<&Speaker> {
        self.speakers.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }
}
