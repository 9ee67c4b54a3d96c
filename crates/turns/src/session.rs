//! Recovering an episode from a stored agent session log (JSON Lines).

use crate::full_text::parse_turns;
use crate::matcher::LabelMatcher;
use crate::types::Turn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    User,
    Assistant,
    System,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SessionEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: MessageContent,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Blocks(Vec::new())
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

impl MessageContent {
    /// Text blocks joined with newlines; other block kinds are skipped.
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } if !text.is_empty() => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Keeps user, assistant and system entries. Blank and malformed lines are
/// skipped.
pub fn parse_session_log(content: &str) -> Vec<SessionEntry> {
    content
        .lines()
        .enumerate()
        .filter_map(|(n, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            match serde_json::from_str::<SessionEntry>(line) {
                Ok(entry) if entry.kind != EntryKind::Other => Some(entry),
                Ok(_) => None,
                Err(error) => {
                    tracing::debug!(line = n + 1, %error, "session_line_skipped");
                    None
                }
            }
        })
        .collect()
}

/// Everything the assistant said, in order, one message per line.
pub fn assistant_text(entries: &[SessionEntry]) -> String {
    entries
        .iter()
        .filter(|entry| entry.kind == EntryKind::Assistant)
        .filter_map(|entry| entry.message.as_ref())
        .map(|message| message.content.text())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn session_turns(matcher: &LabelMatcher, content: &str) -> Vec<Turn> {
    let entries = parse_session_log(content);
    let text = assistant_text(&entries);
    if text.is_empty() {
        return Vec::new();
    }
    parse_turns(matcher, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::panel_registry;

    const LOG: &str = r#"
{"type":"system","subtype":"init","sessionId":"s-1"}
{"type":"user","message":{"role":"user","content":"회사를 그만둘까요?"},"sessionId":"s-1"}
not json at all
{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"🎙️ 유재석: 고민러님~ 이야기 들어볼게요."},{"type":"tool_use","id":"t1","name":"noop","input":{}}]},"sessionId":"s-1"}
{"type":"result","subtype":"success","duration_ms":1200}
{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"😎 침착맨: 스킬트리를 잘못 찍은 거죠."}]},"sessionId":"s-1"}
"#;

    #[test]
    fn keeps_conversation_entries_only() {
        let entries = parse_session_log(LOG);
        let kinds: Vec<_> = entries.iter().map(|e| e.kind).collect();

        assert_eq!(
            kinds,
            [
                EntryKind::System,
                EntryKind::User,
                EntryKind::Assistant,
                EntryKind::Assistant
            ]
        );
        assert_eq!(entries[0].session_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn joins_assistant_text_blocks() {
        let entries = parse_session_log(LOG);
        assert_eq!(
            assistant_text(&entries),
            "🎙️ 유재석: 고민러님~ 이야기 들어볼게요.\n😎 침착맨: 스킬트리를 잘못 찍은 거죠."
        );
    }

    #[test]
    fn plain_string_content_counts_as_text() {
        let entries = parse_session_log(
            r#"{"type":"assistant","message":{"role":"assistant","content":"⚽ 손흥민: 포기하지 마세요"}}"#,
        );
        assert_eq!(assistant_text(&entries), "⚽ 손흥민: 포기하지 마세요");
    }

    #[test]
    fn turns_from_log() {
        let matcher = LabelMatcher::new(&panel_registry().unwrap()).unwrap();
        let turns = session_turns(&matcher, LOG);

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker_id, "yoo-jaesuk");
        assert_eq!(turns[1].text, "스킬트리를 잘못 찍은 거죠.");
        assert!(session_turns(&matcher, "").is_empty());
    }
}
