/// One attributed, contiguous span of dialogue.
///
/// `text` is trimmed at both ends and never empty; interior whitespace is kept
/// as the producer wrote it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub speaker_id: String,
    pub index: usize,
    pub text: String,
}

/// What a consumer of a live episode receives, in order: any number of
/// `Turn`s followed by exactly one `Done` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    Turn(Turn),
    Done,
    Error { error: String },
}

impl StreamEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Server-sent event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Turn(_) => "turn",
            Self::Done => "done",
            Self::Error { .. } => "error",
        }
    }
}

impl From<Turn> for StreamEvent {
    fn from(turn: Turn) -> Self {
        Self::Turn(turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_event_is_flat_and_camel_cased() {
        let event = StreamEvent::from(Turn {
            speaker_id: "yoo-jaesuk".into(),
            index: 0,
            text: "안녕하세요".into(),
        });

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({
                "type": "turn",
                "speakerId": "yoo-jaesuk",
                "index": 0,
                "text": "안녕하세요",
            })
        );
        assert_eq!(event.name(), "turn");
    }

    #[test]
    fn terminal_events() {
        assert_eq!(
            serde_json::to_value(StreamEvent::Done).unwrap(),
            serde_json::json!({ "type": "done" })
        );

        let error = StreamEvent::error("upstream closed");
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({ "type": "error", "error": "upstream closed" })
        );
        assert_eq!(error.name(), "error");
        assert_eq!(StreamEvent::Done.name(), "done");
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let json = r#"{"type":"turn","speakerId":"elon-musk","index":3,"text":"Why not?"}"#;
        let event: StreamEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, StreamEvent::Turn(Turn { index: 3, .. })));
    }
}
