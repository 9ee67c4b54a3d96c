use turns::{StreamEvent, panelist};

#[derive(Clone, Copy, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Format {
    /// `event: <name>` / `data: <json>` frames, as served to browsers.
    Sse,
    /// One JSON object per line.
    Json,
    /// `<emoji> <name>: <text>` lines.
    Text,
}

impl Format {
    pub fn render(&self, event: &StreamEvent) -> Result<String, serde_json::Error> {
        Ok(match self {
            Self::Sse => format!(
                "event: {}\ndata: {}\n",
                event.name(),
                serde_json::to_string(event)?
            ),
            Self::Json => serde_json::to_string(event)?,
            Self::Text => match event {
                StreamEvent::Turn(turn) => match panelist(&turn.speaker_id) {
                    Some(p) => format!("[{}] {} {}: {}", turn.index, p.emoji, p.name, turn.text),
                    None => format!("[{}] {}: {}", turn.index, turn.speaker_id, turn.text),
                },
                StreamEvent::Done => "-- done --".to_string(),
                StreamEvent::Error { error } => format!("-- error: {error} --"),
            },
        })
    }
}
