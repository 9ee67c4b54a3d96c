use crate::error::{Error, Result};

/// Longest line accepted from upstream before the stream is rejected.
pub const MAX_LINE_BYTES: usize = 1 << 20;

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub event: Option<String>,
    pub data: String,
}

/// Incremental `text/event-stream` decoder.
///
/// Network chunks may end anywhere, including inside a multi-byte character,
/// so bytes are buffered until a full line is available.
#[derive(Debug)]
pub struct Decoder {
    pending: Vec<u8>,
    line_limit: usize,
    event: Option<String>,
    data: Vec<String>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::with_line_limit(MAX_LINE_BYTES)
    }
}

impl Decoder {
    pub fn with_line_limit(line_limit: usize) -> Self {
        Self {
            pending: Vec::new(),
            line_limit,
            event: None,
            data: Vec::new(),
        }
    }

    /// Frames completed by `chunk`. Fails once an unterminated line grows past
    /// the line limit.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<Frame>> {
        self.pending.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(newline) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                frames.extend(self.dispatch());
            } else {
                self.field(line);
            }
        }

        if self.pending.len() > self.line_limit {
            return Err(Error::StreamLineTooLong(self.line_limit));
        }
        Ok(frames)
    }

    fn field(&mut self, line: &str) {
        if line.starts_with(':') {
            return;
        }

        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match name {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<Frame> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        Some(Frame {
            event,
            data: std::mem::take(&mut self.data).join("\n"),
        })
    }
}
