use std::sync::Arc;

use crate::matcher::LabelMatcher;
use crate::types::Turn;

/// Reassembles speaker turns from a text stream split at arbitrary points.
///
/// Each `feed` returns the turns that became closed by that chunk. Text that
/// might still be the beginning of a label stays buffered until the next
/// chunk decides it. Call `flush` once the source ends cleanly to emit the
/// last open turn. On an aborted stream just drop the parser.
///
/// Whatever precedes the first label is preamble and is discarded.
#[derive(Debug)]
pub struct StreamingTurnParser {
    matcher: Arc<LabelMatcher>,
    buffer: String,
    speaker: Option<String>,
    accumulated: String,
    next_index: usize,
}

impl StreamingTurnParser {
    pub fn new(matcher: Arc<LabelMatcher>) -> Self {
        Self {
            matcher,
            buffer: String::new(),
            speaker: None,
            accumulated: String::new(),
            next_index: 0,
        }
    }

    pub fn feed(&mut self, chunk: &str) -> Vec<Turn> {
        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.push_str(chunk);

        let matcher = Arc::clone(&self.matcher);
        let mut turns = Vec::new();
        let mut cursor = 0;

        for label in matcher.find_iter(&buffer) {
            self.absorb(&buffer[cursor..label.start]);
            turns.extend(self.close_span());
            self.speaker = Some(label.speaker_id.to_string());
            cursor = label.end;
        }

        let tail = &buffer[cursor..];
        let hold = matcher.partial_start(tail).unwrap_or(tail.len());
        self.absorb(&tail[..hold]);
        self.buffer = tail[hold..].to_string();

        turns
    }

    pub fn flush(&mut self) -> Vec<Turn> {
        let rest = std::mem::take(&mut self.buffer);
        self.absorb(&rest);

        let turns = self.close_span().into_iter().collect();
        self.speaker = None;
        turns
    }

    pub fn current_speaker(&self) -> Option<&str> {
        self.speaker.as_deref()
    }

    /// Text held back as a possible partial label.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Number of turns emitted so far.
    pub fn emitted(&self) -> usize {
        self.next_index
    }

    fn absorb(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.speaker.is_some() {
            self.accumulated.push_str(text);
        } else {
            tracing::trace!(bytes = text.len(), "preamble_discarded");
        }
    }

    fn close_span(&mut self) -> Option<Turn> {
        let text = std::mem::take(&mut self.accumulated);
        let speaker_id = self.speaker.clone()?;

        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;
        Some(Turn {
            speaker_id,
            index,
            text: text.to_string(),
        })
    }
}
