use crate::matcher::LabelMatcher;
use crate::types::Turn;

/// Segments an already complete text into turns.
///
/// Yields exactly what a [`crate::StreamingTurnParser`] produces for the same
/// text, however it is chunked, once flushed.
pub fn parse_turns(matcher: &LabelMatcher, text: &str) -> Vec<Turn> {
    let labels: Vec<_> = matcher.find_iter(text).collect();

    labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            let end = labels.get(i + 1).map_or(text.len(), |next| next.start);
            let body = text[label.end..end].trim();
            (!body.is_empty()).then_some((label.speaker_id, body))
        })
        .enumerate()
        .map(|(index, (speaker_id, body))| Turn {
            speaker_id: speaker_id.to_string(),
            index,
            text: body.to_string(),
        })
        .collect()
}
