use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use gomin_turns::{LabelMatcher, StreamEvent, StreamingTurnParser};

/// Turns a fallible stream of model output fragments into episode events.
///
/// A clean end flushes the parser and emits `Done`. The first upstream error
/// becomes a single `Error` event and the unflushed remainder is dropped.
pub fn relay<S, E>(
    matcher: Arc<LabelMatcher>,
    fragments: S,
) -> impl Stream<Item = StreamEvent> + Send + 'static
where
    S: Stream<Item = Result<String, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    async_stream::stream! {
        let mut parser = StreamingTurnParser::new(matcher);
        let mut fragments = Box::pin(fragments);

        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(text) => {
                    for turn in parser.feed(&text) {
                        yield StreamEvent::from(turn);
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        emitted = parser.emitted(),
                        "relay_upstream_failed"
                    );
                    yield StreamEvent::error(error.to_string());
                    return;
                }
            }
        }

        for turn in parser.flush() {
            yield StreamEvent::from(turn);
        }
        tracing::info!(turns = parser.emitted(), "relay_finished");
        yield StreamEvent::Done;
    }
}
