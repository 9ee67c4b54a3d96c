use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::{Stream, StreamExt};
use gomin_turns::{Turn, parse_turns, session_turns};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::prompt::{SYSTEM_PROMPT, build_user_message};
use crate::relay::relay;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamRequest {
    #[serde(default)]
    pub worry: String,
    /// Panelists who sit out this episode.
    #[serde(default)]
    pub muted_ids: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest {
    /// Raw model output.
    #[serde(default)]
    pub text: Option<String>,
    /// Agent session log (JSON Lines). Takes precedence over `text`.
    #[serde(default)]
    pub session_log: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptResponse {
    #[schema(value_type = Vec<Object>)]
    pub turns: Vec<Turn>,
}

#[utoipa::path(
    post,
    path = "/podcast/stream",
    request_body = StreamRequest,
    responses(
        (status = 200, description = "`turn` events, then one `done` or `error`", content_type = "text/event-stream"),
        (status = 400, description = "Missing worry"),
        (status = 500, description = "LLM provider not configured"),
    ),
    tag = "podcast",
)]
pub async fn stream(
    State(state): State<AppState>,
    Json(request): Json<StreamRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    let worry = request.worry.trim();
    if worry.is_empty() {
        return Err(Error::BadRequest("worry is required"));
    }
    let client = state
        .anthropic
        .as_ref()
        .ok_or(Error::NotConfigured("ANTHROPIC_API_KEY"))?;

    tracing::info!(
        worry_chars = worry.chars().count(),
        muted = request.muted_ids.len(),
        "podcast_stream_started"
    );

    let fragments = client.stream_text(SYSTEM_PROMPT, &build_user_message(worry, &request.muted_ids));
    let events = relay(Arc::clone(&state.matcher), fragments)
        .map(|event| Event::default().event(event.name()).json_data(&event));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

#[utoipa::path(
    post,
    path = "/podcast/transcript",
    request_body = TranscriptRequest,
    responses(
        (status = 200, description = "Turns of a finished episode", body = TranscriptResponse),
        (status = 400, description = "Neither text nor sessionLog given"),
    ),
    tag = "podcast",
)]
pub async fn transcript(
    State(state): State<AppState>,
    Json(request): Json<TranscriptRequest>,
) -> Result<Json<TranscriptResponse>> {
    let turns = match (request.session_log.as_deref(), request.text.as_deref()) {
        (Some(log), _) => session_turns(&state.matcher, log),
        (None, Some(text)) => parse_turns(&state.matcher, text),
        (None, None) => return Err(Error::BadRequest("text or sessionLog is required")),
    };

    tracing::debug!(turns = turns.len(), "podcast_transcript_parsed");
    Ok(Json(TranscriptResponse { turns }))
}
