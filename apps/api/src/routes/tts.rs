use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use gomin_turns::panelist;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice_id: Option<String>,
    /// Used to look up the voice when `voiceId` is absent.
    #[serde(default)]
    pub speaker_id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/tts",
    request_body = TtsRequest,
    responses(
        (status = 200, description = "MP3 audio", content_type = "audio/mpeg"),
        (status = 400, description = "Missing text or voice"),
        (status = 500, description = "TTS provider not configured"),
    ),
    tag = "tts",
)]
pub async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> Result<Response> {
    let voice_id = request
        .voice_id
        .filter(|id| !id.is_empty())
        .or_else(|| {
            request
                .speaker_id
                .as_deref()
                .and_then(panelist)
                .map(|p| p.voice.voice_id.to_string())
        });

    let text = request.text.trim();
    let Some(voice_id) = voice_id.filter(|_| !text.is_empty()) else {
        return Err(Error::BadRequest("text and voiceId are required"));
    };
    if !voice_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::BadRequest("voiceId is invalid"));
    }

    let client = state
        .elevenlabs
        .as_ref()
        .ok_or(Error::NotConfigured("ELEVENLABS_API_KEY"))?;
    let audio = client.synthesize(text, &voice_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        audio,
    )
        .into_response())
}
