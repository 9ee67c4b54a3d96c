use bytes::Bytes;
use serde::Serialize;

use crate::env::Env;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

const VOICE_SETTINGS: VoiceSettings = VoiceSettings {
    stability: 0.5,
    similarity_boost: 0.75,
};

impl ElevenLabsClient {
    pub fn from_env(http: reqwest::Client, env: &Env) -> Option<Self> {
        let api_key = env.elevenlabs_api_key.clone()?;
        Some(Self {
            http,
            api_key,
            base_url: env.elevenlabs_base_url.trim_end_matches('/').to_string(),
            model: env.elevenlabs_model.clone(),
        })
    }

    /// MP3 audio for `text` spoken by `voice_id`.
    pub async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Bytes> {
        let response = self
            .http
            .post(format!("{}/v1/text-to-speech/{voice_id}", self.base_url))
            .header("xi-api-key", &self.api_key)
            .json(&SpeechRequest {
                text,
                model_id: &self.model,
                voice_settings: VOICE_SETTINGS,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status.as_u16(), voice_id, "tts_upstream_failed");
            return Err(Error::Upstream {
                provider: "ElevenLabs",
                status,
                detail,
            });
        }

        let audio = response.bytes().await?;
        tracing::debug!(bytes = audio.len(), voice_id, "tts_synthesized");
        Ok(audio)
    }
}
