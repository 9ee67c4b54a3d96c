mod sse;

use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::env::Env;
use crate::error::{Error, Result};

const API_VERSION: &str = "2023-06-01";

/// Streaming client for the Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    stream: bool,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamPayload {
    ContentBlockDelta { delta: Delta },
    Error { error: ApiError },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Delta {
    TextDelta { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl AnthropicClient {
    /// `None` when no API key is configured.
    pub fn from_env(http: reqwest::Client, env: &Env) -> Option<Self> {
        let api_key = env.anthropic_api_key.clone()?;
        Some(Self {
            http,
            api_key,
            base_url: env.anthropic_base_url.trim_end_matches('/').to_string(),
            model: env.anthropic_model.clone(),
            max_tokens: env.anthropic_max_tokens,
        })
    }

    /// Text fragments of the reply in arrival order. The request is sent when
    /// the stream is first polled; a non-success status or an `error` event
    /// ends the stream with an error.
    pub fn stream_text(
        &self,
        system: &str,
        user: &str,
    ) -> impl Stream<Item = Result<String>> + Send + 'static + use<> {
        let request = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&MessagesRequest {
                model: &self.model,
                max_tokens: self.max_tokens,
                stream: true,
                system,
                messages: [UserMessage {
                    role: "user",
                    content: user,
                }],
            });

        async_stream::try_stream! {
            let response = ensure_success(request.send().await?).await?;

            let mut body = response.bytes_stream();
            let mut decoder = sse::Decoder::default();
            let mut fragments = 0usize;

            while let Some(chunk) = body.next().await {
                let chunk = chunk?;
                for frame in decoder.push(&chunk)? {
                    if let Some(text) = text_delta(&frame)? {
                        fragments += 1;
                        yield text;
                    }
                }
            }

            tracing::debug!(fragments, "anthropic_stream_finished");
        }
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_default();
    Err(Error::Upstream {
        provider: "Anthropic",
        status,
        detail,
    })
}

/// Only `content_block_delta` and `error` events are decoded; unnamed frames
/// are judged by their payload.
fn text_delta(frame: &sse::Frame) -> Result<Option<String>> {
    if !matches!(
        frame.event.as_deref(),
        None | Some("content_block_delta" | "error")
    ) {
        return Ok(None);
    }

    match serde_json::from_str::<StreamPayload>(&frame.data)? {
        StreamPayload::ContentBlockDelta {
            delta: Delta::TextDelta { text },
        } => Ok(Some(text)),
        StreamPayload::Error { error } => Err(Error::UpstreamEvent {
            kind: error.kind,
            message: error.message,
        }),
        _ => Ok(None),
    }
}
