use std::sync::Arc;

use gomin_turns::{LabelMatcher, panel_registry};

use crate::anthropic::AnthropicClient;
use crate::elevenlabs::ElevenLabsClient;
use crate::env::Env;

/// Shared by every request. The matcher is compiled once at startup.
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<LabelMatcher>,
    pub anthropic: Option<Arc<AnthropicClient>>,
    pub elevenlabs: Option<Arc<ElevenLabsClient>>,
}

impl AppState {
    pub fn from_env(env: &Env) -> gomin_turns::Result<Self> {
        let http = reqwest::Client::new();

        let state = Self {
            matcher: Arc::new(LabelMatcher::new(&panel_registry()?)?),
            anthropic: AnthropicClient::from_env(http.clone(), env).map(Arc::new),
            elevenlabs: ElevenLabsClient::from_env(http, env).map(Arc::new),
        };

        if state.anthropic.is_none() {
            tracing::warn!("anthropic_api_key_missing");
        }
        if state.elevenlabs.is_none() {
            tracing::warn!("elevenlabs_api_key_missing");
        }
        Ok(state)
    }
}
