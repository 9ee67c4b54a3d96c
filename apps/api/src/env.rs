use std::path::Path;

use serde::{Deserialize, Deserializer};

fn default_port() -> u16 {
    3001
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_anthropic_max_tokens() -> u32 {
    2048
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_turbo_v2_5".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Env {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default, deserialize_with = "filter_empty")]
    pub anthropic_api_key: Option<String>,
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_anthropic_max_tokens")]
    pub anthropic_max_tokens: u32,

    #[serde(default, deserialize_with = "filter_empty")]
    pub elevenlabs_api_key: Option<String>,
    #[serde(default = "default_elevenlabs_base_url")]
    pub elevenlabs_base_url: String,
    #[serde(default = "default_elevenlabs_model")]
    pub elevenlabs_model: String,
}

fn filter_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Reads `.env` next to the manifest when present, then the process environment.
pub fn load() -> Result<Env, envy::Error> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let _ = dotenvy::from_path(manifest_dir.join(".env"));
    envy::from_env()
}
