use utoipa::OpenApi;

use crate::routes::{panelists, podcast, tts};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gomin Radio API",
        version = "1.0.0",
        description = "Live worry-counseling talk show: streamed speaker turns, finished transcripts and panelist voices"
    ),
    paths(
        panelists::list,
        podcast::stream,
        podcast::transcript,
        tts::synthesize,
    ),
    components(schemas(
        podcast::StreamRequest,
        podcast::TranscriptRequest,
        podcast::TranscriptResponse,
        tts::TtsRequest,
    )),
    tags(
        (name = "podcast", description = "Episode generation and transcripts"),
        (name = "tts", description = "Text-to-speech for panelist voices")
    )
)]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn write_openapi_json() -> std::io::Result<std::path::PathBuf> {
    let json = serde_json::to_string_pretty(&openapi())
        .map_err(|e| std::io::Error::other(format!("serialize openapi: {e}")))?;

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("openapi.gen.json");
    std::fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = openapi();
        let mut paths: Vec<_> = doc.paths.paths.keys().map(String::as_str).collect();
        paths.sort_unstable();

        assert_eq!(
            paths,
            ["/panelists", "/podcast/stream", "/podcast/transcript", "/tts"]
        );
        assert!(doc.paths.paths["/podcast/stream"].post.is_some());
    }

    #[test]
    fn gen_openapi_json() {
        write_openapi_json().unwrap();
    }
}
