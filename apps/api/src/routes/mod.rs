pub(crate) mod panelists;
pub(crate) mod podcast;
pub(crate) mod tts;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/panelists", get(panelists::list))
        .route("/podcast/stream", post(podcast::stream))
        .route("/podcast/transcript", post(podcast::transcript))
        .route("/tts", post(tts::synthesize))
        .with_state(state)
}
