use axum::Json;
use gomin_turns::{PANELISTS, Panelist};

#[utoipa::path(
    get,
    path = "/panelists",
    responses((status = 200, description = "The cast in speaking order, with voices and colors")),
    tag = "podcast",
)]
pub async fn list() -> Json<[Panelist; 5]> {
    Json(PANELISTS)
}
