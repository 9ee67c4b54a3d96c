use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("{provider} API error: {}", .status.as_u16())]
    Upstream {
        provider: &'static str,
        status: StatusCode,
        detail: String,
    },

    /// An `error` event inside an otherwise successful upstream stream.
    #[error("{kind}: {message}")]
    UpstreamEvent { kind: String, message: String },

    #[error("upstream event stream line exceeds {0} bytes")]
    StreamLineTooLong(usize),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            Self::NotConfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
            Self::Upstream { status, detail, .. } => (*status, Some(detail.clone())),
            Self::UpstreamEvent { .. } | Self::StreamLineTooLong(_) | Self::Http(_) => {
                (StatusCode::BAD_GATEWAY, None)
            }
            Self::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, status = %status.as_u16(), "request_failed");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            detail,
        });

        (status, body).into_response()
    }
}
