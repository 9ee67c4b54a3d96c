mod anthropic;
mod elevenlabs;
mod env;
mod error;
mod openapi;
mod prompt;
mod relay;
mod routes;
mod state;

use std::net::SocketAddr;

use axum::{Router, body::Body, extract::MatchedPath, http::Request};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::prelude::*;

use state::AppState;

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(version))
        .route("/openapi.json", axum::routing::get(openapi_json))
        .merge(routes::router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let path = request.uri().path();

                    if path == "/health" {
                        return tracing::Span::none();
                    }

                    let method = request.method();
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(path);

                    tracing::info_span!(
                        "http_request",
                        method = %method,
                        http.route = %matched_path,
                        otel.name = %format!("{} {}", method, matched_path),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &tracing::Span| {
                    if request.uri().path() == "/health" {
                        return;
                    }
                    tracing::info!(
                        method = %request.method(),
                        path = %request.uri().path(),
                        "http_request_started"
                    );
                })
                .on_response(
                    |response: &axum::http::Response<Body>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        if span.is_disabled() {
                            return;
                        }
                        tracing::info!(
                            parent: span,
                            http_status = %response.status().as_u16(),
                            latency_ms = %latency.as_millis(),
                            "http_request_finished"
                        );
                    },
                )
                .on_failure(
                    |failure_class: ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        if span.is_disabled() {
                            return;
                        }
                        tracing::error!(
                            parent: span,
                            failure_class = ?failure_class,
                            latency_ms = %latency.as_millis(),
                            "http_request_failed"
                        );
                    },
                ),
        )
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(error) = openapi::write_openapi_json() {
        tracing::debug!(error = %error, "openapi_json_not_written");
    }

    let env = match env::load() {
        Ok(env) => env,
        Err(error) => {
            tracing::error!(error = %error, "env_invalid");
            std::process::exit(1);
        }
    };
    let state = AppState::from_env(&env).map_err(std::io::Error::other)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let addr = SocketAddr::from(([0, 0, 0, 0], env.port));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(addr = %addr, "server_listening");

            axum::serve(listener, app(state))
                .with_graceful_shutdown(shutdown_signal())
                .await
        })
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "shutdown_signal_unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown_signal_received");
}

async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(openapi::openapi())
}

async fn version() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use gomin_turns::{LabelMatcher, panel_registry};
    use tower::ServiceExt;

    use super::*;

    fn offline_state() -> AppState {
        AppState {
            matcher: Arc::new(LabelMatcher::new(&panel_registry().unwrap()).unwrap()),
            anthropic: None,
            elevenlabs: None,
        }
    }

    #[tokio::test]
    async fn health_and_openapi_are_served() {
        let app = app(offline_state());

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"]["/tts"]["post"].is_object());
    }

    #[tokio::test]
    async fn cors_preflight_is_permissive() {
        let response = app(offline_state())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/podcast/stream")
                    .header("origin", "http://localhost:5173")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
