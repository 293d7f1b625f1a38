//! HTTP router - thin layer that resolves the caller and delegates.
//!
//! This module handles:
//! - The identity gate in front of `/summarize`
//! - Mapping dispatcher results onto the `/summarize` response contract
//! - Account routes (delegated to `account_handler`)

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Json, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header::CONTENT_TYPE};
use axum::response::Response;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use super::{account_handler, helpers, state::AppState};
use crate::ai::{FailureKind, SummarizationResult};
use crate::auth::identify;
use crate::core::config::AppConfig;
use crate::core::models::{SummarizeRequest, SummarizeResponse};

/// Upper bound on a request body, the JSON envelope included.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub const BODY_TOO_LARGE_MESSAGE: &str = "Text is too long to summarize";

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/summarize", post(summarize_handler))
        .route("/signUp", post(account_handler::sign_up))
        .route("/login", post(account_handler::login))
        .route("/check-session", get(account_handler::check_session))
        .route("/logout", get(account_handler::logout))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Credentials are allowed, so the origin is either the configured one or
/// mirrored from the request; a wildcard is not permitted.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = match config.cors_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(e)) => {
            error!("CORS_ORIGIN is not a valid header value, mirroring request origin: {}", e);
            AllowOrigin::mirror_request()
        }
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

/// `POST /summarize`
#[tracing::instrument(level = "info", skip_all)]
pub async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let identity = identify(&headers, &state.sessions);
    if !identity.is_authenticated() {
        info!("Summarize request rejected by identity gate");
        return helpers::not_logged_in();
    }

    let request = match body {
        Ok(Json(request)) => request,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(limit = MAX_BODY_BYTES, "Summarize request body too large");
            return helpers::err_response(StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE_MESSAGE);
        }
        Err(e) => {
            error!("Summarize request body rejected: {}", e);
            return helpers::err_response(
                StatusCode::BAD_REQUEST,
                "Request body must be JSON with a text field",
            );
        }
    };

    let result = state.dispatcher.summarize(&request.text, &identity).await;
    summarization_response(result)
}

#[must_use]
pub fn summarization_response(result: SummarizationResult) -> Response {
    match result {
        SummarizationResult::Ok { summary } => {
            helpers::json_response(StatusCode::OK, &SummarizeResponse { summary })
        }
        SummarizationResult::Error { failure, message } => match failure {
            FailureKind::Unauthorized => helpers::not_logged_in(),
            FailureKind::Validation => helpers::err_response(StatusCode::BAD_REQUEST, &message),
            FailureKind::Fatal | FailureKind::RetryExhausted => {
                helpers::err_response(StatusCode::INTERNAL_SERVER_ERROR, &message)
            }
        },
    }
}
