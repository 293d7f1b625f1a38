//! Response builders shared by the HTTP handlers.

use axum::Json;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::auth::SESSION_COOKIE;
use crate::auth::session::SESSION_TTL_DAYS;
use crate::core::config::AppConfig;
use crate::core::models::{ErrorBody, SessionStatus};

// ============================================================================
// Response Builders
// ============================================================================

#[must_use]
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, Json(body)).into_response()
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status: StatusCode, message: &str) -> Response {
    json_response(
        status,
        &ErrorBody {
            error: message.to_string(),
        },
    )
}

/// 401 produced by the identity gate.
#[must_use]
pub fn not_logged_in() -> Response {
    json_response(StatusCode::UNAUTHORIZED, &SessionStatus::anonymous())
}

// ============================================================================
// Session Cookies
// ============================================================================

#[must_use]
pub fn session_cookie(value: &str, config: &AppConfig) -> String {
    let max_age = SESSION_TTL_DAYS * 24 * 60 * 60;
    format!(
        "{SESSION_COOKIE}={value}; Path=/; HttpOnly; Max-Age={max_age}{}",
        cookie_attributes(config)
    )
}

#[must_use]
pub fn expired_session_cookie(config: &AppConfig) -> String {
    format!(
        "{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0{}",
        cookie_attributes(config)
    )
}

/// Cross-site cookies need `SameSite=None`, which browsers only accept with `Secure`.
fn cookie_attributes(config: &AppConfig) -> &'static str {
    if config.cookie_secure {
        "; Secure; SameSite=None"
    } else {
        "; SameSite=Lax"
    }
}

/// Attaches a `Set-Cookie` header. A cookie that is not a valid header value is dropped.
#[must_use]
pub fn with_cookie(mut response: Response, cookie: &str) -> Response {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => error!("Refusing to set malformed cookie: {}", e),
    }
    response
}
