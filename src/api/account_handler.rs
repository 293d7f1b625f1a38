//! Sign-up, login, session check and logout.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{helpers, state::AppState};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{NewUser, SESSION_COOKIE, User, get_cookie, identify};
use crate::core::models::{
    AccountResponse, LoginRequest, MessageBody, SessionStatus, SessionUser, SignUpRequest,
};
use crate::errors::{AuthError, ClarioError};

/// `POST /signUp`
#[tracing::instrument(level = "info", skip_all)]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return missing_fields();
    };

    let username = request.username.trim().to_string();
    if username.is_empty() || request.password.is_empty() {
        return missing_fields();
    }

    let password_hash = match hash_off_thread(request.password, state.config.password_cost).await {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return helpers::err_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An issue occurred during sign up",
            );
        }
    };

    let new_user = NewUser {
        username,
        email: request.email.filter(|e| !e.trim().is_empty()),
        password_hash,
    };

    match state.credentials.create_user(new_user).await {
        Ok(user) => {
            info!(user_id = %user.id, "User signed up");
            start_session(
                &state,
                &user,
                "User signed up successfully",
                "An issue occurred during sign up",
            )
        }
        Err(AuthError::UsernameTaken) => {
            helpers::err_response(StatusCode::CONFLICT, &AuthError::UsernameTaken.to_string())
        }
        Err(e) => {
            error!("Sign up failed: {}", e);
            helpers::err_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An issue occurred during sign up",
            )
        }
    }
}

/// `POST /login`
#[tracing::instrument(level = "info", skip_all)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return missing_fields();
    };

    match authenticate(&state, request.username.trim(), &request.password).await {
        Ok(user) => {
            info!(user_id = %user.id, "User logged in");
            start_session(&state, &user, "Login successful", "Login failed")
        }
        Err(AuthError::InvalidCredentials | AuthError::MissingFields) => {
            warn!("Login rejected");
            helpers::err_response(
                StatusCode::UNAUTHORIZED,
                &AuthError::InvalidCredentials.to_string(),
            )
        }
        Err(e) => {
            error!("Login failed: {}", e);
            helpers::err_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

/// `GET /check-session`
#[tracing::instrument(level = "info", skip_all)]
pub async fn check_session(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let status = match identify(&headers, &state.sessions).user_id() {
        Some(user_id) => match state.credentials.find_by_id(user_id).await {
            Ok(Some(user)) => SessionStatus {
                logged_in: true,
                user: Some(SessionUser {
                    id: user.id,
                    letter: user.letter,
                }),
            },
            Ok(None) => SessionStatus::anonymous(),
            Err(e) => {
                error!("Session lookup failed: {}", e);
                SessionStatus::anonymous()
            }
        },
        None => SessionStatus::anonymous(),
    };

    helpers::json_response(StatusCode::OK, &status)
}

/// `GET /logout`
#[tracing::instrument(level = "info", skip_all)]
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(cookie) = get_cookie(&headers, SESSION_COOKIE) {
        state.sessions.revoke(cookie);
    }

    let response = helpers::json_response(
        StatusCode::OK,
        &MessageBody {
            message: "Logged out successfully".to_string(),
        },
    );
    helpers::with_cookie(response, &helpers::expired_session_cookie(&state.config))
}

async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let user = state
        .credentials
        .find_by_username(username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let candidate = password.to_string();
    let stored = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored))
        .await
        .map_err(|e| ClarioError::PasswordError(format!("verification task failed: {e}")))?;

    if verified {
        Ok(user)
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

async fn hash_off_thread(password: String, cost: u32) -> Result<String, ClarioError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ClarioError::PasswordError(format!("hashing task failed: {e}")))?
}

fn missing_fields() -> Response {
    helpers::err_response(StatusCode::BAD_REQUEST, &AuthError::MissingFields.to_string())
}

fn start_session(state: &AppState, user: &User, message: &str, failure_message: &str) -> Response {
    let cookie = match state.sessions.issue(user.id) {
        Ok(cookie) => cookie,
        Err(e) => {
            error!("Failed to open session: {}", e);
            return helpers::err_response(StatusCode::INTERNAL_SERVER_ERROR, failure_message);
        }
    };

    let response = helpers::json_response(
        StatusCode::OK,
        &AccountResponse {
            message: message.to_string(),
            letter: user.letter,
        },
    );
    helpers::with_cookie(response, &helpers::session_cookie(&cookie, &state.config))
}
