//! Token issuance and logout.
//!
//! `POST /jwt` signs a token for whatever email the caller asserts; the
//! encompassing system performs identity verification before calling it.
//! The token lands in an httpOnly, secure, cross-site cookie.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::info;

use crate::auth::{issue_token, removal_cookie, session_cookie};
use crate::error::{ApiError, ApiResult};
use crate::response::Ack;
use crate::state::AppState;

/// Body for `POST /jwt`. Claims are reduced to the single email.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// POST /jwt
pub async fn issue_jwt(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<Ack>)> {
    let Json(payload) = body.map_err(|_| ApiError::bad_request("email is required"))?;
    if payload.email.trim().is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    let token = issue_token(&state.config.jwt_secret, &payload.email)?;
    info!(email = %payload.email, "token issued");

    Ok((jar.add(session_cookie(token)), Json(Ack::ok())))
}

/// POST /logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Ack>) {
    info!("logging out");
    (jar.remove(removal_cookie()), Json(Ack::ok()))
}
