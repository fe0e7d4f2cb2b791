//! Cookie-based JWT authentication.
//!
//! Identity is a single email claim carried in an HS256 token stored in the
//! `token` cookie. The [`AuthUser`] extractor rejects before the handler
//! runs: missing cookie is 401, failed verification is 403. There is no
//! refresh and no revocation list.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the authentication cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Token lifetime: 1 day.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims carried by the authentication token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated identity.
    pub email: String,
    /// Issued at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch).
    pub exp: i64,
}

/// Sign a token asserting the given email.
pub fn issue_token(secret: &str, email: &str) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        email: email.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
}

/// Verify signature and expiry, returning the claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("token verification failed: {e}");
        ApiError::forbidden("Forbidden access")
    })
}

/// Build the session cookie: httpOnly, secure, cross-site-sendable,
/// 1-day expiry.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::seconds(TOKEN_TTL_SECS))
        .build()
}

/// Build the removal cookie used by logout.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// Authenticated identity extracted from the request cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie = jar
            .get(TOKEN_COOKIE)
            .filter(|c| !c.value().is_empty())
            .ok_or_else(|| ApiError::unauthorized("Unauthorized access"))?;

        let claims = verify_token(&state.config.jwt_secret, cookie.value())?;

        Ok(AuthUser {
            email: claims.email,
        })
    }
}
