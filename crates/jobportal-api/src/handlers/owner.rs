//! Owner-scoped job operations (`/me/job`).
//!
//! Every route requires the token cookie and an `email` query parameter
//! equal to the token identity (mismatch is 403 regardless of the value).
//! The by-id mutations additionally compare the token identity against the
//! job's stored `created_by.email`, so an authenticated caller cannot
//! update or delete somebody else's posting by guessing ids.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use bson::oid::ObjectId;
use jobportal_store::{DeleteReport, JobStore, ListQuery, UpdateReport};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::jobs::update_document;
use crate::response::Envelope;
use crate::state::AppState;

/// Query gate shared by the owner-scoped routes.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

/// The `email` query parameter must equal the authenticated identity.
pub(crate) fn ensure_self(user: &AuthUser, query: &OwnerQuery) -> ApiResult<()> {
    if query.email.as_deref() != Some(user.email.as_str()) {
        return Err(ApiError::forbidden("Forbidden access"));
    }
    Ok(())
}

/// Whether the fetched job document is owned by the given identity.
fn owner_matches(job: &Value, email: &str) -> bool {
    job.get("created_by")
        .and_then(|c| c.get("email"))
        .and_then(|e| e.as_str())
        == Some(email)
}

/// The job must exist and be owned by the authenticated identity.
async fn ensure_owned(state: &AppState, user: &AuthUser, id: &ObjectId) -> ApiResult<()> {
    let job = state
        .store
        .find_job(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    if !owner_matches(&job, &user.email) {
        return Err(ApiError::forbidden("Forbidden access"));
    }
    Ok(())
}

/// GET /me/job
pub async fn list_my_jobs(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<Envelope<Vec<Value>>>> {
    ensure_self(&user, &query)?;
    let jobs = state
        .store
        .list_jobs(&ListQuery::owned_by(&user.email))
        .await?;
    Ok(Json(Envelope::with_list("Jobs retrieved successful", jobs)))
}

/// PATCH /me/job/:id
pub async fn update_my_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Envelope<UpdateReport>>> {
    ensure_self(&user, &query)?;
    let id = JobStore::parse_id(&id)?;
    ensure_owned(&state, &user, &id).await?;

    let changes = update_document(body)?;
    let report = state.store.update_job(&id, changes).await?;
    info!(job_id = %id, owner = %user.email, "job updated by owner");
    Ok(Json(Envelope::with_result("Job update successful", report)))
}

/// DELETE /me/job/:id
pub async fn delete_my_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<Envelope<DeleteReport>>> {
    ensure_self(&user, &query)?;
    let id = JobStore::parse_id(&id)?;
    ensure_owned(&state, &user, &id).await?;

    let report = state.store.delete_job(&id).await?;
    info!(job_id = %id, owner = %user.email, "job deleted by owner");
    Ok(Json(Envelope::with_result("Job delete successful", report)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> AuthUser {
        AuthUser {
            email: email.to_string(),
        }
    }

    #[test]
    fn matching_email_passes_the_gate() {
        let query = OwnerQuery {
            email: Some("owner@x.com".to_string()),
        };
        assert!(ensure_self(&user("owner@x.com"), &query).is_ok());
    }

    #[test]
    fn mismatched_email_is_forbidden() {
        let query = OwnerQuery {
            email: Some("other@x.com".to_string()),
        };
        assert!(matches!(
            ensure_self(&user("owner@x.com"), &query),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn missing_email_is_forbidden() {
        let query = OwnerQuery { email: None };
        assert!(matches!(
            ensure_self(&user("owner@x.com"), &query),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn stored_owner_must_match_token_identity() {
        let job = serde_json::json!({
            "title": "Backend Engineer",
            "created_by": { "name": "Owner", "email": "owner@x.com" }
        });
        assert!(owner_matches(&job, "owner@x.com"));
        assert!(!owner_matches(&job, "other@x.com"));
    }

    #[test]
    fn job_without_stored_owner_matches_nobody() {
        let job = serde_json::json!({ "title": "Backend Engineer" });
        assert!(!owner_matches(&job, "owner@x.com"));

        // created_by present but malformed
        let job = serde_json::json!({
            "title": "Backend Engineer",
            "created_by": { "name": "Owner" }
        });
        assert!(!owner_matches(&job, "owner@x.com"));
    }
}
