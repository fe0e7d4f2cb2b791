//! The apply action and the applied-jobs list.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use jobportal_models::Candidate;
use jobportal_store::{ApplyOutcome, JobStore, ListQuery, UpdateReport};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::owner::{ensure_self, OwnerQuery};
use crate::response::Envelope;
use crate::state::AppState;

/// Body for `PATCH /applied-job/:id`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub name: String,
    pub email: String,
}

/// PATCH /applied-job/:id
///
/// The body email must equal the token identity (403 on mismatch). The
/// duplicate check and the append are a single conditional update in the
/// store, so the same identity cannot double-apply under concurrency.
pub async fn apply_to_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<ApplyRequest>, JsonRejection>,
) -> ApiResult<Json<Envelope<UpdateReport>>> {
    let Json(payload) = body.map_err(|_| ApiError::bad_request("Invalid application data"))?;

    if payload.email != user.email {
        return Err(ApiError::forbidden("Forbidden access"));
    }

    let id = JobStore::parse_id(&id)?;
    let candidate = Candidate {
        name: payload.name,
        email: payload.email,
    };

    match state.store.apply_to_job(&id, &candidate).await? {
        ApplyOutcome::Applied => {
            info!(job_id = %id, email = %candidate.email, "application recorded");
            Ok(Json(Envelope::with_result(
                "Job application successful",
                UpdateReport {
                    matched_count: 1,
                    modified_count: 1,
                },
            )))
        }
        ApplyOutcome::AlreadyApplied => Err(ApiError::Conflict(
            "You have already applied to this job".to_string(),
        )),
        ApplyOutcome::NotFound => Err(ApiError::not_found("Job not found")),
    }
}

/// GET /applied-job/
///
/// Jobs where the authenticated identity appears among the candidates,
/// with the candidate list projected out.
pub async fn list_applied_jobs(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<Envelope<Vec<Value>>>> {
    ensure_self(&user, &query)?;

    let jobs = state
        .store
        .list_jobs(&ListQuery::applied_by(&user.email))
        .await?;
    Ok(Json(Envelope::with_list(
        "Jobs applied retrieved successful",
        jobs,
    )))
}
