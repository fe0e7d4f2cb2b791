//! Public job CRUD.
//!
//! These routes carry no authentication: anyone can post, list, fetch,
//! overwrite or delete a job by id. The owner-scoped variants live in
//! [`crate::handlers::owner`].

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use jobportal_models::CreateJobRequest;
use jobportal_store::{DeleteReport, JobStore, ListQuery, UpdateReport};

use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::state::AppState;

/// Insert acknowledgement carried in the `POST /job` response.
#[derive(Debug, Serialize)]
pub struct InsertResult {
    pub inserted_id: String,
}

/// POST /job
///
/// Field presence is enforced structurally by the typed payload (a salary
/// of `0` deserializes fine), emptiness and deadline format by
/// `CreateJobRequest::into_job`. Nothing is written on failure.
pub async fn create_job(
    State(state): State<AppState>,
    body: Result<Json<CreateJobRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<InsertResult>>)> {
    let Json(payload) = body.map_err(|_| ApiError::bad_request("Invalid job data"))?;
    let job = payload.into_job()?;

    let inserted_id = state.store.insert_job(&job).await?;
    info!(job_id = %inserted_id, owner = %job.created_by.email, "job created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_result(
            "Job added successful",
            InsertResult { inserted_id },
        )),
    ))
}

/// GET /job
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Envelope<Vec<Value>>>> {
    let query = ListQuery::from_params(&params);
    let jobs = state.store.list_jobs(&query).await?;
    Ok(Json(Envelope::with_list("Jobs retrieved successful", jobs)))
}

/// GET /job/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Value>>> {
    let id = JobStore::parse_id(&id)?;
    let job = state
        .store
        .find_job(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(Envelope::with_result("Job retrieved successful", job)))
}

/// PATCH /job/:id
///
/// Wholesale `$set` of the raw body. No field allowlist; `_id` is stripped
/// in the store.
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Envelope<UpdateReport>>> {
    let id = JobStore::parse_id(&id)?;
    let changes = update_document(body)?;
    let report = state.store.update_job(&id, changes).await?;
    Ok(Json(Envelope::with_result("Job update successful", report)))
}

/// DELETE /job/:id
///
/// Idempotent to the caller: deleting an already-deleted id reports a zero
/// count instead of erroring.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<DeleteReport>>> {
    let id = JobStore::parse_id(&id)?;
    let report = state.store.delete_job(&id).await?;
    Ok(Json(Envelope::with_result("Job delete successful", report)))
}

/// Turn a raw PATCH body into a non-empty update document.
pub(crate) fn update_document(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<bson::Document, ApiError> {
    let Json(value) = body.map_err(|_| ApiError::bad_request("Invalid update data"))?;
    let changes = bson::to_document(&value)
        .map_err(|_| ApiError::bad_request("update body must be a JSON object"))?;
    if changes.is_empty() || (changes.len() == 1 && changes.contains_key("_id")) {
        return Err(ApiError::bad_request("update body is empty"));
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_document_rejects_non_objects_and_empty_bodies() {
        let body = Ok(Json(serde_json::json!({ "title": "New title" })));
        let doc = update_document(body).unwrap();
        assert_eq!(doc.get_str("title").unwrap(), "New title");

        let body = Ok(Json(serde_json::json!([1, 2, 3])));
        assert!(update_document(body).is_err());

        let body = Ok(Json(serde_json::json!({})));
        assert!(update_document(body).is_err());

        // a body that only names the immutable field is effectively empty
        let body = Ok(Json(serde_json::json!({ "_id": "abc" })));
        assert!(update_document(body).is_err());
    }
}
