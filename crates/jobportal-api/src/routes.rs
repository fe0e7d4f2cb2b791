//! API routes.

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::applications::{apply_to_job, list_applied_jobs};
use crate::handlers::health::{health, ready};
use crate::handlers::jobs::{create_job, delete_job, get_job, list_jobs, update_job};
use crate::handlers::owner::{delete_my_job, list_my_jobs, update_my_job};
use crate::handlers::session::{issue_jwt, logout};
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/jwt", post(issue_jwt))
        .route("/logout", post(logout));

    // Unscoped CRUD: no authentication on these routes (preserved contract)
    let job_routes = Router::new()
        .route("/job", post(create_job).get(list_jobs))
        .route(
            "/job/:id",
            get(get_job).patch(update_job).delete(delete_job),
        );

    // Owner-scoped routes: token cookie required
    let owner_routes = Router::new()
        .route("/me/job", get(list_my_jobs))
        .route("/me/job/:id", patch(update_my_job).delete(delete_my_job));

    // Apply action and applied-jobs list (clients send the trailing slash)
    let application_routes = Router::new()
        .route("/applied-job/:id", patch(apply_to_job))
        .route("/applied-job", get(list_applied_jobs))
        .route("/applied-job/", get(list_applied_jobs));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    Router::new()
        .merge(session_routes)
        .merge(job_routes)
        .merge(owner_routes)
        .merge(application_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
