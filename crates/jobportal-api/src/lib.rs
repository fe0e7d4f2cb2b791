//! Axum HTTP API server for the job portal.
//!
//! This crate provides:
//! - Cookie-based JWT authentication
//! - Job posting CRUD, owner-scoped operations and the apply action
//! - CORS, request-ID and request-logging middleware

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
