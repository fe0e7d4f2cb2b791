//! MongoDB access layer for the job portal backend.
//!
//! This crate provides:
//! - [`JobStore`]: the process-scoped database handle with explicit
//!   connect / ping / close lifecycle
//! - Typed operations over the `job` collection, including the atomic
//!   apply-to-job update
//! - [`ListQuery`]: parsing of list-endpoint query parameters into a
//!   filter, projection, sort and pagination window

pub mod error;
pub mod query;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use query::ListQuery;
pub use store::{ApplyOutcome, DeleteReport, JobStore, UpdateReport};
