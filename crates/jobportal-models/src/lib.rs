//! Shared data models for the job portal backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job documents and their embedded company / poster / candidate objects
//! - The job creation payload and its validation
//! - Deadline normalization to the stored timestamp format

pub mod deadline;
pub mod job;

pub use deadline::{normalize_deadline, now_timestamp, DeadlineError};
pub use job::{Candidate, Company, CreateJobRequest, Job, JobValidationError, PostedBy};
