//! Request handlers.

pub mod applications;
pub mod health;
pub mod jobs;
pub mod owner;
pub mod session;
