//! Core domain types
//!
//! Records produced or consumed by the service wrappers. None of these are
//! persisted; each lives for the duration of a single request.

pub mod credential;
pub mod environment;
pub mod log;
pub mod schedule;
