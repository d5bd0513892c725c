//! Schedkit Server
//!
//! HTTP handlers proxying a notebook scheduler UI to Google Cloud:
//! - Composer environment directory
//! - Vertex AI notebook schedules and Cloud Storage buckets
//! - Cloud Logging entries
//!
//! Each request acquires a credential, opens its own HTTP session, makes one
//! upstream call and answers with JSON. Failures are answered with
//! `200 OK` and an `{"error": ...}` body.

pub mod api;
pub mod config;
pub mod credentials;
pub mod state;
