//! Data Transfer Objects for the upstream cloud APIs
//!
//! Wire shapes of the Composer, Vertex AI, Cloud Storage and Cloud Logging
//! REST APIs, plus the request bodies accepted from the notebook UI.

pub mod environment;
pub mod log;
pub mod schedule;

mod lenient;
