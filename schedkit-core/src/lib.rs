//! Schedkit Core
//!
//! Core types shared by the schedkit client and server crates.
//!
//! This crate contains:
//! - Domain types: records handed back to callers (Environment, LogEntry, etc.)
//! - DTOs: request and response payloads exchanged with the upstream cloud APIs

pub mod domain;
pub mod dto;
