//! Core domain types
//!
//! These types are converted from the remote service's raw JSON replies and are
//! shared between the client (which produces them) and the proxy and CLI (which
//! render them). None of them are persisted locally.

pub mod repository;
pub mod task;
