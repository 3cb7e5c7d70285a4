//! Service Module
//!
//! Business logic between the HTTP handlers and the remote Pulp client.

pub mod repo;

pub use repo as repo_service;
