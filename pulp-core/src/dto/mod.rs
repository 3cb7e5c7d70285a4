//! Data Transfer Objects
//!
//! Request bodies the client sends to the remote Pulp service. Field names
//! follow the remote service's v2 REST API.

pub mod action;
pub mod distributor;
pub mod importer;
pub mod repository;
