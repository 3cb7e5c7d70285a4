//! Pulp Core
//!
//! Core types shared by the Pulp proxy components.
//!
//! This crate contains:
//! - Domain types: what the remote Pulp service hands back (repositories, tasks)
//! - DTOs: request bodies sent to the remote Pulp service

pub mod domain;
pub mod dto;
