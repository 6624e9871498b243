//! Business logic and repository trait definitions for imgshare.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, plus the services that orchestrate them. It depends only
//! on `imgshare-types` -- never on `imgshare-infra` or any database/IO crate.

pub mod repository;
pub mod service;
