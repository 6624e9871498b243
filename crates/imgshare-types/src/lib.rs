//! Shared domain types for imgshare.
//!
//! This crate contains the core domain types used across the workspace:
//! User, Post, ImageModel, the request principal, global configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod image;
pub mod post;
pub mod principal;
pub mod user;
