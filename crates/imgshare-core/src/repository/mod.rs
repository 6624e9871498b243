//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (imgshare-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod image;
pub mod memory;
pub mod post;
pub mod user;
