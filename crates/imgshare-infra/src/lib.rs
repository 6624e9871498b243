//! Infrastructure layer for imgshare.
//!
//! Contains implementations of the repository traits defined in `imgshare-core`
//! (SQLite storage) plus configuration loading and data directory resolution.

pub mod config;
pub mod sqlite;
