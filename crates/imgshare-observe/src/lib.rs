//! Observability setup for imgshare binaries.
//!
//! Library crates only emit `tracing` events; the binary calls
//! [`tracing_setup::init_tracing`] once at startup.

pub mod tracing_setup;
