//! Tracing-based observability.
//!
//! The interactive core instruments its hot paths (filter compilation, key
//! resolution) with `tracing` spans and structured events. This module wires
//! up the subscriber that makes them visible.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup

mod init;

pub use init::init_tracing;
