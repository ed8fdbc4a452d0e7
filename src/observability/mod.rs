//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`, written to stderr so stdout
//!   carries only the dispatch outcome
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
