//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → command-line overrides (main.rs)
//!     → DispatchConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - Every field has a default, so running without a file reproduces the
//!   stock debug-send message
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{DispatchConfig, NetworkConfig, ObservabilityConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
