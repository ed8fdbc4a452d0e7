//! Send one signed message to an ao process.
//!
//! The crate is organized as a small pipeline:
//! - [`config`]: TOML configuration, defaults and validation
//! - [`message`]: named intents, tags and the outbound request
//! - [`ao`]: wallet loading, data item signing and the MU/CU client
//! - [`dispatch`]: the exactly-once send and console reporting
//! - [`observability`]: logging setup

pub mod ao;
pub mod config;
pub mod dispatch;
pub mod message;
pub mod observability;

pub use ao::{MessageSender, MuClient};
pub use config::DispatchConfig;
pub use dispatch::{DispatchOutcome, Dispatcher, Invocation};
