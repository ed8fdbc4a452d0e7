//! Message intents and outbound requests.
//!
//! # Data Flow
//! ```text
//! intent name + extra tags + data override
//!     → intent.rs (catalog lookup, exactly one resolved intent)
//!     → request.rs (process + tags + signer + data, immutable)
//!     → handed by value to a MessageSender
//! ```

pub mod intent;
pub mod request;
pub mod tag;

pub use intent::{Intent, IntentCatalog, IntentError, IntentSelection, ResolvedIntent, DEFAULT_INTENT};
pub use request::MessageRequest;
pub use tag::Tag;
