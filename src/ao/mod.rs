//! ao network integration subsystem.
//!
//! # Data Flow
//! ```text
//! wallet.json (Arweave JWK)
//!     → wallet.rs (credential loading, signer derivation)
//!     → data_item.rs (tag encoding, deep-hash signature data, binary layout)
//!     → client.rs (sign, POST to the messenger unit, optional result lookup)
//! ```
//!
//! # Security Constraints
//! - Key material comes only from the wallet file
//! - Never log private key components
//! - Every network call is bounded by the configured request timeout

pub mod client;
pub mod data_item;
pub mod deep_hash;
pub mod types;
pub mod wallet;

pub use client::{MessageSender, MuClient};
pub use types::{AoError, AoResult, DispatchError, MessageId};
pub use wallet::{ArweaveSigner, Credential, CredentialError, DataItemSigner};
