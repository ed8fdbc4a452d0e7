//! Shared ao types and error definitions.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

/// Signature type tag for Arweave (RSA-PSS 4096) data items.
pub const ARWEAVE_SIGNATURE_TYPE: u16 = 1;

/// Length in bytes of an Arweave signature and owner (4096-bit modulus).
pub const ARWEAVE_KEY_LENGTH: usize = 512;

/// Identifier of a signed message: base64url of SHA-256 over its signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Errors raised while encoding or signing a data item.
#[derive(Debug, Error)]
pub enum AoError {
    /// Identifier is not 32 bytes of base64url.
    #[error("Invalid {field}: {reason}")]
    InvalidId { field: &'static str, reason: String },

    /// Tag list violates ANS-104 limits.
    #[error("Invalid tags: {0}")]
    InvalidTags(String),

    /// Signing operation failed.
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Result type for ao encoding operations.
pub type AoResult<T> = Result<T, AoError>;

/// Errors surfaced by a send operation.
///
/// The dispatcher never inspects the variant; it only prints it.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Message could not be built or signed.
    #[error(transparent)]
    Encoding(#[from] AoError),

    /// Connection or protocol failure before a response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Remote unit answered with a non-success status.
    #[error("Remote rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Response body was not what the unit is expected to return.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Decode a 43-character base64url transaction id into its 32 raw bytes.
pub fn decode_id(field: &'static str, id: &str) -> AoResult<[u8; 32]> {
    let bytes = URL_SAFE_NO_PAD
        .decode(id.trim_end_matches('='))
        .map_err(|e| AoError::InvalidId {
            field,
            reason: e.to_string(),
        })?;

    bytes.try_into().map_err(|bytes: Vec<u8>| AoError::InvalidId {
        field,
        reason: format!("expected 32 bytes, got {}", bytes.len()),
    })
}

/// Encode raw bytes as unpadded base64url.
pub fn encode_b64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}
