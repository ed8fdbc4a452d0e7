//! Wallet loading and data item signing.
//!
//! # Security
//! - Key material is read from the wallet file only
//! - Keys are never logged or serialized back to disk
//! - `Debug` output of credentials and signers is redacted

use rsa::pss::{BlindedSigningKey, Signature, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::ao::types::{encode_b64url, AoError, AoResult, ARWEAVE_KEY_LENGTH, ARWEAVE_SIGNATURE_TYPE};

/// Errors raised while loading a wallet or deriving its signer.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Wallet path does not resolve to a file.
    #[error("Wallet file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Wallet file exists but could not be read.
    #[error("Failed to read wallet file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Wallet file is not valid JSON.
    #[error("Failed to parse wallet file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// JSON does not describe a usable Arweave RSA key.
    #[error("Invalid wallet key: {0}")]
    InvalidKey(String),
}

/// Wallet contents as parsed from disk.
///
/// Only syntactic validity is checked here; the key shape is checked when a
/// signer is derived.
#[derive(Clone)]
pub struct Credential(serde_json::Value);

impl Credential {
    /// Read and parse a wallet file.
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => CredentialError::NotFound {
                path: path.to_path_buf(),
            },
            _ => CredentialError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let value = serde_json::from_str(&content).map_err(|source| CredentialError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Wallet file loaded");
        Ok(Self(value))
    }

    /// Wrap an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Arweave JSON Web Key. Components are unpadded base64url big-endian integers.
#[derive(Deserialize)]
struct Jwk {
    kty: String,
    n: String,
    e: String,
    d: String,
    p: String,
    q: String,
}

/// Capability that signs data items on behalf of one owner.
pub trait DataItemSigner: Send + Sync {
    /// ANS-104 signature type tag.
    fn signature_type(&self) -> u16;

    /// Raw owner bytes placed in the data item (the public key).
    fn owner(&self) -> &[u8];

    /// Sign the deep hash of a data item.
    fn sign(&self, message: &[u8]) -> AoResult<Vec<u8>>;
}

/// RSA-PSS (SHA-256) signer for 4096-bit Arweave keys.
pub struct ArweaveSigner {
    key: BlindedSigningKey<Sha256>,
    public: RsaPublicKey,
    owner: Vec<u8>,
}

impl ArweaveSigner {
    /// Derive a signer from a parsed wallet.
    ///
    /// # Errors
    /// `CredentialError::InvalidKey` if the wallet is not an RSA JWK, a
    /// component is not base64url, the components are inconsistent, or the
    /// modulus is not 4096 bits.
    pub fn from_credential(credential: &Credential) -> Result<Self, CredentialError> {
        let jwk: Jwk = serde_json::from_value(credential.as_value().clone())
            .map_err(|e| CredentialError::InvalidKey(format!("unexpected wallet shape: {}", e)))?;

        if jwk.kty != "RSA" {
            return Err(CredentialError::InvalidKey(format!(
                "unsupported key type '{}'",
                jwk.kty
            )));
        }

        let n = decode_component("n", &jwk.n)?;
        let e = decode_component("e", &jwk.e)?;
        let d = decode_component("d", &jwk.d)?;
        let p = decode_component("p", &jwk.p)?;
        let q = decode_component("q", &jwk.q)?;

        let private = RsaPrivateKey::from_components(n, e, d, vec![p, q])
            .map_err(|e| CredentialError::InvalidKey(e.to_string()))?;
        private
            .validate()
            .map_err(|e| CredentialError::InvalidKey(e.to_string()))?;

        let owner = private.n().to_bytes_be();
        if owner.len() != ARWEAVE_KEY_LENGTH {
            return Err(CredentialError::InvalidKey(format!(
                "expected a 4096-bit modulus, got {} bits",
                owner.len() * 8
            )));
        }

        let public = private.to_public_key();
        let signer = Self {
            key: BlindedSigningKey::new(private),
            public,
            owner,
        };

        tracing::info!(address = %signer.address(), "Signer initialized");
        Ok(signer)
    }

    /// Wallet address: base64url of SHA-256 over the owner.
    pub fn address(&self) -> String {
        encode_b64url(&Sha256::digest(&self.owner))
    }

    /// Check a signature produced by this signer.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::try_from(signature) else {
            return false;
        };
        VerifyingKey::<Sha256>::new(self.public.clone())
            .verify(message, &signature)
            .is_ok()
    }
}

impl DataItemSigner for ArweaveSigner {
    fn signature_type(&self) -> u16 {
        ARWEAVE_SIGNATURE_TYPE
    }

    fn owner(&self) -> &[u8] {
        &self.owner
    }

    fn sign(&self, message: &[u8]) -> AoResult<Vec<u8>> {
        self.key
            .try_sign_with_rng(&mut rand::thread_rng(), message)
            .map(|signature| signature.to_vec())
            .map_err(|e| AoError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for ArweaveSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArweaveSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

fn decode_component(name: &str, value: &str) -> Result<BigUint, CredentialError> {
    URL_SAFE_NO_PAD
        .decode(value.trim_end_matches('='))
        .map(|bytes| BigUint::from_bytes_be(&bytes))
        .map_err(|e| CredentialError::InvalidKey(format!("component '{}': {}", name, e)))
}
