//! Message dispatch.
//!
//! # Data Flow
//! ```text
//! Invocation (wallet path, process, resolved intent)
//!     → Credential::load           (fatal on missing/unparsable file)
//!     → ArweaveSigner::from_credential
//!     → MessageRequest
//!     → Dispatcher::dispatch       (exactly one send)
//!     → outcome.rs report          (stdout on success, stderr on failure)
//! ```
//!
//! # Design Decisions
//! - Credential failures abort before any send is attempted
//! - Send failures are not classified or retried, only reported

pub mod outcome;

use std::path::PathBuf;
use std::sync::Arc;

use crate::ao::{ArweaveSigner, Credential, CredentialError, MessageSender};
use crate::message::{MessageRequest, ResolvedIntent};

pub use outcome::{report, DispatchOutcome};

/// Inputs of a single run.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub wallet_path: PathBuf,
    pub process: String,
    pub intent: ResolvedIntent,
    pub anchor: Option<String>,
}

/// Sends requests through a `MessageSender`, once each.
pub struct Dispatcher<'a, S: ?Sized> {
    sender: &'a S,
}

impl<'a, S: MessageSender + ?Sized> Dispatcher<'a, S> {
    pub fn new(sender: &'a S) -> Self {
        Self { sender }
    }

    /// Invoke the send operation exactly once and capture its outcome.
    pub async fn dispatch(&self, request: MessageRequest) -> DispatchOutcome {
        tracing::info!(
            process = %request.process(),
            tags = request.tags().len(),
            "Dispatching message"
        );

        match self.sender.message(request).await {
            Ok(id) => DispatchOutcome::Delivered(id),
            Err(e) => {
                // the error itself is printed once, by `report`
                tracing::warn!("Dispatch failed");
                DispatchOutcome::Failed(e)
            }
        }
    }
}

/// Load the wallet and build the request for an invocation.
pub fn prepare(invocation: &Invocation) -> Result<MessageRequest, CredentialError> {
    let credential = Credential::load(&invocation.wallet_path)?;
    let signer = ArweaveSigner::from_credential(&credential)?;

    Ok(MessageRequest::new(
        invocation.process.clone(),
        invocation.intent.tags.clone(),
        Arc::new(signer),
    )
    .with_data(invocation.intent.data.clone())
    .with_anchor(invocation.anchor.clone()))
}

/// Run the whole pipeline: prepare the request, then dispatch it once.
///
/// # Errors
/// Returns the credential error without touching `sender` when the wallet
/// cannot be loaded or turned into a signer.
pub async fn run<S: MessageSender + ?Sized>(
    invocation: &Invocation,
    sender: &S,
) -> Result<DispatchOutcome, CredentialError> {
    let request = prepare(invocation)?;

    tracing::info!(
        intent = %invocation.intent.name,
        process = %invocation.process,
        "Request prepared"
    );

    Ok(Dispatcher::new(sender).dispatch(request).await)
}
