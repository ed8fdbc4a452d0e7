//! Outbound message request.

use std::sync::Arc;

use crate::ao::wallet::DataItemSigner;
use crate::message::tag::Tag;

/// Everything a sender needs to deliver one message.
///
/// Built fresh per invocation and not mutated after construction.
#[derive(Clone)]
pub struct MessageRequest {
    process: String,
    tags: Vec<Tag>,
    signer: Arc<dyn DataItemSigner>,
    data: Option<String>,
    anchor: Option<String>,
}

impl MessageRequest {
    /// Create a request for `process` carrying `tags`, signed by `signer`.
    pub fn new(process: impl Into<String>, tags: Vec<Tag>, signer: Arc<dyn DataItemSigner>) -> Self {
        Self {
            process: process.into(),
            tags,
            signer,
            data: None,
            anchor: None,
        }
    }

    /// Attach a data payload. Without one, the sender picks a placeholder.
    pub fn with_data(mut self, data: Option<String>) -> Self {
        self.data = data;
        self
    }

    /// Attach a 32-byte anchor.
    pub fn with_anchor(mut self, anchor: Option<String>) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn process(&self) -> &str {
        &self.process
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn signer(&self) -> &dyn DataItemSigner {
        self.signer.as_ref()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }
}

impl std::fmt::Debug for MessageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageRequest")
            .field("process", &self.process)
            .field("tags", &self.tags)
            .field("data", &self.data)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}
