//! Messenger/compute unit HTTP client.
//!
//! # Responsibilities
//! - Turn a `MessageRequest` into a signed data item
//! - Upload it to the messenger unit (MU) once
//! - Optionally read the evaluation result back from the compute unit (CU)
//!
//! # Design Decisions
//! - No retries: a failed upload is returned to the caller as-is
//! - Every request is bounded by the configured timeout

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

use crate::ao::data_item::{DataItem, DataItemFields};
use crate::ao::types::{AoResult, DispatchError, MessageId};
use crate::config::{DispatchConfig, NetworkConfig};
use crate::message::{MessageRequest, Tag};

/// Tags identifying the message to ao units, appended after the caller's tags.
pub const PROTOCOL_TAGS: [(&str, &str); 4] = [
    ("Data-Protocol", "ao"),
    ("Variant", "ao.TN.1"),
    ("Type", "Message"),
    ("SDK", "aoconnect"),
];

/// A fallible send operation with exactly two outcomes.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Deliver one message, returning its id.
    async fn message(&self, request: MessageRequest) -> Result<MessageId, DispatchError>;
}

/// Client for the ao messenger and compute units.
#[derive(Clone)]
pub struct MuClient {
    http: reqwest::Client,
    network: NetworkConfig,
    timeout_secs: u64,
}

impl MuClient {
    /// Create a client from the network and timeout sections of `config`.
    pub fn new(config: &DispatchConfig) -> Result<Self, DispatchError> {
        let timeout_secs = config.timeouts.request_secs;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            network: config.network.clone(),
            timeout_secs,
        })
    }

    /// Build and sign the data item for a request.
    ///
    /// Protocol tags follow the request's tags. A request without data gets
    /// a random four digit placeholder.
    pub fn build_data_item(&self, request: &MessageRequest) -> AoResult<DataItem> {
        let mut tags = request.tags().to_vec();
        tags.extend(PROTOCOL_TAGS.iter().map(|(name, value)| Tag::new(*name, *value)));

        let data = match request.data() {
            Some(data) => data.to_string(),
            None => format!("{:04}", rand::thread_rng().gen_range(0..10_000)),
        };

        DataItem::sign(
            request.signer(),
            DataItemFields {
                target: Some(request.process()),
                anchor: request.anchor(),
                tags: &tags,
                data: data.as_bytes(),
            },
        )
    }

    /// Fetch the evaluation result of a delivered message from the CU.
    pub async fn result(
        &self,
        id: &MessageId,
        process: &str,
    ) -> Result<serde_json::Value, DispatchError> {
        let url = format!("{}/result/{}", self.network.cu_url.trim_end_matches('/'), id);
        tracing::debug!(url = %url, process = %process, "Fetching message result");

        let res = self
            .http
            .get(&url)
            .query(&[("process-id", process)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| DispatchError::UnexpectedResponse(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> DispatchError {
        if e.is_timeout() {
            DispatchError::Timeout(self.timeout_secs)
        } else {
            DispatchError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl MessageSender for MuClient {
    async fn message(&self, request: MessageRequest) -> Result<MessageId, DispatchError> {
        let item = self.build_data_item(&request)?;
        let id = item.id().clone();

        tracing::debug!(
            mu_url = %self.network.mu_url,
            message_id = %id,
            size = item.as_bytes().len(),
            "Uploading message"
        );

        let res = self
            .http
            .post(&self.network.mu_url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(ACCEPT, "application/json")
            .body(item.into_bytes())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(message_id = %id, "Message accepted by MU");
        Ok(id)
    }
}

impl std::fmt::Debug for MuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MuClient")
            .field("mu_url", &self.network.mu_url)
            .field("cu_url", &self.network.cu_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
