//! HTTP client for the remote storage collaborator.
//!
//! Posts a storage payload to the configured endpoint and hands back the raw
//! status and body for the relay to interpret.

use super::RelayError;
use crate::storage::StoragePayload;
use reqwest::{StatusCode, Url};

/// Makes requests to the storage collaborator endpoint.
///
pub struct Client {
    endpoint: Url,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given endpoint.
    ///
    pub fn new(endpoint: &str) -> Result<Self, RelayError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| RelayError::InvalidEndpoint(e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(RelayError::InvalidEndpoint(format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }
        Ok(Client {
            endpoint,
            http_client: reqwest::Client::builder()
                .build()
                .map_err(RelayError::ClientBuild)?,
        })
    }

    /// Send one payload and return the response status and body.
    ///
    pub async fn post(&self, payload: &StoragePayload) -> Result<(StatusCode, Vec<u8>), reqwest::Error> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }
}
