//! HTTP client for the automation webhooks.
//!
//! [`WebhookClient::send`] is the generic contract: POST a JSON body, wait for
//! the whole response, parse it as JSON, and map every failure onto
//! [`WebhookError`]. The typed helpers layer the per-endpoint shape checks on
//! top. There is no retry and, unless configured, no timeout.

use std::time::Duration;

use adforge_core::AdRecord;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::WebhookError;
use crate::payload::{DiscoveryRequest, GenerationRequest, GenerationResponse};

/// Client for the discovery and generation webhooks.
///
/// Endpoints are passed per call so one client can serve both, and tests can
/// point it at a mock server.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    /// Creates a client with the given `User-Agent` and optional request
    /// timeout. `None` leaves requests unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: Option<u64>, user_agent: &str) -> Result<Self, WebhookError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// POSTs `payload` as JSON to `endpoint` and returns the parsed response.
    ///
    /// The response shape is not checked here.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::Transport`] if the request cannot complete.
    /// - [`WebhookError::Http`] on a non-2xx status.
    /// - [`WebhookError::Decode`] if the body is not valid JSON.
    pub async fn send(&self, endpoint: &Url, payload: &Value) -> Result<Value, WebhookError> {
        tracing::info!(endpoint = %endpoint, "sending webhook request");
        tracing::debug!(endpoint = %endpoint, %payload, "webhook payload");

        let result = self.send_inner(endpoint, payload).await;
        if let Err(e) = &result {
            tracing::warn!(endpoint = %endpoint, %payload, error = %e, "webhook request failed");
        }
        result
    }

    async fn send_inner(&self, endpoint: &Url, payload: &Value) -> Result<Value, WebhookError> {
        let response = self
            .client
            .post(endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        tracing::info!(endpoint = %endpoint, status = status.as_u16(), "webhook responded");
        if !status.is_success() {
            return Err(WebhookError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: Value = serde_json::from_str(&body).map_err(|e| WebhookError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        tracing::debug!(endpoint = %endpoint, response = %parsed, "webhook response data");
        Ok(parsed)
    }

    /// Runs a discovery query and returns the ad batch.
    ///
    /// Every returned record has `selected == false`. Array elements that are
    /// not JSON objects are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Everything [`send`](Self::send) returns, plus [`WebhookError::Protocol`]
    /// when the response is not a JSON array.
    pub async fn discover(
        &self,
        endpoint: &Url,
        request: &DiscoveryRequest,
    ) -> Result<Vec<AdRecord>, WebhookError> {
        let payload = serde_json::to_value(request).map_err(WebhookError::Encode)?;
        let body = self.send(endpoint, &payload).await?;

        let items = match body {
            Value::Array(items) => items,
            other => {
                return Err(WebhookError::Protocol {
                    endpoint: endpoint.to_string(),
                    reason: format!("expected a JSON array, got {}", json_kind(&other)),
                })
            }
        };

        let total = items.len();
        let records: Vec<AdRecord> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| parse_record(index, item))
            .collect();

        tracing::info!(
            endpoint = %endpoint,
            received = total,
            parsed = records.len(),
            "discovery batch parsed"
        );
        Ok(records)
    }

    /// Sends a generation request.
    ///
    /// A response object without `base` is returned as-is; deciding that it
    /// means "no content" is left to the caller.
    ///
    /// # Errors
    ///
    /// Everything [`send`](Self::send) returns, plus [`WebhookError::Protocol`]
    /// when the response is not a JSON object.
    pub async fn generate(
        &self,
        endpoint: &Url,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, WebhookError> {
        let payload = serde_json::to_value(request).map_err(WebhookError::Encode)?;
        let body = self.send(endpoint, &payload).await?;

        match body.as_object() {
            Some(object) => Ok(GenerationResponse::from_object(object)),
            None => Err(WebhookError::Protocol {
                endpoint: endpoint.to_string(),
                reason: format!("expected a JSON object, got {}", json_kind(&body)),
            }),
        }
    }

    /// Downloads raw bytes with a GET, used to save remotely hosted creatives.
    ///
    /// # Errors
    ///
    /// [`WebhookError::Transport`] or [`WebhookError::Http`].
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, WebhookError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Http {
                status: status.as_u16(),
                endpoint: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

fn parse_record(index: usize, item: Value) -> Option<AdRecord> {
    if !item.is_object() {
        tracing::warn!(index, kind = json_kind(&item), "skipping non-object ad record");
        return None;
    }
    match serde_json::from_value::<AdRecord>(item) {
        Ok(mut record) => {
            record.selected = false;
            Some(record)
        }
        Err(e) => {
            tracing::warn!(index, error = %e, "skipping unparseable ad record");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
