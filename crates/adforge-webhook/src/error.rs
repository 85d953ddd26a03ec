use thiserror::Error;

/// Failures surfaced by [`crate::WebhookClient`]. None are retried.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request could not complete: DNS, connection, TLS, or timeout.
    /// Also covers failure to construct the underlying `reqwest::Client`.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} from {endpoint}")]
    Http { status: u16, endpoint: String },

    /// The response body was not valid JSON.
    #[error("invalid JSON from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON of the wrong shape for the endpoint.
    #[error("invalid response format from {endpoint}: {reason}")]
    Protocol { endpoint: String, reason: String },

    #[error("could not encode request payload: {0}")]
    Encode(#[source] serde_json::Error),
}
