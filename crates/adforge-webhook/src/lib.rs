pub mod client;
pub mod error;
pub mod payload;

pub use client::WebhookClient;
pub use error::WebhookError;
pub use payload::{DiscoveryRequest, GenerationRequest, GenerationResponse, SelectedAdSummary};
pub use reqwest::Url;
