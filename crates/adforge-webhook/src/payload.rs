//! Request and response bodies for the discovery and generation webhooks.
//!
//! Field names are the wire names the automation workflows expect,
//! including the `suggession` spelling.

use adforge_core::CampaignParameters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body POSTed to the discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    pub product_name: String,
    pub country: String,
    pub audience: String,
    pub status: String,
    pub media_type: String,
    pub start_date: String,
    pub end_date: String,
    pub max_items: u32,
}

impl From<&CampaignParameters> for DiscoveryRequest {
    fn from(params: &CampaignParameters) -> Self {
        Self {
            product_name: params.product_name.clone(),
            country: params.country.clone(),
            audience: params.audience.clone(),
            status: params.status.label().to_owned(),
            media_type: params.media_types.to_wire(),
            start_date: params.start_date.format("%Y-%m-%d").to_string(),
            end_date: params.end_date.format("%Y-%m-%d").to_string(),
            max_items: params.max_items,
        }
    }
}

/// Per-ad summary inside a [`GenerationRequest`]. Every field is already
/// defaulted; nothing here is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedAdSummary {
    pub ad_archive_id: String,
    pub page_name: String,
    pub cta_text: String,
    pub display_format: String,
    pub cta_type: String,
    pub like_count: u64,
    pub video_analysis: String,
    pub image_analysis: String,
    pub suggession: String,
    pub post_title: String,
    pub caption: String,
}

/// Body POSTed to the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Per-ad video analyses joined with `" | "`.
    pub video_analysis: String,
    pub image_analysis: String,
    pub suggession: String,
    pub user_feedback: String,
    pub selected_ads: Vec<SelectedAdSummary>,
    pub product_name: String,
    pub country: String,
    pub audience: String,
    pub total_ads_selected: usize,
}

/// Parsed generation response. Only string-typed `base`, `mime` and
/// `fileName` values are picked up; anything else reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    pub base: Option<String>,
    pub mime: Option<String>,
    pub file_name: Option<String>,
    /// Opaque metadata from the automation run. Logged, never interpreted.
    pub data: Option<Value>,
}

impl GenerationResponse {
    /// Extracts the known fields from a JSON object.
    #[must_use]
    pub fn from_object(object: &serde_json::Map<String, Value>) -> Self {
        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_owned)
        };
        Self {
            base: text("base"),
            mime: text("mime"),
            file_name: text("fileName"),
            data: object.get("data").cloned(),
        }
    }

    /// The `base` payload, unless missing or blank ("no content produced").
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        adforge_core::non_blank(self.base.as_deref())
    }
}
