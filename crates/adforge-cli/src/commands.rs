//! Non-interactive subcommands.
//!
//! `discover` runs one discovery call from flags; `validate` runs the
//! renderability filter over a saved batch. Both print JSON to stdout so the
//! output can be piped.

use std::path::Path;
use std::str::FromStr;

use adforge_core::{AdRecord, AppConfig, CampaignDraft, CampaignParameters, MediaTypeSet, StatusFilter};
use adforge_session::filter_renderable;
use adforge_webhook::{DiscoveryRequest, WebhookClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiscoverArgs {
    pub product: String,
    pub country: String,
    pub audience: String,
    pub status: String,
    pub media: String,
    pub start: String,
    pub end: String,
    pub max_items: u32,
}

impl DiscoverArgs {
    /// Runs the flags through the same validation as the wizard form.
    fn to_campaign(&self) -> anyhow::Result<CampaignParameters> {
        let mut draft = CampaignDraft {
            product_name: self.product.clone(),
            country: self.country.clone(),
            audience: self.audience.clone(),
            status: Some(StatusFilter::from_str(&self.status)?),
            media_types: MediaTypeSet::from_str(&self.media)?,
            max_items: self.max_items,
            ..CampaignDraft::default()
        };
        draft.set_start_date(&self.start)?;
        draft.set_end_date(&self.end)?;
        Ok(draft.submit()?)
    }
}

/// One discovery call; prints the renderable ads as a JSON array.
///
/// # Errors
///
/// Returns an error if the flags are invalid or the webhook call fails.
pub(crate) async fn run_discover(config: &AppConfig, args: &DiscoverArgs) -> anyhow::Result<()> {
    let campaign = args.to_campaign()?;
    let client = WebhookClient::new(config.webhook_timeout_secs, &config.user_agent)?;

    let ads = client
        .discover(&config.discovery_url, &DiscoveryRequest::from(&campaign))
        .await?;
    let renderable = filter_renderable(&ads);
    tracing::info!(
        fetched = ads.len(),
        renderable = renderable.len(),
        "discovery finished"
    );

    println!("{}", serde_json::to_string_pretty(&renderable)?);
    Ok(())
}

/// Reads a JSON array of ad records from `file` and prints the renderable
/// subset.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// objects.
pub(crate) fn run_validate(file: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let ads = parse_batch(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not a JSON array of ad records: {e}", file.display()))?;

    let renderable = filter_renderable(&ads);
    tracing::info!(
        total = ads.len(),
        renderable = renderable.len(),
        dropped = ads.len() - renderable.len(),
        "validation finished"
    );

    println!("{}", serde_json::to_string_pretty(&renderable)?);
    Ok(())
}

fn parse_batch(raw: &str) -> Result<Vec<AdRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> DiscoverArgs {
        DiscoverArgs {
            product: "Fitness App".to_string(),
            country: "US".to_string(),
            audience: "Sports Fans".to_string(),
            status: "inactive".to_string(),
            media: "Image, Video".to_string(),
            start: "2025-01-01".to_string(),
            end: "2025-01-31".to_string(),
            max_items: 5,
        }
    }

    #[test]
    fn discover_args_build_campaign() {
        let campaign = args().to_campaign().unwrap();
        assert_eq!(campaign.status, StatusFilter::Inactive);
        assert_eq!(campaign.media_types.to_wire(), "Video, Image");
        assert_eq!(campaign.max_items, 5);
    }

    #[test]
    fn discover_args_reject_bad_status_and_dates() {
        let mut bad_status = args();
        bad_status.status = "Paused".to_string();
        assert!(bad_status.to_campaign().is_err());

        let mut bad_date = args();
        bad_date.start = "01/01/2025".to_string();
        assert!(bad_date.to_campaign().is_err());

        let mut zero = args();
        zero.max_items = 0;
        assert!(zero.to_campaign().is_err());
    }

    #[test]
    fn parse_batch_accepts_loose_records() {
        let ads = parse_batch(
            r#"[{"ad_archive_id": 7, "snapshot_page_name": "Acme", "snapshot_page_like_count": "1,200"}]"#,
        )
        .unwrap();
        assert_eq!(ads[0].id(), Some("7"));
        assert_eq!(ads[0].snapshot_page_like_count, Some(1200));
    }

    #[test]
    fn parse_batch_rejects_non_arrays() {
        assert!(parse_batch(r#"{"ad_archive_id": "1"}"#).is_err());
    }
}
