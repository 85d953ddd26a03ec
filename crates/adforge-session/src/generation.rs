//! Builds the generation webhook request and turns its response into
//! displayable creatives.
//!
//! Missing analysis text is defaulted once, in [`NormalizedAd`], before any
//! field is joined or copied into the request.

use adforge_core::{
    build_media_url, generated_image_item, generated_video_item, non_blank, AdRecord,
    CampaignParameters, GeneratedContentItem,
};
use adforge_webhook::{GenerationRequest, GenerationResponse, SelectedAdSummary};

use crate::validator::has_identity_and_format;

pub const NO_VIDEO_ANALYSIS: &str = "No video analysis available";
pub const NO_IMAGE_ANALYSIS: &str = "No image analysis available";
pub const NO_SUGGESTIONS: &str = "No suggestions available";

/// Feedback sent by the "go through" action, and in place of blank input.
pub const DEFAULT_FEEDBACK: &str = "Generate content based on selected ads";

const ANALYSIS_SEPARATOR: &str = " | ";

/// An ad with every field the generation request needs resolved to a value.
struct NormalizedAd {
    summary: SelectedAdSummary,
}

impl NormalizedAd {
    fn from_record(ad: &AdRecord) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let or_placeholder = |value: &Option<String>, placeholder: &str| {
            non_blank(value.as_deref())
                .unwrap_or(placeholder)
                .to_owned()
        };

        Self {
            summary: SelectedAdSummary {
                ad_archive_id: text(&ad.ad_archive_id),
                page_name: text(&ad.snapshot_page_name),
                cta_text: text(&ad.snapshot_cta_text),
                display_format: text(&ad.snapshot_display_format),
                cta_type: text(&ad.snapshot_cta_type),
                like_count: ad.snapshot_page_like_count.unwrap_or(0),
                video_analysis: or_placeholder(&ad.video_analysis, NO_VIDEO_ANALYSIS),
                image_analysis: or_placeholder(&ad.image_analysis, NO_IMAGE_ANALYSIS),
                suggession: or_placeholder(&ad.suggession, NO_SUGGESTIONS),
                post_title: text(&ad.post_title),
                caption: text(&ad.snapshot_caption),
            },
        }
    }
}

/// Builds the generation request from the confirmed selection.
///
/// Only ads passing the identity and format checks are included; the joined
/// analysis strings and `total_ads_selected` cover the same subset.
#[must_use]
pub fn build_generation_request(
    selection: &[AdRecord],
    feedback: &str,
    campaign: &CampaignParameters,
) -> GenerationRequest {
    let normalized: Vec<NormalizedAd> = selection
        .iter()
        .filter(|ad| has_identity_and_format(ad))
        .map(NormalizedAd::from_record)
        .collect();

    let join = |field: fn(&SelectedAdSummary) -> &str| {
        normalized
            .iter()
            .map(|ad| field(&ad.summary))
            .collect::<Vec<_>>()
            .join(ANALYSIS_SEPARATOR)
    };

    let video_analysis = join(|s| s.video_analysis.as_str());
    let image_analysis = join(|s| s.image_analysis.as_str());
    let suggession = join(|s| s.suggession.as_str());
    let selected_ads: Vec<SelectedAdSummary> =
        normalized.into_iter().map(|ad| ad.summary).collect();

    GenerationRequest {
        video_analysis,
        image_analysis,
        suggession,
        user_feedback: feedback.to_owned(),
        total_ads_selected: selected_ads.len(),
        selected_ads,
        product_name: campaign.product_name.clone(),
        country: campaign.country.clone(),
        audience: campaign.audience.clone(),
    }
}

/// The creatives to show after a generation attempt.
///
/// A response with content yields the generated image followed by the local
/// video; anything else yields only the video.
#[must_use]
pub fn generated_content(
    response: Option<&GenerationResponse>,
    feedback: &str,
    sample_video_path: &str,
) -> Vec<GeneratedContentItem> {
    let mut items = Vec::with_capacity(2);
    if let Some(response) = response {
        if let Some(base) = response.content() {
            let media_url = build_media_url(base, response.mime.as_deref());
            items.push(generated_image_item(
                &media_url,
                response.file_name.as_deref(),
                response.mime.as_deref(),
                feedback,
            ));
        }
    }
    items.push(generated_video_item(sample_video_path, feedback));
    items
}
