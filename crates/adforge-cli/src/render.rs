//! Plain-text rendering of the wizard screens.

use std::borrow::Cow;

use adforge_core::{AdRecord, CampaignParameters, MediaKind};

/// Post titles longer than this are cut and suffixed with `...`.
pub(crate) const TITLE_LIMIT: usize = 100;

pub(crate) const WELCOME_MESSAGE: &str = "Welcome to your AI Strategy Session! I'm here to help \
you create amazing ad content. Based on high-performing patterns, I recommend creating ads with:

  - Strong emotional hooks in the first 3 seconds
  - Clear value propositions with specific benefits
  - User-generated content style for authenticity
  - Call-to-action buttons with urgency (\"Start Free Trial\")

What specific aspect of your product would you like to highlight most?";

pub(crate) const ACK_MESSAGE: &str = "Perfect! I'm analyzing your feedback and the selected ads \
to create personalized content. This will combine the best elements from the high-performing ads \
with your specific requirements.";

/// Compact like counts: `1.2K`, `3.4M`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

pub(crate) fn truncate_title(title: &str) -> Cow<'_, str> {
    if title.chars().count() > TITLE_LIMIT {
        let head: String = title.chars().take(TITLE_LIMIT).collect();
        Cow::Owned(format!("{head}..."))
    } else {
        Cow::Borrowed(title)
    }
}

/// The steps shown while the discovery call is in flight.
pub(crate) fn processing_steps(campaign: &CampaignParameters) -> [(&'static str, String); 4] {
    [
        (
            "Connecting to Meta Ad Database",
            "Establishing secure connection to webhook".to_string(),
        ),
        (
            "Filtering by Audience",
            format!(
                "Searching for {} in {}",
                campaign.audience, campaign.country
            ),
        ),
        (
            "Analyzing Performance",
            "Processing ad performance metrics and engagement data".to_string(),
        ),
        (
            "AI Analysis Complete",
            "Generating personalized ad recommendations".to_string(),
        ),
    ]
}

pub(crate) fn print_landing() {
    println!();
    println!("  Discover Top-Performing Meta Ads");
    println!();
    println!("  Analyze the best-performing ads in your category and create campaigns");
    println!("  that convert with AI-powered insights.");
    println!();
    println!("  * Smart Targeting        AI-powered audience analysis");
    println!("  * Performance Insights   Real-time metrics & analytics");
    println!("  * Instant Results        Get top ads in seconds");
    println!();
}

pub(crate) fn print_processing(campaign: &CampaignParameters) {
    println!();
    println!("Analyzing Meta Ads for {}", campaign.product_name);
    for (index, (step, desc)) in processing_steps(campaign).iter().enumerate() {
        println!("  [{}/4] {step}: {desc}", index + 1);
    }
}

/// One numbered card on the results screen.
pub(crate) fn print_ad(number: usize, ad: &AdRecord) {
    let mark = if ad.selected { "[x]" } else { "[ ]" };
    let page = ad.snapshot_page_name.as_deref().unwrap_or_default();
    let format = ad.snapshot_display_format.as_deref().unwrap_or_default();
    let likes = format_count(ad.snapshot_page_like_count.unwrap_or(0));

    println!("{mark} {number:>2}. {page} ({format}, {likes} likes)");
    if let Some(title) = ad.post_title.as_deref().filter(|t| !t.trim().is_empty()) {
        println!("        {}", truncate_title(title));
    }
    if let Some(cta) = ad.snapshot_cta_text.as_deref().filter(|t| !t.trim().is_empty()) {
        println!("        CTA: {cta}");
    }
    if let Some(url) = ad.media_url() {
        println!("        {}: {url}", media_label(ad.media_kind()));
    }
}

/// One generated creative on the feedback screen.
pub(crate) fn print_generated(number: usize, item: &AdRecord) {
    let page = item.snapshot_page_name.as_deref().unwrap_or_default();
    let title = item.snapshot_title.as_deref().unwrap_or_default();
    println!("  {number}. {page}: {title}");
    if let Some(caption) = item.snapshot_caption.as_deref() {
        println!("     {caption}");
    }
    if let Some(info) = item.snapshot_additional_info.as_deref() {
        println!("     {info}");
    }
    if let Some(url) = item.media_url() {
        println!("     {}: {}", media_label(item.media_kind()), preview_url(url));
    }
}

pub(crate) fn print_assistant(text: &str) {
    println!();
    for line in text.lines() {
        println!("  AI | {line}");
    }
}

fn media_label(kind: Option<MediaKind>) -> &'static str {
    match kind {
        Some(MediaKind::Video) => "video",
        Some(MediaKind::Image) => "image",
        None => "media",
    }
}

/// Inline `data:` URLs can run to megabytes; show only their header.
fn preview_url(url: &str) -> Cow<'_, str> {
    match url.split_once(',') {
        Some((header, payload)) if url.starts_with("data:") => {
            Cow::Owned(format!("{header},... ({} bytes of base64)", payload.len()))
        }
        _ => Cow::Borrowed(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_uses_compact_suffixes() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_234), "1.2K");
        assert_eq!(format_count(3_400_000), "3.4M");
    }

    #[test]
    fn truncate_title_keeps_short_titles() {
        assert_eq!(truncate_title("Get fit"), "Get fit");
        let exact = "a".repeat(TITLE_LIMIT);
        assert_eq!(truncate_title(&exact), exact.as_str());
    }

    #[test]
    fn truncate_title_cuts_long_titles_on_char_boundaries() {
        let long = "é".repeat(TITLE_LIMIT + 5);
        let cut = truncate_title(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), TITLE_LIMIT + 3);
    }

    #[test]
    fn processing_steps_mention_audience_and_country() {
        let mut draft = adforge_core::CampaignDraft {
            product_name: "Fitness App".to_string(),
            country: "US".to_string(),
            audience: "Sports Fans".to_string(),
            status: Some(adforge_core::StatusFilter::Both),
            ..adforge_core::CampaignDraft::default()
        };
        draft.set_start_date("2025-01-01").unwrap();
        draft.set_end_date("2025-01-31").unwrap();

        let steps = processing_steps(&draft.submit().unwrap());

        assert_eq!(steps[1].1, "Searching for Sports Fans in US");
        assert_eq!(steps[3].0, "AI Analysis Complete");
    }

    #[test]
    fn preview_url_shortens_data_urls_only() {
        assert_eq!(
            preview_url("data:image/png;base64,AAAA"),
            "data:image/png;base64,... (4 bytes of base64)"
        );
        assert_eq!(preview_url("https://cdn/x.jpg"), "https://cdn/x.jpg");
    }
}
