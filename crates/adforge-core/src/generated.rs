//! Creatives synthesized from the generation webhook's response.
//!
//! These share [`AdRecord`]'s shape so the feedback screen renders them with
//! the same code as discovered ads. Their identifiers are fixed sentinels,
//! not backend ids.

use crate::ad::AdRecord;
use crate::media::effective_mime;

pub type GeneratedContentItem = AdRecord;

pub const GENERATED_IMAGE_ID: &str = "content-creation-image";
pub const GENERATED_VIDEO_ID: &str = "content-creation-video";
pub const GENERATED_PAGE_ID: &str = "content-creation";

pub const SAMPLE_IMAGE_ID: &str = "sample-image";

/// `snapshot_title` of a generated image whose response carried no file name.
pub const UNNAMED_IMAGE_TITLE: &str = "Generated Image";

/// Builds the generated-image item.
///
/// `media_url` is the already-normalized URL (see
/// [`crate::media::build_media_url`]).
#[must_use]
pub fn generated_image_item(
    media_url: &str,
    file_name: Option<&str>,
    mime: Option<&str>,
    feedback: &str,
) -> GeneratedContentItem {
    let file_name = file_name.map(str::trim).filter(|f| !f.is_empty());
    AdRecord {
        ad_archive_id: Some(GENERATED_IMAGE_ID.to_owned()),
        page_id: Some(GENERATED_PAGE_ID.to_owned()),
        snapshot_page_name: Some("AI Generated Image".to_owned()),
        snapshot_caption: Some(format!(
            "Generated image based on your feedback: \"{feedback}\""
        )),
        snapshot_cta_text: Some("Download Generated Image".to_owned()),
        snapshot_cta_type: Some("Download".to_owned()),
        snapshot_display_format: Some("image".to_owned()),
        snapshot_link_url: Some(media_url.to_owned()),
        snapshot_additional_info: Some(format!("MIME: {}", effective_mime(mime))),
        snapshot_page_like_count: Some(0),
        post_title: Some(file_name.unwrap_or("AI Generated Image").to_owned()),
        snapshot_title: Some(file_name.unwrap_or(UNNAMED_IMAGE_TITLE).to_owned()),
        ad_url: Some(media_url.to_owned()),
        ..AdRecord::default()
    }
}

/// Builds the fixed local-video item that accompanies every generation
/// attempt.
#[must_use]
pub fn generated_video_item(video_path: &str, feedback: &str) -> GeneratedContentItem {
    AdRecord {
        ad_archive_id: Some(GENERATED_VIDEO_ID.to_owned()),
        page_id: Some(GENERATED_PAGE_ID.to_owned()),
        snapshot_page_name: Some("AI Generated Video".to_owned()),
        snapshot_caption: Some(format!(
            "Generated video based on your feedback: \"{feedback}\""
        )),
        snapshot_cta_text: Some("Download Generated Video".to_owned()),
        snapshot_cta_type: Some("Download".to_owned()),
        snapshot_display_format: Some("video".to_owned()),
        snapshot_link_url: Some(video_path.to_owned()),
        snapshot_additional_info: Some("MIME: video/mp4".to_owned()),
        snapshot_page_like_count: Some(0),
        post_title: Some("AI Generated Video Content".to_owned()),
        snapshot_title: Some("Generated Video".to_owned()),
        video_hd_url: Some(video_path.to_owned()),
        ad_url: Some(video_path.to_owned()),
        ..AdRecord::default()
    }
}

/// The bundled sample image, shown as the sample video's poster and offered
/// alongside the generated creatives.
#[must_use]
pub fn sample_image_item(image_path: &str) -> GeneratedContentItem {
    AdRecord {
        ad_archive_id: Some(SAMPLE_IMAGE_ID.to_owned()),
        page_id: Some(GENERATED_PAGE_ID.to_owned()),
        snapshot_page_name: Some("Sample Image".to_owned()),
        snapshot_caption: Some("Poster frame for the sample video".to_owned()),
        snapshot_cta_text: Some("Download Sample Image".to_owned()),
        snapshot_cta_type: Some("Download".to_owned()),
        snapshot_display_format: Some("image".to_owned()),
        snapshot_link_url: Some(image_path.to_owned()),
        snapshot_additional_info: Some("MIME: image/png".to_owned()),
        snapshot_page_like_count: Some(0),
        post_title: Some("Sample Image".to_owned()),
        snapshot_title: Some("Sample Image".to_owned()),
        ad_url: Some(image_path.to_owned()),
        ..AdRecord::default()
    }
}
