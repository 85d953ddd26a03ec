//! Saving generated creatives to the output directory.

use std::path::{Path, PathBuf};

use adforge_core::{
    decode_data_url, effective_mime, extension_for_mime, GeneratedContentItem, MediaKind,
    UNNAMED_IMAGE_TITLE,
};
use adforge_webhook::{Url, WebhookClient};

/// What happened to a creative the user asked to download.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Saved {
    Written(PathBuf),
    /// The creative is a local asset path; nothing to fetch.
    LocalAsset(String),
}

/// Writes `item`'s media into `output_dir`.
///
/// `data:` URLs are decoded in place and `http(s)` URLs are fetched with
/// `client`. Anything else is a local asset path and is reported back
/// unchanged.
///
/// # Errors
///
/// Returns an error if the item has no media URL, the payload cannot be
/// decoded or fetched, or the file cannot be written.
pub(crate) async fn save_creative(
    client: &WebhookClient,
    item: &GeneratedContentItem,
    output_dir: &Path,
) -> anyhow::Result<Saved> {
    let Some(url) = item.media_url() else {
        anyhow::bail!("this creative has no media to download");
    };

    let bytes = if url.starts_with("data:") {
        decode_data_url(url)?.bytes
    } else if url.starts_with("http://") || url.starts_with("https://") {
        let parsed = Url::parse(url).map_err(|e| anyhow::anyhow!("invalid media URL: {e}"))?;
        client.fetch_bytes(&parsed).await?
    } else {
        return Ok(Saved::LocalAsset(url.to_string()));
    };

    tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
        anyhow::anyhow!("failed to create {}: {e}", output_dir.display())
    })?;
    let path = output_dir.join(file_name_for(item));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "creative saved");
    Ok(Saved::Written(path))
}

/// The webhook's file name when it sent one, else `generated-<kind>.<ext>`.
///
/// Only the final path component of a webhook-supplied name is used.
pub(crate) fn file_name_for(item: &GeneratedContentItem) -> String {
    let supplied = item
        .snapshot_title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty() && *title != UNNAMED_IMAGE_TITLE)
        .and_then(|title| Path::new(title).file_name())
        .and_then(|name| name.to_str());
    if let Some(name) = supplied {
        if item.media_kind() == Some(MediaKind::Image) {
            return name.to_string();
        }
    }

    let ext = extension_for_mime(mime_of(item));
    match item.media_kind() {
        Some(MediaKind::Video) => format!("generated-video.{ext}"),
        _ => format!("generated-image.{ext}"),
    }
}

/// Generated items record their MIME type as `MIME: <type>`.
fn mime_of(item: &GeneratedContentItem) -> &str {
    effective_mime(
        item.snapshot_additional_info
            .as_deref()
            .and_then(|info| info.strip_prefix("MIME: ")),
    )
}
