//! Decides which discovered ad records are complete enough to render.
//!
//! Discovery batches routinely include half-scraped entries: blank page
//! names, "Sponsored" stand-ins, or media URLs pointing at loading spinners.
//! [`filter_renderable`] drops those while keeping input order.

use adforge_core::{non_blank, AdRecord};

const PAGE_NAME_SENTINELS: [&str; 3] = ["sponsored", "loading", "placeholder"];
const MEDIA_URL_SENTINELS: [&str; 2] = ["placeholder", "loading"];

/// Returns the records that pass [`is_renderable`], in their original order.
#[must_use]
pub fn filter_renderable(records: &[AdRecord]) -> Vec<AdRecord> {
    records.iter().filter(|r| is_renderable(r)).cloned().collect()
}

/// A record is renderable when all of these hold:
///
/// 1. `ad_archive_id` is non-blank.
/// 2. `snapshot_page_name` is non-blank.
/// 3. `video_hd_url` or `adURL` is non-blank.
/// 4. `snapshot_display_format` is non-blank.
/// 5. the page name does not contain `sponsored`, `loading` or
///    `placeholder`, ignoring case.
/// 6. at least one of `video_hd_url` and `adURL` is non-blank and contains
///    neither `placeholder` nor `loading`.
#[must_use]
pub fn is_renderable(record: &AdRecord) -> bool {
    let Some(page_name) = non_blank(record.snapshot_page_name.as_deref()) else {
        return false;
    };

    record.id().is_some()
        && record.media_url().is_some()
        && non_blank(record.snapshot_display_format.as_deref()).is_some()
        && !is_placeholder_page_name(page_name)
        && has_real_media(record)
}

/// The identity and format checks alone (rules 1, 2 and 4). Used to pick
/// which selected ads are summarized for the generation webhook.
#[must_use]
pub fn has_identity_and_format(record: &AdRecord) -> bool {
    record.id().is_some()
        && non_blank(record.snapshot_page_name.as_deref()).is_some()
        && non_blank(record.snapshot_display_format.as_deref()).is_some()
}

fn has_real_media(record: &AdRecord) -> bool {
    [record.video_hd_url.as_deref(), record.ad_url.as_deref()]
        .into_iter()
        .filter_map(non_blank)
        .any(|url| !MEDIA_URL_SENTINELS.iter().any(|s| url.contains(s)))
}

fn is_placeholder_page_name(page_name: &str) -> bool {
    let lowered = page_name.to_lowercase();
    PAGE_NAME_SENTINELS.iter().any(|s| lowered.contains(s))
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
