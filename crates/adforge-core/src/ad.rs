//! Advertisement records returned by the discovery webhook.
//!
//! Upstream records are loosely typed: identifiers sometimes arrive as JSON
//! numbers, like counts as strings, and any field may be `null`. The
//! deserializers here accept those shapes and fold them into `Option`s so
//! one malformed field never rejects a whole batch. Fields the struct does
//! not model are kept in [`AdRecord::extra`] and written back out unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One advertisement's page metadata, creative payload and analysis text.
///
/// Generated creatives reuse this shape (see [`crate::generated`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub ad_archive_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_page_profile_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_page_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_page_profile_picture_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub snapshot_page_like_count: Option<u64>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub post_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_caption: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_cta_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_cta_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_display_format: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_link_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub snapshot_additional_info: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub video_hd_url: Option<String>,
    /// Generic media URL: the still image, or the poster when a video exists.
    #[serde(
        rename = "adURL",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ad_url: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub video_analysis: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub image_analysis: Option<String>,
    /// Upstream spelling is kept on the wire.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub suggession: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub selected: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which player the presentation layer should use for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

impl AdRecord {
    /// The identifier, if present and non-blank.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        non_blank(self.ad_archive_id.as_deref())
    }

    /// The URL the presentation layer renders: the HD video when present,
    /// otherwise the generic media URL.
    #[must_use]
    pub fn media_url(&self) -> Option<&str> {
        non_blank(self.video_hd_url.as_deref()).or_else(|| non_blank(self.ad_url.as_deref()))
    }

    #[must_use]
    pub fn media_kind(&self) -> Option<MediaKind> {
        if non_blank(self.video_hd_url.as_deref()).is_some() {
            Some(MediaKind::Video)
        } else if non_blank(self.ad_url.as_deref()).is_some() {
            Some(MediaKind::Image)
        } else {
            None
        }
    }
}

/// Returns `value` unless it is absent or whitespace-only.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Some(Value::String(s)) => s.trim().replace(',', "").parse::<u64>().ok(),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(
        Option::<Value>::deserialize(deserializer)?,
        Some(Value::Bool(true))
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_loose_field_types() {
        let record: AdRecord = serde_json::from_value(json!({
            "ad_archive_id": 123_456_789,
            "snapshot_page_name": "Acme",
            "snapshot_page_like_count": "12,500",
            "snapshot_caption": null,
            "adURL": "https://x/a.jpg",
            "selected": "yes"
        }))
        .unwrap();

        assert_eq!(record.ad_archive_id.as_deref(), Some("123456789"));
        assert_eq!(record.snapshot_page_like_count, Some(12_500));
        assert!(record.snapshot_caption.is_none());
        assert_eq!(record.ad_url.as_deref(), Some("https://x/a.jpg"));
        assert!(!record.selected);
    }

    #[test]
    fn fractional_like_count_is_truncated() {
        let record: AdRecord =
            serde_json::from_value(json!({ "snapshot_page_like_count": 42.9 })).unwrap();
        assert_eq!(record.snapshot_page_like_count, Some(42));

        let record: AdRecord =
            serde_json::from_value(json!({ "snapshot_page_like_count": -3 })).unwrap();
        assert_eq!(record.snapshot_page_like_count, None);
    }

    #[test]
    fn unknown_fields_round_trip_through_extra() {
        let input = json!({
            "ad_archive_id": "1",
            "publisher_platform": ["facebook", "instagram"]
        });
        let record: AdRecord = serde_json::from_value(input).unwrap();
        assert_eq!(
            record.extra.get("publisher_platform"),
            Some(&json!(["facebook", "instagram"]))
        );

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["publisher_platform"], json!(["facebook", "instagram"]));
        assert_eq!(out["ad_archive_id"], json!("1"));
        assert_eq!(out["selected"], json!(false));
    }

    #[test]
    fn media_url_prefers_non_blank_video() {
        let mut record = AdRecord {
            video_hd_url: Some("  ".to_string()),
            ad_url: Some("https://x/a.jpg".to_string()),
            ..AdRecord::default()
        };
        assert_eq!(record.media_url(), Some("https://x/a.jpg"));
        assert_eq!(record.media_kind(), Some(MediaKind::Image));

        record.video_hd_url = Some("https://x/a.mp4".to_string());
        assert_eq!(record.media_url(), Some("https://x/a.mp4"));
        assert_eq!(record.media_kind(), Some(MediaKind::Video));
    }

    #[test]
    fn record_without_media_has_no_kind() {
        assert_eq!(AdRecord::default().media_kind(), None);
        assert_eq!(AdRecord::default().media_url(), None);
    }
}
