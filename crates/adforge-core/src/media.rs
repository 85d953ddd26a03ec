//! Media URL handling for generated creatives.
//!
//! The generation webhook's `base` field may be a remote URL, a complete
//! `data:` URL, or bare base64. [`build_media_url`] turns any of those into
//! something a player can load; [`decode_data_url`] goes the other way when
//! a creative is saved to disk.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// MIME type assumed when the webhook does not declare one.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("not a data URL")]
    NotDataUrl,

    #[error("data URL is not base64-encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Builds a loadable URL from the webhook's `base` value.
///
/// Values starting with `data:` or `http` pass through unchanged. Anything
/// else is treated as inline base64 and wrapped as
/// `data:<mime>;base64,<base>`, where a blank or missing `mime` falls back to
/// [`DEFAULT_IMAGE_MIME`].
#[must_use]
pub fn build_media_url(base: &str, mime: Option<&str>) -> String {
    if base.starts_with("data:") || base.starts_with("http") {
        return base.to_owned();
    }
    format!("data:{};base64,{base}", effective_mime(mime))
}

/// The declared MIME type, or [`DEFAULT_IMAGE_MIME`] when blank or absent.
#[must_use]
pub fn effective_mime(mime: Option<&str>) -> &str {
    mime.map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_IMAGE_MIME)
}

/// Decodes a `data:<mime>;base64,<payload>` URL.
///
/// # Errors
///
/// - [`MediaError::NotDataUrl`] if `url` lacks the `data:` scheme or the comma separator.
/// - [`MediaError::NotBase64`] if the header does not declare `;base64`.
/// - [`MediaError::Decode`] if the payload is not valid base64.
pub fn decode_data_url(url: &str) -> Result<DataUrl, MediaError> {
    let rest = url.strip_prefix("data:").ok_or(MediaError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(MediaError::NotDataUrl)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(MediaError::NotBase64)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok(DataUrl {
        mime: effective_mime(Some(mime)).to_owned(),
        bytes,
    })
}

/// File extension for common creative MIME types; `bin` otherwise.
#[must_use]
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_base64_is_wrapped_with_declared_mime() {
        assert_eq!(
            build_media_url("iVBORw0KGgo", Some("image/png")),
            "data:image/png;base64,iVBORw0KGgo"
        );
    }

    #[test]
    fn bare_base64_defaults_to_jpeg() {
        assert_eq!(
            build_media_url("/9j/4AAQ", None),
            "data:image/jpeg;base64,/9j/4AAQ"
        );
        assert_eq!(
            build_media_url("/9j/4AAQ", Some("  ")),
            "data:image/jpeg;base64,/9j/4AAQ"
        );
    }

    #[test]
    fn urls_pass_through_unchanged() {
        assert_eq!(
            build_media_url("https://cdn/x.jpg", Some("image/png")),
            "https://cdn/x.jpg"
        );
        assert_eq!(
            build_media_url("data:image/gif;base64,R0lG", None),
            "data:image/gif;base64,R0lG"
        );
    }

    #[test]
    fn decode_data_url_returns_bytes_and_mime() {
        let decoded = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, b"hello");
    }

    #[test]
    fn decode_data_url_without_mime_defaults_to_jpeg() {
        let decoded = decode_data_url("data:;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded.mime, DEFAULT_IMAGE_MIME);
    }

    #[test]
    fn decode_rejects_non_data_urls() {
        assert!(matches!(
            decode_data_url("https://cdn/x.jpg"),
            Err(MediaError::NotDataUrl)
        ));
        assert!(matches!(
            decode_data_url("data:text/plain,hello"),
            Err(MediaError::NotBase64)
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,!!!"),
            Err(MediaError::Decode(_))
        ));
    }

    #[test]
    fn extension_lookup() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("IMAGE/JPEG"), "jpg");
        assert_eq!(extension_for_mime("application/octet-stream"), "bin");
    }
}
