pub mod ad;
pub mod app_config;
pub mod campaign;
pub mod config;
pub mod generated;
pub mod media;

pub use ad::{non_blank, AdRecord, MediaKind};
pub use app_config::{AppConfig, Environment};
pub use campaign::{
    CampaignDraft, CampaignParameters, FormError, MediaType, MediaTypeSet, StatusFilter,
    AUDIENCE_CHOICES, COUNTRY_CHOICES, DEFAULT_MAX_ITEMS,
};
pub use config::{
    load_app_config, load_app_config_from_env, load_app_config_with_overrides, parse_webhook_url,
    ConfigError,
};
pub use generated::{
    generated_image_item, generated_video_item, sample_image_item, GeneratedContentItem,
    GENERATED_IMAGE_ID, GENERATED_VIDEO_ID, SAMPLE_IMAGE_ID, UNNAMED_IMAGE_TITLE,
};
pub use media::{
    build_media_url, decode_data_url, effective_mime, extension_for_mime, DataUrl, MediaError,
};
