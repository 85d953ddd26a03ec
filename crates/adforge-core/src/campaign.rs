//! Campaign parameters collected by the wizard form.
//!
//! [`CampaignDraft`] is the mutable form state the user edits field by field;
//! [`CampaignDraft::submit`] validates it into an immutable
//! [`CampaignParameters`] that the session hands to the discovery webhook.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of ads requested from the discovery webhook.
pub const DEFAULT_MAX_ITEMS: u32 = 10;

/// Country codes offered by the campaign form.
pub const COUNTRY_CHOICES: &[(&str, &str)] = &[
    ("IN", "India"),
    ("US", "United States"),
    ("UK", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("BR", "Brazil"),
    ("JP", "Japan"),
    ("CN", "China"),
];

/// Audience segments offered by the campaign form.
pub const AUDIENCE_CHOICES: &[&str] = &[
    "Tech Enthusiasts",
    "Fashion Lovers",
    "Food & Lifestyle",
    "Sports Fans",
    "Business Professionals",
    "General Audience",
];

/// Validation failures raised while editing or submitting a [`CampaignDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("invalid date \"{value}\" for {field}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("max items must be at least 1")]
    ZeroMaxItems,

    #[error("unknown status \"{0}\": expected Active, Inactive or Both")]
    UnknownStatus(String),

    #[error("unknown media type \"{0}\": expected Video or Image")]
    UnknownMediaType(String),
}

/// Whether the discovery query targets running ads, stopped ads, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusFilter {
    Active,
    Inactive,
    Both,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [Self::Active, Self::Inactive, Self::Both];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusFilter {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FormError::UnknownStatus(trimmed.to_owned()))
    }
}

/// A creative format the discovery query can be restricted to.
///
/// Declaration order is the wire order used by [`MediaTypeSet::to_wire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Video,
    Image,
}

impl MediaType {
    pub const ALL: [MediaType; 2] = [Self::Video, Self::Image];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MediaType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FormError::UnknownMediaType(trimmed.to_owned()))
    }
}

/// The set of media types checked on the form.
///
/// Membership changes go through [`insert`](Self::insert) and
/// [`remove`](Self::remove); the comma-joined wire string is derived on
/// demand and never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTypeSet(BTreeSet<MediaType>);

impl MediaTypeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `kind`; returns `false` if it was already present.
    pub fn insert(&mut self, kind: MediaType) -> bool {
        self.0.insert(kind)
    }

    /// Removes `kind`; returns `false` if it was not present.
    pub fn remove(&mut self, kind: MediaType) -> bool {
        self.0.remove(&kind)
    }

    /// Flips membership of `kind` and returns whether it is now present.
    pub fn toggle(&mut self, kind: MediaType) -> bool {
        if self.0.remove(&kind) {
            false
        } else {
            self.0.insert(kind);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, kind: MediaType) -> bool {
        self.0.contains(&kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MediaType> + '_ {
        self.0.iter().copied()
    }

    /// Labels joined with `", "` in declaration order, e.g. `"Video, Image"`.
    /// The empty set encodes as `""`.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.iter()
            .map(MediaType::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<MediaType> for MediaTypeSet {
    fn from_iter<I: IntoIterator<Item = MediaType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for MediaTypeSet {
    type Err = FormError;

    /// Parses the wire form (`"Video, Image"`); blank segments are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(MediaType::from_str)
            .collect()
    }
}

/// Validated search parameters for one session. Built once by
/// [`CampaignDraft::submit`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignParameters {
    pub product_name: String,
    pub country: String,
    pub audience: String,
    pub status: StatusFilter,
    pub media_types: MediaTypeSet,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_items: u32,
}

/// Editable form state behind the campaign form screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDraft {
    pub product_name: String,
    pub country: String,
    pub audience: String,
    pub status: Option<StatusFilter>,
    pub media_types: MediaTypeSet,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_items: u32,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            country: String::new(),
            audience: String::new(),
            status: None,
            media_types: MediaTypeSet::new(),
            start_date: None,
            end_date: None,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl CampaignDraft {
    /// Parses and stores the start date.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidDate`] if `raw` is not `YYYY-MM-DD`.
    pub fn set_start_date(&mut self, raw: &str) -> Result<(), FormError> {
        self.start_date = Some(parse_date("start date", raw)?);
        Ok(())
    }

    /// Parses and stores the end date.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidDate`] if `raw` is not `YYYY-MM-DD`.
    pub fn set_end_date(&mut self, raw: &str) -> Result<(), FormError> {
        self.end_date = Some(parse_date("end date", raw)?);
        Ok(())
    }

    /// Validates the draft and freezes it into [`CampaignParameters`].
    ///
    /// Text fields are trimmed. The media set may be empty, which the
    /// discovery webhook reads as "no restriction".
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Missing`] for the first required field that is
    /// blank or unset, or [`FormError::ZeroMaxItems`].
    pub fn submit(&self) -> Result<CampaignParameters, FormError> {
        let product_name = required_text("product name", &self.product_name)?;
        let country = required_text("country", &self.country)?;
        let audience = required_text("audience", &self.audience)?;
        let status = self.status.ok_or(FormError::Missing { field: "status" })?;
        let start_date = self
            .start_date
            .ok_or(FormError::Missing { field: "start date" })?;
        let end_date = self
            .end_date
            .ok_or(FormError::Missing { field: "end date" })?;
        if self.max_items == 0 {
            return Err(FormError::ZeroMaxItems);
        }

        Ok(CampaignParameters {
            product_name,
            country,
            audience,
            status,
            media_types: self.media_types.clone(),
            start_date,
            end_date,
            max_items: self.max_items,
        })
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing { field });
    }
    Ok(trimmed.to_owned())
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| FormError::InvalidDate {
        field,
        value: raw.trim().to_owned(),
    })
}

#[cfg(test)]
#[path = "campaign_test.rs"]
mod tests;
