//! The in-memory session model the presentation layer reads.

use std::fmt;

use adforge_core::{AdRecord, CampaignParameters, GeneratedContentItem};
use uuid::Uuid;

use crate::validator::filter_renderable;

/// The five wizard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Landing,
    Form,
    /// Transient: only entered while the discovery call is in flight.
    Processing,
    Results,
    Feedback,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Screen::Landing => "landing",
            Screen::Form => "form",
            Screen::Processing => "processing",
            Screen::Results => "results",
            Screen::Feedback => "feedback",
        })
    }
}

/// Everything one session knows. Mutated only by [`crate::Session`].
///
/// The selection count is derived from the `selected` flags on every call;
/// there is no separate counter to keep in sync.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) id: Uuid,
    pub(crate) screen: Screen,
    pub(crate) campaign: Option<CampaignParameters>,
    pub(crate) ads: Vec<AdRecord>,
    pub(crate) selection: Vec<AdRecord>,
    pub(crate) generated: Vec<GeneratedContentItem>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            screen: Screen::Landing,
            campaign: None,
            ads: Vec::new(),
            selection: Vec::new(),
            generated: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl SessionState {
    /// Correlation id for log events; regenerated on reset.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn campaign(&self) -> Option<&CampaignParameters> {
        self.campaign.as_ref()
    }

    /// The full batch from the last successful discovery call.
    #[must_use]
    pub fn ads(&self) -> &[AdRecord] {
        &self.ads
    }

    /// The subset of [`ads`](Self::ads) the results screen shows.
    #[must_use]
    pub fn renderable_ads(&self) -> Vec<AdRecord> {
        filter_renderable(&self.ads)
    }

    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.ads.iter().filter(|ad| ad.selected).count()
    }

    /// The ads snapshotted by the last selection confirmation.
    #[must_use]
    pub fn selection(&self) -> &[AdRecord] {
        &self.selection
    }

    #[must_use]
    pub fn generated(&self) -> &[GeneratedContentItem] {
        &self.generated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
