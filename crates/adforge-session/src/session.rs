//! The session controller: owns [`SessionState`] and drives every screen
//! transition.
//!
//! Each webhook-backed action comes in three forms: `begin_*` applies the
//! pre-call transition and returns the request to send, `complete_*` applies
//! the outcome, and the `async` convenience method does both around the
//! actual call. The split lets a presentation layer render the in-flight
//! state, and lets tests drive transitions without a network.
//!
//! Outcomes are applied in a single `&mut self` call, so no partially
//! updated state is ever observable. Because the controller is borrowed
//! mutably for the whole of an `async` action, one owner cannot overlap two
//! calls.

use adforge_core::{
    sample_image_item, AdRecord, AppConfig, CampaignParameters, GeneratedContentItem,
};
use adforge_webhook::{
    DiscoveryRequest, GenerationRequest, GenerationResponse, Url, WebhookClient, WebhookError,
};

use crate::error::SessionError;
use crate::generation::{build_generation_request, generated_content};
use crate::state::{Screen, SessionState};

pub const NO_CONTENT_MESSAGE: &str = "No content generated. Please try again.";

/// Where the session sends its two webhook calls, the local placeholder
/// video appended to every generation result, and that video's poster image.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub discovery_url: Url,
    pub generation_url: Url,
    pub sample_video_path: String,
    pub sample_image_path: String,
}

impl From<&AppConfig> for SessionConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            discovery_url: config.discovery_url.clone(),
            generation_url: config.generation_url.clone(),
            sample_video_path: config.sample_video_path.clone(),
            sample_image_path: config.sample_image_path.clone(),
        }
    }
}

pub struct Session {
    client: WebhookClient,
    config: SessionConfig,
    state: SessionState,
}

impl Session {
    #[must_use]
    pub fn new(client: WebhookClient, config: SessionConfig) -> Self {
        Self {
            client,
            config,
            state: SessionState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn client(&self) -> &WebhookClient {
        &self.client
    }

    /// What the feedback screen offers: the generated creatives followed by
    /// the bundled sample image.
    #[must_use]
    pub fn feedback_assets(&self) -> Vec<GeneratedContentItem> {
        let mut assets = self.state.generated.clone();
        assets.push(sample_image_item(&self.config.sample_image_path));
        assets
    }

    /// Discards everything and returns to the landing screen with a fresh
    /// session id.
    pub fn reset(&mut self) {
        let previous = self.state.id;
        self.state = SessionState::default();
        tracing::info!(previous = %previous, session_id = %self.state.id, "session reset");
    }

    /// `landing → form`.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] from any other screen.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.require(Screen::Landing, "open the campaign form")?;
        self.state.screen = Screen::Form;
        Ok(())
    }

    /// Follows the backward edge for the current screen:
    /// `form → landing`, `results → form`, `feedback → results`.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] on landing and processing, which
    /// have no backward edge.
    pub fn back(&mut self) -> Result<(), SessionError> {
        let target = match self.state.screen {
            Screen::Form => Screen::Landing,
            Screen::Results => Screen::Form,
            Screen::Feedback => Screen::Results,
            screen @ (Screen::Landing | Screen::Processing) => {
                return Err(SessionError::InvalidTransition {
                    action: "go back",
                    screen,
                })
            }
        };
        self.state.screen = target;
        Ok(())
    }

    /// Records the campaign and enters `processing`. Returns the payload to
    /// POST to the discovery endpoint.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless on the form screen.
    pub fn begin_discovery(
        &mut self,
        params: CampaignParameters,
    ) -> Result<DiscoveryRequest, SessionError> {
        self.require(Screen::Form, "submit the campaign form")?;

        let request = DiscoveryRequest::from(&params);
        self.state.campaign = Some(params);
        self.state.screen = Screen::Processing;
        self.state.loading = true;
        self.state.error = None;

        tracing::info!(
            session_id = %self.state.id,
            product = %request.product_name,
            max_items = request.max_items,
            "discovery started"
        );
        Ok(request)
    }

    /// Applies a discovery outcome.
    ///
    /// Success replaces the ad batch (selection cleared) and moves to
    /// `results`. Any failure, including a non-array response, moves back to
    /// `form` with an error message and leaves the previous batch in place.
    pub fn complete_discovery(&mut self, outcome: Result<Vec<AdRecord>, WebhookError>) {
        self.state.loading = false;
        match outcome {
            Ok(mut ads) => {
                for ad in &mut ads {
                    ad.selected = false;
                }
                warn_on_duplicate_ids(&ads);
                tracing::info!(
                    session_id = %self.state.id,
                    count = ads.len(),
                    "discovery completed"
                );
                self.state.ads = ads;
                self.state.selection.clear();
                self.state.error = None;
                self.state.screen = Screen::Results;
            }
            Err(e) => {
                tracing::warn!(session_id = %self.state.id, error = %e, "discovery failed");
                self.state.error = Some(format!(
                    "Webhook Error: {e}. Please check your webhook configuration."
                ));
                self.state.screen = Screen::Form;
            }
        }
    }

    /// Submits the campaign form and waits for the discovery webhook.
    ///
    /// # Errors
    ///
    /// Only [`SessionError::InvalidTransition`]; webhook failures land in
    /// [`SessionState::error`].
    pub async fn submit_form(&mut self, params: CampaignParameters) -> Result<(), SessionError> {
        let request = self.begin_discovery(params)?;
        let outcome = self
            .client
            .discover(&self.config.discovery_url, &request)
            .await;
        self.complete_discovery(outcome);
        Ok(())
    }

    /// Flips `selected` on every ad whose id equals `id`. Returns whether
    /// any ad matched.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless on the results screen.
    pub fn toggle_selection(&mut self, id: &str) -> Result<bool, SessionError> {
        self.require(Screen::Results, "change the selection")?;

        let mut matched = false;
        for ad in self
            .state
            .ads
            .iter_mut()
            .filter(|ad| ad.ad_archive_id.as_deref() == Some(id))
        {
            ad.selected = !ad.selected;
            matched = true;
        }
        tracing::debug!(
            session_id = %self.state.id,
            id,
            matched,
            selected = self.state.selection_count(),
            "selection toggled"
        );
        Ok(matched)
    }

    /// `results → feedback`, snapshotting the selected ads. With nothing
    /// selected the whole batch is used.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless on the results screen.
    pub fn confirm_selection(&mut self) -> Result<(), SessionError> {
        self.require(Screen::Results, "confirm the selection")?;

        let selected: Vec<AdRecord> = self
            .state
            .ads
            .iter()
            .filter(|ad| ad.selected)
            .cloned()
            .collect();
        self.state.selection = if selected.is_empty() {
            self.state.ads.clone()
        } else {
            selected
        };
        self.state.screen = Screen::Feedback;

        tracing::info!(
            session_id = %self.state.id,
            count = self.state.selection.len(),
            "selection confirmed"
        );
        Ok(())
    }

    /// Starts a generation attempt and returns the payload to POST.
    ///
    /// From `results` the current selection is confirmed first.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidTransition`] unless on results or feedback.
    /// - [`SessionError::MissingCampaign`] if no campaign was submitted.
    pub fn begin_generation(&mut self, feedback: &str) -> Result<GenerationRequest, SessionError> {
        match self.state.screen {
            Screen::Results => self.confirm_selection()?,
            Screen::Feedback => {}
            screen => {
                return Err(SessionError::InvalidTransition {
                    action: "submit feedback",
                    screen,
                })
            }
        }
        let campaign = self
            .state
            .campaign
            .as_ref()
            .ok_or(SessionError::MissingCampaign)?;

        let request = build_generation_request(&self.state.selection, feedback, campaign);
        self.state.loading = true;
        self.state.error = None;

        tracing::info!(
            session_id = %self.state.id,
            total_ads_selected = request.total_ads_selected,
            "generation started"
        );
        Ok(request)
    }

    /// Applies a generation outcome and lands on `feedback`.
    ///
    /// The generated list is replaced: image (when the response carries
    /// content) then the local video. Failures and empty responses set an
    /// error message and keep only the video.
    pub fn complete_generation(
        &mut self,
        feedback: &str,
        outcome: Result<GenerationResponse, WebhookError>,
    ) {
        self.state.loading = false;
        self.state.screen = Screen::Feedback;

        let response = match outcome {
            Ok(response) if response.content().is_some() => {
                tracing::info!(
                    session_id = %self.state.id,
                    mime = response.mime.as_deref().unwrap_or("-"),
                    file_name = response.file_name.as_deref().unwrap_or("-"),
                    "content generated"
                );
                if let Some(data) = &response.data {
                    tracing::debug!(
                        session_id = %self.state.id,
                        %data,
                        "generation response data"
                    );
                }
                self.state.error = None;
                Some(response)
            }
            Ok(_) => {
                tracing::warn!(session_id = %self.state.id, "generation response had no base field");
                self.state.error = Some(NO_CONTENT_MESSAGE.to_owned());
                None
            }
            Err(e) => {
                tracing::warn!(session_id = %self.state.id, error = %e, "generation failed");
                self.state.error = Some(format!(
                    "Content Creation Error: {e}. Please check your webhook configuration."
                ));
                None
            }
        };

        self.state.generated =
            generated_content(response.as_ref(), feedback, &self.config.sample_video_path);
    }

    /// Sends the selection plus `feedback` to the generation webhook.
    ///
    /// # Errors
    ///
    /// Only the guard errors of [`begin_generation`](Self::begin_generation);
    /// webhook failures land in [`SessionState::error`].
    pub async fn submit_feedback(&mut self, feedback: &str) -> Result<(), SessionError> {
        let request = self.begin_generation(feedback)?;
        let outcome = self
            .client
            .generate(&self.config.generation_url, &request)
            .await;
        self.complete_generation(feedback, outcome);
        Ok(())
    }

    fn require(&self, expected: Screen, action: &'static str) -> Result<(), SessionError> {
        if self.state.screen == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                screen: self.state.screen,
            })
        }
    }
}

/// Selection is keyed by id, so duplicates toggle together.
fn warn_on_duplicate_ids(ads: &[AdRecord]) {
    let mut seen = std::collections::HashSet::new();
    for id in ads.iter().filter_map(AdRecord::id) {
        if !seen.insert(id) {
            tracing::warn!(id, "duplicate ad_archive_id in discovery batch");
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
