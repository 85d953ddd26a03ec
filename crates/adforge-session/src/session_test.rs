use adforge_core::{
    MediaTypeSet, StatusFilter, GENERATED_IMAGE_ID, GENERATED_VIDEO_ID, SAMPLE_IMAGE_ID,
};
use serde_json::json;

use super::*;

fn session() -> Session {
    let client = WebhookClient::new(None, "adforge-test/0.1").expect("client should build");
    Session::new(
        client,
        SessionConfig {
            discovery_url: Url::parse("http://127.0.0.1:9/discovery").unwrap(),
            generation_url: Url::parse("http://127.0.0.1:9/generation").unwrap(),
            sample_video_path: "/sample-video.mp4".to_string(),
            sample_image_path: "/sample-image.png".to_string(),
        },
    )
}

fn campaign() -> CampaignParameters {
    CampaignParameters {
        product_name: "Fitness App".to_string(),
        country: "US".to_string(),
        audience: "Sports Fans".to_string(),
        status: StatusFilter::Active,
        media_types: MediaTypeSet::new(),
        start_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        max_items: 10,
    }
}

fn ad(id: &str) -> AdRecord {
    serde_json::from_value(json!({
        "ad_archive_id": id,
        "snapshot_page_name": format!("Page {id}"),
        "snapshot_display_format": "video",
        "video_hd_url": format!("https://cdn.example.com/{id}.mp4")
    }))
    .unwrap()
}

fn http_error() -> WebhookError {
    WebhookError::Http {
        status: 502,
        endpoint: "http://127.0.0.1:9/discovery".to_string(),
    }
}

/// A session sitting on the results screen with ads `1`, `2`, `3`.
fn on_results() -> Session {
    let mut s = session();
    s.start().unwrap();
    s.begin_discovery(campaign()).unwrap();
    s.complete_discovery(Ok(vec![ad("1"), ad("2"), ad("3")]));
    assert_eq!(s.state().screen(), Screen::Results);
    s
}

fn selected_flags(s: &Session) -> Vec<bool> {
    s.state().ads().iter().map(|a| a.selected).collect()
}

#[test]
fn new_session_starts_on_landing() {
    let s = session();
    assert_eq!(s.state().screen(), Screen::Landing);
    assert!(!s.state().is_loading());
    assert!(s.state().error().is_none());
    assert!(s.state().campaign().is_none());
}

#[test]
fn start_and_back_follow_the_navigation_edges() {
    let mut s = session();
    assert!(s.back().is_err());
    s.start().unwrap();
    assert_eq!(s.state().screen(), Screen::Form);
    assert!(s.start().is_err());
    s.back().unwrap();
    assert_eq!(s.state().screen(), Screen::Landing);
}

#[test]
fn begin_discovery_enters_processing_with_loading() {
    let mut s = session();
    s.start().unwrap();
    let request = s.begin_discovery(campaign()).unwrap();

    assert_eq!(request.product_name, "Fitness App");
    assert_eq!(request.status, "Active");
    assert_eq!(s.state().screen(), Screen::Processing);
    assert!(s.state().is_loading());
    assert_eq!(s.state().campaign(), Some(&campaign()));
    assert!(s.back().is_err(), "processing has no backward edge");
}

#[test]
fn begin_discovery_is_rejected_outside_the_form() {
    let mut s = session();
    let err = s.begin_discovery(campaign()).unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidTransition {
            action: "submit the campaign form",
            screen: Screen::Landing
        }
    );
}

#[test]
fn discovery_success_stores_unselected_batch() {
    let mut s = session();
    s.start().unwrap();
    s.begin_discovery(campaign()).unwrap();
    let mut preselected = ad("1");
    preselected.selected = true;
    s.complete_discovery(Ok(vec![preselected]));

    assert_eq!(s.state().screen(), Screen::Results);
    assert!(!s.state().is_loading());
    assert_eq!(s.state().ads().len(), 1);
    assert!(!s.state().ads()[0].selected);
    assert_eq!(s.state().selection_count(), 0);
}

#[test]
fn discovery_failure_returns_to_form_and_keeps_previous_batch() {
    let mut s = on_results();
    s.back().unwrap();
    s.begin_discovery(campaign()).unwrap();
    s.complete_discovery(Err(http_error()));

    assert_eq!(s.state().screen(), Screen::Form);
    assert!(!s.state().is_loading());
    let message = s.state().error().unwrap();
    assert!(message.starts_with("Webhook Error: "), "got: {message}");
    assert!(message.contains("502"), "got: {message}");
    assert_eq!(s.state().ads().len(), 3);
}

#[test]
fn new_submission_clears_previous_error() {
    let mut s = session();
    s.start().unwrap();
    s.begin_discovery(campaign()).unwrap();
    s.complete_discovery(Err(http_error()));
    assert!(s.state().error().is_some());

    s.begin_discovery(campaign()).unwrap();
    assert!(s.state().error().is_none());
}

#[test]
fn toggle_selection_flips_only_the_matching_ad() {
    let mut s = on_results();
    assert!(s.toggle_selection("2").unwrap());
    assert_eq!(selected_flags(&s), vec![false, true, false]);
    assert_eq!(s.state().selection_count(), 1);
}

#[test]
fn toggle_selection_twice_restores_prior_state() {
    let mut s = on_results();
    s.toggle_selection("1").unwrap();
    let before = selected_flags(&s);

    s.toggle_selection("3").unwrap();
    s.toggle_selection("3").unwrap();

    assert_eq!(selected_flags(&s), before);
}

#[test]
fn toggle_selection_with_unknown_id_is_a_no_op() {
    let mut s = on_results();
    assert!(!s.toggle_selection("404").unwrap());
    assert_eq!(selected_flags(&s), vec![false, false, false]);
}

#[test]
fn toggle_selection_outside_results_is_rejected() {
    let mut s = session();
    assert!(matches!(
        s.toggle_selection("1"),
        Err(SessionError::InvalidTransition { .. })
    ));
}

#[test]
fn confirm_with_nothing_selected_uses_every_ad() {
    let mut s = on_results();
    s.confirm_selection().unwrap();

    assert_eq!(s.state().screen(), Screen::Feedback);
    assert_eq!(s.state().selection(), s.state().ads());
}

#[test]
fn confirm_with_selection_snapshots_exactly_the_selected_ads() {
    let mut s = on_results();
    s.toggle_selection("1").unwrap();
    s.toggle_selection("3").unwrap();
    s.confirm_selection().unwrap();

    let selection = s.state().selection();
    assert_eq!(selection.len(), 2);
    assert!(selection.iter().all(|a| a.selected));
    let ids: Vec<_> = selection.iter().filter_map(AdRecord::id).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn feedback_back_edge_returns_to_results() {
    let mut s = on_results();
    s.confirm_selection().unwrap();
    s.back().unwrap();
    assert_eq!(s.state().screen(), Screen::Results);
    s.back().unwrap();
    assert_eq!(s.state().screen(), Screen::Form);
}

#[test]
fn new_batch_clears_previous_selection_snapshot() {
    let mut s = on_results();
    s.confirm_selection().unwrap();
    assert_eq!(s.state().selection().len(), 3);

    s.back().unwrap();
    s.back().unwrap();
    s.begin_discovery(campaign()).unwrap();
    s.complete_discovery(Ok(vec![ad("9")]));

    assert!(s.state().selection().is_empty());
    assert_eq!(s.state().ads().len(), 1);
}

#[test]
fn begin_generation_from_results_confirms_first() {
    let mut s = on_results();
    s.toggle_selection("2").unwrap();
    let request = s.begin_generation("brighter").unwrap();

    assert_eq!(s.state().screen(), Screen::Feedback);
    assert!(s.state().is_loading());
    assert_eq!(request.total_ads_selected, 1);
    assert_eq!(request.selected_ads[0].ad_archive_id, "2");
    assert_eq!(request.user_feedback, "brighter");
}

#[test]
fn begin_generation_from_form_is_rejected() {
    let mut s = session();
    s.start().unwrap();
    assert!(matches!(
        s.begin_generation("x"),
        Err(SessionError::InvalidTransition { screen: Screen::Form, .. })
    ));
}

#[test]
fn generation_with_content_yields_image_and_video() {
    let mut s = on_results();
    s.begin_generation("brighter").unwrap();
    s.complete_generation(
        "brighter",
        Ok(GenerationResponse {
            base: Some("https://cdn/x.jpg".to_string()),
            ..GenerationResponse::default()
        }),
    );

    let generated = s.state().generated();
    assert_eq!(generated.len(), 2);
    assert_eq!(generated[0].id(), Some(GENERATED_IMAGE_ID));
    assert_eq!(generated[0].media_url(), Some("https://cdn/x.jpg"));
    assert_eq!(generated[1].id(), Some(GENERATED_VIDEO_ID));
    assert!(s.state().error().is_none());
    assert!(!s.state().is_loading());
}

#[test]
fn generation_failure_keeps_only_the_video_and_sets_error() {
    let mut s = on_results();
    s.begin_generation("x").unwrap();
    s.complete_generation("x", Err(http_error()));

    assert_eq!(s.state().screen(), Screen::Feedback);
    assert!(!s.state().is_loading());
    let generated = s.state().generated();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].id(), Some(GENERATED_VIDEO_ID));
    assert!(s
        .state()
        .error()
        .unwrap()
        .starts_with("Content Creation Error: "));
}

#[test]
fn generation_retry_replaces_previous_content() {
    let mut s = on_results();
    s.begin_generation("one").unwrap();
    s.complete_generation(
        "one",
        Ok(GenerationResponse {
            base: Some("aGVsbG8=".to_string()),
            ..GenerationResponse::default()
        }),
    );
    assert_eq!(s.state().generated().len(), 2);

    s.begin_generation("two").unwrap();
    s.complete_generation("two", Ok(GenerationResponse::default()));

    assert_eq!(s.state().generated().len(), 1);
    assert_eq!(s.state().error(), Some(NO_CONTENT_MESSAGE));
}

#[test]
fn reset_returns_to_a_fresh_landing_state() {
    let mut s = on_results();
    let old_id = s.state().id();
    s.reset();

    assert_eq!(s.state().screen(), Screen::Landing);
    assert!(s.state().ads().is_empty());
    assert!(s.state().campaign().is_none());
    assert_ne!(s.state().id(), old_id);
}

#[test]
fn feedback_assets_append_the_sample_image() {
    let mut s = on_results();
    assert_eq!(s.feedback_assets().len(), 1, "sample image is always offered");

    s.begin_generation("x").unwrap();
    s.complete_generation(
        "x",
        Ok(GenerationResponse {
            base: Some("https://cdn/x.jpg".to_string()),
            ..GenerationResponse::default()
        }),
    );

    let assets = s.feedback_assets();
    let ids: Vec<_> = assets.iter().filter_map(AdRecord::id).collect();
    assert_eq!(ids, vec![GENERATED_IMAGE_ID, GENERATED_VIDEO_ID, SAMPLE_IMAGE_ID]);
    assert_eq!(assets[2].media_url(), Some("/sample-image.png"));
}

#[test]
fn whitespace_only_base_counts_as_no_content() {
    let mut s = on_results();
    s.begin_generation("x").unwrap();
    s.complete_generation(
        "x",
        Ok(GenerationResponse {
            base: Some("   ".to_string()),
            ..GenerationResponse::default()
        }),
    );

    let generated = s.state().generated();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].id(), Some(GENERATED_VIDEO_ID));
    assert_eq!(s.state().error(), Some(NO_CONTENT_MESSAGE));
}

#[test]
fn opaque_response_data_does_not_change_the_outcome() {
    let mut s = on_results();
    s.begin_generation("x").unwrap();
    s.complete_generation(
        "x",
        Ok(GenerationResponse {
            base: Some("https://cdn/x.jpg".to_string()),
            data: Some(json!({ "run": 7, "steps": ["a", "b"] })),
            ..GenerationResponse::default()
        }),
    );

    let generated = s.state().generated();
    assert_eq!(generated.len(), 2);
    assert_eq!(generated[0].media_url(), Some("https://cdn/x.jpg"));
    assert!(s.state().error().is_none());
}
