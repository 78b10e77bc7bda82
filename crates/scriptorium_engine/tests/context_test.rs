//! Behavior tests for the context builder.

mod common;

use common::fixture;
use scriptorium_core::{CallbackDraft, SceneDraft};
use scriptorium_engine::ContextBuilder;
use scriptorium_interface::NarrativeStore;

#[tokio::test]
async fn missing_project_is_not_found() {
    let fx = fixture().await;
    let builder = ContextBuilder::new(fx.store.clone());
    let err = builder.bundle(fx.project_id + 99, None, None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn world_rules_drop_comments_and_blanks() {
    let fx = fixture().await;
    let bundle = ContextBuilder::new(fx.store.clone())
        .bundle(fx.project_id, None, None)
        .await
        .unwrap();
    assert_eq!(
        bundle.world_rules,
        vec![
            "The studio broadcasts live, no retakes.",
            "Callers stay anonymous.",
        ]
    );
}

#[tokio::test]
async fn forbidden_list_is_name_qualified_and_deduplicated() {
    let fx = fixture().await;
    let bundle = ContextBuilder::new(fx.store.clone())
        .bundle(fx.project_id, None, None)
        .await
        .unwrap();
    assert_eq!(bundle.forbidden, vec!["Mara: breaking the fourth wall"]);
}

#[tokio::test]
async fn previous_scenes_stop_before_the_current_number_and_cap_at_five() {
    let fx = fixture().await;
    for n in 1..=8u32 {
        fx.store
            .create_scene(
                SceneDraft::new(fx.episode_id, n)
                    .with_content(format!("Scene {} content, long enough to summarize.", n)),
            )
            .await
            .unwrap();
    }

    let bundle = ContextBuilder::new(fx.store.clone())
        .bundle(fx.project_id, Some(fx.episode_id), Some(8))
        .await
        .unwrap();
    let numbers: Vec<u32> = bundle.previous_scenes.iter().map(|s| s.number).collect();
    // Strictly before scene 8, most recent five, ascending.
    assert_eq!(numbers, vec![3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn scene_summaries_are_truncated_with_ellipsis() {
    let fx = fixture().await;
    let long_line = "a".repeat(400);
    fx.store
        .create_scene(SceneDraft::new(fx.episode_id, 1).with_content(long_line))
        .await
        .unwrap();

    let bundle = ContextBuilder::new(fx.store.clone())
        .bundle(fx.project_id, Some(fx.episode_id), Some(2))
        .await
        .unwrap();
    let summary = &bundle.previous_scenes[0].summary;
    assert_eq!(summary.chars().count(), 153);
    assert!(summary.ends_with("..."));
}

#[tokio::test]
async fn render_filters_characters_but_keeps_project_wide_forbidden_list() {
    let fx = fixture().await;
    let bundle = ContextBuilder::new(fx.store.clone())
        .bundle(fx.project_id, None, None)
        .await
        .unwrap();

    // Restrict to Joon only: Mara's profile disappears, her forbidden
    // entry stays.
    let joon_only = bundle.render(Some("open the show"), Some(&fx.character_ids[1..2]));
    assert!(joon_only.contains("### Joon"));
    assert!(!joon_only.contains("### Mara"));
    assert!(joon_only.contains("Mara: breaking the fourth wall"));
    assert!(joon_only.contains("## Scene Goal"));
    assert!(joon_only.contains("open the show"));
}

#[tokio::test]
async fn unresolved_callbacks_only() {
    let fx = fixture().await;
    let open = fx
        .store
        .create_callback(CallbackDraft::new(fx.project_id, "the missing tape"))
        .await
        .unwrap();
    let closed = fx
        .store
        .create_callback(CallbackDraft::new(fx.project_id, "the caller's name"))
        .await
        .unwrap();
    let scene = fx
        .store
        .create_scene(SceneDraft::new(fx.episode_id, 1))
        .await
        .unwrap();
    fx.store
        .resolve_callback(closed.id, scene.id, 1)
        .await
        .unwrap();

    let bundle = ContextBuilder::new(fx.store.clone())
        .bundle(fx.project_id, None, None)
        .await
        .unwrap();
    let contents: Vec<&str> = bundle
        .unresolved_callbacks
        .iter()
        .map(|c| c.content.as_str())
        .collect();
    assert_eq!(contents, vec!["the missing tape"]);
    let _ = open;
}

#[tokio::test]
async fn prompt_text_is_the_flattened_bundle() {
    let fx = fixture().await;
    let text = ContextBuilder::new(fx.store.clone())
        .prompt_text(fx.project_id, None, None, None)
        .await
        .unwrap();
    assert!(text.contains("## Project"));
    assert!(text.contains("Title: Night Desk"));
    assert!(text.contains("## World Rules (must be respected)"));
    assert!(text.contains("## Style Guide"));
}
