//! Behavior tests for the learning-context aggregator.

mod common;

use common::{evaluated_scene, fixture};
use scriptorium_engine::mine_learning_context;
use scriptorium_interface::NarrativeStore;
use scriptorium_core::SceneDraft;

fn long_content(tag: &str) -> String {
    format!(
        "Mara: {tag} line that is comfortably past the threshold.\nJoon: Agreed on {tag}, let's keep moving."
    )
}

#[tokio::test]
async fn zero_evaluated_scenes_yields_empty_context_not_an_error() {
    let fx = fixture().await;
    // One unevaluated scene long enough to qualify.
    fx.store
        .create_scene(SceneDraft::new(fx.episode_id, 1).with_content(long_content("setup")))
        .await
        .unwrap();

    let context = mine_learning_context(fx.store.as_ref(), fx.project_id, None)
        .await
        .unwrap();
    assert_eq!(context.scene_count, 1);
    assert_eq!(context.avg_score, 0.0);
    assert!(context.best_scenes.is_empty());
    assert!(context.strengths_to_keep.is_empty());
    assert!(context.issues_to_avoid.is_empty());
    assert!(context.character_examples.is_empty());
    assert!(!context.has_history());
}

#[tokio::test]
async fn missing_project_is_not_found() {
    let fx = fixture().await;
    assert!(
        mine_learning_context(fx.store.as_ref(), fx.project_id + 99, None)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn best_scenes_are_the_top_three_descending_and_avg_is_exact() {
    let fx = fixture().await;
    let scores = [0.9, 0.85, 0.6, 0.4];
    for (i, score) in scores.iter().enumerate() {
        evaluated_scene(
            &fx,
            i as u32 + 1,
            &long_content(&format!("s{}", i + 1)),
            *score,
            vec![format!("strength {}", i + 1)],
            vec![],
        )
        .await;
    }

    let context = mine_learning_context(fx.store.as_ref(), fx.project_id, None)
        .await
        .unwrap();
    assert_eq!(context.scene_count, 4);
    assert!((context.avg_score - 0.6875).abs() < 1e-9);

    let ranked: Vec<f64> = context.best_scenes.iter().map(|b| b.score).collect();
    assert_eq!(ranked, vec![0.9, 0.85, 0.6]);
    // Strengths come from the top three only.
    assert!(context.strengths_to_keep.contains(&"strength 1".to_string()));
    assert!(!context.strengths_to_keep.contains(&"strength 4".to_string()));
}

#[tokio::test]
async fn content_at_or_below_fifty_chars_is_excluded() {
    let fx = fixture().await;
    let exactly_forty = "x".repeat(40);
    let exactly_fifty = "y".repeat(50);
    let fifty_one = "z".repeat(51);
    evaluated_scene(&fx, 1, &exactly_forty, 0.8, vec![], vec![]).await;
    evaluated_scene(&fx, 2, &exactly_fifty, 0.8, vec![], vec![]).await;
    evaluated_scene(&fx, 3, &fifty_one, 0.8, vec![], vec![]).await;

    let context = mine_learning_context(fx.store.as_ref(), fx.project_id, None)
        .await
        .unwrap();
    // Threshold is strictly-greater-than fifty.
    assert_eq!(context.scene_count, 1);
}

#[tokio::test]
async fn excluded_scene_does_not_contribute() {
    let fx = fixture().await;
    let kept = evaluated_scene(&fx, 1, &long_content("kept"), 0.9, vec![], vec![]).await;
    let excluded = evaluated_scene(&fx, 2, &long_content("excluded"), 0.1, vec![], vec![]).await;

    let context = mine_learning_context(fx.store.as_ref(), fx.project_id, Some(excluded))
        .await
        .unwrap();
    assert_eq!(context.scene_count, 1);
    assert!((context.avg_score - 0.9).abs() < 1e-9);
    assert_eq!(context.best_scenes.len(), 1);

    let _ = kept;
}

#[tokio::test]
async fn issues_pool_suggestions_and_cliche_notes_capped_at_five() {
    let fx = fixture().await;
    for i in 0..4u32 {
        evaluated_scene(
            &fx,
            i + 1,
            &long_content(&format!("s{}", i)),
            0.5,
            vec![],
            vec![
                format!("suggestion {}a", i),
                format!("suggestion {}b", i),
                format!("suggestion {}c never taken", i),
            ],
        )
        .await;
    }

    let context = mine_learning_context(fx.store.as_ref(), fx.project_id, None)
        .await
        .unwrap();
    assert_eq!(context.issues_to_avoid.len(), 5);
    // Only the first two suggestions per scene are eligible.
    assert!(
        !context
            .issues_to_avoid
            .iter()
            .any(|issue| issue.contains("never taken"))
    );
}

#[tokio::test]
async fn dialogue_examples_come_from_recent_scenes_keyed_by_speaker() {
    let fx = fixture().await;
    evaluated_scene(&fx, 1, &long_content("one"), 0.7, vec![], vec![]).await;
    evaluated_scene(&fx, 2, &long_content("two"), 0.7, vec![], vec![]).await;

    let context = mine_learning_context(fx.store.as_ref(), fx.project_id, None)
        .await
        .unwrap();
    assert!(context.character_examples.contains_key("Mara"));
    assert!(context.character_examples.contains_key("Joon"));
    assert_eq!(context.character_examples["Mara"].len(), 2);
    for examples in context.character_examples.values() {
        for example in examples {
            assert!(example.chars().count() <= 100);
        }
    }
}
