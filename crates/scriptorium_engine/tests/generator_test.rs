//! Behavior tests for the scene generator.

mod common;

use common::{FailingDriver, Fixture, StaticDriver, evaluated_scene, fixture};
use scriptorium_core::{AxisScores, SceneKind};
use scriptorium_engine::{SceneGenerator, SceneSpecBuilder};
use scriptorium_interface::NarrativeStore;
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn spec_for(fx: &Fixture, number: u32, goal: &str) -> scriptorium_engine::SceneSpec {
    SceneSpecBuilder::default()
        .project_id(fx.project_id)
        .episode_id(fx.episode_id)
        .number(number)
        .goal(goal)
        .kind(SceneKind::Opening)
        .character_ids(fx.character_ids.clone())
        .build()
        .unwrap()
}

#[tokio::test]
async fn empty_goal_is_rejected() {
    let fx = fixture().await;
    let generator = SceneGenerator::new(fx.store.clone(), None);
    let spec = spec_for(&fx, 1, "   ");
    assert!(generator.generate_scene(spec).await.is_err());
}

#[tokio::test]
async fn no_capability_falls_back_to_templates_and_persists_neutral_evaluation() {
    let fx = fixture().await;
    let generator = SceneGenerator::new(fx.store.clone(), None);
    let outcome = generator
        .generate_scene(spec_for(&fx, 1, "Introduce tonight's topic"))
        .await
        .unwrap();

    // Template content: non-empty, participant names folded in.
    assert!(!outcome.scene.content.is_empty());
    assert!(outcome.scene.content.contains("Mara:"));
    assert!(outcome.scene.content.contains("Introduce tonight's topic"));
    assert!(outcome.context_used.fallback_used);

    // Scene is marked machine-generated and carries the prompt head.
    assert!(outcome.scene.ai_generated);
    assert!(outcome.scene.generation_prompt.is_some());
    assert_eq!(outcome.scene.title.as_deref(), Some("Introduce tonight's topic"));
    assert_eq!(
        outcome.scene.word_count,
        outcome.scene.content.chars().count()
    );

    // Neutral default evaluation is persisted.
    assert_eq!(outcome.evaluation.scores, AxisScores::NEUTRAL);
    let stored = fx
        .store
        .evaluation_by_scene(outcome.scene.id)
        .await
        .unwrap()
        .expect("evaluation persisted");
    assert_eq!(stored.id, outcome.evaluation.id);
}

#[tokio::test]
async fn failing_capability_degrades_to_templates_without_error() {
    let fx = fixture().await;
    let generator = SceneGenerator::new(fx.store.clone(), Some(Arc::new(FailingDriver)));
    let outcome = generator
        .generate_scene(spec_for(&fx, 1, "Survive the outage"))
        .await
        .unwrap();
    assert!(outcome.context_used.fallback_used);
    assert!(!outcome.scene.content.is_empty());
}

#[tokio::test]
async fn driver_output_is_persisted_verbatim_and_conditions_the_next_generation() {
    let fx = fixture().await;
    let driver = Arc::new(StaticDriver::new(
        "Mara: Scripted line from the model, well beyond fifty characters.\n\
         Joon: Another scripted line to round the scene out nicely.",
    ));
    let generator = SceneGenerator::new(fx.store.clone(), Some(driver.clone()));

    let first = generator
        .generate_scene(spec_for(&fx, 1, "Open the show"))
        .await
        .unwrap();
    assert!(!first.context_used.fallback_used);
    assert_eq!(first.scene.content, driver.response);
    // Driver was called for generation and for judgment.
    assert_eq!(driver.calls.load(Ordering::SeqCst), 2);
    // Judgment output was not JSON, so the neutral default substituted.
    assert_eq!(first.evaluation.scores, AxisScores::NEUTRAL);
    assert_eq!(first.context_used.scenes_referenced, 0);

    // The second generation sees the first scene as history.
    let second = generator
        .generate_scene(spec_for(&fx, 2, "Go deeper"))
        .await
        .unwrap();
    assert_eq!(second.context_used.scenes_referenced, 1);
    assert!((second.context_used.avg_score - first.evaluation.overall_score).abs() < 1e-9);
}

#[tokio::test]
async fn json_judgment_is_merged_into_the_stored_evaluation() {
    let fx = fixture().await;
    // A driver whose every response is a judgment payload; as generation
    // output it is odd but long enough to qualify as content.
    let judgment = r#"{
        "creativity_score": 0.9,
        "consistency_score": 0.8,
        "emotion_score": 0.7,
        "pacing_score": 0.6,
        "dialogue_score": 0.5,
        "cliches": [],
        "issues": [],
        "summary": "Strong scene.",
        "strengths": ["specificity"],
        "suggestions": ["tighten the ending"]
    }"#;
    let generator = SceneGenerator::new(fx.store.clone(), Some(Arc::new(StaticDriver::new(judgment))));
    let outcome = generator
        .generate_scene(spec_for(&fx, 1, "Open the show"))
        .await
        .unwrap();

    let eval = &outcome.evaluation;
    assert!((eval.scores.creativity - 0.9).abs() < 1e-9);
    assert!((eval.overall_score - 0.7).abs() < 1e-9);
    assert_eq!(eval.summary, "Strong scene.");
    assert_eq!(eval.strengths, vec!["specificity"]);
    assert_eq!(eval.evaluator.as_deref(), Some("canned-v1"));
}

#[tokio::test]
async fn regeneration_bumps_version_and_keeps_flags() {
    let fx = fixture().await;
    evaluated_scene(
        &fx,
        1,
        "Mara: Original content, long enough to qualify as real history.",
        0.8,
        vec!["banter".to_string()],
        vec![],
    )
    .await;
    let scene_id = fx
        .store
        .scenes_by_episode(fx.episode_id)
        .await
        .unwrap()[0]
        .id;

    let generator = SceneGenerator::new(fx.store.clone(), None);
    let outcome = generator
        .regenerate_scene(scene_id, Some("make it tenser"))
        .await
        .unwrap();

    assert_eq!(outcome.scene.version, 2);
    assert!(outcome.fallback_used);
    // Flags are not auto-touched by regeneration.
    assert!(!outcome.scene.ai_generated);
    assert!(!outcome.scene.human_edited);
    // Content was replaced and word count recomputed.
    assert_eq!(
        outcome.scene.word_count,
        outcome.scene.content.chars().count()
    );
}

#[tokio::test]
async fn variations_do_not_mutate_the_stored_scene() {
    let fx = fixture().await;
    let scene_id = evaluated_scene(
        &fx,
        1,
        "Mara: The one stored version of this scene, unchanged throughout.",
        0.8,
        vec![],
        vec![],
    )
    .await;
    let before = fx.store.scene(scene_id).await.unwrap();

    let generator = SceneGenerator::new(fx.store.clone(), None);
    let variations = generator.generate_variations(scene_id, 3).await.unwrap();

    assert_eq!(variations.len(), 3);
    assert!(variations.iter().all(|v| !v.content.is_empty()));
    let styles: Vec<&str> = variations.iter().map(|v| v.style.as_str()).collect();
    assert_eq!(styles.len(), 3);

    let after = fx.store.scene(scene_id).await.unwrap();
    assert_eq!(before.content, after.content);
    assert_eq!(before.version, after.version);
    assert_eq!(before.updated_at, after.updated_at);
}
