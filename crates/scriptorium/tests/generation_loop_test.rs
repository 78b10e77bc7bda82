//! End-to-end tests for the generate → evaluate → store → re-mine loop.

use async_trait::async_trait;
use scriptorium::{
    AxisScores, CharacterDraft, CharacterProfile, EpisodeDraft, LanguageDriver, NarrativeStore,
    ProjectDraft, ProviderRegistry, SceneDraft, SceneSpecBuilder, Scriptorium, ScriptoriumResult,
    TextRequest, check_forbidden_actions, mine_learning_context,
};
use std::sync::Arc;

/// Judgment-aware stub: returns scene text for generation prompts and a
/// JSON verdict for judgment prompts, so one driver can serve the whole
/// loop the way a real provider does.
struct LoopDriver {
    scene_text: String,
    judgment_json: String,
}

#[async_trait]
impl LanguageDriver for LoopDriver {
    async fn generate(&self, req: &TextRequest) -> ScriptoriumResult<String> {
        if req.prompt.contains("Output ONLY valid JSON") {
            Ok(self.judgment_json.clone())
        } else {
            Ok(self.scene_text.clone())
        }
    }

    fn provider_name(&self) -> &'static str {
        "loop-test"
    }

    fn model_name(&self) -> &str {
        "loop-v1"
    }
}

async fn seed(runtime: &Scriptorium) -> (i64, i64, Vec<i64>) {
    let store = runtime.store();
    let project = store
        .create_project(ProjectDraft {
            title: "Talk Show Alpha".to_string(),
            world_setting: Some("Everything is broadcast live.".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let episode = store
        .create_episode(EpisodeDraft::new(project.id, 1, "Episode One"))
        .await
        .unwrap();
    let host = store
        .create_character(CharacterDraft {
            forbidden_actions: vec!["profanity".to_string()],
            ..CharacterDraft::new(project.id, "Host A")
        })
        .await
        .unwrap();
    (project.id, episode.id, vec![host.id])
}

#[tokio::test]
async fn forbidden_action_violations_are_flagged_downstream() {
    let runtime = Scriptorium::in_memory(ProviderRegistry::new());
    let (project_id, episode_id, _) = seed(&runtime).await;
    let store = runtime.store();

    // Content that literally contains a forbidden entry.
    let scene = store
        .create_scene(
            SceneDraft::new(episode_id, 1)
                .with_content("Host A: (slips into profanity) We're off the rails tonight."),
        )
        .await
        .unwrap();

    let characters = store
        .characters_by_project(project_id)
        .await
        .unwrap();
    let profiles: Vec<CharacterProfile> =
        characters.iter().map(CharacterProfile::from).collect();

    let violations = check_forbidden_actions(&scene.content, &profiles);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("Host A"));
    assert!(violations[0].message.contains("profanity"));
}

#[tokio::test]
async fn generation_without_capability_yields_template_and_neutral_evaluation() {
    let runtime = Scriptorium::in_memory(ProviderRegistry::new());
    let (project_id, episode_id, character_ids) = seed(&runtime).await;

    let outcome = runtime
        .generator()
        .generate_scene(
            SceneSpecBuilder::default()
                .project_id(project_id)
                .episode_id(episode_id)
                .number(1u32)
                .goal("Welcome the audience")
                .character_ids(character_ids)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(!outcome.scene.content.is_empty());
    assert!(outcome.scene.ai_generated);
    assert!(outcome.context_used.fallback_used);
    assert!(outcome.scene.content.contains("Host A:"));

    // Persisted evaluation is the all-0.5 neutral default.
    let stored = runtime
        .store()
        .evaluation_by_scene(outcome.scene.id)
        .await
        .unwrap()
        .expect("auto-evaluation persisted");
    assert_eq!(stored.scores, AxisScores::NEUTRAL);
    assert_eq!(stored.overall_score, 0.5);
}

#[tokio::test]
async fn successive_generations_learn_from_stored_history() {
    let judgment = r#"{
        "creativity_score": 0.9,
        "consistency_score": 0.9,
        "emotion_score": 0.8,
        "pacing_score": 0.8,
        "dialogue_score": 0.9,
        "cliches": [],
        "issues": [],
        "summary": "Confident, specific writing.",
        "strengths": ["grounded banter"],
        "suggestions": ["vary sentence rhythm"]
    }"#;
    let driver = Arc::new(LoopDriver {
        scene_text: "Host A: Welcome back to the only show recorded in a lighthouse.\n\
                     Host A: Tonight we find out why the foghorn keeps interrupting."
            .to_string(),
        judgment_json: judgment.to_string(),
    });
    let mut registry = ProviderRegistry::new();
    registry.register("loop", driver);
    let runtime = Scriptorium::in_memory(registry);
    let (project_id, episode_id, character_ids) = seed(&runtime).await;

    // First generation: nothing to learn from yet.
    let first = runtime
        .generator()
        .generate_scene(
            SceneSpecBuilder::default()
                .project_id(project_id)
                .episode_id(episode_id)
                .number(1u32)
                .goal("Open the show")
                .character_ids(character_ids.clone())
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(first.context_used.scenes_referenced, 0);
    assert!((first.evaluation.overall_score - 0.86).abs() < 1e-9);

    // Second generation: the first scene and its score are now history.
    let second = runtime
        .generator()
        .generate_scene(
            SceneSpecBuilder::default()
                .project_id(project_id)
                .episode_id(episode_id)
                .number(2u32)
                .goal("Dig into the foghorn mystery")
                .character_ids(character_ids)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(second.context_used.scenes_referenced, 1);
    assert!((second.context_used.avg_score - 0.86).abs() < 1e-9);
    assert_eq!(second.context_used.strengths_applied, 1);

    // The learning context mirrors what the generator saw, plus mined
    // dialogue in the host's voice.
    let learning = mine_learning_context(runtime.store().as_ref(), project_id, None)
        .await
        .unwrap();
    assert_eq!(learning.scene_count, 2);
    assert_eq!(learning.strengths_to_keep, vec!["grounded banter"]);
    assert!(learning.issues_to_avoid.contains(&"vary sentence rhythm".to_string()));
    assert!(learning.character_examples.contains_key("Host A"));
}

#[tokio::test]
async fn project_stats_aggregate_the_loop_output() {
    let runtime = Scriptorium::in_memory(ProviderRegistry::new());
    let (project_id, episode_id, character_ids) = seed(&runtime).await;

    for n in 1..=2u32 {
        runtime
            .generator()
            .generate_scene(
                SceneSpecBuilder::default()
                    .project_id(project_id)
                    .episode_id(episode_id)
                    .number(n)
                    .goal(format!("Beat {}", n))
                    .character_ids(character_ids.clone())
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
    }

    let stats = runtime.store().project_stats(project_id).await.unwrap();
    assert_eq!(stats.total_episodes, 1);
    assert_eq!(stats.total_scenes, 2);
    assert_eq!(stats.total_characters, 1);
    assert!(stats.total_words > 0);
    assert_eq!(stats.avg_overall_score, Some(0.5));
}
