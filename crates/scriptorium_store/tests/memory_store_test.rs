use scriptorium_core::{
    AxisScores, CallbackDraft, CharacterDraft, EpisodeDraft, NewEvaluation, ProjectDraft,
    SceneDraft, ScenePatch,
};
use scriptorium_error::ScriptoriumErrorKind;
use scriptorium_interface::NarrativeStore;
use scriptorium_store::MemoryStore;

fn neutral_evaluation(scene_id: i64, overall: f64) -> NewEvaluation {
    NewEvaluation {
        scene_id,
        scores: AxisScores::NEUTRAL,
        overall_score: overall,
        cliche_detected: false,
        cliches: Vec::new(),
        issues: Vec::new(),
        summary: "fine".to_string(),
        suggestions: Vec::new(),
        strengths: Vec::new(),
        evaluator: None,
    }
}

async fn seeded_store() -> (MemoryStore, i64, i64) {
    let store = MemoryStore::new();
    let project = store
        .create_project(ProjectDraft::titled("Night Desk"))
        .await
        .unwrap();
    let episode = store
        .create_episode(EpisodeDraft::new(project.id, 1, "Pilot"))
        .await
        .unwrap();
    (store, project.id, episode.id)
}

#[tokio::test]
async fn project_delete_cascades_to_all_owned_rows() {
    let (store, project_id, episode_id) = seeded_store().await;
    let scene = store
        .create_scene(SceneDraft::new(episode_id, 1).with_content("content that exists"))
        .await
        .unwrap();
    store
        .create_character(CharacterDraft::new(project_id, "Mara"))
        .await
        .unwrap();
    store
        .replace_evaluation(neutral_evaluation(scene.id, 0.5))
        .await
        .unwrap();
    store
        .create_callback(CallbackDraft::new(project_id, "the locked drawer"))
        .await
        .unwrap();

    store.delete_project(project_id).await.unwrap();

    assert!(store.episode(episode_id).await.is_err());
    assert!(store.scene(scene.id).await.is_err());
    assert!(store.evaluation_by_scene(scene.id).await.unwrap().is_none());
    assert!(store.characters_by_project(project_id).await.unwrap().is_empty());
    assert!(
        store
            .callbacks_by_project(project_id, None)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn word_count_tracks_content_on_every_write() {
    let (store, _, episode_id) = seeded_store().await;
    let scene = store
        .create_scene(SceneDraft::new(episode_id, 1).with_content("ten chars!"))
        .await
        .unwrap();
    assert_eq!(scene.word_count, 10);

    let updated = store
        .update_scene(
            scene.id,
            ScenePatch {
                content: Some("a much longer body of scene content".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.word_count, updated.content.chars().count());

    // A patch without content leaves the count untouched.
    let retitled = store
        .update_scene(
            scene.id,
            ScenePatch {
                title: Some("Retitled".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(retitled.word_count, updated.word_count);
}

#[tokio::test]
async fn display_id_collisions_get_suffixed() {
    let (store, _, episode_id) = seeded_store().await;
    let first = store
        .create_scene(SceneDraft::new(episode_id, 2))
        .await
        .unwrap();
    let second = store
        .create_scene(SceneDraft::new(episode_id, 2))
        .await
        .unwrap();
    let third = store
        .create_scene(SceneDraft::new(episode_id, 2))
        .await
        .unwrap();

    assert_eq!(first.display_id, "S01E01_SC02");
    assert_eq!(second.display_id, "S01E01_SC02_1");
    assert_eq!(third.display_id, "S01E01_SC02_2");

    let found = store.scene_by_display_id("S01E01_SC02_1").await.unwrap();
    assert_eq!(found.id, second.id);
}

#[tokio::test]
async fn evaluation_replace_is_atomic_and_single() {
    let (store, _, episode_id) = seeded_store().await;
    let scene = store
        .create_scene(SceneDraft::new(episode_id, 1).with_content("some content"))
        .await
        .unwrap();

    let first = store
        .replace_evaluation(neutral_evaluation(scene.id, 0.4))
        .await
        .unwrap();
    let second = store
        .replace_evaluation(neutral_evaluation(scene.id, 0.9))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    let current = store
        .evaluation_by_scene(scene.id)
        .await
        .unwrap()
        .expect("exactly one evaluation");
    assert_eq!(current.id, second.id);
    assert_eq!(current.overall_score, 0.9);
}

#[tokio::test]
async fn child_creation_requires_existing_parent() {
    let store = MemoryStore::new();
    let err = store
        .create_episode(EpisodeDraft::new(42, 1, "orphan"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ScriptoriumErrorKind::Store(_)));

    let err = store
        .create_scene(SceneDraft::new(42, 1))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ScriptoriumErrorKind::Store(_)));

    let err = store
        .replace_evaluation(neutral_evaluation(42, 0.5))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ScriptoriumErrorKind::Store(_)));
}

#[tokio::test]
async fn character_names_are_unique_per_project() {
    let (store, project_id, _) = seeded_store().await;
    store
        .create_character(CharacterDraft::new(project_id, "Mara"))
        .await
        .unwrap();
    assert!(
        store
            .create_character(CharacterDraft::new(project_id, "Mara"))
            .await
            .is_err()
    );

    // Same name in a different project is fine.
    let other = store
        .create_project(ProjectDraft::titled("Other Show"))
        .await
        .unwrap();
    assert!(
        store
            .create_character(CharacterDraft::new(other.id, "Mara"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn resolving_a_callback_records_the_payoff() {
    let (store, project_id, episode_id) = seeded_store().await;
    let scene = store
        .create_scene(SceneDraft::new(episode_id, 1))
        .await
        .unwrap();
    let callback = store
        .create_callback(CallbackDraft::new(project_id, "the unexplained photo"))
        .await
        .unwrap();

    let unresolved = store
        .callbacks_by_project(project_id, Some(false))
        .await
        .unwrap();
    assert_eq!(unresolved.len(), 1);

    let resolved = store
        .resolve_callback(callback.id, scene.id, 1)
        .await
        .unwrap();
    assert!(resolved.resolved);
    assert_eq!(resolved.payoff_scene_id, Some(scene.id));
    assert!(
        store
            .callbacks_by_project(project_id, Some(false))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn scene_version_increments_monotonically() {
    let (store, _, episode_id) = seeded_store().await;
    let scene = store
        .create_scene(SceneDraft::new(episode_id, 1))
        .await
        .unwrap();
    assert_eq!(scene.version, 1);
    let bumped = store.increment_scene_version(scene.id).await.unwrap();
    assert_eq!(bumped.version, 2);
    let again = store.increment_scene_version(scene.id).await.unwrap();
    assert_eq!(again.version, 3);
}
