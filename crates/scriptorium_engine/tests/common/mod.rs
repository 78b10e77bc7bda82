//! Shared fixtures for engine tests.
// Each test binary compiles its own copy; not every binary uses every
// helper.
#![allow(dead_code)]

use async_trait::async_trait;
use scriptorium_core::{
    AxisScores, CharacterDraft, EpisodeDraft, NewEvaluation, ProjectDraft, SceneDraft,
    TextRequest,
};
use scriptorium_error::{ModelError, ModelErrorKind, ScriptoriumResult};
use scriptorium_interface::{LanguageDriver, NarrativeStore};
use scriptorium_store::MemoryStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Driver that always returns the same canned response.
pub struct StaticDriver {
    pub response: String,
    pub calls: AtomicUsize,
}

impl StaticDriver {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LanguageDriver for StaticDriver {
    async fn generate(&self, _req: &TextRequest) -> ScriptoriumResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }

    fn provider_name(&self) -> &'static str {
        "static-test"
    }

    fn model_name(&self) -> &str {
        "canned-v1"
    }
}

/// Driver that fails every call, simulating a broken provider.
pub struct FailingDriver;

#[async_trait]
impl LanguageDriver for FailingDriver {
    async fn generate(&self, _req: &TextRequest) -> ScriptoriumResult<String> {
        Err(ModelError::new(ModelErrorKind::Api {
            status: 500,
            message: "simulated outage".to_string(),
        })
        .into())
    }

    fn provider_name(&self) -> &'static str {
        "failing-test"
    }

    fn model_name(&self) -> &str {
        "broken-v1"
    }
}

/// A store seeded with one project, one episode and two characters.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub project_id: i64,
    pub episode_id: i64,
    pub character_ids: Vec<i64>,
}

pub async fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let project = store
        .create_project(ProjectDraft {
            title: "Night Desk".to_string(),
            world_setting: Some(
                "The studio broadcasts live, no retakes.\n# internal note\nCallers stay anonymous.\n"
                    .to_string(),
            ),
            style_guide: Some("Short lines. Dry humor.".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let episode = store
        .create_episode(EpisodeDraft::new(project.id, 1, "Pilot"))
        .await
        .unwrap();
    let mara = store
        .create_character(CharacterDraft {
            speech_pattern: Some("Clipped, deadpan".to_string()),
            speech_examples: vec!["We are live. Unfortunately.".to_string()],
            forbidden_actions: vec!["breaking the fourth wall".to_string()],
            ..CharacterDraft::new(project.id, "Mara")
        })
        .await
        .unwrap();
    let joon = store
        .create_character(CharacterDraft {
            speech_pattern: Some("Fast, enthusiastic".to_string()),
            ..CharacterDraft::new(project.id, "Joon")
        })
        .await
        .unwrap();
    Fixture {
        store,
        project_id: project.id,
        episode_id: episode.id,
        character_ids: vec![mara.id, joon.id],
    }
}

/// Create a scene with content and an evaluation carrying the given
/// overall score.
pub async fn evaluated_scene(
    fixture: &Fixture,
    number: u32,
    content: &str,
    overall: f64,
    strengths: Vec<String>,
    suggestions: Vec<String>,
) -> i64 {
    let scene = fixture
        .store
        .create_scene(SceneDraft::new(fixture.episode_id, number).with_content(content))
        .await
        .unwrap();
    fixture
        .store
        .replace_evaluation(NewEvaluation {
            scene_id: scene.id,
            scores: AxisScores::NEUTRAL,
            overall_score: overall,
            cliche_detected: false,
            cliches: Vec::new(),
            issues: Vec::new(),
            summary: format!("scene {} summary", number),
            suggestions,
            strengths,
            evaluator: Some("test".to_string()),
        })
        .await
        .unwrap();
    scene.id
}
