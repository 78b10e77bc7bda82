//! Scene generation orchestration.
//!
//! A human decides the structure — goal, emotion curve, conflict, density
//! — and the generator only varies the prose inside it. Each call pulls
//! static context, mines the learning context fresh, assembles one
//! prompt, dispatches, persists the scene, and runs the auto-evaluation
//! whose stored score conditions the *next* generation. Provider failures
//! degrade to templates; a generation request never hard-fails on the
//! capability.

use crate::context::{CharacterProfile, ContextBuilder, ContextBundle};
use crate::evaluator::SceneEvaluator;
use crate::fallback::template_scene;
use crate::learning::{LearningContext, mine_learning_context};
use crate::prompt;
use derive_builder::Builder;
use scriptorium_core::{
    CharacterId, ConflictKind, DialogDensity, EmotionBeat, EpisodeId, Evaluation, ProjectId,
    Scene, SceneDraft, SceneId, SceneKind, ScenePatch, TextRequest,
};
use scriptorium_error::{EngineError, EngineErrorKind, ScriptoriumResult};
use scriptorium_interface::{LanguageDriver, NarrativeStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed style directives for variation mode.
const VARIATION_STYLES: [&str; 3] = [
    "more humorous and lighter in tone",
    "more serious, with sustained tension",
    "more emotional and dramatic",
];

/// Sampling knobs for the generator. Creative paths run hot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Temperature for fresh generation
    pub creative_temperature: f32,
    /// Temperature for regeneration (slightly hotter to escape the draft)
    pub regenerate_temperature: f32,
    /// Temperature for stylistic variations
    pub variation_temperature: f32,
    /// Hard cap on output tokens per call
    pub max_output_tokens: u32,
    /// How much of the prompt is persisted on the scene
    pub prompt_head_chars: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            creative_temperature: 0.75,
            regenerate_temperature: 0.85,
            variation_temperature: 0.9,
            max_output_tokens: 4000,
            prompt_head_chars: 2000,
        }
    }
}

/// Everything a generation request specifies about the scene to write.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct SceneSpec {
    /// Project to generate within
    pub project_id: ProjectId,
    /// Episode the scene belongs to
    pub episode_id: EpisodeId,
    /// Scene number within the episode
    pub number: u32,
    /// What the scene must accomplish (required, non-empty)
    pub goal: String,
    /// Kind of scene
    #[builder(default)]
    pub kind: SceneKind,
    /// Ordered emotion beats
    #[builder(default)]
    pub emotion_curve: Vec<EmotionBeat>,
    /// Conflict kind
    #[builder(default)]
    pub conflict: ConflictKind,
    /// Dialogue density
    #[builder(default)]
    pub dialog_density: DialogDensity,
    /// Participating characters (empty = all project characters)
    #[builder(default)]
    pub character_ids: Vec<CharacterId>,
    /// Free-text extra instructions
    #[builder(default)]
    pub additional_instructions: Option<String>,
    /// Target content length in characters
    #[builder(default = "1000")]
    pub target_length: usize,
}

/// What context fed a generation, for caller inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextUsage {
    /// Prior scenes the learning pass referenced
    pub scenes_referenced: usize,
    /// Their mean overall score
    pub avg_score: f64,
    /// Learned strengths applied
    pub strengths_applied: usize,
    /// Learned problems avoided
    pub issues_avoided: usize,
    /// Whether the template fallback produced the content
    pub fallback_used: bool,
}

/// Result of a fresh generation.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The persisted scene
    pub scene: Scene,
    /// The persisted auto-evaluation
    pub evaluation: Evaluation,
    /// What context was used
    pub context_used: ContextUsage,
}

/// Result of a regeneration.
#[derive(Debug, Clone)]
pub struct RegenerationOutcome {
    /// The updated scene (version bumped)
    pub scene: Scene,
    /// Whether the template fallback produced the content
    pub fallback_used: bool,
}

/// One stylistic rendering from variation mode. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneVariation {
    /// 1-based variation number
    pub number: usize,
    /// The style directive used
    pub style: String,
    /// The rendered content
    pub content: String,
    /// Character count of the content
    pub word_count: usize,
}

/// Orchestrates context assembly, generation, persistence and
/// auto-evaluation.
pub struct SceneGenerator {
    store: Arc<dyn NarrativeStore>,
    driver: Option<Arc<dyn LanguageDriver>>,
    evaluator: SceneEvaluator,
    config: GeneratorConfig,
}

impl SceneGenerator {
    /// Create a generator. The same driver is handed to the embedded
    /// auto-evaluator; use [`Self::with_evaluator`] to score with a
    /// different model than the one that writes.
    pub fn new(store: Arc<dyn NarrativeStore>, driver: Option<Arc<dyn LanguageDriver>>) -> Self {
        let evaluator = SceneEvaluator::new(driver.clone());
        Self {
            store,
            driver,
            evaluator,
            config: GeneratorConfig::default(),
        }
    }

    /// Replace the embedded auto-evaluator.
    pub fn with_evaluator(mut self, evaluator: SceneEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Replace the sampling config.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate a new scene and persist it together with its evaluation.
    ///
    /// # Errors
    ///
    /// - `EmptyGoal` when the spec's goal is blank
    /// - `NotFound` when the project does not resolve
    /// - `Validation` when the episode does not exist
    ///
    /// Capability failures are not errors: the template fallback runs and
    /// `context_used.fallback_used` is set.
    #[tracing::instrument(skip(self, spec), fields(project_id = spec.project_id, episode_id = spec.episode_id, number = spec.number))]
    pub async fn generate_scene(&self, spec: SceneSpec) -> ScriptoriumResult<GenerationOutcome> {
        if spec.goal.trim().is_empty() {
            return Err(EngineError::new(EngineErrorKind::EmptyGoal).into());
        }

        let bundle = ContextBuilder::new(self.store.clone())
            .bundle(spec.project_id, Some(spec.episode_id), Some(spec.number))
            .await?;
        let learning =
            mine_learning_context(self.store.as_ref(), spec.project_id, None).await?;

        let prompt_text = prompt::render_generation_prompt(&bundle, &learning, &spec);
        let request = TextRequest::new(prompt_text.clone())
            .with_temperature(self.config.creative_temperature)
            .with_max_tokens(
                (spec.target_length.saturating_mul(2) as u32).min(self.config.max_output_tokens),
            );

        let (content, fallback_used) =
            self.dispatch(&request, spec.kind, &bundle, &spec, &learning).await;

        let scene = self
            .store
            .create_scene(SceneDraft {
                episode_id: spec.episode_id,
                number: spec.number,
                kind: spec.kind,
                title: Some(default_title(&spec.goal)),
                goal: Some(spec.goal.clone()),
                emotion_curve: spec.emotion_curve.clone(),
                conflict: spec.conflict,
                dialog_density: spec.dialog_density,
                character_ids: spec.character_ids.clone(),
                content,
                writer_notes: spec.additional_instructions.clone(),
            })
            .await?;
        let scene = self
            .store
            .update_scene(
                scene.id,
                ScenePatch {
                    ai_generated: Some(true),
                    generation_prompt: Some(head(&prompt_text, self.config.prompt_head_chars)),
                    ..Default::default()
                },
            )
            .await?;

        // Auto-evaluation always follows generation; its stored score is
        // what the next generation learns from.
        let profiles = owned_profiles(&bundle, &spec.character_ids);
        let new_evaluation = self
            .evaluator
            .evaluate(scene.id, &scene.content, None, &profiles)
            .await;
        let evaluation = self.store.replace_evaluation(new_evaluation).await?;

        debug!(
            scene_id = scene.id,
            display_id = %scene.display_id,
            overall = evaluation.overall_score,
            fallback_used,
            "Scene generated and evaluated"
        );

        Ok(GenerationOutcome {
            scene,
            evaluation,
            context_used: ContextUsage {
                scenes_referenced: learning.scene_count,
                avg_score: learning.avg_score,
                strengths_applied: learning.strengths_to_keep.len(),
                issues_avoided: learning.issues_to_avoid.len(),
                fallback_used,
            },
        })
    }

    /// Regenerate an existing scene, holding its stored structure
    /// constant and bumping its version.
    ///
    /// The scene being regenerated is excluded from learning-context
    /// mining so it cannot learn from the content it replaces. Flags
    /// (`ai_generated`, `human_edited`) are left untouched, and no
    /// auto-evaluation runs; the caller re-evaluates when ready.
    ///
    /// # Errors
    ///
    /// `NotFound` when the scene or its episode does not resolve.
    #[tracing::instrument(skip(self, modification_request))]
    pub async fn regenerate_scene(
        &self,
        scene_id: SceneId,
        modification_request: Option<&str>,
    ) -> ScriptoriumResult<RegenerationOutcome> {
        let scene = self.store.scene(scene_id).await?;
        let episode = self.store.episode(scene.episode_id).await?;

        let bundle = ContextBuilder::new(self.store.clone())
            .bundle(episode.project_id, Some(episode.id), Some(scene.number))
            .await?;
        let learning =
            mine_learning_context(self.store.as_ref(), episode.project_id, Some(scene.id)).await?;

        let prompt_text =
            prompt::render_regeneration_prompt(&bundle, &learning, &scene, modification_request);
        let request = TextRequest::new(prompt_text.clone())
            .with_temperature(self.config.regenerate_temperature)
            .with_max_tokens(self.config.max_output_tokens);

        let spec_for_fallback = SceneSpec {
            project_id: episode.project_id,
            episode_id: episode.id,
            number: scene.number,
            goal: scene.goal.clone().unwrap_or_default(),
            kind: scene.kind,
            emotion_curve: scene.emotion_curve.clone(),
            conflict: scene.conflict,
            dialog_density: scene.dialog_density,
            character_ids: scene.character_ids.clone(),
            additional_instructions: None,
            target_length: scene.content.chars().count().max(500),
        };
        let (content, fallback_used) = self
            .dispatch(&request, scene.kind, &bundle, &spec_for_fallback, &learning)
            .await;

        self.store
            .update_scene(
                scene.id,
                ScenePatch {
                    content: Some(content),
                    generation_prompt: Some(head(&prompt_text, self.config.prompt_head_chars)),
                    ..Default::default()
                },
            )
            .await?;
        let scene = self.store.increment_scene_version(scene.id).await?;

        debug!(
            scene_id = scene.id,
            version = scene.version,
            fallback_used,
            "Scene regenerated"
        );
        Ok(RegenerationOutcome {
            scene,
            fallback_used,
        })
    }

    /// Produce up to three stylistic variations of a scene for the writer
    /// to choose from. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// `NotFound` when the scene or its episode does not resolve.
    #[tracing::instrument(skip(self))]
    pub async fn generate_variations(
        &self,
        scene_id: SceneId,
        count: usize,
    ) -> ScriptoriumResult<Vec<SceneVariation>> {
        let scene = self.store.scene(scene_id).await?;
        let episode = self.store.episode(scene.episode_id).await?;
        let bundle = ContextBuilder::new(self.store.clone())
            .bundle(episode.project_id, Some(episode.id), Some(scene.number))
            .await?;
        let learning =
            mine_learning_context(self.store.as_ref(), episode.project_id, Some(scene.id)).await?;

        let spec_for_fallback = SceneSpec {
            project_id: episode.project_id,
            episode_id: episode.id,
            number: scene.number,
            goal: scene.goal.clone().unwrap_or_default(),
            kind: scene.kind,
            emotion_curve: scene.emotion_curve.clone(),
            conflict: scene.conflict,
            dialog_density: scene.dialog_density,
            character_ids: scene.character_ids.clone(),
            additional_instructions: None,
            target_length: 1000,
        };

        let mut variations = Vec::new();
        for (i, style) in VARIATION_STYLES.iter().take(count.min(3)).enumerate() {
            let request =
                TextRequest::new(prompt::render_variation_prompt(&bundle, &scene, style))
                    .with_temperature(self.config.variation_temperature)
                    .with_max_tokens(3000);
            let (content, _) = self
                .dispatch(&request, scene.kind, &bundle, &spec_for_fallback, &learning)
                .await;
            variations.push(SceneVariation {
                number: i + 1,
                style: style.to_string(),
                word_count: content.chars().count(),
                content,
            });
        }
        Ok(variations)
    }

    /// Call the driver, degrading to the template set on absence, error
    /// or empty output. This path never fails.
    async fn dispatch(
        &self,
        request: &TextRequest,
        kind: SceneKind,
        bundle: &ContextBundle,
        spec: &SceneSpec,
        learning: &LearningContext,
    ) -> (String, bool) {
        let fallback = || {
            let names: Vec<String> = bundle
                .selected_characters(Some(&spec.character_ids))
                .iter()
                .map(|p| p.name.clone())
                .collect();
            template_scene(kind, &names, &spec.goal, learning)
        };

        match &self.driver {
            Some(driver) => match driver.generate(request).await {
                Ok(text) if !text.trim().is_empty() => (text, false),
                Ok(_) => {
                    warn!("Generation capability returned empty output, using template");
                    (fallback(), true)
                }
                Err(e) => {
                    warn!(error = %e, "Generation capability failed, using template");
                    (fallback(), true)
                }
            },
            None => {
                debug!("No generation capability configured, using template");
                (fallback(), true)
            }
        }
    }
}

/// Title defaulted from the goal's first line, truncated to 50 chars.
fn default_title(goal: &str) -> String {
    let first_line = goal.lines().next().unwrap_or("").trim();
    first_line.chars().take(50).collect()
}

/// Clone the profiles the evaluator should see for this scene.
fn owned_profiles(bundle: &ContextBundle, character_ids: &[CharacterId]) -> Vec<CharacterProfile> {
    bundle
        .selected_characters(Some(character_ids))
        .into_iter()
        .cloned()
        .collect()
}

/// First `max` chars of a prompt, for persistence on the scene row.
fn head(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
