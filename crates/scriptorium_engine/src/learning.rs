//! Learning-context mining.
//!
//! Mines every previously generated scene and its evaluation across a
//! project to build the feedback bundle that biases the next generation
//! toward prior strengths and away from prior weaknesses. Always
//! re-derived from stored state on each call — there is no persisted
//! "learned model", so the output can never drift from the store.

use scriptorium_core::{Evaluation, ProjectId, Scene, SceneId, SceneKind};
use scriptorium_error::ScriptoriumResult;
use scriptorium_interface::NarrativeStore;
use std::collections::BTreeMap;

/// Scenes at or below this many chars are noise, not history.
const MIN_CONTENT_CHARS: usize = 50;
/// How many top-scoring scenes feed the strengths pool.
const BEST_SCENES: usize = 3;
/// Cap on strengths and issues lists.
const LIST_CAP: usize = 5;
/// Best-scene content preview length.
const PREVIEW_CHARS: usize = 500;
/// How many recent scenes are scanned for dialogue examples.
const EXAMPLE_SCENES: usize = 5;
/// Dialogue examples kept per speaker.
const EXAMPLES_PER_SPEAKER: usize = 2;
/// Dialogue example truncation length.
const EXAMPLE_CHARS: usize = 100;
/// Minimum trailing text for a line to count as dialogue.
const MIN_DIALOGUE_CHARS: usize = 10;
/// Maximum leading-token length for a speaker name.
const MAX_SPEAKER_CHARS: usize = 32;
/// Suggestions taken from each evaluated scene.
const SUGGESTIONS_PER_SCENE: usize = 2;
/// Clichés synthesized into avoidance notes per scene.
const CLICHES_PER_SCENE: usize = 2;

/// A top-scoring prior scene, carried as a style exemplar.
#[derive(Debug, Clone, PartialEq)]
pub struct BestScene {
    /// Kind of the exemplar scene
    pub kind: SceneKind,
    /// Its overall score
    pub score: f64,
    /// First 500 chars of its content
    pub preview: String,
}

/// What the project's history says about how to write the next scene.
///
/// A project with no evaluated scenes yields zeroed/empty fields — that is
/// "nothing learned yet", not an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LearningContext {
    /// Number of qualifying scenes found (evaluated or not)
    pub scene_count: usize,
    /// Mean overall score across evaluated scenes
    pub avg_score: f64,
    /// The top-scoring scenes, best first
    pub best_scenes: Vec<BestScene>,
    /// Deduplicated strengths from the best scenes (≤ 5)
    pub strengths_to_keep: Vec<String>,
    /// Deduplicated problems from all evaluated scenes (≤ 5)
    pub issues_to_avoid: Vec<String>,
    /// Mined dialogue examples keyed by speaker name (≤ 2 each)
    pub character_examples: BTreeMap<String, Vec<String>>,
}

impl LearningContext {
    /// Whether any history was available to learn from.
    pub fn has_history(&self) -> bool {
        self.scene_count > 0
    }
}

/// Mine the project's scenes and evaluations into a [`LearningContext`].
///
/// `exclude_scene` removes one in-progress scene from the mining set so a
/// regeneration never learns from the content it is replacing.
///
/// # Errors
///
/// `NotFound` when the project id does not resolve. A project with no
/// evaluated scenes is not an error.
#[tracing::instrument(skip(store))]
pub async fn mine_learning_context(
    store: &dyn NarrativeStore,
    project_id: ProjectId,
    exclude_scene: Option<SceneId>,
) -> ScriptoriumResult<LearningContext> {
    store.project(project_id).await?;

    let mut qualifying: Vec<Scene> = Vec::new();
    let mut evaluated: Vec<(Scene, Evaluation)> = Vec::new();

    for episode in store.episodes_by_project(project_id).await? {
        for scene in store.scenes_by_episode(episode.id).await? {
            if exclude_scene == Some(scene.id) {
                continue;
            }
            if scene.content.chars().count() <= MIN_CONTENT_CHARS {
                continue;
            }
            if let Some(evaluation) = store.evaluation_by_scene(scene.id).await? {
                evaluated.push((scene.clone(), evaluation));
            }
            qualifying.push(scene);
        }
    }

    let mut context = LearningContext {
        scene_count: qualifying.len(),
        ..Default::default()
    };

    if evaluated.is_empty() {
        tracing::debug!(project_id, scenes = context.scene_count, "No evaluated history yet");
        return Ok(context);
    }

    context.avg_score =
        evaluated.iter().map(|(_, e)| e.overall_score).sum::<f64>() / evaluated.len() as f64;

    evaluated.sort_by(|a, b| {
        b.1.overall_score
            .partial_cmp(&a.1.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut strengths: Vec<String> = Vec::new();
    for (scene, evaluation) in evaluated.iter().take(BEST_SCENES) {
        context.best_scenes.push(BestScene {
            kind: scene.kind,
            score: evaluation.overall_score,
            preview: scene.content.chars().take(PREVIEW_CHARS).collect(),
        });
        strengths.extend(evaluation.strengths.iter().cloned());
    }
    context.strengths_to_keep = dedup_capped(strengths, LIST_CAP);

    let mut issues: Vec<String> = Vec::new();
    for (_, evaluation) in &evaluated {
        issues.extend(
            evaluation
                .suggestions
                .iter()
                .take(SUGGESTIONS_PER_SCENE)
                .cloned(),
        );
        if evaluation.cliche_detected {
            for cliche in evaluation.cliches.iter().take(CLICHES_PER_SCENE) {
                issues.push(format!("avoid cliche: {}", cliche.explanation));
            }
        }
    }
    context.issues_to_avoid = dedup_capped(issues, LIST_CAP);

    let start = qualifying.len().saturating_sub(EXAMPLE_SCENES);
    for scene in &qualifying[start..] {
        collect_dialogue_examples(&scene.content, &mut context.character_examples);
    }

    tracing::debug!(
        project_id,
        scenes = context.scene_count,
        evaluated = evaluated.len(),
        avg_score = context.avg_score,
        "Mined learning context"
    );
    Ok(context)
}

/// Order-preserving dedup with a cap.
fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .take(cap)
        .collect()
}

/// Scan content for `Speaker: dialogue` lines and collect up to two
/// examples per distinct speaker.
fn collect_dialogue_examples(content: &str, examples: &mut BTreeMap<String, Vec<String>>) {
    for line in content.lines() {
        let Some((speaker, dialogue)) = line.split_once(':') else {
            continue;
        };
        let speaker = speaker.trim();
        let dialogue = dialogue.trim();
        if speaker.is_empty()
            || speaker.chars().count() > MAX_SPEAKER_CHARS
            || dialogue.chars().count() < MIN_DIALOGUE_CHARS
        {
            continue;
        }
        let entry = examples.entry(speaker.to_string()).or_default();
        if entry.len() < EXAMPLES_PER_SPEAKER {
            entry.push(dialogue.chars().take(EXAMPLE_CHARS).collect());
        }
    }
}
