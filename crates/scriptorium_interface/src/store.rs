//! The narrative store trait.

use async_trait::async_trait;
use scriptorium_core::{
    Callback, CallbackDraft, CallbackId, Character, CharacterDraft, CharacterId, CharacterPatch,
    Episode, EpisodeDraft, EpisodeId, EpisodePatch, Evaluation, NewEvaluation, Project,
    ProjectDraft, ProjectId, ProjectPatch, Scene, SceneDraft, SceneId, ScenePatch,
};
use scriptorium_error::ScriptoriumResult;
use serde::{Deserialize, Serialize};

/// Aggregate statistics for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    /// Number of episodes
    pub total_episodes: usize,
    /// Number of scenes across all episodes
    pub total_scenes: usize,
    /// Sum of scene word counts
    pub total_words: usize,
    /// Number of characters
    pub total_characters: usize,
    /// Mean overall score across evaluated scenes
    pub avg_overall_score: Option<f64>,
    /// Mean creativity score across evaluated scenes
    pub avg_creativity_score: Option<f64>,
}

/// The store consumed by the writing engine.
///
/// Implementations own the relational invariants:
///
/// - creating an episode/scene/character existence-checks its parent
/// - deleting a project/episode cascades through everything it owns
/// - a scene's `word_count` is recomputed on every content write
/// - a scene's `display_id` is unique process-wide; collisions are
///   resolved by suffixing, never by overwriting
/// - an evaluation is replaced wholesale (delete-then-insert), so exactly
///   one evaluation exists per evaluated scene at any observable point
#[async_trait]
pub trait NarrativeStore: Send + Sync {
    // ---- projects ----

    /// Create a project.
    async fn create_project(&self, draft: ProjectDraft) -> ScriptoriumResult<Project>;
    /// Fetch a project by id.
    async fn project(&self, id: ProjectId) -> ScriptoriumResult<Project>;
    /// List all projects.
    async fn projects(&self) -> ScriptoriumResult<Vec<Project>>;
    /// Apply a partial update to a project.
    async fn update_project(&self, id: ProjectId, patch: ProjectPatch)
    -> ScriptoriumResult<Project>;
    /// Delete a project and everything it owns.
    async fn delete_project(&self, id: ProjectId) -> ScriptoriumResult<()>;
    /// Aggregate statistics for a project.
    async fn project_stats(&self, id: ProjectId) -> ScriptoriumResult<ProjectStats>;

    // ---- episodes ----

    /// Create an episode under an existing project.
    async fn create_episode(&self, draft: EpisodeDraft) -> ScriptoriumResult<Episode>;
    /// Fetch an episode by id.
    async fn episode(&self, id: EpisodeId) -> ScriptoriumResult<Episode>;
    /// List a project's episodes ordered by episode number.
    async fn episodes_by_project(&self, project_id: ProjectId) -> ScriptoriumResult<Vec<Episode>>;
    /// Apply a partial update to an episode.
    async fn update_episode(&self, id: EpisodeId, patch: EpisodePatch)
    -> ScriptoriumResult<Episode>;
    /// Delete an episode and its scenes.
    async fn delete_episode(&self, id: EpisodeId) -> ScriptoriumResult<()>;

    // ---- scenes ----

    /// Create a scene under an existing episode, generating its display id.
    async fn create_scene(&self, draft: SceneDraft) -> ScriptoriumResult<Scene>;
    /// Fetch a scene by id.
    async fn scene(&self, id: SceneId) -> ScriptoriumResult<Scene>;
    /// Fetch a scene by display id (e.g. `S01E03_SC02`).
    async fn scene_by_display_id(&self, display_id: &str) -> ScriptoriumResult<Scene>;
    /// List an episode's scenes ordered by scene number.
    async fn scenes_by_episode(&self, episode_id: EpisodeId) -> ScriptoriumResult<Vec<Scene>>;
    /// Apply a partial update to a scene, recomputing word count on
    /// content writes.
    async fn update_scene(&self, id: SceneId, patch: ScenePatch) -> ScriptoriumResult<Scene>;
    /// Bump a scene's version counter, returning the updated scene.
    async fn increment_scene_version(&self, id: SceneId) -> ScriptoriumResult<Scene>;
    /// Delete a scene and its evaluation.
    async fn delete_scene(&self, id: SceneId) -> ScriptoriumResult<()>;

    // ---- characters ----

    /// Create a character under an existing project; names are unique per
    /// project.
    async fn create_character(&self, draft: CharacterDraft) -> ScriptoriumResult<Character>;
    /// Fetch a character by id.
    async fn character(&self, id: CharacterId) -> ScriptoriumResult<Character>;
    /// List a project's characters.
    async fn characters_by_project(
        &self,
        project_id: ProjectId,
    ) -> ScriptoriumResult<Vec<Character>>;
    /// Apply a partial update to a character.
    async fn update_character(
        &self,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> ScriptoriumResult<Character>;
    /// Update only a character's living status line.
    async fn set_character_state(
        &self,
        id: CharacterId,
        state: &str,
    ) -> ScriptoriumResult<Character>;
    /// Delete a character.
    async fn delete_character(&self, id: CharacterId) -> ScriptoriumResult<()>;

    // ---- evaluations ----

    /// Replace the evaluation for a scene (atomic delete-then-insert).
    async fn replace_evaluation(&self, new: NewEvaluation) -> ScriptoriumResult<Evaluation>;
    /// Fetch the evaluation attached to a scene, if any.
    async fn evaluation_by_scene(
        &self,
        scene_id: SceneId,
    ) -> ScriptoriumResult<Option<Evaluation>>;

    // ---- callbacks ----

    /// Plant a callback.
    async fn create_callback(&self, draft: CallbackDraft) -> ScriptoriumResult<Callback>;
    /// List a project's callbacks, optionally filtered by resolved state.
    async fn callbacks_by_project(
        &self,
        project_id: ProjectId,
        resolved: Option<bool>,
    ) -> ScriptoriumResult<Vec<Callback>>;
    /// Mark a callback resolved, recording where the payoff landed.
    async fn resolve_callback(
        &self,
        id: CallbackId,
        payoff_scene_id: SceneId,
        payoff_episode_number: u32,
    ) -> ScriptoriumResult<Callback>;
}
