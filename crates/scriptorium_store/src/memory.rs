//! HashMap-backed implementation of the narrative store.

use async_trait::async_trait;
use chrono::Utc;
use scriptorium_core::{
    Callback, CallbackDraft, CallbackId, Character, CharacterDraft, CharacterId, CharacterPatch,
    Episode, EpisodeDraft, EpisodeId, EpisodePatch, Evaluation, EvaluationId, NewEvaluation,
    Project, ProjectDraft, ProjectId, ProjectPatch, Scene, SceneDraft, SceneId, ScenePatch,
};
use scriptorium_error::{ScriptoriumResult, StoreError};
use scriptorium_interface::{NarrativeStore, ProjectStats};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory narrative store.
///
/// # Example
///
/// ```no_run
/// use scriptorium_store::MemoryStore;
/// use scriptorium_interface::NarrativeStore;
/// use scriptorium_core::ProjectDraft;
///
/// # async fn example() -> scriptorium_error::ScriptoriumResult<()> {
/// let store = MemoryStore::new();
/// let project = store.create_project(ProjectDraft::titled("Night Desk")).await?;
/// assert_eq!(project.id, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    projects: HashMap<ProjectId, Project>,
    episodes: HashMap<EpisodeId, Episode>,
    scenes: HashMap<SceneId, Scene>,
    characters: HashMap<CharacterId, Character>,
    /// Keyed by scene id: enforces the 1:1 scene/evaluation ownership.
    evaluations: HashMap<SceneId, Evaluation>,
    callbacks: HashMap<CallbackId, Callback>,
    next_project_id: ProjectId,
    next_episode_id: EpisodeId,
    next_scene_id: SceneId,
    next_character_id: CharacterId,
    next_evaluation_id: EvaluationId,
    next_callback_id: CallbackId,
}

impl Inner {
    /// Generate a display id like `S01E03_SC02`, suffixing on collision.
    ///
    /// Season is fixed at 1 until the store grows a season concept. After
    /// 100 suffix attempts the current unix timestamp breaks the tie.
    fn generate_display_id(&self, episode_number: u32, scene_number: u32) -> String {
        let base = format!("S01E{:02}_SC{:02}", episode_number, scene_number);
        if !self.display_id_taken(&base) {
            return base;
        }
        for suffix in 1..=100u32 {
            let candidate = format!("{}_{}", base, suffix);
            if !self.display_id_taken(&candidate) {
                return candidate;
            }
        }
        format!("{}_{}", base, Utc::now().timestamp())
    }

    fn display_id_taken(&self, candidate: &str) -> bool {
        self.scenes.values().any(|s| s.display_id == candidate)
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NarrativeStore for MemoryStore {
    async fn create_project(&self, draft: ProjectDraft) -> ScriptoriumResult<Project> {
        let mut inner = self.inner.write().await;
        inner.next_project_id += 1;
        let now = Utc::now();
        let project = Project {
            id: inner.next_project_id,
            title: draft.title,
            kind: draft.kind,
            description: draft.description,
            genre: draft.genre,
            target_audience: draft.target_audience,
            tone: draft.tone,
            status: Default::default(),
            world_setting: draft.world_setting,
            style_guide: draft.style_guide,
            created_at: now,
            updated_at: now,
        };
        inner.projects.insert(project.id, project.clone());
        tracing::debug!(project_id = project.id, title = %project.title, "Created project");
        Ok(project)
    }

    async fn project(&self, id: ProjectId) -> ScriptoriumResult<Project> {
        let inner = self.inner.read().await;
        inner
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("project", id).into())
    }

    async fn projects(&self) -> ScriptoriumResult<Vec<Project>> {
        let inner = self.inner.read().await;
        let mut all: Vec<Project> = inner.projects.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> ScriptoriumResult<Project> {
        let mut inner = self.inner.write().await;
        let project = inner
            .projects
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("project", id))?;
        if let Some(title) = patch.title {
            project.title = title;
        }
        if let Some(description) = patch.description {
            project.description = Some(description);
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        if let Some(tone) = patch.tone {
            project.tone = Some(tone);
        }
        if let Some(world_setting) = patch.world_setting {
            project.world_setting = Some(world_setting);
        }
        if let Some(style_guide) = patch.style_guide {
            project.style_guide = Some(style_guide);
        }
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn delete_project(&self, id: ProjectId) -> ScriptoriumResult<()> {
        let mut inner = self.inner.write().await;
        if inner.projects.remove(&id).is_none() {
            return Err(StoreError::not_found("project", id).into());
        }
        // Cascade: episodes -> scenes -> evaluations, plus characters and
        // callbacks. No orphaned rows may remain queryable.
        let episode_ids: Vec<EpisodeId> = inner
            .episodes
            .values()
            .filter(|e| e.project_id == id)
            .map(|e| e.id)
            .collect();
        let scene_ids: Vec<SceneId> = inner
            .scenes
            .values()
            .filter(|s| episode_ids.contains(&s.episode_id))
            .map(|s| s.id)
            .collect();
        for scene_id in &scene_ids {
            inner.scenes.remove(scene_id);
            inner.evaluations.remove(scene_id);
        }
        for episode_id in &episode_ids {
            inner.episodes.remove(episode_id);
        }
        inner.characters.retain(|_, c| c.project_id != id);
        inner.callbacks.retain(|_, c| c.project_id != id);
        tracing::info!(
            project_id = id,
            episodes = episode_ids.len(),
            scenes = scene_ids.len(),
            "Deleted project with cascade"
        );
        Ok(())
    }

    async fn project_stats(&self, id: ProjectId) -> ScriptoriumResult<ProjectStats> {
        let inner = self.inner.read().await;
        if !inner.projects.contains_key(&id) {
            return Err(StoreError::not_found("project", id).into());
        }
        let episode_ids: Vec<EpisodeId> = inner
            .episodes
            .values()
            .filter(|e| e.project_id == id)
            .map(|e| e.id)
            .collect();
        let scenes: Vec<&Scene> = inner
            .scenes
            .values()
            .filter(|s| episode_ids.contains(&s.episode_id))
            .collect();
        let evaluations: Vec<&Evaluation> = scenes
            .iter()
            .filter_map(|s| inner.evaluations.get(&s.id))
            .collect();
        let mean = |extract: fn(&Evaluation) -> f64| -> Option<f64> {
            if evaluations.is_empty() {
                None
            } else {
                Some(evaluations.iter().map(|e| extract(e)).sum::<f64>() / evaluations.len() as f64)
            }
        };
        Ok(ProjectStats {
            total_episodes: episode_ids.len(),
            total_scenes: scenes.len(),
            total_words: scenes.iter().map(|s| s.word_count).sum(),
            total_characters: inner
                .characters
                .values()
                .filter(|c| c.project_id == id)
                .count(),
            avg_overall_score: mean(|e| e.overall_score),
            avg_creativity_score: mean(|e| e.scores.creativity),
        })
    }

    async fn create_episode(&self, draft: EpisodeDraft) -> ScriptoriumResult<Episode> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&draft.project_id) {
            return Err(StoreError::validation(format!(
                "project {} does not exist",
                draft.project_id
            ))
            .into());
        }
        inner.next_episode_id += 1;
        let now = Utc::now();
        let episode = Episode {
            id: inner.next_episode_id,
            project_id: draft.project_id,
            number: draft.number,
            title: draft.title,
            summary: draft.summary,
            status: Default::default(),
            main_topic: draft.main_topic,
            sub_topics: draft.sub_topics,
            target_runtime_minutes: draft.target_runtime_minutes,
            actual_runtime_minutes: None,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        inner.episodes.insert(episode.id, episode.clone());
        Ok(episode)
    }

    async fn episode(&self, id: EpisodeId) -> ScriptoriumResult<Episode> {
        let inner = self.inner.read().await;
        inner
            .episodes
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("episode", id).into())
    }

    async fn episodes_by_project(&self, project_id: ProjectId) -> ScriptoriumResult<Vec<Episode>> {
        let inner = self.inner.read().await;
        let mut episodes: Vec<Episode> = inner
            .episodes
            .values()
            .filter(|e| e.project_id == project_id)
            .cloned()
            .collect();
        episodes.sort_by_key(|e| e.number);
        Ok(episodes)
    }

    async fn update_episode(
        &self,
        id: EpisodeId,
        patch: EpisodePatch,
    ) -> ScriptoriumResult<Episode> {
        let mut inner = self.inner.write().await;
        let episode = inner
            .episodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("episode", id))?;
        if let Some(title) = patch.title {
            episode.title = title;
        }
        if let Some(summary) = patch.summary {
            episode.summary = Some(summary);
        }
        if let Some(status) = patch.status {
            episode.status = status;
        }
        if let Some(main_topic) = patch.main_topic {
            episode.main_topic = Some(main_topic);
        }
        if let Some(sub_topics) = patch.sub_topics {
            episode.sub_topics = sub_topics;
        }
        if let Some(actual) = patch.actual_runtime_minutes {
            episode.actual_runtime_minutes = Some(actual);
        }
        if let Some(notes) = patch.notes {
            episode.notes = Some(notes);
        }
        episode.updated_at = Utc::now();
        Ok(episode.clone())
    }

    async fn delete_episode(&self, id: EpisodeId) -> ScriptoriumResult<()> {
        let mut inner = self.inner.write().await;
        if inner.episodes.remove(&id).is_none() {
            return Err(StoreError::not_found("episode", id).into());
        }
        let scene_ids: Vec<SceneId> = inner
            .scenes
            .values()
            .filter(|s| s.episode_id == id)
            .map(|s| s.id)
            .collect();
        for scene_id in scene_ids {
            inner.scenes.remove(&scene_id);
            inner.evaluations.remove(&scene_id);
        }
        Ok(())
    }

    async fn create_scene(&self, draft: SceneDraft) -> ScriptoriumResult<Scene> {
        let mut inner = self.inner.write().await;
        let episode_number = inner
            .episodes
            .get(&draft.episode_id)
            .map(|e| e.number)
            .ok_or_else(|| {
                StoreError::validation(format!("episode {} does not exist", draft.episode_id))
            })?;
        let display_id = inner.generate_display_id(episode_number, draft.number);
        inner.next_scene_id += 1;
        let now = Utc::now();
        let scene = Scene {
            id: inner.next_scene_id,
            episode_id: draft.episode_id,
            number: draft.number,
            display_id,
            kind: draft.kind,
            title: draft.title,
            goal: draft.goal,
            emotion_curve: draft.emotion_curve,
            conflict: draft.conflict,
            dialog_density: draft.dialog_density,
            character_ids: draft.character_ids,
            word_count: draft.content.chars().count(),
            content: draft.content,
            ai_generated: false,
            human_edited: false,
            generation_prompt: None,
            writer_notes: draft.writer_notes,
            version: 1,
            parent_scene_id: None,
            created_at: now,
            updated_at: now,
        };
        inner.scenes.insert(scene.id, scene.clone());
        tracing::debug!(scene_id = scene.id, display_id = %scene.display_id, "Created scene");
        Ok(scene)
    }

    async fn scene(&self, id: SceneId) -> ScriptoriumResult<Scene> {
        let inner = self.inner.read().await;
        inner
            .scenes
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("scene", id).into())
    }

    async fn scene_by_display_id(&self, display_id: &str) -> ScriptoriumResult<Scene> {
        let inner = self.inner.read().await;
        inner
            .scenes
            .values()
            .find(|s| s.display_id == display_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::new(scriptorium_error::StoreErrorKind::DisplayIdNotFound(
                    display_id.to_string(),
                ))
                .into()
            })
    }

    async fn scenes_by_episode(&self, episode_id: EpisodeId) -> ScriptoriumResult<Vec<Scene>> {
        let inner = self.inner.read().await;
        let mut scenes: Vec<Scene> = inner
            .scenes
            .values()
            .filter(|s| s.episode_id == episode_id)
            .cloned()
            .collect();
        scenes.sort_by_key(|s| s.number);
        Ok(scenes)
    }

    async fn update_scene(&self, id: SceneId, patch: ScenePatch) -> ScriptoriumResult<Scene> {
        let mut inner = self.inner.write().await;
        let scene = inner
            .scenes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("scene", id))?;
        if let Some(title) = patch.title {
            scene.title = Some(title);
        }
        if let Some(kind) = patch.kind {
            scene.kind = kind;
        }
        if let Some(goal) = patch.goal {
            scene.goal = Some(goal);
        }
        if let Some(curve) = patch.emotion_curve {
            scene.emotion_curve = curve;
        }
        if let Some(conflict) = patch.conflict {
            scene.conflict = conflict;
        }
        if let Some(density) = patch.dialog_density {
            scene.dialog_density = density;
        }
        if let Some(character_ids) = patch.character_ids {
            scene.character_ids = character_ids;
        }
        if let Some(content) = patch.content {
            scene.word_count = content.chars().count();
            scene.content = content;
        }
        if let Some(prompt) = patch.generation_prompt {
            scene.generation_prompt = Some(prompt);
        }
        if let Some(notes) = patch.writer_notes {
            scene.writer_notes = Some(notes);
        }
        if let Some(ai_generated) = patch.ai_generated {
            scene.ai_generated = ai_generated;
        }
        if let Some(human_edited) = patch.human_edited {
            scene.human_edited = human_edited;
        }
        scene.updated_at = Utc::now();
        Ok(scene.clone())
    }

    async fn increment_scene_version(&self, id: SceneId) -> ScriptoriumResult<Scene> {
        let mut inner = self.inner.write().await;
        let scene = inner
            .scenes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("scene", id))?;
        scene.version += 1;
        scene.updated_at = Utc::now();
        Ok(scene.clone())
    }

    async fn delete_scene(&self, id: SceneId) -> ScriptoriumResult<()> {
        let mut inner = self.inner.write().await;
        if inner.scenes.remove(&id).is_none() {
            return Err(StoreError::not_found("scene", id).into());
        }
        inner.evaluations.remove(&id);
        Ok(())
    }

    async fn create_character(&self, draft: CharacterDraft) -> ScriptoriumResult<Character> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&draft.project_id) {
            return Err(StoreError::validation(format!(
                "project {} does not exist",
                draft.project_id
            ))
            .into());
        }
        if inner
            .characters
            .values()
            .any(|c| c.project_id == draft.project_id && c.name == draft.name)
        {
            return Err(StoreError::new(scriptorium_error::StoreErrorKind::DuplicateName {
                entity: "character",
                name: draft.name,
                project_id: draft.project_id,
            })
            .into());
        }
        inner.next_character_id += 1;
        let now = Utc::now();
        let character = Character {
            id: inner.next_character_id,
            project_id: draft.project_id,
            name: draft.name,
            role: draft.role,
            description: draft.description,
            backstory: draft.backstory,
            traits: draft.traits,
            personality: draft.personality,
            speech_pattern: draft.speech_pattern,
            speech_examples: draft.speech_examples,
            current_state: None,
            forbidden_actions: draft.forbidden_actions,
            total_appearances: 0,
            total_dialogues: 0,
            created_at: now,
            updated_at: now,
        };
        inner.characters.insert(character.id, character.clone());
        Ok(character)
    }

    async fn character(&self, id: CharacterId) -> ScriptoriumResult<Character> {
        let inner = self.inner.read().await;
        inner
            .characters
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("character", id).into())
    }

    async fn characters_by_project(
        &self,
        project_id: ProjectId,
    ) -> ScriptoriumResult<Vec<Character>> {
        let inner = self.inner.read().await;
        let mut characters: Vec<Character> = inner
            .characters
            .values()
            .filter(|c| c.project_id == project_id)
            .cloned()
            .collect();
        characters.sort_by_key(|c| c.id);
        Ok(characters)
    }

    async fn update_character(
        &self,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> ScriptoriumResult<Character> {
        let mut inner = self.inner.write().await;
        let character = inner
            .characters
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("character", id))?;
        if let Some(name) = patch.name {
            character.name = name;
        }
        if let Some(role) = patch.role {
            character.role = role;
        }
        if let Some(description) = patch.description {
            character.description = Some(description);
        }
        if let Some(backstory) = patch.backstory {
            character.backstory = Some(backstory);
        }
        if let Some(traits) = patch.traits {
            character.traits = traits;
        }
        if let Some(personality) = patch.personality {
            character.personality = Some(personality);
        }
        if let Some(speech_pattern) = patch.speech_pattern {
            character.speech_pattern = Some(speech_pattern);
        }
        if let Some(speech_examples) = patch.speech_examples {
            character.speech_examples = speech_examples;
        }
        if let Some(current_state) = patch.current_state {
            character.current_state = Some(current_state);
        }
        if let Some(forbidden_actions) = patch.forbidden_actions {
            character.forbidden_actions = forbidden_actions;
        }
        character.updated_at = Utc::now();
        Ok(character.clone())
    }

    async fn set_character_state(
        &self,
        id: CharacterId,
        state: &str,
    ) -> ScriptoriumResult<Character> {
        let mut inner = self.inner.write().await;
        let character = inner
            .characters
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("character", id))?;
        character.current_state = Some(state.to_string());
        character.updated_at = Utc::now();
        Ok(character.clone())
    }

    async fn delete_character(&self, id: CharacterId) -> ScriptoriumResult<()> {
        let mut inner = self.inner.write().await;
        if inner.characters.remove(&id).is_none() {
            return Err(StoreError::not_found("character", id).into());
        }
        Ok(())
    }

    async fn replace_evaluation(&self, new: NewEvaluation) -> ScriptoriumResult<Evaluation> {
        let mut inner = self.inner.write().await;
        if !inner.scenes.contains_key(&new.scene_id) {
            return Err(StoreError::validation(format!(
                "scene {} does not exist",
                new.scene_id
            ))
            .into());
        }
        // Delete-then-insert under the same lock: callers never observe
        // zero or two evaluations for the scene.
        inner.evaluations.remove(&new.scene_id);
        inner.next_evaluation_id += 1;
        let evaluation = Evaluation {
            id: inner.next_evaluation_id,
            scene_id: new.scene_id,
            scores: new.scores,
            overall_score: new.overall_score,
            cliche_detected: new.cliche_detected,
            cliches: new.cliches,
            issues: new.issues,
            summary: new.summary,
            suggestions: new.suggestions,
            strengths: new.strengths,
            evaluator: new.evaluator,
            created_at: Utc::now(),
        };
        inner.evaluations.insert(new.scene_id, evaluation.clone());
        Ok(evaluation)
    }

    async fn evaluation_by_scene(
        &self,
        scene_id: SceneId,
    ) -> ScriptoriumResult<Option<Evaluation>> {
        let inner = self.inner.read().await;
        Ok(inner.evaluations.get(&scene_id).cloned())
    }

    async fn create_callback(&self, draft: CallbackDraft) -> ScriptoriumResult<Callback> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&draft.project_id) {
            return Err(StoreError::validation(format!(
                "project {} does not exist",
                draft.project_id
            ))
            .into());
        }
        inner.next_callback_id += 1;
        let now = Utc::now();
        let callback = Callback {
            id: inner.next_callback_id,
            project_id: draft.project_id,
            content: draft.content,
            description: draft.description,
            setup_scene_id: draft.setup_scene_id,
            setup_episode_number: draft.setup_episode_number,
            payoff_scene_id: None,
            payoff_episode_number: None,
            resolved: false,
            importance: draft.importance,
            created_at: now,
            updated_at: now,
        };
        inner.callbacks.insert(callback.id, callback.clone());
        Ok(callback)
    }

    async fn callbacks_by_project(
        &self,
        project_id: ProjectId,
        resolved: Option<bool>,
    ) -> ScriptoriumResult<Vec<Callback>> {
        let inner = self.inner.read().await;
        let mut callbacks: Vec<Callback> = inner
            .callbacks
            .values()
            .filter(|c| c.project_id == project_id)
            .filter(|c| resolved.is_none_or(|r| c.resolved == r))
            .cloned()
            .collect();
        callbacks.sort_by_key(|c| c.id);
        Ok(callbacks)
    }

    async fn resolve_callback(
        &self,
        id: CallbackId,
        payoff_scene_id: SceneId,
        payoff_episode_number: u32,
    ) -> ScriptoriumResult<Callback> {
        let mut inner = self.inner.write().await;
        let callback = inner
            .callbacks
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("callback", id))?;
        callback.resolved = true;
        callback.payoff_scene_id = Some(payoff_scene_id);
        callback.payoff_episode_number = Some(payoff_episode_number);
        callback.updated_at = Utc::now();
        Ok(callback.clone())
    }
}
