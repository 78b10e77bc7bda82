//! Static context assembly.
//!
//! The context builder gathers everything a generation step must respect —
//! world rules, character voices, forbidden actions, style guide, prior
//! scenes, unresolved plot threads — into a bounded [`ContextBundle`],
//! plus a flattened prompt rendering of the same material. It is a pure
//! read+transform over the store: no side effects.

use scriptorium_core::{
    Callback, CallbackId, Character, CharacterId, CharacterRole, EmotionBeat, EpisodeId,
    Importance, PersonalityTrait, ProjectId, ProjectKind, Scene, SceneKind,
};
use scriptorium_error::ScriptoriumResult;
use scriptorium_interface::NarrativeStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How many prior scenes the bundle retains.
const PREVIOUS_SCENES_KEPT: usize = 5;
/// How many of those the flattened prompt shows.
const PREVIOUS_SCENES_RENDERED: usize = 3;
/// How many unresolved callbacks the flattened prompt shows.
const CALLBACKS_RENDERED: usize = 5;
/// Hard cap on a prior-scene summary.
const SUMMARY_MAX_CHARS: usize = 150;
/// Lines of content a summary is built from.
const SUMMARY_LINES: usize = 3;
/// Speech examples carried per character profile.
const SPEECH_EXAMPLES_KEPT: usize = 3;

/// Condensed project header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project id
    pub id: ProjectId,
    /// Title
    pub title: String,
    /// Kind of production
    pub kind: ProjectKind,
    /// Genre label
    pub genre: Option<String>,
    /// Intended audience
    pub target_audience: Option<String>,
    /// Tone descriptor
    pub tone: Option<String>,
}

/// A character as the prompt sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Character id
    pub id: CharacterId,
    /// Name (also the dialogue-matching key)
    pub name: String,
    /// Role
    pub role: CharacterRole,
    /// Personality description
    pub personality: String,
    /// Speech pattern description
    pub speech_pattern: String,
    /// Living status line
    pub current_state: Option<String>,
    /// Coarse personality tags
    pub traits: Vec<PersonalityTrait>,
    /// Things this character must never do
    pub forbidden_actions: Vec<String>,
    /// Up to three example lines in this voice
    pub speech_examples: Vec<String>,
}

impl From<&Character> for CharacterProfile {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            role: character.role,
            personality: character.personality.clone().unwrap_or_default(),
            speech_pattern: character.speech_pattern.clone().unwrap_or_default(),
            current_state: character.current_state.clone(),
            traits: character.traits.clone(),
            forbidden_actions: character.forbidden_actions.clone(),
            speech_examples: character
                .speech_examples
                .iter()
                .take(SPEECH_EXAMPLES_KEPT)
                .cloned()
                .collect(),
        }
    }
}

/// Condensed episode header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode id
    pub id: EpisodeId,
    /// Episode number
    pub number: u32,
    /// Title
    pub title: String,
    /// Main topic
    pub main_topic: Option<String>,
    /// Secondary topics
    pub sub_topics: Vec<String>,
    /// Writer notes
    pub notes: Option<String>,
}

/// A prior scene, compressed for prompt inclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSummary {
    /// Scene number
    pub number: u32,
    /// Kind of scene
    pub kind: SceneKind,
    /// Title
    pub title: String,
    /// Goal
    pub goal: String,
    /// First lines of content, hard-truncated
    pub summary: String,
    /// Emotion beats
    pub emotion_curve: Vec<EmotionBeat>,
}

/// An unresolved plot thread, compressed for prompt inclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackSummary {
    /// Callback id
    pub id: CallbackId,
    /// What was planted
    pub content: String,
    /// Episode where the setup happened
    pub setup_episode_number: Option<u32>,
    /// Payoff importance
    pub importance: Importance,
}

impl From<&Callback> for CallbackSummary {
    fn from(callback: &Callback) -> Self {
        Self {
            id: callback.id,
            content: callback.content.clone(),
            setup_episode_number: callback.setup_episode_number,
            importance: callback.importance,
        }
    }
}

/// Everything the generation step must respect, in one bounded bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBundle {
    /// Project header
    pub project: ProjectSummary,
    /// World rules, one per entry
    pub world_rules: Vec<String>,
    /// All (or the targeted subset of) project characters
    pub characters: Vec<CharacterProfile>,
    /// Style guide text ("" when absent)
    pub style_guide: String,
    /// Name-qualified forbidden actions, deduplicated
    pub forbidden: Vec<String>,
    /// Episode header, when an episode was given
    pub episode: Option<EpisodeSummary>,
    /// Prior scenes of that episode (ascending, most recent five)
    pub previous_scenes: Vec<SceneSummary>,
    /// Unresolved plot threads for the project
    pub unresolved_callbacks: Vec<CallbackSummary>,
}

/// Assembles [`ContextBundle`]s from the narrative store.
pub struct ContextBuilder {
    store: Arc<dyn NarrativeStore>,
}

impl ContextBuilder {
    /// Create a builder over a store.
    pub fn new(store: Arc<dyn NarrativeStore>) -> Self {
        Self { store }
    }

    /// Build the full context bundle for a project.
    ///
    /// `current_scene_number` restricts prior-scene summaries to scenes
    /// strictly before it, so a scene being (re)generated never sees its
    /// own or later content.
    ///
    /// # Errors
    ///
    /// `NotFound` when the project id does not resolve.
    #[tracing::instrument(skip(self))]
    pub async fn bundle(
        &self,
        project_id: ProjectId,
        episode_id: Option<EpisodeId>,
        current_scene_number: Option<u32>,
    ) -> ScriptoriumResult<ContextBundle> {
        let project = self.store.project(project_id).await?;
        let characters = self.store.characters_by_project(project_id).await?;

        let world_rules = project
            .world_setting
            .as_deref()
            .map(parse_world_rules)
            .unwrap_or_default();

        let forbidden = forbidden_list(&characters);
        let profiles: Vec<CharacterProfile> =
            characters.iter().map(CharacterProfile::from).collect();

        let (episode, previous_scenes) = match episode_id {
            Some(id) => {
                let episode = self.store.episode(id).await.ok();
                let scenes = self.store.scenes_by_episode(id).await?;
                let summaries = previous_scene_summaries(&scenes, current_scene_number);
                (
                    episode.map(|e| EpisodeSummary {
                        id: e.id,
                        number: e.number,
                        title: e.title,
                        main_topic: e.main_topic,
                        sub_topics: e.sub_topics,
                        notes: e.notes,
                    }),
                    summaries,
                )
            }
            None => (None, Vec::new()),
        };

        let unresolved_callbacks = self
            .store
            .callbacks_by_project(project_id, Some(false))
            .await?
            .iter()
            .map(CallbackSummary::from)
            .collect();

        Ok(ContextBundle {
            project: ProjectSummary {
                id: project.id,
                title: project.title,
                kind: project.kind,
                genre: project.genre,
                target_audience: project.target_audience,
                tone: project.tone,
            },
            world_rules,
            characters: profiles,
            style_guide: project.style_guide.unwrap_or_default(),
            forbidden,
            episode,
            previous_scenes,
            unresolved_callbacks,
        })
    }

    /// Build the flattened prompt text directly.
    ///
    /// # Errors
    ///
    /// `NotFound` when the project id does not resolve.
    pub async fn prompt_text(
        &self,
        project_id: ProjectId,
        episode_id: Option<EpisodeId>,
        scene_goal: Option<&str>,
        target_characters: Option<&[CharacterId]>,
    ) -> ScriptoriumResult<String> {
        let bundle = self.bundle(project_id, episode_id, None).await?;
        Ok(bundle.render(scene_goal, target_characters))
    }
}

impl ContextBundle {
    /// Flatten the bundle into prompt text.
    ///
    /// When `target_characters` is given, only those profiles are shown;
    /// the forbidden list always covers the whole project.
    pub fn render(
        &self,
        scene_goal: Option<&str>,
        target_characters: Option<&[CharacterId]>,
    ) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push("## Project".to_string());
        lines.push(format!("Title: {}", self.project.title));
        lines.push(format!(
            "Genre: {}",
            self.project.genre.as_deref().unwrap_or("N/A")
        ));
        lines.push(format!("Format: {}", self.project.kind));
        if let Some(tone) = &self.project.tone {
            lines.push(format!("Tone: {}", tone));
        }
        lines.push(String::new());

        if !self.world_rules.is_empty() {
            lines.push("## World Rules (must be respected)".to_string());
            for rule in &self.world_rules {
                lines.push(format!("- {}", rule));
            }
            lines.push(String::new());
        }

        lines.push("## Characters".to_string());
        for profile in self.selected_characters(target_characters) {
            lines.push(format!("### {} ({})", profile.name, profile.role));
            if !profile.personality.is_empty() {
                lines.push(format!("Personality: {}", profile.personality));
            }
            if !profile.speech_pattern.is_empty() {
                lines.push(format!("Voice: {}", profile.speech_pattern));
            }
            if let Some(state) = &profile.current_state {
                lines.push(format!("Current state: {}", state));
            }
            if !profile.forbidden_actions.is_empty() {
                lines.push(format!("Never: {}", profile.forbidden_actions.join(", ")));
            }
            lines.push(String::new());
        }

        if !self.style_guide.is_empty() {
            lines.push("## Style Guide".to_string());
            lines.push(self.style_guide.clone());
            lines.push(String::new());
        }

        if !self.forbidden.is_empty() {
            lines.push("## Forbidden Elements (never use)".to_string());
            for item in &self.forbidden {
                lines.push(format!("- {}", item));
            }
            lines.push(String::new());
        }

        if let Some(episode) = &self.episode {
            lines.push("## Episode".to_string());
            lines.push(format!("EP{}: {}", episode.number, episode.title));
            if let Some(topic) = &episode.main_topic {
                lines.push(format!("Main topic: {}", topic));
            }
            lines.push(String::new());
        }

        if !self.previous_scenes.is_empty() {
            lines.push("## Previous Scenes".to_string());
            let start = self
                .previous_scenes
                .len()
                .saturating_sub(PREVIOUS_SCENES_RENDERED);
            for scene in &self.previous_scenes[start..] {
                lines.push(format!("- Scene {}: {}", scene.number, scene.summary));
            }
            lines.push(String::new());
        }

        if !self.unresolved_callbacks.is_empty() {
            lines.push("## Unresolved Plot Threads (consider paying off)".to_string());
            for callback in self.unresolved_callbacks.iter().take(CALLBACKS_RENDERED) {
                lines.push(format!("- {}", callback.content));
            }
            lines.push(String::new());
        }

        if let Some(goal) = scene_goal {
            lines.push("## Scene Goal".to_string());
            lines.push(goal.to_string());
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// Profiles filtered to the target subset, or all of them.
    pub fn selected_characters(
        &self,
        target_characters: Option<&[CharacterId]>,
    ) -> Vec<&CharacterProfile> {
        match target_characters {
            Some(ids) if !ids.is_empty() => self
                .characters
                .iter()
                .filter(|p| ids.contains(&p.id))
                .collect(),
            _ => self.characters.iter().collect(),
        }
    }
}

/// Split a world-setting blob into rules: one per line, blanks and
/// `#`-comments dropped.
fn parse_world_rules(world_setting: &str) -> Vec<String> {
    world_setting
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Union of every character's forbidden actions, each qualified with the
/// character's name. First occurrence wins so output is deterministic.
fn forbidden_list(characters: &[Character]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut forbidden = Vec::new();
    for character in characters {
        for action in &character.forbidden_actions {
            let entry = format!("{}: {}", character.name, action);
            if seen.insert(entry.clone()) {
                forbidden.push(entry);
            }
        }
    }
    forbidden
}

/// Summaries of the scenes before `current_scene_number`, most recent
/// five, ascending.
fn previous_scene_summaries(
    scenes: &[Scene],
    current_scene_number: Option<u32>,
) -> Vec<SceneSummary> {
    let eligible: Vec<&Scene> = scenes
        .iter()
        .filter(|s| current_scene_number.is_none_or(|n| s.number < n))
        .collect();
    let start = eligible.len().saturating_sub(PREVIOUS_SCENES_KEPT);
    eligible[start..]
        .iter()
        .map(|scene| SceneSummary {
            number: scene.number,
            kind: scene.kind,
            title: scene.title.clone().unwrap_or_default(),
            goal: scene.goal.clone().unwrap_or_default(),
            summary: summarize_content(&scene.content),
            emotion_curve: scene.emotion_curve.clone(),
        })
        .collect()
}

/// First three lines joined by spaces, hard-truncated to 150 chars with an
/// ellipsis marker.
fn summarize_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let summary = content
        .lines()
        .take(SUMMARY_LINES)
        .collect::<Vec<_>>()
        .join(" ");
    if summary.chars().count() > SUMMARY_MAX_CHARS {
        let truncated: String = summary.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_rules_skip_blanks_and_comments() {
        let setting = "No magic exists.\n\n# production note\n  Phones never work upstate.  \n";
        let rules = parse_world_rules(setting);
        assert_eq!(rules, vec!["No magic exists.", "Phones never work upstate."]);
    }

    #[test]
    fn summary_takes_three_lines_and_truncates() {
        let content = "line one\nline two\nline three\nline four";
        assert_eq!(summarize_content(content), "line one line two line three");

        let long = "x".repeat(300);
        let summary = summarize_content(&long);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + 3);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn summary_of_empty_content_is_empty() {
        assert_eq!(summarize_content(""), "");
    }
}
