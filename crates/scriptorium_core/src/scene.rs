//! Scene types: the smallest narrative unit.
//!
//! A scene carries structured metadata (goal, emotion curve, conflict
//! kind, dialog density) alongside its free-text content. The structure is
//! chosen by a human; generation only varies the prose within it.

use crate::{CharacterId, EpisodeId, SceneId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of scene.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SceneKind {
    /// Cold open / show opening
    Opening,
    /// In-depth discussion segment
    Talk,
    /// News recap segment
    NewsSummary,
    /// High-impact highlight
    Highlight,
    /// Wrap-up
    Closing,
    /// Bridge between segments
    Transition,
    /// Interview
    Interview,
    /// Voice-over narration
    Narration,
    /// Action sequence
    Action,
    /// Conversation scene
    #[default]
    Dialogue,
}

/// Kind of conflict driving a scene.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConflictKind {
    /// Tension between characters
    Relationship,
    /// A character's inner dilemma
    Internal,
    /// Pressure from outside circumstances
    External,
    /// Clash of values or beliefs
    Ideological,
    /// Comedic friction
    Comedic,
    /// No conflict
    #[default]
    None,
}

/// A beat on a scene's emotion curve.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmotionBeat {
    /// Settled, even
    Calm,
    /// Energy building
    Rising,
    /// Held tension
    Tension,
    /// Peak
    Climax,
    /// Coming down
    Falling,
    /// Release
    Resolution,
    /// Sudden burst
    Explosive,
    /// Held silence / afterglow
    Silence,
}

/// How dialogue-heavy a scene should be.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DialogDensity {
    /// Mostly dialogue, minimal directions
    High,
    /// Balanced dialogue and directions
    #[default]
    Medium,
    /// Mostly narration/description
    Low,
}

/// A scene row.
///
/// `word_count` is always recomputed from `content` by the store; it is
/// never independently settable. `display_id` (`S01E03_SC02` style) is
/// unique process-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique id
    pub id: SceneId,
    /// Owning episode
    pub episode_id: EpisodeId,
    /// Ordinal within the episode (1-based)
    pub number: u32,
    /// Derived display id, e.g. `S01E03_SC02`
    pub display_id: String,
    /// Kind of scene
    pub kind: SceneKind,
    /// Scene title
    pub title: Option<String>,
    /// What this scene must accomplish
    pub goal: Option<String>,
    /// Ordered emotion beats
    pub emotion_curve: Vec<EmotionBeat>,
    /// Conflict kind
    pub conflict: ConflictKind,
    /// Dialogue density
    pub dialog_density: DialogDensity,
    /// Participating characters
    pub character_ids: Vec<CharacterId>,
    /// Scene text
    pub content: String,
    /// Whether the content was machine-generated
    pub ai_generated: bool,
    /// Whether a human edited the content afterwards
    pub human_edited: bool,
    /// Head of the prompt used for generation (first 2000 chars)
    pub generation_prompt: Option<String>,
    /// Writer notes
    pub writer_notes: Option<String>,
    /// Character count of `content`, store-maintained
    pub word_count: usize,
    /// Monotonically increasing version counter
    pub version: u32,
    /// Previous version of this scene, if any
    pub parent_scene_id: Option<SceneId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a scene under an existing episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDraft {
    /// Owning episode
    pub episode_id: EpisodeId,
    /// Ordinal within the episode (1-based)
    pub number: u32,
    /// Kind of scene
    #[serde(default)]
    pub kind: SceneKind,
    /// Scene title
    pub title: Option<String>,
    /// What this scene must accomplish
    pub goal: Option<String>,
    /// Ordered emotion beats
    #[serde(default)]
    pub emotion_curve: Vec<EmotionBeat>,
    /// Conflict kind
    #[serde(default)]
    pub conflict: ConflictKind,
    /// Dialogue density
    #[serde(default)]
    pub dialog_density: DialogDensity,
    /// Participating characters
    #[serde(default)]
    pub character_ids: Vec<CharacterId>,
    /// Scene text
    #[serde(default)]
    pub content: String,
    /// Writer notes
    pub writer_notes: Option<String>,
}

impl SceneDraft {
    /// Minimal draft with episode and number.
    pub fn new(episode_id: EpisodeId, number: u32) -> Self {
        Self {
            episode_id,
            number,
            kind: SceneKind::default(),
            title: None,
            goal: None,
            emotion_curve: Vec::new(),
            conflict: ConflictKind::default(),
            dialog_density: DialogDensity::default(),
            character_ids: Vec::new(),
            content: String::new(),
            writer_notes: None,
        }
    }

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the goal.
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }
}

/// Partial update for a scene; `None` fields are left unchanged.
///
/// Setting `content` makes the store recompute `word_count`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenePatch {
    /// New title
    pub title: Option<String>,
    /// New kind
    pub kind: Option<SceneKind>,
    /// New goal
    pub goal: Option<String>,
    /// New emotion beats
    pub emotion_curve: Option<Vec<EmotionBeat>>,
    /// New conflict kind
    pub conflict: Option<ConflictKind>,
    /// New dialogue density
    pub dialog_density: Option<DialogDensity>,
    /// New participants
    pub character_ids: Option<Vec<CharacterId>>,
    /// New content (triggers word-count recomputation)
    pub content: Option<String>,
    /// New generation-prompt head
    pub generation_prompt: Option<String>,
    /// New writer notes
    pub writer_notes: Option<String>,
    /// Mark as machine-generated or not
    pub ai_generated: Option<bool>,
    /// Mark as human-edited or not
    pub human_edited: Option<bool>,
}
