//! Character types.

use crate::{CharacterId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A character's role in the production.
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
pub enum CharacterRole {
    /// Lead
    Protagonist,
    /// Opposing lead
    Antagonist,
    /// Supporting cast
    #[default]
    Supporting,
    /// Show host
    Host,
    /// Co-host
    CoHost,
    /// Guest appearance
    Guest,
    /// Narrator
    Narrator,
    /// Background
    Extra,
}

/// Coarse personality descriptors attached to a character.
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
pub enum PersonalityTrait {
    /// Cynical
    Cynical,
    /// Warm
    Warm,
    /// Humorous
    Humorous,
    /// Serious
    Serious,
    /// Emotional
    Emotional,
    /// Rational
    Rational,
    /// Sarcastic
    Sarcastic,
    /// Empathetic
    Empathetic,
    /// Provocative
    Provocative,
    /// Calm
    Calm,
}

/// A character row.
///
/// `name` is unique within a project and doubles as the natural-language
/// matching key for mined dialogue examples. `current_state` is a living
/// status line, the one field mutated as a side effect of scene
/// generation rather than through full-entity updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique id
    pub id: CharacterId,
    /// Owning project
    pub project_id: ProjectId,
    /// Name, unique within the project
    pub name: String,
    /// Role
    pub role: CharacterRole,
    /// Free-text description
    pub description: Option<String>,
    /// Backstory
    pub backstory: Option<String>,
    /// Coarse personality tags
    pub traits: Vec<PersonalityTrait>,
    /// Detailed personality description
    pub personality: Option<String>,
    /// How this character speaks
    pub speech_pattern: Option<String>,
    /// Example lines in this character's voice
    pub speech_examples: Vec<String>,
    /// Living status, updated as episodes progress
    pub current_state: Option<String>,
    /// Things this character must never do or say
    pub forbidden_actions: Vec<String>,
    /// Cumulative scene appearances
    pub total_appearances: u32,
    /// Cumulative dialogue lines
    pub total_dialogues: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a character under an existing project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDraft {
    /// Owning project
    pub project_id: ProjectId,
    /// Name, unique within the project
    pub name: String,
    /// Role
    #[serde(default)]
    pub role: CharacterRole,
    /// Free-text description
    pub description: Option<String>,
    /// Backstory
    pub backstory: Option<String>,
    /// Coarse personality tags
    #[serde(default)]
    pub traits: Vec<PersonalityTrait>,
    /// Detailed personality description
    pub personality: Option<String>,
    /// How this character speaks
    pub speech_pattern: Option<String>,
    /// Example lines in this character's voice
    #[serde(default)]
    pub speech_examples: Vec<String>,
    /// Things this character must never do or say
    #[serde(default)]
    pub forbidden_actions: Vec<String>,
}

impl CharacterDraft {
    /// Minimal draft with project and name.
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
            role: CharacterRole::default(),
            description: None,
            backstory: None,
            traits: Vec::new(),
            personality: None,
            speech_pattern: None,
            speech_examples: Vec::new(),
            forbidden_actions: Vec::new(),
        }
    }
}

/// Partial update for a character; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterPatch {
    /// New name
    pub name: Option<String>,
    /// New role
    pub role: Option<CharacterRole>,
    /// New description
    pub description: Option<String>,
    /// New backstory
    pub backstory: Option<String>,
    /// New personality tags
    pub traits: Option<Vec<PersonalityTrait>>,
    /// New personality description
    pub personality: Option<String>,
    /// New speech pattern
    pub speech_pattern: Option<String>,
    /// New example lines
    pub speech_examples: Option<Vec<String>>,
    /// New current state
    pub current_state: Option<String>,
    /// New forbidden actions
    pub forbidden_actions: Option<Vec<String>>,
}
