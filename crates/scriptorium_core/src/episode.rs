//! Episode types.

use crate::{EpisodeId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an episode.
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
pub enum EpisodeStatus {
    /// Outline being assembled
    #[default]
    Outline,
    /// First draft in progress
    Draft,
    /// First editing pass
    FirstEdit,
    /// Final version locked
    Final,
    /// Already broadcast/published
    Broadcast,
}

/// An episode within a project; owns scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique id
    pub id: EpisodeId,
    /// Owning project
    pub project_id: ProjectId,
    /// Ordinal within the project (1-based)
    pub number: u32,
    /// Episode title
    pub title: String,
    /// Free-text summary
    pub summary: Option<String>,
    /// Lifecycle status
    pub status: EpisodeStatus,
    /// Main topic
    pub main_topic: Option<String>,
    /// Secondary topics
    pub sub_topics: Vec<String>,
    /// Target runtime in minutes
    pub target_runtime_minutes: Option<u32>,
    /// Measured runtime in minutes
    pub actual_runtime_minutes: Option<u32>,
    /// Writer notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an episode under an existing project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeDraft {
    /// Owning project
    pub project_id: ProjectId,
    /// Ordinal within the project (1-based)
    pub number: u32,
    /// Episode title
    pub title: String,
    /// Free-text summary
    pub summary: Option<String>,
    /// Main topic
    pub main_topic: Option<String>,
    /// Secondary topics
    #[serde(default)]
    pub sub_topics: Vec<String>,
    /// Target runtime in minutes
    pub target_runtime_minutes: Option<u32>,
    /// Writer notes
    pub notes: Option<String>,
}

impl EpisodeDraft {
    /// Minimal draft with project, number and title.
    pub fn new(project_id: ProjectId, number: u32, title: impl Into<String>) -> Self {
        Self {
            project_id,
            number,
            title: title.into(),
            summary: None,
            main_topic: None,
            sub_topics: Vec::new(),
            target_runtime_minutes: None,
            notes: None,
        }
    }
}

/// Partial update for an episode; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodePatch {
    /// New title
    pub title: Option<String>,
    /// New summary
    pub summary: Option<String>,
    /// New status
    pub status: Option<EpisodeStatus>,
    /// New main topic
    pub main_topic: Option<String>,
    /// New secondary topics
    pub sub_topics: Option<Vec<String>>,
    /// New measured runtime
    pub actual_runtime_minutes: Option<u32>,
    /// New writer notes
    pub notes: Option<String>,
}
