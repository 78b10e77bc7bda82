//! Plot-callback (foreshadowing) types.
//!
//! A callback is a planted narrative element expected to be referenced
//! again later. It references scenes but is not owned by them; resolving a
//! callback records where the payoff landed.

use crate::{CallbackId, ProjectId, SceneId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How important it is that a callback pays off.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Importance {
    /// Nice to pay off
    Low,
    /// Should pay off
    #[default]
    Medium,
    /// Must pay off
    High,
}

/// A plot thread / foreshadowing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callback {
    /// Unique id
    pub id: CallbackId,
    /// Owning project
    pub project_id: ProjectId,
    /// What was planted
    pub content: String,
    /// Extra context for the writer
    pub description: Option<String>,
    /// Scene where the setup happened
    pub setup_scene_id: Option<SceneId>,
    /// Episode number of the setup
    pub setup_episode_number: Option<u32>,
    /// Scene where the payoff landed
    pub payoff_scene_id: Option<SceneId>,
    /// Episode number of the payoff
    pub payoff_episode_number: Option<u32>,
    /// Whether the thread has been resolved
    pub resolved: bool,
    /// Payoff importance
    pub importance: Importance,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to plant a callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackDraft {
    /// Owning project
    pub project_id: ProjectId,
    /// What is being planted
    pub content: String,
    /// Extra context for the writer
    pub description: Option<String>,
    /// Scene where the setup happens
    pub setup_scene_id: Option<SceneId>,
    /// Episode number of the setup
    pub setup_episode_number: Option<u32>,
    /// Payoff importance
    #[serde(default)]
    pub importance: Importance,
}

impl CallbackDraft {
    /// Minimal draft with project and content.
    pub fn new(project_id: ProjectId, content: impl Into<String>) -> Self {
        Self {
            project_id,
            content: content.into(),
            description: None,
            setup_scene_id: None,
            setup_episode_number: None,
            importance: Importance::default(),
        }
    }
}
