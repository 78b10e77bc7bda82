//! Project types: the top-level container for a serialized production.

use crate::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of production a project represents.
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
pub enum ProjectKind {
    /// Talk show / podcast
    #[default]
    TalkShow,
    /// Drama series
    Drama,
    /// Feature film
    Movie,
    /// Web drama
    WebDrama,
    /// Variety show
    Variety,
    /// Documentary
    Documentary,
    /// Anything else
    Other,
}

/// Lifecycle status of a project.
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
pub enum ProjectStatus {
    /// Initial drafting
    #[default]
    Draft,
    /// Actively being written
    InProgress,
    /// Under review
    Review,
    /// Finished
    Completed,
    /// Shelved
    Archived,
}

/// A writing project: owns episodes and characters.
///
/// `world_setting` holds one world rule per line; lines starting with `#`
/// are comments and are skipped when rules are assembled into context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique id
    pub id: ProjectId,
    /// Project title
    pub title: String,
    /// Kind of production
    pub kind: ProjectKind,
    /// Free-text description
    pub description: Option<String>,
    /// Genre label
    pub genre: Option<String>,
    /// Intended audience
    pub target_audience: Option<String>,
    /// Overall tone descriptor
    pub tone: Option<String>,
    /// Lifecycle status
    pub status: ProjectStatus,
    /// World rules, one per line
    pub world_setting: Option<String>,
    /// Free-text style guide
    pub style_guide: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    /// Project title
    pub title: String,
    /// Kind of production
    #[serde(default)]
    pub kind: ProjectKind,
    /// Free-text description
    pub description: Option<String>,
    /// Genre label
    pub genre: Option<String>,
    /// Intended audience
    pub target_audience: Option<String>,
    /// Overall tone descriptor
    pub tone: Option<String>,
    /// World rules, one per line
    pub world_setting: Option<String>,
    /// Free-text style guide
    pub style_guide: Option<String>,
}

impl ProjectDraft {
    /// Minimal draft with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a project; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New status
    pub status: Option<ProjectStatus>,
    /// New tone
    pub tone: Option<String>,
    /// New world setting
    pub world_setting: Option<String>,
    /// New style guide
    pub style_guide: Option<String>,
}
