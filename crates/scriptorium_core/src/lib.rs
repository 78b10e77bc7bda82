//! Core data types for the Scriptorium writing backend.
//!
//! This crate provides the domain entities shared across the workspace:
//! projects, episodes, scenes, characters, evaluations and plot callbacks,
//! together with their draft/patch types and the request type sent to
//! language-model drivers.
//!
//! Every enum carries exactly one canonical serialization (snake_case via
//! serde and strum); the store boundary validates against these types
//! instead of accepting raw strings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod callback;
mod character;
mod episode;
mod evaluation;
mod ids;
mod project;
mod request;
mod scene;

pub use callback::{Callback, CallbackDraft, Importance};
pub use character::{Character, CharacterDraft, CharacterPatch, CharacterRole, PersonalityTrait};
pub use episode::{Episode, EpisodeDraft, EpisodePatch, EpisodeStatus};
pub use evaluation::{
    AxisScores, ClicheDetection, ClicheKind, Evaluation, EvaluationIssue, IssueCategory,
    NewEvaluation, Severity,
};
pub use ids::{CallbackId, CharacterId, EpisodeId, EvaluationId, ProjectId, SceneId};
pub use project::{Project, ProjectDraft, ProjectKind, ProjectPatch, ProjectStatus};
pub use request::TextRequest;
pub use scene::{ConflictKind, DialogDensity, EmotionBeat, Scene, SceneDraft, SceneKind, ScenePatch};
