//! Entity id aliases.
//!
//! Ids are plain `i64` values allocated per-entity by the store. Aliases
//! keep signatures readable without the ceremony of newtype wrappers.

/// Project id.
pub type ProjectId = i64;
/// Episode id.
pub type EpisodeId = i64;
/// Scene id (the numeric row id, not the display id).
pub type SceneId = i64;
/// Character id.
pub type CharacterId = i64;
/// Evaluation id.
pub type EvaluationId = i64;
/// Callback (plot thread) id.
pub type CallbackId = i64;
