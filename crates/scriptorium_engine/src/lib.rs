//! Context assembly, generation and evaluation engine for Scriptorium.
//!
//! This crate is the feedback loop at the center of the backend:
//!
//! 1. [`ContextBuilder`] assembles a bounded natural-language bundle from
//!    stored narrative state (world rules, character voices, prior-scene
//!    summaries, unresolved plot threads, style guide).
//! 2. [`mine_learning_context`] re-derives, on every call, what previous
//!    generations did well and badly from their stored evaluations.
//! 3. [`SceneGenerator`] combines both with explicit scene parameters into
//!    one prompt, dispatches to a [`LanguageDriver`], and persists the
//!    result — falling back to deterministic templates when no capability
//!    is configured, so a generation request never hard-fails.
//! 4. [`SceneEvaluator`] scores the result (static cliché matching plus
//!    external judgment) and stores it, feeding the next iteration.
//!
//! [`LanguageDriver`]: scriptorium_interface::LanguageDriver
//!
//! # Example
//!
//! ```no_run
//! use scriptorium_engine::{SceneGenerator, SceneSpecBuilder};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     store: Arc<dyn scriptorium_interface::NarrativeStore>,
//! # ) -> scriptorium_error::ScriptoriumResult<()> {
//! let generator = SceneGenerator::new(store, None);
//! let spec = SceneSpecBuilder::default()
//!     .project_id(1i64)
//!     .episode_id(1i64)
//!     .number(1u32)
//!     .goal("Introduce the night shift and its one hard rule.")
//!     .build()
//!     .expect("complete spec");
//! let outcome = generator.generate_scene(spec).await?;
//! assert!(!outcome.scene.content.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod evaluator;
mod extraction;
mod fallback;
mod generator;
mod learning;
mod prompt;
mod script;

pub use context::{
    CallbackSummary, CharacterProfile, ContextBuilder, ContextBundle, EpisodeSummary,
    ProjectSummary, SceneSummary,
};
pub use evaluator::{
    EvaluatorConfig, QuickEvaluation, SceneEvaluator, check_forbidden_actions,
};
pub use extraction::{extract_json, parse_json};
pub use generator::{
    ContextUsage, GenerationOutcome, GeneratorConfig, RegenerationOutcome, SceneGenerator,
    SceneSpec, SceneSpecBuilder, SceneVariation,
};
pub use learning::{BestScene, LearningContext, mine_learning_context};
pub use script::{FullScript, SCENE_SEPARATOR, assemble_full_script, split_full_script};
