//! Scriptorium: an AI-assisted writing backend for serialized scripts and
//! novels.
//!
//! Structured narrative metadata (projects, episodes, scenes, characters,
//! plot callbacks) feeds a context-assembly → generate → evaluate → store
//! loop: every generation is conditioned on the accumulated history of
//! prior output and its scores, and every evaluation it stores conditions
//! the generations that follow.
//!
//! This crate is the facade: it re-exports the workspace surface and owns
//! process wiring (tracing initialization, the [`Scriptorium`] runtime
//! that connects a store and a provider registry to the engine).
//!
//! # Example
//!
//! ```no_run
//! use scriptorium::{ModelSettings, ProviderRegistry, Scriptorium};
//!
//! # async fn example() -> scriptorium::ScriptoriumResult<()> {
//! scriptorium::init_tracing();
//! let settings = ModelSettings::load().unwrap_or_default();
//! let registry = ProviderRegistry::from_env(&settings);
//! let runtime = Scriptorium::in_memory(registry);
//! let generator = runtime.generator();
//! # let _ = generator;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod runtime;
mod telemetry;

pub use runtime::Scriptorium;
pub use telemetry::init_tracing;

pub use scriptorium_core::*;
pub use scriptorium_engine::*;
pub use scriptorium_error::*;
pub use scriptorium_interface::*;
pub use scriptorium_models::{ModelSettings, ProviderRegistry, SamplingProfile};
pub use scriptorium_store::MemoryStore;
