//! Error types for the Scriptorium writing backend.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enums name the specific failure conditions
//! - `*Error` structs wrap a kind with source-location tracking via
//!   `#[track_caller]`
//! - `ScriptoriumError` unifies them for callers that only care whether
//!   the operation succeeded
//!
//! # Examples
//!
//! ```
//! use scriptorium_error::{ScriptoriumResult, StoreError, StoreErrorKind};
//!
//! fn lookup() -> ScriptoriumResult<String> {
//!     Err(StoreError::new(StoreErrorKind::NotFound {
//!         entity: "project",
//!         id: 7,
//!     }))?
//! }
//!
//! assert!(lookup().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod model;
mod store;

pub use config::ConfigError;
pub use engine::{EngineError, EngineErrorKind};
pub use error::{ScriptoriumError, ScriptoriumErrorKind, ScriptoriumResult};
pub use model::{ModelError, ModelErrorKind};
pub use store::{StoreError, StoreErrorKind};
