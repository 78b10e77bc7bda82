//! Top-level error wrapper types.

use crate::{ConfigError, EngineError, ModelError, StoreError};

/// Union of the error families raised across the workspace.
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScriptoriumErrorKind {
    /// Narrative store error
    #[from(StoreError)]
    Store(StoreError),
    /// Language-model capability error
    #[from(ModelError)]
    Model(ModelError),
    /// Writing-engine error
    #[from(EngineError)]
    Engine(EngineError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Scriptorium error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scriptorium_error::{ScriptoriumError, ScriptoriumErrorKind, StoreError};
///
/// let err: ScriptoriumError = StoreError::not_found("episode", 4).into();
/// assert!(matches!(err.kind(), ScriptoriumErrorKind::Store(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scriptorium Error: {}", _0)]
pub struct ScriptoriumError(Box<ScriptoriumErrorKind>);

impl ScriptoriumError {
    /// Create a new error from a kind.
    pub fn new(kind: ScriptoriumErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScriptoriumErrorKind {
        &self.0
    }

    /// Whether this error is a store-level NotFound.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            ScriptoriumErrorKind::Store(StoreError {
                kind: crate::StoreErrorKind::NotFound { .. },
                ..
            }) | ScriptoriumErrorKind::Store(StoreError {
                kind: crate::StoreErrorKind::DisplayIdNotFound(_),
                ..
            })
        )
    }
}

// Generic From implementation for any type that converts to ScriptoriumErrorKind
impl<T> From<T> for ScriptoriumError
where
    T: Into<ScriptoriumErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Scriptorium operations.
pub type ScriptoriumResult<T> = std::result::Result<T, ScriptoriumError>;
