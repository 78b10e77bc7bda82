//! Narrative store error types.

/// Specific error conditions for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoreErrorKind {
    /// A referenced entity id does not exist
    #[display("{} {} not found", entity, id)]
    NotFound {
        /// Entity kind ("project", "episode", "scene", ...)
        entity: &'static str,
        /// The id that failed to resolve
        id: i64,
    },
    /// A scene display id does not exist
    #[display("scene '{}' not found", _0)]
    DisplayIdNotFound(String),
    /// A write referenced a parent that does not exist or carried invalid data
    #[display("validation failed: {}", _0)]
    Validation(String),
    /// A name that must be unique within its parent already exists
    #[display("{} '{}' already exists in project {}", entity, name, project_id)]
    DuplicateName {
        /// Entity kind carrying the unique name
        entity: &'static str,
        /// The conflicting name
        name: String,
        /// Owning project id
        project_id: i64,
    },
}

/// Error type for narrative store operations.
///
/// # Examples
///
/// ```
/// use scriptorium_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::NotFound { entity: "scene", id: 3 });
/// assert!(format!("{}", err).contains("scene 3 not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The specific error condition
    pub kind: StoreErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoreError {
    /// Create a new StoreError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`StoreErrorKind::NotFound`] error.
    #[track_caller]
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::new(StoreErrorKind::NotFound { entity, id })
    }

    /// Shorthand for a [`StoreErrorKind::Validation`] error.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Validation(message.into()))
    }
}
