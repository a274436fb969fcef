//! Error types for the onboarding library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all onboarding operations.
#[derive(Error, Debug)]
pub enum OnboardingError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Instructor not found for the given ID
    #[error("Instructor with ID {id} not found")]
    InstructorNotFound { id: u64 },
    /// Step not found for the given ID
    #[error("Step with ID {id} not found")]
    StepNotFound { id: u64 },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A row changed since the caller last read it
    #[error("{entity} {id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        entity: &'static str,
        id: u64,
        expected: u64,
        actual: u64,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> OnboardingError {
        OnboardingError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> OnboardingError {
        OnboardingError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl OnboardingError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        OnboardingError::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// True for errors caused by the caller rather than the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            OnboardingError::InvalidInput { .. }
                | OnboardingError::InstructorNotFound { .. }
                | OnboardingError::StepNotFound { .. }
                | OnboardingError::TaskNotFound { .. }
                | OnboardingError::VersionConflict { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| OnboardingError::database(message).with_source(e))
    }
}

/// Result type alias for onboarding operations
pub type Result<T> = std::result::Result<T, OnboardingError>;
