//! # Error Types
//!
//! Domain-specific error types for wellnest-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wellnest-core errors (this file)                                      │
//! │  ├── TutorialError    - Rejected tutorial transitions                  │
//! │  ├── SettingsError    - Settings store failures                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  wellnest-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  app errors                                                            │
//! │  └── ContainerError   - Capability could not be produced               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tutorial errors are returned as values. A caller that does not care about
//! a duplicate start request simply ignores `AlreadyActive`.

use thiserror::Error;

// =============================================================================
// Tutorial Error
// =============================================================================

/// A tutorial transition that was refused.
///
/// Every variant except `Settings` guarantees the session state was left
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TutorialError {
    /// Another (or the same) tutorial is already being shown.
    #[error("Tutorial '{active}' is already active")]
    AlreadyActive { active: String },

    /// The tutorial was completed before and has not been reset.
    #[error("Tutorial '{0}' was already completed")]
    AlreadyCompleted(String),

    /// Reset was requested for a tutorial while a different one is active.
    #[error("Cannot reset '{requested}' while '{active}' is active")]
    Conflict { active: String, requested: String },

    /// A step transition was requested while no tutorial is active.
    #[error("No tutorial is active")]
    NotActive,

    /// The tutorial has no steps, so there is no step 0 to show.
    #[error("Tutorial '{0}' has no steps")]
    Empty(String),

    /// Completion flag could not be read or written.
    #[error("Tutorial settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Convenience alias for tutorial transitions.
pub type TutorialResult<T> = Result<T, TutorialError>;

// =============================================================================
// Settings Error
// =============================================================================

/// Failures of the key-value settings store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Backing storage could not be read or written.
    #[error("Settings I/O failed: {0}")]
    Io(String),

    /// Stored settings could not be decoded.
    #[error("Settings are corrupt: {0}")]
    Corrupt(String),

    /// A thread panicked while holding the settings lock.
    #[error("Settings lock poisoned")]
    Poisoned,
}

/// Convenience alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., an id with uppercase letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate metric id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorial_error_messages() {
        let err = TutorialError::Conflict {
            active: "journal-basics".to_string(),
            requested: "insights-tour".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot reset 'insights-tour' while 'journal-basics' is active"
        );

        let err = TutorialError::AlreadyCompleted("journal-basics".to_string());
        assert_eq!(err.to_string(), "Tutorial 'journal-basics' was already completed");
    }

    #[test]
    fn test_settings_error_converts_to_tutorial_error() {
        let err: TutorialError = SettingsError::Io("disk full".to_string()).into();
        assert!(matches!(err, TutorialError::Settings(SettingsError::Io(_))));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "mood".to_string(),
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "mood must be between 1 and 5");
    }
}
