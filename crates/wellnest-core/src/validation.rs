//! # Validation Module
//!
//! Input validation for journal data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile shell                                                 │
//! │  └── Immediate user feedback (slider bounds, text limits)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository (Rust)                                            │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── CHECK / NOT NULL constraints                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_NOTE_LENGTH, MOOD_MAX, MOOD_MIN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a mood score.
///
/// ## Example
/// ```rust
/// use wellnest_core::validation::validate_mood;
///
/// assert!(validate_mood(3).is_ok());
/// assert!(validate_mood(9).is_err());
/// ```
pub fn validate_mood(mood: i64) -> ValidationResult<()> {
    if !(MOOD_MIN..=MOOD_MAX).contains(&mood) {
        return Err(ValidationError::OutOfRange {
            field: "mood".to_string(),
            min: MOOD_MIN,
            max: MOOD_MAX,
        });
    }
    Ok(())
}

/// Validates a journal note's length.
pub fn validate_note(note: &str) -> ValidationResult<()> {
    if note.chars().count() > MAX_NOTE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "note".to_string(),
            max: MAX_NOTE_LENGTH,
        });
    }
    Ok(())
}

/// Validates an identifier such as a metric or tutorial id.
///
/// Ids are lowercase ASCII letters, digits and hyphens.
pub fn validate_identifier(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 64,
        });
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only lowercase letters, digits, and hyphens".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_bounds() {
        assert!(validate_mood(MOOD_MIN).is_ok());
        assert!(validate_mood(MOOD_MAX).is_ok());
        assert!(validate_mood(MOOD_MIN - 1).is_err());
        assert!(validate_mood(MOOD_MAX + 1).is_err());
    }

    #[test]
    fn test_note_length() {
        assert!(validate_note("slept well").is_ok());
        assert!(validate_note(&"a".repeat(MAX_NOTE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_identifier() {
        assert!(validate_identifier("id", "sleep").is_ok());
        assert!(matches!(
            validate_identifier("id", "  "),
            Err(ValidationError::Required { .. })
        ));
    }
}
