//! # Domain Types
//!
//! Journal entry types shared by the repository layer and its fakes.
//!
//! ## Dual-Key Identity Pattern
//! Every entry has:
//! - `id`: UUID v4, immutable, used for lookups and deletes
//! - `day`: the calendar day the entry describes (several entries per day are allowed)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{validate_mood, validate_note, ValidationResult};

// =============================================================================
// Journal Entry
// =============================================================================

/// A persisted journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Day the entry is about.
    pub day: NaiveDate,

    /// Mood score, `MOOD_MIN..=MOOD_MAX`.
    pub mood: i64,

    /// Optional free-text note.
    pub note: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    pub day: NaiveDate,
    pub mood: i64,
    pub note: Option<String>,
}

impl NewJournalEntry {
    pub fn new(day: NaiveDate, mood: i64) -> Self {
        NewJournalEntry {
            day,
            mood,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Checks business rules before the entry reaches the database.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_mood(self.mood)?;
        if let Some(note) = &self.note {
            validate_note(note)?;
        }
        Ok(())
    }

    /// Builds a full entry with the given id and timestamp.
    ///
    /// Blank notes are stored as `None`.
    pub fn into_entry(self, id: String, now: DateTime<Utc>) -> JournalEntry {
        JournalEntry {
            id,
            day: self.day,
            mood: self.mood,
            note: self.note.filter(|n| !n.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}
