//! # Journal Repository
//!
//! SQLite-backed [`JournalRepository`]. Every call goes through the
//! [`DatabaseManager`], so writes are serialized and reads see only
//! committed entries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use wellnest_core::{DateRange, JournalEntry, NewJournalEntry};

use super::JournalRepository;
use crate::error::{DbError, DbResult};
use crate::manager::DatabaseManager;

const SELECT_BY_ID: &str = r#"
    SELECT id, day, mood, note, created_at, updated_at
    FROM journal_entries
    WHERE id = ?1
"#;

const SELECT_BETWEEN: &str = r#"
    SELECT id, day, mood, note, created_at, updated_at
    FROM journal_entries
    WHERE day BETWEEN ?1 AND ?2
    ORDER BY day ASC, created_at ASC
"#;

/// Repository for journal entries.
#[derive(Debug, Clone)]
pub struct SqliteJournalRepository {
    db: Arc<DatabaseManager>,
}

impl SqliteJournalRepository {
    /// Creates a new SqliteJournalRepository.
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        SqliteJournalRepository { db }
    }
}

#[async_trait]
impl JournalRepository for SqliteJournalRepository {
    async fn add_entry(&self, entry: NewJournalEntry) -> DbResult<JournalEntry> {
        entry.validate()?;
        let record = entry.into_entry(Uuid::new_v4().to_string(), Utc::now());

        debug!(id = %record.id, day = %record.day, "Inserting journal entry");

        let row = record.clone();
        self.db
            .write(move |conn| {
                Box::pin(async move {
                    sqlx::query(
                        r#"
                        INSERT INTO journal_entries (id, day, mood, note, created_at, updated_at)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                        "#,
                    )
                    .bind(&row.id)
                    .bind(row.day)
                    .bind(row.mood)
                    .bind(&row.note)
                    .bind(row.created_at)
                    .bind(row.updated_at)
                    .execute(&mut *conn)
                    .await?;
                    Ok::<_, DbError>(())
                })
            })
            .await?;

        info!(id = %record.id, "Journal entry added");
        Ok(record)
    }

    async fn update_entry(&self, id: &str, entry: NewJournalEntry) -> DbResult<JournalEntry> {
        entry.validate()?;
        let id = id.to_string();
        let now = Utc::now();
        let note = entry.note.filter(|n| !n.trim().is_empty());

        self.db
            .write_returning(move |conn| {
                Box::pin(async move {
                    let result = sqlx::query(
                        r#"
                        UPDATE journal_entries
                        SET day = ?2, mood = ?3, note = ?4, updated_at = ?5
                        WHERE id = ?1
                        "#,
                    )
                    .bind(&id)
                    .bind(entry.day)
                    .bind(entry.mood)
                    .bind(&note)
                    .bind(now)
                    .execute(&mut *conn)
                    .await?;

                    if result.rows_affected() == 0 {
                        return Err(DbError::not_found("JournalEntry", id));
                    }

                    let updated = sqlx::query_as::<_, JournalEntry>(SELECT_BY_ID)
                        .bind(&id)
                        .fetch_one(&mut *conn)
                        .await?;

                    debug!(id = %updated.id, "Journal entry updated");
                    Ok::<_, DbError>(updated)
                })
            })
            .await
    }

    async fn entry(&self, id: &str) -> DbResult<Option<JournalEntry>> {
        let id = id.to_string();
        self.db
            .read(move |conn| {
                Box::pin(async move {
                    let entry = sqlx::query_as::<_, JournalEntry>(SELECT_BY_ID)
                        .bind(&id)
                        .fetch_optional(&mut *conn)
                        .await?;
                    Ok::<_, DbError>(entry)
                })
            })
            .await
    }

    async fn entries_between(&self, range: DateRange) -> DbResult<Vec<JournalEntry>> {
        self.db
            .read(move |conn| {
                Box::pin(async move {
                    let entries = sqlx::query_as::<_, JournalEntry>(SELECT_BETWEEN)
                        .bind(range.start)
                        .bind(range.end)
                        .fetch_all(&mut *conn)
                        .await?;
                    Ok::<_, DbError>(entries)
                })
            })
            .await
    }

    async fn delete_entry(&self, id: &str) -> DbResult<()> {
        let id = id.to_string();
        self.db
            .write(move |conn| {
                Box::pin(async move {
                    let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?1")
                        .bind(&id)
                        .execute(&mut *conn)
                        .await?;

                    if result.rows_affected() == 0 {
                        return Err(DbError::not_found("JournalEntry", id));
                    }
                    info!(id = %id, "Journal entry deleted");
                    Ok::<_, DbError>(())
                })
            })
            .await
    }

    async fn count(&self) -> DbResult<i64> {
        self.db
            .read(|conn| {
                Box::pin(async move {
                    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM journal_entries")
                        .fetch_one(&mut *conn)
                        .await?;
                    Ok::<_, DbError>(count)
                })
            })
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::DbConfig;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    async fn repo() -> SqliteJournalRepository {
        let db = Arc::new(DatabaseManager::new(DbConfig::in_memory()));
        db.setup_database().await.unwrap();
        SqliteJournalRepository::new(db)
    }

    #[tokio::test]
    async fn test_add_and_fetch() {
        let repo = repo().await;

        let added = repo
            .add_entry(NewJournalEntry::new(day(14), 4).with_note("slept well"))
            .await
            .unwrap();
        let fetched = repo.entry(&added.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, added.id);
        assert_eq!(fetched.day, day(14));
        assert_eq!(fetched.note.as_deref(), Some("slept well"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_mood() {
        let repo = repo().await;

        let err = repo
            .add_entry(NewJournalEntry::new(day(14), 9))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = repo().await;
        let added = repo.add_entry(NewJournalEntry::new(day(1), 2)).await.unwrap();

        let updated = repo
            .update_entry(&added.id, NewJournalEntry::new(day(2), 5).with_note("better"))
            .await
            .unwrap();

        assert_eq!(updated.created_at, added.created_at);
        assert_eq!(updated.mood, 5);
        assert_eq!(updated.day, day(2));
        assert!(updated.updated_at >= added.updated_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = repo().await;

        let err = repo
            .update_entry("missing", NewJournalEntry::new(day(1), 3))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.delete_entry("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_entries_between_is_inclusive_and_ordered() {
        let repo = repo().await;
        for d in [10, 3, 7, 1, 14] {
            repo.add_entry(NewJournalEntry::new(day(d), 3)).await.unwrap();
        }

        let entries = repo
            .entries_between(DateRange {
                start: day(3),
                end: day(10),
            })
            .await
            .unwrap();

        let days: Vec<_> = entries.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![day(3), day(7), day(10)]);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let repo = repo().await;
        let added = repo.add_entry(NewJournalEntry::new(day(5), 3)).await.unwrap();

        repo.delete_entry(&added.id).await.unwrap();

        assert!(repo.entry(&added.id).await.unwrap().is_none());
    }
}
