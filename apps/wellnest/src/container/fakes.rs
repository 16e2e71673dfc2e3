//! # Test Doubles
//!
//! Deterministic stand-ins used by [`MockContainer`](super::MockContainer)
//! when a capability is not overridden. All of them are public so tests and
//! previews can build, seed, and inspect them directly.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use tracing::debug;
use wellnest_core::{DateRange, JournalEntry, NewJournalEntry};
use wellnest_db::{DatabaseService, DbError, DbResult, DbStatus, JournalRepository};

use crate::capabilities::{Toast, ToastService};

const SEED_MOODS: &[i64] = &[3, 4, 4, 2, 3, 5, 4];

// =============================================================================
// In-Memory Journal
// =============================================================================

#[derive(Debug, Default)]
struct Journal {
    entries: BTreeMap<String, JournalEntry>,
    next_id: u64,
}

impl Journal {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("entry-{:04}", self.next_id)
    }
}

/// Journal kept in a map. Ids are sequential (`entry-0001`, ...), so test
/// assertions can name them.
#[derive(Debug, Default)]
pub struct InMemoryJournalRepository {
    journal: Mutex<Journal>,
}

impl InMemoryJournalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per day for the `days` days ending today.
    pub fn seeded(days: u64) -> Self {
        Self::seeded_ending(Utc::now().date_naive(), days)
    }

    /// One entry per day for the `days` days ending on `today`, oldest first.
    pub fn seeded_ending(today: NaiveDate, days: u64) -> Self {
        let repo = Self::new();
        {
            let mut journal = repo.journal.lock().expect("Journal mutex poisoned");
            for offset in (0..days).rev() {
                let Some(day) = today.checked_sub_days(Days::new(offset)) else {
                    continue;
                };
                let mood = SEED_MOODS[offset as usize % SEED_MOODS.len()];
                let created_at = day.and_time(NaiveTime::MIN).and_utc();
                let id = journal.next_id();
                let entry = NewJournalEntry::new(day, mood).into_entry(id.clone(), created_at);
                journal.entries.insert(id, entry);
            }
        }
        repo
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Journal> {
        self.journal.lock().expect("Journal mutex poisoned")
    }
}

#[async_trait]
impl JournalRepository for InMemoryJournalRepository {
    async fn add_entry(&self, entry: NewJournalEntry) -> DbResult<JournalEntry> {
        entry.validate()?;
        let mut journal = self.lock();
        let id = journal.next_id();
        let entry = entry.into_entry(id.clone(), Utc::now());
        journal.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, id: &str, entry: NewJournalEntry) -> DbResult<JournalEntry> {
        entry.validate()?;
        let mut journal = self.lock();
        let existing = journal
            .entries
            .get_mut(id)
            .ok_or_else(|| DbError::not_found("Journal entry", id))?;

        let updated = entry.into_entry(id.to_string(), Utc::now());
        existing.day = updated.day;
        existing.mood = updated.mood;
        existing.note = updated.note;
        existing.updated_at = updated.updated_at;
        Ok(existing.clone())
    }

    async fn entry(&self, id: &str) -> DbResult<Option<JournalEntry>> {
        Ok(self.lock().entries.get(id).cloned())
    }

    async fn entries_between(&self, range: DateRange) -> DbResult<Vec<JournalEntry>> {
        let mut entries: Vec<JournalEntry> = self
            .lock()
            .entries
            .values()
            .filter(|e| range.contains(e.day))
            .cloned()
            .collect();
        entries.sort_by(|a, b| (a.day, a.created_at).cmp(&(b.day, b.created_at)));
        Ok(entries)
    }

    async fn delete_entry(&self, id: &str) -> DbResult<()> {
        self.lock()
            .entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Journal entry", id))
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.lock().entries.len() as i64)
    }
}

// =============================================================================
// Failing Journal
// =============================================================================

/// Every call fails with `QueryFailed(reason)`.
#[derive(Debug, Clone)]
pub struct FailingJournalRepository {
    reason: String,
}

impl FailingJournalRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        FailingJournalRepository {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> DbResult<T> {
        Err(DbError::QueryFailed(self.reason.clone()))
    }
}

#[async_trait]
impl JournalRepository for FailingJournalRepository {
    async fn add_entry(&self, _entry: NewJournalEntry) -> DbResult<JournalEntry> {
        self.fail()
    }

    async fn update_entry(&self, _id: &str, _entry: NewJournalEntry) -> DbResult<JournalEntry> {
        self.fail()
    }

    async fn entry(&self, _id: &str) -> DbResult<Option<JournalEntry>> {
        self.fail()
    }

    async fn entries_between(&self, _range: DateRange) -> DbResult<Vec<JournalEntry>> {
        self.fail()
    }

    async fn delete_entry(&self, _id: &str) -> DbResult<()> {
        self.fail()
    }

    async fn count(&self) -> DbResult<i64> {
        self.fail()
    }
}

// =============================================================================
// Recording Toasts
// =============================================================================

/// Toast service that remembers every toast it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingToasts {
    shown: Mutex<Vec<Toast>>,
    current: Mutex<Option<Toast>>,
}

impl RecordingToasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every toast shown so far, oldest first.
    pub fn shown(&self) -> Vec<Toast> {
        self.shown.lock().expect("Toast log poisoned").clone()
    }
}

impl ToastService for RecordingToasts {
    fn show(&self, toast: Toast) {
        self.shown.lock().expect("Toast log poisoned").push(toast.clone());
        *self.current.lock().expect("Toast mutex poisoned") = Some(toast);
    }

    fn dismiss(&self) {
        self.current.lock().expect("Toast mutex poisoned").take();
    }

    fn current(&self) -> Option<Toast> {
        self.current.lock().expect("Toast mutex poisoned").clone()
    }
}

// =============================================================================
// Stub Database
// =============================================================================

/// Database lifecycle double. Counts calls; outcomes are scripted.
#[derive(Debug)]
pub struct StubDatabase {
    status: RwLock<DbStatus>,
    fail_with: RwLock<Option<String>>,
    setup_calls: AtomicUsize,
    reset_calls: AtomicUsize,
}

impl StubDatabase {
    /// Starts `NotReady`; the first setup succeeds unless scripted to fail.
    pub fn new() -> Self {
        StubDatabase {
            status: RwLock::new(DbStatus::NotReady),
            fail_with: RwLock::new(None),
            setup_calls: AtomicUsize::new(0),
            reset_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_status(&self, status: DbStatus) {
        *self.status.write().expect("Stub status poisoned") = status;
    }

    /// Makes every following setup and reset fail with `reason`.
    pub fn fail_setup_with(&self, reason: impl Into<String>) {
        *self.fail_with.write().expect("Stub script poisoned") = Some(reason.into());
    }

    pub fn setup_calls(&self) -> usize {
        self.setup_calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }

    fn scripted_failure(&self) -> Option<String> {
        self.fail_with.read().expect("Stub script poisoned").clone()
    }
}

impl Default for StubDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseService for StubDatabase {
    async fn setup_database(&self) -> DbResult<()> {
        self.setup_calls.fetch_add(1, Ordering::SeqCst);
        match self.scripted_failure() {
            Some(reason) => {
                debug!(%reason, "Stub setup failing");
                self.set_status(DbStatus::Failed(reason.clone()));
                Err(DbError::SetupFailed(reason))
            }
            None => {
                self.set_status(DbStatus::Ready);
                Ok(())
            }
        }
    }

    async fn reset_database(&self) -> DbResult<()> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        match self.scripted_failure() {
            Some(reason) => Err(DbError::ResetFailed(reason)),
            None => {
                self.set_status(DbStatus::Ready);
                Ok(())
            }
        }
    }

    fn status(&self) -> DbStatus {
        self.status.read().expect("Stub status poisoned").clone()
    }
}
