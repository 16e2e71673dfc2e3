//! Container identity, mock overrides, environment scoping and degraded
//! startup.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;
use wellnest_app::capabilities::{Theme, Toast, ToastStyle};
use wellnest_app::container::fakes::{
    FailingJournalRepository, InMemoryJournalRepository, RecordingToasts, StubDatabase,
};
use wellnest_app::{
    AppConfig, AppContainer, ContainerError, Environment, MockContainer, MockOverrides,
    ServiceContainer,
};
use wellnest_core::{DateRange, NewJournalEntry};
use wellnest_db::{DbError, DbStatus};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

async fn assert_identity(container: &dyn ServiceContainer) {
    assert!(Arc::ptr_eq(&container.database(), &container.database()));
    assert!(Arc::ptr_eq(
        &container.journal_repository().await.unwrap(),
        &container.journal_repository().await.unwrap()
    ));
    assert!(Arc::ptr_eq(&container.toasts(), &container.toasts()));
    assert!(Arc::ptr_eq(&container.navigation(), &container.navigation()));
    assert!(Arc::ptr_eq(&container.theme(), &container.theme()));
    assert!(Arc::ptr_eq(&container.tutorials(), &container.tutorials()));
    assert!(Arc::ptr_eq(&container.metrics(), &container.metrics()));
    assert!(Arc::ptr_eq(&container.time_period(), &container.time_period()));
    assert!(Arc::ptr_eq(&container.onboarding(), &container.onboarding()));
}

// =============================================================================
// Identity
// =============================================================================

#[tokio::test]
async fn test_app_container_returns_same_instances() {
    let container = AppContainer::new(AppConfig::in_memory()).unwrap();
    assert_identity(&container).await;
    container.shutdown().await;
}

#[tokio::test]
async fn test_mock_container_returns_same_instances() {
    assert_identity(&MockContainer::default()).await;
}

#[tokio::test]
async fn test_app_container_persists_through_repository() {
    let dir = TempDir::new().unwrap();
    let container = AppContainer::new(AppConfig::in_dir(dir.path())).unwrap();

    let journal = container.journal_repository().await.unwrap();
    journal
        .add_entry(NewJournalEntry::new(today(), 4).with_note("Long walk"))
        .await
        .unwrap();
    container.shutdown().await;

    let reopened = AppContainer::new(AppConfig::in_dir(dir.path())).unwrap();
    let journal = reopened.journal_repository().await.unwrap();
    assert_eq!(journal.count().await.unwrap(), 1);
    reopened.shutdown().await;
}

// =============================================================================
// Mock Overrides
// =============================================================================

#[tokio::test]
async fn test_mock_defaults() {
    let mock = MockContainer::default();

    assert_eq!(mock.database().status(), DbStatus::NotReady);
    let journal = mock.journal_repository().await.unwrap();
    assert_eq!(journal.count().await.unwrap(), 0);
    assert_eq!(mock.database().status(), DbStatus::Ready);

    assert!(mock.toasts().current().is_none());
    assert!(mock.navigation().path().is_empty());
    assert_eq!(mock.theme().theme(), Theme::System);
    assert!(!mock.onboarding().has_completed().unwrap());
    assert_eq!(mock.metrics().all().len(), 5);
    assert!(mock.tutorials().session().current_tutorial().is_none());
}

#[tokio::test]
async fn test_overriding_journal_changes_only_journal() {
    let plain = MockContainer::default();
    let seeded = MockContainer::new(MockOverrides {
        journal: Some(Arc::new(InMemoryJournalRepository::seeded_ending(today(), 5))),
        ..Default::default()
    });

    let journal = seeded.journal_repository().await.unwrap();
    assert_eq!(journal.count().await.unwrap(), 5);
    let week = journal
        .entries_between(DateRange {
            start: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            end: today(),
        })
        .await
        .unwrap();
    assert_eq!(week.len(), 5);

    assert_eq!(plain.journal_repository().await.unwrap().count().await.unwrap(), 0);
    assert_eq!(seeded.theme().theme(), plain.theme().theme());
    assert_eq!(seeded.metrics().all(), plain.metrics().all());
    assert_eq!(seeded.navigation().path(), plain.navigation().path());
}

#[tokio::test]
async fn test_setter_swaps_capability_after_construction() {
    let mock = MockContainer::default();
    let before = mock.journal_repository().await.unwrap();

    mock.set_journal_repository(Arc::new(FailingJournalRepository::new("disk full")));
    let after = mock.journal_repository().await.unwrap();

    assert!(!Arc::ptr_eq(&before, &after));
    assert!(matches!(
        after.count().await,
        Err(DbError::QueryFailed(ref reason)) if reason == "disk full"
    ));

    let toasts = Arc::new(RecordingToasts::new());
    mock.set_toasts(toasts.clone());
    mock.toasts().show(Toast::new("Entry saved", ToastStyle::Success));
    assert_eq!(toasts.shown().len(), 1);
}

#[tokio::test]
async fn test_mock_database_failure_withholds_repository() {
    let stub = Arc::new(StubDatabase::new());
    stub.fail_setup_with("disk is read-only");
    let mock = MockContainer::new(MockOverrides {
        database: Some(stub.clone()),
        ..Default::default()
    });

    let err = mock.journal_repository().await.unwrap_err();
    assert!(matches!(err, ContainerError::DatabaseUnavailable { .. }));
    assert_eq!(
        mock.database().status(),
        DbStatus::Failed("disk is read-only".to_string())
    );

    // No automatic retry once Failed.
    assert!(mock.journal_repository().await.is_err());
    assert_eq!(stub.setup_calls(), 1);

    stub.set_status(DbStatus::Ready);
    assert!(mock.journal_repository().await.is_ok());
}

// =============================================================================
// Environment
// =============================================================================

#[tokio::test]
async fn test_child_override_does_not_leak() {
    let root: Arc<dyn ServiceContainer> = Arc::new(MockContainer::default());
    let env = Environment::new(root.clone());

    let first: Arc<dyn ServiceContainer> = Arc::new(MockContainer::new(MockOverrides {
        journal: Some(Arc::new(InMemoryJournalRepository::seeded_ending(today(), 3))),
        ..Default::default()
    }));
    let second: Arc<dyn ServiceContainer> = Arc::new(MockContainer::default());

    let child_a = env.with_container(first.clone());
    let child_b = env.with_container(second.clone());

    assert!(Arc::ptr_eq(&env.container(), &root));
    assert!(!env.is_overridden());
    assert!(Arc::ptr_eq(&child_a.container(), &first));
    assert!(Arc::ptr_eq(&child_b.container(), &second));

    let count = |env: Environment| async move {
        env.container()
            .journal_repository()
            .await
            .unwrap()
            .count()
            .await
            .unwrap()
    };
    assert_eq!(count(child_a.clone()).await, 3);
    assert_eq!(count(child_b.clone()).await, 0);
    assert_eq!(count(env.clone()).await, 0);

    let back = child_a.without_override();
    assert!(!back.is_overridden());
    assert!(Arc::ptr_eq(&back.container(), &root));
    assert!(Arc::ptr_eq(&child_a.container(), &first));
}

// =============================================================================
// Degraded Startup
// =============================================================================

#[tokio::test]
async fn test_failed_setup_reports_status_and_unavailable() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::in_dir(dir.path());
    // A directory cannot be opened as a SQLite file.
    config.database_path = dir.path().to_path_buf();

    let container = wellnest_app::start(config).await.unwrap();

    assert!(matches!(container.database().status(), DbStatus::Failed(_)));
    let err = container.journal_repository().await.unwrap_err();
    assert!(matches!(err, ContainerError::DatabaseUnavailable { .. }));

    // Services that do not need the database keep working.
    container.theme().set_theme(Theme::Dark).unwrap();
    assert_eq!(container.theme().theme(), Theme::Dark);
}

#[tokio::test]
async fn test_explicit_setup_recovers_repository() {
    let dir = TempDir::new().unwrap();
    let stub = Arc::new(StubDatabase::new());
    stub.set_status(DbStatus::Failed("first launch failed".to_string()));
    let mock = MockContainer::new(MockOverrides {
        database: Some(stub.clone()),
        ..Default::default()
    });
    assert!(mock.journal_repository().await.is_err());

    mock.database().setup_database().await.unwrap();
    assert!(mock.journal_repository().await.is_ok());

    // Real manager: setup after the failing path has been fixed.
    let bad = dir.path().join("blocked");
    std::fs::create_dir(&bad).unwrap();
    let mut config = AppConfig::in_dir(dir.path());
    config.database_path = bad.clone();
    let container = AppContainer::new(config).unwrap();
    assert!(container.journal_repository().await.is_err());
    assert!(matches!(container.database().status(), DbStatus::Failed(_)));

    std::fs::remove_dir(&bad).unwrap();
    container.database().setup_database().await.unwrap();
    assert!(container.journal_repository().await.is_ok());
    container.shutdown().await;
}
