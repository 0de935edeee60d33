use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use lingua_core::model::LessonId;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub lesson_id: LessonId,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// The progress ledger: a boolean-per-lesson persistent map.
///
/// The progression workflow writes `set(id, true, at)` exactly once when a
/// session completes; everything else is read-only consumption.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// The full lesson-id → completed mapping.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the ledger cannot be read.
    async fn get_all(&self) -> Result<HashMap<LessonId, bool>, StorageError>;

    /// Completion flag for one lesson; absent entries read as `false`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the ledger cannot be read.
    async fn get(&self, id: LessonId) -> Result<bool, StorageError>;

    /// Record a completion flag with the time it was set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn set(
        &self,
        id: LessonId,
        completed: bool,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// All ledger entries, most recently completed first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the ledger cannot be read.
    async fn list_records(&self) -> Result<Vec<ProgressRecord>, StorageError>;
}

/// Persistent bookmark membership, keyed by lesson id.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// The set of currently bookmarked lesson ids.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_all(&self) -> Result<HashSet<LessonId>, StorageError>;

    /// Add or remove a bookmark.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn set(&self, id: LessonId, bookmarked: bool) -> Result<(), StorageError>;
}

/// Simple in-memory implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<LessonId, ProgressRecord>>>,
    bookmarks: Arc<Mutex<HashSet<LessonId>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_all(&self) -> Result<HashMap<LessonId, bool>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .map(|(id, record)| (*id, record.completed))
            .collect())
    }

    async fn get(&self, id: LessonId) -> Result<bool, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).is_some_and(|r| r.completed))
    }

    async fn set(
        &self,
        id: LessonId,
        completed: bool,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            id,
            ProgressRecord {
                lesson_id: id,
                completed,
                completed_at: completed.then_some(at),
            },
        );
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut records: Vec<ProgressRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then(a.lesson_id.cmp(&b.lesson_id))
        });
        Ok(records)
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryRepository {
    async fn get_all(&self) -> Result<HashSet<LessonId>, StorageError> {
        let guard = self
            .bookmarks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn set(&self, id: LessonId, bookmarked: bool) -> Result<(), StorageError> {
        let mut guard = self
            .bookmarks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if bookmarked {
            guard.insert(id);
        } else {
            guard.remove(&id);
        }
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let bookmarks: Arc<dyn BookmarkRepository> = Arc::new(repo);
        Self {
            progress,
            bookmarks,
        }
    }
}
