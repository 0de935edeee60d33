use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{BookmarkRepository, ProgressRepository, Storage};

mod bookmark_repo;
mod mapping;
mod migrate;
mod progress_repo;

/// SQLite-backed implementation of the progress and bookmark repositories.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the connection cannot be established or if
    /// enforcing foreign key constraints fails during setup.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA foreign_keys = ON;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA journal_mode = WAL;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Build a `Storage` backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let bookmarks: Arc<dyn BookmarkRepository> = Arc::new(repo);
        Ok(Self {
            progress,
            bookmarks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::model::LessonId;
    use lingua_core::time::fixed_now;

    async fn repo() -> SqliteRepository {
        let repo = SqliteRepository::connect("sqlite::memory:").await.unwrap();
        repo.migrate().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let repo = repo().await;
        repo.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn progress_round_trips() {
        let repo = repo().await;
        let id = LessonId::new(1);

        assert!(!repo.get(id).await.unwrap());
        ProgressRepository::set(&repo, id, true, fixed_now())
            .await
            .unwrap();
        assert!(repo.get(id).await.unwrap());

        let all = ProgressRepository::get_all(&repo).await.unwrap();
        assert_eq!(all.get(&id), Some(&true));

        let records = repo.list_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].completed_at, Some(fixed_now()));
    }

    #[tokio::test]
    async fn overwriting_progress_keeps_one_row() {
        let repo = repo().await;
        let id = LessonId::new(3);

        ProgressRepository::set(&repo, id, true, fixed_now())
            .await
            .unwrap();
        ProgressRepository::set(&repo, id, false, fixed_now())
            .await
            .unwrap();

        assert!(!repo.get(id).await.unwrap());
        assert_eq!(ProgressRepository::get_all(&repo).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bookmarks_round_trip() {
        let repo = repo().await;
        let id = LessonId::new(4);

        BookmarkRepository::set(&repo, id, true).await.unwrap();
        assert!(
            BookmarkRepository::get_all(&repo)
                .await
                .unwrap()
                .contains(&id)
        );

        BookmarkRepository::set(&repo, id, false).await.unwrap();
        assert!(BookmarkRepository::get_all(&repo).await.unwrap().is_empty());
    }
}
