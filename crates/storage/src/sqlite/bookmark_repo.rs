use std::collections::HashSet;

use lingua_core::model::LessonId;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{lesson_id_from_i64, lesson_id_to_i64, ser};
use crate::repository::{BookmarkRepository, StorageError};

#[async_trait::async_trait]
impl BookmarkRepository for SqliteRepository {
    async fn get_all(&self) -> Result<HashSet<LessonId>, StorageError> {
        let rows = sqlx::query("SELECT lesson_id FROM bookmarks")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut ids = HashSet::with_capacity(rows.len());
        for row in rows {
            let raw: i64 = row.try_get("lesson_id").map_err(ser)?;
            ids.insert(lesson_id_from_i64(raw)?);
        }
        Ok(ids)
    }

    async fn set(&self, id: LessonId, bookmarked: bool) -> Result<(), StorageError> {
        if bookmarked {
            sqlx::query(
                r"
                INSERT INTO bookmarks (lesson_id)
                VALUES (?1)
                ON CONFLICT(lesson_id) DO NOTHING
                ",
            )
            .bind(lesson_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        } else {
            sqlx::query("DELETE FROM bookmarks WHERE lesson_id = ?1")
                .bind(lesson_id_to_i64(id)?)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;
        }
        Ok(())
    }
}
