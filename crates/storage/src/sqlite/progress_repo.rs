use std::collections::HashMap;

use chrono::{DateTime, Utc};
use lingua_core::model::LessonId;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{lesson_id_to_i64, map_progress_row, ser};
use crate::repository::{ProgressRecord, ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_all(&self) -> Result<HashMap<LessonId, bool>, StorageError> {
        let rows = sqlx::query("SELECT lesson_id, completed, completed_at FROM lesson_progress")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut map = HashMap::with_capacity(rows.len());
        for row in rows {
            let record = map_progress_row(&row)?;
            map.insert(record.lesson_id, record.completed);
        }
        Ok(map)
    }

    async fn get(&self, id: LessonId) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT completed FROM lesson_progress WHERE lesson_id = ?1")
            .bind(lesson_id_to_i64(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => {
                let completed: i64 = row.try_get("completed").map_err(ser)?;
                Ok(completed != 0)
            }
            None => Ok(false),
        }
    }

    async fn set(
        &self,
        id: LessonId,
        completed: bool,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO lesson_progress (lesson_id, completed, completed_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(lesson_id) DO UPDATE SET
                completed = excluded.completed,
                completed_at = excluded.completed_at
            ",
        )
        .bind(lesson_id_to_i64(id)?)
        .bind(i64::from(completed))
        .bind(completed.then_some(at))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<ProgressRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT lesson_id, completed, completed_at
            FROM lesson_progress
            ORDER BY completed_at DESC, lesson_id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(map_progress_row(&row)?);
        }
        Ok(records)
    }
}
