use lingua_core::model::LessonId;
use sqlx::Row;

use crate::repository::{ProgressRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn lesson_id_from_i64(v: i64) -> Result<LessonId, StorageError> {
    u64::try_from(v)
        .map(LessonId::new)
        .map_err(|_| StorageError::Serialization("lesson_id sign overflow".into()))
}

pub(crate) fn lesson_id_to_i64(id: LessonId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("lesson_id overflow".into()))
}

pub(crate) fn map_progress_row(row: &sqlx::sqlite::SqliteRow) -> Result<ProgressRecord, StorageError> {
    let lesson_id = lesson_id_from_i64(row.try_get("lesson_id").map_err(ser)?)?;
    let completed: i64 = row.try_get("completed").map_err(ser)?;
    let completed_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("completed_at").map_err(ser)?;

    Ok(ProgressRecord {
        lesson_id,
        completed: completed != 0,
        completed_at,
    })
}
