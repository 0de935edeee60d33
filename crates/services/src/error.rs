//! Shared error types for the services crate.

use thiserror::Error;

use lingua_core::model::LessonId;
use storage::repository::StorageError;

/// Errors emitted by `LessonSession`.
///
/// All are caller-input errors, recoverable by disabling the offending UI
/// action; a rejected operation never mutates session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("lesson has no steps")]
    EmptyLesson,
    #[error("operation is not valid for the current step state")]
    InvalidTransition,
    #[error("session is already completed")]
    SessionClosed,
    #[error("already at the first step")]
    AtBoundary,
}

/// Errors emitted by `LessonWorkflow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error("no lesson content for id {0}")]
    UnknownLesson(LessonId),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid progress snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Errors emitted by `BookmarkService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BookmarkError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
