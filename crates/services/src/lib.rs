#![forbid(unsafe_code)]

pub mod bookmark_service;
pub mod catalog_service;
pub mod error;
pub mod lesson_workflow;
pub mod progress_service;
pub mod session_service;

pub use lingua_core::Clock;

pub use error::{BookmarkError, ProgressError, SessionError, WorkflowError};

pub use bookmark_service::BookmarkService;
pub use catalog_service::builtin_catalog;
pub use lesson_workflow::LessonWorkflow;
pub use progress_service::{Achievement, ProgressOverview, ProgressService};
pub use session_service::{AnswerEvaluated, Evaluation, LessonCompleted, LessonSession};
