use std::sync::Arc;

use lingua_core::Clock;
use lingua_core::model::{Catalog, LessonId};
use storage::repository::ProgressRepository;

use crate::error::WorkflowError;
use crate::session_service::{AnswerEvaluated, LessonCompleted, LessonSession};

/// Orchestrates lesson sessions and the exactly-once ledger write on completion.
///
/// The session itself stays pure; this service is the seam between it and the
/// progress ledger collaborator. Operations against one session are
/// caller-serialized through `&mut LessonSession`; separate sessions are
/// fully independent.
#[derive(Clone)]
pub struct LessonWorkflow {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
}

impl LessonWorkflow {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, progress }
    }

    /// Open a session for the given lesson.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownLesson` if the catalog carries no step
    /// content for the id, and propagates `SessionError::EmptyLesson`.
    pub fn start(
        &self,
        catalog: &Catalog,
        lesson_id: LessonId,
    ) -> Result<LessonSession, WorkflowError> {
        let detail = catalog
            .detail(lesson_id)
            .ok_or(WorkflowError::UnknownLesson(lesson_id))?;
        let session = LessonSession::new(detail, self.clock.now())?;
        Ok(session)
    }

    /// Evaluate a candidate answer for the session's current step.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` for closed sessions and answerless steps.
    pub fn submit_answer(
        &self,
        session: &mut LessonSession,
        candidate: &str,
    ) -> Result<AnswerEvaluated, WorkflowError> {
        Ok(session.submit_answer(candidate)?)
    }

    /// Advance the session, persisting completion to the ledger exactly once.
    ///
    /// When the final step completes, the ledger is written before the event
    /// is returned. A failed write leaves the session completed but
    /// unrecorded so `record_completion` can retry.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` for rejected transitions and
    /// `StorageError` for ledger failures.
    pub async fn advance(
        &self,
        session: &mut LessonSession,
    ) -> Result<Option<LessonCompleted>, WorkflowError> {
        let completed = session.advance(self.clock.now())?;

        if completed.is_some() {
            self.record_completion(session).await?;
        }

        Ok(completed)
    }

    /// Move the session back one step.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError::AtBoundary` and `SessionError::SessionClosed`.
    pub fn retreat(&self, session: &mut LessonSession) -> Result<(), WorkflowError> {
        Ok(session.retreat()?)
    }

    /// Write the completion flag for a completed session, if not yet recorded.
    ///
    /// Safe to call again after a transient storage failure.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` for a session that has not
    /// completed, and `StorageError` if the ledger write fails.
    pub async fn record_completion(
        &self,
        session: &mut LessonSession,
    ) -> Result<(), WorkflowError> {
        if session.completion_recorded() {
            return Ok(());
        }
        let Some(completed_at) = session.completed_at() else {
            return Err(crate::error::SessionError::InvalidTransition.into());
        };

        self.progress
            .set(session.lesson_id(), true, completed_at)
            .await?;
        session.set_completion_recorded();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    use crate::catalog_service::builtin_catalog;

    fn workflow(repo: &InMemoryRepository) -> LessonWorkflow {
        LessonWorkflow::new(fixed_clock(), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn unknown_lesson_is_rejected() {
        let repo = InMemoryRepository::new();
        let workflow = workflow(&repo);
        let catalog = builtin_catalog();

        let err = workflow.start(&catalog, LessonId::new(999)).unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownLesson(_)));
    }

    #[tokio::test]
    async fn completing_a_lesson_writes_the_ledger_once() {
        let repo = InMemoryRepository::new();
        let workflow = workflow(&repo);
        let catalog = builtin_catalog();
        let lesson_id = LessonId::new(2);

        let mut session = workflow.start(&catalog, lesson_id).unwrap();
        let mut events = Vec::new();

        while !session.is_complete() {
            if session.current_step().requires_answer() {
                // the shipped lesson 2 quiz expects "sieben"
                workflow.submit_answer(&mut session, "sieben").unwrap();
            }
            if let Some(event) = workflow.advance(&mut session).await.unwrap() {
                events.push(event);
            }
        }

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].lesson_id, lesson_id);
        assert!(session.completion_recorded());
        assert!(repo.get(lesson_id).await.unwrap());

        let records = repo.list_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].completed_at, Some(fixed_now()));
    }

    #[tokio::test]
    async fn record_completion_is_idempotent() {
        let repo = InMemoryRepository::new();
        let workflow = workflow(&repo);
        let catalog = builtin_catalog();

        let mut session = workflow.start(&catalog, LessonId::new(2)).unwrap();
        while !session.is_complete() {
            if session.current_step().requires_answer() {
                workflow.submit_answer(&mut session, "sieben").unwrap();
            }
            workflow.advance(&mut session).await.unwrap();
        }

        workflow.record_completion(&mut session).await.unwrap();
        workflow.record_completion(&mut session).await.unwrap();
        assert_eq!(repo.list_records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn record_completion_requires_a_completed_session() {
        let repo = InMemoryRepository::new();
        let workflow = workflow(&repo);
        let catalog = builtin_catalog();

        let mut session = workflow.start(&catalog, LessonId::new(1)).unwrap();
        let err = workflow.record_completion(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Session(crate::error::SessionError::InvalidTransition)
        ));
        assert!(!repo.get(LessonId::new(1)).await.unwrap());
    }
}
