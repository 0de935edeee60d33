use chrono::{DateTime, Utc};
use std::fmt;

use lingua_core::model::{LessonDetail, LessonId, Step};

use crate::error::SessionError;

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// Emitted after every answer evaluation, for the notification layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerEvaluated {
    pub is_correct: bool,
}

/// Emitted exactly once, at the moment a session reaches its final step.
///
/// The session performs no persistence and no user-facing notification
/// itself; consumers (progress ledger, toast layer) react to this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCompleted {
    pub lesson_id: LessonId,
    pub title: String,
}

//
// ─── EVALUATION STATE ──────────────────────────────────────────────────────────
//

/// Tri-state outcome of the current step's answer check.
///
/// Resets to `Unanswered` whenever the cursor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Evaluation {
    #[default]
    Unanswered,
    Correct,
    Incorrect,
}

impl Evaluation {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Evaluation::Correct)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's in-progress traversal of a single lesson's steps.
///
/// A linear state machine: the cursor starts at step zero, `advance` moves
/// forward only once any required answer is correct, `retreat` moves back,
/// and completing the final step is terminal. Every rejected operation
/// leaves the session unchanged.
pub struct LessonSession {
    lesson_id: LessonId,
    title: String,
    steps: Vec<Step>,
    step_index: usize,
    current_answer: String,
    evaluation: Evaluation,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    completion_recorded: bool,
}

impl LessonSession {
    /// Open a session over a lesson's step sequence.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyLesson` if the lesson has no steps.
    pub fn new(lesson: &LessonDetail, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        Self::from_steps(
            lesson.id(),
            lesson.title().to_owned(),
            lesson.steps().to_vec(),
            started_at,
        )
    }

    /// Open a session from raw parts; useful when the caller already owns steps.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyLesson` if `steps` is empty.
    pub fn from_steps(
        lesson_id: LessonId,
        title: String,
        steps: Vec<Step>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if steps.is_empty() {
            return Err(SessionError::EmptyLesson);
        }
        Ok(Self {
            lesson_id,
            title,
            steps,
            step_index: 0,
            current_answer: String::new(),
            evaluation: Evaluation::Unanswered,
            started_at,
            completed_at: None,
            completion_recorded: false,
        })
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step_index + 1 == self.steps.len()
    }

    #[must_use]
    pub fn current_step(&self) -> &Step {
        &self.steps[self.step_index]
    }

    #[must_use]
    pub fn current_answer(&self) -> &str {
        &self.current_answer
    }

    #[must_use]
    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Whether the completion event has been handed to the progress ledger.
    #[must_use]
    pub fn completion_recorded(&self) -> bool {
        self.completion_recorded
    }

    /// Mark the completion as persisted. Set once by the workflow.
    pub fn set_completion_recorded(&mut self) {
        self.completion_recorded = true;
    }

    /// Evaluate a candidate answer against the current step.
    ///
    /// Stores the candidate and the tri-state result; the cursor does not
    /// move. Quiz answers must equal the correct option exactly; text answers
    /// are compared trimmed and case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SessionClosed` on a completed session, and
    /// `SessionError::InvalidTransition` if the current step takes no answer.
    pub fn submit_answer(&mut self, candidate: &str) -> Result<AnswerEvaluated, SessionError> {
        if self.is_complete() {
            return Err(SessionError::SessionClosed);
        }

        let Some(is_correct) = self.current_step().check_answer(candidate) else {
            return Err(SessionError::InvalidTransition);
        };

        self.current_answer = candidate.to_owned();
        self.evaluation = if is_correct {
            Evaluation::Correct
        } else {
            Evaluation::Incorrect
        };

        Ok(AnswerEvaluated { is_correct })
    }

    /// Move the cursor forward, or complete the session on the last step.
    ///
    /// A step that requires an answer may only be left once the stored
    /// evaluation is `Correct`; instructional steps advance unconditionally.
    /// Completing the final step returns the one `LessonCompleted` event and
    /// makes the session terminal.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SessionClosed` on a completed session, and
    /// `SessionError::InvalidTransition` when the required answer is missing
    /// or wrong.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Option<LessonCompleted>, SessionError> {
        if self.is_complete() {
            return Err(SessionError::SessionClosed);
        }
        if self.current_step().requires_answer() && !self.evaluation.is_correct() {
            return Err(SessionError::InvalidTransition);
        }

        if self.is_last_step() {
            self.completed_at = Some(now);
            return Ok(Some(LessonCompleted {
                lesson_id: self.lesson_id,
                title: self.title.clone(),
            }));
        }

        self.step_index += 1;
        self.current_answer.clear();
        self.evaluation = Evaluation::Unanswered;
        Ok(None)
    }

    /// Move the cursor back one step, clearing any stored answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SessionClosed` on a completed session, and
    /// `SessionError::AtBoundary` at the first step (non-fatal; callers
    /// should disable the action instead).
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::SessionClosed);
        }
        if self.step_index == 0 {
            return Err(SessionError::AtBoundary);
        }

        self.step_index -= 1;
        self.current_answer.clear();
        self.evaluation = Evaluation::Unanswered;
        Ok(())
    }
}

impl fmt::Debug for LessonSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LessonSession")
            .field("lesson_id", &self.lesson_id)
            .field("steps_len", &self.steps.len())
            .field("step_index", &self.step_index)
            .field("evaluation", &self.evaluation)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
