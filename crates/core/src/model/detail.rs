use thiserror::Error;

use crate::model::{Difficulty, LessonId, Step};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DetailError {
    #[error("lesson detail needs at least one step")]
    NoSteps,
}

/// Full lesson content: the ordered steps a session walks through.
///
/// Step order is meaningful and defines the progression order. Immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDetail {
    id: LessonId,
    title: String,
    description: String,
    difficulty: Difficulty,
    steps: Vec<Step>,
}

impl LessonDetail {
    /// Create a lesson detail with its ordered step sequence.
    ///
    /// # Errors
    ///
    /// Returns `DetailError::NoSteps` if `steps` is empty.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        steps: Vec<Step>,
    ) -> Result<Self, DetailError> {
        if steps.is_empty() {
            return Err(DetailError::NoSteps);
        }
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            difficulty,
            steps,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}
