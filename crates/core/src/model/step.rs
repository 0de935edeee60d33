use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepError {
    #[error("step title cannot be empty")]
    EmptyTitle,

    #[error("quiz step needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("quiz correct answer must be one of the offered options")]
    AnswerNotInOptions,

    #[error("text step expected answer cannot be empty")]
    EmptyAnswer,
}

/// Kind of a lesson step, for dispatching UI widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Learn,
    Quiz,
    Text,
}

/// One unit of instructional or assessed content within a lesson.
///
/// `Learn` steps carry no answer; `Quiz` and `Text` steps require a correct
/// answer before the session may advance past them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Learn {
        title: String,
        content: String,
    },
    Quiz {
        title: String,
        content: String,
        options: Vec<String>,
        correct_answer: String,
    },
    Text {
        title: String,
        content: String,
        correct_answer: String,
    },
}

impl Step {
    /// Create an instructional step with no assessment.
    ///
    /// # Errors
    ///
    /// Returns `StepError::EmptyTitle` if the title is blank after trimming.
    pub fn learn(title: impl Into<String>, content: impl Into<String>) -> Result<Self, StepError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(StepError::EmptyTitle);
        }
        Ok(Self::Learn {
            title,
            content: content.into(),
        })
    }

    /// Create a multiple-choice quiz step.
    ///
    /// # Errors
    ///
    /// Returns `StepError::TooFewOptions` if fewer than two options are given,
    /// and `StepError::AnswerNotInOptions` if the correct answer is not among them.
    pub fn quiz(
        title: impl Into<String>,
        content: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, StepError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(StepError::EmptyTitle);
        }
        if options.len() < 2 {
            return Err(StepError::TooFewOptions { len: options.len() });
        }
        let correct_answer = correct_answer.into();
        if !options.iter().any(|o| *o == correct_answer) {
            return Err(StepError::AnswerNotInOptions);
        }
        Ok(Self::Quiz {
            title,
            content: content.into(),
            options,
            correct_answer,
        })
    }

    /// Create a free-text answer step.
    ///
    /// # Errors
    ///
    /// Returns `StepError::EmptyTitle` or `StepError::EmptyAnswer` on blank input.
    pub fn text(
        title: impl Into<String>,
        content: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, StepError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(StepError::EmptyTitle);
        }
        let correct_answer = correct_answer.into();
        if correct_answer.trim().is_empty() {
            return Err(StepError::EmptyAnswer);
        }
        Ok(Self::Text {
            title,
            content: content.into(),
            correct_answer,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Step::Learn { title, .. } | Step::Quiz { title, .. } | Step::Text { title, .. } => title,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Step::Learn { content, .. }
            | Step::Quiz { content, .. }
            | Step::Text { content, .. } => content,
        }
    }

    #[must_use]
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Learn { .. } => StepKind::Learn,
            Step::Quiz { .. } => StepKind::Quiz,
            Step::Text { .. } => StepKind::Text,
        }
    }

    /// Whether this step must be answered correctly before advancing.
    #[must_use]
    pub fn requires_answer(&self) -> bool {
        !matches!(self, Step::Learn { .. })
    }

    /// Quiz options, if this is a quiz step.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Step::Quiz { options, .. } => Some(options),
            _ => None,
        }
    }

    /// Evaluate a candidate answer against this step.
    ///
    /// Returns `None` for `Learn` steps (nothing to check). Quiz answers must
    /// match the correct option exactly; text answers are compared trimmed
    /// and case-insensitively, with no accent or umlaut folding.
    #[must_use]
    pub fn check_answer(&self, candidate: &str) -> Option<bool> {
        match self {
            Step::Learn { .. } => None,
            Step::Quiz { correct_answer, .. } => Some(candidate == correct_answer),
            Step::Text { correct_answer, .. } => Some(
                candidate.trim().to_lowercase() == correct_answer.trim().to_lowercase(),
            ),
        }
    }
}
