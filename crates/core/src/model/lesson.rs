use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson duration must be positive")]
    ZeroDuration,

    #[error("popularity must be within 0..=100, got {provided}")]
    PopularityOutOfRange { provided: u32 },

    #[error("lesson tags cannot be empty strings")]
    EmptyTag,
}

/// How demanding a lesson is for the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fixed ordering rank used for difficulty sorting (Easy=1, Medium=2, Hard=3).
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Course level a lesson belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Beginner,
    Intermediate,
    Advanced,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Beginner => "Beginner",
            Category::Intermediate => "Intermediate",
            Category::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for a single lesson.
///
/// Immutable once constructed; the catalog owns these exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSummary {
    id: LessonId,
    title: String,
    description: String,
    difficulty: Difficulty,
    category: Category,
    duration_minutes: u32,
    tags: Vec<String>,
    popularity: u32,
}

impl LessonSummary {
    /// Create a validated lesson summary.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` if the title is blank after trimming,
    /// `LessonError::ZeroDuration` for a zero duration,
    /// `LessonError::PopularityOutOfRange` if popularity exceeds 100, and
    /// `LessonError::EmptyTag` if any tag is blank after trimming.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        category: Category,
        duration_minutes: u32,
        tags: Vec<String>,
        popularity: u32,
    ) -> Result<Self, LessonError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if duration_minutes == 0 {
            return Err(LessonError::ZeroDuration);
        }
        if popularity > 100 {
            return Err(LessonError::PopularityOutOfRange {
                provided: popularity,
            });
        }
        if tags.iter().any(|t| t.trim().is_empty()) {
            return Err(LessonError::EmptyTag);
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            difficulty,
            category,
            duration_minutes,
            tags,
            popularity,
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
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn popularity(&self) -> u32 {
        self.popularity
    }

    /// Whether the lesson carries the given tag (exact match).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_summary(popularity: u32) -> Result<LessonSummary, LessonError> {
        LessonSummary::new(
            LessonId::new(1),
            "Basic Greetings",
            "Learn how to greet people in German.",
            Difficulty::Easy,
            Category::Beginner,
            15,
            vec!["vocabulary".into(), "conversation".into()],
            popularity,
        )
    }

    #[test]
    fn builds_valid_summary() {
        let summary = build_summary(95).unwrap();
        assert_eq!(summary.title(), "Basic Greetings");
        assert!(summary.has_tag("vocabulary"));
        assert!(!summary.has_tag("grammar"));
    }

    #[test]
    fn rejects_empty_title() {
        let err = LessonSummary::new(
            LessonId::new(1),
            "   ",
            "desc",
            Difficulty::Easy,
            Category::Beginner,
            15,
            vec![],
            50,
        )
        .unwrap_err();
        assert_eq!(err, LessonError::EmptyTitle);
    }

    #[test]
    fn rejects_popularity_above_100() {
        let err = build_summary(101).unwrap_err();
        assert_eq!(err, LessonError::PopularityOutOfRange { provided: 101 });
    }

    #[test]
    fn rejects_zero_duration() {
        let err = LessonSummary::new(
            LessonId::new(1),
            "Title",
            "desc",
            Difficulty::Easy,
            Category::Beginner,
            0,
            vec![],
            50,
        )
        .unwrap_err();
        assert_eq!(err, LessonError::ZeroDuration);
    }

    #[test]
    fn difficulty_rank_is_fixed() {
        assert_eq!(Difficulty::Easy.rank(), 1);
        assert_eq!(Difficulty::Medium.rank(), 2);
        assert_eq!(Difficulty::Hard.rank(), 3);
        assert!(Difficulty::Easy < Difficulty::Hard);
    }
}
