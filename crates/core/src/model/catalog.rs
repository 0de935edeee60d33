use std::collections::HashMap;
use thiserror::Error;

use crate::model::{LessonDetail, LessonId, LessonSummary};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate lesson id in catalog: {id}")]
    DuplicateLesson { id: LessonId },

    #[error("lesson detail {id} has no matching summary")]
    OrphanDetail { id: LessonId },
}

/// The full set of available lessons, loaded once and read-only at runtime.
///
/// Summaries keep their load order, which is the tie-break order for every
/// discovery sort. Details exist only for lessons with authored step content.
#[derive(Debug, Clone)]
pub struct Catalog {
    summaries: Vec<LessonSummary>,
    details: HashMap<LessonId, LessonDetail>,
}

impl Catalog {
    /// Assemble a catalog from summaries and step-level details.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateLesson` for repeated summary ids and
    /// `CatalogError::OrphanDetail` for a detail without a summary entry.
    pub fn new(
        summaries: Vec<LessonSummary>,
        details: Vec<LessonDetail>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashMap::with_capacity(summaries.len());
        for summary in &summaries {
            if seen.insert(summary.id(), ()).is_some() {
                return Err(CatalogError::DuplicateLesson { id: summary.id() });
            }
        }

        let mut by_id = HashMap::with_capacity(details.len());
        for detail in details {
            if !seen.contains_key(&detail.id()) {
                return Err(CatalogError::OrphanDetail { id: detail.id() });
            }
            by_id.insert(detail.id(), detail);
        }

        Ok(Self {
            summaries,
            details: by_id,
        })
    }

    #[must_use]
    pub fn summaries(&self) -> &[LessonSummary] {
        &self.summaries
    }

    #[must_use]
    pub fn summary(&self, id: LessonId) -> Option<&LessonSummary> {
        self.summaries.iter().find(|s| s.id() == id)
    }

    #[must_use]
    pub fn detail(&self, id: LessonId) -> Option<&LessonDetail> {
        self.details.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// All distinct tags across the catalog, sorted for stable display.
    #[must_use]
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .summaries
            .iter()
            .flat_map(|s| s.tags().iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Difficulty, Step};

    fn summary(id: u64, tags: &[&str]) -> LessonSummary {
        LessonSummary::new(
            LessonId::new(id),
            format!("Lesson {id}"),
            "desc",
            Difficulty::Easy,
            Category::Beginner,
            15,
            tags.iter().map(|t| (*t).to_string()).collect(),
            50,
        )
        .unwrap()
    }

    fn detail(id: u64) -> LessonDetail {
        LessonDetail::new(
            LessonId::new(id),
            format!("Lesson {id}"),
            "desc",
            Difficulty::Easy,
            vec![Step::learn("Intro", "content").unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_summary_ids() {
        let err = Catalog::new(vec![summary(1, &[]), summary(1, &[])], vec![]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateLesson {
                id: LessonId::new(1)
            }
        );
    }

    #[test]
    fn rejects_detail_without_summary() {
        let err = Catalog::new(vec![summary(1, &[])], vec![detail(2)]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::OrphanDetail {
                id: LessonId::new(2)
            }
        );
    }

    #[test]
    fn looks_up_summary_and_detail() {
        let catalog = Catalog::new(vec![summary(1, &[]), summary(2, &[])], vec![detail(2)]).unwrap();
        assert!(catalog.summary(LessonId::new(1)).is_some());
        assert!(catalog.detail(LessonId::new(1)).is_none());
        assert!(catalog.detail(LessonId::new(2)).is_some());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn all_tags_is_sorted_and_distinct() {
        let catalog = Catalog::new(
            vec![
                summary(1, &["vocabulary", "conversation"]),
                summary(2, &["grammar", "vocabulary"]),
            ],
            vec![],
        )
        .unwrap();
        assert_eq!(
            catalog.all_tags(),
            vec!["conversation", "grammar", "vocabulary"]
        );
    }
}
