use std::collections::HashSet;

use crate::model::LessonId;

/// Lessons the user has marked for quick access.
///
/// Held in memory for the session; the surrounding app decides whether to
/// persist it through a bookmark repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    ids: HashSet<LessonId>,
}

impl BookmarkSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the bookmark state for a lesson, returning the new state.
    pub fn toggle(&mut self, id: LessonId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: LessonId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LessonId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<LessonId> for BookmarkSet {
    fn from_iter<I: IntoIterator<Item = LessonId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
