use std::sync::Arc;

use lingua_core::model::{BookmarkSet, LessonId};
use storage::repository::BookmarkRepository;

use crate::error::BookmarkError;

/// Lessons bookmarked out of the box for a fresh profile.
const DEFAULT_BOOKMARKS: [u64; 2] = [1, 4];

/// Keeps the in-memory `BookmarkSet` and its persistent store in step.
///
/// The discovery engine only ever consumes the in-memory set; this service
/// loads it at startup and mirrors every toggle back to the repository.
#[derive(Clone)]
pub struct BookmarkService {
    bookmarks: Arc<dyn BookmarkRepository>,
}

impl BookmarkService {
    #[must_use]
    pub fn new(bookmarks: Arc<dyn BookmarkRepository>) -> Self {
        Self { bookmarks }
    }

    /// Load the persisted bookmark set, seeding the defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError` if the store cannot be read or seeded.
    pub async fn load(&self) -> Result<BookmarkSet, BookmarkError> {
        let stored = self.bookmarks.get_all().await?;
        if !stored.is_empty() {
            return Ok(stored.into_iter().collect());
        }

        for id in DEFAULT_BOOKMARKS {
            self.bookmarks.set(LessonId::new(id), true).await?;
        }
        Ok(DEFAULT_BOOKMARKS.into_iter().map(LessonId::new).collect())
    }

    /// Flip a bookmark in memory and persist the new state.
    ///
    /// Returns whether the lesson is bookmarked after the toggle.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError` if the write fails; the in-memory set is
    /// rolled back so both sides stay consistent.
    pub async fn toggle(
        &self,
        set: &mut BookmarkSet,
        id: LessonId,
    ) -> Result<bool, BookmarkError> {
        let now_bookmarked = set.toggle(id);
        if let Err(err) = self.bookmarks.set(id, now_bookmarked).await {
            set.toggle(id);
            return Err(err.into());
        }
        Ok(now_bookmarked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn first_load_seeds_defaults() {
        let repo = InMemoryRepository::new();
        let service = BookmarkService::new(Arc::new(repo.clone()));

        let set = service.load().await.unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(LessonId::new(1)));
        assert!(set.contains(LessonId::new(4)));

        // the seed is persisted, not just in memory
        let stored = BookmarkRepository::get_all(&repo).await.unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn load_prefers_persisted_state_over_defaults() {
        let repo = InMemoryRepository::new();
        BookmarkRepository::set(&repo, LessonId::new(7), true)
            .await
            .unwrap();
        let service = BookmarkService::new(Arc::new(repo));

        let set = service.load().await.unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(LessonId::new(7)));
        assert!(!set.contains(LessonId::new(1)));
    }

    #[tokio::test]
    async fn toggle_persists_both_directions() {
        let repo = InMemoryRepository::new();
        let service = BookmarkService::new(Arc::new(repo.clone()));
        let mut set = service.load().await.unwrap();
        let id = LessonId::new(2);

        assert!(service.toggle(&mut set, id).await.unwrap());
        assert!(
            BookmarkRepository::get_all(&repo)
                .await
                .unwrap()
                .contains(&id)
        );

        assert!(!service.toggle(&mut set, id).await.unwrap());
        assert!(
            !BookmarkRepository::get_all(&repo)
                .await
                .unwrap()
                .contains(&id)
        );
    }
}
