use std::collections::BTreeMap;
use std::sync::Arc;

use lingua_core::Clock;
use lingua_core::model::{Catalog, LessonId};
use storage::repository::{ProgressRecord, ProgressRepository};

use crate::error::ProgressError;

//
// ─── OVERVIEW ──────────────────────────────────────────────────────────────────
//

/// Aggregated completion numbers for the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOverview {
    pub total_lessons: usize,
    pub completed: usize,
}

impl ProgressOverview {
    /// Completion percentage, rounded down; 0 for an empty catalog.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total_lessons == 0 {
            return 0;
        }
        u32::try_from(self.completed * 100 / self.total_lessons).unwrap_or(100)
    }
}

/// An unlocked milestone, derived from the ledger alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Read-side of the progress ledger: overview, history, achievements, and a
/// JSON snapshot compatible in shape with the original browser-storage format
/// (`{"<lessonId>": true, ...}`).
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, progress }
    }

    /// Completion counts against the given catalog.
    ///
    /// Ledger entries for lessons no longer in the catalog are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the ledger cannot be read.
    pub async fn overview(&self, catalog: &Catalog) -> Result<ProgressOverview, ProgressError> {
        let ledger = self.progress.get_all().await?;
        let completed = catalog
            .summaries()
            .iter()
            .filter(|s| ledger.get(&s.id()).copied().unwrap_or(false))
            .count();

        Ok(ProgressOverview {
            total_lessons: catalog.len(),
            completed,
        })
    }

    /// Completed lessons, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the ledger cannot be read.
    pub async fn history(&self) -> Result<Vec<ProgressRecord>, ProgressError> {
        let records = self.progress.list_records().await?;
        Ok(records.into_iter().filter(|r| r.completed).collect())
    }

    /// Milestones unlocked by the given overview.
    #[must_use]
    pub fn achievements(overview: &ProgressOverview) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        if overview.completed >= 1 {
            unlocked.push(Achievement {
                title: "First Steps",
                description: "Complete your first lesson",
            });
        }
        if overview.total_lessons > 0 && overview.completed * 2 >= overview.total_lessons {
            unlocked.push(Achievement {
                title: "Halfway There",
                description: "Complete half of the course",
            });
        }
        if overview.total_lessons > 0 && overview.completed == overview.total_lessons {
            unlocked.push(Achievement {
                title: "Course Complete",
                description: "Complete every lesson in the course",
            });
        }
        unlocked
    }

    /// Serialize the ledger to its JSON snapshot form.
    ///
    /// Keys are decimal lesson ids, sorted for stable output.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` on ledger or serialization failures.
    pub async fn export_snapshot(&self) -> Result<String, ProgressError> {
        let ledger = self.progress.get_all().await?;
        let map: BTreeMap<String, bool> = ledger
            .into_iter()
            .map(|(id, completed)| (id.to_string(), completed))
            .collect();
        Ok(serde_json::to_string(&map)?)
    }

    /// Replay a JSON snapshot into the ledger.
    ///
    /// Keys that do not parse as lesson ids are skipped rather than
    /// rejected, matching the original store's tolerance for stale entries.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Snapshot` for malformed JSON and `Storage`
    /// for write failures.
    pub async fn import_snapshot(&self, json: &str) -> Result<(), ProgressError> {
        let map: BTreeMap<String, bool> = serde_json::from_str(json)?;
        let now = self.clock.now();
        for (key, completed) in map {
            let Ok(id) = key.parse::<LessonId>() else {
                continue;
            };
            self.progress.set(id, completed, now).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    use crate::catalog_service::builtin_catalog;

    fn service(repo: &InMemoryRepository) -> ProgressService {
        ProgressService::new(fixed_clock(), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn overview_counts_completed_catalog_lessons() {
        let repo = InMemoryRepository::new();
        let catalog = builtin_catalog();

        ProgressRepository::set(&repo, LessonId::new(1), true, fixed_now())
            .await
            .unwrap();
        ProgressRepository::set(&repo, LessonId::new(2), true, fixed_now())
            .await
            .unwrap();
        // stale ledger entry for a lesson that left the catalog
        ProgressRepository::set(&repo, LessonId::new(999), true, fixed_now())
            .await
            .unwrap();

        let overview = service(&repo).overview(&catalog).await.unwrap();
        assert_eq!(overview.total_lessons, 12);
        assert_eq!(overview.completed, 2);
        assert_eq!(overview.percent(), 16);
    }

    #[tokio::test]
    async fn history_skips_uncompleted_entries() {
        let repo = InMemoryRepository::new();
        ProgressRepository::set(&repo, LessonId::new(1), true, fixed_now())
            .await
            .unwrap();
        ProgressRepository::set(&repo, LessonId::new(2), false, fixed_now())
            .await
            .unwrap();

        let history = service(&repo).history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].lesson_id, LessonId::new(1));
    }

    #[test]
    fn achievements_unlock_by_count() {
        let none = ProgressOverview {
            total_lessons: 12,
            completed: 0,
        };
        assert!(ProgressService::achievements(&none).is_empty());

        let first = ProgressOverview {
            total_lessons: 12,
            completed: 1,
        };
        let unlocked = ProgressService::achievements(&first);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].title, "First Steps");

        let all = ProgressOverview {
            total_lessons: 12,
            completed: 12,
        };
        let unlocked = ProgressService::achievements(&all);
        assert_eq!(unlocked.len(), 3);
    }

    #[tokio::test]
    async fn snapshot_round_trips_through_json() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        service
            .import_snapshot(r#"{"1":true,"2":false,"junk":true}"#)
            .await
            .unwrap();

        assert!(repo.get(LessonId::new(1)).await.unwrap());
        assert!(!repo.get(LessonId::new(2)).await.unwrap());

        let exported = service.export_snapshot().await.unwrap();
        assert_eq!(exported, r#"{"1":true,"2":false}"#);
    }

    #[tokio::test]
    async fn malformed_snapshot_is_rejected() {
        let repo = InMemoryRepository::new();
        let err = service(&repo).import_snapshot("not json").await.unwrap_err();
        assert!(matches!(err, ProgressError::Snapshot(_)));
    }
}
