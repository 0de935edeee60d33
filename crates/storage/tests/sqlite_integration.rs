use chrono::Duration;
use lingua_core::model::LessonId;
use lingua_core::time::fixed_now;
use storage::repository::{BookmarkRepository, ProgressRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_progress_and_bookmarks() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let id = LessonId::new(2);
    ProgressRepository::set(&repo, id, true, fixed_now())
        .await
        .expect("record completion");
    BookmarkRepository::set(&repo, id, true)
        .await
        .expect("bookmark");

    assert!(repo.get(id).await.expect("get"));
    let ledger = ProgressRepository::get_all(&repo).await.expect("ledger");
    assert_eq!(ledger.get(&id), Some(&true));
    assert!(
        BookmarkRepository::get_all(&repo)
            .await
            .expect("bookmarks")
            .contains(&id)
    );
}

#[tokio::test]
async fn records_order_by_completion_time() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_ordering?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let earlier = fixed_now();
    let later = earlier + Duration::minutes(30);
    ProgressRepository::set(&repo, LessonId::new(1), true, earlier)
        .await
        .expect("first");
    ProgressRepository::set(&repo, LessonId::new(7), true, later)
        .await
        .expect("second");

    let records = repo.list_records().await.expect("list");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].lesson_id, LessonId::new(7));
    assert_eq!(records[0].completed_at, Some(later));
    assert_eq!(records[1].lesson_id, LessonId::new(1));
}

#[tokio::test]
async fn storage_aggregate_shares_one_database() {
    let storage = Storage::sqlite("sqlite:file:memdb_aggregate?mode=memory&cache=shared")
        .await
        .expect("connect");

    let id = LessonId::new(4);
    storage
        .progress
        .set(id, true, fixed_now())
        .await
        .expect("record");
    storage.bookmarks.set(id, true).await.expect("bookmark");

    assert!(storage.progress.get(id).await.expect("get"));
    assert!(
        storage
            .bookmarks
            .get_all()
            .await
            .expect("bookmarks")
            .contains(&id)
    );

    // unbookmarking leaves the ledger untouched
    storage.bookmarks.set(id, false).await.expect("remove");
    assert!(storage.progress.get(id).await.expect("still recorded"));
    assert!(
        storage
            .bookmarks
            .get_all()
            .await
            .expect("bookmarks")
            .is_empty()
    );
}
