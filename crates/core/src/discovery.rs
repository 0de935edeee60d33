//! Lesson discovery: the filter → sort → paginate pipeline over the catalog.
//!
//! Every function here is pure and deterministic; identical inputs always
//! produce the identical page, including order. Out-of-range pages are a
//! normal boundary and yield an empty slice, never an error.

use crate::model::{BookmarkSet, Category, LessonSummary};

//
// ─── QUERY ─────────────────────────────────────────────────────────────────────
//

/// Sort order applied to the filtered lesson set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most popular first.
    #[default]
    Popularity,
    /// Alphabetical by title (case-insensitive).
    Title,
    /// Shortest first.
    Duration,
    /// Easiest first (Easy < Medium < Hard).
    Difficulty,
}

/// Ephemeral UI state describing one discovery request. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryQuery {
    /// Case-insensitive substring matched against title or description.
    pub search_text: String,
    /// `None` means all categories.
    pub category: Option<Category>,
    /// AND semantics: a lesson must carry every listed tag. Empty = no restriction.
    pub required_tags: Vec<String>,
    pub bookmarked_only: bool,
    pub sort_key: SortKey,
    /// 1-indexed. Pages beyond the available range return empty items.
    pub page: usize,
    /// Fixed per session; the engine treats zero as one.
    pub page_size: usize,
}

impl Default for DiscoveryQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: None,
            required_tags: Vec::new(),
            bookmarked_only: false,
            sort_key: SortKey::default(),
            page: 1,
            page_size: 6,
        }
    }
}

//
// ─── VIEW ──────────────────────────────────────────────────────────────────────
//

/// The visible page of lessons plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryView<'a> {
    pub page_items: Vec<&'a LessonSummary>,
    pub total_matched: usize,
    pub total_pages: usize,
}

impl DiscoveryView<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page_items.is_empty()
    }
}

//
// ─── PIPELINE ──────────────────────────────────────────────────────────────────
//

fn matches(lesson: &LessonSummary, query: &DiscoveryQuery, bookmarks: &BookmarkSet) -> bool {
    if let Some(category) = query.category {
        if lesson.category() != category {
            return false;
        }
    }

    if !query.search_text.is_empty() {
        let needle = query.search_text.to_lowercase();
        let in_title = lesson.title().to_lowercase().contains(&needle);
        let in_description = lesson.description().to_lowercase().contains(&needle);
        if !in_title && !in_description {
            return false;
        }
    }

    if !query.required_tags.iter().all(|tag| lesson.has_tag(tag)) {
        return false;
    }

    if query.bookmarked_only && !bookmarks.contains(lesson.id()) {
        return false;
    }

    true
}

fn sort(filtered: &mut [&LessonSummary], key: SortKey) {
    // sort_by is stable, so ties keep catalog order for every key.
    match key {
        SortKey::Popularity => filtered.sort_by(|a, b| b.popularity().cmp(&a.popularity())),
        SortKey::Title => {
            filtered.sort_by(|a, b| a.title().to_lowercase().cmp(&b.title().to_lowercase()));
        }
        SortKey::Duration => {
            filtered.sort_by(|a, b| a.duration_minutes().cmp(&b.duration_minutes()));
        }
        SortKey::Difficulty => {
            filtered.sort_by(|a, b| a.difficulty().rank().cmp(&b.difficulty().rank()));
        }
    }
}

/// Compute the visible page of lessons for a query.
///
/// Applies the fixed pipeline: filter (category AND search AND tags AND
/// bookmarks), stable sort by `sort_key`, then slice out the requested page.
/// `total_pages` is zero when nothing matched. The caller is responsible for
/// clamping `page`; a page past the end simply produces no items.
#[must_use]
pub fn compute_view<'a>(
    catalog: &'a [LessonSummary],
    query: &DiscoveryQuery,
    bookmarks: &BookmarkSet,
) -> DiscoveryView<'a> {
    let mut filtered: Vec<&LessonSummary> = catalog
        .iter()
        .filter(|lesson| matches(lesson, query, bookmarks))
        .collect();

    sort(&mut filtered, query.sort_key);

    let page_size = query.page_size.max(1);
    let total_matched = filtered.len();
    let total_pages = total_matched.div_ceil(page_size);

    let start = query.page.saturating_sub(1).saturating_mul(page_size);
    let page_items = if start >= total_matched {
        Vec::new()
    } else {
        filtered[start..(start + page_size).min(total_matched)].to_vec()
    };

    DiscoveryView {
        page_items,
        total_matched,
        total_pages,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
