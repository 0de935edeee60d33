mod bookmarks;
mod catalog;
mod detail;
mod ids;
mod lesson;
mod step;

pub use bookmarks::BookmarkSet;
pub use catalog::{Catalog, CatalogError};
pub use detail::{DetailError, LessonDetail};
pub use ids::{LessonId, ParseIdError};
pub use lesson::{Category, Difficulty, LessonError, LessonSummary};
pub use step::{Step, StepError, StepKind};
