use thiserror::Error;

use crate::model::{CatalogError, DetailError, LessonError, StepError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Detail(#[from] DetailError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
