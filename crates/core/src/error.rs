use thiserror::Error;

use crate::catalog::CatalogError;
use crate::growth::GrowthError;
use crate::model::{CommentError, PostError, StepError};
use crate::quiz::QuizError;

/// Umbrella error for callers that do not care which module failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Comment(#[from] CommentError),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error(transparent)]
    Growth(#[from] GrowthError),
}
