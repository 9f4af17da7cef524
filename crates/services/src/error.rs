//! Shared error types for the services crate.

use thiserror::Error;

use quest_core::QuizError;
use quest_core::catalog::CatalogError;
use quest_core::model::{CommentError, PostError, QuestId};
use storage::repository::StorageError;

/// Errors emitted by `QuestService` and `QuestFlow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestError {
    #[error("quest {0} does not exist")]
    NotFound(QuestId),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DiscussionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscussionError {
    #[error("article has no discussion")]
    ArticleNotFound,
    #[error("comment not found")]
    CommentNotFound,
    #[error("parent comment not found")]
    ParentNotFound,
    #[error(transparent)]
    Comment(#[from] CommentError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CommunityService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommunityError {
    #[error(transparent)]
    Post(#[from] PostError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Community(#[from] CommunityError),
}
