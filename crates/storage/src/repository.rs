use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quest_core::model::discussion::{find_comment_mut, remove_comment};
use quest_core::model::{
    ArticleId, Comment, CommentEdit, CommentId, Post, PostId, QuestId, ValidatedComment,
    ValidatedPost,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// When a learner finished a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestCompletion {
    pub quest_id: QuestId,
    pub completed_at: DateTime<Utc>,
}

/// Repository contract for quest completion status.
#[async_trait]
pub trait QuestProgressRepository: Send + Sync {
    /// Record that a quest was completed.
    ///
    /// The first completion wins; marking an already completed quest returns
    /// the existing record unchanged.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn mark_completed(
        &self,
        quest_id: QuestId,
        completed_at: DateTime<Utc>,
    ) -> Result<QuestCompletion, StorageError>;

    /// Fetch the completion record for a quest, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn completion(&self, quest_id: QuestId) -> Result<Option<QuestCompletion>, StorageError>;

    /// All completions ordered by completion time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_completions(&self) -> Result<Vec<QuestCompletion>, StorageError>;
}

/// Repository contract for per-article comment threads.
///
/// Every mutation edits the stored thread in place, so overlapping callers
/// never overwrite each other's changes.
#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    /// Load the thread for an article.
    ///
    /// Returns `Ok(None)` when no comment was ever posted on the article.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn load_thread(
        &self,
        article: &ArticleId,
    ) -> Result<Option<Vec<Comment>>, StorageError>;

    /// Give `comment` an id, unique across all articles, and attach it to the
    /// thread: at the top level, or under `parent` when given.
    ///
    /// Returns `Ok(None)` without allocating an id if `parent` is not in the
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the comment cannot be stored.
    async fn insert_comment(
        &self,
        article: &ArticleId,
        comment: ValidatedComment,
        parent: Option<CommentId>,
    ) -> Result<Option<Comment>, StorageError>;

    /// Apply `edit` to a comment anywhere in the thread.
    ///
    /// Returns `Ok(None)` if the comment is not in the thread.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the change cannot be stored.
    async fn update_comment(
        &self,
        article: &ArticleId,
        id: CommentId,
        edit: CommentEdit,
    ) -> Result<Option<Comment>, StorageError>;

    /// Remove a comment with all of its replies. Returns whether it was found.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the change cannot be stored.
    async fn remove_comment(
        &self,
        article: &ArticleId,
        id: CommentId,
    ) -> Result<bool, StorageError>;

    /// Every article that has a thread, in slug order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_threads(&self) -> Result<Vec<(ArticleId, Vec<Comment>)>, StorageError>;
}

/// Repository contract for community board posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a new post and assign its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the post cannot be stored.
    async fn insert_post(&self, post: ValidatedPost) -> Result<Post, StorageError>;

    /// All posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_posts(&self) -> Result<Vec<Post>, StorageError>;
}

/// Simple in-memory repository implementation.
///
/// This is the only backend: quest progress, threads, and posts live for as
/// long as the repository does.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    completions: Arc<Mutex<BTreeMap<QuestId, QuestCompletion>>>,
    discussions: Arc<Mutex<Discussions>>,
    posts: Arc<Mutex<Vec<Post>>>,
}

#[derive(Default)]
struct Discussions {
    threads: BTreeMap<ArticleId, Vec<Comment>>,
    last_comment_id: u64,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))
}

#[async_trait]
impl QuestProgressRepository for InMemoryRepository {
    async fn mark_completed(
        &self,
        quest_id: QuestId,
        completed_at: DateTime<Utc>,
    ) -> Result<QuestCompletion, StorageError> {
        let mut guard = lock(&self.completions)?;
        let record = *guard.entry(quest_id).or_insert(QuestCompletion {
            quest_id,
            completed_at,
        });
        debug!(%quest_id, "quest completion stored");
        Ok(record)
    }

    async fn completion(&self, quest_id: QuestId) -> Result<Option<QuestCompletion>, StorageError> {
        let guard = lock(&self.completions)?;
        Ok(guard.get(&quest_id).copied())
    }

    async fn list_completions(&self) -> Result<Vec<QuestCompletion>, StorageError> {
        let guard = lock(&self.completions)?;
        let mut records: Vec<_> = guard.values().copied().collect();
        records.sort_by_key(|r| (r.completed_at, r.quest_id));
        Ok(records)
    }
}

#[async_trait]
impl DiscussionRepository for InMemoryRepository {
    async fn load_thread(
        &self,
        article: &ArticleId,
    ) -> Result<Option<Vec<Comment>>, StorageError> {
        let guard = lock(&self.discussions)?;
        Ok(guard.threads.get(article).cloned())
    }

    async fn insert_comment(
        &self,
        article: &ArticleId,
        comment: ValidatedComment,
        parent: Option<CommentId>,
    ) -> Result<Option<Comment>, StorageError> {
        let mut guard = lock(&self.discussions)?;
        let Discussions {
            threads,
            last_comment_id,
        } = &mut *guard;

        let siblings = match parent {
            Some(parent_id) => {
                let Some(parent) = threads
                    .get_mut(article)
                    .and_then(|thread| find_comment_mut(thread, parent_id))
                else {
                    return Ok(None);
                };
                &mut parent.replies
            }
            None => threads.entry(article.clone()).or_default(),
        };

        *last_comment_id += 1;
        let comment = comment.assign_id(CommentId::new(*last_comment_id), parent);
        siblings.push(comment.clone());
        debug!(%article, comment = %comment.id, "comment stored");
        Ok(Some(comment))
    }

    async fn update_comment(
        &self,
        article: &ArticleId,
        id: CommentId,
        edit: CommentEdit,
    ) -> Result<Option<Comment>, StorageError> {
        let mut guard = lock(&self.discussions)?;
        let Some(comment) = guard
            .threads
            .get_mut(article)
            .and_then(|thread| find_comment_mut(thread, id))
        else {
            return Ok(None);
        };
        comment.apply_edit(edit);
        Ok(Some(comment.clone()))
    }

    async fn remove_comment(
        &self,
        article: &ArticleId,
        id: CommentId,
    ) -> Result<bool, StorageError> {
        let mut guard = lock(&self.discussions)?;
        Ok(guard
            .threads
            .get_mut(article)
            .is_some_and(|thread| remove_comment(thread, id)))
    }

    async fn list_threads(&self) -> Result<Vec<(ArticleId, Vec<Comment>)>, StorageError> {
        let guard = lock(&self.discussions)?;
        Ok(guard
            .threads
            .iter()
            .map(|(id, comments)| (id.clone(), comments.clone()))
            .collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn insert_post(&self, post: ValidatedPost) -> Result<Post, StorageError> {
        let mut guard = lock(&self.posts)?;
        let next = guard.iter().map(|p| p.id.value()).max().unwrap_or(0) + 1;
        let post = post.assign_id(PostId::new(next));
        guard.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StorageError> {
        let guard = lock(&self.posts)?;
        let mut posts = guard.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn QuestProgressRepository>,
    pub discussions: Arc<dyn DiscussionRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn QuestProgressRepository> = Arc::new(repo.clone());
        let discussions: Arc<dyn DiscussionRepository> = Arc::new(repo.clone());
        let posts: Arc<dyn PostRepository> = Arc::new(repo);
        Self {
            progress,
            discussions,
            posts,
        }
    }
}
