use std::sync::Arc;

use quest_core::Clock;
use quest_core::model::discussion::count_comments;
use quest_core::model::{ArticleId, Comment, CommentDraft, CommentEdit, CommentId};
use storage::repository::DiscussionRepository;
use tracing::debug;

use crate::error::DiscussionError;

/// Comment count for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCommentCount {
    pub article_id: ArticleId,
    pub comment_count: usize,
}

/// Threaded comments attached to articles.
#[derive(Clone)]
pub struct DiscussionService {
    clock: Clock,
    threads: Arc<dyn DiscussionRepository>,
}

impl DiscussionService {
    #[must_use]
    pub fn new(clock: Clock, threads: Arc<dyn DiscussionRepository>) -> Self {
        Self { clock, threads }
    }

    /// Top-level comments of an article with their replies nested.
    ///
    /// An article nobody commented on yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::Storage` on repository failures.
    pub async fn list_comments(
        &self,
        article: &ArticleId,
    ) -> Result<Vec<Comment>, DiscussionError> {
        Ok(self.threads.load_thread(article).await?.unwrap_or_default())
    }

    /// Post a comment, or a reply when `parent` is given.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::Comment` if the draft is blank.
    /// Returns `DiscussionError::ParentNotFound` if `parent` is not in the thread.
    /// Returns `DiscussionError::Storage` on repository failures.
    pub async fn create_comment(
        &self,
        article: &ArticleId,
        draft: CommentDraft,
        parent: Option<CommentId>,
    ) -> Result<Comment, DiscussionError> {
        let comment = draft.validate(self.clock.now())?;
        let comment = self
            .threads
            .insert_comment(article, comment, parent)
            .await?
            .ok_or(DiscussionError::ParentNotFound)?;
        debug!(article = %article, comment = %comment.id, "comment created");
        Ok(comment)
    }

    /// Replace a comment's text and mark it edited.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::Comment` if the new text is blank.
    /// Returns `DiscussionError::ArticleNotFound` / `CommentNotFound` for unknown targets.
    /// Returns `DiscussionError::Storage` on repository failures.
    pub async fn update_comment(
        &self,
        article: &ArticleId,
        id: CommentId,
        text: &str,
    ) -> Result<Comment, DiscussionError> {
        let edit = CommentEdit::new(text, self.clock.now())?;
        match self.threads.update_comment(article, id, edit).await? {
            Some(comment) => Ok(comment),
            None => Err(self.missing_target(article).await?),
        }
    }

    /// Delete a comment together with its replies.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::ArticleNotFound` / `CommentNotFound` for unknown targets.
    /// Returns `DiscussionError::Storage` on repository failures.
    pub async fn delete_comment(
        &self,
        article: &ArticleId,
        id: CommentId,
    ) -> Result<(), DiscussionError> {
        if !self.threads.remove_comment(article, id).await? {
            return Err(self.missing_target(article).await?);
        }
        debug!(article = %article, comment = %id, "comment deleted");
        Ok(())
    }

    /// Which lookup failed. Threads are never dropped once created.
    async fn missing_target(
        &self,
        article: &ArticleId,
    ) -> Result<DiscussionError, DiscussionError> {
        Ok(match self.threads.load_thread(article).await? {
            Some(_) => DiscussionError::CommentNotFound,
            None => DiscussionError::ArticleNotFound,
        })
    }

    /// Comment totals (replies included) for every article with a thread.
    ///
    /// # Errors
    ///
    /// Returns `DiscussionError::Storage` on repository failures.
    pub async fn article_counts(&self) -> Result<Vec<ArticleCommentCount>, DiscussionError> {
        let threads = self.threads.list_threads().await?;
        Ok(threads
            .into_iter()
            .map(|(article_id, comments)| ArticleCommentCount {
                article_id,
                comment_count: count_comments(&comments),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quest_core::model::ValidatedComment;
    use quest_core::time::fixed_clock;
    use std::time::Duration;
    use storage::repository::InMemoryRepository;
    use storage::StorageError;

    fn service() -> DiscussionService {
        DiscussionService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    fn stocks() -> ArticleId {
        ArticleId::new("what-are-stocks")
    }

    fn bonds() -> ArticleId {
        ArticleId::new("understanding-bonds")
    }

    /// Delegates to the in-memory store after a pause, so concurrent calls interleave.
    struct SlowThreads {
        inner: InMemoryRepository,
    }

    impl SlowThreads {
        async fn pause() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[async_trait]
    impl DiscussionRepository for SlowThreads {
        async fn load_thread(
            &self,
            article: &ArticleId,
        ) -> Result<Option<Vec<Comment>>, StorageError> {
            let thread = self.inner.load_thread(article).await;
            Self::pause().await;
            thread
        }

        async fn insert_comment(
            &self,
            article: &ArticleId,
            comment: ValidatedComment,
            parent: Option<CommentId>,
        ) -> Result<Option<Comment>, StorageError> {
            Self::pause().await;
            self.inner.insert_comment(article, comment, parent).await
        }

        async fn update_comment(
            &self,
            article: &ArticleId,
            id: CommentId,
            edit: CommentEdit,
        ) -> Result<Option<Comment>, StorageError> {
            Self::pause().await;
            self.inner.update_comment(article, id, edit).await
        }

        async fn remove_comment(
            &self,
            article: &ArticleId,
            id: CommentId,
        ) -> Result<bool, StorageError> {
            Self::pause().await;
            self.inner.remove_comment(article, id).await
        }

        async fn list_threads(&self) -> Result<Vec<(ArticleId, Vec<Comment>)>, StorageError> {
            self.inner.list_threads().await
        }
    }

    #[tokio::test]
    async fn overlapping_writes_keep_every_comment() {
        let service = DiscussionService::new(
            fixed_clock(),
            Arc::new(SlowThreads {
                inner: InMemoryRepository::new(),
            }),
        );
        let article = stocks();
        let root = service
            .create_comment(&article, CommentDraft::new("Maya", "root"), None)
            .await
            .unwrap();

        let (first, second, reply, edit) = tokio::join!(
            service.create_comment(&article, CommentDraft::new("Lisa", "one"), None),
            service.create_comment(&article, CommentDraft::new("Noor", "two"), None),
            service.create_comment(&article, CommentDraft::new("Ivy", "re"), Some(root.id)),
            service.update_comment(&article, root.id, "root, edited"),
        );
        first.unwrap();
        second.unwrap();
        reply.unwrap();
        edit.unwrap();

        let thread = service.list_comments(&article).await.unwrap();
        assert_eq!(count_comments(&thread), 4);
        assert_eq!(thread[0].text, "root, edited");
        assert_eq!(thread[0].replies.len(), 1);
    }

    #[tokio::test]
    async fn replies_nest_under_parent() {
        let service = service();
        let root = service
            .create_comment(&stocks(), CommentDraft::new("Maya", "Helpful!"), None)
            .await
            .unwrap();
        let reply = service
            .create_comment(&stocks(), CommentDraft::new("Lisa", "Agreed"), Some(root.id))
            .await
            .unwrap();
        assert_eq!(reply.parent_id, Some(root.id));

        let comments = service.list_comments(&stocks()).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].replies[0].id, reply.id);
    }

    #[tokio::test]
    async fn unknown_parent_is_rejected() {
        let err = service()
            .create_comment(&stocks(), CommentDraft::new("a", "b"), Some(CommentId::new(99)))
            .await
            .unwrap_err();
        assert!(matches!(err, DiscussionError::ParentNotFound));
    }

    #[tokio::test]
    async fn update_and_delete_require_existing_targets() {
        let service = service();
        let err = service
            .update_comment(&stocks(), CommentId::new(1), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, DiscussionError::ArticleNotFound));

        let root = service
            .create_comment(&stocks(), CommentDraft::new("Maya", "first"), None)
            .await
            .unwrap();
        let edited = service
            .update_comment(&stocks(), root.id, "second")
            .await
            .unwrap();
        assert!(edited.edited());
        assert_eq!(edited.text, "second");

        let err = service
            .delete_comment(&stocks(), CommentId::new(404))
            .await
            .unwrap_err();
        assert!(matches!(err, DiscussionError::CommentNotFound));

        service.delete_comment(&stocks(), root.id).await.unwrap();
        assert!(service.list_comments(&stocks()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn counts_include_replies() {
        let service = service();
        let root = service
            .create_comment(&stocks(), CommentDraft::new("a", "1"), None)
            .await
            .unwrap();
        service
            .create_comment(&stocks(), CommentDraft::new("b", "2"), Some(root.id))
            .await
            .unwrap();
        service
            .create_comment(&bonds(), CommentDraft::new("c", "3"), None)
            .await
            .unwrap();

        let counts = service.article_counts().await.unwrap();
        assert_eq!(
            counts,
            vec![
                ArticleCommentCount {
                    article_id: bonds(),
                    comment_count: 1,
                },
                ArticleCommentCount {
                    article_id: stocks(),
                    comment_count: 2,
                },
            ]
        );
    }
}
