use std::sync::Arc;

use chrono::Duration;
use quest_core::Clock;
use quest_core::catalog::seed_posts;
use quest_core::model::{Post, PostCategory, PostDraft, ValidatedPost};
use storage::repository::PostRepository;
use tracing::info;

use crate::error::CommunityError;

/// Community board: posts filed under General or Advice.
#[derive(Clone)]
pub struct CommunityService {
    clock: Clock,
    posts: Arc<dyn PostRepository>,
}

impl CommunityService {
    #[must_use]
    pub fn new(clock: Clock, posts: Arc<dyn PostRepository>) -> Self {
        Self { clock, posts }
    }

    /// Insert the bundled sample posts, aged relative to now.
    ///
    /// Returns the number of posts inserted.
    ///
    /// # Errors
    ///
    /// Returns `CommunityError::Catalog` if the sample data is malformed.
    /// Returns `CommunityError::Storage` on repository failures.
    pub async fn seed_defaults(&self) -> Result<usize, CommunityError> {
        let now = self.clock.now();
        let seeds = seed_posts()?;
        let count = seeds.len();
        for seed in seeds {
            let post = ValidatedPost {
                title: seed.title,
                preview: seed.preview,
                author: seed.author,
                category: seed.category,
                replies: seed.replies,
                created_at: now - Duration::hours(seed.hours_ago),
            };
            self.posts.insert_post(post).await?;
        }
        info!(count, "community board seeded");
        Ok(count)
    }

    /// # Errors
    ///
    /// Returns `CommunityError::Post` if a required field is missing.
    /// Returns `CommunityError::Storage` on repository failures.
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, CommunityError> {
        let post = draft.validate(self.clock.now())?;
        let post = self.posts.insert_post(post).await?;
        info!(post = %post.id, category = %post.category, "post created");
        Ok(post)
    }

    /// All posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CommunityError::Storage` on repository failures.
    pub async fn list_posts(&self) -> Result<Vec<Post>, CommunityError> {
        Ok(self.posts.list_posts().await?)
    }

    /// # Errors
    ///
    /// Returns `CommunityError::Storage` on repository failures.
    pub async fn list_by_category(
        &self,
        category: PostCategory,
    ) -> Result<Vec<Post>, CommunityError> {
        let posts = self.posts.list_posts().await?;
        Ok(posts.into_iter().filter(|p| p.category == category).collect())
    }
}
