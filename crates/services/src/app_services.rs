use std::sync::Arc;

use quest_core::catalog::{ArticleLibrary, QuestCatalog};
use storage::repository::Storage;

use crate::Clock;
use crate::community_service::CommunityService;
use crate::discussion_service::DiscussionService;
use crate::error::AppServicesError;
use crate::quests::QuestService;
use crate::what_if_service::WhatIfService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    articles: Arc<ArticleLibrary>,
    quests: Arc<QuestService>,
    discussions: Arc<DiscussionService>,
    community: Arc<CommunityService>,
    what_if: WhatIfService,
}

impl AppServices {
    /// Build services backed by in-memory storage, with the sample community
    /// posts already on the board.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled content is malformed.
    pub async fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::in_memory();
        let catalog = Arc::new(QuestCatalog::builtin()?);
        let articles = Arc::new(ArticleLibrary::builtin()?);

        let quests = Arc::new(QuestService::new(clock, catalog, Arc::clone(&storage.progress)));
        let discussions = Arc::new(DiscussionService::new(
            clock,
            Arc::clone(&storage.discussions),
        ));
        let community = Arc::new(CommunityService::new(clock, Arc::clone(&storage.posts)));
        community.seed_defaults().await?;

        Ok(Self {
            articles,
            quests,
            discussions,
            community,
            what_if: WhatIfService::default(),
        })
    }

    #[must_use]
    pub fn articles(&self) -> Arc<ArticleLibrary> {
        Arc::clone(&self.articles)
    }

    #[must_use]
    pub fn quests(&self) -> Arc<QuestService> {
        Arc::clone(&self.quests)
    }

    #[must_use]
    pub fn discussions(&self) -> Arc<DiscussionService> {
        Arc::clone(&self.discussions)
    }

    #[must_use]
    pub fn community(&self) -> Arc<CommunityService> {
        Arc::clone(&self.community)
    }

    #[must_use]
    pub fn what_if(&self) -> WhatIfService {
        self.what_if
    }
}
