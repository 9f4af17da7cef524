use std::sync::Arc;

use quest_core::catalog::QuestCatalog;
use quest_core::model::QuestId;
use quest_core::{Advance, Clock};
use storage::repository::QuestProgressRepository;
use tracing::info;

use super::flow::{QuestFlow, QuestStage};
use super::progress::{ProgressStats, RewardSettings};
use crate::error::QuestError;

/// Presentation-agnostic list item for the quest board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestListItem {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub completed: bool,
}

/// Hosts quest flows and records completion status.
///
/// This service owns:
/// - the time source (`Clock`)
/// - the quest catalog
/// - completion persistence
#[derive(Clone)]
pub struct QuestService {
    clock: Clock,
    catalog: Arc<QuestCatalog>,
    progress: Arc<dyn QuestProgressRepository>,
    rewards: RewardSettings,
}

impl QuestService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<QuestCatalog>,
        progress: Arc<dyn QuestProgressRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            progress,
            rewards: RewardSettings::default(),
        }
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardSettings) -> Self {
        self.rewards = rewards;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestCatalog {
        &self.catalog
    }

    /// All quests with their completion flag.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Storage` on repository failures.
    pub async fn list_quests(&self) -> Result<Vec<QuestListItem>, QuestError> {
        let mut items = Vec::with_capacity(self.catalog.len());
        for quest in self.catalog.quests() {
            let completed = self.progress.completion(quest.id).await?.is_some();
            items.push(QuestListItem {
                id: quest.id,
                title: quest.title.clone(),
                description: quest.description.clone(),
                category: quest.category.clone(),
                completed,
            });
        }
        Ok(items)
    }

    /// Open a quest for the learner.
    ///
    /// Completed quests open in [`QuestStage::AlreadyCompleted`].
    ///
    /// # Errors
    ///
    /// Returns `QuestError::NotFound` for unknown ids.
    /// Returns `QuestError::Storage` on repository failures.
    pub async fn open_quest(&self, id: QuestId) -> Result<QuestFlow, QuestError> {
        let quest = self.catalog.get(id).ok_or(QuestError::NotFound(id))?;
        let already_completed = self.progress.completion(id).await?.is_some();
        QuestFlow::new(quest.clone(), already_completed)
    }

    /// Advance the flow's quiz and persist completion when it finishes.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Storage` if the completion cannot be stored. The
    /// flow stays `Completed` either way, so calling [`QuestService::finalize`]
    /// later retries the write.
    pub async fn advance(&self, flow: &mut QuestFlow) -> Result<Option<Advance>, QuestError> {
        let advance = flow.advance();
        if advance == Some(Advance::Completed) {
            self.finalize(flow).await?;
        }
        Ok(advance)
    }

    /// Store completion for a finished flow. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Storage` on repository failures.
    pub async fn finalize(&self, flow: &QuestFlow) -> Result<bool, QuestError> {
        if flow.stage() != QuestStage::Completed {
            return Ok(false);
        }
        let id = flow.quest().id;
        self.progress.mark_completed(id, self.clock.now()).await?;
        info!(quest = %id, "quest completed");
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns `QuestError::Storage` on repository failures.
    pub async fn progress(&self) -> Result<ProgressStats, QuestError> {
        let completions = self.progress.list_completions().await?;
        let completions: Vec<_> = completions
            .into_iter()
            .filter(|c| self.catalog.get(c.quest_id).is_some())
            .collect();
        Ok(ProgressStats::compute(
            &completions,
            self.catalog.len(),
            self.clock.today(),
            self.rewards,
        ))
    }
}
