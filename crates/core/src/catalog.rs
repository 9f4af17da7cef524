//! Built-in learning content.
//!
//! Quests, articles, and the sample community posts ship as JSON embedded in
//! the binary. Every quest quiz is checked against the quiz engine's rules when
//! the catalog loads, so a malformed step is caught before any learner sees it.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{Article, ArticleId, PostCategory, Quest, QuestId};
use crate::quiz::{QuizError, QuizSession};

const QUESTS_JSON: &str = include_str!("../data/quests.json");
const ARTICLES_JSON: &str = include_str!("../data/articles.json");
const POSTS_JSON: &str = include_str!("../data/posts.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate quest id {0}")]
    DuplicateQuest(QuestId),

    #[error("quest {0} has no lesson steps")]
    NoLessons(QuestId),

    #[error("quest {quest} has an invalid quiz: {source}")]
    InvalidQuiz {
        quest: QuestId,
        #[source]
        source: QuizError,
    },

    #[error("duplicate article id {0}")]
    DuplicateArticle(ArticleId),

    #[error("article {0} has no sections")]
    EmptyArticle(ArticleId),
}

//
// ─── QUESTS ────────────────────────────────────────────────────────────────────
//

/// Static lookup of quests by id.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestCatalog {
    quests: BTreeMap<QuestId, Quest>,
}

impl QuestCatalog {
    /// The quests bundled with the application.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded content is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(QUESTS_JSON)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Json` on parse failures, or a content error from
    /// [`QuestCatalog::from_quests`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let quests: Vec<Quest> = serde_json::from_str(json)?;
        Self::from_quests(quests)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` for duplicate ids, quests without lessons, or
    /// quizzes the engine would refuse to start.
    pub fn from_quests(quests: Vec<Quest>) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for quest in quests {
            if quest.lessons.is_empty() {
                return Err(CatalogError::NoLessons(quest.id));
            }
            QuizSession::new(quest.quiz.clone()).map_err(|source| CatalogError::InvalidQuiz {
                quest: quest.id,
                source,
            })?;
            let id = quest.id;
            if by_id.insert(id, quest).is_some() {
                return Err(CatalogError::DuplicateQuest(id));
            }
        }
        debug!(quests = by_id.len(), "quest catalog loaded");
        Ok(Self { quests: by_id })
    }

    #[must_use]
    pub fn get(&self, id: QuestId) -> Option<&Quest> {
        self.quests.get(&id)
    }

    /// Quests in ascending id order.
    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

//
// ─── ARTICLES ──────────────────────────────────────────────────────────────────
//

/// Static lookup of articles by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleLibrary {
    articles: Vec<Article>,
}

impl ArticleLibrary {
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded content is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(ARTICLES_JSON)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` for parse failures, duplicate slugs, or empty articles.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let articles: Vec<Article> = serde_json::from_str(json)?;
        for (pos, article) in articles.iter().enumerate() {
            if article.sections.is_empty() {
                return Err(CatalogError::EmptyArticle(article.id.clone()));
            }
            if articles[..pos].iter().any(|other| other.id == article.id) {
                return Err(CatalogError::DuplicateArticle(article.id.clone()));
            }
        }
        Ok(Self { articles })
    }

    #[must_use]
    pub fn get(&self, id: &ArticleId) -> Option<&Article> {
        self.articles.iter().find(|article| &article.id == id)
    }

    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }
}

//
// ─── SAMPLE POSTS ──────────────────────────────────────────────────────────────
//

/// A sample community post; its age is relative to when the board is seeded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedPost {
    pub title: String,
    pub preview: String,
    pub author: String,
    pub category: PostCategory,
    pub replies: u32,
    pub hours_ago: i64,
}

/// # Errors
///
/// Returns `CatalogError::Json` if the embedded posts are malformed.
pub fn seed_posts() -> Result<Vec<SeedPost>, CatalogError> {
    Ok(serde_json::from_str(POSTS_JSON)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Selection, StepKind};
    use crate::quiz::Advance;

    #[test]
    fn builtin_quests_load_in_id_order() {
        let catalog = QuestCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 3);
        let titles: Vec<_> = catalog.quests().map(|q| q.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Emergency Fund Basics", "Introduction to Investing", "Budget Like a Boss"]
        );
        for quest in catalog.quests() {
            assert_eq!(quest.lessons.len(), 3);
            assert_eq!(quest.quiz.len(), 3);
        }
    }

    #[test]
    fn emergency_fund_quiz_can_be_passed() {
        let catalog = QuestCatalog::builtin().unwrap();
        let quest = catalog.get(QuestId::new(1)).unwrap();
        let mut quiz = quest.start_quiz().unwrap();

        quiz.select_answer(Selection::Index(1));
        assert!(quiz.submit_answer().unwrap().is_correct());
        quiz.advance();

        quiz.select_answer(Selection::Value(4.0));
        assert!(quiz.submit_answer().unwrap().is_correct());
        quiz.advance();

        quiz.select_answer(Selection::Index(1));
        assert!(quiz.submit_answer().unwrap().is_correct());
        assert_eq!(quiz.advance(), Some(Advance::Completed));
    }

    #[test]
    fn budget_slider_requires_exact_twenty() {
        let catalog = QuestCatalog::builtin().unwrap();
        let quest = catalog.get(QuestId::new(3)).unwrap();
        match &quest.quiz[2].kind {
            StepKind::Range {
                correct_interval,
                step_size,
                ..
            } => {
                assert_eq!(*correct_interval, (20.0, 20.0));
                assert_eq!(*step_size, 5.0);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn duplicate_and_invalid_quests_are_rejected() {
        let mut quests: Vec<Quest> = serde_json::from_str(QUESTS_JSON).unwrap();
        quests[1].id = quests[0].id;
        assert!(matches!(
            QuestCatalog::from_quests(quests).unwrap_err(),
            CatalogError::DuplicateQuest(_)
        ));

        let mut quests: Vec<Quest> = serde_json::from_str(QUESTS_JSON).unwrap();
        quests[0].quiz.clear();
        assert!(matches!(
            QuestCatalog::from_quests(quests).unwrap_err(),
            CatalogError::InvalidQuiz {
                source: QuizError::Empty,
                ..
            }
        ));

        let mut quests: Vec<Quest> = serde_json::from_str(QUESTS_JSON).unwrap();
        quests[2].lessons.clear();
        assert!(matches!(
            QuestCatalog::from_quests(quests).unwrap_err(),
            CatalogError::NoLessons(_)
        ));

        assert!(matches!(
            QuestCatalog::from_json("{").unwrap_err(),
            CatalogError::Json(_)
        ));
    }

    #[test]
    fn articles_are_looked_up_by_slug() {
        let library = ArticleLibrary::builtin().unwrap();
        assert_eq!(library.articles().len(), 4);
        let stocks = library.get(&ArticleId::new("what-are-stocks")).unwrap();
        assert_eq!(stocks.title, "What Are Stocks?");
        assert!(stocks.headings().any(|h| h == "The Stock Market"));
        assert!(library.get(&ArticleId::new("crypto")).is_none());
    }

    #[test]
    fn seed_posts_parse() {
        let posts = seed_posts().unwrap();
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[1].category, PostCategory::Advice);
    }
}
