use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quest_core::model::{LessonStep, Outcome, Quest, Selection};
use quest_core::{Advance, QuizSession, QuizSnapshot};
use tracing::debug;

use crate::error::QuestError;

/// Where a learner is within one quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestStage {
    /// Reading the lesson page at this index.
    Lesson(usize),
    /// Answering the quiz.
    Quiz,
    /// The quiz was just passed.
    Completed,
    /// The quest had been completed before it was opened.
    AlreadyCompleted,
}

/// One open quest: lesson pages followed by its quiz.
///
/// The flow owns the quiz session exclusively and only forwards learner input
/// to it while in [`QuestStage::Quiz`].
#[derive(Debug)]
pub struct QuestFlow {
    quest: Quest,
    stage: QuestStage,
    quiz: QuizSession,
    finished: Arc<AtomicBool>,
}

impl QuestFlow {
    /// # Errors
    ///
    /// Returns `QuestError::Quiz` if the quest's quiz cannot start.
    pub fn new(quest: Quest, already_completed: bool) -> Result<Self, QuestError> {
        let finished = Arc::new(AtomicBool::new(false));
        let hook = Arc::clone(&finished);
        let quiz = quest
            .start_quiz()?
            .with_on_complete(move || hook.store(true, Ordering::SeqCst));

        let stage = if already_completed {
            QuestStage::AlreadyCompleted
        } else if quest.lessons.is_empty() {
            QuestStage::Quiz
        } else {
            QuestStage::Lesson(0)
        };

        Ok(Self {
            quest,
            stage,
            quiz,
            finished,
        })
    }

    #[must_use]
    pub fn quest(&self) -> &Quest {
        &self.quest
    }

    #[must_use]
    pub fn stage(&self) -> QuestStage {
        self.stage
    }

    #[must_use]
    pub fn current_lesson(&self) -> Option<&LessonStep> {
        match self.stage {
            QuestStage::Lesson(index) => self.quest.lesson(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_last_lesson(&self) -> bool {
        matches!(self.stage, QuestStage::Lesson(index) if index + 1 == self.quest.lessons.len())
    }

    /// Quiz state, available once the lessons are done.
    #[must_use]
    pub fn quiz(&self) -> Option<QuizSnapshot<'_>> {
        match self.stage {
            QuestStage::Quiz | QuestStage::Completed => Some(self.quiz.snapshot()),
            QuestStage::Lesson(_) | QuestStage::AlreadyCompleted => None,
        }
    }

    /// Move to the next lesson page, or into the quiz after the last one.
    pub fn continue_lesson(&mut self) -> bool {
        let QuestStage::Lesson(index) = self.stage else {
            return false;
        };
        self.stage = if index + 1 < self.quest.lessons.len() {
            QuestStage::Lesson(index + 1)
        } else {
            debug!(quest = %self.quest.id, "lessons finished, starting quiz");
            QuestStage::Quiz
        };
        true
    }

    pub fn select_answer(&mut self, selection: Selection) -> bool {
        self.stage == QuestStage::Quiz && self.quiz.select_answer(selection)
    }

    pub fn submit_answer(&mut self) -> Option<Outcome> {
        if self.stage != QuestStage::Quiz {
            return None;
        }
        self.quiz.submit_answer()
    }

    pub fn retry(&mut self) -> bool {
        self.stage == QuestStage::Quiz && self.quiz.retry()
    }

    /// Forward `advance` to the quiz; flips the flow to `Completed` when the
    /// quiz reports completion.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.stage != QuestStage::Quiz {
            return None;
        }
        let advance = self.quiz.advance();
        if self.finished.load(Ordering::SeqCst) {
            self.stage = QuestStage::Completed;
        }
        advance
    }
}
