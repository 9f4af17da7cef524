use serde::{Deserialize, Serialize};

use crate::model::ids::QuestId;
use crate::model::step::Step;
use crate::quiz::{QuizError, QuizSession};

/// One page of lesson text shown before a quest's quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonStep {
    pub title: String,
    pub content: String,
}

/// A unit of learning content: lessons followed by a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub lessons: Vec<LessonStep>,
    pub quiz: Vec<Step>,
}

impl Quest {
    /// Build a fresh quiz session over this quest's steps.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the quiz steps are empty or malformed.
    pub fn start_quiz(&self) -> Result<QuizSession, QuizError> {
        QuizSession::new(self.quiz.clone())
    }

    #[must_use]
    pub fn lesson(&self, index: usize) -> Option<&LessonStep> {
        self.lessons.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Selection;
    use crate::quiz::Advance;

    fn sample() -> Quest {
        Quest {
            id: QuestId::new(7),
            title: "Sample".into(),
            description: "A sample quest".into(),
            category: "Foundations".into(),
            lessons: vec![LessonStep {
                title: "Intro".into(),
                content: "Read me".into(),
            }],
            quiz: vec![Step::choice("Q", "E", vec!["a".into(), "b".into()], 1)],
        }
    }

    #[test]
    fn start_quiz_builds_independent_sessions() {
        let quest = sample();
        let mut first = quest.start_quiz().unwrap();
        first.select_answer(Selection::Index(1));
        first.submit_answer();
        assert_eq!(first.advance(), Some(Advance::Completed));

        let second = quest.start_quiz().unwrap();
        assert!(!second.is_complete());
        assert_eq!(second.current_index(), 0);
    }

    #[test]
    fn empty_quiz_cannot_start() {
        let mut quest = sample();
        quest.quiz.clear();
        assert!(quest.start_quiz().is_err());
        assert_eq!(quest.lesson(0).map(|l| l.title.as_str()), Some("Intro"));
        assert!(quest.lesson(1).is_none());
    }
}
