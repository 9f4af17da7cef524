use quest_core::Advance;
use quest_core::model::{Outcome, QuestId, Selection};
use quest_core::time::fixed_now;
use services::{AppServices, Clock, QuestStage, QuizAction, QuizView};

#[tokio::test]
async fn quest_completion_updates_progress() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now())).await.unwrap();
    let quests = app.quests();

    let stats = quests.progress().await.unwrap();
    assert_eq!((stats.completed, stats.total, stats.total_xp), (0, 3, 0));

    let mut flow = quests.open_quest(QuestId::new(1)).await.unwrap();
    while flow.continue_lesson() {}
    assert_eq!(flow.stage(), QuestStage::Quiz);

    // wrong first, then retry
    flow.select_answer(Selection::Index(0));
    assert_eq!(flow.submit_answer(), Some(Outcome::Incorrect));
    let view = QuizView::from_snapshot(&flow.quiz().unwrap());
    assert_eq!(view.action, QuizAction::TryAgain);
    assert!(flow.retry());

    let answers = [Selection::Index(1), Selection::Value(4.0), Selection::Index(1)];
    let mut last = None;
    for selection in answers {
        assert!(flow.select_answer(selection));
        assert_eq!(flow.submit_answer(), Some(Outcome::Correct));
        last = quests.advance(&mut flow).await.unwrap();
    }
    assert_eq!(last, Some(Advance::Completed));
    assert_eq!(flow.stage(), QuestStage::Completed);

    let stats = quests.progress().await.unwrap();
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.streak_days, 1);
    assert_eq!(stats.total_xp, 100);

    let listed = quests.list_quests().await.unwrap();
    assert!(listed.iter().any(|q| q.id == QuestId::new(1) && q.completed));

    let reopened = quests.open_quest(QuestId::new(1)).await.unwrap();
    assert_eq!(reopened.stage(), QuestStage::AlreadyCompleted);
}

#[tokio::test]
async fn unknown_quest_is_not_found() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now())).await.unwrap();
    let err = app.quests().open_quest(QuestId::new(99)).await.unwrap_err();
    assert!(matches!(err, services::QuestError::NotFound(id) if id == QuestId::new(99)));
}
