use quest_core::model::{ArticleId, CommentDraft, PostCategory};
use quest_core::time::fixed_now;
use services::{AppServices, Clock, DiscussionError};

#[tokio::test]
async fn article_thread_lifecycle() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now())).await.unwrap();
    let article = ArticleId::new("what-are-stocks");
    assert!(app.articles().get(&article).is_some());

    let discussions = app.discussions();
    assert!(discussions.list_comments(&article).await.unwrap().is_empty());

    let root = discussions
        .create_comment(&article, CommentDraft::new("Ana", "Great intro"), None)
        .await
        .unwrap();
    let reply = discussions
        .create_comment(&article, CommentDraft::new("Ben", "Agreed"), Some(root.id))
        .await
        .unwrap();
    assert_eq!(reply.parent_id, Some(root.id));

    let edited = discussions
        .update_comment(&article, reply.id, "Agreed, thanks!")
        .await
        .unwrap();
    assert!(edited.edited());

    let thread = discussions.list_comments(&article).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].replies[0].text, "Agreed, thanks!");

    let counts = discussions.article_counts().await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].comment_count, 2);

    discussions.delete_comment(&article, root.id).await.unwrap();
    assert!(discussions.list_comments(&article).await.unwrap().is_empty());

    let err = discussions
        .delete_comment(&article, root.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DiscussionError::CommentNotFound));
}

#[tokio::test]
async fn community_board_starts_seeded() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now())).await.unwrap();
    let posts = app.community().list_posts().await.unwrap();
    assert_eq!(posts.len(), 4);
    assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let advice = app
        .community()
        .list_by_category(PostCategory::Advice)
        .await
        .unwrap();
    assert!(advice.iter().all(|p| p.category == PostCategory::Advice));
}
