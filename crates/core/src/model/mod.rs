mod article;
pub mod discussion;
mod ids;
mod post;
mod quest;
mod step;

pub use article::{Article, ArticleSection};
pub use discussion::{Comment, CommentDraft, CommentEdit, CommentError, ValidatedComment};
pub use ids::{ArticleId, CommentId, ParseIdError, PostId, QuestId};
pub use post::{ANONYMOUS_AUTHOR, Post, PostCategory, PostDraft, PostError, ValidatedPost};
pub use quest::{LessonStep, Quest};
pub use step::{Outcome, ScenarioChoice, Selection, Step, StepError, StepKind};
