use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::PostId;

/// Author shown when a post is submitted without a name.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PostError {
    #[error("post title cannot be empty")]
    EmptyTitle,

    #[error("post content cannot be empty")]
    EmptyContent,

    #[error("post category is required")]
    MissingCategory,

    #[error("unknown post category: {0}")]
    UnknownCategory(String),
}

/// Board section a post is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostCategory {
    General,
    Advice,
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostCategory::General => write!(f, "General"),
            PostCategory::Advice => write!(f, "Advice"),
        }
    }
}

impl FromStr for PostCategory {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Err(PostError::MissingCategory),
            "general" => Ok(Self::General),
            "advice" => Ok(Self::Advice),
            other => Err(PostError::UnknownCategory(other.to_owned())),
        }
    }
}

/// Form input for a new community post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: Option<String>,
}

/// A post whose fields have been checked but that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPost {
    pub title: String,
    pub preview: String,
    pub author: String,
    pub category: PostCategory,
    pub replies: u32,
    pub created_at: DateTime<Utc>,
}

impl PostDraft {
    /// # Errors
    ///
    /// Returns `PostError` if the title, content, or category is missing.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedPost, PostError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PostError::EmptyTitle);
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(PostError::EmptyContent);
        }
        let category = self.category.parse::<PostCategory>()?;
        let author = self
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR);

        Ok(ValidatedPost {
            title: title.to_owned(),
            preview: content.to_owned(),
            author: author.to_owned(),
            category,
            replies: 0,
            created_at: now,
        })
    }
}

impl ValidatedPost {
    #[must_use]
    pub fn assign_id(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            preview: self.preview,
            author: self.author,
            category: self.category,
            replies: self.replies,
            created_at: self.created_at,
        }
    }
}

/// A community board post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub preview: String,
    pub author: String,
    pub category: PostCategory,
    pub replies: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn draft() -> PostDraft {
        PostDraft {
            title: "Budgeting with irregular income?".into(),
            content: "How do you budget without a steady paycheck?".into(),
            category: "advice".into(),
            author: None,
        }
    }

    #[test]
    fn blank_author_becomes_anonymous() {
        let post = draft().validate(fixed_now()).unwrap();
        assert_eq!(post.author, ANONYMOUS_AUTHOR);
        assert_eq!(post.category, PostCategory::Advice);
        assert_eq!(post.replies, 0);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let mut d = draft();
        d.title = "  ".into();
        assert_eq!(d.validate(fixed_now()).unwrap_err(), PostError::EmptyTitle);

        let mut d = draft();
        d.content.clear();
        assert_eq!(d.validate(fixed_now()).unwrap_err(), PostError::EmptyContent);

        let mut d = draft();
        d.category.clear();
        assert_eq!(d.validate(fixed_now()).unwrap_err(), PostError::MissingCategory);

        let mut d = draft();
        d.category = "gossip".into();
        assert!(matches!(
            d.validate(fixed_now()).unwrap_err(),
            PostError::UnknownCategory(_)
        ));
    }

    #[test]
    fn category_round_trips_through_display() {
        for category in [PostCategory::General, PostCategory::Advice] {
            assert_eq!(category.to_string().parse::<PostCategory>().unwrap(), category);
        }
    }
}
