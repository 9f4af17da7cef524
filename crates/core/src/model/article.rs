use serde::{Deserialize, Serialize};

use crate::model::ids::ArticleId;

/// One block of article body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArticleSection {
    Intro { text: String },
    Heading { text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
    Callout { text: String },
}

/// A long-form reference article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub category: String,
    pub read_time: String,
    pub sections: Vec<ArticleSection>,
}

impl Article {
    /// Section headings in reading order.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter_map(|section| match section {
            ArticleSection::Heading { text } => Some(text.as_str()),
            _ => None,
        })
    }
}
