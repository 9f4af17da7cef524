use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CommentId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommentError {
    #[error("comment author cannot be empty")]
    EmptyAuthor,

    #[error("comment text cannot be empty")]
    EmptyText,
}

//
// ─── COMMENT ───────────────────────────────────────────────────────────────────
//

/// Unvalidated input for a new comment or reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentDraft {
    pub author: String,
    pub text: String,
}

impl CommentDraft {
    #[must_use]
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }

    /// Trim and check the draft.
    ///
    /// # Errors
    ///
    /// Returns `CommentError` if the author or text is blank.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedComment, CommentError> {
        let author = self.author.trim();
        if author.is_empty() {
            return Err(CommentError::EmptyAuthor);
        }
        let text = normalize_text(&self.text)?;

        Ok(ValidatedComment {
            author: author.to_owned(),
            text,
            created_at: now,
        })
    }
}

/// A checked draft waiting for its id and place in a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedComment {
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ValidatedComment {
    #[must_use]
    pub fn assign_id(self, id: CommentId, parent_id: Option<CommentId>) -> Comment {
        Comment {
            id,
            author: self.author,
            text: self.text,
            parent_id,
            created_at: self.created_at,
            replies: Vec::new(),
            edited_at: None,
        }
    }
}

/// Replacement text for an existing comment, already checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEdit {
    text: String,
    edited_at: DateTime<Utc>,
}

impl CommentEdit {
    /// # Errors
    ///
    /// Returns `CommentError::EmptyText` if `text` is blank.
    pub fn new(text: &str, now: DateTime<Utc>) -> Result<Self, CommentError> {
        Ok(Self {
            text: normalize_text(text)?,
            edited_at: now,
        })
    }
}

/// A discussion comment together with its nested replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub text: String,
    pub parent_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<Comment>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Comment {
    #[must_use]
    pub fn edited(&self) -> bool {
        self.edited_at.is_some()
    }

    /// Replace the text and mark the comment as edited.
    pub fn apply_edit(&mut self, edit: CommentEdit) {
        self.text = edit.text;
        self.edited_at = Some(edit.edited_at);
    }
}

fn normalize_text(text: &str) -> Result<String, CommentError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommentError::EmptyText);
    }
    Ok(text.to_owned())
}

//
// ─── THREAD HELPERS ────────────────────────────────────────────────────────────
//

/// Depth-first search for a comment anywhere in a thread.
#[must_use]
pub fn find_comment(comments: &[Comment], id: CommentId) -> Option<&Comment> {
    for comment in comments {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_comment(&comment.replies, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_comment_mut(comments: &mut [Comment], id: CommentId) -> Option<&mut Comment> {
    for comment in comments {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_comment_mut(&mut comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Remove a comment (and its replies) from a thread. Returns whether it was found.
pub fn remove_comment(comments: &mut Vec<Comment>, id: CommentId) -> bool {
    if let Some(pos) = comments.iter().position(|c| c.id == id) {
        comments.remove(pos);
        return true;
    }
    comments
        .iter_mut()
        .any(|comment| remove_comment(&mut comment.replies, id))
}

/// Number of comments in a thread, replies included.
#[must_use]
pub fn count_comments(comments: &[Comment]) -> usize {
    comments
        .iter()
        .map(|comment| 1 + count_comments(&comment.replies))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn comment(id: u64, parent: Option<u64>) -> Comment {
        CommentDraft::new("Maya", format!("comment {id}"))
            .validate(fixed_now())
            .unwrap()
            .assign_id(CommentId::new(id), parent.map(CommentId::new))
    }

    fn thread() -> Vec<Comment> {
        let mut root = comment(1, None);
        let mut reply = comment(2, Some(1));
        reply.replies.push(comment(3, Some(2)));
        root.replies.push(reply);
        vec![root, comment(4, None)]
    }

    #[test]
    fn draft_validation_trims_and_rejects_blank() {
        let ok = CommentDraft::new("  Lisa ", "  hello  ")
            .validate(fixed_now())
            .unwrap()
            .assign_id(CommentId::new(1), None);
        assert_eq!(ok.author, "Lisa");
        assert_eq!(ok.text, "hello");
        assert!(!ok.edited());

        let err = CommentDraft::new(" ", "text")
            .validate(fixed_now())
            .unwrap_err();
        assert_eq!(err, CommentError::EmptyAuthor);

        let err = CommentDraft::new("a", "\n")
            .validate(fixed_now())
            .unwrap_err();
        assert_eq!(err, CommentError::EmptyText);
    }

    #[test]
    fn finds_nested_replies() {
        let comments = thread();
        assert_eq!(find_comment(&comments, CommentId::new(3)).unwrap().text, "comment 3");
        assert!(find_comment(&comments, CommentId::new(9)).is_none());
        assert_eq!(count_comments(&comments), 4);
    }

    #[test]
    fn edit_marks_comment() {
        let mut comments = thread();
        let target = find_comment_mut(&mut comments, CommentId::new(2)).unwrap();
        target.apply_edit(CommentEdit::new("  updated ", fixed_now()).unwrap());
        assert!(target.edited());
        assert_eq!(
            CommentEdit::new("   ", fixed_now()).unwrap_err(),
            CommentError::EmptyText
        );
        assert_eq!(find_comment(&comments, CommentId::new(2)).unwrap().text, "updated");
    }

    #[test]
    fn remove_drops_subtree() {
        let mut comments = thread();
        assert!(remove_comment(&mut comments, CommentId::new(2)));
        assert_eq!(count_comments(&comments), 2);
        assert!(find_comment(&comments, CommentId::new(3)).is_none());
        assert!(!remove_comment(&mut comments, CommentId::new(2)));
    }
}
