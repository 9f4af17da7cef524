//! Linear quiz engine.
//!
//! A [`QuizSession`] walks a learner through an ordered list of [`Step`]s. Each
//! step is answered, checked, and either retried or advanced past; passing the
//! final step completes the session and fires its completion callback once.
//!
//! Operations invoked in the wrong phase are ignored: they leave the session
//! untouched and report that nothing happened through their return value.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::model::{Outcome, Selection, Step, StepError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a quiz refuses to start.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no steps")]
    Empty,

    #[error("step {index} is invalid: {source}")]
    InvalidStep {
        index: usize,
        #[source]
        source: StepError,
    },
}

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where the session currently is for its active step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// The learner may change the selection; nothing submitted yet.
    Answering,
    /// An answer was submitted and its verdict is on screen.
    Feedback(Outcome),
    /// The last step was passed.
    Completed,
}

/// Result of a successful [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the step at this index.
    Next(usize),
    /// The quiz is finished.
    Completed,
}

/// Read-only view of a session for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizSnapshot<'a> {
    pub index: usize,
    pub total: usize,
    /// Active step; `None` once the quiz is completed.
    pub step: Option<&'a Step>,
    pub phase: QuizPhase,
    pub selection: Option<Selection>,
}

impl QuizSnapshot<'_> {
    /// Verdict of the last submission for the active step, if any.
    #[must_use]
    pub fn last_outcome(&self) -> Option<Outcome> {
        match self.phase {
            QuizPhase::Feedback(outcome) => Some(outcome),
            QuizPhase::Answering | QuizPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.index + 1 == self.total
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

type CompletionHook = Box<dyn FnOnce() + Send>;

/// Mutable state of one quiz attempt.
pub struct QuizSession {
    steps: Vec<Step>,
    current: usize,
    pending: Option<Selection>,
    phase: QuizPhase,
    on_complete: Option<CompletionHook>,
}

impl QuizSession {
    /// Start a quiz over `steps`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` for an empty list and `QuizError::InvalidStep`
    /// for the first step with malformed correctness data.
    pub fn new(steps: Vec<Step>) -> Result<Self, QuizError> {
        if steps.is_empty() {
            return Err(QuizError::Empty);
        }
        for (index, step) in steps.iter().enumerate() {
            step.validate()
                .map_err(|source| QuizError::InvalidStep { index, source })?;
        }

        let pending = steps[0].default_selection();
        debug!(steps = steps.len(), "quiz session started");

        Ok(Self {
            steps,
            current: 0,
            pending,
            phase: QuizPhase::Answering,
            on_complete: None,
        })
    }

    /// Register the notification fired when the last step is passed.
    #[must_use]
    pub fn with_on_complete(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        if self.is_complete() {
            None
        } else {
            self.steps.get(self.current)
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn pending_selection(&self) -> Option<Selection> {
        self.pending
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot<'_> {
        QuizSnapshot {
            index: self.current,
            total: self.steps.len(),
            step: self.current_step(),
            phase: self.phase,
            selection: self.pending,
        }
    }

    /// Store `selection` as the pending answer.
    ///
    /// Ignored outside `Answering` or when the selection does not fit the
    /// active step. Returns whether the selection was stored.
    pub fn select_answer(&mut self, selection: Selection) -> bool {
        if self.phase != QuizPhase::Answering {
            return false;
        }
        if !self.steps[self.current].accepts(selection) {
            debug!(index = self.current, ?selection, "selection rejected");
            return false;
        }
        self.pending = Some(selection);
        true
    }

    /// Check the pending answer and move to `Feedback`.
    ///
    /// Returns `None` without changing state outside `Answering` or when no
    /// answer has been selected.
    pub fn submit_answer(&mut self) -> Option<Outcome> {
        if self.phase != QuizPhase::Answering {
            return None;
        }
        let selection = self.pending?;
        let outcome = self.steps[self.current].evaluate(selection);
        self.phase = QuizPhase::Feedback(outcome);
        debug!(index = self.current, ?outcome, "answer submitted");
        Some(outcome)
    }

    /// Drop an incorrect answer and return to `Answering` on the same step.
    pub fn retry(&mut self) -> bool {
        if self.phase != QuizPhase::Feedback(Outcome::Incorrect) {
            return false;
        }
        self.pending = self.steps[self.current].default_selection();
        self.phase = QuizPhase::Answering;
        debug!(index = self.current, "retrying step");
        true
    }

    /// Move past a correctly answered step.
    ///
    /// On the last step this completes the quiz and fires the completion hook.
    /// Returns `None` without changing state unless the active step was
    /// answered correctly.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.phase != QuizPhase::Feedback(Outcome::Correct) {
            return None;
        }

        if self.current + 1 == self.steps.len() {
            self.phase = QuizPhase::Completed;
            self.pending = None;
            info!(steps = self.steps.len(), "quiz completed");
            if let Some(hook) = self.on_complete.take() {
                hook();
            }
            return Some(Advance::Completed);
        }

        self.current += 1;
        self.pending = self.steps[self.current].default_selection();
        self.phase = QuizPhase::Answering;
        debug!(index = self.current, "advanced to next step");
        Some(Advance::Next(self.current))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("steps", &self.steps.len())
            .field("current", &self.current)
            .field("pending", &self.pending)
            .field("phase", &self.phase)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
