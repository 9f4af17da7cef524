use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Content errors detected when a step is checked before a quiz starts.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StepError {
    #[error("choice step has no options")]
    NoOptions,

    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },

    #[error("scenario step has no choices")]
    NoChoices,

    #[error("range bounds must be finite numbers")]
    NonFiniteBounds,

    #[error("range min ({min}) is greater than max ({max})")]
    InvertedRange { min: f64, max: f64 },

    #[error("range step size must be a positive number")]
    InvalidStepSize,

    #[error("correct interval [{low}, {high}] is inverted")]
    InvertedInterval { low: f64, high: f64 },
}

//
// ─── SELECTION / OUTCOME ───────────────────────────────────────────────────────
//

/// A learner's pending answer for one step.
///
/// Choice and scenario steps take an option index, range steps take a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Index(usize),
    Value(f64),
}

/// Verdict attached to a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    #[must_use]
    pub fn from_bool(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Incorrect }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// One entry of a scenario step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioChoice {
    pub label: String,
    pub is_correct: bool,
}

impl ScenarioChoice {
    #[must_use]
    pub fn new(label: impl Into<String>, is_correct: bool) -> Self {
        Self {
            label: label.into(),
            is_correct,
        }
    }
}

/// Variant-specific question data and its correctness rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    Choice {
        options: Vec<String>,
        correct_index: usize,
    },
    Range {
        min: f64,
        max: f64,
        step_size: f64,
        /// Inclusive `(low, high)` acceptance bounds.
        correct_interval: (f64, f64),
        #[serde(default)]
        unit: String,
    },
    Scenario {
        narrative: String,
        choices: Vec<ScenarioChoice>,
    },
}

/// One question unit of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub prompt: String,
    pub explanation: String,
    #[serde(flatten)]
    pub kind: StepKind,
}

impl Step {
    #[must_use]
    pub fn choice(
        prompt: impl Into<String>,
        explanation: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            explanation: explanation.into(),
            kind: StepKind::Choice {
                options,
                correct_index,
            },
        }
    }

    #[must_use]
    pub fn range(
        prompt: impl Into<String>,
        explanation: impl Into<String>,
        (min, max, step_size): (f64, f64, f64),
        correct_interval: (f64, f64),
    ) -> Self {
        Self {
            prompt: prompt.into(),
            explanation: explanation.into(),
            kind: StepKind::Range {
                min,
                max,
                step_size,
                correct_interval,
                unit: String::new(),
            },
        }
    }

    #[must_use]
    pub fn scenario(
        prompt: impl Into<String>,
        explanation: impl Into<String>,
        narrative: impl Into<String>,
        choices: Vec<ScenarioChoice>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            explanation: explanation.into(),
            kind: StepKind::Scenario {
                narrative: narrative.into(),
                choices,
            },
        }
    }

    /// Check that the correctness data is well-formed.
    ///
    /// Scenario steps are not required to have exactly one correct entry.
    ///
    /// # Errors
    ///
    /// Returns `StepError` describing the first malformed field.
    pub fn validate(&self) -> Result<(), StepError> {
        match &self.kind {
            StepKind::Choice {
                options,
                correct_index,
            } => {
                if options.is_empty() {
                    return Err(StepError::NoOptions);
                }
                if *correct_index >= options.len() {
                    return Err(StepError::CorrectIndexOutOfRange {
                        index: *correct_index,
                        len: options.len(),
                    });
                }
            }
            StepKind::Range {
                min,
                max,
                step_size,
                correct_interval: (low, high),
                ..
            } => {
                if !(min.is_finite() && max.is_finite() && low.is_finite() && high.is_finite()) {
                    return Err(StepError::NonFiniteBounds);
                }
                if min > max {
                    return Err(StepError::InvertedRange {
                        min: *min,
                        max: *max,
                    });
                }
                if !step_size.is_finite() || *step_size <= 0.0 {
                    return Err(StepError::InvalidStepSize);
                }
                if low > high {
                    return Err(StepError::InvertedInterval {
                        low: *low,
                        high: *high,
                    });
                }
            }
            StepKind::Scenario { choices, .. } => {
                if choices.is_empty() {
                    return Err(StepError::NoChoices);
                }
            }
        }
        Ok(())
    }

    /// Selection a learner starts from when the step becomes active.
    ///
    /// Range steps start at the midpoint of their bounds, snapped down onto the
    /// step grid anchored at `min`.
    #[must_use]
    pub fn default_selection(&self) -> Option<Selection> {
        match &self.kind {
            StepKind::Range {
                min,
                max,
                step_size,
                ..
            } => {
                let mid = min / 2.0 + max / 2.0;
                let steps = ((mid - min) / step_size).floor();
                let value = (min + steps * step_size).clamp(*min, *max);
                Some(Selection::Value(value))
            }
            StepKind::Choice { .. } | StepKind::Scenario { .. } => None,
        }
    }

    /// Whether `selection` has the right shape for this step and stays within
    /// its options or bounds.
    #[must_use]
    pub fn accepts(&self, selection: Selection) -> bool {
        match (&self.kind, selection) {
            (StepKind::Choice { options, .. }, Selection::Index(index)) => index < options.len(),
            (StepKind::Scenario { choices, .. }, Selection::Index(index)) => index < choices.len(),
            (StepKind::Range { min, max, .. }, Selection::Value(value)) => {
                value.is_finite() && *min <= value && value <= *max
            }
            _ => false,
        }
    }

    /// Apply this step's correctness rule to `selection`.
    #[must_use]
    pub fn evaluate(&self, selection: Selection) -> Outcome {
        let correct = match (&self.kind, selection) {
            (StepKind::Choice { correct_index, .. }, Selection::Index(index)) => {
                index == *correct_index
            }
            (
                StepKind::Range {
                    correct_interval: (low, high),
                    ..
                },
                Selection::Value(value),
            ) => *low <= value && value <= *high,
            (StepKind::Scenario { choices, .. }, Selection::Index(index)) => {
                choices.get(index).is_some_and(|choice| choice.is_correct)
            }
            _ => false,
        };
        Outcome::from_bool(correct)
    }

    /// Whether a submission is possible without an explicit selection.
    #[must_use]
    pub fn has_default(&self) -> bool {
        matches!(self.kind, StepKind::Range { .. })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
