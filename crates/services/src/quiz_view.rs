use quest_core::model::{Outcome, Selection, StepKind};
use quest_core::{QuizPhase, QuizSnapshot};

/// State of one segment of the quiz progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Done,
    Active,
    Pending,
}

/// The single primary action offered for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    CheckAnswer { enabled: bool },
    Continue,
    CompleteQuest,
    TryAgain,
    None,
}

/// How an option should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMarker {
    Plain,
    Selected,
    /// The correct answer, revealed after a submission.
    Correct,
    /// The learner's incorrect pick.
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub marker: OptionMarker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeView {
    pub min: f64,
    pub max: f64,
    pub step_size: f64,
    pub value: f64,
    pub unit: String,
    /// Slider is locked while feedback is shown.
    pub locked: bool,
}

/// Presentation-agnostic projection of a quiz snapshot.
///
/// Carries the content strings as-is; wording of buttons and headings is left
/// to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizView {
    pub segments: Vec<SegmentState>,
    /// 1-based number of the active step.
    pub step_number: usize,
    pub prompt: Option<String>,
    pub narrative: Option<String>,
    pub options: Vec<OptionView>,
    pub range: Option<RangeView>,
    pub feedback: Option<Outcome>,
    /// Shown after any submission, right or wrong.
    pub explanation: Option<String>,
    pub action: QuizAction,
}

impl QuizView {
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot<'_>) -> Self {
        let completed = snapshot.phase == QuizPhase::Completed;
        let segments = (0..snapshot.total)
            .map(|idx| {
                if completed || idx < snapshot.index {
                    SegmentState::Done
                } else if idx == snapshot.index {
                    SegmentState::Active
                } else {
                    SegmentState::Pending
                }
            })
            .collect();

        let Some(step) = snapshot.step else {
            return Self {
                segments,
                step_number: snapshot.total,
                prompt: None,
                narrative: None,
                options: Vec::new(),
                range: None,
                feedback: None,
                explanation: None,
                action: QuizAction::None,
            };
        };

        let feedback = snapshot.last_outcome();
        let selected = match snapshot.selection {
            Some(Selection::Index(idx)) => Some(idx),
            _ => None,
        };

        let mut narrative = None;
        let mut range = None;
        let options = match &step.kind {
            StepKind::Choice {
                options,
                correct_index,
            } => options
                .iter()
                .enumerate()
                .map(|(idx, label)| OptionView {
                    label: label.clone(),
                    marker: marker(idx, selected, idx == *correct_index, feedback.is_some()),
                })
                .collect(),
            StepKind::Scenario {
                narrative: text,
                choices,
            } => {
                narrative = Some(text.clone());
                choices
                    .iter()
                    .enumerate()
                    .map(|(idx, choice)| OptionView {
                        label: choice.label.clone(),
                        marker: marker(idx, selected, choice.is_correct, feedback.is_some()),
                    })
                    .collect()
            }
            StepKind::Range {
                min,
                max,
                step_size,
                unit,
                ..
            } => {
                let value = match snapshot.selection {
                    Some(Selection::Value(v)) => v,
                    _ => *min,
                };
                range = Some(RangeView {
                    min: *min,
                    max: *max,
                    step_size: *step_size,
                    value,
                    unit: unit.clone(),
                    locked: feedback.is_some(),
                });
                Vec::new()
            }
        };

        let action = match feedback {
            None => QuizAction::CheckAnswer {
                enabled: snapshot.selection.is_some(),
            },
            Some(Outcome::Correct) if snapshot.is_last_step() => QuizAction::CompleteQuest,
            Some(Outcome::Correct) => QuizAction::Continue,
            Some(Outcome::Incorrect) => QuizAction::TryAgain,
        };

        Self {
            segments,
            step_number: snapshot.index + 1,
            prompt: Some(step.prompt.clone()),
            narrative,
            options,
            range,
            feedback,
            explanation: feedback.map(|_| step.explanation.clone()),
            action,
        }
    }
}

fn marker(idx: usize, selected: Option<usize>, is_correct: bool, revealed: bool) -> OptionMarker {
    let is_selected = selected == Some(idx);
    if revealed {
        if is_correct {
            OptionMarker::Correct
        } else if is_selected {
            OptionMarker::Wrong
        } else {
            OptionMarker::Plain
        }
    } else if is_selected {
        OptionMarker::Selected
    } else {
        OptionMarker::Plain
    }
}
