mod flow;
mod progress;
mod service;

// Public API of the quest subsystem.
pub use crate::error::QuestError;
pub use flow::{QuestFlow, QuestStage};
pub use progress::{ProgressStats, RewardSettings, RewardSettingsError};
pub use service::{QuestListItem, QuestService};
