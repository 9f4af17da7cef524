use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storage::repository::QuestCompletion;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RewardSettingsError {
    #[error("xp per quest must be > 0")]
    InvalidXpPerQuest,
}

/// How completed quests translate into rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRewardSettings")]
pub struct RewardSettings {
    xp_per_quest: u32,
}

impl RewardSettings {
    /// # Errors
    ///
    /// Returns `RewardSettingsError::InvalidXpPerQuest` if `xp_per_quest` is zero.
    pub fn new(xp_per_quest: u32) -> Result<Self, RewardSettingsError> {
        if xp_per_quest == 0 {
            return Err(RewardSettingsError::InvalidXpPerQuest);
        }
        Ok(Self { xp_per_quest })
    }

    #[must_use]
    pub fn xp_per_quest(&self) -> u32 {
        self.xp_per_quest
    }
}

#[derive(Deserialize)]
struct RawRewardSettings {
    xp_per_quest: u32,
}

impl TryFrom<RawRewardSettings> for RewardSettings {
    type Error = RewardSettingsError;

    fn try_from(raw: RawRewardSettings) -> Result<Self, Self::Error> {
        Self::new(raw.xp_per_quest)
    }
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self { xp_per_quest: 100 }
    }
}

/// Aggregated learning progress, useful for UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStats {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
    pub streak_days: u32,
    pub total_xp: u64,
}

impl ProgressStats {
    #[must_use]
    pub fn compute(
        completions: &[QuestCompletion],
        total: usize,
        today: NaiveDate,
        rewards: RewardSettings,
    ) -> Self {
        let completed = completions.len();
        let percent = if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ratio = completed as f64 / total as f64;
            ratio * 100.0
        };
        let total_xp = u64::try_from(completed)
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::from(rewards.xp_per_quest()));

        Self {
            completed,
            total,
            percent,
            streak_days: streak_days(completions, today),
            total_xp,
        }
    }
}

/// Consecutive UTC days with at least one completion, ending today.
///
/// A streak that ended yesterday still counts until today is over.
fn streak_days(completions: &[QuestCompletion], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = completions
        .iter()
        .map(|c| c.completed_at.date_naive())
        .collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quest_core::model::QuestId;
    use quest_core::time::fixed_now;

    #[test]
    fn deserialized_rewards_are_validated() {
        let rewards: RewardSettings = serde_json::from_str(r#"{"xp_per_quest":40}"#).unwrap();
        assert_eq!(rewards.xp_per_quest(), 40);
        assert!(serde_json::from_str::<RewardSettings>(r#"{"xp_per_quest":0}"#).is_err());
    }

    fn completion(id: u64, days_ago: i64) -> QuestCompletion {
        QuestCompletion {
            quest_id: QuestId::new(id),
            completed_at: fixed_now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn counts_xp_and_percent() {
        let stats = ProgressStats::compute(
            &[completion(1, 0), completion(2, 0)],
            4,
            fixed_now().date_naive(),
            RewardSettings::default(),
        );
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.total, 4);
        assert!((stats.percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_xp, 200);
        assert_eq!(stats.streak_days, 1);
    }

    #[test]
    fn empty_catalog_has_zero_percent() {
        let stats =
            ProgressStats::compute(&[], 0, fixed_now().date_naive(), RewardSettings::default());
        assert_eq!(stats.percent, 0.0);
        assert_eq!(stats.streak_days, 0);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let today = fixed_now().date_naive();
        let completions = [completion(1, 1), completion(2, 2), completion(3, 4)];
        assert_eq!(streak_days(&completions, today), 2);

        let stale = [completion(1, 2), completion(2, 3)];
        assert_eq!(streak_days(&stale, today), 0);
    }

    #[test]
    fn reward_settings_reject_zero() {
        assert_eq!(
            RewardSettings::new(0).unwrap_err(),
            RewardSettingsError::InvalidXpPerQuest
        );
        assert_eq!(RewardSettings::new(50).unwrap().xp_per_quest(), 50);
    }
}
