use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::achievements::{self, Achievement};
use super::calendar::{self, date_or_empty};
use super::quests::{DailyQuest, WeeklyChallenge};

/// The whole gamification aggregate, persisted as a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationState {
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(with = "date_or_empty")]
    pub last_goal_date: Option<NaiveDate>,
    pub total_credits: u32,
    pub achievements: Vec<Achievement>,
    pub daily_quest: Option<DailyQuest>,
    pub weekly_challenge: WeeklyChallenge,
    #[serde(with = "date_or_empty")]
    pub last_bonus_check: Option<NaiveDate>,
    /// Highest single-day reading seen, not a lifetime sum.
    pub total_steps_all_time: u32,
    /// Mirrors today's reading.
    pub weekly_steps: u32,
    pub days_met_goal: u32,
}

impl GamificationState {
    /// Zeroed state with a quest for `today` and a challenge for its week.
    pub fn fresh<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_goal_date: None,
            total_credits: 0,
            achievements: achievements::catalog(),
            daily_quest: Some(DailyQuest::generate(today, rng)),
            weekly_challenge: WeeklyChallenge::new(calendar::week_start(today)),
            last_bonus_check: None,
            total_steps_all_time: 0,
            weekly_steps: 0,
            days_met_goal: 0,
        }
    }

    /// Parse a persisted record, re-aligning achievements with the catalog.
    ///
    /// Returns `None` for anything that does not match the record shape.
    pub fn from_json(raw: &str) -> Option<Self> {
        let mut state: Self = serde_json::from_str(raw).ok()?;
        state.achievements = achievements::reconcile(&state.achievements);
        Some(state)
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Add externally earned credits (mini-games). Credits never decrease.
    pub fn add_credits(&mut self, amount: u32) {
        self.total_credits = self.total_credits.saturating_add(amount);
    }
}
