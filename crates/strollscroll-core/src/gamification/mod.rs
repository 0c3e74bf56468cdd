//! Streaks, daily quests, weekly challenges and achievements.

mod achievements;
pub mod calendar;
mod engine;
mod events;
mod quests;
mod state;

pub use achievements::{catalog, Achievement, AchievementCondition};
pub use engine::{
    apply_steps_update, dispatch, streak_bonus, GamificationEngine, STORAGE_KEY,
    SURPRISE_BONUS_CHANCE, SURPRISE_BONUS_CREDITS,
};
pub use events::{GamificationEvent, NotificationSink};
pub use quests::{
    DailyQuest, WeeklyChallenge, QUEST_REWARD, QUEST_TARGETS, WEEKLY_REWARD, WEEKLY_TARGET,
};
pub use state::GamificationState;
