//! Step-driven progress and reward computation.
//!
//! [`apply_steps_update`] is a pure transition over an explicit
//! [`GamificationState`]: the clock and random source are passed in and the
//! caller decides what to do with the returned events. [`GamificationEngine`]
//! wraps it with load/save against a [`KeyValueStore`].

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use super::calendar;
use super::events::{GamificationEvent, NotificationSink};
use super::quests::{DailyQuest, WeeklyChallenge};
use super::state::GamificationState;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Key of the gamification record in the local store.
pub const STORAGE_KEY: &str = "strollscroll_gamification";

pub const SURPRISE_BONUS_CHANCE: f64 = 0.05;
pub const SURPRISE_BONUS_CREDITS: u32 = 10;

/// Bonus credits for reaching a streak of `streak` days.
pub fn streak_bonus(streak: u32) -> u32 {
    match streak {
        7.. => 20,
        5..=6 => 15,
        3..=4 => 10,
        _ => 0,
    }
}

impl GamificationState {
    fn credit(&mut self, amount: u32) {
        self.total_credits = self.total_credits.saturating_add(amount);
    }

    /// Replace the weekly challenge and daily quest if their period has passed.
    pub fn roll_over<R: Rng + ?Sized>(&mut self, today: NaiveDate, rng: &mut R) {
        let week_start = calendar::week_start(today);
        if self.weekly_challenge.week_start != week_start {
            debug!(%week_start, "starting new weekly challenge");
            self.weekly_challenge = WeeklyChallenge::new(week_start);
            self.weekly_steps = 0;
        }

        let stale = self
            .daily_quest
            .as_ref()
            .map_or(true, |quest| quest.date != today);
        if stale {
            let quest = DailyQuest::generate(today, rng);
            debug!(quest_id = %quest.id, target = quest.target, "generated daily quest");
            self.daily_quest = Some(quest);
        }
    }

    /// Track today's steps on the active quest, completing it at most once.
    pub fn advance_quest(&mut self, steps: u32, events: &mut Vec<GamificationEvent>) {
        let Some(quest) = self.daily_quest.as_mut() else {
            return;
        };
        if quest.completed {
            return;
        }
        quest.current = steps;
        if quest.current >= quest.target {
            quest.completed = true;
            let reward = quest.reward;
            let quest_id = quest.id.clone();
            info!(%quest_id, reward, "daily quest completed");
            self.credit(reward);
            events.push(GamificationEvent::QuestCompleted { quest_id, reward });
        }
    }

    /// Track steps on the weekly challenge, completing it at most once.
    pub fn advance_weekly_challenge(&mut self, steps: u32, events: &mut Vec<GamificationEvent>) {
        self.weekly_steps = steps;
        let challenge = &mut self.weekly_challenge;
        challenge.current = self.weekly_steps;
        if !challenge.completed && challenge.current >= challenge.target {
            challenge.completed = true;
            let reward = challenge.reward;
            info!(week_start = %challenge.week_start, reward, "weekly challenge completed");
            self.credit(reward);
            events.push(GamificationEvent::ChallengeCompleted { reward });
        }
    }

    /// Continue or restart the streak once per day when the goal is met.
    ///
    /// Returns `true` if this call recorded a goal day.
    pub fn evaluate_goal(
        &mut self,
        steps: u32,
        daily_goal: u32,
        today: NaiveDate,
        events: &mut Vec<GamificationEvent>,
    ) -> bool {
        if steps < daily_goal || self.last_goal_date == Some(today) {
            return false;
        }

        let previous = self.current_streak;
        self.current_streak = if self.last_goal_date == Some(calendar::yesterday(today)) {
            previous.saturating_add(1)
        } else {
            1
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_goal_date = Some(today);
        self.days_met_goal = self.days_met_goal.saturating_add(1);
        info!(
            streak = self.current_streak,
            previous, "daily goal met"
        );

        let credits = streak_bonus(self.current_streak);
        if credits > 0 {
            self.credit(credits);
            events.push(GamificationEvent::StreakBonus {
                streak: self.current_streak,
                credits,
            });
        }
        true
    }

    pub fn record_watermark(&mut self, steps: u32) {
        self.total_steps_all_time = self.total_steps_all_time.max(steps);
    }

    /// Unlock every locked achievement whose condition now holds.
    ///
    /// Rewards are summed over the scan and credited once at the end.
    pub fn evaluate_achievements(&mut self, now: DateTime<Utc>, events: &mut Vec<GamificationEvent>) {
        let newly_met: Vec<usize> = self
            .achievements
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.unlocked && a.condition.is_met(self))
            .map(|(i, _)| i)
            .collect();

        let mut earned = 0u32;
        for i in newly_met {
            let achievement = &mut self.achievements[i];
            achievement.unlocked = true;
            achievement.unlocked_at = Some(now);
            earned = earned.saturating_add(achievement.reward);
            info!(id = %achievement.id, reward = achievement.reward, "achievement unlocked");
            events.push(GamificationEvent::AchievementUnlocked {
                id: achievement.id.clone(),
                title: achievement.title.clone(),
                reward: achievement.reward,
            });
        }
        if earned > 0 {
            self.credit(earned);
        }
    }

    /// Roll the surprise bonus, at most once per calendar day.
    ///
    /// Returns `true` if the roll paid out.
    pub fn roll_daily_bonus<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        rng: &mut R,
        events: &mut Vec<GamificationEvent>,
    ) -> bool {
        if self.last_bonus_check == Some(today) {
            return false;
        }
        let hit = rng.gen::<f64>() < SURPRISE_BONUS_CHANCE;
        if hit {
            info!(%today, "surprise bonus awarded");
            self.credit(SURPRISE_BONUS_CREDITS);
            events.push(GamificationEvent::SurpriseBonus {
                credits: SURPRISE_BONUS_CREDITS,
            });
        }
        self.last_bonus_check = Some(today);
        hit
    }
}

/// Run one full evaluation pass for a new step reading.
///
/// Order: rollover, quest, weekly challenge, streak, watermark, achievements,
/// daily bonus. Returns the notifications for every transition that fired.
pub fn apply_steps_update<R: Rng + ?Sized>(
    state: &mut GamificationState,
    steps: u32,
    daily_goal: u32,
    now: &DateTime<FixedOffset>,
    rng: &mut R,
) -> Vec<GamificationEvent> {
    let today = calendar::today(now);
    let mut events = Vec::new();

    state.roll_over(today, rng);
    state.advance_quest(steps, &mut events);
    state.advance_weekly_challenge(steps, &mut events);
    state.evaluate_goal(steps, daily_goal, today, &mut events);
    state.record_watermark(steps);
    state.evaluate_achievements(now.with_timezone(&Utc), &mut events);
    state.roll_daily_bonus(today, rng, &mut events);

    debug!(steps, daily_goal, events = events.len(), "evaluated step update");
    events
}

/// Forward `events` to a notification sink in order.
pub fn dispatch(events: &[GamificationEvent], sink: &mut dyn NotificationSink) {
    for event in events {
        sink.notify(event);
    }
}

/// Store-backed owner of the gamification state.
///
/// Every mutating call writes the whole record back before returning.
pub struct GamificationEngine<S, R> {
    store: S,
    rng: R,
    state: GamificationState,
}

impl<S: KeyValueStore, R: Rng> GamificationEngine<S, R> {
    /// Load the persisted state, or start fresh if it is missing or corrupt.
    ///
    /// The loaded quest and challenge are rolled over to `now`'s day and week,
    /// so read-only callers never see a stale period.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn open(store: S, mut rng: R, now: &DateTime<FixedOffset>) -> Result<Self> {
        let today = calendar::today(now);
        let mut state = match store.get(STORAGE_KEY)? {
            Some(raw) => GamificationState::from_json(&raw).unwrap_or_else(|| {
                warn!(key = STORAGE_KEY, "corrupt gamification record, starting fresh");
                GamificationState::fresh(today, &mut rng)
            }),
            None => GamificationState::fresh(today, &mut rng),
        };
        state.roll_over(today, &mut rng);
        let mut engine = Self { store, rng, state };
        engine.persist()?;
        Ok(engine)
    }

    pub fn state(&self) -> &GamificationState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.state)?;
        self.store.set(STORAGE_KEY, &raw)
    }

    /// Apply a new step reading and persist the result.
    ///
    /// # Errors
    /// Returns an error if the updated state cannot be written.
    pub fn on_steps_changed(
        &mut self,
        steps: u32,
        daily_goal: u32,
        now: &DateTime<FixedOffset>,
    ) -> Result<Vec<GamificationEvent>> {
        let events = apply_steps_update(&mut self.state, steps, daily_goal, now, &mut self.rng);
        self.persist()?;
        Ok(events)
    }

    /// Run only the once-per-day surprise roll, e.g. when the app starts.
    ///
    /// # Errors
    /// Returns an error if the updated state cannot be written.
    pub fn check_daily_bonus(
        &mut self,
        now: &DateTime<FixedOffset>,
    ) -> Result<Option<GamificationEvent>> {
        let today = calendar::today(now);
        if self.state.last_bonus_check == Some(today) {
            return Ok(None);
        }
        let mut events = Vec::new();
        self.state.roll_daily_bonus(today, &mut self.rng, &mut events);
        self.persist()?;
        Ok(events.pop())
    }

    /// Credit rewards earned outside the step pass.
    ///
    /// # Errors
    /// Returns an error if the updated state cannot be written.
    pub fn award_credits(&mut self, amount: u32) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        self.state.add_credits(amount);
        self.persist()
    }

    /// Discard all progress and start over.
    ///
    /// # Errors
    /// Returns an error if the fresh state cannot be written.
    pub fn reset(&mut self, now: &DateTime<FixedOffset>) -> Result<()> {
        self.state = GamificationState::fresh(calendar::today(now), &mut self.rng);
        self.persist()
    }
}
