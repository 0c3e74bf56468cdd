//! Daily quests and weekly challenges.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const QUEST_TARGETS: [u32; 5] = [500, 800, 1000, 1200, 1500];
pub const QUEST_REWARD: u32 = 15;

const QUEST_TEMPLATES: [&str; 4] = [
    "Take {target} more steps today",
    "Walk {target} steps before sunset",
    "Hit {target} steps to complete this quest",
    "Reach {target} additional steps",
];

pub const WEEKLY_TARGET: u32 = 50_000;
pub const WEEKLY_REWARD: u32 = 50;
const WEEKLY_DESCRIPTION: &str = "Walk 50,000 steps this week";

/// A single-day step objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuest {
    pub id: String,
    pub description: String,
    pub target: u32,
    pub current: u32,
    pub reward: u32,
    pub completed: bool,
    pub date: NaiveDate,
}

impl DailyQuest {
    /// Draw a fresh quest for `date`.
    pub fn generate<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> Self {
        let target = QUEST_TARGETS[rng.gen_range(0..QUEST_TARGETS.len())];
        let template = QUEST_TEMPLATES[rng.gen_range(0..QUEST_TEMPLATES.len())];
        Self {
            id: format!("quest_{}", date.format("%Y-%m-%d")),
            description: template.replace("{target}", &target.to_string()),
            target,
            current: 0,
            reward: QUEST_REWARD,
            completed: false,
            date,
        }
    }

    /// Progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        progress_ratio(self.current, self.target)
    }
}

/// A week-scoped step objective with a fixed target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyChallenge {
    pub description: String,
    pub target: u32,
    pub current: u32,
    pub reward: u32,
    pub completed: bool,
    pub week_start: NaiveDate,
}

impl WeeklyChallenge {
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            description: WEEKLY_DESCRIPTION.to_string(),
            target: WEEKLY_TARGET,
            current: 0,
            reward: WEEKLY_REWARD,
            completed: false,
            week_start,
        }
    }

    pub fn progress(&self) -> f64 {
        progress_ratio(self.current, self.target)
    }
}

fn progress_ratio(current: u32, target: u32) -> f64 {
    if target == 0 {
        return 1.0;
    }
    (f64::from(current) / f64::from(target)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn generated_quest_is_fresh_and_dated() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        let quest = DailyQuest::generate(date(), &mut rng);
        assert_eq!(quest.id, "quest_2026-10-17");
        assert_eq!(quest.date, date());
        assert_eq!(quest.current, 0);
        assert_eq!(quest.reward, QUEST_REWARD);
        assert!(!quest.completed);
        assert!(QUEST_TARGETS.contains(&quest.target));
        assert!(quest.description.contains(&quest.target.to_string()));
        assert!(!quest.description.contains("{target}"));
    }

    #[test]
    fn same_seed_draws_same_quest() {
        let a = DailyQuest::generate(date(), &mut Mcg128Xsl64::seed_from_u64(42));
        let b = DailyQuest::generate(date(), &mut Mcg128Xsl64::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn every_target_is_reachable() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(DailyQuest::generate(date(), &mut rng).target);
        }
        assert_eq!(seen.len(), QUEST_TARGETS.len());
    }

    #[test]
    fn weekly_challenge_defaults() {
        let challenge = WeeklyChallenge::new(date());
        assert_eq!(challenge.target, 50_000);
        assert_eq!(challenge.reward, 50);
        assert_eq!(challenge.current, 0);
        assert!(!challenge.completed);
    }

    #[test]
    fn progress_is_capped() {
        let mut challenge = WeeklyChallenge::new(date());
        challenge.current = 25_000;
        assert!((challenge.progress() - 0.5).abs() < f64::EPSILON);
        challenge.current = 80_000;
        assert!((challenge.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn quest_serializes_camel_case_with_iso_date() {
        let quest = DailyQuest::generate(date(), &mut Mcg128Xsl64::seed_from_u64(3));
        let json = serde_json::to_value(&quest).unwrap();
        assert_eq!(json["date"], "2026-10-17");
        assert!(json.get("completed").is_some());
        let challenge = serde_json::to_value(WeeklyChallenge::new(date())).unwrap();
        assert_eq!(challenge["weekStart"], "2026-10-17");
    }
}
