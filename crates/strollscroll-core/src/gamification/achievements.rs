//! Achievement catalog and unlock conditions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::GamificationState;

/// Closed set of unlock conditions, evaluated against a state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum AchievementCondition {
    StreakAtLeast(u32),
    TotalStepsAtLeast(u32),
    WeeklyStepsAtLeast(u32),
    DaysMetGoalAtLeast(u32),
}

impl AchievementCondition {
    pub fn is_met(&self, state: &GamificationState) -> bool {
        match *self {
            AchievementCondition::StreakAtLeast(n) => state.current_streak >= n,
            AchievementCondition::TotalStepsAtLeast(n) => state.total_steps_all_time >= n,
            AchievementCondition::WeeklyStepsAtLeast(n) => state.weekly_steps >= n,
            AchievementCondition::DaysMetGoalAtLeast(n) => state.days_met_goal >= n,
        }
    }
}

/// An achievement as tracked in the persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub reward: u32,
    pub condition: AchievementCondition,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

struct AchievementDef {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    reward: u32,
    condition: AchievementCondition,
}

const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "first_steps",
        title: "First Steps",
        description: "Walk 1,000 steps",
        icon: "👣",
        reward: 5,
        condition: AchievementCondition::TotalStepsAtLeast(1_000),
    },
    AchievementDef {
        id: "goal_getter",
        title: "Goal Getter",
        description: "Reach your daily goal for the first time",
        icon: "🎯",
        reward: 10,
        condition: AchievementCondition::DaysMetGoalAtLeast(1),
    },
    AchievementDef {
        id: "ten_k",
        title: "10K Club",
        description: "Walk 10,000 steps in a day",
        icon: "🏃",
        reward: 20,
        condition: AchievementCondition::TotalStepsAtLeast(10_000),
    },
    AchievementDef {
        id: "on_fire",
        title: "On Fire",
        description: "Keep a 3-day streak",
        icon: "🔥",
        reward: 10,
        condition: AchievementCondition::StreakAtLeast(3),
    },
    AchievementDef {
        id: "week_warrior",
        title: "Week Warrior",
        description: "Keep a 7-day streak",
        icon: "⚔️",
        reward: 25,
        condition: AchievementCondition::StreakAtLeast(7),
    },
    AchievementDef {
        id: "marathoner",
        title: "Marathoner",
        description: "Walk 15,000 steps in a day",
        icon: "🏅",
        reward: 30,
        condition: AchievementCondition::TotalStepsAtLeast(15_000),
    },
    AchievementDef {
        id: "weekly_25k",
        title: "Halfway Hero",
        description: "Log 25,000 steps toward the weekly challenge",
        icon: "🌗",
        reward: 15,
        condition: AchievementCondition::WeeklyStepsAtLeast(25_000),
    },
    AchievementDef {
        id: "consistent",
        title: "Consistency King",
        description: "Reach your daily goal on 10 different days",
        icon: "📅",
        reward: 30,
        condition: AchievementCondition::DaysMetGoalAtLeast(10),
    },
    AchievementDef {
        id: "unstoppable",
        title: "Unstoppable",
        description: "Keep a 30-day streak",
        icon: "👑",
        reward: 100,
        condition: AchievementCondition::StreakAtLeast(30),
    },
];

impl From<&AchievementDef> for Achievement {
    fn from(def: &AchievementDef) -> Self {
        Self {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            reward: def.reward,
            condition: def.condition,
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// The full catalog, all locked, in definition order.
pub fn catalog() -> Vec<Achievement> {
    CATALOG.iter().map(Achievement::from).collect()
}

/// Rebuild `persisted` against the current catalog.
///
/// Definitions always come from the catalog; only the unlock status of ids
/// the catalog still knows survives. Catalog order is restored.
pub fn reconcile(persisted: &[Achievement]) -> Vec<Achievement> {
    CATALOG
        .iter()
        .map(|def| {
            let mut achievement = Achievement::from(def);
            if let Some(saved) = persisted.iter().find(|a| a.id == def.id && a.unlocked) {
                achievement.unlocked = true;
                achievement.unlocked_at = saved.unlocked_at;
            }
            achievement
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let achievements = catalog();
        for (i, a) in achievements.iter().enumerate() {
            assert!(
                achievements[i + 1..].iter().all(|b| b.id != a.id),
                "duplicate id {}",
                a.id
            );
        }
    }

    #[test]
    fn catalog_starts_locked() {
        assert!(catalog().iter().all(|a| !a.unlocked && a.unlocked_at.is_none()));
    }

    #[test]
    fn condition_serializes_tagged() {
        let json = serde_json::to_string(&AchievementCondition::StreakAtLeast(3)).unwrap();
        assert_eq!(json, r#"{"kind":"streakAtLeast","value":3}"#);
    }

    #[test]
    fn reconcile_keeps_unlocks_and_drops_unknown_ids() {
        let mut persisted = catalog();
        persisted.reverse();
        let on_fire = persisted.iter_mut().find(|a| a.id == "on_fire").unwrap();
        on_fire.unlocked = true;
        on_fire.unlocked_at = Some(Utc::now());
        let mut stale = catalog().remove(0);
        stale.id = "retired".into();
        stale.unlocked = true;
        persisted.push(stale);

        let rebuilt = reconcile(&persisted);
        assert_eq!(rebuilt.len(), CATALOG.len());
        assert_eq!(rebuilt[0].id, "first_steps");
        assert!(rebuilt.iter().find(|a| a.id == "on_fire").unwrap().unlocked);
        assert_eq!(rebuilt.iter().filter(|a| a.unlocked).count(), 1);
    }
}
