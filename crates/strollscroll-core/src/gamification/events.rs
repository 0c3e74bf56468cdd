use serde::{Deserialize, Serialize};

/// One user-facing notification per completed transition in a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GamificationEvent {
    QuestCompleted {
        quest_id: String,
        reward: u32,
    },
    ChallengeCompleted {
        reward: u32,
    },
    StreakBonus {
        streak: u32,
        credits: u32,
    },
    AchievementUnlocked {
        id: String,
        title: String,
        reward: u32,
    },
    /// Daily surprise roll came up; shown once as a dialog.
    SurpriseBonus {
        credits: u32,
    },
}

impl GamificationEvent {
    /// Credits granted by the transition this event reports.
    pub fn credits(&self) -> u32 {
        match self {
            GamificationEvent::QuestCompleted { reward, .. }
            | GamificationEvent::ChallengeCompleted { reward }
            | GamificationEvent::AchievementUnlocked { reward, .. } => *reward,
            GamificationEvent::StreakBonus { credits, .. }
            | GamificationEvent::SurpriseBonus { credits } => *credits,
        }
    }

    /// Human-readable toast text.
    pub fn message(&self) -> String {
        match self {
            GamificationEvent::QuestCompleted { reward, .. } => {
                format!("🎯 Daily Quest Complete! +{reward} credits")
            }
            GamificationEvent::ChallengeCompleted { reward } => {
                format!("🏆 Weekly Challenge Complete! +{reward} credits")
            }
            GamificationEvent::StreakBonus { streak, credits } => {
                format!("🔥 {streak}-Day Streak Bonus! +{credits} credits")
            }
            GamificationEvent::AchievementUnlocked { title, reward, .. } => {
                format!("🎉 Achievement Unlocked: {title}! +{reward} credits")
            }
            GamificationEvent::SurpriseBonus { credits } => {
                format!("🎁 Surprise Bonus! +{credits} credits")
            }
        }
    }
}

/// Receiver of fire-and-forget notifications.
pub trait NotificationSink {
    fn notify(&mut self, event: &GamificationEvent);
}

/// Sink that records events, mostly for tests.
impl NotificationSink for Vec<GamificationEvent> {
    fn notify(&mut self, event: &GamificationEvent) {
        self.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_mention_reward() {
        let event = GamificationEvent::StreakBonus {
            streak: 5,
            credits: 15,
        };
        assert_eq!(event.message(), "🔥 5-Day Streak Bonus! +15 credits");
        assert_eq!(event.credits(), 15);
    }

    #[test]
    fn serializes_with_type_tag() {
        let event = GamificationEvent::ChallengeCompleted { reward: 50 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ChallengeCompleted");
        assert_eq!(json["reward"], 50);
    }
}
