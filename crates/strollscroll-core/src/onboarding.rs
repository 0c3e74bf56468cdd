//! First-run questionnaire and the "life on screen" projection it feeds.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{load_record, save_record, KeyValueStore};

pub const ONBOARDING_KEY: &str = "strollscroll-onboarding";

/// Assumed lifespan in years for the projection.
pub const LIFESPAN_YEARS: u32 = 85;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub age: u32,
    pub daily_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub completed: bool,
}

/// Projected screen time over the remaining lifespan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeOnScreen {
    pub years: f64,
    pub total_hours: u64,
    pub is_valid: bool,
    pub at_lifespan: bool,
}

impl OnboardingProfile {
    /// # Errors
    /// Returns an error only if the store cannot be read.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(load_record(store, ONBOARDING_KEY)?.unwrap_or_default())
    }

    /// # Errors
    /// Returns an error if the record cannot be written.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_record(store, ONBOARDING_KEY, self)
    }

    pub fn complete(&mut self, age: u32, daily_hours: f64, goal: Option<String>) {
        self.age = age;
        self.daily_hours = daily_hours;
        self.goal = goal;
        self.completed = true;
    }

    /// Show onboarding again, keeping the previous answers.
    pub fn reset(&mut self) {
        self.completed = false;
    }

    pub fn life_on_screen(&self) -> LifeOnScreen {
        let invalid = LifeOnScreen {
            years: 0.0,
            total_hours: 0,
            is_valid: false,
            at_lifespan: false,
        };
        if self.age == 0 || self.daily_hours.is_nan() || self.daily_hours <= 0.0 {
            return invalid;
        }
        if self.age >= LIFESPAN_YEARS {
            return LifeOnScreen {
                is_valid: true,
                at_lifespan: true,
                ..invalid
            };
        }

        let remaining_years = f64::from(LIFESPAN_YEARS - self.age);
        let total_hours = remaining_years * 365.0 * self.daily_hours;
        let years = total_hours / 24.0 / 365.0;
        LifeOnScreen {
            years: (years * 10.0).round() / 10.0,
            total_hours: total_hours.round() as u64,
            is_valid: true,
            at_lifespan: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn profile(age: u32, daily_hours: f64) -> OnboardingProfile {
        let mut p = OnboardingProfile::default();
        p.complete(age, daily_hours, None);
        p
    }

    #[test]
    fn projection_for_typical_user() {
        let life = profile(25, 4.0).life_on_screen();
        assert!(life.is_valid);
        assert_eq!(life.total_hours, 87_600);
        assert!((life.years - 10.0).abs() < 1e-9);
    }

    #[test]
    fn projection_rounds_years_to_one_decimal() {
        let life = profile(30, 3.5).life_on_screen();
        // 55 * 365 * 3.5 = 70262.5 hours = 8.02 years
        assert_eq!(life.total_hours, 70_263);
        assert!((life.years - 8.0).abs() < 1e-9);
    }

    #[test]
    fn missing_answers_are_invalid() {
        assert!(!profile(0, 4.0).life_on_screen().is_valid);
        assert!(!profile(30, 0.0).life_on_screen().is_valid);
        assert!(!profile(30, -2.0).life_on_screen().is_valid);
        assert!(!profile(30, f64::NAN).life_on_screen().is_valid);
    }

    #[test]
    fn at_or_past_lifespan() {
        let life = profile(90, 2.0).life_on_screen();
        assert!(life.is_valid);
        assert!(life.at_lifespan);
        assert_eq!(life.total_hours, 0);
    }

    #[test]
    fn reset_keeps_answers() {
        let mut p = profile(40, 2.0);
        p.goal = Some("read more".into());
        p.reset();
        assert!(!p.completed);
        assert_eq!(p.age, 40);
        assert_eq!(p.goal.as_deref(), Some("read more"));
    }

    #[test]
    fn persists_through_store() {
        let mut store = MemoryStore::new();
        profile(33, 5.0).save(&mut store).unwrap();
        let loaded = OnboardingProfile::load(&store).unwrap();
        assert!(loaded.completed);
        assert_eq!(loaded.age, 33);
    }
}
