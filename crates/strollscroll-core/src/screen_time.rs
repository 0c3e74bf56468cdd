//! Steps to screen-time conversion.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Earned screen time split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenTimeBalance {
    pub total_minutes: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl ScreenTimeBalance {
    pub fn from_minutes(total_minutes: u32) -> Self {
        Self {
            total_minutes,
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }
}

/// Whole minutes earned by `steps` at `steps_per_minute`.
///
/// # Errors
/// Returns an error if the rate is zero.
pub fn screen_time_minutes(steps: u32, steps_per_minute: u32) -> Result<u32, ValidationError> {
    if steps_per_minute == 0 {
        return Err(ValidationError::InvalidValue {
            field: "steps_per_minute".into(),
            message: "must be greater than zero".into(),
        });
    }
    Ok(steps / steps_per_minute)
}

/// Balance earned by `steps` at `steps_per_minute`.
///
/// # Errors
/// Returns an error if the rate is zero.
pub fn balance(steps: u32, steps_per_minute: u32) -> Result<ScreenTimeBalance, ValidationError> {
    screen_time_minutes(steps, steps_per_minute).map(ScreenTimeBalance::from_minutes)
}
