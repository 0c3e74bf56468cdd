//! Mini-game score to credit tables and the once-a-day play gate.

use std::str::FromStr;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::gamification::GamificationEngine;
use crate::storage::{load_record, save_record, KeyValueStore};

pub const MINIGAMES_KEY: &str = "strollscroll-minigames";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiniGame {
    /// Catch falling footprints; limited to one play per day.
    StepCatcher,
    StepRace,
}

impl MiniGame {
    /// Credits earned for `score`.
    pub fn credits_for(&self, score: u32) -> u32 {
        match self {
            MiniGame::StepCatcher => match score {
                30.. => 15,
                20..=29 => 10,
                10..=19 => 5,
                _ => 0,
            },
            MiniGame::StepRace => match score {
                1500.. => 20,
                800..=1499 => 10,
                300..=799 => 5,
                _ => 0,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MiniGame::StepCatcher => "Step Catcher",
            MiniGame::StepRace => "Step Race",
        }
    }
}

impl FromStr for MiniGame {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catcher" | "step_catcher" => Ok(MiniGame::StepCatcher),
            "race" | "step_race" => Ok(MiniGame::StepRace),
            other => Err(ValidationError::UnknownGame(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinigameState {
    pub step_catcher_played: bool,
    pub last_play_date: NaiveDate,
}

impl MinigameState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step_catcher_played: false,
            last_play_date: today,
        }
    }

    /// Load the record for `today`, starting over if it is from another day.
    ///
    /// # Errors
    /// Returns an error only if the store cannot be read.
    pub fn load(store: &dyn KeyValueStore, today: NaiveDate) -> Result<Self> {
        let state: Option<Self> = load_record(store, MINIGAMES_KEY)?;
        Ok(match state {
            Some(state) if state.last_play_date == today => state,
            _ => Self::new(today),
        })
    }

    /// # Errors
    /// Returns an error if the record cannot be written.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_record(store, MINIGAMES_KEY, self)
    }

    pub fn can_play(&self, game: MiniGame) -> bool {
        match game {
            MiniGame::StepCatcher => !self.step_catcher_played,
            MiniGame::StepRace => true,
        }
    }

    /// Record a finished game and return the credits it earned.
    ///
    /// # Errors
    /// Returns [`ValidationError::AlreadyPlayed`] if the daily play is used up.
    pub fn finish(&mut self, game: MiniGame, score: u32) -> Result<u32, ValidationError> {
        if !self.can_play(game) {
            return Err(ValidationError::AlreadyPlayed(game.name().to_string()));
        }
        if game == MiniGame::StepCatcher {
            self.step_catcher_played = true;
        }
        Ok(game.credits_for(score))
    }
}

/// Settle a finished game: credit the reward, then mark the play as used.
///
/// If crediting fails the play is not recorded, so the game can be retried.
///
/// # Errors
/// Returns [`ValidationError::AlreadyPlayed`] if the daily play is used up, or
/// a storage error if either record cannot be written.
pub fn play<S: KeyValueStore, R: Rng>(
    engine: &mut GamificationEngine<S, R>,
    game: MiniGame,
    score: u32,
    today: NaiveDate,
) -> Result<u32> {
    let mut games = MinigameState::load(engine.store(), today)?;
    let earned = games.finish(game, score)?;
    engine.award_credits(earned)?;
    games.save(engine.store_mut())?;
    Ok(earned)
}
