//! # StrollScroll Core Library
//!
//! Business logic for StrollScroll, which turns the day's step count into
//! screen-time credits. Everything is available through the standalone CLI;
//! any richer front end is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Gamification**: a pure transition over an explicit state value that
//!   derives streaks, daily quests, weekly challenges, achievements and credits
//!   from a step reading. Clock and randomness are injected.
//! - **Storage**: one local key-value store (SQLite `kv` table) holding whole
//!   JSON records, and a TOML configuration file.
//! - **Simulator**: a fixed-interval random step source standing in for a
//!   pedometer.
//!
//! ## Key Components
//!
//! - [`GamificationEngine`]: store-backed owner of the gamification state
//! - [`apply_steps_update`]: the pure evaluation pass
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod gamification;
pub mod minigames;
pub mod onboarding;
pub mod restrictions;
pub mod screen_time;
pub mod simulator;
pub mod storage;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use gamification::{
    apply_steps_update, Achievement, AchievementCondition, DailyQuest, GamificationEngine,
    GamificationEvent, GamificationState, NotificationSink, WeeklyChallenge,
};
pub use minigames::{MiniGame, MinigameState};
pub use onboarding::{LifeOnScreen, OnboardingProfile};
pub use restrictions::{AppRestriction, AppRestrictions};
pub use screen_time::ScreenTimeBalance;
pub use simulator::{rng_from_seed, StepSimulator};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
