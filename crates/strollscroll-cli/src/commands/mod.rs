pub mod config;
pub mod minigame;
pub mod onboarding;
pub mod progress;
pub mod restrictions;
pub mod steps;

use chrono::{DateTime, FixedOffset, Local};
use rand_pcg::Mcg128Xsl64;
use strollscroll_core::gamification::dispatch;
use strollscroll_core::{
    rng_from_seed, Database, GamificationEngine, GamificationEvent, NotificationSink,
};

pub type Engine = GamificationEngine<Database, Mcg128Xsl64>;

/// Wall clock with the device's current UTC offset.
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

pub fn open_engine(
    seed: Option<u64>,
    now: &DateTime<FixedOffset>,
) -> Result<Engine, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(GamificationEngine::open(db, rng_from_seed(seed), now)?)
}

/// Prints each notification as a toast line on stdout.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, event: &GamificationEvent) {
        println!("{}", event.message());
    }
}

/// Print one line per event, or the events as a JSON array.
pub fn print_events(
    events: &[GamificationEvent],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(events)?);
    } else {
        dispatch(events, &mut ConsoleSink);
    }
    Ok(())
}
