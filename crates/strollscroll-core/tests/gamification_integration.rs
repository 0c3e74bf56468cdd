//! Integration tests for the store-backed gamification engine.

use chrono::{DateTime, FixedOffset, TimeZone};
use strollscroll_core::gamification::{self, STORAGE_KEY};
use strollscroll_core::storage::SimulatorConfig;
use strollscroll_core::{
    rng_from_seed, Database, GamificationEngine, GamificationEvent, GamificationState,
    KeyValueStore, MemoryStore, MiniGame, MinigameState, StepSimulator,
};

const GOAL: u32 = 10_000;

fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, day, hour, 0, 0)
        .unwrap()
}

#[test]
fn test_simulated_day_reaches_goal_once() {
    let db = Database::open_memory().unwrap();
    let now = at(14, 8);
    let mut engine = GamificationEngine::open(db, rng_from_seed(Some(11)), &now).unwrap();

    let config = SimulatorConfig {
        starting_steps: 9_900,
        ..Default::default()
    };
    let mut simulator = StepSimulator::new(config, GOAL, rng_from_seed(Some(12)));

    let mut streak_events = 0;
    for reading in simulator.run_ticks(400) {
        let events = engine.on_steps_changed(reading, GOAL, &now).unwrap();
        streak_events += events
            .iter()
            .filter(|e| matches!(e, GamificationEvent::StreakBonus { .. }))
            .count();
    }

    let state = engine.state();
    assert_eq!(state.current_streak, 1);
    assert_eq!(state.days_met_goal, 1);
    assert_eq!(streak_events, 0);
    assert!(state.daily_quest.as_ref().unwrap().completed);
    assert_eq!(state.total_steps_all_time, simulator.steps());
    assert!(state.achievement("ten_k").unwrap().unlocked);
}

#[test]
fn test_week_of_walking_across_sunday() {
    let mut store = MemoryStore::new();
    let mut credits_seen = 0;

    // Monday 12th through Sunday 18th, reopening the engine every day
    for day in 12..=18 {
        let now = at(day, 20);
        let mut engine =
            GamificationEngine::open(store, rng_from_seed(Some(u64::from(day))), &now).unwrap();
        engine.on_steps_changed(GOAL + 1_000, GOAL, &now).unwrap();

        let state = engine.state();
        assert!(state.total_credits >= credits_seen, "credits decreased");
        assert!(state.longest_streak >= state.current_streak);
        credits_seen = state.total_credits;
        store = engine.into_store();
    }

    let raw = store.get(STORAGE_KEY).unwrap().unwrap();
    let state = GamificationState::from_json(&raw).unwrap();
    assert_eq!(state.current_streak, 7);
    assert_eq!(state.longest_streak, 7);
    assert_eq!(state.days_met_goal, 7);
    assert!(state.achievement("week_warrior").unwrap().unlocked);
    assert_eq!(
        state.weekly_challenge.week_start,
        chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    );
    assert_eq!(state.weekly_challenge.current, GOAL + 1_000);
}

#[test]
fn test_streak_bonus_ladder() {
    let mut state = GamificationState::fresh(at(1, 9).date_naive(), &mut rng_from_seed(Some(3)));
    let mut rng = rng_from_seed(Some(4));
    let mut bonuses = Vec::new();

    for day in 1..=8 {
        let events =
            gamification::apply_steps_update(&mut state, GOAL, GOAL, &at(day, 21), &mut rng);
        for event in events {
            if let GamificationEvent::StreakBonus { streak, credits } = event {
                bonuses.push((streak, credits));
            }
        }
    }

    assert_eq!(
        bonuses,
        vec![(3, 10), (4, 10), (5, 15), (6, 15), (7, 20), (8, 20)]
    );
}

#[test]
fn test_minigame_credits_flow_into_total() {
    let now = at(17, 10);
    let mut engine =
        GamificationEngine::open(MemoryStore::new(), rng_from_seed(Some(5)), &now).unwrap();
    let before = engine.state().total_credits;

    let mut games = MinigameState::load(engine.store(), now.date_naive()).unwrap();
    let earned = games.finish(MiniGame::StepCatcher, 31).unwrap();
    games.save(engine.store_mut()).unwrap();
    engine.award_credits(earned).unwrap();

    assert_eq!(engine.state().total_credits, before + 15);
    let reloaded = MinigameState::load(engine.store(), now.date_naive()).unwrap();
    assert!(!reloaded.can_play(MiniGame::StepCatcher));
}

#[test]
fn test_corrupt_database_record_starts_fresh() {
    let mut db = Database::open_memory().unwrap();
    db.set(STORAGE_KEY, "not even json").unwrap();

    let now = at(17, 10);
    let engine = GamificationEngine::open(db, rng_from_seed(Some(1)), &now).unwrap();
    assert_eq!(engine.state().total_credits, 0);
    assert_eq!(
        engine.state().daily_quest.as_ref().unwrap().date,
        now.date_naive()
    );
}
