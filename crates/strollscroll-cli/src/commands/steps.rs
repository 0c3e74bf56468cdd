use clap::Subcommand;
use strollscroll_core::{rng_from_seed, Config, StepSimulator};
use tracing::debug;

use super::{now, open_engine, print_events};

#[derive(Subcommand)]
pub enum StepsAction {
    /// Record today's step count and evaluate rewards
    Record {
        /// Steps taken today so far
        count: u32,
        /// Daily goal (defaults to goal.daily_goal)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        goal: Option<u32>,
        /// Seed for quest and bonus rolls
        #[arg(long)]
        seed: Option<u64>,
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the step simulator and feed every reading to the engine
    Simulate {
        /// Number of simulator intervals to run
        #[arg(long, default_value = "100")]
        ticks: usize,
        /// Starting count (defaults to simulator.starting_steps)
        #[arg(long)]
        from: Option<u32>,
        /// Seed for the simulator and the engine
        #[arg(long)]
        seed: Option<u64>,
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StepsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let now = now();

    match action {
        StepsAction::Record {
            count,
            goal,
            seed,
            json,
        } => {
            let goal = goal.unwrap_or(config.goal.daily_goal);
            let mut engine = open_engine(seed, &now)?;
            let events = engine.on_steps_changed(count, goal, &now)?;
            print_events(&events, json)?;
            if !json {
                let state = engine.state();
                println!(
                    "steps: {count}/{goal}  streak: {}  credits: {}",
                    state.current_streak, state.total_credits
                );
            }
        }
        StepsAction::Simulate {
            ticks,
            from,
            seed,
            json,
        } => {
            let goal = config.goal.daily_goal;
            let mut sim_config = config.simulator.clone();
            if let Some(from) = from {
                sim_config.starting_steps = from;
            }
            let mut simulator = StepSimulator::new(sim_config, goal, rng_from_seed(seed));
            let mut engine = open_engine(seed.map(|s| s.wrapping_add(1)), &now)?;

            let mut events = Vec::new();
            for reading in simulator.run_ticks(ticks) {
                events.extend(engine.on_steps_changed(reading, goal, &now)?);
            }
            debug!(ticks, steps = simulator.steps(), "simulation finished");

            print_events(&events, json)?;
            if !json {
                println!("steps: {}/{goal}", simulator.steps());
            }
        }
    }
    Ok(())
}
