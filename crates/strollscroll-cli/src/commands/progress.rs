use clap::Subcommand;
use strollscroll_core::screen_time;
use strollscroll_core::Config;

use super::{now, open_engine, print_events};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Print the whole gamification state as JSON
    Status,
    /// Today's daily quest
    Quest,
    /// This week's challenge
    Challenge,
    /// List achievements
    Achievements {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Screen time earned by a step count
    Balance {
        /// Steps taken today
        steps: u32,
    },
    /// Run today's surprise bonus roll if it has not happened yet
    Bonus {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Discard all streaks, credits and achievements
    Reset,
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let now = now();

    match action {
        ProgressAction::Status => {
            let engine = open_engine(None, &now)?;
            println!("{}", serde_json::to_string_pretty(engine.state())?);
        }
        ProgressAction::Quest => {
            let engine = open_engine(None, &now)?;
            match &engine.state().daily_quest {
                Some(quest) => println!(
                    "{} {}/{} ({:.0}%){}",
                    quest.description,
                    quest.current,
                    quest.target,
                    quest.progress() * 100.0,
                    if quest.completed { " done" } else { "" }
                ),
                None => println!("no quest today"),
            }
        }
        ProgressAction::Challenge => {
            let engine = open_engine(None, &now)?;
            let challenge = &engine.state().weekly_challenge;
            println!(
                "{} {}/{} ({:.0}%){}",
                challenge.description,
                challenge.current,
                challenge.target,
                challenge.progress() * 100.0,
                if challenge.completed { " done" } else { "" }
            );
        }
        ProgressAction::Achievements { json } => {
            let engine = open_engine(None, &now)?;
            let achievements = &engine.state().achievements;
            if json {
                println!("{}", serde_json::to_string_pretty(achievements)?);
            } else {
                for a in achievements {
                    let mark = if a.unlocked { "x" } else { " " };
                    println!("[{mark}] {} {} (+{}) {}", a.icon, a.title, a.reward, a.description);
                }
            }
        }
        ProgressAction::Balance { steps } => {
            let config = Config::load()?;
            let balance = screen_time::balance(steps, config.conversion.steps_per_minute)?;
            println!("{}h {}m", balance.hours, balance.minutes);
        }
        ProgressAction::Bonus { seed } => {
            let mut engine = open_engine(seed, &now)?;
            match engine.check_daily_bonus(&now)? {
                Some(event) => print_events(&[event], false)?,
                None => println!("no bonus today"),
            }
        }
        ProgressAction::Reset => {
            let mut engine = open_engine(None, &now)?;
            engine.reset(&now)?;
            println!("progress reset");
        }
    }
    Ok(())
}
