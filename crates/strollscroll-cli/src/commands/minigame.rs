use clap::Subcommand;
use strollscroll_core::minigames;
use strollscroll_core::{MiniGame, MinigameState};

use super::{now, open_engine};

#[derive(Subcommand)]
pub enum MinigameAction {
    /// Submit a finished game's score and collect its credits
    Play {
        /// catcher or race
        game: MiniGame,
        score: u32,
    },
    /// Which games can still be played today
    Status,
}

pub fn run(action: MinigameAction) -> Result<(), Box<dyn std::error::Error>> {
    let now = now();
    let mut engine = open_engine(None, &now)?;

    match action {
        MinigameAction::Play { game, score } => {
            let earned = minigames::play(&mut engine, game, score, now.date_naive())?;
            println!(
                "{}: score {score}, +{earned} credits (total {})",
                game.name(),
                engine.state().total_credits
            );
        }
        MinigameAction::Status => {
            let games = MinigameState::load(engine.store(), now.date_naive())?;
            for game in [MiniGame::StepCatcher, MiniGame::StepRace] {
                let status = if games.can_play(game) { "available" } else { "played" };
                println!("{}: {status}", game.name());
            }
        }
    }
    Ok(())
}
