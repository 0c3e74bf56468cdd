use clap::Subcommand;
use strollscroll_core::{Database, OnboardingProfile};

#[derive(Subcommand)]
pub enum OnboardingAction {
    /// Show the saved answers and the screen-time projection
    Show,
    /// Save answers and mark onboarding complete
    Complete {
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Average hours on the phone per day
        #[arg(long)]
        daily_hours: f64,
        /// What the time would go to instead
        #[arg(long)]
        goal: Option<String>,
    },
    /// Show onboarding again on next launch
    Reset,
}

pub fn run(action: OnboardingAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;
    let mut profile = OnboardingProfile::load(&db)?;

    match action {
        OnboardingAction::Show => {
            let life = profile.life_on_screen();
            let json = serde_json::json!({
                "profile": profile,
                "lifeOnScreen": life,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
            return Ok(());
        }
        OnboardingAction::Complete {
            age,
            daily_hours,
            goal,
        } => {
            profile.complete(age, daily_hours, goal);
            let life = profile.life_on_screen();
            if life.at_lifespan {
                println!("every hour counts");
            } else if life.is_valid {
                println!(
                    "at this pace: {} years ({} hours) on screen",
                    life.years, life.total_hours
                );
            }
        }
        OnboardingAction::Reset => {
            profile.reset();
            println!("onboarding reset");
        }
    }

    profile.save(&mut db)?;
    Ok(())
}
