use clap::Subcommand;
use strollscroll_core::{AppRestrictions, Database, ValidationError};

#[derive(Subcommand)]
pub enum RestrictionsAction {
    /// List apps and whether each is restricted
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the 4-digit PIN and enable restrictions
    SetPin { pin: String },
    /// Check a PIN; exits non-zero on mismatch
    Verify { pin: String },
    /// Replace the PIN
    ChangePin { current: String, new_pin: String },
    /// Flip one app's restriction (needs the PIN once one is set)
    Toggle {
        app_id: String,
        #[arg(long)]
        pin: Option<String>,
    },
    /// Restrict or release every app
    ToggleAll {
        /// Release instead of restrict
        #[arg(long)]
        off: bool,
        #[arg(long)]
        pin: Option<String>,
    },
    /// Back to defaults: no PIN, nothing restricted
    Reset {
        #[arg(long)]
        pin: Option<String>,
    },
}

/// Require a matching PIN once one is set.
fn authorize(restrictions: &AppRestrictions, pin: Option<&str>) -> Result<(), ValidationError> {
    if !restrictions.has_pin() {
        return Ok(());
    }
    match pin {
        Some(pin) if restrictions.verify_pin(pin) => Ok(()),
        _ => Err(ValidationError::PinMismatch),
    }
}

pub fn run(action: RestrictionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;
    let mut restrictions = AppRestrictions::load(&db)?;

    match action {
        RestrictionsAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&restrictions.apps)?);
            } else {
                let state = if restrictions.enabled { "on" } else { "off" };
                println!("restrictions: {state}");
                for app in &restrictions.apps {
                    let mark = if app.restricted { "x" } else { " " };
                    println!("[{mark}] {} {} ({})", app.icon, app.name, app.id);
                }
            }
            return Ok(());
        }
        RestrictionsAction::SetPin { pin } => {
            if restrictions.has_pin() {
                return Err("a PIN is already set; use change-pin".into());
            }
            restrictions.set_pin(&pin)?;
            println!("PIN set, restrictions enabled");
        }
        RestrictionsAction::Verify { pin } => {
            if !restrictions.has_pin() {
                return Err(ValidationError::PinNotSet.into());
            }
            if !restrictions.verify_pin(&pin) {
                return Err(ValidationError::PinMismatch.into());
            }
            println!("ok");
            return Ok(());
        }
        RestrictionsAction::ChangePin { current, new_pin } => {
            restrictions.change_pin(&current, &new_pin)?;
            println!("PIN changed");
        }
        RestrictionsAction::Toggle { app_id, pin } => {
            authorize(&restrictions, pin.as_deref())?;
            let restricted = restrictions.toggle_app(&app_id)?;
            println!(
                "{app_id}: {}",
                if restricted { "restricted" } else { "allowed" }
            );
        }
        RestrictionsAction::ToggleAll { off, pin } => {
            authorize(&restrictions, pin.as_deref())?;
            restrictions.toggle_all(!off);
            println!("{} apps restricted", restrictions.restricted_apps().len());
        }
        RestrictionsAction::Reset { pin } => {
            authorize(&restrictions, pin.as_deref())?;
            restrictions.reset();
            println!("restrictions reset");
        }
    }

    restrictions.save(&mut db)?;
    Ok(())
}
