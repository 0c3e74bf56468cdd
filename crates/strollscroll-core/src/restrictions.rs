//! Per-app usage restrictions guarded by a 4-digit PIN.
//!
//! The PIN is never stored in clear: the record keeps a random salt and the
//! SHA-256 digest of salt and PIN.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, ValidationError};
use crate::storage::{load_record, save_record, KeyValueStore};

pub const RESTRICTIONS_KEY: &str = "strollscroll-app-restrictions";

const DEFAULT_APPS: [(&str, &str, &str); 12] = [
    ("instagram", "Instagram", "📷"),
    ("tiktok", "TikTok", "🎵"),
    ("youtube", "YouTube", "▶️"),
    ("snapchat", "Snapchat", "👻"),
    ("facebook", "Facebook", "👥"),
    ("twitter", "Twitter/X", "🐦"),
    ("whatsapp", "WhatsApp", "💬"),
    ("netflix", "Netflix", "🎬"),
    ("reddit", "Reddit", "🤖"),
    ("discord", "Discord", "🎮"),
    ("twitch", "Twitch", "📺"),
    ("spotify", "Spotify", "🎧"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRestriction {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub restricted: bool,
}

/// Salted PIN digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinHash {
    salt: String,
    digest: String,
}

impl PinHash {
    fn new(pin: &str) -> Result<Self> {
        let mut salt = [0u8; 16];
        getrandom::getrandom(&mut salt)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let salt = hex::encode(salt);
        let digest = digest(&salt, pin);
        Ok(Self { salt, digest })
    }

    fn matches(&self, pin: &str) -> bool {
        digest(&self.salt, pin) == self.digest
    }
}

fn digest(salt: &str, pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(pin.as_bytes());
    hex::encode(hasher.finalize())
}

fn validate_pin(pin: &str) -> Result<(), ValidationError> {
    if pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRestrictions {
    pub apps: Vec<AppRestriction>,
    #[serde(default)]
    pin: Option<PinHash>,
    pub enabled: bool,
}

impl Default for AppRestrictions {
    fn default() -> Self {
        Self {
            apps: DEFAULT_APPS
                .iter()
                .map(|(id, name, icon)| AppRestriction {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                    icon: (*icon).to_string(),
                    restricted: false,
                })
                .collect(),
            pin: None,
            enabled: false,
        }
    }
}

impl AppRestrictions {
    /// Load the record, falling back to defaults if missing or corrupt.
    ///
    /// # Errors
    /// Returns an error only if the store cannot be read.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(load_record(store, RESTRICTIONS_KEY)?.unwrap_or_default())
    }

    /// # Errors
    /// Returns an error if the record cannot be written.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_record(store, RESTRICTIONS_KEY, self)
    }

    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    /// Set the PIN and turn restrictions on.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidPin`] unless `pin` is 4 digits.
    pub fn set_pin(&mut self, pin: &str) -> Result<()> {
        validate_pin(pin)?;
        self.pin = Some(PinHash::new(pin)?);
        self.enabled = true;
        Ok(())
    }

    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin.as_ref().is_some_and(|hash| hash.matches(pin))
    }

    /// Replace the PIN after checking the current one.
    ///
    /// # Errors
    /// Fails if no PIN is set, `current` is wrong, or `new_pin` is malformed.
    pub fn change_pin(&mut self, current: &str, new_pin: &str) -> Result<()> {
        if !self.has_pin() {
            return Err(ValidationError::PinNotSet.into());
        }
        if !self.verify_pin(current) {
            return Err(ValidationError::PinMismatch.into());
        }
        validate_pin(new_pin)?;
        self.pin = Some(PinHash::new(new_pin)?);
        Ok(())
    }

    /// Flip one app's restriction, returning its new state.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnknownApp`] for an id not in the list.
    pub fn toggle_app(&mut self, app_id: &str) -> Result<bool, ValidationError> {
        let app = self
            .apps
            .iter_mut()
            .find(|app| app.id == app_id)
            .ok_or_else(|| ValidationError::UnknownApp(app_id.to_string()))?;
        app.restricted = !app.restricted;
        Ok(app.restricted)
    }

    pub fn toggle_all(&mut self, restricted: bool) {
        for app in &mut self.apps {
            app.restricted = restricted;
        }
    }

    pub fn restricted_apps(&self) -> Vec<&AppRestriction> {
        self.apps.iter().filter(|app| app.restricted).collect()
    }

    /// Whether `app_id` is currently blocked.
    pub fn is_blocked(&self, app_id: &str) -> bool {
        self.enabled && self.apps.iter().any(|app| app.id == app_id && app.restricted)
    }

    /// Back to the default app list, no PIN, disabled.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
