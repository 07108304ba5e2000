//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::hammer::HammerConfig;
use crate::platform;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Workbench selection
    pub hammer: HammerConfig,

    // === Visual Effects ===
    /// Screen shake on impacts
    pub screen_shake: bool,
    /// White flash on mission complete / ultra-bonk
    pub flash: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (minimize shake, flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hammer: HammerConfig::default(),
            screen_shake: true,
            flash: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective screen flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash && !self.reduced_motion
    }

    /// Output gain for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "comic_bonk_settings";

    /// Parse stored JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {}", e);
            Self::default()
        })
    }

    /// Load settings from LocalStorage
    pub fn load() -> Self {
        match platform::load_item(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if platform::save_item(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hammer::{Alloy, HeadType};

    #[test]
    fn test_reduced_motion_overrides() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        assert!(settings.effective_flash());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_flash());
    }

    #[test]
    fn test_mute_silences() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let settings = Settings::from_json(r#"{"hammer":{"head":"mallet"},"muted":true}"#);
        assert_eq!(settings.hammer.head, HeadType::Mallet);
        assert_eq!(settings.hammer.alloy, Alloy::Classic);
        assert!(settings.muted);
        assert!(settings.screen_shake);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}
