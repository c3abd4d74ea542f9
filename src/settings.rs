//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Ambient loop volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Visual ===
    /// Draw the twinkling background
    pub show_starfield: bool,

    // === Accessibility ===
    /// Reduced motion (background stars keep a fixed brightness)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            show_starfield: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Whether background stars should twinkle
    pub fn effective_twinkle(&self) -> bool {
        self.show_starfield && !self.reduced_motion
    }

    /// Parse settings JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "meteor_dodge_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        use crate::persistence::local::read_item;

        match read_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Stored settings are unreadable, using defaults");
            }
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        use crate::persistence::local::write_item;

        if let Ok(json) = serde_json::to_string(self) {
            match write_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true }"#).expect("valid json");
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.show_starfield);
    }

    #[test]
    fn test_garbage_json_rejected() {
        assert!(Settings::from_json("nope").is_none());
    }

    #[test]
    fn test_toggle_mute_and_twinkle() {
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        assert!(!settings.toggle_mute());

        assert!(settings.effective_twinkle());
        settings.reduced_motion = true;
        assert!(!settings.effective_twinkle());
    }
}
