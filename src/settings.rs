//! Game settings and preferences
//!
//! Defaults only; nothing is persisted between page loads.

use serde::{Deserialize, Serialize};

use crate::consts::{CATCH_VOLUME, MUSIC_VOLUME};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Catch particle burst
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: CATCH_VOLUME,
            music_volume: MUSIC_VOLUME,
            muted: false,
            particles: true,
        }
    }
}

impl Settings {
    /// Effective sound effect gain
    pub fn effective_sfx_volume(&self) -> f32 {
        self.effective(self.sfx_volume)
    }

    /// Effective music gain
    pub fn effective_music_volume(&self) -> f32 {
        self.effective(self.music_volume)
    }

    fn effective(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * channel).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_volumes() {
        let settings = Settings::default();
        assert_eq!(settings.effective_sfx_volume(), 0.15);
        assert_eq!(settings.effective_music_volume(), 0.2);
    }

    #[test]
    fn test_mute_and_master() {
        let mut settings = Settings {
            master_volume: 0.5,
            ..Settings::default()
        };
        assert_eq!(settings.effective_music_volume(), 0.1);

        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }
}
