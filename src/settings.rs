//! Game settings and preferences
//!
//! Persisted separately from the match record in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ROUND_SECONDS, MAX_ROUND_SECONDS, MIN_ROUND_SECONDS};
use crate::persistence;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Round timer length in seconds
    pub round_seconds: u32,
    /// Right fighter controlled by the CPU
    pub cpu_opponent: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no hit flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_seconds: DEFAULT_ROUND_SECONDS,
            cpu_opponent: false,

            show_fps: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "rect_fighter_settings";

    /// Clamp values edited by hand in storage back into range
    pub fn sanitized(mut self) -> Self {
        self.round_seconds = self.round_seconds.clamp(MIN_ROUND_SECONDS, MAX_ROUND_SECONDS);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Whether hit flashes should be drawn
    pub fn effective_hit_flash(&self) -> bool {
        !self.reduced_motion
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings (defaults when nothing is stored)
    pub fn load() -> Self {
        match persistence::load::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if persistence::save(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
