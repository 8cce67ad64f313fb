//! Rect Fighter - A two-player rectangle fighting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, movement, attacks, round timer)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input mapping
//! - `persistence`: Versioned save envelope for LocalStorage
//! - `settings`: Player preferences
//! - `record`: Win/loss tally across rounds

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod persistence;
pub mod platform;
pub mod record;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use record::MatchRecord;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the browser frame rate the tuning was made at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Stage dimensions (canvas pixels, y grows downward)
    pub const STAGE_WIDTH: f32 = 1024.0;
    pub const STAGE_HEIGHT: f32 = 576.0;
    /// Top of the floor
    pub const GROUND_Y: f32 = 480.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 2520.0;
    /// Horizontal walking speed (pixels/s)
    pub const MOVE_SPEED: f32 = 300.0;
    /// Upward launch speed of a jump (pixels/s)
    pub const JUMP_SPEED: f32 = 1200.0;

    /// Fighter body
    pub const FIGHTER_WIDTH: f32 = 50.0;
    pub const FIGHTER_HEIGHT: f32 = 150.0;
    pub const MAX_HEALTH: u32 = 100;

    /// Attack box, anchored to the body's top edge
    pub const ATTACK_WIDTH: f32 = 100.0;
    pub const ATTACK_HEIGHT: f32 = 50.0;
    /// How long a swing can connect (100 ms)
    pub const ATTACK_ACTIVE_TICKS: u32 = 6;
    /// Recovery after a swing ends before the next one
    pub const ATTACK_COOLDOWN_TICKS: u32 = 24;
    pub const ATTACK_DAMAGE: u32 = 20;

    /// Hit flash duration
    pub const HIT_FLASH_TICKS: u32 = 8;

    /// Round length
    pub const DEFAULT_ROUND_SECONDS: u32 = 60;
    pub const MIN_ROUND_SECONDS: u32 = 10;
    pub const MAX_ROUND_SECONDS: u32 = 300;

    /// Spawn points (top-left of the body)
    pub const PLAYER_SPAWN: (f32, f32) = (0.0, 0.0);
    pub const ENEMY_SPAWN: (f32, f32) = (400.0, 100.0);
}
