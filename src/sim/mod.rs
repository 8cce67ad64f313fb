//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Player resolved before enemy wherever order matters
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Aabb, clamp_to_stage, overlaps};
pub use state::{
    EndReason, Facing, Fighter, GameEvent, GamePhase, GameState, Outcome, RoundResult, Side,
};
pub use tick::{FighterInput, TickInput, determine_winner, tick};
