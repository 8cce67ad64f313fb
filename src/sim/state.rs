//! Game state and core simulation types
//!
//! Everything needed to replay a round deterministically lives here.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Which fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left fighter, keyboard WASD + Space
    Player,
    /// Right fighter, arrow keys
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Direction a fighter's attack box extends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Round in progress
    Fighting,
    /// Round frozen by the player
    Paused,
    /// Round decided, waiting for restart
    GameOver,
}

/// How a round was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWins,
    EnemyWins,
    Tie,
}

impl Outcome {
    /// Text shown on the result overlay
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::PlayerWins => "Player 1 Wins",
            Outcome::EnemyWins => "Player 2 Wins",
            Outcome::Tie => "Tie",
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::PlayerWins => Some(Side::Player),
            Outcome::EnemyWins => Some(Side::Enemy),
            Outcome::Tie => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A fighter's health reached zero
    KnockOut,
    /// The round timer ran out
    TimeUp,
}

/// Final result of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub reason: EndReason,
}

/// Things that happened during a tick (consumed by audio, HUD and logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Swing { side: Side },
    Hit { attacker: Side, damage: u32, remaining: u32 },
    Jump { side: Side },
    Land { side: Side },
    RoundOver(RoundResult),
}

/// A rectangle fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    /// Top-left corner of the body
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub facing: Facing,
    /// Standing on the ground
    pub grounded: bool,
    /// Ticks left in the active part of the current swing
    pub attack_ticks: u32,
    /// Ticks until another swing may start
    pub cooldown_ticks: u32,
    /// Current swing already connected
    pub attack_landed: bool,
    /// Visual only
    #[serde(default)]
    pub hit_flash: u32,
}

impl Fighter {
    pub fn new(pos: Vec2, facing: Facing) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(FIGHTER_WIDTH, FIGHTER_HEIGHT),
            health: MAX_HEALTH,
            facing,
            grounded: false,
            attack_ticks: 0,
            cooldown_ticks: 0,
            attack_landed: false,
            hit_flash: 0,
        }
    }

    pub fn spawn(side: Side) -> Self {
        match side {
            Side::Player => Self::new(Vec2::from(PLAYER_SPAWN), Facing::Right),
            Side::Enemy => Self::new(Vec2::from(ENEMY_SPAWN), Facing::Left),
        }
    }

    pub fn body(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Attack box in front of the fighter, flush with the top of the body
    pub fn attack_box(&self) -> Aabb {
        let offset_x = match self.facing {
            Facing::Right => 0.0,
            Facing::Left => self.size.x - ATTACK_WIDTH,
        };
        Aabb::from_pos_size(
            self.pos + Vec2::new(offset_x, 0.0),
            Vec2::new(ATTACK_WIDTH, ATTACK_HEIGHT),
        )
    }

    /// Whether the swing can still connect this tick
    pub fn is_attacking(&self) -> bool {
        self.attack_ticks > 0 && !self.attack_landed
    }

    /// Begin a swing. Returns false while swinging or recovering.
    pub fn start_attack(&mut self) -> bool {
        if self.attack_ticks > 0 || self.cooldown_ticks > 0 {
            return false;
        }
        self.attack_ticks = ATTACK_ACTIVE_TICKS;
        self.attack_landed = false;
        true
    }

    /// Subtract health (saturating at zero) and return what remains
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.hit_flash = HIT_FLASH_TICKS;
        self.health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Health as a fraction of the maximum, for health bars
    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / MAX_HEALTH as f32
    }

    /// Turn toward a point on the x axis
    pub fn face_toward(&mut self, x: f32) {
        let center = self.body().center().x;
        if x > center {
            self.facing = Facing::Right;
        } else if x < center {
            self.facing = Facing::Left;
        }
    }

    /// Count down swing, recovery and flash timers by one tick
    pub fn advance_timers(&mut self) {
        if self.attack_ticks > 0 {
            self.attack_ticks -= 1;
            if self.attack_ticks == 0 {
                self.cooldown_ticks = ATTACK_COOLDOWN_TICKS;
            }
        } else {
            self.cooldown_ticks = self.cooldown_ticks.saturating_sub(1);
        }
        self.hit_flash = self.hit_flash.saturating_sub(1);
    }

    /// Drop any swing or flash still in progress (the round is frozen)
    pub fn settle(&mut self) {
        self.attack_ticks = 0;
        self.cooldown_ticks = 0;
        self.attack_landed = false;
        self.hit_flash = 0;
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for the CPU opponent
    pub seed: u64,
    /// Rounds started since creation (mixed into the CPU seed)
    pub round: u32,
    /// Simulation ticks in the current round
    pub time_ticks: u64,
    /// Full round length in ticks
    pub round_ticks: u32,
    /// Ticks remaining on the round timer
    pub ticks_left: u32,
    pub phase: GamePhase,
    pub player: Fighter,
    pub enemy: Fighter,
    /// Set once the round is decided
    pub result: Option<RoundResult>,
    /// Events emitted by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new round. `round_seconds` is clamped to the allowed range.
    pub fn new(seed: u64, round_seconds: u32) -> Self {
        let round_ticks =
            round_seconds.clamp(MIN_ROUND_SECONDS, MAX_ROUND_SECONDS) * TICKS_PER_SECOND;
        Self {
            seed,
            round: 0,
            time_ticks: 0,
            round_ticks,
            ticks_left: round_ticks,
            phase: GamePhase::Fighting,
            player: Fighter::spawn(Side::Player),
            enemy: Fighter::spawn(Side::Enemy),
            result: None,
            events: Vec::new(),
        }
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Whole seconds shown on the timer (rounded up)
    pub fn seconds_left(&self) -> u32 {
        self.ticks_left.div_ceil(TICKS_PER_SECOND)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Start the next round with fresh fighters and a full timer
    pub fn reset(&mut self) {
        self.round += 1;
        self.time_ticks = 0;
        self.ticks_left = self.round_ticks;
        self.phase = GamePhase::Fighting;
        self.player = Fighter::spawn(Side::Player);
        self.enemy = Fighter::spawn(Side::Enemy);
        self.result = None;
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_box_follows_facing() {
        let mut fighter = Fighter::new(Vec2::new(200.0, 330.0), Facing::Right);
        let right = fighter.attack_box();
        assert_eq!(right.min, Vec2::new(200.0, 330.0));
        assert_eq!(right.size, Vec2::new(ATTACK_WIDTH, ATTACK_HEIGHT));

        fighter.facing = Facing::Left;
        let left = fighter.attack_box();
        assert_eq!(left.min, Vec2::new(150.0, 330.0));
        // Reaches the same distance past the body on either side
        assert_eq!(right.max().x - fighter.body().max().x, fighter.body().min.x - left.min.x);
    }

    #[test]
    fn test_swing_and_cooldown_cycle() {
        let mut fighter = Fighter::spawn(Side::Player);
        assert!(fighter.start_attack());
        assert!(fighter.is_attacking());
        assert!(!fighter.start_attack());

        let mut ticks = 0;
        loop {
            fighter.advance_timers();
            ticks += 1;
            if fighter.start_attack() {
                break;
            }
        }
        assert_eq!(ticks, ATTACK_ACTIVE_TICKS + ATTACK_COOLDOWN_TICKS);
    }

    #[test]
    fn test_landed_swing_stops_attacking() {
        let mut fighter = Fighter::spawn(Side::Player);
        fighter.start_attack();
        fighter.attack_landed = true;
        assert!(!fighter.is_attacking());
        assert!(fighter.attack_ticks > 0);
    }

    #[test]
    fn test_damage_saturates() {
        let mut fighter = Fighter::spawn(Side::Enemy);
        assert_eq!(fighter.take_damage(ATTACK_DAMAGE), MAX_HEALTH - ATTACK_DAMAGE);
        assert_eq!(fighter.take_damage(500), 0);
        assert!(fighter.is_defeated());
        assert_eq!(fighter.health_ratio(), 0.0);
    }

    #[test]
    fn test_face_toward() {
        let mut fighter = Fighter::new(Vec2::new(100.0, 0.0), Facing::Right);
        fighter.face_toward(50.0);
        assert_eq!(fighter.facing, Facing::Left);
        // Exactly centered keeps the current facing
        fighter.face_toward(125.0);
        assert_eq!(fighter.facing, Facing::Left);
        fighter.face_toward(400.0);
        assert_eq!(fighter.facing, Facing::Right);
    }

    #[test]
    fn test_seconds_left_rounds_up() {
        let mut state = GameState::new(1, 60);
        assert_eq!(state.seconds_left(), 60);
        state.ticks_left -= 1;
        assert_eq!(state.seconds_left(), 60);
        state.ticks_left = TICKS_PER_SECOND * 59;
        assert_eq!(state.seconds_left(), 59);
        state.ticks_left = 1;
        assert_eq!(state.seconds_left(), 1);
        state.ticks_left = 0;
        assert_eq!(state.seconds_left(), 0);
    }

    #[test]
    fn test_round_length_clamped() {
        assert_eq!(GameState::new(1, 1).round_ticks, MIN_ROUND_SECONDS * TICKS_PER_SECOND);
        assert_eq!(GameState::new(1, 10_000).round_ticks, MAX_ROUND_SECONDS * TICKS_PER_SECOND);
    }

    #[test]
    fn test_reset_restores_fighters() {
        let mut state = GameState::new(7, 30);
        state.player.take_damage(60);
        state.ticks_left = 5;
        state.phase = GamePhase::GameOver;
        state.result = Some(RoundResult {
            outcome: Outcome::EnemyWins,
            reason: EndReason::TimeUp,
        });

        state.reset();
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, GamePhase::Fighting);
        assert_eq!(state.player.health, MAX_HEALTH);
        assert_eq!(state.ticks_left, 30 * TICKS_PER_SECOND);
        assert!(state.result.is_none());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::PlayerWins.to_string(), "Player 1 Wins");
        assert_eq!(Outcome::EnemyWins.label(), "Player 2 Wins");
        assert_eq!(Outcome::Tie.label(), "Tie");
        assert_eq!(Outcome::Tie.winner(), None);
        assert_eq!(Side::Player.opponent(), Side::Enemy);
    }
}
