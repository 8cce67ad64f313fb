//! Fixed timestep simulation tick
//!
//! Core game loop that advances a round deterministically.

use super::ai;
use super::collision::overlaps;
use super::physics::{apply_walk, integrate, try_jump};
use super::state::{EndReason, GameEvent, GamePhase, GameState, Outcome, RoundResult, Side};
use crate::consts::*;

/// Commands for one fighter during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FighterInput {
    /// Walking direction: -1 left, 0 still, 1 right
    pub walk: i8,
    /// Jump pressed this tick
    pub jump: bool,
    /// Attack pressed this tick
    pub attack: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub player: FighterInput,
    pub enemy: FighterInput,
    /// Pause toggle
    pub pause: bool,
    /// Start a new round (only while paused or after a result)
    pub restart: bool,
    /// Let the CPU drive the left fighter (demo mode)
    pub cpu_player: bool,
    /// Let the CPU drive the right fighter (single player)
    pub cpu_enemy: bool,
}

impl TickInput {
    pub fn for_side(&self, side: Side) -> FighterInput {
        match side {
            Side::Player => self.player,
            Side::Enemy => self.enemy,
        }
    }

    pub fn is_cpu(&self, side: Side) -> bool {
        match side {
            Side::Player => self.cpu_player,
            Side::Enemy => self.cpu_enemy,
        }
    }
}

const SIDES: [Side; 2] = [Side::Player, Side::Enemy];

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.restart && matches!(state.phase, GamePhase::GameOver | GamePhase::Paused) {
        state.reset();
        log::info!("Round {} started", state.round + 1);
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Fighting => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Fighting,
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Fighting {
        return;
    }

    state.time_ticks += 1;

    let commands = SIDES.map(|side| {
        if input.is_cpu(side) {
            ai::cpu_input(state, side)
        } else {
            input.for_side(side)
        }
    });

    for (side, command) in SIDES.into_iter().zip(commands) {
        let fighter = state.fighter_mut(side);
        apply_walk(fighter, command.walk);
        let jumped = command.jump && try_jump(fighter);
        let swung = command.attack && fighter.start_attack();

        if jumped {
            state.events.push(GameEvent::Jump { side });
        }
        if swung {
            state.events.push(GameEvent::Swing { side });
        }
    }

    for side in SIDES {
        if integrate(state.fighter_mut(side), dt) {
            state.events.push(GameEvent::Land { side });
        }
    }

    let player_center = state.player.body().center().x;
    let enemy_center = state.enemy.body().center().x;
    state.player.face_toward(enemy_center);
    state.enemy.face_toward(player_center);

    for side in SIDES {
        resolve_hit(state, side);
    }

    state.player.advance_timers();
    state.enemy.advance_timers();

    state.ticks_left = state.ticks_left.saturating_sub(1);
    check_round_end(state);
}

/// Land the attacker's swing on the opponent if the boxes overlap
fn resolve_hit(state: &mut GameState, attacker_side: Side) {
    let (attacker, defender) = match attacker_side {
        Side::Player => (&mut state.player, &mut state.enemy),
        Side::Enemy => (&mut state.enemy, &mut state.player),
    };

    if !attacker.is_attacking() || !overlaps(&attacker.attack_box(), &defender.body()) {
        return;
    }

    // One hit per swing
    attacker.attack_landed = true;
    let remaining = defender.take_damage(ATTACK_DAMAGE);
    log::debug!(
        "{:?} hit {:?} for {} ({} left)",
        attacker_side,
        attacker_side.opponent(),
        ATTACK_DAMAGE,
        remaining
    );

    state.events.push(GameEvent::Hit {
        attacker: attacker_side,
        damage: ATTACK_DAMAGE,
        remaining,
    });
}

fn check_round_end(state: &mut GameState) {
    let reason = if state.player.is_defeated() || state.enemy.is_defeated() {
        EndReason::KnockOut
    } else if state.ticks_left == 0 {
        EndReason::TimeUp
    } else {
        return;
    };

    let result = RoundResult {
        outcome: determine_winner(state.player.health, state.enemy.health),
        reason,
    };
    state.result = Some(result);
    state.phase = GamePhase::GameOver;
    state.player.settle();
    state.enemy.settle();
    state.events.push(GameEvent::RoundOver(result));

    log::info!(
        "Round over: {} by {:?} ({} - {}, {}s left)",
        result.outcome,
        reason,
        state.player.health,
        state.enemy.health,
        state.seconds_left()
    );
}

/// Higher remaining health wins; equal health is a tie
pub fn determine_winner(player_health: u32, enemy_health: u32) -> Outcome {
    use std::cmp::Ordering;

    match player_health.cmp(&enemy_health) {
        Ordering::Greater => Outcome::PlayerWins,
        Ordering::Less => Outcome::EnemyWins,
        Ordering::Equal => Outcome::Tie,
    }
}
