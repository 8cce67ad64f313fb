//! CPU opponent
//!
//! Produces a `FighterInput` from the current state. Decisions use a PRNG
//! seeded from the round seed and tick, so replays stay deterministic.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::overlaps;
use super::state::{GameState, Side};
use super::tick::FighterInput;

/// Chance per tick of swinging while the opponent is in reach
const ATTACK_CHANCE: f64 = 0.3;
/// Chance per tick of jumping over an incoming swing
const DODGE_CHANCE: f64 = 0.25;
/// Chance per tick of stepping back from an incoming swing
const RETREAT_CHANCE: f64 = 0.2;
/// Chance per tick of a random hop
const HOP_CHANCE: f64 = 0.01;
/// Chance per tick of standing still instead of approaching
const HESITATE_CHANCE: f64 = 0.1;

fn decision_rng(state: &GameState, side: Side) -> Pcg32 {
    let salt = match side {
        Side::Player => 0x9e37_79b9_7f4a_7c15,
        Side::Enemy => 0xc2b2_ae3d_27d4_eb4f,
    };
    let stream = (u64::from(state.round) << 40) ^ state.time_ticks;
    Pcg32::seed_from_u64(state.seed ^ salt ^ stream)
}

/// Decide what the CPU-controlled `side` does this tick
pub fn cpu_input(state: &GameState, side: Side) -> FighterInput {
    let me = state.fighter(side);
    let foe = state.fighter(side.opponent());
    let mut rng = decision_rng(state, side);

    let foe_center = foe.body().center().x;
    let toward: i8 = if foe_center >= me.body().center().x { 1 } else { -1 };

    // Check reach as if already turned toward the foe
    let mut probe = me.clone();
    probe.face_toward(foe_center);
    let in_reach = overlaps(&probe.attack_box(), &foe.body());
    let threatened = foe.is_attacking() && in_reach;

    let mut input = FighterInput::default();

    if threatened {
        if me.grounded && rng.random_bool(DODGE_CHANCE) {
            input.jump = true;
        } else if rng.random_bool(RETREAT_CHANCE) {
            input.walk = -toward;
        }
    }

    if in_reach {
        input.attack = rng.random_bool(ATTACK_CHANCE);
    } else if input.walk == 0 && !rng.random_bool(HESITATE_CHANCE) {
        input.walk = toward;
    }

    if me.grounded && !input.jump && rng.random_bool(HOP_CHANCE) {
        input.jump = true;
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    fn grounded_state(player_x: f32, enemy_x: f32) -> GameState {
        let mut state = GameState::new(4242, 60);
        let floor = GROUND_Y - FIGHTER_HEIGHT;
        state.player.pos = Vec2::new(player_x, floor);
        state.enemy.pos = Vec2::new(enemy_x, floor);
        state.player.grounded = true;
        state.enemy.grounded = true;
        state
    }

    #[test]
    fn test_approaches_distant_opponent() {
        let mut state = grounded_state(100.0, 800.0);
        let mut toward = 0;
        for t in 0..100 {
            state.time_ticks = t;
            let input = cpu_input(&state, Side::Enemy);
            assert!(!input.attack, "nothing to hit from across the stage");
            assert!(input.walk <= 0, "never walks away from a passive opponent");
            if input.walk < 0 {
                toward += 1;
            }
        }
        assert!(toward > 70);
    }

    #[test]
    fn test_swings_when_in_reach() {
        let mut state = grounded_state(300.0, 360.0);
        let swings = (0..100)
            .filter(|&t| {
                state.time_ticks = t;
                cpu_input(&state, Side::Player).attack
            })
            .count();
        assert!(swings > 10 && swings < 60, "swings: {swings}");
    }

    #[test]
    fn test_dodges_or_backs_off_an_incoming_swing() {
        let mut state = grounded_state(300.0, 360.0);
        assert!(state.player.start_attack());

        let (mut jumps, mut retreats) = (0, 0);
        for t in 0..200 {
            state.time_ticks = t;
            let input = cpu_input(&state, Side::Enemy);
            assert!(input.walk >= 0, "never steps into the swing");
            if input.jump {
                jumps += 1;
            }
            if input.walk > 0 {
                retreats += 1;
            }
        }
        assert!(jumps > 20, "jumps: {jumps}");
        assert!(retreats > 5, "retreats: {retreats}");
    }

    #[test]
    fn test_same_state_same_decision() {
        let state = grounded_state(300.0, 360.0);
        for side in [Side::Player, Side::Enemy] {
            assert_eq!(cpu_input(&state, side), cpu_input(&state, side));
        }
    }
}
