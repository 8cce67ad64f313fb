//! Fighter movement: explicit Euler integration under constant gravity

use super::collision::clamp_to_stage;
use super::state::Fighter;
use crate::consts::*;

/// Set horizontal velocity from a direction in {-1, 0, 1}
pub fn apply_walk(fighter: &mut Fighter, dir: i8) {
    fighter.vel.x = f32::from(dir.signum()) * MOVE_SPEED;
}

/// Launch upward if standing on the ground. Returns whether the jump happened.
pub fn try_jump(fighter: &mut Fighter) -> bool {
    if !fighter.grounded {
        return false;
    }
    fighter.vel.y = -JUMP_SPEED;
    fighter.grounded = false;
    true
}

/// Advance one fighter by `dt`. Returns true on the step it lands.
///
/// Position moves first; the ground check looks one step ahead so the body
/// never sinks into the floor, and gravity only accumulates while airborne.
pub fn integrate(fighter: &mut Fighter, dt: f32) -> bool {
    let was_grounded = fighter.grounded;

    fighter.pos += fighter.vel * dt;

    if fighter.body().bottom() + fighter.vel.y * dt >= GROUND_Y {
        fighter.vel.y = 0.0;
        fighter.pos.y = GROUND_Y - fighter.size.y;
        fighter.grounded = true;
    } else {
        fighter.vel.y += GRAVITY * dt;
        fighter.grounded = false;
    }

    fighter.pos.x = clamp_to_stage(&fighter.body());

    !was_grounded && fighter.grounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Facing, Side};
    use glam::Vec2;
    use proptest::prelude::*;

    fn settle(fighter: &mut Fighter) -> u32 {
        let mut steps = 0;
        while !integrate(fighter, SIM_DT) {
            steps += 1;
            assert!(steps < 1000, "fighter never landed");
        }
        steps
    }

    #[test]
    fn test_falls_onto_ground() {
        let mut fighter = Fighter::spawn(Side::Enemy);
        settle(&mut fighter);
        assert!(fighter.grounded);
        assert_eq!(fighter.vel.y, 0.0);
        assert_eq!(fighter.body().bottom(), GROUND_Y);
    }

    #[test]
    fn test_standing_stays_put() {
        let mut fighter = Fighter::spawn(Side::Player);
        settle(&mut fighter);
        let pos = fighter.pos;
        for _ in 0..30 {
            assert!(!integrate(&mut fighter, SIM_DT));
        }
        assert_eq!(fighter.pos, pos);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut fighter = Fighter::spawn(Side::Player);
        assert!(!try_jump(&mut fighter));

        settle(&mut fighter);
        assert!(try_jump(&mut fighter));
        integrate(&mut fighter, SIM_DT);
        assert!(!fighter.grounded);
        assert!(!try_jump(&mut fighter));
    }

    #[test]
    fn test_jump_apex_height() {
        let mut fighter = Fighter::spawn(Side::Player);
        settle(&mut fighter);
        try_jump(&mut fighter);

        let mut highest = fighter.pos.y;
        while !integrate(&mut fighter, SIM_DT) {
            highest = highest.min(fighter.pos.y);
        }
        let rise = (GROUND_Y - FIGHTER_HEIGHT) - highest;
        let ideal = JUMP_SPEED * JUMP_SPEED / (2.0 * GRAVITY);
        assert!((rise - ideal).abs() < 25.0, "rise {rise} vs ideal {ideal}");
    }

    #[test]
    fn test_walk_and_stage_edges() {
        let mut fighter = Fighter::new(Vec2::new(5.0, GROUND_Y - FIGHTER_HEIGHT), Facing::Left);
        apply_walk(&mut fighter, -1);
        assert_eq!(fighter.vel.x, -MOVE_SPEED);
        integrate(&mut fighter, SIM_DT);
        assert_eq!(fighter.pos.x, 0.0);

        fighter.pos.x = STAGE_WIDTH - FIGHTER_WIDTH - 1.0;
        apply_walk(&mut fighter, 1);
        integrate(&mut fighter, SIM_DT);
        assert_eq!(fighter.pos.x, STAGE_WIDTH - FIGHTER_WIDTH);

        apply_walk(&mut fighter, 0);
        assert_eq!(fighter.vel.x, 0.0);
    }

    proptest! {
        #[test]
        fn never_sinks_below_ground(
            start_y in -400.0f32..300.0,
            start_vy in -1500.0f32..1500.0,
            steps in 1usize..400,
        ) {
            let mut fighter = Fighter::new(Vec2::new(300.0, start_y), Facing::Right);
            fighter.vel.y = start_vy;
            for _ in 0..steps {
                integrate(&mut fighter, SIM_DT);
                prop_assert!(fighter.body().bottom() <= GROUND_Y + 1e-3);
            }
        }
    }
}
