//! Shape generation for the fighting stage
//!
//! Everything is built in stage coordinates; the pipeline maps to clip space.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{GROUND_Y, STAGE_HEIGHT, STAGE_WIDTH};
use crate::sim::{Aabb, Fighter, GamePhase, GameState};

/// Two triangles covering `area`
pub fn rect(area: &Aabb, color: [f32; 4]) -> [Vertex; 6] {
    let Vec2 { x: x0, y: y0 } = area.min;
    let Vec2 { x: x1, y: y1 } = area.max();
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

fn fighter(vertices: &mut Vec<Vertex>, fighter: &Fighter, color: [f32; 4], hit_flash: bool) {
    let body_color = if hit_flash && fighter.hit_flash > 0 {
        colors::HIT_FLASH
    } else {
        color
    };
    vertices.extend(rect(&fighter.body(), body_color));

    if fighter.attack_ticks > 0 {
        vertices.extend(rect(&fighter.attack_box(), colors::ATTACK_BOX));
    }
}

/// Build every triangle for one frame, back to front
pub fn scene(state: &GameState, hit_flash: bool) -> Vec<Vertex> {
    let stage = Aabb::from_pos_size(Vec2::ZERO, Vec2::new(STAGE_WIDTH, STAGE_HEIGHT));
    let ground = Aabb::from_pos_size(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(STAGE_WIDTH, STAGE_HEIGHT - GROUND_Y),
    );

    let mut vertices = Vec::with_capacity(6 * 7);
    vertices.extend(rect(&stage, colors::SKY));
    vertices.extend(rect(&ground, colors::GROUND));

    fighter(&mut vertices, &state.player, colors::PLAYER, hit_flash);
    fighter(&mut vertices, &state.enemy, colors::ENEMY, hit_flash);

    if state.phase != GamePhase::Fighting {
        vertices.extend(rect(&stage, colors::DIM_OVERLAY));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let r = Aabb::from_pos_size(Vec2::new(10.0, 20.0), Vec2::new(50.0, 150.0));
        let vertices = rect(&r, colors::PLAYER);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 10.0 || x == 60.0));
        assert!(ys.iter().all(|&y| y == 20.0 || y == 170.0));
    }

    #[test]
    fn test_scene_layers() {
        let mut state = GameState::new(1, 60);
        // Sky, ground, two bodies
        assert_eq!(scene(&state, true).len(), 4 * 6);

        state.player.start_attack();
        assert_eq!(scene(&state, true).len(), 5 * 6);

        state.phase = GamePhase::Paused;
        let vertices = scene(&state, true);
        assert_eq!(vertices.len(), 6 * 6);
        assert_eq!(vertices.last().map(|v| v.color), Some(colors::DIM_OVERLAY));
    }

    #[test]
    fn test_hit_flash_respects_setting() {
        let mut state = GameState::new(1, 60);
        state.enemy.take_damage(20);

        let enemy_color = |vertices: &[Vertex]| vertices[18].color;
        assert_eq!(enemy_color(&scene(&state, true)), colors::HIT_FLASH);
        assert_eq!(enemy_color(&scene(&state, false)), colors::ENEMY);
    }
}
