//! Per-tick motion for lane traffic

use glam::Vec2;

use super::state::Entity;
use crate::torus_wrap;

/// Advance an entity by its velocity and wrap it back onto the canvas
pub fn move_entity(e: &Entity) -> Entity {
    e.with_pos(torus_wrap(e.pos + Vec2::new(e.velocity, 0.0)))
}

/// Advance every entity in a roster
pub fn move_all(roster: &[Entity]) -> Vec<Entity> {
    roster.iter().map(move_entity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CANVAS_SIZE;
    use crate::sim::world::{LaneLayout, build_lanes};
    use crate::wrap_coord;
    use proptest::prelude::*;

    #[test]
    fn test_move_right_then_wrap() {
        let log = build_lanes(&LaneLayout::logs())
            .into_iter()
            .find(|l| l.velocity > 0.0)
            .unwrap()
            .with_pos(Vec2::new(599.75, 250.0));
        let moved = move_entity(&log);
        assert!((moved.pos.x - 0.25).abs() < 1e-4);
        assert_eq!(moved.pos.y, 250.0);
        // Source entity untouched
        assert_eq!(log.pos.x, 599.75);
    }

    #[test]
    fn test_move_left_wraps_below_zero() {
        let car = build_lanes(&LaneLayout::cars())
            .into_iter()
            .find(|c| c.velocity < 0.0)
            .unwrap()
            .with_pos(Vec2::new(0.5, 350.0));
        let moved = move_entity(&car);
        assert!((moved.pos.x - (CANVAS_SIZE - 0.7)).abs() < 1e-3);
    }

    #[test]
    fn test_move_all_keeps_order() {
        let cars = build_lanes(&LaneLayout::cars());
        let moved = move_all(&cars);
        let before: Vec<&str> = cars.iter().map(|c| c.id.as_str()).collect();
        let after: Vec<&str> = moved.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(before, after);
    }

    proptest! {
        #[test]
        fn prop_wrap_stays_on_canvas(
            x in 0.0f32..CANVAS_SIZE,
            y in 0.0f32..CANVAS_SIZE,
            vx in -599.0f32..599.0,
            vy in -599.0f32..599.0,
        ) {
            let p = torus_wrap(Vec2::new(x, y) + Vec2::new(vx, vy));
            prop_assert!(p.x >= 0.0 && p.x < CANVAS_SIZE);
            prop_assert!(p.y >= 0.0 && p.y < CANVAS_SIZE);
        }

        #[test]
        fn prop_wrap_is_identity_on_canvas(v in 0.0f32..CANVAS_SIZE) {
            prop_assert_eq!(wrap_coord(v, CANVAS_SIZE), v);
        }
    }
}
