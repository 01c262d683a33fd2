//! Starting roster: lanes of cars and logs, the medal row and the frog

use glam::Vec2;

use super::state::{Category, Direction, Entity, EntitySpec, GameState, Shape};
use crate::consts::*;

/// Layout of one category of lane traffic
#[derive(Debug, Clone, Copy)]
pub struct LaneLayout {
    pub category: Category,
    pub lanes: u32,
    pub slots: u32,
    pub start: Vec2,
    pub width: f32,
    /// Horizontal distance between items in the same lane
    pub spacing: f32,
    pub speed: f32,
}

impl LaneLayout {
    pub fn cars() -> Self {
        Self {
            category: Category::Obstacle,
            lanes: LANES,
            slots: SLOTS_PER_LANE,
            start: Vec2::new(CAR_START_X, CAR_START_Y),
            width: CAR_WIDTH,
            spacing: CAR_SPACING,
            speed: CAR_SPEED,
        }
    }

    pub fn logs() -> Self {
        Self {
            category: Category::Platform,
            lanes: LANES,
            slots: SLOTS_PER_LANE,
            start: Vec2::new(LOG_START_X, LOG_START_Y),
            width: LOG_WIDTH,
            spacing: LOG_SPACING,
            speed: LOG_SPEED,
        }
    }
}

/// Build every item of a lane layout.
///
/// Lanes are numbered from 1 (bottom) and emitted top lane first, highest slot
/// first. Collision carry picks the first matching platform, so this order is
/// observable.
pub fn build_lanes(layout: &LaneLayout) -> Vec<Entity> {
    (1..=layout.lanes)
        .rev()
        .flat_map(|lane| (1..=layout.slots).rev().map(move |slot| (lane, slot)))
        .map(|(lane, slot)| {
            Entity::new(EntitySpec {
                category: layout.category,
                direction: Direction::for_lane(lane),
                speed: layout.speed,
                index: lane * 10 + slot,
                shape: Shape::Rect {
                    width: layout.width,
                    height: ROW_HEIGHT,
                },
                pos: Vec2::new(
                    layout.start.x + slot as f32 * layout.spacing + lane as f32 * LANE_OFFSET_X,
                    layout.start.y - lane as f32 * ROW_HEIGHT,
                ),
            })
        })
        .collect()
}

/// One row of medals, rightmost first
pub fn build_goal_markers() -> Vec<Entity> {
    (1..=MEDAL_COUNT)
        .rev()
        .map(|n| {
            Entity::new(EntitySpec {
                category: Category::GoalMarker,
                direction: Direction::Right,
                speed: 0.0,
                index: n,
                shape: Shape::Circle {
                    radius: MEDAL_RADIUS,
                },
                pos: Vec2::new(
                    MEDAL_START_X + (n - 1) as f32 * MEDAL_SPACING,
                    MEDAL_START_Y,
                ),
            })
        })
        .collect()
}

/// Full starting state. `highest_score` seeds the high-score field.
pub fn initial_state(highest_score: u32) -> GameState {
    GameState {
        elapsed_ticks: 0,
        token: Entity::token(0),
        obstacles: build_lanes(&LaneLayout::cars()),
        platforms: build_lanes(&LaneLayout::logs()),
        goal_markers: build_goal_markers(),
        goals_captured: 0,
        up_move_count: 0,
        score: 0,
        highest_score,
        is_game_over: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_sizes() {
        let state = initial_state(0);
        assert_eq!(state.obstacles.len(), 8);
        assert_eq!(state.platforms.len(), 8);
        assert_eq!(state.goal_markers.len(), 5);
        assert_eq!(state.goals_captured, 0);
        assert_eq!(state.score, 0);
        assert!(!state.is_game_over);
    }

    #[test]
    fn test_carried_high_score() {
        assert_eq!(initial_state(800).highest_score, 800);
        assert_eq!(GameState::initial().highest_score, 0);
    }

    #[test]
    fn test_car_lane_layout() {
        let cars = build_lanes(&LaneLayout::cars());
        // Top lane, highest slot comes first
        assert_eq!(cars[0].id, "car42");
        assert_eq!(cars[0].pos, Vec2::new(2.0 * 200.0 + 4.0 * 100.0, 550.0 - 200.0));
        assert_eq!(cars[0].direction, Direction::Left);
        assert!((cars[0].velocity + CAR_SPEED).abs() < f32::EPSILON);

        let last = cars.last().unwrap();
        assert_eq!(last.id, "car11");
        assert_eq!(last.pos, Vec2::new(300.0, 500.0));
        assert_eq!(last.direction, Direction::Right);
        assert!((last.velocity - CAR_SPEED).abs() < f32::EPSILON);
    }

    #[test]
    fn test_log_lanes_cover_river() {
        let logs = build_lanes(&LaneLayout::logs());
        let mut rows: Vec<f32> = logs.iter().map(|l| l.pos.y).collect();
        rows.dedup();
        assert_eq!(rows, vec![100.0, 150.0, 200.0, 250.0]);
        assert!(logs.iter().all(|l| l.category == Category::Platform));
        assert!(logs.iter().all(|l| (l.velocity.abs() - LOG_SPEED).abs() < f32::EPSILON));
    }

    #[test]
    fn test_goal_row() {
        let medals = build_goal_markers();
        let xs: Vec<f32> = medals.iter().map(|m| m.pos.x).collect();
        assert_eq!(xs, vec![500.0, 400.0, 300.0, 200.0, 100.0]);
        assert!(medals.iter().all(|m| m.pos.y == 75.0 && m.velocity == 0.0));
        assert_eq!(medals[0].id, "medal5");
    }

    #[test]
    fn test_ids_unique() {
        let state = initial_state(0);
        let mut ids: Vec<&str> = state
            .obstacles
            .iter()
            .chain(&state.platforms)
            .chain(&state.goal_markers)
            .map(|e| e.id.as_str())
            .collect();
        ids.push(&state.token.id);
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
