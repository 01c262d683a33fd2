//! Game state and entity types
//!
//! Every value here is a plain snapshot. The reducer never edits a state it was
//! handed; it clones, changes the copy and returns it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Token is alive and the world is moving
    Playing,
    /// Run ended, waiting for a restart
    GameOver,
}

/// What an entity is in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// The player's frog
    Token,
    /// Cars on the road
    Obstacle,
    /// Logs on the river
    Platform,
    /// Medals in the goal row
    GoalMarker,
}

impl Category {
    /// Prefix used to build entity ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Category::Token => "frog",
            Category::Obstacle => "car",
            Category::Platform => "log",
            Category::GoalMarker => "medal",
        }
    }
}

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Centred on the entity position
    Circle { radius: f32 },
    /// Entity position is the top-left corner
    Rect { width: f32, height: f32 },
}

/// Travel direction, the sign convention for velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Even lanes drift left, odd lanes drift right
    pub fn for_lane(lane: u32) -> Self {
        if lane % 2 == 0 {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Named constructor parameters for [`Entity::new`]
#[derive(Debug, Clone, Copy)]
pub struct EntitySpec {
    pub category: Category,
    pub direction: Direction,
    /// Unsigned speed; the direction supplies the sign
    pub speed: f32,
    /// Numeric part of the id
    pub index: u32,
    pub shape: Shape,
    pub pos: Vec2,
}

/// Any object that takes part in the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable id: category prefix followed by the index
    pub id: String,
    pub index: u32,
    pub category: Category,
    pub shape: Shape,
    pub pos: Vec2,
    pub direction: Direction,
    /// Signed horizontal speed per tick
    pub velocity: f32,
}

impl Entity {
    pub fn new(spec: EntitySpec) -> Self {
        Self {
            id: format!("{}{}", spec.category.id_prefix(), spec.index),
            index: spec.index,
            category: spec.category,
            shape: spec.shape,
            pos: spec.pos,
            direction: spec.direction,
            velocity: spec.direction.sign() * spec.speed,
        }
    }

    /// A fresh token on the start bank.
    ///
    /// `capture_index` ends up in both `index` and `id` (`frog{n}`). Presenters
    /// use it to tell the live token apart from tokens parked on captured goals.
    pub fn token(capture_index: u32) -> Self {
        Self::new(EntitySpec {
            category: Category::Token,
            direction: Direction::Left,
            speed: 0.0,
            index: capture_index,
            shape: Shape::Circle {
                radius: FROG_RADIUS,
            },
            pos: Vec2::new(FROG_START_X, FROG_START_Y),
        })
    }

    /// Circle radius, 0 for rectangles
    pub fn radius(&self) -> f32 {
        match self.shape {
            Shape::Circle { radius } => radius,
            Shape::Rect { .. } => 0.0,
        }
    }

    /// Geometric centre (rectangles are stored by their top-left corner)
    pub fn center(&self) -> Vec2 {
        match self.shape {
            Shape::Circle { .. } => self.pos,
            Shape::Rect { width, height } => self.pos + Vec2::new(width / 2.0, height / 2.0),
        }
    }

    /// Same entity with a different position
    pub fn with_pos(&self, pos: Vec2) -> Self {
        Self {
            pos,
            ..self.clone()
        }
    }

    /// Same entity with a different velocity
    pub fn with_velocity(&self, velocity: f32) -> Self {
        Self {
            velocity,
            ..self.clone()
        }
    }
}

/// Complete game snapshot (immutable, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Value of the last clock tick folded in
    pub elapsed_ticks: u64,
    /// The player's frog
    pub token: Entity,
    /// Cars, in roster order
    pub obstacles: Vec<Entity>,
    /// Logs, in roster order (first match wins when carrying)
    pub platforms: Vec<Entity>,
    /// Medals; never removed, capture is tracked by `goals_captured`
    pub goal_markers: Vec<Entity>,
    pub goals_captured: u32,
    /// Successful up moves, shown on the HUD
    pub up_move_count: u32,
    pub score: u32,
    pub highest_score: u32,
    pub is_game_over: bool,
}

impl GameState {
    /// Canonical starting state for a fresh process or a restart
    pub fn initial() -> Self {
        super::world::initial_state(0)
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Playing
        }
    }

    /// Number of goal markers in the world
    pub fn goal_count(&self) -> u32 {
        self.goal_markers.len() as u32
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_and_velocity_sign() {
        let car = Entity::new(EntitySpec {
            category: Category::Obstacle,
            direction: Direction::Left,
            speed: 1.2,
            index: 42,
            shape: Shape::Rect {
                width: 50.0,
                height: 50.0,
            },
            pos: Vec2::new(10.0, 20.0),
        });
        assert_eq!(car.id, "car42");
        assert!((car.velocity + 1.2).abs() < f32::EPSILON);
        assert_eq!(car.center(), Vec2::new(35.0, 45.0));
        assert_eq!(car.radius(), 0.0);
    }

    #[test]
    fn test_token_carries_capture_index() {
        let frog = Entity::token(3);
        assert_eq!(frog.id, "frog3");
        assert_eq!(frog.index, 3);
        assert_eq!(frog.velocity, 0.0);
        assert_eq!(frog.pos, Vec2::new(300.0, 575.0));
        assert_eq!(frog.center(), frog.pos);
    }

    #[test]
    fn test_with_pos_leaves_original() {
        let frog = Entity::token(0);
        let moved = frog.with_pos(Vec2::new(1.0, 2.0));
        assert_eq!(frog.pos, Vec2::new(300.0, 575.0));
        assert_eq!(moved.pos, Vec2::new(1.0, 2.0));
        assert_eq!(moved.id, frog.id);
    }

    #[test]
    fn test_lane_direction_parity() {
        assert_eq!(Direction::for_lane(2), Direction::Left);
        assert_eq!(Direction::for_lane(1), Direction::Right);
    }

    #[test]
    fn test_phase_follows_flag() {
        let mut state = GameState::initial();
        assert_eq!(state.phase(), GamePhase::Playing);
        state.is_game_over = true;
        assert_eq!(state.phase(), GamePhase::GameOver);
    }
}
