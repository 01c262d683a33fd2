//! Overlap tests and collision resolution
//!
//! The frog is always a circle. Cars and logs are rectangles, medals are
//! circles. After traffic has moved, [`resolve`] decides what the overlaps
//! mean: a captured goal, a full clear, a ride on a log, or death.

use glam::Vec2;

use super::state::{Entity, GameState, Shape};
use crate::consts::*;

/// Check whether circle `a` overlaps body `b`.
///
/// Against a rectangle the hit is a disjunction: the circle centre sits in the
/// rectangle's row and is within `r + w/2` of its centre horizontally, or the
/// centre distance is under `r + h/2`. The second term catches corner approaches.
pub fn bodies_collided(a: &Entity, b: &Entity) -> bool {
    let r = a.radius();
    match b.shape {
        Shape::Rect { width, height } => {
            let d = a.pos - b.center();
            (d.y.abs() <= height / 2.0 && d.x.abs() < r + width / 2.0)
                || d.length() < r + height / 2.0
        }
        Shape::Circle { radius } => a.pos.distance(b.pos) < r + radius,
    }
}

/// Vertical region the token is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Cars can hit the token
    Road,
    /// Token must be on a log
    River,
    /// Goal row and anything above it
    Safe,
}

impl Band {
    pub fn of(pos: Vec2) -> Self {
        if pos.y > ROAD_BAND_TOP {
            Band::Road
        } else if pos.y > RIVER_BAND_TOP {
            Band::River
        } else {
            Band::Safe
        }
    }
}

/// Overlap summary for the token against the current roster
#[derive(Debug, Clone, PartialEq)]
pub struct Contacts {
    /// Any car overlaps the token
    pub obstacle_hit: bool,
    /// Velocity of the first overlapping log, in roster order
    pub platform_velocity: Option<f32>,
    /// Medals currently overlapping the token
    pub goals_touched: u32,
    pub band: Band,
}

impl Contacts {
    pub fn of(state: &GameState) -> Self {
        let token = &state.token;
        Self {
            obstacle_hit: state.obstacles.iter().any(|c| bodies_collided(token, c)),
            platform_velocity: state
                .platforms
                .iter()
                .find(|l| bodies_collided(token, l))
                .map(|l| l.velocity),
            goals_touched: state
                .goal_markers
                .iter()
                .filter(|m| bodies_collided(token, m))
                .count() as u32,
            band: Band::of(token.pos),
        }
    }

    /// Whether the token dies where it stands
    pub fn is_fatal(&self) -> bool {
        match self.band {
            Band::Road => self.obstacle_hit,
            Band::River => self.platform_velocity.is_none(),
            Band::Safe => false,
        }
    }
}

/// Push a velocity further along its own direction
fn escalate(e: &Entity) -> Entity {
    e.with_velocity(e.velocity + e.direction.sign() * SPEED_INCREASE)
}

/// Turn the token's overlaps into the next state
pub fn resolve(state: &GameState) -> GameState {
    let contacts = Contacts::of(state);
    let dead = contacts.is_fatal();
    let touched = contacts.goals_touched;

    if touched > 0 && touched + state.goals_captured >= state.goal_count() {
        log::debug!(
            "All {} goals captured at tick {}, speeding up",
            state.goal_count(),
            state.elapsed_ticks
        );
        return GameState {
            token: Entity::token(0),
            goals_captured: 0,
            score: 0,
            highest_score: state.highest_score + CAPTURE_BONUS,
            obstacles: state.obstacles.iter().map(escalate).collect(),
            platforms: state.platforms.iter().map(escalate).collect(),
            is_game_over: dead,
            ..state.clone()
        };
    }

    if touched > 0 {
        let captured = state.goals_captured + touched;
        log::debug!("Goal captured ({}/{})", captured, state.goal_count());
        return GameState {
            token: Entity::token(captured),
            goals_captured: captured,
            score: state.score + CAPTURE_BONUS,
            highest_score: state.highest_score + CAPTURE_BONUS,
            is_game_over: dead,
            ..state.clone()
        };
    }

    if dead {
        log::debug!(
            "Token {} died at ({:.1}, {:.1}) in {:?}",
            state.token.id,
            state.token.pos.x,
            state.token.pos.y,
            contacts.band
        );
    }

    let token = match contacts.platform_velocity {
        Some(v) => state.token.with_pos(state.token.pos + Vec2::new(v, 0.0)),
        None => state.token.clone(),
    };

    GameState {
        token,
        is_game_over: dead,
        ..state.clone()
    }
}
