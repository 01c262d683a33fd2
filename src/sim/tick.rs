//! State reducer
//!
//! Folds clock ticks and player moves into successive game states. `reduce` is
//! total: every (state, event) pair produces a new state and nothing panics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve;
use super::motion::move_all;
use super::state::GameState;
use crate::consts::*;
use crate::torus_wrap;

/// One input to the reducer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Clock pulse; `elapsed` is the pulse counter
    Tick { elapsed: u64 },
    MoveLeft { step: f32 },
    MoveRight { step: f32 },
    MoveUp { step: f32 },
    MoveDown { step: f32 },
    Restart,
}

/// Produce the state that follows `state` after `event`
pub fn reduce(state: &GameState, event: &Event) -> GameState {
    if state.is_game_over {
        return match event {
            Event::Restart => {
                log::info!("Restarting (final high score {})", state.highest_score);
                GameState::initial()
            }
            _ => freeze(state),
        };
    }

    match *event {
        Event::MoveLeft { step } => shift_sideways(state, -step),
        Event::MoveRight { step } => shift_sideways(state, step),
        Event::MoveUp { step } => GameState {
            token: state
                .token
                .with_pos(torus_wrap(state.token.pos - Vec2::new(0.0, step))),
            up_move_count: state.up_move_count + 1,
            ..state.clone()
        },
        Event::MoveDown { step } => GameState {
            token: state
                .token
                .with_pos(torus_wrap(state.token.pos + Vec2::new(0.0, step))),
            ..state.clone()
        },
        Event::Tick { elapsed } => tick(state, elapsed),
        // Only a finished run can be restarted
        Event::Restart => state.clone(),
    }
}

/// Advance traffic one step and resolve collisions.
///
/// Called on a finished run this starts over instead. `reduce` intercepts
/// every event for finished runs first, so only direct callers see that path.
pub fn tick(state: &GameState, elapsed: u64) -> GameState {
    if state.is_game_over {
        return GameState::initial();
    }

    let moved = GameState {
        obstacles: move_all(&state.obstacles),
        platforms: move_all(&state.platforms),
        elapsed_ticks: elapsed,
        ..state.clone()
    };
    let next = resolve(&moved);

    if next.is_game_over {
        log::info!(
            "Game over at tick {} (score {}, high score {})",
            elapsed,
            next.score,
            next.highest_score
        );
    }
    next
}

/// Sideways moves are locked in the goal row
fn shift_sideways(state: &GameState, dx: f32) -> GameState {
    let pos = state.token.pos;
    if pos.y <= LATERAL_MOVE_MIN_Y {
        return state.clone();
    }
    GameState {
        token: state.token.with_pos(torus_wrap(pos + Vec2::new(dx, 0.0))),
        ..state.clone()
    }
}

/// Stop all traffic on a finished run
fn freeze(state: &GameState) -> GameState {
    GameState {
        obstacles: state
            .obstacles
            .iter()
            .map(|c| c.with_velocity(0.0))
            .collect(),
        platforms: state
            .platforms
            .iter()
            .map(|l| l.with_velocity(0.0))
            .collect(),
        ..state.clone()
    }
}

/// Fold a sequence of events, keeping every intermediate state
pub fn replay<I>(state: &GameState, events: I) -> Vec<GameState>
where
    I: IntoIterator<Item = Event>,
{
    events
        .into_iter()
        .scan(state.clone(), |current, event| {
            *current = reduce(current, &event);
            Some(current.clone())
        })
        .collect()
}

/// Fold a sequence of events and return the final state
pub fn run<I>(state: &GameState, events: I) -> GameState
where
    I: IntoIterator<Item = Event>,
{
    events
        .into_iter()
        .fold(state.clone(), |current, event| reduce(&current, &event))
}
