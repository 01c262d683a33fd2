//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - No clocks, no I/O, no randomness
//! - A state is never edited after it is built; each event yields a new one
//! - Stable roster order (first match wins where order matters)

pub mod collision;
pub mod motion;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Band, Contacts, bodies_collided, resolve};
pub use motion::{move_all, move_entity};
pub use state::{Category, Direction, Entity, EntitySpec, GamePhase, GameState, Shape};
pub use tick::{Event, reduce, replay, run, tick};
pub use world::{LaneLayout, build_goal_markers, build_lanes, initial_state};
