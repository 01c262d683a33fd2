//! Frog Crossing - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Pure state reducer (motion, wrapping, collisions, goals)
//! - `input`: Event source merging the game clock with key presses
//! - `view`: Presentation contract and id-keyed scene graph
//! - `terminal`: Crossterm presenter
//! - `settings`: User preferences loaded from JSON
//! - `highscores`: In-memory table of finished runs

pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
pub mod terminal;
pub mod view;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Side length of the square play canvas (pixels)
    pub const CANVAS_SIZE: f32 = 600.0;
    /// Default clock period in milliseconds
    pub const GAME_TICK_INTERVAL_MS: u64 = 10;
    /// Default distance covered by one key press
    pub const MOVE_STEP: f32 = 50.0;

    /// Speed added to every obstacle and platform after a full clear
    pub const SPEED_INCREASE: f32 = 0.5;
    /// Points for each captured goal marker
    pub const CAPTURE_BONUS: u32 = 200;

    /// Height of one lane row
    pub const ROW_HEIGHT: f32 = 50.0;
    /// Extra x offset per lane so lanes don't line up
    pub const LANE_OFFSET_X: f32 = 100.0;
    /// Lanes of obstacles and of platforms
    pub const LANES: u32 = 4;
    /// Items in each lane
    pub const SLOTS_PER_LANE: u32 = 2;

    /// Obstacles (cars) - bottom lane sits just above the start bank
    pub const CAR_WIDTH: f32 = 50.0;
    pub const CAR_START_X: f32 = 0.0;
    pub const CAR_START_Y: f32 = 550.0;
    pub const CAR_SPACING: f32 = 200.0;
    pub const CAR_SPEED: f32 = 1.2;

    /// Platforms (logs)
    pub const LOG_WIDTH: f32 = 150.0;
    pub const LOG_START_X: f32 = 0.0;
    pub const LOG_START_Y: f32 = 300.0;
    pub const LOG_SPACING: f32 = 300.0;
    pub const LOG_SPEED: f32 = 0.5;

    /// Goal markers (medals), one row across the top
    pub const MEDAL_COUNT: u32 = 5;
    pub const MEDAL_START_X: f32 = 100.0;
    pub const MEDAL_START_Y: f32 = 75.0;
    pub const MEDAL_SPACING: f32 = 100.0;
    pub const MEDAL_RADIUS: f32 = 20.0;

    /// Controlled token (frog) spawn point on the start bank
    pub const FROG_START_X: f32 = CANVAS_SIZE / 2.0;
    pub const FROG_START_Y: f32 = 575.0;
    pub const FROG_RADIUS: f32 = 25.0;

    /// Below this y (exclusive) the token is on the road
    pub const ROAD_BAND_TOP: f32 = 300.0;
    /// Below this y (exclusive) and up to ROAD_BAND_TOP the token is in the river
    pub const RIVER_BAND_TOP: f32 = 100.0;
    /// Sideways moves only work below this line; the goal row is locked
    pub const LATERAL_MOVE_MIN_Y: f32 = RIVER_BAND_TOP;
}

/// Component-wise sum of two vectors
#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

/// Component-wise difference `a - b`
#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

/// Euclidean length
#[inline]
pub fn magnitude(a: Vec2) -> f32 {
    a.length()
}

/// Wrap a single coordinate onto `[0, size)` with one correction step.
///
/// Only one canvas length is added or removed, which is enough as long as the
/// displacement that produced `v` is smaller than `size`.
#[inline]
pub fn wrap_coord(v: f32, size: f32) -> f32 {
    if v < 0.0 {
        // Tiny negatives round up to exactly `size` in f32
        let wrapped = v + size;
        if wrapped >= size { 0.0 } else { wrapped }
    } else if v >= size {
        v - size
    } else {
        v
    }
}

/// Wrap a position around the edges of the canvas (toroidal topology)
#[inline]
pub fn torus_wrap(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, consts::CANVAS_SIZE),
        wrap_coord(pos.y, consts::CANVAS_SIZE),
    )
}
