//! Fruit Slicer - simulation core for a fruit-slicing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, slicing, spawning, combos, screens)
//! - `input`: Reduction of raw pointer/key events into per-tick input
//! - `tuning`: Data-driven game balance
//! - `audio`: Fire-and-forget sound cue interface
//! - `game`: Host facade (feed input, tick, snapshot)
//! - `autopilot`: Demo AI driving the facade through its snapshot

pub mod audio;
pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod input;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Milliseconds covered by one tick
    pub const TICK_MS: f32 = 1000.0 / TICK_RATE as f32;

    /// Play field dimensions (y grows downward, origin top-left)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Default bounding radius for every entity
    pub const ENTITY_RADIUS: f32 = 30.0;
    /// Constant downward acceleration (field units/tick²)
    pub const GRAVITY: f32 = 0.3;

    /// Velocity clamps (field units/tick)
    pub const MAX_VERTICAL_SPEED: f32 = 20.0;
    pub const MAX_HORIZONTAL_SPEED: f32 = 8.0;

    /// Starting lives
    pub const START_LIVES: u32 = 3;
    /// Rolling window for combo detection (ms)
    pub const COMBO_WINDOW_MS: u64 = 2000;
}

/// Convert a tick count to elapsed milliseconds
#[inline]
pub fn ticks_to_ms(ticks: u64) -> u64 {
    ticks * 1000 / consts::TICK_RATE as u64
}

/// Convert a frame count (at the fixed tick rate) to milliseconds, rounded
#[inline]
pub fn frames_to_ms(frames: u32) -> u32 {
    ((frames as f32) * consts::TICK_MS).round() as u32
}
