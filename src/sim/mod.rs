//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combo;
pub mod entity;
pub mod physics;
pub mod progress;
pub mod rng;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod weather;

pub use collision::{DragSegment, segment_hits_circle, segment_point_distance, slice_hits};
pub use combo::{ComboEffect, ComboTracker, ComboTrigger};
pub use entity::{
    ComboCategory, Entity, EntityKind, FruitKind, Lifecycle, PickupKind, Resolution,
};
pub use progress::{Achievement, Progress, Skin};
pub use rng::SimRng;
pub use snapshot::{EntityView, Hud, Snapshot};
pub use spawner::Spawner;
pub use state::{Difficulty, GameEvent, GameOverCause, GameState, Run, Screen};
pub use tick::{Command, TickInput, tick};
pub use weather::{Weather, WeatherEffect, WeatherModulator};
