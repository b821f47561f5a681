//! Flying entities: fruit to slice, bombs to avoid, and power-up pickups
//!
//! All three share one physical representation; what happens when they are
//! resolved is decided by matching on `EntityKind`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::SimRng;
use super::state::Difficulty;
use crate::tuning::Tuning;

/// Fruit variety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Banana,
    Watermelon,
    Pear,
    Strawberry,
}

impl FruitKind {
    pub const ALL: [FruitKind; 5] = [
        FruitKind::Apple,
        FruitKind::Banana,
        FruitKind::Watermelon,
        FruitKind::Pear,
        FruitKind::Strawberry,
    ];

    /// Combo category carried by this fruit
    pub fn category(self) -> ComboCategory {
        match self {
            FruitKind::Apple => ComboCategory::Fire,
            FruitKind::Banana => ComboCategory::Speed,
            FruitKind::Watermelon => ComboCategory::Explosion,
            FruitKind::Pear => ComboCategory::Freeze,
            FruitKind::Strawberry => ComboCategory::Score,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Banana => "banana",
            FruitKind::Watermelon => "watermelon",
            FruitKind::Pear => "pear",
            FruitKind::Strawberry => "strawberry",
        }
    }
}

/// Tag used to match slices into combos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComboCategory {
    Fire,
    Speed,
    Explosion,
    Freeze,
    Score,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Slows every airborne fruit
    Slow,
    /// Multiplies slice score for a while
    DoubleScore,
    /// Stops all motion for a while
    Freeze,
    /// +1 life
    ExtraLife,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::Slow,
        PickupKind::DoubleScore,
        PickupKind::Freeze,
        PickupKind::ExtraLife,
    ];
}

/// Entity variant with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    SliceTarget(FruitKind),
    Hazard,
    Pickup(PickupKind),
}

/// Lifecycle of an entity. Moves only forward: Airborne -> Resolved -> Expired
/// (or straight to Expired).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// In flight and interactive
    Airborne,
    /// Resolved; plays a decorative exit for the remaining ticks
    Resolved { exit_ticks: u32 },
    /// Ready to be retired from the pool
    Expired,
}

/// What resolving an entity asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A fruit was sliced
    Sliced(FruitKind),
    /// A bomb went off; the run ends
    Detonated,
    /// A pickup was collected
    Collected(PickupKind),
}

/// A flying entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub radius: f32,
    pub life: Lifecycle,
}

impl Entity {
    /// Launch a new entity from below the field.
    ///
    /// The entity starts one radius under the bottom edge with its horizontal
    /// position keeping it clear of the side margins. Launch velocity is drawn
    /// from the tuned ranges and scaled by the difficulty and level factors.
    pub fn spawn(
        id: u32,
        kind: EntityKind,
        difficulty: Difficulty,
        level_speed_factor: f32,
        tuning: &Tuning,
        rng: &mut SimRng,
    ) -> Self {
        let radius = tuning.entity_radius.max(1.0);
        let x = rng.uniform(radius, tuning.field_width - radius);
        let scale = tuning.speed_factor.get(difficulty) * level_speed_factor;
        let vy = rng.uniform(tuning.launch_vy.min, tuning.launch_vy.max) * scale;
        let vx = rng.uniform(-tuning.launch_vx, tuning.launch_vx) * scale;

        Self {
            id,
            kind,
            pos: Vec2::new(x, tuning.field_height + radius),
            vel: Vec2::new(vx, vy),
            gravity: tuning.gravity,
            radius,
            life: Lifecycle::Airborne,
        }
    }

    /// Place an entity directly (used by tests and scripted setups)
    pub fn at(id: u32, kind: EntityKind, pos: Vec2, vel: Vec2, radius: f32, gravity: f32) -> Self {
        let radius = if radius > 0.0 {
            radius
        } else {
            log::warn!("Entity {id} with non-positive radius {radius}, clamping to 1");
            1.0
        };
        Self {
            id,
            kind,
            pos,
            vel,
            gravity,
            radius,
            life: Lifecycle::Airborne,
        }
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.life == Lifecycle::Airborne
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life == Lifecycle::Expired
    }

    #[inline]
    pub fn is_slice_target(&self) -> bool {
        matches!(self.kind, EntityKind::SliceTarget(_))
    }

    /// Resolve the entity (slice, detonate or collect).
    ///
    /// Only the first call has an effect; later calls return `None` and leave
    /// the entity untouched.
    pub fn resolve(&mut self, exit_ticks: u32) -> Option<Resolution> {
        if !self.is_airborne() {
            return None;
        }
        let resolution = match self.kind {
            EntityKind::SliceTarget(fruit) => {
                self.life = Lifecycle::Resolved { exit_ticks };
                Resolution::Sliced(fruit)
            }
            EntityKind::Hazard => {
                self.life = Lifecycle::Resolved { exit_ticks };
                Resolution::Detonated
            }
            EntityKind::Pickup(kind) => {
                self.life = Lifecycle::Expired;
                Resolution::Collected(kind)
            }
        };
        Some(resolution)
    }

    /// Count down the decorative exit. Returns true on the tick it expires.
    pub fn advance_exit(&mut self) -> bool {
        if let Lifecycle::Resolved { exit_ticks } = self.life {
            if exit_ticks <= 1 {
                self.life = Lifecycle::Expired;
                return true;
            }
            self.life = Lifecycle::Resolved {
                exit_ticks: exit_ticks - 1,
            };
        }
        false
    }

    /// True once the entity has left the field by more than one radius through
    /// the bottom or either side.
    ///
    /// Rising past the top is not an exit: gravity always brings a ballistic
    /// entity back down.
    pub fn is_off_field(&self, width: f32, height: f32) -> bool {
        let r = self.radius;
        self.pos.y > height + r || self.pos.x < -r || self.pos.x > width + r
    }
}
