//! Spawn scheduling and difficulty escalation
//!
//! Each spawn cycle is counted; every Nth cycle raises the level, shortens the
//! spawn delay (never below the tuned floor) and speeds up launches.

use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, FruitKind, PickupKind};
use super::rng::SimRng;
use super::state::Difficulty;
use crate::tuning::Tuning;

/// Outcome of a spawn cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnDecision {
    pub kind: EntityKind,
    /// True if this cycle raised the level
    pub leveled_up: bool,
}

/// Spawn timer and escalation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub spawn_delay_ms: u32,
    pub spawn_cycles: u32,
    pub level_speed_factor: f32,
    /// Milliseconds since the last spawn
    elapsed_ms: f32,
}

impl Spawner {
    /// New scheduler for a run. The first spawn is due immediately.
    pub fn new(difficulty: Difficulty, tuning: &Tuning) -> Self {
        let delay = tuning
            .base_spawn_delay_ms
            .get(difficulty)
            .max(tuning.spawn_delay_floor_ms);
        Self {
            spawn_delay_ms: delay,
            spawn_cycles: 0,
            level_speed_factor: 1.0,
            elapsed_ms: delay as f32 + 1.0,
        }
    }

    /// Advance by `dt_ms`; returns what to spawn if a cycle fired
    pub fn tick(
        &mut self,
        dt_ms: f32,
        difficulty: Difficulty,
        tuning: &Tuning,
        rng: &mut SimRng,
    ) -> Option<SpawnDecision> {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms <= self.spawn_delay_ms as f32 {
            return None;
        }
        self.elapsed_ms = 0.0;
        self.spawn_cycles += 1;

        let leveled_up = self.spawn_cycles.is_multiple_of(tuning.level_up_every);
        if leveled_up {
            self.spawn_delay_ms = self
                .spawn_delay_ms
                .saturating_sub(tuning.spawn_delay_step_ms)
                .max(tuning.spawn_delay_floor_ms);
            self.level_speed_factor += tuning.level_speed_step;
        }

        Some(SpawnDecision {
            kind: choose_kind(difficulty, tuning, rng),
            leveled_up,
        })
    }
}

/// Weighted draw: hazard, else pickup, else fruit
pub fn choose_kind(difficulty: Difficulty, tuning: &Tuning, rng: &mut SimRng) -> EntityKind {
    if rng.chance(tuning.hazard_chance.get(difficulty)) {
        return EntityKind::Hazard;
    }
    if rng.chance(tuning.pickup_chance) {
        if let Some(kind) = rng.pick(&PickupKind::ALL) {
            return EntityKind::Pickup(kind);
        }
    }
    EntityKind::SliceTarget(rng.pick(&FruitKind::ALL).unwrap_or(FruitKind::Apple))
}
