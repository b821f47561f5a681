//! Read-only view of the state for presentation
//!
//! A renderer or UI reads a `Snapshot` after each tick instead of reaching
//! into `GameState`. It carries only what is drawn: entity placements with
//! their skins, the HUD line and the menu data.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::Serialize;

use super::entity::{EntityKind, FruitKind};
use super::progress::{Achievement, Skin};
use super::state::{Difficulty, GameState, Screen};
use super::weather::Weather;
use crate::highscores::HighScoreEntry;

/// One entity as it should be drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    /// True while playing the post-resolution exit
    pub resolved: bool,
    /// Equipped skin for fruit
    pub skin: Option<Skin>,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub difficulty: Difficulty,
    pub weather: Weather,
    pub combo_active: bool,
    pub multiplier: u32,
    pub freeze_remaining: u32,
    pub double_score_remaining: u32,
    pub highest_combo: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub entities: Vec<EntityView>,
    pub hud: Hud,
    pub achievements: Vec<(Achievement, bool)>,
    pub equipped: BTreeMap<FruitKind, Skin>,
    pub high_scores: Vec<HighScoreEntry>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let run = &state.run;
        let entities = run
            .entities
            .iter()
            .filter(|e| !e.is_expired())
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                pos: e.pos,
                radius: e.radius,
                resolved: !e.is_airborne(),
                skin: match e.kind {
                    EntityKind::SliceTarget(fruit) => Some(state.progress.equipped(fruit)),
                    _ => None,
                },
            })
            .collect();

        Self {
            screen: state.screen,
            entities,
            hud: Hud {
                score: run.score,
                lives: run.lives,
                level: run.level,
                difficulty: state.difficulty,
                weather: run.weather.current(),
                combo_active: run.combo.is_active(),
                multiplier: run.multiplier,
                freeze_remaining: run.effects.freeze_ticks,
                double_score_remaining: run.effects.double_score_ticks,
                highest_combo: state.progress.highest_combo,
            },
            achievements: state.progress.achievements(),
            equipped: state.progress.equipped_all(),
            high_scores: state.high_scores.entries.clone(),
        }
    }
}
