//! Rolling combo detection
//!
//! Every slice records its category with a timestamp. Entries older than the
//! window are pruned each tick; a combo fires when the window holds at least
//! two distinct categories and no combo is currently active.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::entity::ComboCategory;
use crate::tuning::Tuning;

/// Effect requested by a combo, applied by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboEffect {
    /// Slice every airborne fruit, awarding `bonus` (times multiplier) each
    Blast { bonus: u64 },
    /// Stop all motion for `ticks`
    Freeze { ticks: u32 },
    /// Raise the multiplier and extend its timer, capped at `max_ticks`
    ScoreBoost {
        multiplier: u32,
        extend_ticks: u32,
        max_ticks: u32,
    },
    /// Combo counted, no special effect for this mix
    Plain,
}

impl ComboEffect {
    /// Effect for a set of distinct categories
    pub fn for_categories(categories: &BTreeSet<ComboCategory>, tuning: &Tuning) -> Self {
        use ComboCategory::*;

        if categories.contains(&Fire) && categories.contains(&Explosion) {
            ComboEffect::Blast {
                bonus: tuning.combo_blast_bonus,
            }
        } else if categories.contains(&Speed) && categories.contains(&Freeze) {
            ComboEffect::Freeze {
                ticks: tuning.combo_freeze_ticks,
            }
        } else if categories.contains(&Score) && categories.len() >= 2 {
            ComboEffect::ScoreBoost {
                multiplier: tuning.combo_score_multiplier,
                extend_ticks: tuning.combo_score_extend_ticks,
                max_ticks: tuning.combo_score_max_ticks,
            }
        } else {
            ComboEffect::Plain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComboEffect::Blast { .. } => "Blast",
            ComboEffect::Freeze { .. } => "Freeze",
            ComboEffect::ScoreBoost { .. } => "Score Boost",
            ComboEffect::Plain => "Combo",
        }
    }
}

/// A fired combo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboTrigger {
    pub categories: BTreeSet<ComboCategory>,
    /// Number of slices in the window when it fired
    pub size: usize,
    pub effect: ComboEffect,
}

/// Slice history and active-combo timer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboTracker {
    window: VecDeque<(ComboCategory, u64)>,
    active_ticks: u32,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful slice at `now_ms`
    pub fn record(&mut self, category: ComboCategory, now_ms: u64) {
        self.window.push_back((category, now_ms));
    }

    /// Drop entries strictly older than `window_ms`
    pub fn prune(&mut self, now_ms: u64, window_ms: u64) {
        while let Some(&(_, t)) = self.window.front() {
            if now_ms.saturating_sub(t) > window_ms {
                self.window.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_ticks > 0
    }

    pub fn active_ticks(&self) -> u32 {
        self.active_ticks
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Distinct categories currently in the window
    pub fn distinct(&self) -> BTreeSet<ComboCategory> {
        self.window.iter().map(|&(c, _)| c).collect()
    }

    /// Per-tick bookkeeping: count down the active combo, prune the window and
    /// fire a new combo if the window qualifies
    pub fn update(&mut self, now_ms: u64, tuning: &Tuning) -> Option<ComboTrigger> {
        self.active_ticks = self.active_ticks.saturating_sub(1);
        self.prune(now_ms, tuning.combo_window_ms);

        if self.is_active() {
            return None;
        }
        let categories = self.distinct();
        if categories.len() < 2 {
            return None;
        }

        self.active_ticks = tuning.combo_duration_ticks.max(1);
        let effect = ComboEffect::for_categories(&categories, tuning);
        Some(ComboTrigger {
            categories,
            size: self.window.len(),
            effect,
        })
    }
}
