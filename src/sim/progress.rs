//! Achievements and cosmetic skins
//!
//! Progress outlives individual runs: a restart keeps what was unlocked.
//! Skins are purely informational for the renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::FruitKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    FirstSlice,
    ComboMaster,
    HighScorer,
    AllWeather,
    HardMode,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstSlice,
        Achievement::ComboMaster,
        Achievement::HighScorer,
        Achievement::AllWeather,
        Achievement::HardMode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FirstSlice => "First Slice",
            Achievement::ComboMaster => "Combo Master",
            Achievement::HighScorer => "High Scorer",
            Achievement::AllWeather => "All Weather",
            Achievement::HardMode => "Hard Mode",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstSlice => "Slice your first fruit",
            Achievement::ComboMaster => "Reach a combo of 5 or more",
            Achievement::HighScorer => "Score 100 points",
            Achievement::AllWeather => "Play through every weather",
            Achievement::HardMode => "Reach level 5 on Hard",
        }
    }

    /// Skin rewarded for this achievement, if any
    fn reward(&self) -> Option<(FruitKind, Skin)> {
        match self {
            Achievement::HighScorer => Some((FruitKind::Watermelon, Skin::Frost)),
            Achievement::ComboMaster => Some((FruitKind::Banana, Skin::Rainbow)),
            _ => None,
        }
    }
}

/// Cosmetic variant for a fruit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Skin {
    #[default]
    Default,
    Gold,
    Rainbow,
    Frost,
}

/// Unlocked achievements, skins and best combo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    unlocked: BTreeMap<Achievement, bool>,
    skins: BTreeMap<FruitKind, Vec<Skin>>,
    equipped: BTreeMap<FruitKind, Skin>,
    pub highest_combo: usize,
}

impl Default for Progress {
    fn default() -> Self {
        let unlocked = Achievement::ALL.iter().map(|&a| (a, false)).collect();
        let mut skins: BTreeMap<FruitKind, Vec<Skin>> = FruitKind::ALL
            .iter()
            .map(|&f| (f, vec![Skin::Default]))
            .collect();
        skins
            .entry(FruitKind::Apple)
            .or_default()
            .push(Skin::Gold);
        let equipped = FruitKind::ALL.iter().map(|&f| (f, Skin::Default)).collect();
        Self {
            unlocked,
            skins,
            equipped,
            highest_combo: 0,
        }
    }
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.get(&achievement).copied().unwrap_or(false)
    }

    /// Unlock an achievement. Returns true only the first time.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.is_unlocked(achievement) {
            return false;
        }
        self.unlocked.insert(achievement, true);
        log::info!("Achievement unlocked: {}", achievement.name());
        if let Some((fruit, skin)) = achievement.reward() {
            self.unlock_skin(fruit, skin);
        }
        true
    }

    /// Achievement flags in display order
    pub fn achievements(&self) -> Vec<(Achievement, bool)> {
        Achievement::ALL
            .iter()
            .map(|&a| (a, self.is_unlocked(a)))
            .collect()
    }

    pub fn unlock_skin(&mut self, fruit: FruitKind, skin: Skin) {
        let list = self.skins.entry(fruit).or_default();
        if !list.contains(&skin) {
            list.push(skin);
            log::info!("Skin unlocked: {} {:?}", fruit.as_str(), skin);
        }
    }

    pub fn unlocked_skins(&self, fruit: FruitKind) -> &[Skin] {
        self.skins.get(&fruit).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Equip a skin. Locked skins are refused.
    pub fn equip(&mut self, fruit: FruitKind, skin: Skin) -> bool {
        if !self.unlocked_skins(fruit).contains(&skin) {
            log::debug!("Refusing locked skin {:?} for {}", skin, fruit.as_str());
            return false;
        }
        self.equipped.insert(fruit, skin);
        true
    }

    pub fn equipped(&self, fruit: FruitKind) -> Skin {
        self.equipped.get(&fruit).copied().unwrap_or_default()
    }

    pub fn equipped_all(&self) -> BTreeMap<FruitKind, Skin> {
        self.equipped.clone()
    }

    /// Track the best combo. Returns true if it improved.
    pub fn record_combo(&mut self, size: usize) -> bool {
        if size > self.highest_combo {
            self.highest_combo = size;
            true
        } else {
            false
        }
    }
}
