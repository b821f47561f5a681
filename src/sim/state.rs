//! Game state and core simulation types
//!
//! `GameState` is everything the simulation owns. The per-run part lives in
//! `Run` so a restart can swap in a fresh one in a single assignment.

use serde::{Deserialize, Serialize};

use super::combo::{ComboEffect, ComboTracker};
use super::entity::{Entity, EntityKind, FruitKind, PickupKind};
use super::progress::{Achievement, Progress};
use super::rng::SimRng;
use super::spawner::Spawner;
use super::weather::{Weather, WeatherModulator};
use crate::highscores::HighScores;
use crate::tuning::Tuning;

/// Difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a difficulty name, defaulting to Medium on unknown input
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty '{s}', defaulting to Medium");
            Difficulty::Medium
        })
    }
}

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    MainMenu,
    DifficultySelect,
    Playing,
    GameOver,
    Achievements,
    CosmeticPicker,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Lives ran out
    OutOfLives,
    /// A bomb was sliced
    Detonation,
}

/// Something that happened during a tick, for audio/feedback consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: EntityKind },
    Sliced { id: u32, fruit: FruitKind, points: u64 },
    Detonated { id: u32 },
    PickupCollected { id: u32, kind: PickupKind },
    Missed { id: u32, lives_left: u32 },
    /// A bomb or pickup left the field untouched
    Escaped { id: u32, kind: EntityKind },
    ComboTriggered { size: usize, effect: ComboEffect },
    LevelUp { level: u32 },
    WeatherChanged { weather: Weather },
    AchievementUnlocked { achievement: Achievement },
    /// `rank` is the leaderboard position the run took, if any
    GameOver {
        cause: GameOverCause,
        score: u64,
        rank: Option<usize>,
    },
}

/// Tick-counted timed effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub freeze_ticks: u32,
    pub double_score_ticks: u32,
}

/// State of a single run; replaced wholesale on reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub score: u64,
    /// Score multiplier; above 1 only while `effects.double_score_ticks > 0`
    pub multiplier: u32,
    pub lives: u32,
    pub level: u32,
    /// Ticks elapsed in this run
    pub time_ticks: u64,
    pub spawner: Spawner,
    pub weather: WeatherModulator,
    pub combo: ComboTracker,
    pub effects: ActiveEffects,
    /// Live entities, sorted by id
    pub entities: Vec<Entity>,
    /// Set when the run ended
    pub ended: Option<GameOverCause>,
}

impl Run {
    pub fn new(difficulty: Difficulty, tuning: &Tuning, rng: &mut SimRng) -> Self {
        Self {
            score: 0,
            multiplier: 1,
            lives: tuning.start_lives,
            level: 1,
            time_ticks: 0,
            spawner: Spawner::new(difficulty, tuning),
            weather: WeatherModulator::new(Weather::Calm, tuning, rng),
            combo: ComboTracker::new(),
            effects: ActiveEffects::default(),
            entities: Vec::new(),
            ended: None,
        }
    }

    /// Elapsed run time in milliseconds
    pub fn time_ms(&self) -> u64 {
        crate::ticks_to_ms(self.time_ticks)
    }

    pub fn is_frozen(&self) -> bool {
        self.effects.freeze_ticks > 0
    }

    /// Apply a combo's score boost: raise the multiplier and extend its timer
    pub fn apply_score_boost(&mut self, multiplier: u32, extend_ticks: u32, max_ticks: u32) {
        self.effects.double_score_ticks = self
            .effects
            .double_score_ticks
            .saturating_add(extend_ticks)
            .min(max_ticks);
        if self.effects.double_score_ticks > 0 {
            self.multiplier = self.multiplier.max(multiplier);
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: SimRng,
    pub tuning: Tuning,
    pub screen: Screen,
    pub difficulty: Difficulty,
    pub run: Run,
    pub progress: Progress,
    pub high_scores: HighScores,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitize();
        let mut rng = SimRng::new(seed);
        let difficulty = Difficulty::default();
        let run = Run::new(difficulty, &tuning, &mut rng);
        Self {
            seed,
            rng,
            tuning,
            screen: Screen::MainMenu,
            difficulty,
            run,
            progress: Progress::new(),
            high_scores: HighScores::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Discard the current run and start a fresh one at the current difficulty
    pub fn reset_run(&mut self) {
        self.run = Run::new(self.difficulty, &self.tuning, &mut self.rng);
        self.events.clear();
    }

    /// Begin playing at `difficulty`
    pub fn start(&mut self, difficulty: Difficulty) {
        log::info!("Starting run on {}", difficulty.as_str());
        self.difficulty = difficulty;
        self.reset_run();
        self.screen = Screen::Playing;
    }

    /// Launch an entity of `kind` from the bottom edge
    pub fn spawn(&mut self, kind: EntityKind) -> u32 {
        let id = self.next_entity_id();
        let entity = Entity::spawn(
            id,
            kind,
            self.difficulty,
            self.run.spawner.level_speed_factor,
            &self.tuning,
            &mut self.rng,
        );
        log::debug!(
            "Spawned {:?} #{} at ({:.0}, {:.0}) vel ({:.1}, {:.1})",
            kind,
            id,
            entity.pos.x,
            entity.pos.y,
            entity.vel.x,
            entity.vel.y
        );
        self.run.entities.push(entity);
        self.events.push(GameEvent::Spawned { id, kind });
        id
    }

    /// Insert a pre-built entity, assigning it a fresh id
    pub fn insert_entity(&mut self, mut entity: Entity) -> u32 {
        entity.id = self.next_entity_id();
        let id = entity.id;
        self.run.entities.push(entity);
        id
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.run.entities.iter().find(|e| e.id == id)
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn unlock(&mut self, achievement: Achievement) {
        if self.progress.unlock(achievement) {
            self.events.push(GameEvent::AchievementUnlocked { achievement });
        }
    }

    /// End the run: record it and switch to the game over screen
    pub(crate) fn end_run(&mut self, cause: GameOverCause) {
        if self.run.ended.is_some() {
            return;
        }
        log::info!(
            "Game over ({:?}): score {}, level {}, best combo {}",
            cause,
            self.run.score,
            self.run.level,
            self.progress.highest_combo
        );
        self.run.ended = Some(cause);
        let rank = self.high_scores.add_score(
            self.run.score,
            self.run.level,
            self.difficulty,
            self.run.time_ticks,
        );
        self.screen = Screen::GameOver;
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.run.score,
            rank,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.screen, Screen::MainMenu);
        assert_eq!(state.difficulty, Difficulty::Medium);
        assert_eq!(state.run.lives, 3);
        assert_eq!(state.run.multiplier, 1);
        assert_eq!(state.run.level, 1);
        assert_eq!(state.run.weather.current(), Weather::Calm);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert_eq!(Difficulty::parse_or_default("nightmare"), Difficulty::Medium);
    }

    #[test]
    fn test_reset_discards_run() {
        let mut state = GameState::new(1);
        state.start(Difficulty::Hard);
        state.spawn(EntityKind::Hazard);
        state.run.score = 42;
        state.reset_run();
        assert!(state.run.entities.is_empty());
        assert_eq!(state.run.score, 0);
        assert_eq!(state.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_score_boost_capped() {
        let mut state = GameState::new(1);
        state.run.apply_score_boost(4, 300, 600);
        assert_eq!(state.run.multiplier, 4);
        assert_eq!(state.run.effects.double_score_ticks, 300);
        state.run.apply_score_boost(4, 300, 600);
        state.run.apply_score_boost(4, 300, 600);
        assert_eq!(state.run.effects.double_score_ticks, 600);
    }

    #[test]
    fn test_end_run_records_once() {
        let mut state = GameState::new(1);
        state.start(Difficulty::Easy);
        state.run.score = 12;
        state.end_run(GameOverCause::Detonation);
        state.end_run(GameOverCause::OutOfLives);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                cause: GameOverCause::Detonation,
                score: 12,
                rank: Some(1),
            }]
        );
        assert_eq!(state.screen, Screen::GameOver);
        assert_eq!(state.high_scores.entries.len(), 1);
        assert_eq!(state.run.ended, Some(GameOverCause::Detonation));
    }

    #[test]
    fn test_state_serializes() {
        let mut state = GameState::new(77);
        state.start(Difficulty::Medium);
        state.spawn(EntityKind::SliceTarget(FruitKind::Pear));
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run.entities, state.run.entities);
        assert_eq!(back.seed, 77);
    }
}
