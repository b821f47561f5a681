//! Host facade
//!
//! Owns the simulation, the input reducer and the audio front end. A host
//! (window loop, test harness, headless runner) feeds raw events, calls
//! `tick` at the fixed rate and reads a `Snapshot` back.

use crate::audio::{AudioManager, AudioSink};
use crate::input::{InputEvent, InputState};
use crate::sim::snapshot::Snapshot;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::tick;
use crate::tuning::Tuning;

pub struct Game {
    pub state: GameState,
    input: InputState,
    audio: AudioManager,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            input: InputState::new(),
            audio: AudioManager::default(),
        }
    }

    /// Route sound cues to `sink`
    pub fn with_audio(mut self, sink: Box<dyn AudioSink>) -> Self {
        self.audio = AudioManager::new(sink);
        self
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// Queue raw input for the next tick
    pub fn feed_input(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.input.feed(events);
    }

    /// Run one fixed step and return what happened during it
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let input = self.input.take_tick_input();
        tick(&mut self.state, &input);
        let events = self.state.drain_events();
        self.audio.play_events(&events);
        events
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::input::Key;
    use crate::sim::state::{Difficulty, Screen};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<SoundEffect>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.borrow_mut().push(effect);
        }
    }

    #[test]
    fn test_menu_to_play_via_keys() {
        let mut game = Game::new(3);
        game.feed_input([InputEvent::KeyPress(Key::Enter)]);
        game.tick();
        assert_eq!(game.snapshot().screen, Screen::DifficultySelect);

        game.feed_input([InputEvent::KeyPress(Key::Char('1'))]);
        let events = game.tick();
        assert_eq!(game.state.difficulty, Difficulty::Easy);
        assert_eq!(game.snapshot().screen, Screen::Playing);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::Spawned { .. }))
        );
    }

    #[test]
    fn test_drag_slices_and_plays_cue() {
        let tuning = Tuning {
            hazard_chance: crate::tuning::PerDifficulty {
                easy: 0.0,
                medium: 0.0,
                hard: 0.0,
            },
            pickup_chance: 0.0,
            ..Tuning::default()
        };
        let rec = Recorder::default();
        let mut game = Game::with_tuning(3, tuning).with_audio(Box::new(rec.clone()));
        game.state.start(Difficulty::Medium);
        game.tick();

        // Slicing runs before motion, so last tick's position is still exact
        let target = game.state.run.entities[0].pos;
        game.feed_input([
            InputEvent::PointerDown(target - Vec2::new(50.0, 0.0)),
            InputEvent::PointerMove(target + Vec2::new(50.0, 0.0)),
        ]);
        let events = game.tick();

        assert!(events.iter().any(|e| matches!(e, GameEvent::Sliced { .. })));
        assert!(rec.0.borrow().contains(&SoundEffect::Slice));
        assert_eq!(game.snapshot().hud.score, 1);
    }

    #[test]
    fn test_events_drained_each_tick() {
        let mut game = Game::new(3);
        game.state.start(Difficulty::Hard);
        game.tick();
        assert!(game.state.events.is_empty());
    }
}
