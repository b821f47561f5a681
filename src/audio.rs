//! Sound cue interface
//!
//! The simulation never plays audio itself. It emits `GameEvent`s, the host
//! facade maps them to `SoundEffect`s and hands them to an `AudioSink`.
//! Cues are fire-and-forget: a sink that drops everything is always valid.

use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Fruit sliced
    Slice,
    /// Bomb sliced
    Explosion,
    /// Pickup collected
    Pickup,
    /// Combo fired
    Combo,
    /// Fruit fell without being sliced
    Miss,
    /// Achievement unlocked
    Achievement,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Cue to play for an event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Sliced { .. } => Some(SoundEffect::Slice),
            GameEvent::Detonated { .. } => Some(SoundEffect::Explosion),
            GameEvent::PickupCollected { .. } => Some(SoundEffect::Pickup),
            GameEvent::ComboTriggered { .. } => Some(SoundEffect::Combo),
            GameEvent::Missed { .. } => Some(SoundEffect::Miss),
            GameEvent::AchievementUnlocked { .. } => Some(SoundEffect::Achievement),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Spawned { .. }
            | GameEvent::Escaped { .. }
            | GameEvent::LevelUp { .. }
            | GameEvent::WeatherChanged { .. } => None,
        }
    }
}

/// Anything that can play (or ignore) a cue
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that ignores every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Sink that logs cues at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("cue {:?} @ {:.2}", effect, volume);
    }
}

/// Volume handling in front of a sink
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Forward the cues for a batch of events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
