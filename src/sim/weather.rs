//! Weather modulation of physics and slicing accuracy
//!
//! Weather changes on a randomized timer, and high scores push it toward more
//! adverse conditions. Score escalation is one-directional: once a threshold
//! has been crossed the weather never falls below the matching level again.

use serde::{Deserialize, Serialize};

use super::rng::SimRng;
use crate::tuning::Tuning;

/// Global weather condition, ordered from mildest to most adverse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Calm,
    Rain,
    Snow,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Calm, Weather::Rain, Weather::Snow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Calm => "Calm",
            Weather::Rain => "Rain",
            Weather::Snow => "Snow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "calm" | "sunny" => Some(Weather::Calm),
            "rain" | "rainy" => Some(Weather::Rain),
            "snow" | "snowy" => Some(Weather::Snow),
            _ => None,
        }
    }

    /// Parse a weather name, defaulting to Calm on unknown input
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown weather '{s}', defaulting to Calm");
            Weather::Calm
        })
    }

    fn index(self) -> u32 {
        self as u32
    }
}

/// Multipliers applied by the current weather
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherEffect {
    /// Scales displacement per tick
    pub speed: f32,
    /// Scales gravitational acceleration
    pub gravity: f32,
    /// Scales the effective slicing radius
    pub accuracy: f32,
}

impl WeatherEffect {
    pub const fn new(speed: f32, gravity: f32, accuracy: f32) -> Self {
        Self {
            speed,
            gravity,
            accuracy,
        }
    }
}

impl Default for WeatherEffect {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Time- and score-driven weather state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherModulator {
    current: Weather,
    effect: WeatherEffect,
    /// Ticks since the last change
    timer: u32,
    /// Ticks until the next random change
    interval: u32,
    /// Least adverse weather allowed by score escalation
    floor: Weather,
    /// Every weather observed since the run began
    seen: [bool; 3],
}

impl WeatherModulator {
    pub fn new(initial: Weather, tuning: &Tuning, rng: &mut SimRng) -> Self {
        let mut seen = [false; 3];
        seen[initial.index() as usize] = true;
        Self {
            current: initial,
            effect: tuning.weather_effects.get(initial),
            timer: 0,
            interval: Self::draw_interval(tuning, rng),
            floor: Weather::Calm,
            seen,
        }
    }

    fn draw_interval(tuning: &Tuning, rng: &mut SimRng) -> u32 {
        let span = tuning.weather_interval_ticks;
        rng.range_u32(span.min, span.max)
    }

    pub fn current(&self) -> Weather {
        self.current
    }

    /// Multipliers consumed by physics integration and collision
    pub fn current_effect(&self) -> WeatherEffect {
        self.effect
    }

    /// Ticks left until the next random change
    pub fn ticks_until_change(&self) -> u32 {
        self.interval.saturating_sub(self.timer)
    }

    /// True once every weather kind has been observed
    pub fn seen_all(&self) -> bool {
        self.seen.iter().all(|&s| s)
    }

    fn set(&mut self, weather: Weather, tuning: &Tuning) -> bool {
        let weather = weather.max(self.floor);
        self.seen[weather.index() as usize] = true;
        if weather == self.current {
            return false;
        }
        log::info!("Weather: {} -> {}", self.current.as_str(), weather.as_str());
        self.current = weather;
        self.effect = tuning.weather_effects.get(weather);
        true
    }

    /// Advance one tick. Returns the new weather if it changed.
    pub fn tick(&mut self, score: u64, tuning: &Tuning, rng: &mut SimRng) -> Option<Weather> {
        let mut changed = false;

        self.timer += 1;
        if self.timer >= self.interval {
            let next = rng.pick(&Weather::ALL).unwrap_or_default();
            self.timer = 0;
            self.interval = Self::draw_interval(tuning, rng);
            changed |= self.set(next, tuning);
        }

        let escalated = if score >= tuning.snow_score_threshold {
            Weather::Snow
        } else if score >= tuning.rain_score_threshold {
            Weather::Rain
        } else {
            Weather::Calm
        };
        if escalated > self.floor {
            self.floor = escalated;
        }
        if self.current < self.floor {
            changed |= self.set(self.floor, tuning);
        }

        changed.then_some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tuning, SimRng) {
        (Tuning::default(), SimRng::new(2024))
    }

    #[test]
    fn test_from_str_fallback() {
        assert_eq!(Weather::from_str("RAINY"), Some(Weather::Rain));
        assert_eq!(Weather::from_str("hail"), None);
        assert_eq!(Weather::parse_or_default("hail"), Weather::Calm);
    }

    #[test]
    fn test_random_change_within_interval() {
        let (tuning, mut rng) = setup();
        let mut w = WeatherModulator::new(Weather::Calm, &tuning, &mut rng);
        let interval = w.ticks_until_change();
        assert!((300..=600).contains(&interval));

        for _ in 0..interval - 1 {
            assert_eq!(w.tick(0, &tuning, &mut rng), None);
        }
        // Timer resets on the interval tick even if the draw repeats the weather
        w.tick(0, &tuning, &mut rng);
        assert!((300..=600).contains(&w.ticks_until_change()));
    }

    #[test]
    fn test_score_escalation_is_one_directional() {
        let (tuning, mut rng) = setup();
        let mut w = WeatherModulator::new(Weather::Calm, &tuning, &mut rng);

        assert_eq!(w.tick(100, &tuning, &mut rng), Some(Weather::Rain));
        assert_eq!(w.current_effect(), tuning.weather_effects.rain);

        assert_eq!(w.tick(250, &tuning, &mut rng), Some(Weather::Snow));

        // Score can't drop in practice, but even a lower value never reverts
        for _ in 0..2000 {
            w.tick(0, &tuning, &mut rng);
            assert_eq!(w.current(), Weather::Snow);
        }
    }

    #[test]
    fn test_seen_all() {
        let (tuning, mut rng) = setup();
        let mut w = WeatherModulator::new(Weather::Calm, &tuning, &mut rng);
        assert!(!w.seen_all());
        w.tick(100, &tuning, &mut rng);
        w.tick(200, &tuning, &mut rng);
        assert!(w.seen_all());
    }
}
