//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can override any subset from a
//! JSON file. Missing fields fall back to the compiled-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::frames_to_ms;
use crate::sim::state::Difficulty;
use crate::sim::weather::{Weather, WeatherEffect};

/// Minimum spawn delay in frame intervals (hard floor for any tuning file)
pub const MIN_SPAWN_DELAY_FRAMES: u32 = 15;

/// Inclusive floating point range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Swap the bounds if they are inverted
    fn ordered(self, name: &str) -> Self {
        if self.min > self.max {
            log::warn!("{name}: min {} > max {}, swapping", self.min, self.max);
            Self::new(self.max, self.min)
        } else {
            self
        }
    }
}

/// Inclusive tick range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSpan {
    pub min: u32,
    pub max: u32,
}

/// One value per difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerDifficulty<T> {
    pub easy: T,
    pub medium: T,
    pub hard: T,
}

impl<T: Copy> PerDifficulty<T> {
    pub fn get(&self, difficulty: Difficulty) -> T {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Physics/accuracy multipliers for each weather
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerWeather {
    pub calm: WeatherEffect,
    pub rain: WeatherEffect,
    pub snow: WeatherEffect,
}

impl PerWeather {
    pub fn get(&self, weather: Weather) -> WeatherEffect {
        match weather {
            Weather::Calm => self.calm,
            Weather::Rain => self.rain,
            Weather::Snow => self.snow,
        }
    }
}

/// Complete game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field & physics ===
    pub field_width: f32,
    pub field_height: f32,
    pub entity_radius: f32,
    pub gravity: f32,
    /// Initial vertical launch velocity (negative = upward)
    pub launch_vy: Span,
    /// Initial horizontal velocity is drawn from [-launch_vx, launch_vx]
    pub launch_vx: f32,
    pub max_vertical_speed: f32,
    pub max_horizontal_speed: f32,
    /// Ticks a sliced entity lingers before it is retired
    pub exit_ticks: u32,

    // === Difficulty ===
    pub speed_factor: PerDifficulty<f32>,
    pub hazard_chance: PerDifficulty<f64>,
    pub base_spawn_delay_ms: PerDifficulty<u32>,
    /// Level up every N spawn cycles
    pub level_up_every: u32,
    pub spawn_delay_step_ms: u32,
    pub spawn_delay_floor_ms: u32,
    pub level_speed_step: f32,
    pub start_lives: u32,

    // === Pickups ===
    pub pickup_chance: f64,
    pub slow_factor: f32,
    pub double_score_multiplier: u32,
    pub double_score_ticks: u32,
    pub freeze_ticks: u32,

    // === Combos ===
    pub combo_window_ms: u64,
    pub combo_duration_ticks: u32,
    /// Bonus points (before multiplier) per fruit destroyed by a blast combo
    pub combo_blast_bonus: u64,
    pub combo_freeze_ticks: u32,
    pub combo_score_multiplier: u32,
    pub combo_score_extend_ticks: u32,
    pub combo_score_max_ticks: u32,

    // === Weather ===
    pub weather_interval_ticks: TickSpan,
    pub rain_score_threshold: u64,
    pub snow_score_threshold: u64,
    pub weather_effects: PerWeather,

    // === Achievements ===
    pub combo_master_threshold: usize,
    pub high_score_threshold: u64,
    pub hard_mode_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            entity_radius: ENTITY_RADIUS,
            gravity: GRAVITY,
            launch_vy: Span::new(-15.0, -11.0),
            launch_vx: 3.0,
            max_vertical_speed: MAX_VERTICAL_SPEED,
            max_horizontal_speed: MAX_HORIZONTAL_SPEED,
            exit_ticks: 30,

            speed_factor: PerDifficulty {
                easy: 0.8,
                medium: 1.0,
                hard: 1.2,
            },
            hazard_chance: PerDifficulty {
                easy: 0.10,
                medium: 0.15,
                hard: 0.25,
            },
            base_spawn_delay_ms: PerDifficulty {
                easy: frames_to_ms(70),
                medium: frames_to_ms(50),
                hard: frames_to_ms(35),
            },
            level_up_every: 5,
            spawn_delay_step_ms: frames_to_ms(2),
            spawn_delay_floor_ms: frames_to_ms(MIN_SPAWN_DELAY_FRAMES),
            level_speed_step: 0.05,
            start_lives: START_LIVES,

            pickup_chance: 0.04,
            slow_factor: 0.6,
            double_score_multiplier: 2,
            double_score_ticks: 10 * TICK_RATE,
            freeze_ticks: 3 * TICK_RATE,

            combo_window_ms: COMBO_WINDOW_MS,
            combo_duration_ticks: 3 * TICK_RATE,
            combo_blast_bonus: 3,
            combo_freeze_ticks: 5 * TICK_RATE,
            combo_score_multiplier: 4,
            combo_score_extend_ticks: 5 * TICK_RATE,
            combo_score_max_ticks: 10 * TICK_RATE,

            weather_interval_ticks: TickSpan { min: 300, max: 600 },
            rain_score_threshold: 100,
            snow_score_threshold: 200,
            weather_effects: PerWeather {
                calm: WeatherEffect::new(1.0, 1.0, 1.0),
                rain: WeatherEffect::new(0.9, 1.0, 0.8),
                snow: WeatherEffect::new(0.8, 0.8, 0.7),
            },

            combo_master_threshold: 5,
            high_score_threshold: 100,
            hard_mode_level: 5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table from JSON and sanitize it
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitize())
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values so the simulation can never be put into an
    /// invalid state by configuration
    pub fn sanitize(mut self) -> Self {
        let defaults = Self::default();

        self.entity_radius = positive(
            "entity_radius",
            self.entity_radius,
            defaults.entity_radius,
            MAX_FIELD_EXTENT,
        );
        self.field_width = positive(
            "field_width",
            self.field_width,
            defaults.field_width,
            MAX_FIELD_EXTENT,
        );
        self.field_height = positive(
            "field_height",
            self.field_height,
            defaults.field_height,
            MAX_FIELD_EXTENT,
        );
        if self.field_width < self.entity_radius * 2.0 {
            log::warn!(
                "field {}x{} too small for radius {}, using defaults",
                self.field_width,
                self.field_height,
                self.entity_radius
            );
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
            self.entity_radius = defaults.entity_radius;
        }

        // Entities only leave through the bottom and sides, so gravity must pull down
        self.gravity = positive("gravity", self.gravity, defaults.gravity, MAX_SPEED);
        let vy = self.launch_vy;
        let default_vy = defaults.launch_vy;
        self.launch_vy = Span::new(
            bounded("launch_vy.min", vy.min, default_vy.min, -MAX_SPEED, MAX_SPEED),
            bounded("launch_vy.max", vy.max, default_vy.max, -MAX_SPEED, MAX_SPEED),
        )
        .ordered("launch_vy");
        self.launch_vx = bounded(
            "launch_vx",
            self.launch_vx.abs(),
            defaults.launch_vx,
            0.0,
            MAX_SPEED,
        );
        self.max_vertical_speed = bounded(
            "max_vertical_speed",
            self.max_vertical_speed.abs(),
            defaults.max_vertical_speed,
            0.0,
            MAX_SPEED,
        );
        self.max_horizontal_speed = bounded(
            "max_horizontal_speed",
            self.max_horizontal_speed.abs(),
            defaults.max_horizontal_speed,
            0.0,
            MAX_SPEED,
        );

        for (name, factor, default) in [
            ("speed_factor.easy", &mut self.speed_factor.easy, defaults.speed_factor.easy),
            ("speed_factor.medium", &mut self.speed_factor.medium, defaults.speed_factor.medium),
            ("speed_factor.hard", &mut self.speed_factor.hard, defaults.speed_factor.hard),
        ] {
            *factor = positive(name, *factor, default, MAX_FACTOR);
        }
        self.level_speed_step = bounded(
            "level_speed_step",
            self.level_speed_step,
            defaults.level_speed_step,
            0.0,
            MAX_FACTOR,
        );
        self.slow_factor = bounded("slow_factor", self.slow_factor, defaults.slow_factor, 0.0, 1.0);
        for (name, effect, default) in [
            ("calm", &mut self.weather_effects.calm, defaults.weather_effects.calm),
            ("rain", &mut self.weather_effects.rain, defaults.weather_effects.rain),
            ("snow", &mut self.weather_effects.snow, defaults.weather_effects.snow),
        ] {
            effect.speed = positive(name, effect.speed, default.speed, MAX_FACTOR);
            effect.gravity = positive(name, effect.gravity, default.gravity, MAX_FACTOR);
            effect.accuracy = bounded(name, effect.accuracy, default.accuracy, 0.0, MAX_FACTOR);
        }

        let floor = frames_to_ms(MIN_SPAWN_DELAY_FRAMES);
        if self.spawn_delay_floor_ms < floor {
            log::warn!(
                "spawn_delay_floor_ms {} below {} frames, clamping to {floor}",
                self.spawn_delay_floor_ms,
                MIN_SPAWN_DELAY_FRAMES
            );
            self.spawn_delay_floor_ms = floor;
        }
        if self.level_up_every == 0 {
            log::warn!("level_up_every must be at least 1");
            self.level_up_every = 1;
        }

        for chance in [
            &mut self.hazard_chance.easy,
            &mut self.hazard_chance.medium,
            &mut self.hazard_chance.hard,
            &mut self.pickup_chance,
        ] {
            if !(0.0..=1.0).contains(&*chance) {
                log::warn!("probability {chance} out of [0, 1], clamping");
                *chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
            }
        }

        if self.weather_interval_ticks.min > self.weather_interval_ticks.max {
            log::warn!("weather_interval_ticks inverted, swapping");
            std::mem::swap(
                &mut self.weather_interval_ticks.min,
                &mut self.weather_interval_ticks.max,
            );
        }
        self.weather_interval_ticks.min = self.weather_interval_ticks.min.max(1);
        self.weather_interval_ticks.max = self.weather_interval_ticks.max.max(1);

        self.double_score_multiplier = self.double_score_multiplier.max(1);
        self.combo_score_multiplier = self.combo_score_multiplier.max(1);
        self
    }
}

/// Largest accepted field dimension or radius
const MAX_FIELD_EXTENT: f32 = 1.0e5;
/// Largest accepted speed, launch velocity or gravity (field units/tick)
const MAX_SPEED: f32 = 1.0e4;
/// Largest accepted multiplier
const MAX_FACTOR: f32 = 100.0;

/// `value` if finite, else `default`; then clamped to `[min, max]`
fn bounded(name: &str, value: f32, default: f32, min: f32, max: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("{name} is {value}, using default {default}");
        return default;
    }
    if value < min || value > max {
        log::warn!("{name} {value} out of [{min}, {max}], clamping");
        return value.clamp(min, max);
    }
    value
}

/// Like `bounded`, but zero or negative values fall back to `default`
fn positive(name: &str, value: f32, default: f32, max: f32) -> f32 {
    if !(value > 0.0) {
        log::warn!("{name} must be positive, got {value}; using default {default}");
        return default;
    }
    bounded(name, value, default, f32::MIN_POSITIVE, max)
}
