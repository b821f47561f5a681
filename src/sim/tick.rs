//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within a Playing
//! tick the phases always run in this order:
//! spawn -> slicing -> physics -> expiry -> combo/timer bookkeeping.
//! A freshly spawned entity can therefore be sliced on the tick it appears,
//! before it has moved.

use super::collision::{DragSegment, slice_hits};
use super::combo::{ComboEffect, ComboTrigger};
use super::entity::{FruitKind, Lifecycle, PickupKind, Resolution};
use super::physics::{SpeedLimits, integrate_all};
use super::progress::{Achievement, Skin};
use super::state::{Difficulty, GameEvent, GameOverCause, GameState, Screen};
use crate::consts::TICK_MS;

/// Discrete commands derived from key presses and menu picks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Confirm,
    Cancel,
    Restart,
    OpenAchievements,
    OpenCosmetics,
    SelectDifficulty(Difficulty),
    Equip(FruitKind, Skin),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Pointer motion this tick while dragging
    pub slice: Option<DragSegment>,
    /// Commands in arrival order
    pub commands: Vec<Command>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    for &command in &input.commands {
        handle_command(state, command);
    }

    if state.screen != Screen::Playing {
        return;
    }

    state.run.time_ticks += 1;

    spawn_phase(state);

    if let Some(segment) = input.slice {
        slice_phase(state, segment);
        if state.screen != Screen::Playing {
            return;
        }
    }

    physics_phase(state);

    expiry_phase(state);
    if state.screen != Screen::Playing {
        return;
    }

    bookkeeping_phase(state);
}

/// Screen state machine
fn handle_command(state: &mut GameState, command: Command) {
    match (state.screen, command) {
        (Screen::MainMenu, Command::Cancel) => {}
        (Screen::Playing, Command::Cancel) => {
            log::info!("Run abandoned at score {}", state.run.score);
            state.reset_run();
            state.screen = Screen::MainMenu;
        }
        (_, Command::Cancel) => state.screen = Screen::MainMenu,

        (Screen::MainMenu, Command::Confirm) => state.screen = Screen::DifficultySelect,
        (Screen::MainMenu, Command::OpenAchievements) => state.screen = Screen::Achievements,
        (Screen::MainMenu, Command::OpenCosmetics) => state.screen = Screen::CosmeticPicker,

        (Screen::DifficultySelect, Command::SelectDifficulty(difficulty)) => {
            state.start(difficulty)
        }
        (Screen::DifficultySelect, Command::Confirm) => state.start(state.difficulty),

        (Screen::GameOver, Command::Restart | Command::Confirm) => state.start(state.difficulty),

        (Screen::CosmeticPicker, Command::Equip(fruit, skin)) => {
            state.progress.equip(fruit, skin);
        }

        (screen, command) => {
            log::debug!("Ignoring {:?} on {:?}", command, screen);
        }
    }
}

fn spawn_phase(state: &mut GameState) {
    let spawner = &mut state.run.spawner;
    let Some(decision) = spawner.tick(TICK_MS, state.difficulty, &state.tuning, &mut state.rng)
    else {
        return;
    };

    if decision.leveled_up {
        state.run.level += 1;
        log::info!(
            "Level {} (spawn delay {} ms, speed x{:.2})",
            state.run.level,
            state.run.spawner.spawn_delay_ms,
            state.run.spawner.level_speed_factor
        );
        state.events.push(GameEvent::LevelUp {
            level: state.run.level,
        });
        if state.difficulty == Difficulty::Hard && state.run.level >= state.tuning.hard_mode_level {
            state.unlock(Achievement::HardMode);
        }
    }

    state.spawn(decision.kind);
}

fn slice_phase(state: &mut GameState, segment: DragSegment) {
    let accuracy = state.run.weather.current_effect().accuracy;
    let exit_ticks = state.tuning.exit_ticks;

    let resolutions: Vec<(u32, Resolution)> = state
        .run
        .entities
        .iter_mut()
        .filter(|e| slice_hits(segment, e, accuracy))
        .filter_map(|e| e.resolve(exit_ticks).map(|r| (e.id, r)))
        .collect();

    // Everything the stroke cut counts; a bomb ends the run afterwards
    let mut detonated = false;
    for (id, resolution) in resolutions {
        match resolution {
            Resolution::Sliced(fruit) => {
                let points = state.run.multiplier as u64;
                state.run.score += points;
                let now = state.run.time_ms();
                state.run.combo.record(fruit.category(), now);
                state.events.push(GameEvent::Sliced { id, fruit, points });
                state.unlock(Achievement::FirstSlice);
            }
            Resolution::Detonated => {
                state.events.push(GameEvent::Detonated { id });
                detonated = true;
            }
            Resolution::Collected(kind) => {
                state.events.push(GameEvent::PickupCollected { id, kind });
                apply_pickup(state, kind);
            }
        }
    }
    if detonated {
        state.end_run(GameOverCause::Detonation);
    }
}

fn apply_pickup(state: &mut GameState, kind: PickupKind) {
    let tuning = &state.tuning;
    let run = &mut state.run;
    match kind {
        PickupKind::Slow => {
            for e in run
                .entities
                .iter_mut()
                .filter(|e| e.is_airborne() && e.is_slice_target())
            {
                e.vel *= tuning.slow_factor;
            }
        }
        PickupKind::DoubleScore => {
            run.effects.double_score_ticks = run
                .effects
                .double_score_ticks
                .max(tuning.double_score_ticks);
            if run.effects.double_score_ticks > 0 {
                run.multiplier = run.multiplier.max(tuning.double_score_multiplier);
            }
        }
        PickupKind::Freeze => {
            run.effects.freeze_ticks = run.effects.freeze_ticks.max(tuning.freeze_ticks);
        }
        PickupKind::ExtraLife => run.lives += 1,
    }
}

fn physics_phase(state: &mut GameState) {
    if state.run.is_frozen() {
        return;
    }
    let limits = SpeedLimits {
        max_vx: state.tuning.max_horizontal_speed,
        max_vy: state.tuning.max_vertical_speed,
    };
    let weather = state.run.weather.current_effect();
    integrate_all(&mut state.run.entities, weather, limits);
}

/// Mark off-field entities expired, count down exits, then compact the pool
fn expiry_phase(state: &mut GameState) {
    let (width, height) = (state.tuning.field_width, state.tuning.field_height);

    let mut missed = Vec::new();
    let mut escaped = Vec::new();
    for e in state.run.entities.iter_mut() {
        match e.life {
            Lifecycle::Airborne => {
                if e.is_off_field(width, height) {
                    e.life = Lifecycle::Expired;
                    if e.is_slice_target() {
                        missed.push(e.id);
                    } else {
                        escaped.push((e.id, e.kind));
                    }
                }
            }
            Lifecycle::Resolved { .. } => {
                e.advance_exit();
            }
            Lifecycle::Expired => {}
        }
    }
    state.run.entities.retain(|e| !e.is_expired());

    for (id, kind) in escaped {
        state.events.push(GameEvent::Escaped { id, kind });
    }
    let any_missed = !missed.is_empty();
    for id in missed {
        state.run.lives = state.run.lives.saturating_sub(1);
        state.events.push(GameEvent::Missed {
            id,
            lives_left: state.run.lives,
        });
    }
    if any_missed && state.run.lives == 0 {
        state.end_run(GameOverCause::OutOfLives);
    }
}

fn bookkeeping_phase(state: &mut GameState) {
    let run = &mut state.run;

    run.effects.freeze_ticks = run.effects.freeze_ticks.saturating_sub(1);
    if run.effects.double_score_ticks > 0 {
        run.effects.double_score_ticks -= 1;
        if run.effects.double_score_ticks == 0 {
            run.multiplier = 1;
        }
    }

    let now = run.time_ms();
    if let Some(trigger) = run.combo.update(now, &state.tuning) {
        apply_combo(state, trigger);
    }

    let score = state.run.score;
    if let Some(weather) = state.run.weather.tick(score, &state.tuning, &mut state.rng) {
        state.events.push(GameEvent::WeatherChanged { weather });
    }
    if state.run.weather.seen_all() {
        state.unlock(Achievement::AllWeather);
    }
    if state.run.score >= state.tuning.high_score_threshold {
        state.unlock(Achievement::HighScorer);
    }
}

fn apply_combo(state: &mut GameState, trigger: ComboTrigger) {
    log::info!(
        "Combo x{} {:?} -> {}",
        trigger.size,
        trigger.categories,
        trigger.effect.as_str()
    );

    match trigger.effect {
        ComboEffect::Blast { bonus } => {
            let exit_ticks = state.tuning.exit_ticks;
            let points = bonus * state.run.multiplier as u64;
            let blasted: Vec<(u32, FruitKind)> = state
                .run
                .entities
                .iter_mut()
                .filter(|e| e.is_slice_target())
                .filter_map(|e| match e.resolve(exit_ticks) {
                    Some(Resolution::Sliced(fruit)) => Some((e.id, fruit)),
                    _ => None,
                })
                .collect();
            for (id, fruit) in blasted {
                state.run.score += points;
                state.events.push(GameEvent::Sliced { id, fruit, points });
            }
        }
        ComboEffect::Freeze { ticks } => {
            state.run.effects.freeze_ticks = state.run.effects.freeze_ticks.max(ticks);
        }
        ComboEffect::ScoreBoost {
            multiplier,
            extend_ticks,
            max_ticks,
        } => state
            .run
            .apply_score_boost(multiplier, extend_ticks, max_ticks),
        ComboEffect::Plain => {}
    }

    state.events.push(GameEvent::ComboTriggered {
        size: trigger.size,
        effect: trigger.effect,
    });
    state.progress.record_combo(trigger.size);
    if state.progress.highest_combo >= state.tuning.combo_master_threshold {
        state.unlock(Achievement::ComboMaster);
    }
}
