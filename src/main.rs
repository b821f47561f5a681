//! Fruit Slicer headless entry point
//!
//! Runs the simulation at full speed with the demo autopilot at the controls
//! and logs each finished run.
//!
//! Usage: `fruit-slicer [tuning.json] [seed] [easy|medium|hard]`

use fruit_slicer::autopilot::Autopilot;
use fruit_slicer::consts::TICK_RATE;
use fruit_slicer::sim::{Difficulty, GameEvent};
use fruit_slicer::{Game, Tuning};

/// Stop after this many finished runs
const MAX_RUNS: usize = 5;
/// Hard cap on simulated time (ten minutes)
const MAX_TICKS: u64 = 10 * 60 * TICK_RATE as u64;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Fruit Slicer (headless) starting...");

    let mut args = std::env::args().skip(1).peekable();
    let tuning = match args.peek() {
        Some(arg) if arg.ends_with(".json") => {
            let path = args.next().unwrap_or_default();
            log::info!("Loading tuning from {path}");
            Tuning::load(path)
        }
        _ => Tuning::default(),
    };
    let seed = args
        .next()
        .and_then(|s| match s.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Invalid seed '{s}' ({e}), using default");
                None
            }
        })
        .unwrap_or(42);
    let difficulty = args
        .next()
        .map(|s| Difficulty::parse_or_default(&s))
        .unwrap_or_default();

    log::info!("Seed {seed}, difficulty {}", difficulty.as_str());

    let mut game = Game::with_tuning(seed, tuning);
    let mut pilot = Autopilot::new(difficulty);
    let mut finished = Vec::new();

    for _ in 0..MAX_TICKS {
        let plan = pilot.plan(&game.snapshot());
        game.feed_input(plan);
        for event in game.tick() {
            match event {
                GameEvent::GameOver { cause, score, rank } => {
                    log::info!(
                        "Run {} over ({:?}) with {} points at level {}{}",
                        finished.len() + 1,
                        cause,
                        score,
                        game.state.run.level,
                        rank.map(|r| format!(", high score #{r}"))
                            .unwrap_or_default()
                    );
                    finished.push(score);
                }
                GameEvent::AchievementUnlocked { achievement } => {
                    log::info!("Unlocked: {}", achievement.name());
                }
                _ => {}
            }
        }
        if finished.len() >= MAX_RUNS {
            break;
        }
    }

    let snap = game.snapshot();
    log::info!(
        "Finished {} runs, best {}",
        finished.len(),
        game.state.high_scores.top_score().unwrap_or(0)
    );
    for (i, entry) in snap.high_scores.iter().enumerate() {
        log::info!(
            "#{} {} (level {}, {})",
            i + 1,
            entry.score,
            entry.level,
            entry.difficulty.as_str()
        );
    }
    for (achievement, unlocked) in &snap.achievements {
        let mark = if *unlocked { "x" } else { " " };
        log::info!("[{mark}] {}: {}", achievement.name(), achievement.description());
    }
}
