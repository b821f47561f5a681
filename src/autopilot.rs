//! Demo mode: a simple AI that plays the game
//!
//! Works purely from the snapshot, the same view a player has. It walks the
//! menus, restarts after a game over and, while playing, drags horizontally
//! through the lowest fruit whose stroke would not also clip a bomb.

use glam::Vec2;

use crate::input::{InputEvent, Key};
use crate::sim::collision::{DragSegment, segment_hits_circle};
use crate::sim::entity::EntityKind;
use crate::sim::snapshot::{EntityView, Snapshot};
use crate::sim::state::{Difficulty, Screen};

/// Half-length of a stroke
const STROKE_REACH: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    difficulty: Difficulty,
    /// Pointer currently held down
    dragging: bool,
    /// Runs started so far
    pub runs: u32,
}

impl Autopilot {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            dragging: false,
            runs: 0,
        }
    }

    /// Input to feed before the next tick
    pub fn plan(&mut self, snap: &Snapshot) -> Vec<InputEvent> {
        match snap.screen {
            Screen::MainMenu => vec![InputEvent::KeyPress(Key::Enter)],
            Screen::DifficultySelect => {
                self.runs += 1;
                vec![InputEvent::KeyPress(Key::Char(difficulty_key(self.difficulty)))]
            }
            Screen::GameOver => {
                self.runs += 1;
                let mut events = self.release();
                events.push(InputEvent::KeyPress(Key::Char('r')));
                events
            }
            Screen::Achievements | Screen::CosmeticPicker => {
                vec![InputEvent::KeyPress(Key::Escape)]
            }
            Screen::Playing => self.play(snap),
        }
    }

    fn play(&mut self, snap: &Snapshot) -> Vec<InputEvent> {
        let hazards: Vec<&EntityView> = snap
            .entities
            .iter()
            .filter(|e| !e.resolved && e.kind == EntityKind::Hazard)
            .collect();

        // Lowest visible fruit is the one about to be lost
        let target = snap
            .entities
            .iter()
            .filter(|e| !e.resolved && matches!(e.kind, EntityKind::SliceTarget(_)))
            .filter(|e| e.pos.y > 0.0)
            .filter_map(|e| {
                let stroke = stroke_through(e.pos);
                let clips_bomb = hazards
                    .iter()
                    .any(|h| segment_hits_circle(stroke, h.pos, h.radius, 1.0));
                (!clips_bomb).then_some((e.pos.y, stroke))
            })
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        match target {
            Some((_, stroke)) => {
                self.dragging = true;
                vec![
                    InputEvent::PointerDown(stroke.from),
                    InputEvent::PointerMove(stroke.to),
                ]
            }
            None => self.release(),
        }
    }

    fn release(&mut self) -> Vec<InputEvent> {
        if std::mem::take(&mut self.dragging) {
            vec![InputEvent::PointerUp]
        } else {
            Vec::new()
        }
    }
}

fn stroke_through(p: Vec2) -> DragSegment {
    DragSegment::new(p - Vec2::new(STROKE_REACH, 0.0), p + Vec2::new(STROKE_REACH, 0.0))
}

fn difficulty_key(difficulty: Difficulty) -> char {
    match difficulty {
        Difficulty::Easy => '1',
        Difficulty::Medium => '2',
        Difficulty::Hard => '3',
    }
}
