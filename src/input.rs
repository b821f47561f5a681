//! Pointer/key input reduction
//!
//! Raw events are folded into a drag state (is the pointer down, where was it
//! last tick, where is it now) plus a queue of discrete commands. Once per
//! tick the host takes a `TickInput` snapshot out of it.

use glam::Vec2;

use crate::sim::collision::DragSegment;
use crate::sim::entity::FruitKind;
use crate::sim::progress::Skin;
use crate::sim::state::Difficulty;
use crate::sim::tick::{Command, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
}

impl Key {
    /// Map a key to a command
    pub fn command(self) -> Option<Command> {
        match self {
            Key::Enter => Some(Command::Confirm),
            Key::Escape => Some(Command::Cancel),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'r' => Some(Command::Restart),
                'a' => Some(Command::OpenAchievements),
                'c' => Some(Command::OpenCosmetics),
                '1' => Some(Command::SelectDifficulty(Difficulty::Easy)),
                '2' => Some(Command::SelectDifficulty(Difficulty::Medium)),
                '3' => Some(Command::SelectDifficulty(Difficulty::Hard)),
                _ => None,
            },
        }
    }
}

/// Raw input event from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    KeyPress(Key),
    /// Cosmetic picker selection
    Equip(FruitKind, Skin),
}

/// Accumulated input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    dragging: bool,
    last_pos: Option<Vec2>,
    current_pos: Option<Vec2>,
    /// Pointer went down and up again before a tick consumed it
    tapped: bool,
    commands: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.current_pos
    }

    /// Fold one event into the state
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(pos) => {
                self.dragging = true;
                self.last_pos = Some(pos);
                self.current_pos = Some(pos);
            }
            InputEvent::PointerMove(pos) => {
                if self.current_pos.is_none() {
                    self.last_pos = Some(pos);
                }
                self.current_pos = Some(pos);
            }
            InputEvent::PointerUp => {
                if self.dragging {
                    self.tapped = true;
                }
                self.dragging = false;
            }
            InputEvent::KeyPress(key) => {
                if let Some(cmd) = key.command() {
                    self.commands.push(cmd);
                }
            }
            InputEvent::Equip(fruit, skin) => self.commands.push(Command::Equip(fruit, skin)),
        }
    }

    /// Fold a batch of events
    pub fn feed(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.push(event);
        }
    }

    /// Produce this tick's input and roll the pointer history forward.
    ///
    /// A drag that was released between ticks still contributes the motion it
    /// made before release.
    pub fn take_tick_input(&mut self) -> TickInput {
        let slice = match (self.dragging || self.tapped, self.last_pos, self.current_pos) {
            (true, Some(from), Some(to)) => Some(DragSegment::new(from, to)),
            _ => None,
        };
        self.last_pos = self.current_pos;
        self.tapped = false;
        TickInput {
            slice,
            commands: std::mem::take(&mut self.commands),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_slice_without_drag() {
        let mut input = InputState::new();
        input.push(InputEvent::PointerMove(Vec2::new(10.0, 10.0)));
        input.push(InputEvent::PointerMove(Vec2::new(50.0, 10.0)));
        assert_eq!(input.take_tick_input().slice, None);
    }

    #[test]
    fn test_drag_segment_rolls_forward() {
        let mut input = InputState::new();
        input.feed([
            InputEvent::PointerDown(Vec2::new(0.0, 0.0)),
            InputEvent::PointerMove(Vec2::new(10.0, 0.0)),
        ]);
        let t1 = input.take_tick_input();
        assert_eq!(
            t1.slice,
            Some(DragSegment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)))
        );

        input.push(InputEvent::PointerMove(Vec2::new(20.0, 5.0)));
        let t2 = input.take_tick_input();
        assert_eq!(
            t2.slice,
            Some(DragSegment::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 5.0)))
        );

        // Holding still: zero-length segment at the current position
        let t3 = input.take_tick_input();
        assert_eq!(
            t3.slice,
            Some(DragSegment::new(Vec2::new(20.0, 5.0), Vec2::new(20.0, 5.0)))
        );
    }

    #[test]
    fn test_release_between_ticks_keeps_motion() {
        let mut input = InputState::new();
        input.feed([
            InputEvent::PointerDown(Vec2::new(0.0, 0.0)),
            InputEvent::PointerMove(Vec2::new(30.0, 0.0)),
            InputEvent::PointerUp,
        ]);
        assert!(input.take_tick_input().slice.is_some());
        assert!(input.take_tick_input().slice.is_none());
    }

    #[test]
    fn test_keys_map_to_commands() {
        let mut input = InputState::new();
        input.feed([
            InputEvent::KeyPress(Key::Enter),
            InputEvent::KeyPress(Key::Char('3')),
            InputEvent::KeyPress(Key::Char('x')),
            InputEvent::KeyPress(Key::Escape),
            InputEvent::KeyPress(Key::Char('R')),
        ]);
        let t = input.take_tick_input();
        assert_eq!(
            t.commands,
            vec![
                Command::Confirm,
                Command::SelectDifficulty(Difficulty::Hard),
                Command::Cancel,
                Command::Restart,
            ]
        );
        assert!(input.take_tick_input().commands.is_empty());
    }
}
