#![forbid(unsafe_code)]

//! Multi-touch input model.
//!
//! A [`TouchEvent`] carries every pointer currently in contact plus the phase
//! of the pointer that changed. For [`TouchPhase::PointerUp`] and
//! [`TouchPhase::Up`] the lifting pointer is still listed, at
//! [`TouchEvent::action_index`].
//!
//! Events are serde-friendly so traces can be recorded and replayed.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// What happened to the pointer at [`TouchEvent::action_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// First pointer went down; starts a gesture stream.
    Down,
    /// An additional pointer went down.
    PointerDown,
    /// One or more pointers moved.
    Move,
    /// A non-final pointer lifted.
    PointerUp,
    /// The final pointer lifted; ends the gesture stream.
    Up,
    /// The stream was aborted by the host.
    Cancel,
}

impl TouchPhase {
    /// Whether this phase changes the set of pointers in contact.
    #[inline]
    #[must_use]
    pub fn changes_pointer_set(self) -> bool {
        matches!(self, Self::PointerDown | Self::PointerUp)
    }

    /// Whether this phase terminates the gesture stream.
    #[inline]
    #[must_use]
    pub fn ends_stream(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// A single contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Normalized touch event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Index into `pointers` of the pointer this phase refers to.
    #[serde(default)]
    pub action_index: usize,
    pub pointers: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Create an event from its parts.
    #[must_use]
    pub fn new(phase: TouchPhase, action_index: usize, pointers: Vec<TouchPoint>) -> Self {
        Self {
            phase,
            action_index,
            pointers,
        }
    }

    /// Single-pointer `Down`.
    #[must_use]
    pub fn down(id: u32, x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Down, 0, vec![TouchPoint::new(id, x, y)])
    }

    /// Single-pointer `Move`.
    #[must_use]
    pub fn move_to(id: u32, x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Move, 0, vec![TouchPoint::new(id, x, y)])
    }

    /// Single-pointer `Up`.
    #[must_use]
    pub fn up(id: u32, x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Up, 0, vec![TouchPoint::new(id, x, y)])
    }

    /// `Cancel` with no pointers.
    #[must_use]
    pub fn cancel() -> Self {
        Self::new(TouchPhase::Cancel, 0, Vec::new())
    }

    /// Number of pointers in the event.
    #[inline]
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Pointer at `index`, if present.
    #[inline]
    #[must_use]
    pub fn pointer(&self, index: usize) -> Option<&TouchPoint> {
        self.pointers.get(index)
    }

    /// Index of the pointer with `id`, if it is still part of this event.
    #[must_use]
    pub fn find_pointer_index(&self, id: u32) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }

    /// The pointer this event's phase refers to.
    #[inline]
    #[must_use]
    pub fn action_pointer(&self) -> Option<&TouchPoint> {
        self.pointers.get(self.action_index)
    }

    /// The primary (index 0) pointer.
    #[inline]
    #[must_use]
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.pointers.first()
    }

    /// Pointers still in contact after this event.
    ///
    /// Excludes the lifting pointer for `PointerUp` / `Up`.
    pub fn remaining_pointers(&self) -> impl Iterator<Item = &TouchPoint> {
        let skip = match self.phase {
            TouchPhase::PointerUp | TouchPhase::Up => Some(self.action_index),
            _ => None,
        };
        self.pointers
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != skip)
            .map(|(_, p)| p)
    }
}
