use std::collections::HashSet;

use glam::Vec2;

/// Input event types the engine understands.
/// Generic — no game-specific semantics.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at screen coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at screen coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A host-defined event. `kind` identifies it; `a`, `b`, `c` carry
    /// arbitrary data.
    User { kind: u32, a: f32, b: f32, c: f32 },
}

/// Handler-table key: which family of events a handler subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerUp,
    PointerMove,
    KeyDown,
    KeyUp,
    User(u32),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerDown { .. } => EventKind::PointerDown,
            InputEvent::PointerUp { .. } => EventKind::PointerUp,
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::KeyDown { .. } => EventKind::KeyDown,
            InputEvent::KeyUp { .. } => EventKind::KeyUp,
            InputEvent::User { kind, .. } => EventKind::User(*kind),
        }
    }
}

/// A queue of input events. The host pushes events as they arrive; the
/// engine drains the queue once per frame, before updates run.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// The held-down state accumulated from the event stream, for game code
/// that wants "is the key down right now" instead of edges.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    keys: HashSet<u32>,
    pub pointer: Vec2,
    pub pointer_down: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self, key_code: u32) -> bool {
        self.keys.contains(&key_code)
    }

    /// Fold one event into the held state. User events carry no state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                self.keys.insert(key_code);
            }
            InputEvent::KeyUp { key_code } => {
                self.keys.remove(&key_code);
            }
            InputEvent::PointerDown { x, y } => {
                self.pointer = Vec2::new(x, y);
                self.pointer_down = true;
            }
            InputEvent::PointerUp { x, y } => {
                self.pointer = Vec2::new(x, y);
                self.pointer_down = false;
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer = Vec2::new(x, y);
            }
            InputEvent::User { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn events_map_to_their_kind() {
        assert_eq!(
            InputEvent::KeyDown { key_code: 1 }.kind(),
            EventKind::KeyDown
        );
        assert_eq!(
            InputEvent::User { kind: 7, a: 0.0, b: 0.0, c: 0.0 }.kind(),
            EventKind::User(7)
        );
    }

    #[test]
    fn snapshot_tracks_held_keys() {
        let mut snap = InputSnapshot::new();
        snap.apply(&InputEvent::KeyDown { key_code: 32 });
        snap.apply(&InputEvent::KeyDown { key_code: 65 });
        assert!(snap.is_down(32));
        snap.apply(&InputEvent::KeyUp { key_code: 32 });
        assert!(!snap.is_down(32));
        assert!(snap.is_down(65));
    }

    #[test]
    fn snapshot_tracks_the_pointer() {
        let mut snap = InputSnapshot::new();
        snap.apply(&InputEvent::PointerDown { x: 5.0, y: 6.0 });
        assert!(snap.pointer_down);
        snap.apply(&InputEvent::PointerMove { x: 9.0, y: 2.0 });
        assert_eq!(snap.pointer, Vec2::new(9.0, 2.0));
        snap.apply(&InputEvent::PointerUp { x: 9.0, y: 2.0 });
        assert!(!snap.pointer_down);
    }
}
