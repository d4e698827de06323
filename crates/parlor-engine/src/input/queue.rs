use glam::Vec2;

/// Key codes the mini-games react to (DOM `keyCode` values).
pub mod keys {
    pub const ENTER: u32 = 13;
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const RIGHT: u32 = 39;
}

/// Input event types the kernel understands.
/// Generic, no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The page was resized; the new world size in game units.
    Resize { width: f32, height: f32 },
    /// The page was hidden (tab switch, minimise) or shown again.
    Visibility { visible: bool },
    /// A custom event from the host UI (buttons, dialogs).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// World position of pointer events.
    pub fn pointer_pos(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Some(Vec2::new(x, y)),
            _ => None,
        }
    }
}

/// A queue of input events.
/// The host pushes events between frames; the runner hands the queue to the
/// game once per fixed step and drains it after the frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Custom events of the given kind, in arrival order.
    pub fn customs(&self, kind: u32) -> impl Iterator<Item = &InputEvent> {
        self.events
            .iter()
            .filter(move |e| matches!(e, InputEvent::Custom { kind: k, .. } if *k == kind))
    }

    /// Whether a key-down for `key_code` is pending.
    pub fn key_pressed(&self, key_code: u32) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, InputEvent::KeyDown { key_code: k } if *k == key_code))
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: keys::SPACE });
        assert_eq!(q.len(), 2);
        assert!(q.key_pressed(keys::SPACE));
        assert!(!q.key_pressed(keys::ENTER));
        assert_eq!(q.drain().len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn customs_filters_by_kind() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 });
        q.push(InputEvent::Custom { kind: 2, a: 5.0, b: 0.0, c: 0.0 });
        q.push(InputEvent::Custom { kind: 1, a: 9.0, b: 0.0, c: 0.0 });
        assert_eq!(q.customs(1).count(), 2);
        assert_eq!(q.customs(3).count(), 0);
    }

    #[test]
    fn pointer_pos_only_for_pointer_events() {
        assert_eq!(
            InputEvent::PointerUp { x: 1.0, y: 2.0 }.pointer_pos(),
            Some(Vec2::new(1.0, 2.0))
        );
        assert_eq!(InputEvent::Visibility { visible: false }.pointer_pos(), None);
    }
}
