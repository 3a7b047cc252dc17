/// Input event types the simulation understands.
/// Coordinates are viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began. `on_control` is set by the host when the press
    /// landed on an interactive page element (link, button, form field).
    PointerDown { x: f32, y: f32, on_control: bool },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32 },
    /// The cursor left the window.
    PointerLeave,
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// Host handlers write events into the queue; the simulation drains them once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
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

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
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
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, on_control: false });
        q.push(InputEvent::PointerLeave);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        let events = q.drain();
        assert_eq!(events[0], InputEvent::PointerMove { x: 1.0, y: 1.0 });
        match events[1] {
            InputEvent::Resize { width, height } => {
                assert_eq!(width, 800.0);
                assert_eq!(height, 600.0);
            }
            _ => panic!("Expected Resize event"),
        }
    }
}
