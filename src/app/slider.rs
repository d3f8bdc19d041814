use std::time::{Duration, Instant};

/// Progress slider drag state.
///
/// Dragging only moves a local value; the engine is asked to seek once,
/// when the drag is released (pointer up, or the keyboard nudge sequence
/// going quiet).
#[derive(Debug, Clone)]
pub struct SeekSlider {
    drag: Option<f64>,
    max: f64,
    pointer_down: bool,
    last_nudge: Option<Instant>,
    settle_after: Duration,
}

impl SeekSlider {
    pub fn new(settle_after: Duration) -> Self {
        Self {
            drag: None,
            max: 0.0,
            pointer_down: false,
            last_nudge: None,
            settle_after,
        }
    }

    /// Thumb value while dragging.
    pub fn value(&self) -> Option<f64> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(0.0, self.max.max(0.0))
    }

    pub fn press(&mut self, value: f64, duration: f64) {
        self.max = duration;
        self.pointer_down = true;
        self.last_nudge = None;
        self.drag = Some(self.clamp(value));
    }

    pub fn drag_to(&mut self, value: f64) {
        if self.drag.is_some() {
            self.drag = Some(self.clamp(value));
        }
    }

    /// Keyboard drag: move from the current thumb (or `position` when not
    /// yet dragging) by `delta` seconds.
    pub fn nudge(&mut self, delta: f64, position: f64, duration: f64, now: Instant) {
        self.max = duration;
        let start = self.drag.unwrap_or(position);
        self.drag = Some(self.clamp(start + delta));
        self.last_nudge = Some(now);
    }

    /// End the drag; the returned value is the single seek to issue.
    pub fn release(&mut self) -> Option<f64> {
        self.pointer_down = false;
        self.last_nudge = None;
        self.drag.take()
    }

    pub fn cancel(&mut self) {
        self.pointer_down = false;
        self.last_nudge = None;
        self.drag = None;
    }

    /// Release a keyboard drag once it has been idle long enough.
    pub fn poll_settle(&mut self, now: Instant) -> Option<f64> {
        if self.pointer_down {
            return None;
        }
        match self.last_nudge {
            Some(last) if now.saturating_duration_since(last) >= self.settle_after => {
                self.release()
            }
            _ => None,
        }
    }
}
