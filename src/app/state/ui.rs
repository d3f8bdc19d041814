use ratatui::layout::Rect;
use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

impl Toast {
    pub fn new(message: &str, now: Instant) -> Self {
        Self {
            message: message.to_string(),
            start_time: now,
            deadline: now + TOAST_TTL,
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// Screen regions that react to the mouse, recorded while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitAreas {
    pub carousel: Rect,
    pub slider: Rect,
    pub controls: ControlAreas,
}

/// Transport buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlAreas {
    pub prev: Rect,
    pub play: Rect,
    pub next: Rect,
    pub repeat: Rect,
}

/// Pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Carousel { last_column: u16 },
    Slider,
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
