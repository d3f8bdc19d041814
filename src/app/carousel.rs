//! Scroll position of the artwork carousel and its mapping to the queue.
//!
//! The offset moves continuously while the user scrolls or drags; only a
//! settled offset turns into a `skip_to_index` request. At most one skip
//! is in flight and later settles overwrite a single pending slot, so the
//! engine only ever hears about the latest intent.

use std::time::{Duration, Instant};

/// `clamp(round(offset / width), 0, count - 1)`
pub fn index_for_offset(offset: f64, item_width: f64, count: usize) -> usize {
    if count == 0 || item_width <= 0.0 || !offset.is_finite() {
        return 0;
    }
    let raw = (offset / item_width).round();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(count - 1)
    }
}

#[derive(Debug, Clone)]
pub struct ScrollSync {
    item_width: f64,
    count: usize,
    settle_after: Duration,

    offset: f64,
    dragging: bool,
    last_motion: Option<Instant>,

    /// Index last reported by the engine
    confirmed: usize,
    /// Index the engine is at or being driven to
    target: usize,
    in_flight: Option<usize>,
    desired: Option<usize>,
}

impl ScrollSync {
    pub fn new(item_width: f64, count: usize, settle_after: Duration) -> Self {
        Self {
            item_width: if item_width > 0.0 { item_width } else { 1.0 },
            count,
            settle_after,
            offset: 0.0,
            dragging: false,
            last_motion: None,
            confirmed: 0,
            target: 0,
            in_flight: None,
            desired: None,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    /// Index under the current (possibly unsettled) offset.
    pub fn displayed_index(&self) -> usize {
        index_for_offset(self.offset, self.item_width, self.count)
    }

    pub fn confirmed_index(&self) -> usize {
        self.confirmed
    }

    pub fn is_moving(&self) -> bool {
        self.dragging || self.last_motion.is_some()
    }

    pub fn has_pending_skip(&self) -> bool {
        self.in_flight.is_some() || self.desired.is_some()
    }

    fn max_offset(&self) -> f64 {
        self.count.saturating_sub(1) as f64 * self.item_width
    }

    fn set_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.offset = offset.clamp(0.0, self.max_offset());
        }
    }

    /// Intermediate scroll frame; never talks to the engine.
    pub fn scroll_to(&mut self, offset: f64, now: Instant) {
        self.set_offset(offset);
        self.last_motion = Some(now);
        tracing::trace!(offset = self.offset, "carousel scrolled");
    }

    pub fn scroll_by(&mut self, delta: f64, now: Instant) {
        self.scroll_to(self.offset + delta, now);
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Gesture end settles right away.
    pub fn end_drag(&mut self) -> Option<usize> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        self.settle()
    }

    /// Settle once no motion has been seen for the debounce interval.
    pub fn poll_settle(&mut self, now: Instant) -> Option<usize> {
        if self.dragging {
            return None;
        }
        match self.last_motion {
            Some(last) if now.saturating_duration_since(last) >= self.settle_after => self.settle(),
            _ => None,
        }
    }

    /// Programmatic scroll to an item, as used by the skip buttons.
    pub fn jump_to(&mut self, index: usize) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        self.dragging = false;
        self.set_offset(index.min(self.count - 1) as f64 * self.item_width);
        self.settle()
    }

    pub fn jump_by(&mut self, step: isize) -> Option<usize> {
        let index = self.displayed_index().saturating_add_signed(step);
        self.jump_to(index)
    }

    fn settle(&mut self) -> Option<usize> {
        self.last_motion = None;
        let index = self.displayed_index();
        self.offset = index as f64 * self.item_width;
        self.request(index)
    }

    fn request(&mut self, index: usize) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        if self.in_flight.is_some() {
            self.desired = (index != self.target).then_some(index);
            return None;
        }
        if index == self.target {
            return None;
        }
        self.target = index;
        self.in_flight = Some(index);
        tracing::debug!(index, "carousel settled, requesting skip");
        Some(index)
    }

    /// The engine answered the in-flight skip. Returns the next skip to
    /// issue, if the user settled somewhere else in the meantime.
    pub fn on_skip_resolved(&mut self, index: usize, ok: bool) -> Option<usize> {
        if self.in_flight != Some(index) {
            return None;
        }
        self.in_flight = None;
        if !ok {
            self.target = self.confirmed;
        }
        match self.desired.take() {
            Some(next) => self.request(next),
            None => {
                if !ok && !self.is_moving() {
                    self.offset = self.confirmed as f64 * self.item_width;
                }
                None
            }
        }
    }

    /// The engine reports it is now at `index`.
    pub fn on_track_changed(&mut self, index: usize) {
        if index >= self.count {
            return;
        }
        self.confirmed = index;
        if self.has_pending_skip() {
            return;
        }
        self.target = index;
        if !self.is_moving() {
            self.offset = index as f64 * self.item_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 320.0;
    const SETTLE: Duration = Duration::from_millis(150);

    fn sync(count: usize) -> ScrollSync {
        ScrollSync::new(W, count, SETTLE)
    }

    #[test]
    fn test_index_for_offset_rounds_and_clamps() {
        assert_eq!(index_for_offset(0.0, W, 3), 0);
        assert_eq!(index_for_offset(159.0, W, 3), 0);
        assert_eq!(index_for_offset(160.0, W, 3), 1);
        assert_eq!(index_for_offset(640.0, W, 3), 2);
        assert_eq!(index_for_offset(5000.0, W, 3), 2);
        assert_eq!(index_for_offset(-300.0, W, 3), 0);
        assert_eq!(index_for_offset(400.0, W, 0), 0);
        assert_eq!(index_for_offset(f64::NAN, W, 3), 0);
    }

    #[test]
    fn test_index_matches_formula_over_range() {
        let n = 7;
        let mut x = -500.0;
        while x < 3000.0 {
            let expected = (x / W).round().clamp(0.0, (n - 1) as f64) as usize;
            assert_eq!(index_for_offset(x, W, n), expected, "offset {x}");
            x += 13.7;
        }
    }

    #[test]
    fn test_rapid_scroll_settles_once_on_final_index() {
        let mut s = sync(3);
        let t0 = Instant::now();
        s.scroll_to(100.0, t0);
        s.scroll_to(300.0, t0 + Duration::from_millis(10));
        s.scroll_to(640.0, t0 + Duration::from_millis(20));

        // Still moving
        assert_eq!(s.poll_settle(t0 + Duration::from_millis(100)), None);

        let settled = t0 + Duration::from_millis(20) + SETTLE;
        assert_eq!(s.poll_settle(settled), Some(2));
        assert_eq!(s.poll_settle(settled + SETTLE), None);
        assert_eq!(s.offset(), 640.0);
    }

    #[test]
    fn test_settle_on_current_index_is_noop() {
        let mut s = sync(3);
        let t0 = Instant::now();
        s.scroll_to(90.0, t0);
        assert_eq!(s.poll_settle(t0 + SETTLE), None);
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn test_repeat_request_for_same_index_is_noop() {
        let mut s = sync(3);
        assert_eq!(s.jump_to(1), Some(1));
        assert_eq!(s.on_skip_resolved(1, true), None);
        // Engine has not confirmed yet, still no duplicate
        assert_eq!(s.jump_to(1), None);
        s.on_track_changed(1);
        assert_eq!(s.jump_to(1), None);
    }

    #[test]
    fn test_latest_intent_wins_while_skip_in_flight() {
        let mut s = sync(5);
        assert_eq!(s.jump_to(1), Some(1));
        assert_eq!(s.jump_to(2), None);
        assert_eq!(s.jump_to(3), None);
        assert_eq!(s.jump_to(4), None);
        assert_eq!(s.on_skip_resolved(1, true), Some(4));
        assert_eq!(s.on_skip_resolved(4, true), None);
    }

    #[test]
    fn test_returning_to_target_cancels_pending() {
        let mut s = sync(5);
        assert_eq!(s.jump_to(2), Some(2));
        assert_eq!(s.jump_to(3), None);
        assert_eq!(s.jump_to(2), None);
        assert_eq!(s.on_skip_resolved(2, true), None);
    }

    #[test]
    fn test_failed_skip_snaps_back_to_confirmed() {
        let mut s = sync(3);
        s.on_track_changed(1);
        assert_eq!(s.offset(), W);

        assert_eq!(s.jump_to(2), Some(2));
        assert_eq!(s.on_skip_resolved(2, false), None);
        assert_eq!(s.displayed_index(), 1);
        assert_eq!(s.offset(), W);

        // Retrying the same index is allowed after a failure
        assert_eq!(s.jump_to(2), Some(2));
    }

    #[test]
    fn test_stale_resolution_ignored() {
        let mut s = sync(3);
        assert_eq!(s.jump_to(2), Some(2));
        assert_eq!(s.on_skip_resolved(1, true), None);
        assert!(s.has_pending_skip());
    }

    #[test]
    fn test_drag_waits_for_gesture_end() {
        let mut s = sync(3);
        let t0 = Instant::now();
        s.begin_drag();
        s.scroll_to(350.0, t0);
        assert_eq!(s.poll_settle(t0 + SETTLE * 4), None);
        assert_eq!(s.end_drag(), Some(1));
        assert_eq!(s.end_drag(), None);
    }

    #[test]
    fn test_jump_by_clamps_at_edges() {
        let mut s = sync(2);
        assert_eq!(s.jump_by(-1), None);
        assert_eq!(s.jump_by(1), Some(1));
        s.on_skip_resolved(1, true);
        s.on_track_changed(1);
        assert_eq!(s.jump_by(1), None);
        assert_eq!(s.displayed_index(), 1);
    }

    #[test]
    fn test_carousel_follows_engine_advance() {
        let mut s = sync(3);
        s.on_track_changed(2);
        assert_eq!(s.displayed_index(), 2);
        assert_eq!(s.confirmed_index(), 2);
        // Out of range notifications are ignored
        s.on_track_changed(9);
        assert_eq!(s.confirmed_index(), 2);
    }

    #[test]
    fn test_offset_is_bounded() {
        let mut s = sync(3);
        let t0 = Instant::now();
        s.scroll_by(-50.0, t0);
        assert_eq!(s.offset(), 0.0);
        s.scroll_by(10_000.0, t0);
        assert_eq!(s.offset(), 2.0 * W);
    }

    #[test]
    fn test_empty_queue_never_requests() {
        let mut s = sync(0);
        let t0 = Instant::now();
        s.scroll_to(640.0, t0);
        assert_eq!(s.poll_settle(t0 + SETTLE), None);
        assert_eq!(s.jump_to(1), None);
    }
}
