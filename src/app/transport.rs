use crate::engine::RepeatMode;

/// Repeat mode shown on screen, changed only on engine confirmation.
#[derive(Debug, Clone, Default)]
pub struct RepeatControl {
    confirmed: RepeatMode,
    pending: Option<RepeatMode>,
}

impl RepeatControl {
    pub fn displayed(&self) -> RepeatMode {
        self.confirmed
    }

    pub fn pending(&self) -> Option<RepeatMode> {
        self.pending
    }

    /// Start the next step of Off -> Track -> Queue -> Off. Returns the mode
    /// to request from the engine, or `None` while a request is unanswered.
    pub fn cycle(&mut self) -> Option<RepeatMode> {
        if self.pending.is_some() {
            return None;
        }
        let next = self.confirmed.next();
        self.pending = Some(next);
        Some(next)
    }

    pub fn on_resolved(&mut self, mode: RepeatMode, ok: bool) {
        if self.pending != Some(mode) {
            return;
        }
        self.pending = None;
        if ok {
            self.confirmed = mode;
        }
    }
}
