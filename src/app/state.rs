pub mod ui;

pub use ui::{ControlAreas, Gesture, HitAreas, Toast};

use super::artwork::{ArtworkCache, ArtworkRequest};
use super::carousel::ScrollSync;
use super::config::UserConfig;
use super::dispatch::EngineCommand;
use super::events::AppEvent;
use super::inputs;
use super::keys::KeyConfig;
use super::slider::SeekSlider;
use super::transport::RepeatControl;
use crate::catalog::{Catalog, Track};
use crate::engine::{
    Capability, EngineEvent, EngineResult, EngineState, Progress, RepeatMode, SetupOptions,
};
use crate::ui::theme::Theme;
use crate::ui::widgets::player::carousel::card_pitch;
use std::time::Instant;

/// Latest engine state as observed by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackSnapshot {
    pub state: EngineState,
    pub position: f64,
    pub duration: f64,
    pub current_index: Option<usize>,
}

impl PlaybackSnapshot {
    pub fn with_event(self, event: &EngineEvent) -> Self {
        match *event {
            EngineEvent::TrackChanged(index) => Self {
                current_index: Some(index),
                position: 0.0,
                ..self
            },
            EngineEvent::StateChanged(state) => Self { state, ..self },
            EngineEvent::ProgressTick(progress) => self.with_progress(progress),
        }
    }

    pub fn with_progress(self, progress: Progress) -> Self {
        if !progress.position.is_finite() || !progress.duration.is_finite() {
            return self;
        }
        Self {
            position: progress.position.max(0.0),
            duration: progress.duration.max(0.0),
            ..self
        }
    }
}

pub struct App {
    pub is_running: bool,
    /// Setup has completed; interaction is accepted
    pub ready: bool,
    pub catalog: Catalog,
    pub snapshot: PlaybackSnapshot,
    pub carousel: ScrollSync,
    pub slider: SeekSlider,
    pub repeat: RepeatControl,
    pub artwork: ArtworkCache,
    pub theme: Theme,
    pub keys: KeyConfig,
    pub show_keyhints: bool,
    pub toast: Option<Toast>,
    pub hit_areas: HitAreas,
    pub gesture: Option<Gesture>,
    pub scroll_step: f64,
    pub seek_step: f64,
    capabilities: Vec<Capability>,
    commands: Vec<EngineCommand>,
}

impl App {
    pub fn new(catalog: Catalog, config: &UserConfig) -> Self {
        let carousel = ScrollSync::new(config.item_width, catalog.len(), config.settle_after());
        Self {
            is_running: true,
            ready: false,
            catalog,
            snapshot: PlaybackSnapshot::default(),
            carousel,
            slider: SeekSlider::new(config.seek_settle_after()),
            repeat: RepeatControl::default(),
            artwork: ArtworkCache::default(),
            theme: config.theme.clone(),
            keys: config.keys.clone(),
            show_keyhints: false,
            toast: None,
            hit_areas: HitAreas::default(),
            gesture: None,
            scroll_step: config.scroll_step,
            seek_step: config.seek_step_secs,
            capabilities: config.capabilities.clone(),
            commands: Vec::new(),
        }
    }

    /// Queue engine setup. Nothing else is accepted until it completes.
    pub fn start(&mut self) {
        self.commands.push(EngineCommand::Setup {
            options: SetupOptions {
                capabilities: self.capabilities.clone(),
            },
            tracks: self.catalog.tracks().to_vec(),
        });
    }

    /// Engine requests produced since the last call.
    pub fn take_commands(&mut self) -> Vec<EngineCommand> {
        std::mem::take(&mut self.commands)
    }

    fn push(&mut self, cmd: Option<EngineCommand>) {
        if let Some(cmd) = cmd {
            self.commands.push(cmd);
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.snapshot
            .current_index
            .and_then(|index| self.catalog.get(index))
    }

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast::new(message, Instant::now()));
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Input(input) => inputs::handle_event(input, self, now),
            AppEvent::Engine(ev) => self.on_engine_event(ev),
            AppEvent::SetupFinished(result) => self.on_setup_finished(result),
            AppEvent::SkipResolved { index, result } => self.on_skip_resolved(index, result),
            AppEvent::RepeatResolved { mode, result } => self.on_repeat_resolved(mode, result),
            AppEvent::CallFailed { operation, error } => {
                tracing::debug!(operation, error = %error, "showing engine failure");
                self.show_toast(&format!("⚠ {} failed", operation.replace('_', " ")));
            }
            AppEvent::ArtworkLoaded(id, state) => self.artwork.store(id, state),
            AppEvent::Tick => self.on_tick(now),
        }
    }

    pub fn on_setup_finished(&mut self, result: EngineResult<Option<usize>>) {
        match result {
            Ok(index) => {
                self.ready = true;
                if let Some(index) = index {
                    self.on_engine_event(EngineEvent::TrackChanged(index));
                }
                tracing::info!(tracks = self.catalog.len(), "player ready");
            }
            Err(e) => {
                tracing::error!(error = %e, "engine setup failed");
                self.show_toast("❌ Audio engine unavailable");
            }
        }
    }

    pub fn on_engine_event(&mut self, event: EngineEvent) {
        if let EngineEvent::TrackChanged(index) = event {
            if index >= self.catalog.len() {
                tracing::warn!(index, "engine reported an unknown track");
                return;
            }
            self.carousel.on_track_changed(index);
        }
        self.snapshot = self.snapshot.with_event(&event);
    }

    pub fn on_progress(&mut self, progress: Progress) {
        self.snapshot = self.snapshot.with_progress(progress);
    }

    pub fn on_skip_resolved(&mut self, index: usize, result: EngineResult<()>) {
        if result.is_err() {
            self.show_toast("⚠ Skip failed");
        }
        let next = self.carousel.on_skip_resolved(index, result.is_ok());
        self.push(next.map(EngineCommand::SkipTo));
    }

    pub fn on_repeat_resolved(&mut self, mode: RepeatMode, result: EngineResult<()>) {
        if result.is_err() {
            self.show_toast("⚠ Repeat mode unchanged");
        }
        self.repeat.on_resolved(mode, result.is_ok());
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.expired(now)) {
            self.toast = None;
        }
        if !self.ready {
            return;
        }
        let skip = self.carousel.poll_settle(now);
        self.push(skip.map(EngineCommand::SkipTo));
        let seek = self.slider.poll_settle(now);
        self.push(seek.map(EngineCommand::SeekTo));
    }

    // --- Transport ---

    pub fn toggle_playback(&mut self) {
        self.push(Some(EngineCommand::TogglePlayback));
    }

    pub fn stop(&mut self) {
        self.push(Some(EngineCommand::Stop));
    }

    pub fn skip_next(&mut self) {
        let next = self.carousel.jump_by(1);
        self.push(next.map(EngineCommand::SkipTo));
    }

    pub fn skip_prev(&mut self) {
        let prev = self.carousel.jump_by(-1);
        self.push(prev.map(EngineCommand::SkipTo));
    }

    pub fn cycle_repeat(&mut self) {
        let mode = self.repeat.cycle();
        self.push(mode.map(EngineCommand::SetRepeat));
    }

    // --- Carousel ---

    pub fn scroll_carousel(&mut self, delta: f64, now: Instant) {
        self.carousel.scroll_by(delta, now);
    }

    pub fn begin_carousel_drag(&mut self, column: u16) {
        self.carousel.begin_drag();
        self.gesture = Some(Gesture::Carousel {
            last_column: column,
        });
    }

    /// Dragging right reveals the previous item, like a touch list. One
    /// card pitch under the pointer is one item.
    pub fn drag_carousel(&mut self, column: u16, now: Instant) {
        let Some(Gesture::Carousel { last_column }) = self.gesture else {
            return;
        };
        let pitch = card_pitch(self.hit_areas.carousel).max(1) as f64;
        let px_per_column = self.carousel.item_width() / pitch;
        let delta = (last_column as f64 - column as f64) * px_per_column;
        self.carousel.scroll_by(delta, now);
        self.gesture = Some(Gesture::Carousel {
            last_column: column,
        });
    }

    // --- Slider ---

    /// Track position under a slider column.
    pub fn slider_value_at(&self, column: u16) -> f64 {
        let area = self.hit_areas.slider;
        let span = area.width.saturating_sub(1).max(1) as f64;
        let ratio = (column.saturating_sub(area.x) as f64 / span).clamp(0.0, 1.0);
        ratio * self.snapshot.duration
    }

    /// Ignored while the track has no known length.
    pub fn press_slider(&mut self, column: u16) {
        if self.snapshot.duration <= 0.0 {
            return;
        }
        let value = self.slider_value_at(column);
        self.slider.press(value, self.snapshot.duration);
        self.gesture = Some(Gesture::Slider);
    }

    pub fn drag_slider(&mut self, column: u16) {
        if self.gesture == Some(Gesture::Slider) {
            let value = self.slider_value_at(column);
            self.slider.drag_to(value);
        }
    }

    pub fn nudge_seek(&mut self, direction: f64, now: Instant) {
        if self.snapshot.duration <= 0.0 {
            return;
        }
        self.slider.nudge(
            direction * self.seek_step,
            self.snapshot.position,
            self.snapshot.duration,
            now,
        );
    }

    pub fn commit_seek(&mut self) {
        let value = self.slider.release();
        self.push(value.map(EngineCommand::SeekTo));
    }

    /// Pointer released: finishes whichever gesture was active.
    pub fn release_pointer(&mut self) {
        match self.gesture.take() {
            Some(Gesture::Carousel { .. }) => {
                let index = self.carousel.end_drag();
                self.push(index.map(EngineCommand::SkipTo));
            }
            Some(Gesture::Slider) => self.commit_seek(),
            None => {}
        }
    }

    /// Covers for the items on or next to screen that haven't been requested.
    pub fn artwork_requests(&mut self) -> Vec<ArtworkRequest> {
        let center = self.carousel.displayed_index();
        let start = center.saturating_sub(1);
        let end = (center + 1).min(self.catalog.len().saturating_sub(1));
        let mut requests = Vec::new();
        for index in start..=end {
            let Some(track) = self.catalog.get(index) else {
                continue;
            };
            if let Some(path) = &track.artwork {
                if self.artwork.claim(&track.id) {
                    requests.push(ArtworkRequest {
                        id: track.id.clone(),
                        path: path.clone(),
                    });
                }
            }
        }
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;

    fn track(id: &str, title: &str, artist: &str) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: None,
            artwork: Some(format!("/covers/{id}.png").into()),
            url: format!("/music/{id}.mp3"),
            duration: None,
        }
    }

    fn ready_app() -> App {
        let catalog = Catalog::new(vec![
            track("a", "Alpha", "Ann"),
            track("b", "Bravo", "Bob"),
            track("c", "Charlie", "Cat"),
        ])
        .unwrap();
        let mut app = App::new(catalog, &UserConfig::default());
        app.start();
        app.take_commands();
        app.on_setup_finished(Ok(Some(0)));
        app
    }

    #[test]
    fn test_start_queues_setup_with_catalog() {
        let catalog = Catalog::new(vec![track("a", "Alpha", "Ann")]).unwrap();
        let mut app = App::new(catalog, &UserConfig::default());
        app.start();
        match app.take_commands().as_slice() {
            [EngineCommand::Setup { options, tracks }] => {
                assert_eq!(tracks.len(), 1);
                assert_eq!(options.capabilities, Capability::ALL.to_vec());
            }
            other => panic!("unexpected commands: {other:?}"),
        }
        assert!(!app.ready);
    }

    #[test]
    fn test_title_follows_track_changed_only() {
        let mut app = ready_app();
        assert_eq!(app.current_track().unwrap().title, "Alpha");

        app.skip_next();
        assert_eq!(app.take_commands(), vec![EngineCommand::SkipTo(1)]);
        // Still showing the old track until the engine confirms
        assert_eq!(app.current_track().unwrap().title, "Alpha");

        app.on_skip_resolved(1, Ok(()));
        app.on_engine_event(EngineEvent::TrackChanged(1));
        assert_eq!(app.current_track().unwrap().title, "Bravo");
    }

    #[test]
    fn test_failed_setup_keeps_screen_inert() {
        let catalog = Catalog::new(vec![track("a", "Alpha", "Ann")]).unwrap();
        let mut app = App::new(catalog, &UserConfig::default());
        app.on_setup_finished(Err(EngineError::failed("no audio device")));
        assert!(!app.ready);
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_progress_is_overwritten_not_accumulated() {
        let mut app = ready_app();
        app.on_progress(Progress {
            position: 10.0,
            duration: 200.0,
        });
        app.on_progress(Progress {
            position: 11.0,
            duration: 200.0,
        });
        assert_eq!(app.snapshot.position, 11.0);
        app.on_progress(Progress {
            position: f64::NAN,
            duration: 200.0,
        });
        assert_eq!(app.snapshot.position, 11.0);
    }

    #[test]
    fn test_skip_failure_keeps_snapshot() {
        let mut app = ready_app();
        let before = app.snapshot;
        app.skip_next();
        app.take_commands();
        app.on_skip_resolved(1, Err(EngineError::failed("focus lost")));
        assert_eq!(app.snapshot, before);
        assert_eq!(app.carousel.displayed_index(), 0);
    }

    #[test]
    fn test_slider_press_maps_columns() {
        let mut app = ready_app();
        app.on_progress(Progress {
            position: 0.0,
            duration: 100.0,
        });
        app.hit_areas.slider = ratatui::layout::Rect::new(10, 5, 11, 1);
        assert_eq!(app.slider_value_at(10), 0.0);
        assert_eq!(app.slider_value_at(15), 50.0);
        assert_eq!(app.slider_value_at(40), 100.0);

        app.press_slider(12);
        app.drag_slider(18);
        assert!(app.take_commands().is_empty());
        app.release_pointer();
        assert_eq!(app.take_commands(), vec![EngineCommand::SeekTo(80.0)]);
    }

    #[test]
    fn test_carousel_drag_settles_on_release() {
        let mut app = ready_app();
        app.hit_areas.carousel = ratatui::layout::Rect::new(0, 0, 32, 10);
        let now = Instant::now();
        app.begin_carousel_drag(30);
        // Pitch is 21 columns, so 20 columns left is 0.95 of an item
        app.drag_carousel(10, now);
        app.on_tick(now + std::time::Duration::from_secs(5));
        assert!(app.take_commands().is_empty());
        app.release_pointer();
        assert_eq!(app.take_commands(), vec![EngineCommand::SkipTo(1)]);
    }

    #[test]
    fn test_one_card_swipe_advances_one_track() {
        let mut app = ready_app();
        // 40-column cards, 42-column pitch
        app.hit_areas.carousel = ratatui::layout::Rect::new(0, 0, 100, 20);
        let now = Instant::now();
        app.begin_carousel_drag(80);
        app.drag_carousel(38, now);
        assert!((app.carousel.offset() - 320.0).abs() < 1e-9);
        app.release_pointer();
        assert_eq!(app.take_commands(), vec![EngineCommand::SkipTo(1)]);
    }

    #[test]
    fn test_slider_press_without_duration_is_ignored() {
        let mut app = ready_app();
        app.hit_areas.slider = ratatui::layout::Rect::new(10, 5, 11, 1);
        app.press_slider(15);
        assert!(app.gesture.is_none());
        app.release_pointer();
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn test_artwork_requested_for_neighbours_once() {
        let mut app = ready_app();
        let ids: Vec<String> = app.artwork_requests().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(app.artwork_requests().is_empty());
    }
}
