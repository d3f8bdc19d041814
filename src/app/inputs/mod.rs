use crate::app::App;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::time::Instant;

pub mod common;
pub mod mouse;
pub mod player;

pub fn handle_event(event: Event, app: &mut App, now: Instant) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(key, app, now),
        Event::Mouse(mouse) if app.ready => mouse::handle_mouse_events(mouse, app, now),
        _ => {}
    }
}

pub fn handle_key(key: KeyEvent, app: &mut App, now: Instant) {
    // 1. Global keys work even before the engine is ready
    if common::handle_common_events(key, app) {
        return;
    }

    // 2. Everything else waits for setup to complete
    if !app.ready {
        return;
    }

    player::handle_player_events(key, app, now);
}
