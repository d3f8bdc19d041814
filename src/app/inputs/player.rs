use crate::app::App;
use crossterm::event::KeyEvent;
use std::time::Instant;

pub fn handle_player_events(key: KeyEvent, app: &mut App, now: Instant) -> bool {
    let keys = app.keys.clone();

    // Play/Pause ('Space')
    if keys.matches(key, &keys.play_pause) {
        app.toggle_playback();
        return true;
    }

    // Next Track ('n')
    if keys.matches(key, &keys.next_track) {
        app.skip_next();
        return true;
    }

    // Prev Track ('p')
    if keys.matches(key, &keys.prev_track) {
        app.skip_prev();
        return true;
    }

    if keys.matches(key, &keys.stop) {
        app.stop();
        app.show_toast("⏹ Stop");
        return true;
    }

    // Repeat ('x'): the icon changes once the engine confirms
    if keys.matches(key, &keys.repeat) {
        app.cycle_repeat();
        return true;
    }

    // Carousel scroll (arrows); settles after the debounce
    if keys.matches(key, &keys.scroll_left) {
        app.scroll_carousel(-app.scroll_step, now);
        return true;
    }
    if keys.matches(key, &keys.scroll_right) {
        app.scroll_carousel(app.scroll_step, now);
        return true;
    }

    // Slider drag ('h' / 'l'), committed by Enter or by going quiet
    if keys.matches(key, &keys.seek_backward) {
        app.nudge_seek(-1.0, now);
        return true;
    }
    if keys.matches(key, &keys.seek_forward) {
        app.nudge_seek(1.0, now);
        return true;
    }
    if app.slider.is_dragging() {
        if keys.matches(key, &keys.seek_commit) {
            app.commit_seek();
            return true;
        }
        if keys.matches(key, &keys.seek_cancel) {
            app.slider.cancel();
            return true;
        }
    }

    false
}
