use crate::app::state::ui::contains;
use crate::app::App;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use std::time::Instant;

pub fn handle_mouse_events(mouse: MouseEvent, app: &mut App, now: Instant) {
    let (column, row) = (mouse.column, mouse.row);
    let areas = app.hit_areas;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let buttons = areas.controls;
            if contains(buttons.play, column, row) {
                app.toggle_playback();
            } else if contains(buttons.prev, column, row) {
                app.skip_prev();
            } else if contains(buttons.next, column, row) {
                app.skip_next();
            } else if contains(buttons.repeat, column, row) {
                app.cycle_repeat();
            } else if contains(areas.slider, column, row) {
                app.press_slider(column);
            } else if contains(areas.carousel, column, row) {
                app.begin_carousel_drag(column);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.drag_slider(column);
            app.drag_carousel(column, now);
        }
        MouseEventKind::Up(MouseButton::Left) => app.release_pointer(),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft
            if contains(areas.carousel, column, row) =>
        {
            app.scroll_carousel(-app.scroll_step, now);
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight
            if contains(areas.carousel, column, row) =>
        {
            app.scroll_carousel(app.scroll_step, now);
        }
        _ => {}
    }
}
