use crate::app::{App, Toast};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

const SLIDE_MS: u128 = 300;

/// Horizontal shift of a `width`-wide toast at `now`: slides in from the
/// right edge, holds, then slides back out before its deadline.
pub fn slide_offset(toast: &Toast, width: u16, now: Instant) -> u16 {
    let entrance_elapsed = now.duration_since(toast.start_time).as_millis();
    let time_remaining = toast.deadline.saturating_duration_since(now).as_millis();

    if entrance_elapsed < SLIDE_MS {
        let t = entrance_elapsed as f32 / SLIDE_MS as f32;
        let ease = 1.0 - (1.0 - t).powi(3); // Cubic Out
        (width as f32 * (1.0 - ease)) as u16
    } else if time_remaining < SLIDE_MS {
        let t = (SLIDE_MS - time_remaining) as f32 / SLIDE_MS as f32;
        let ease = t.powi(3); // Cubic In
        (width as f32 * ease) as u16
    } else {
        0
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let Some(toast) = &app.toast else {
        return;
    };
    let theme = &app.theme;

    // Auto-dismiss handled in App::on_tick()
    let message = &toast.message;
    let width = (message.chars().count() as u16 + 6).min(f.area().width.saturating_sub(4));
    let height = 3;
    // Top-right fixed
    let x = f.area().width.saturating_sub(width + 1) + slide_offset(toast, width, Instant::now());

    if x >= f.area().width {
        return;
    }
    let full_area = Rect::new(x, 1, width, height);
    // Clip to screen bounds to avoid panic
    let visible_area = full_area.intersection(f.area());
    if visible_area.is_empty() {
        return;
    }

    f.render_widget(Clear, visible_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(Color::Reset));

    let style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);

    let text = Paragraph::new(Line::from(vec![Span::styled(message.as_str(), style)]))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(text, visible_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_slide_in_hold_out() {
        let start = Instant::now();
        let toast = Toast::new("Skip failed", start);
        assert_eq!(slide_offset(&toast, 20, start), 20);
        assert_eq!(slide_offset(&toast, 20, start + Duration::from_millis(1000)), 0);
        let near_end = toast.deadline - Duration::from_millis(1);
        assert!(slide_offset(&toast, 20, near_end) > 15);
    }
}
