use crate::ui::theme::Theme;
use crate::ui::view::NowPlayingView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// The slider track inside a gauge row.
pub fn slider_area(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1]
}

/// Knob column for `ratio` on a track `width` cells wide.
pub fn knob_column(width: usize, ratio: f64) -> usize {
    let span = width.saturating_sub(1) as f64;
    (span * ratio.clamp(0.0, 1.0)).round() as usize
}

/// Draws the slider and returns where it landed, for pointer hit-testing.
pub fn render_progress(
    f: &mut Frame,
    area: Rect,
    view: &NowPlayingView,
    theme: &Theme,
    dragging: bool,
) -> Rect {
    let gauge_area_rect = slider_area(area);
    let width = gauge_area_rect.width as usize;
    if width == 0 {
        return gauge_area_rect;
    }
    let knob = knob_column(width, view.ratio);

    let fill_style = Style::default().fg(theme.accent);
    let empty_style = Style::default().fg(theme.surface);
    let knob_style = if dragging {
        Style::default().fg(theme.text)
    } else {
        fill_style
    };

    let mut bar_spans: Vec<Span> = Vec::with_capacity(width);
    for i in 0..width {
        if i == knob {
            bar_spans.push(Span::styled("●", knob_style));
        } else if i < knob {
            bar_spans.push(Span::styled("━", fill_style));
        } else {
            bar_spans.push(Span::styled("─", empty_style));
        }
    }

    let gauge_p = Paragraph::new(Line::from(bar_spans))
        .alignment(Alignment::Left)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(gauge_p, gauge_area_rect);
    gauge_area_rect
}

/// Elapsed on the left of the slider, remaining on the right.
pub fn render_time(f: &mut Frame, area: Rect, view: &NowPlayingView, theme: &Theme) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(slider_area(area));
    let style = Style::default().fg(theme.overlay);
    f.render_widget(
        Paragraph::new(view.elapsed.as_str())
            .alignment(Alignment::Left)
            .style(style),
        halves[0],
    );
    f.render_widget(
        Paragraph::new(view.remaining.as_str())
            .alignment(Alignment::Right)
            .style(style),
        halves[1],
    );
}
