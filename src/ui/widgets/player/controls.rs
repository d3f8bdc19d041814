use crate::app::ControlAreas;
use crate::ui::theme::Theme;
use crate::ui::view::{NowPlayingView, RepeatIcon};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Where each button sits; also what the mouse hit-tests against.
pub fn button_areas(area: Rect) -> ControlAreas {
    if area.height == 0 {
        return ControlAreas::default();
    }
    // 3-Column Layout for seamless centering
    let button_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(36),
            Constraint::Fill(1),
        ])
        .split(Rect { height: 1, ..area });

    let center = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(button_layout[1]);

    let right = button_layout[2];
    ControlAreas {
        prev: center[0],
        play: center[1],
        next: center[2],
        repeat: Rect {
            width: right.width.min(4),
            ..right
        },
    }
}

pub fn render(
    f: &mut Frame,
    area: Rect,
    view: &NowPlayingView,
    theme: &Theme,
    repeat_pending: bool,
) -> ControlAreas {
    let buttons = button_areas(area);
    if area.height == 0 {
        return buttons;
    }
    let btn_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);

    let play_glyph = if view.buffering {
        "…"
    } else {
        view.play_icon.glyph()
    };

    // Center: Prev / Play / Next
    for (glyph, rect) in [
        ("⏮", buttons.prev),
        (play_glyph, buttons.play),
        ("⏭", buttons.next),
    ] {
        let button = Paragraph::new(Span::styled(glyph, btn_style))
            .alignment(Alignment::Center)
            .block(Block::default());
        f.render_widget(button, rect);
    }

    // Right: Repeat, lit when on and dimmed while the engine hasn't answered
    let icon = view.repeat_icon;
    let mut repeat_style = if icon.is_lit() {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.overlay).add_modifier(Modifier::DIM)
    };
    if repeat_pending {
        repeat_style = repeat_style.add_modifier(Modifier::SLOW_BLINK);
    }
    let mut repeat_spans = vec![Span::styled(format!(" {}", icon.glyph()), repeat_style)];
    if icon == RepeatIcon::Track {
        repeat_spans.push(Span::styled("1", repeat_style.add_modifier(Modifier::BOLD)));
    }
    let repeat_widget = Paragraph::new(Line::from(repeat_spans))
        .alignment(Alignment::Left)
        .block(Block::default());
    f.render_widget(repeat_widget, buttons.repeat);
    buttons
}
