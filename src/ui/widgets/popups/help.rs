use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// (key, icon, description) rows for the player screen.
pub fn player_keys(app: &App) -> Vec<(String, &'static str, &'static str)> {
    let keys = &app.keys;
    vec![
        (keys.display(&keys.play_pause), "▶️", "Play/Pause"),
        (keys.display(&keys.next_track), "⏭️", "Next track"),
        (keys.display(&keys.prev_track), "⏮️", "Previous track"),
        (keys.display(&keys.stop), "⏹️", "Stop"),
        (keys.display(&keys.repeat), "🔁", "Repeat"),
        (
            format!(
                "{}/{}",
                keys.display(&keys.scroll_left),
                keys.display(&keys.scroll_right)
            ),
            "🎠",
            "Scroll covers",
        ),
        (
            format!(
                "{}/{}",
                keys.display(&keys.seek_backward),
                keys.display(&keys.seek_forward)
            ),
            "⏩",
            "Drag slider",
        ),
        (keys.display(&keys.seek_commit), "✅", "Seek"),
    ]
}

pub fn global_keys(app: &App) -> Vec<(String, &'static str, &'static str)> {
    let keys = &app.keys;
    vec![
        (keys.display(&keys.toggle_keyhints), "❔", "Toggle keys"),
        (keys.display(&keys.quit), "🚪", "Quit"),
    ]
}

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let keys = player_keys(app);
    let global_keys = global_keys(app);

    // Build popup content first to calculate exact height
    let mut lines: Vec<Line> = Vec::new();

    for (key, icon, desc) in &keys {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<7} ", key),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::raw(format!("{} ", icon)),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "────── Global ──────",
        Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (key, icon, desc) in &global_keys {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<7} ", key),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::raw(format!("{} ", icon)),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ]));
    }

    // padding(1) + key(min 7) + padding(1) + spacer(3) + icon(3) + desc
    let content_width = keys
        .iter()
        .chain(global_keys.iter())
        .map(|(k, _i, d)| 2 + k.chars().count().max(7) + 3 + 3 + d.len())
        .max()
        .unwrap_or(20)
        .max(22); // "────── Global ──────" length

    let max_height = f.area().height.saturating_sub(4);
    let popup_height = (lines.len() as u16 + 2).min(max_height);
    let popup_width = (content_width as u16 + 4).min(f.area().width.saturating_sub(2));

    // Position at bottom-right
    let popup_x = f.area().width.saturating_sub(popup_width + 1);
    let popup_y = f.area().height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .title(" Player ")
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, popup_area);
}
