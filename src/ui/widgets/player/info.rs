use crate::ui::theme::Theme;
use crate::ui::utils::truncate;
use crate::ui::view::NowPlayingView;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, view: &NowPlayingView, theme: &Theme) {
    // -4 for padding/prefixes
    let max_width = area.width.saturating_sub(4) as usize;

    let mut info_text = vec![Line::from(Span::styled(
        format!("🎵 {}", truncate(&view.title, max_width.saturating_sub(2))),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ))];

    if !view.artist.is_empty() {
        info_text.push(Line::from(vec![
            Span::raw("🎤 "),
            Span::styled(
                truncate(&view.artist, max_width.saturating_sub(2)),
                Style::default().fg(theme.accent),
            ),
        ]));
    }

    if let Some(album) = &view.album {
        info_text.push(Line::from(vec![
            Span::raw("💿 "),
            Span::styled(
                truncate(album, max_width.saturating_sub(2)),
                Style::default().fg(theme.overlay).add_modifier(Modifier::DIM),
            ),
        ]));
    }

    let info = Paragraph::new(info_text)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(info, area);
}
