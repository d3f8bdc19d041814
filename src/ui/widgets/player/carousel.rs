use super::art;
use crate::app::artwork::ArtworkState;
use crate::app::carousel::index_for_offset;
use crate::app::App;
use crate::ui::layout::clip_columns;
use crate::ui::utils::truncate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
    Frame,
};

const GAP: u16 = 2;

/// Card width in columns. Half-block art is square at twice the row count.
pub fn card_width(area: Rect) -> u16 {
    let square = area.height.saturating_mul(2);
    let max = (area.width as u32 * 3 / 5) as u16;
    square.min(max).max(1)
}

/// Columns from one card's left edge to the next.
pub fn card_pitch(area: Rect) -> u16 {
    card_width(area) + GAP
}

/// Left edge of item `index` when the carousel sits at `position` items.
pub fn card_left(area: Rect, index: usize, position: f64) -> i32 {
    let width = card_width(area);
    let pitch = card_pitch(area) as f64;
    let center = area.x as f64 + area.width as f64 / 2.0 + (index as f64 - position) * pitch;
    (center - width as f64 / 2.0).round() as i32
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let count = app.catalog.len();
    if area.height < 3 || area.width < 4 || count == 0 {
        return;
    }

    let item_width = app.carousel.item_width();
    let position = app.carousel.offset() / item_width;
    let centered = index_for_offset(app.carousel.offset(), item_width, count);
    let width = card_width(area);

    // Enough neighbours to cover the sides
    let reach = (area.width / card_pitch(area)) as usize / 2 + 1;
    let first = centered.saturating_sub(reach);
    let last = (centered + reach).min(count - 1);

    for index in first..=last {
        let Some(rect) = clip_columns(area, card_left(area, index, position), width) else {
            continue;
        };
        let Some(track) = app.catalog.get(index) else {
            continue;
        };

        let color = if index == centered {
            theme.accent
        } else {
            theme.surface
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        if index == centered {
            block = block.title(Span::styled(
                format!(" {} ", truncate(&track.title, rect.width.saturating_sub(4) as usize)),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
        }
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        match app.artwork.get(&track.id) {
            Some(ArtworkState::Loaded(image)) => art::render_image(f, inner, image),
            Some(ArtworkState::Loading) => {
                art::render_placeholder(f, inner, "Loading...", theme.overlay)
            }
            Some(ArtworkState::Failed) | None => {
                art::render_placeholder(f, inner, "♪", theme.overlay)
            }
        }
    }
}
