use crate::app::App;
use crate::ui::layout::get_player_layout;
use crate::ui::view::NowPlayingView;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub mod art;
pub mod carousel;
pub mod controls;
pub mod info;
pub mod progress;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let view = NowPlayingView::build(
        &app.snapshot,
        app.current_track(),
        app.repeat.displayed(),
        app.slider.value(),
    );
    let theme = app.theme.clone();

    // --- MUSIC CARD ---
    let music_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(vec![Span::styled(
            " Now Playing ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )]))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.surface))
        .style(Style::default().bg(Color::Reset));

    let inner = music_block.inner(area);
    f.render_widget(music_block, area);

    let layout = get_player_layout(inner);

    carousel::render(f, layout.carousel, app);
    info::render(f, layout.info, &view, &theme);
    let slider = progress::render_progress(f, layout.gauge, &view, &theme, app.slider.is_dragging());
    if layout.time.height > 0 {
        progress::render_time(f, layout.time, &view, &theme);
    }
    let buttons = controls::render(f, layout.controls, &view, &theme, app.repeat.pending().is_some());

    app.hit_areas.carousel = layout.carousel;
    app.hit_areas.slider = slider;
    app.hit_areas.controls = buttons;
}
