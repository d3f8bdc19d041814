pub mod layout;
pub mod theme;
pub mod utils;
pub mod view;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    let main_layout = layout::get_main_layout(f.area());

    widgets::player::render(f, main_layout.body_area, app);

    let theme = &app.theme;
    if !app.ready {
        let status = Paragraph::new(Span::styled(
            " Starting audio…",
            Style::default().fg(theme.overlay),
        ))
        .alignment(Alignment::Left);
        f.render_widget(status, main_layout.footer_area);
    }

    // Footer hint (if no popup active)
    if !app.show_keyhints {
        let hint = Line::from(vec![
            Span::styled(
                format!(" {} ", app.keys.display(&app.keys.toggle_keyhints)),
                Style::default()
                    .fg(theme.overlay)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys ", Style::default().fg(theme.overlay)),
        ]);
        let footer = Paragraph::new(hint).alignment(Alignment::Right);
        f.render_widget(footer, main_layout.footer_area);
    }

    widgets::popups::render(f, app);
}
