use crate::app::App;
use ratatui::Frame;

pub mod help;
pub mod toast;

pub fn render(f: &mut Frame, app: &App) {
    if app.toast.is_some() {
        toast::render(f, app);
    }

    if app.show_keyhints {
        help::render(f, app);
    }
}
