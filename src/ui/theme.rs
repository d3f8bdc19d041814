use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Screen palette, configurable under `[theme]` in `config.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub accent: Color,
    pub red: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(34, 40, 49),
            surface: Color::Rgb(57, 62, 70),
            overlay: Color::Rgb(136, 136, 136),
            text: Color::Rgb(238, 238, 238),
            accent: Color::Rgb(255, 211, 105),
            red: Color::Rgb(243, 139, 168),
        }
    }
}
