use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Draw `image` with half-block cells: two pixels per character, stacked.
pub fn render_image(f: &mut Frame, area: Rect, image: &DynamicImage) {
    let available_width = area.width as u32;
    let available_height = area.height as u32;
    if available_width == 0 || available_height == 0 {
        return;
    }

    // Resize preserving aspect ratio (Triangle for quality)
    let resized = image.resize(available_width, available_height * 2, FilterType::Triangle);

    let img_height_subpixels = resized.height();
    let img_rows = img_height_subpixels.div_ceil(2);
    let padding_top = available_height.saturating_sub(img_rows) / 2;

    let mut lines = Vec::new();
    for _ in 0..padding_top {
        lines.push(Line::default());
    }

    for y in (0..img_height_subpixels).step_by(2) {
        let mut spans = Vec::new();
        for x in 0..resized.width() {
            let p1 = resized.get_pixel(x, y);
            let p2 = if y + 1 < img_height_subpixels {
                resized.get_pixel(x, y + 1)
            } else {
                p1
            };
            spans.push(Span::styled(
                "▀",
                Style::default()
                    .fg(Color::Rgb(p1[0], p1[1], p1[2]))
                    .bg(Color::Rgb(p2[0], p2[1], p2[2])),
            ));
        }
        lines.push(Line::from(spans));
    }

    let artwork_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(artwork_widget, area);
}

/// Centered text standing in for a cover.
pub fn render_placeholder(f: &mut Frame, area: Rect, text: &str, color: Color) {
    if area.height == 0 {
        return;
    }
    let mut lines = vec![Line::default(); (area.height.saturating_sub(1) / 2) as usize];
    lines.push(Line::from(text.to_string()));
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().fg(color).bg(Color::Reset)));
    f.render_widget(p, area);
}
