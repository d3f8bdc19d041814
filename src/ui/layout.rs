use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    // Footer needs 1 line at the bottom always
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        footer_area: chunks[1],
    }
}

pub struct PlayerLayout {
    pub carousel: Rect,
    pub info: Rect,
    pub gauge: Rect,
    pub time: Rect,
    pub controls: Rect,
}

/// Split the now-playing card. Below 10 rows the carousel is hidden and only
/// the essentials remain.
pub fn get_player_layout(area: Rect) -> PlayerLayout {
    let tiny = area.height < 10;
    let constraints = if tiny {
        [
            Constraint::Length(0),                           // Carousel (hidden)
            Constraint::Length(area.height.saturating_sub(2)), // Info
            Constraint::Length(1),                           // Gauge
            Constraint::Length(0),                           // Time (hidden)
            Constraint::Length(1),                           // Controls
        ]
    } else {
        [
            Constraint::Min(0),    // Carousel takes what is left
            Constraint::Length(3), // Info
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Time
            Constraint::Length(3), // Controls
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    PlayerLayout {
        carousel: chunks[0],
        info: chunks[1],
        gauge: chunks[2],
        time: chunks[3],
        controls: chunks[4],
    }
}

/// Screen columns `[start, end)` of a carousel card whose left edge sits at
/// `left` (possibly off screen), clipped to `area`.
pub fn clip_columns(area: Rect, left: i32, width: u16) -> Option<Rect> {
    let start = left.max(area.x as i32);
    let end = (left + width as i32).min(area.x as i32 + area.width as i32);
    if end <= start {
        return None;
    }
    Some(Rect::new(start as u16, area.y, (end - start) as u16, area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_layout_hides_carousel_when_short() {
        let layout = get_player_layout(Rect::new(0, 0, 40, 8));
        assert_eq!(layout.carousel.height, 0);
        assert_eq!(layout.gauge.height, 1);
        assert_eq!(layout.controls.height, 1);

        let layout = get_player_layout(Rect::new(0, 0, 40, 30));
        assert_eq!(layout.carousel.height, 30 - 3 - 1 - 1 - 3);
        assert_eq!(layout.info.height, 3);
    }

    #[test]
    fn test_clip_columns() {
        let area = Rect::new(5, 2, 20, 6);
        assert_eq!(clip_columns(area, 10, 8), Some(Rect::new(10, 2, 8, 6)));
        assert_eq!(clip_columns(area, 0, 8), Some(Rect::new(5, 2, 3, 6)));
        assert_eq!(clip_columns(area, 20, 10), Some(Rect::new(20, 2, 5, 6)));
        assert_eq!(clip_columns(area, -10, 8), None);
        assert_eq!(clip_columns(area, 25, 8), None);
    }
}
