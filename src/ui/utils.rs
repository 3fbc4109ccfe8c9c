use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest the phone-shaped column gets
pub const MAX_COLUMN_WIDTH: u16 = 64;

/// Horizontally centered column no wider than `MAX_COLUMN_WIDTH`
pub fn mobile_column(area: Rect) -> Rect {
    let width = area.width.min(MAX_COLUMN_WIDTH);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Cut `text` to `max` chars, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 1 {
        return "…".chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
