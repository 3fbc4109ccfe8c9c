use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::colors::Palette;
use crate::ui::utils::centered_rect;

pub const LOADING_TEXT: &str = "Connecting to Cloud";

pub fn render_loading(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(60, 30, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // Spinner
            Constraint::Length(1), // Message
            Constraint::Min(0),
        ])
        .split(popup_area);

    let tick = app.loading_tick;
    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[(tick % spinner_chars.len() as u64) as usize];
    let dots = ".".repeat(((tick / 8) % 4) as usize);

    f.render_widget(
        Paragraph::new(Span::styled(spinner, Style::default().fg(palette.accent))).alignment(Alignment::Center),
        layout[1],
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(LOADING_TEXT, Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
            Span::styled(dots, Style::default().fg(palette.muted)),
        ]))
        .alignment(Alignment::Center),
        layout[2],
    );
}
