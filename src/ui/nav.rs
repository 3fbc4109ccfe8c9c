use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, CurrentScreen};
use crate::ui::colors::Palette;

pub const NAV_HEIGHT: u16 = 3;

pub fn render_bottom_nav(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let on_events = app.view.current_screen == CurrentScreen::LiveEvent;
    let tab = |label: &'static str, key: &'static str, active: bool| {
        let style = if active {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(palette.muted)),
            Span::styled(label, style),
        ]))
        .alignment(Alignment::Center)
    };

    f.render_widget(tab("Home", "1", !on_events), halves[0]);
    f.render_widget(tab("Events", "2", on_events), halves[1]);
}
