use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::colors::Palette;

pub const HEADER_HEIGHT: u16 = 3;

pub fn render_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4), // Menu
            Constraint::Min(0),    // Title or search field
            Constraint::Length(8), // Search + theme toggles
        ])
        .split(inner);

    let icon_style = Style::default().fg(palette.text).add_modifier(Modifier::BOLD);
    f.render_widget(Paragraph::new(Span::styled(" ☰ ", icon_style)), chunks[0]);

    if app.view.search_mode {
        let term = app.search_term();
        let width = chunks[1].width.saturating_sub(4) as usize;
        let scroll = app.view.search_input.visual_scroll(width);
        let visible: String = term.chars().skip(scroll).take(width).collect();
        let field = Paragraph::new(Line::from(vec![
            Span::styled("⌕ ", Style::default().fg(palette.accent)),
            Span::styled(
                if visible.is_empty() { "Search channels".to_string() } else { visible },
                if term.is_empty() {
                    Style::default().fg(palette.muted)
                } else {
                    Style::default().fg(palette.text)
                },
            ),
        ]));
        f.render_widget(field, chunks[1]);

        let cursor_x = chunks[1].x + 2 + (app.view.search_input.visual_cursor().saturating_sub(scroll)) as u16;
        f.set_cursor_position((cursor_x.min(chunks[1].right().saturating_sub(1)), chunks[1].y));
    } else {
        let title = Paragraph::new(Span::styled(
            app.header_title(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[1]);
    }

    let theme_glyph = if app.theme().is_dark() { "☀" } else { "☾" };
    let search_style = if app.view.search_mode {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        icon_style
    };
    let toggles = Paragraph::new(Line::from(vec![
        Span::styled("⌕ ", search_style),
        Span::styled(format!("{} ", theme_glyph), icon_style),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(toggles, chunks[2]);
}
