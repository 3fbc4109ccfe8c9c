use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::social::SOCIAL_LINKS;
use crate::ui::colors::Palette;
use crate::ui::common::{card, selected_style};

const SIDEBAR_WIDTH: u16 = 32;

pub fn render_sidebar(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let panel = Rect::new(area.x, area.y, SIDEBAR_WIDTH.min(area.width), area.height);
    f.render_widget(Clear, panel);

    let block = card(palette, Some("BeingTv"), true);
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Links
            Constraint::Length(2), // Sync status
        ])
        .split(inner);

    let items: Vec<ListItem> = SOCIAL_LINKS
        .iter()
        .map(|link| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", link.icon.glyph()), Style::default().fg(palette.accent)),
                Span::styled(link.name, Style::default().fg(palette.text)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(selected_style(palette));
    f.render_stateful_widget(list, chunks[0], &mut app.cursors.sidebar_list_state);

    let synced = app
        .catalog
        .last_synced
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let live = if app.realtime_connected { "live" } else { "offline" };
    let status = Paragraph::new(vec![
        Line::from(Span::styled(format!(" Synced {}", synced), Style::default().fg(palette.muted))),
        Line::from(Span::styled(
            format!(" Updates: {}", live),
            Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
        )),
    ]);
    f.render_widget(status, chunks[1]);
}
