use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::api::Match;
use crate::app::App;
use crate::ui::colors::{Palette, LIVE_RED};
use crate::ui::common::card;

fn match_lines<'a>(m: &'a Match, palette: &Palette, width: usize) -> Vec<Line<'a>> {
    let status_style = if m.is_live() {
        Style::default().bg(LIVE_RED).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted).add_modifier(Modifier::BOLD)
    };
    let teams = format!("{}  vs  {}", m.display_team1(), m.display_team2());
    let pad = width.saturating_sub(teams.chars().count() + 2) / 2;

    vec![
        Line::from(vec![
            Span::styled(format!(" {} ", m.display_tournament()), Style::default().fg(palette.muted)),
            Span::styled(format!(" {} ", m.display_status()), status_style),
        ]),
        Line::from(vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(teams, Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(" 🎙 ", Style::default().fg(palette.accent)),
            Span::styled(m.display_commentator(), Style::default().fg(palette.text)),
            Span::styled("  📺 ", Style::default().fg(palette.accent)),
            Span::styled(m.channel_name.as_str(), Style::default().fg(palette.text)),
        ]),
        Line::from(""),
    ]
}

pub fn render_events(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let block = card(palette, Some("Live Events"), false);

    if app.catalog.matches.is_empty() {
        let empty = Paragraph::new(Span::styled("No events scheduled", Style::default().fg(palette.muted)))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .catalog
        .matches
        .iter()
        .map(|m| ListItem::new(match_lines(m, palette, width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(palette.border))
        .highlight_symbol("▌");

    if app.cursors.match_list_state.selected().is_none() {
        app.cursors.match_list_state.select(Some(0));
    }
    f.render_stateful_widget(list, area, &mut app.cursors.match_list_state);
}
