use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::state::CHANNEL_GRID_COLUMNS;
use crate::ui::colors::{Palette, HEART_RED};
use crate::ui::common::card;
use crate::ui::utils::truncate;

const TILE_HEIGHT: u16 = 4;

pub fn render_channel_grid(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let channels = app.current_channels();

    if channels.is_empty() {
        let msg = if app.search_term().is_empty() && app.view.search_mode {
            "Type to search channels"
        } else {
            "No channels found"
        };
        let empty = Paragraph::new(Span::styled(msg, Style::default().fg(palette.muted)))
            .alignment(Alignment::Center)
            .block(card(palette, None, false));
        f.render_widget(empty, area);
        return;
    }

    let rows_visible = (area.height / TILE_HEIGHT).max(1) as usize;
    let selected = app.cursors.channel_index.min(channels.len() - 1);
    let selected_row = selected / CHANNEL_GRID_COLUMNS;
    let first_row = selected_row.saturating_sub(rows_visible - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(TILE_HEIGHT); rows_visible])
        .split(area);

    for (r, row_area) in row_areas.iter().enumerate() {
        let row = first_row + r;
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, CHANNEL_GRID_COLUMNS as u32); CHANNEL_GRID_COLUMNS])
            .split(*row_area);

        for (c, tile_area) in col_areas.iter().enumerate() {
            let index = row * CHANNEL_GRID_COLUMNS + c;
            let Some(channel) = channels.get(index) else {
                continue;
            };
            let is_selected = index == selected;
            let width = tile_area.width.saturating_sub(2) as usize;

            let heart = if app.is_favorite(&channel.id) {
                Span::styled("♥", Style::default().fg(HEART_RED))
            } else {
                Span::raw(" ")
            };
            let signal = if channel.has_stream() {
                Span::styled("●", Style::default().fg(palette.accent))
            } else {
                Span::styled("○", Style::default().fg(palette.muted))
            };

            let name_style = if is_selected {
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };

            let tile = Paragraph::new(vec![
                Line::from(vec![signal, Span::raw(" ".repeat(width.saturating_sub(2))), heart]),
                Line::from(Span::styled(truncate(&channel.name, width), name_style)).alignment(Alignment::Center),
            ])
            .block(card(palette, None, is_selected));
            f.render_widget(tile, *tile_area);
        }
    }
}
