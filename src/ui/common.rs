use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
    Frame,
};

use crate::ui::colors::Palette;

/// Rounded card block used across screens
pub fn card<'a>(palette: &Palette, title: Option<&'a str>, highlighted: bool) -> Block<'a> {
    let border = if highlighted { palette.accent } else { palette.border };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(palette.surface).fg(palette.text));
    if let Some(title) = title {
        block = block.title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ));
    }
    block
}

/// Paint the page background
pub fn fill_background(f: &mut Frame, palette: &Palette, area: Rect) {
    f.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);
}

pub fn selected_style(palette: &Palette) -> Style {
    Style::default()
        .bg(palette.accent)
        .fg(ratatui::style::Color::White)
        .add_modifier(Modifier::BOLD)
}
