use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::colors::Palette;
use crate::ui::common::{card, selected_style};

pub fn render_categories(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let block = card(palette, Some("Categories"), false);

    if app.catalog.categories.is_empty() {
        let empty = Paragraph::new(Span::styled("No categories", Style::default().fg(palette.muted))).block(block);
        f.render_widget(empty, area);
        return;
    }

    let inner_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .catalog
        .categories
        .iter()
        .map(|c| {
            let pad = inner_width.saturating_sub(c.name.chars().count() + 2);
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}", c.name), Style::default().fg(palette.text)),
                Span::raw(" ".repeat(pad)),
                Span::styled("›", Style::default().fg(palette.muted)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style(palette))
        .highlight_symbol("▌");

    if app.cursors.category_list_state.selected().is_none() {
        app.cursors.category_list_state.select(Some(0));
    }
    f.render_stateful_widget(list, area, &mut app.cursors.category_list_state);
}
