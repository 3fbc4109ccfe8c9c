pub mod categories;
pub mod channels;
pub mod colors;
pub mod common;
pub mod events;
pub mod header;
pub mod loading;
pub mod nav;
pub mod player;
pub mod sidebar;
pub mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, ContentView};
use crate::ui::colors::Palette;
use crate::ui::common::fill_background;
use crate::ui::header::HEADER_HEIGHT;
use crate::ui::nav::NAV_HEIGHT;
use crate::ui::utils::mobile_column;

pub fn ui(f: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme());
    let area = f.area();
    fill_background(f, &palette, area);

    let column = mobile_column(area);

    if app.is_loading() {
        loading::render_loading(f, app, &palette, column);
        return;
    }

    if app.content_view() == ContentView::Player {
        player::render_player(f, app, &palette, column);
        return;
    }

    render_main_layout(f, app, &palette, column);

    // Overlays
    if app.view.sidebar_open {
        sidebar::render_sidebar(f, app, &palette, column);
    }
}

fn render_main_layout(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Content
            Constraint::Length(NAV_HEIGHT),    // Bottom navigation
        ])
        .split(area);

    header::render_header(f, app, palette, chunks[0]);
    nav::render_bottom_nav(f, app, palette, chunks[2]);

    match app.content_view() {
        ContentView::Categories => categories::render_categories(f, app, palette, chunks[1]),
        ContentView::ChannelGrid => channels::render_channel_grid(f, app, palette, chunks[1]),
        ContentView::Matches => events::render_events(f, app, palette, chunks[1]),
        ContentView::Player => {}
    }
}
