use chrono::{DateTime, Local};
use ratatui::widgets::ListState;
use tui_input::Input;

use crate::api::{Category, Channel, Match};
use crate::catalog::CatalogSnapshot;

/// Columns in the channel tile grid
pub const CHANNEL_GRID_COLUMNS: usize = 3;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum CurrentScreen {
    LiveTv,         // Category list
    LiveEvent,      // Match fixtures
    CategoryDetail, // Channels of one category
    ChannelPlayer,  // Player shell
}

/// Navigational truth. Mutated only through `App` operations.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub current_screen: CurrentScreen,
    pub selected_category: Option<Category>,
    pub selected_channel: Option<Channel>,
    pub active_stream_url: Option<String>,
    pub search_mode: bool,
    pub search_input: Input,
    pub is_playing: bool,
    pub sidebar_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_screen: CurrentScreen::LiveTv,
            selected_category: None,
            selected_channel: None,
            active_stream_url: None,
            search_mode: false,
            search_input: Input::default(),
            is_playing: true,
            sidebar_open: false,
        }
    }
}

impl ViewState {
    pub fn search_term(&self) -> &str {
        self.search_input.value()
    }

    /// Screen-level invariants; used by tests and debug assertions
    pub fn is_consistent(&self) -> bool {
        match self.current_screen {
            CurrentScreen::CategoryDetail => self.selected_category.is_some(),
            CurrentScreen::ChannelPlayer => self.selected_channel.is_some() && self.active_stream_url.is_some(),
            CurrentScreen::LiveTv | CurrentScreen::LiveEvent => true,
        }
    }
}

/// Remote collections, replaced wholesale on every refresh
#[derive(Debug, Default)]
pub struct CatalogState {
    pub categories: Vec<Category>,
    pub channels: Vec<Channel>,
    pub matches: Vec<Match>,
    /// Set once the first snapshot arrives
    pub loaded: bool,
    pub last_synced: Option<DateTime<Local>>,
    pub refresh_count: usize,
}

impl CatalogState {
    pub fn install(&mut self, snapshot: CatalogSnapshot) {
        let CatalogSnapshot {
            categories,
            channels,
            matches,
        } = snapshot;
        self.categories = categories;
        self.channels = channels;
        self.matches = matches;
        self.loaded = true;
        self.last_synced = Some(Local::now());
        self.refresh_count += 1;
    }

    /// Case-insensitive exact name match
    pub fn channel_named(&self, name: &str) -> Option<&Channel> {
        let wanted = name.to_lowercase();
        self.channels.iter().find(|c| c.name.to_lowercase() == wanted)
    }
}

/// List cursors for the screens
#[derive(Debug, Default)]
pub struct CursorState {
    pub category_list_state: ListState,
    pub channel_index: usize,
    pub match_list_state: ListState,
    pub sidebar_list_state: ListState,
}

impl CursorState {
    pub fn clamp(list_state: &mut ListState, len: usize) {
        if len == 0 {
            list_state.select(None);
            return;
        }
        let i = list_state.selected().unwrap_or(0).min(len - 1);
        list_state.select(Some(i));
    }

    pub fn navigate_list(list_state: &mut ListState, len: usize, forward: bool) {
        if len == 0 {
            return;
        }
        let i = match list_state.selected() {
            Some(i) => {
                if forward {
                    (i + 1) % len
                } else if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        list_state.select(Some(i));
    }

    /// Move inside a row-major grid; stays put at the edges
    pub fn move_in_grid(&mut self, len: usize, d_col: i32, d_row: i32) {
        if len == 0 {
            self.channel_index = 0;
            return;
        }
        let cols = CHANNEL_GRID_COLUMNS as i32;
        let current = self.channel_index.min(len - 1) as i32;
        let target = current + d_col + d_row * cols;
        let same_row = d_row != 0 || target / cols == current / cols;
        if target >= 0 && (target as usize) < len && same_row {
            self.channel_index = target as usize;
        } else {
            self.channel_index = current as usize;
        }
    }
}
