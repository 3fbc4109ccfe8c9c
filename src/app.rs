use tracing::{debug, info};
use tui_input::{Input, InputRequest};

use crate::api::{Category, Channel, Match, NO_STREAM};
use crate::catalog::CatalogSnapshot;
use crate::playback::{MediaEvent, VideoSurface};
use crate::preferences::{FileStore, Preferences, Theme};
use crate::social::{SocialLink, SOCIAL_LINKS};
use crate::state::{CatalogState, CursorState, ViewState};

pub use crate::state::CurrentScreen;

/// Messages from background tasks to the UI loop
#[derive(Debug, Clone)]
pub enum AsyncAction {
    CatalogLoaded(CatalogSnapshot),
    /// Player signal tagged with the session that produced it
    Media(u64, MediaEvent),
    PlayerFailed(String),
    RealtimeStatus(bool),
}

/// What the content area shows for the current view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentView {
    Categories,
    ChannelGrid,
    Matches,
    Player,
}

/// Id prefix for channels synthesized from a match
pub const MATCH_CHANNEL_PREFIX: &str = "match-";
pub const LIVE_EVENTS_CATEGORY: &str = "live-events";

fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates.iter().flatten().copied().find(|s| !s.is_empty())
}

/// Build the playable channel for a fixture. `matched` is the channel whose
/// name equals the fixture's channel name, if any.
pub fn match_channel(m: &Match, matched: Option<&Channel>) -> Channel {
    let logo = first_non_empty(&[matched.map(|c| c.logo.as_str()), Some(m.team1_logo.as_str())]).unwrap_or("");
    let stream = first_non_empty(&[m.stream_url.as_deref(), matched.and_then(|c| c.stream_url.as_deref())])
        .unwrap_or(NO_STREAM);

    Channel {
        id: format!("{}{}", MATCH_CHANNEL_PREFIX, m.id),
        name: format!("{} vs {}", m.team1_name, m.team2_name),
        logo: logo.to_string(),
        category_id: LIVE_EVENTS_CATEGORY.to_string(),
        stream_url: Some(stream.to_string()),
    }
}

pub struct App {
    pub view: ViewState,
    pub catalog: CatalogState,
    pub cursors: CursorState,
    pub preferences: Preferences,
    /// Present only while the player screen is mounted
    pub surface: Option<VideoSurface>,
    /// Player session bound to `surface`; older sessions are stale
    pub player_session: Option<u64>,
    pub realtime_connected: bool,
    pub should_quit: bool,
    pub loading_tick: u64,
}

impl App {
    pub fn new() -> App {
        let preferences = match FileStore::open_default() {
            Some(store) => {
                debug!("Preferences file: {:?}", store.path());
                Preferences::load(Box::new(store))
            }
            None => Preferences::in_memory(),
        };
        Self::with_preferences(preferences)
    }

    pub fn with_preferences(preferences: Preferences) -> App {
        App {
            view: ViewState::default(),
            catalog: CatalogState::default(),
            cursors: CursorState::default(),
            preferences,
            surface: None,
            player_session: None,
            realtime_connected: false,
            should_quit: false,
            loading_tick: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.catalog.loaded && self.catalog.categories.is_empty()
    }

    pub fn theme(&self) -> Theme {
        self.preferences.theme()
    }

    pub fn search_term(&self) -> &str {
        self.view.search_term()
    }

    // --- catalog ---

    pub fn install_catalog(&mut self, snapshot: CatalogSnapshot) {
        self.catalog.install(snapshot);
        info!(
            "Catalog installed: {} categories, {} channels, {} matches",
            self.catalog.categories.len(),
            self.catalog.channels.len(),
            self.catalog.matches.len()
        );
        CursorState::clamp(&mut self.cursors.category_list_state, self.catalog.categories.len());
        CursorState::clamp(&mut self.cursors.match_list_state, self.catalog.matches.len());
        let visible = self.current_channels().len();
        self.cursors.channel_index = self.cursors.channel_index.min(visible.saturating_sub(1));
    }

    /// Case-insensitive substring filter over every channel
    pub fn filtered_channels(&self) -> Vec<&Channel> {
        let term = self.search_term().to_lowercase();
        self.catalog
            .channels
            .iter()
            .filter(|c| term.is_empty() || c.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Search results when a term is set, else the selected category's channels
    pub fn current_channels(&self) -> Vec<&Channel> {
        if !self.search_term().is_empty() {
            return self.filtered_channels();
        }
        match &self.view.selected_category {
            Some(cat) => self.catalog.channels.iter().filter(|c| c.category_id == cat.id).collect(),
            None => Vec::new(),
        }
    }

    // --- navigation ---

    pub fn select_category(&mut self, category: Category) {
        debug!("Category selected: {}", category.name);
        self.view.selected_category = Some(category);
        self.view.current_screen = CurrentScreen::CategoryDetail;
        self.cursors.channel_index = 0;
    }

    pub fn select_channel(&mut self, channel: Channel) {
        info!("Channel selected: {} ({})", channel.name, channel.id);
        let stream = channel.stream_url.clone().unwrap_or_else(|| NO_STREAM.to_string());
        self.view.active_stream_url = Some(stream);
        self.surface = Some(VideoSurface::mount(self.view.active_stream_url.as_deref()));
        self.player_session = None;
        self.view.selected_channel = Some(channel);
        self.view.current_screen = CurrentScreen::ChannelPlayer;
        self.view.is_playing = true;
        self.view.search_mode = false;
        self.view.sidebar_open = false;
    }

    pub fn select_match(&mut self, m: &Match) {
        let matched = self.catalog.channel_named(&m.channel_name);
        if matched.is_none() {
            debug!("No channel named {:?} for match {}", m.channel_name, m.id);
        }
        let channel = match_channel(m, matched);
        self.select_channel(channel);
    }

    fn leave_player(&mut self) -> bool {
        if self.view.current_screen != CurrentScreen::ChannelPlayer {
            return false;
        }
        self.surface = None;
        self.player_session = None;
        self.view.active_stream_url = None;
        true
    }

    /// Bottom navigation: Home. Returns true when playback must stop.
    pub fn go_home(&mut self) -> bool {
        let left_player = self.leave_player();
        self.view.current_screen = CurrentScreen::LiveTv;
        self.view.search_mode = false;
        self.view.search_input.reset();
        left_player
    }

    /// Bottom navigation: Events. Returns true when playback must stop.
    pub fn go_events(&mut self) -> bool {
        let left_player = self.leave_player();
        self.view.current_screen = CurrentScreen::LiveEvent;
        self.view.search_mode = false;
        self.view.search_input.reset();
        left_player
    }

    /// One step back. Returns true when playback must stop.
    pub fn back(&mut self) -> bool {
        if self.view.sidebar_open {
            self.close_sidebar();
            return false;
        }
        if self.view.search_mode {
            self.view.search_mode = false;
            return false;
        }
        match self.view.current_screen {
            CurrentScreen::ChannelPlayer => {
                let left = self.leave_player();
                self.view.current_screen = CurrentScreen::LiveTv;
                left
            }
            CurrentScreen::CategoryDetail | CurrentScreen::LiveEvent => {
                self.view.current_screen = CurrentScreen::LiveTv;
                false
            }
            CurrentScreen::LiveTv => false,
        }
    }

    /// Flip the play/pause intent; returns the new intent
    pub fn toggle_play(&mut self) -> bool {
        if self.view.current_screen == CurrentScreen::ChannelPlayer {
            self.view.is_playing = !self.view.is_playing;
        }
        self.view.is_playing
    }

    pub fn toggle_search(&mut self) {
        self.view.search_mode = !self.view.search_mode;
        self.cursors.channel_index = 0;
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.view.search_input = Input::new(term.to_string());
        self.cursors.channel_index = 0;
    }

    /// Edit the search field in place
    pub fn edit_search(&mut self, request: InputRequest) {
        self.view.search_input.handle(request);
        self.cursors.channel_index = 0;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.preferences.toggle_theme();
        info!("Theme switched to {}", theme.as_stored());
        theme
    }

    pub fn toggle_favorite(&mut self, channel_id: &str) -> bool {
        self.preferences.toggle_favorite(channel_id)
    }

    pub fn is_favorite(&self, channel_id: &str) -> bool {
        self.preferences.is_favorite(channel_id)
    }

    pub fn open_sidebar(&mut self) {
        self.view.sidebar_open = true;
        if self.cursors.sidebar_list_state.selected().is_none() {
            self.cursors.sidebar_list_state.select(Some(0));
        }
    }

    pub fn close_sidebar(&mut self) {
        self.view.sidebar_open = false;
    }

    // --- player surface ---

    /// Bind the running player session to the mounted surface
    pub fn attach_player_session(&mut self, session: u64) {
        self.player_session = Some(session);
    }

    /// Apply a player signal; stale sessions are ignored
    pub fn on_media_event(&mut self, session: u64, event: MediaEvent) -> bool {
        if self.player_session != Some(session) {
            debug!("Dropping {:?} from stale player session {}", event, session);
            return false;
        }
        match self.surface.as_mut() {
            Some(surface) => {
                surface.on_media_event(event);
                true
            }
            None => false,
        }
    }

    // --- derived view ---

    pub fn content_view(&self) -> ContentView {
        match self.view.current_screen {
            CurrentScreen::ChannelPlayer => ContentView::Player,
            CurrentScreen::LiveEvent => ContentView::Matches,
            CurrentScreen::LiveTv if !self.view.search_mode => ContentView::Categories,
            CurrentScreen::LiveTv | CurrentScreen::CategoryDetail => ContentView::ChannelGrid,
        }
    }

    pub fn header_title(&self) -> String {
        match self.view.current_screen {
            CurrentScreen::LiveTv => "BeingTv".to_string(),
            CurrentScreen::LiveEvent => "LIVE EVENT".to_string(),
            _ => self
                .view
                .selected_category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Category".to_string()),
        }
    }

    pub fn shows_chrome(&self) -> bool {
        self.view.current_screen != CurrentScreen::ChannelPlayer
    }

    // --- cursors ---

    pub fn next_category(&mut self) {
        CursorState::navigate_list(&mut self.cursors.category_list_state, self.catalog.categories.len(), true);
    }

    pub fn previous_category(&mut self) {
        CursorState::navigate_list(&mut self.cursors.category_list_state, self.catalog.categories.len(), false);
    }

    pub fn next_match(&mut self) {
        CursorState::navigate_list(&mut self.cursors.match_list_state, self.catalog.matches.len(), true);
    }

    pub fn previous_match(&mut self) {
        CursorState::navigate_list(&mut self.cursors.match_list_state, self.catalog.matches.len(), false);
    }

    pub fn next_social(&mut self) {
        CursorState::navigate_list(&mut self.cursors.sidebar_list_state, SOCIAL_LINKS.len(), true);
    }

    pub fn previous_social(&mut self) {
        CursorState::navigate_list(&mut self.cursors.sidebar_list_state, SOCIAL_LINKS.len(), false);
    }

    pub fn move_channel_cursor(&mut self, d_col: i32, d_row: i32) {
        let len = self.current_channels().len();
        self.cursors.move_in_grid(len, d_col, d_row);
    }

    pub fn highlighted_category(&self) -> Option<&Category> {
        let i = self.cursors.category_list_state.selected().unwrap_or(0);
        self.catalog.categories.get(i)
    }

    pub fn highlighted_channel(&self) -> Option<&Channel> {
        self.current_channels().get(self.cursors.channel_index).copied()
    }

    pub fn highlighted_match(&self) -> Option<&Match> {
        let i = self.cursors.match_list_state.selected().unwrap_or(0);
        self.catalog.matches.get(i)
    }

    pub fn highlighted_social(&self) -> Option<&'static SocialLink> {
        let i = self.cursors.sidebar_list_state.selected().unwrap_or(0);
        SOCIAL_LINKS.get(i)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_preferences(Preferences::in_memory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FALLBACK_MATCHES;
    use crate::playback::PlaybackState;

    fn loaded_app() -> App {
        let mut app = App::default();
        app.install_catalog(CatalogSnapshot::fallback());
        app
    }

    #[test]
    fn test_match_channel_joins_by_name() {
        let app = loaded_app();
        let m = &FALLBACK_MATCHES[0];
        let joined = app.catalog.channel_named(&m.channel_name);
        assert!(joined.is_some());

        let ch = match_channel(m, joined);
        assert_eq!(ch.id, "match-m1");
        assert_eq!(ch.name, "Sunderland vs Man City");
        assert_eq!(ch.category_id, "live-events");
        assert_eq!(ch.stream_url.as_deref(), Some("#"));
    }

    #[test]
    fn test_match_channel_prefers_match_stream() {
        let m = Match {
            id: "7".into(),
            team1_name: "A".into(),
            team2_name: "B".into(),
            team1_logo: "a.png".into(),
            stream_url: Some("https://cdn/m.m3u8".into()),
            ..Default::default()
        };
        let joined = Channel {
            logo: "ch.png".into(),
            stream_url: Some("https://cdn/ch.m3u8".into()),
            ..Default::default()
        };
        let ch = match_channel(&m, Some(&joined));
        assert_eq!(ch.stream_url.as_deref(), Some("https://cdn/m.m3u8"));
        assert_eq!(ch.logo, "ch.png");

        let m_without = Match {
            stream_url: Some(String::new()),
            ..m.clone()
        };
        let ch = match_channel(&m_without, Some(&joined));
        assert_eq!(ch.stream_url.as_deref(), Some("https://cdn/ch.m3u8"));

        let ch = match_channel(&m_without, None);
        assert_eq!(ch.stream_url.as_deref(), Some("#"));
        assert_eq!(ch.logo, "a.png");
    }

    #[test]
    fn test_back_from_player_goes_home() {
        let mut app = loaded_app();
        let channel = app.catalog.channels[0].clone();
        app.select_channel(channel);
        assert_eq!(app.view.current_screen, CurrentScreen::ChannelPlayer);
        assert!(app.view.is_consistent());
        assert!(app.back());
        assert_eq!(app.view.current_screen, CurrentScreen::LiveTv);
        assert!(app.surface.is_none());
    }

    #[test]
    fn test_channel_without_stream_keeps_sentinel_url() {
        let mut app = loaded_app();
        app.select_channel(Channel {
            id: "bare".into(),
            name: "Bare".into(),
            stream_url: None,
            ..Default::default()
        });
        assert_eq!(app.view.active_stream_url.as_deref(), Some("#"));
        assert!(app.view.is_consistent());
        assert_eq!(app.surface.as_ref().map(|s| s.state()), Some(PlaybackState::NoSignal));
    }

    #[test]
    fn test_go_events_clears_search() {
        let mut app = loaded_app();
        app.toggle_search();
        app.set_search_term("sport 1");
        assert!(!app.go_events());
        assert_eq!(app.view.current_screen, CurrentScreen::LiveEvent);
        assert!(!app.view.search_mode);
        assert_eq!(app.search_term(), "");
    }

    #[test]
    fn test_stale_media_events_ignored() {
        let mut app = loaded_app();
        app.select_channel(Channel {
            id: "x".into(),
            name: "X".into(),
            stream_url: Some("https://cdn/x.m3u8".into()),
            ..Default::default()
        });
        app.attach_player_session(2);
        assert!(!app.on_media_event(1, MediaEvent::Playing));
        assert_eq!(app.surface.as_ref().map(|s| s.state()), Some(PlaybackState::Loading));
        assert!(app.on_media_event(2, MediaEvent::Playing));
        assert_eq!(app.surface.as_ref().map(|s| s.state()), Some(PlaybackState::Playing));
    }

    #[test]
    fn test_content_view_follows_search() {
        let mut app = loaded_app();
        assert_eq!(app.content_view(), ContentView::Categories);
        app.toggle_search();
        assert_eq!(app.content_view(), ContentView::ChannelGrid);
        assert_eq!(app.header_title(), "BeingTv");
    }

    #[test]
    fn test_install_clamps_cursors() {
        let mut app = loaded_app();
        app.cursors.category_list_state.select(Some(5));
        let categories = app.catalog.categories[..2].to_vec();
        app.install_catalog(CatalogSnapshot {
            categories,
            ..Default::default()
        });
        assert_eq!(app.cursors.category_list_state.selected(), Some(1));
        assert_eq!(app.cursors.match_list_state.selected(), None);
    }
}
