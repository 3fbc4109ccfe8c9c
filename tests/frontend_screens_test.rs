use beingtv_lib::api::Channel;
use beingtv_lib::app::{App, CurrentScreen};
use beingtv_lib::catalog::{CatalogSnapshot, FALLBACK_MATCHES};
use beingtv_lib::handlers::input::start_playback;
use beingtv_lib::player::Player;
use beingtv_lib::playback::MediaEvent;
use beingtv_lib::preferences::{MemoryStore, Preferences, THEME_KEY};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

// ─── Helpers ───────────────────────────────────────────────────────────────────

fn app_with_theme(dark: bool) -> App {
    let store = MemoryStore::new().with_value(THEME_KEY, if dark { "dark" } else { "light" });
    App::with_preferences(Preferences::load(Box::new(store)))
}

fn loaded_app(dark: bool) -> App {
    let mut app = app_with_theme(dark);
    app.install_catalog(CatalogSnapshot::fallback());
    app
}

/// Render one frame and return the screen as text, row by row
fn render_text(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| {
            beingtv_lib::ui::ui(f, app);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn render(app: &mut App) -> String {
    render_text(app, 100, 32)
}

// ─── Screens ───────────────────────────────────────────────────────────────────

#[test]
fn test_loading_screen_until_first_catalog() {
    for dark in [false, true] {
        let mut app = app_with_theme(dark);
        let screen = render(&mut app);
        assert!(screen.contains("Connecting to Cloud"));

        app.install_catalog(CatalogSnapshot::fallback());
        let screen = render(&mut app);
        assert!(!screen.contains("Connecting to Cloud"));
    }
}

#[test]
fn test_live_tv_lists_categories() {
    for dark in [false, true] {
        let mut app = loaded_app(dark);
        let screen = render(&mut app);
        assert!(screen.contains("BeingTv"));
        assert!(screen.contains("beIN SPORTS (720P)"));
        assert!(screen.contains("KIDS CHANNELS"));
        assert!(screen.contains("Home"));
        assert!(screen.contains("Events"));
    }
}

#[test]
fn test_category_detail_shows_grid_and_hearts() {
    for dark in [false, true] {
        let mut app = loaded_app(dark);
        let category = app.catalog.categories[1].clone();
        app.select_category(category);
        app.toggle_favorite("bn-news");

        let screen = render(&mut app);
        assert!(screen.contains("beIN SPORTS (720P)"));
        assert!(screen.contains("beIN News"));
        assert!(screen.contains("♥"));
    }
}

#[test]
fn test_search_header_and_results() {
    let mut app = loaded_app(true);
    app.toggle_search();
    app.set_search_term("sport 3");
    let screen = render(&mut app);
    assert!(screen.contains("sport 3"));
    assert!(screen.contains("beIN Sport 3"));
    assert!(!screen.contains("beIN Sport 4"));
}

#[test]
fn test_live_event_cards() {
    for dark in [false, true] {
        let mut app = loaded_app(dark);
        app.go_events();
        let screen = render(&mut app);
        assert!(screen.contains("LIVE EVENT"));
        assert!(screen.contains("Sunderland  vs  Man City"));
        assert!(screen.contains("Premier League"));
    }
}

#[test]
fn test_sidebar_overlay() {
    let mut app = loaded_app(false);
    app.open_sidebar();
    let screen = render(&mut app);
    assert!(screen.contains("Contact us"));
    assert!(screen.contains("Privacy policy"));
}

#[test]
fn test_sentinel_channel_shows_no_signal_and_never_plays() {
    for dark in [false, true] {
        let mut app = loaded_app(dark);
        let player = Player::new();
        let (tx, _rx) = mpsc::channel(4);

        let channel = app.catalog.channels[0].clone();
        assert_eq!(channel.stream_url.as_deref(), Some("#"));
        app.select_channel(channel);
        start_playback(&mut app, &player, &tx);

        assert_eq!(app.view.current_screen, CurrentScreen::ChannelPlayer);
        assert_eq!(player.current_session(), 0);
        assert!(!player.is_running());
        assert_eq!(app.player_session, None);

        let screen = render(&mut app);
        assert!(screen.contains("No Signal Detected"));
        assert!(!screen.contains("Buffering"));
        // Header and bottom navigation are hidden on the player
        assert!(!screen.contains("Events"));
    }
}

#[test]
fn test_match_without_stream_shows_no_signal() {
    let mut app = loaded_app(true);
    let m = FALLBACK_MATCHES[0].clone();
    app.select_match(&m);
    let screen = render(&mut app);
    assert!(screen.contains("Sunderland vs Man City"));
    assert!(screen.contains("LIVE"));
    assert!(screen.contains("No Signal Detected"));
}

#[test]
fn test_playable_channel_buffers_until_player_reports() {
    let mut app = loaded_app(false);
    app.select_channel(Channel {
        id: "x".into(),
        name: "Test Feed".into(),
        stream_url: Some("https://cdn.example/live.m3u8".into()),
        ..Default::default()
    });
    app.attach_player_session(1);
    assert!(render(&mut app).contains("Buffering"));

    app.on_media_event(1, MediaEvent::Playing);
    let screen = render(&mut app);
    assert!(!screen.contains("Buffering"));
    assert!(!screen.contains("No Signal Detected"));

    app.toggle_play();
    assert!(render(&mut app).contains("Paused"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut app = loaded_app(true);
    render_text(&mut app, 20, 6);
    app.go_events();
    render_text(&mut app, 20, 6);
    let channel = app.catalog.channels[0].clone();
    app.select_channel(channel);
    render_text(&mut app, 20, 6);
}
