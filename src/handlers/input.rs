use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use tui_input::InputRequest;

use crate::app::{App, AsyncAction, CurrentScreen};
use crate::player::Player;
use crate::social;
use crate::sync::RefreshTrigger;

#[derive(Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Channels the key handler talks to
pub struct InputContext<'a> {
    pub tx: &'a mpsc::Sender<AsyncAction>,
    pub refresh: &'a mpsc::Sender<RefreshTrigger>,
    pub player: &'a Player,
}

/// Launch the external player for the mounted surface. Surfaces without a
/// signal never start a process.
pub fn start_playback(app: &mut App, player: &Player, tx: &mpsc::Sender<AsyncAction>) {
    let Some(surface) = app.surface.as_ref() else {
        return;
    };
    let Some(url) = surface.url().map(str::to_string) else {
        debug!("No stream for this channel; player not started");
        player.stop();
        return;
    };
    let title = app
        .view
        .selected_channel
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_default();

    match player.play(&url, &title) {
        Ok(session) => {
            app.attach_player_session(session);
            player.spawn_event_bridge(session, tx.clone());
        }
        Err(e) => {
            warn!("{}", e);
            let _ = tx.try_send(AsyncAction::PlayerFailed(e.to_string()));
        }
    }
}

fn request_refresh(refresh: &mpsc::Sender<RefreshTrigger>) {
    if let Err(e) = refresh.try_send(RefreshTrigger::Manual) {
        debug!("Manual refresh not queued: {}", e);
    }
}

fn search_request(key: &KeyEvent) -> Option<InputRequest> {
    match key.code {
        KeyCode::Char(c) => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char('q') => return InputResult::Quit,
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Backspace => app.close_sidebar(),
        KeyCode::Down | KeyCode::Char('j') => app.next_social(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_social(),
        KeyCode::Enter => {
            if let Some(link) = app.highlighted_social() {
                social::open_link(link);
            }
        }
        _ => {}
    }
    InputResult::Continue
}

async fn handle_player_key(app: &mut App, key: KeyEvent, ctx: &InputContext<'_>) -> InputResult {
    let left_player = match key.code {
        KeyCode::Char('q') => return InputResult::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            let playing = app.toggle_play();
            ctx.player.set_paused(!playing).await;
            false
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => app.back(),
        KeyCode::Char('1') => app.go_home(),
        KeyCode::Char('2') => app.go_events(),
        KeyCode::Char('t') => {
            app.toggle_theme();
            false
        }
        _ => false,
    };
    if left_player {
        ctx.player.stop();
    }
    InputResult::Continue
}

fn play_highlighted_match(app: &mut App, ctx: &InputContext<'_>) {
    if let Some(m) = app.highlighted_match().cloned() {
        app.select_match(&m);
        start_playback(app, ctx.player, ctx.tx);
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent, ctx: &InputContext<'_>) -> InputResult {
    // Fixtures stay on screen while searching on the events view
    if app.view.current_screen == CurrentScreen::LiveEvent {
        let handled = match key.code {
            KeyCode::Enter => {
                play_highlighted_match(app, ctx);
                true
            }
            KeyCode::Down => {
                app.next_match();
                true
            }
            KeyCode::Up => {
                app.previous_match();
                true
            }
            _ => false,
        };
        if handled {
            return InputResult::Continue;
        }
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('f') {
            if let Some(id) = app.highlighted_channel().map(|c| c.id.clone()) {
                app.toggle_favorite(&id);
            }
        }
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Esc => {
            app.back();
        }
        KeyCode::Enter => {
            if let Some(channel) = app.highlighted_channel().cloned() {
                app.select_channel(channel);
                start_playback(app, ctx.player, ctx.tx);
            }
        }
        KeyCode::Up => app.move_channel_cursor(0, -1),
        KeyCode::Down => app.move_channel_cursor(0, 1),
        KeyCode::Left => app.move_channel_cursor(-1, 0),
        KeyCode::Right => app.move_channel_cursor(1, 0),
        _ => {
            if let Some(req) = search_request(&key) {
                app.edit_search(req);
            }
        }
    }
    InputResult::Continue
}

pub async fn handle_key_event(app: &mut App, key: KeyEvent, ctx: &InputContext<'_>) -> io::Result<InputResult> {
    // Only process key press events, not release (Windows sends both)
    if key.kind != KeyEventKind::Press {
        return Ok(InputResult::Continue);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(InputResult::Quit);
    }

    if app.view.sidebar_open {
        return Ok(handle_sidebar_key(app, key));
    }
    if app.view.current_screen == CurrentScreen::ChannelPlayer {
        return Ok(handle_player_key(app, key, ctx).await);
    }
    if app.view.search_mode {
        return Ok(handle_search_key(app, key, ctx));
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => return Ok(InputResult::Quit),
        KeyCode::Char('/') | KeyCode::Char('s') => {
            app.toggle_search();
            return Ok(InputResult::Continue);
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return Ok(InputResult::Continue);
        }
        KeyCode::Char('m') => {
            app.open_sidebar();
            return Ok(InputResult::Continue);
        }
        KeyCode::Char('r') => {
            request_refresh(ctx.refresh);
            return Ok(InputResult::Continue);
        }
        KeyCode::Char('1') => {
            app.go_home();
            return Ok(InputResult::Continue);
        }
        KeyCode::Char('2') => {
            app.go_events();
            return Ok(InputResult::Continue);
        }
        KeyCode::Tab => {
            if app.view.current_screen == CurrentScreen::LiveEvent {
                app.go_home();
            } else {
                app.go_events();
            }
            return Ok(InputResult::Continue);
        }
        KeyCode::Esc | KeyCode::Backspace => {
            app.back();
            return Ok(InputResult::Continue);
        }
        _ => {}
    }

    match app.view.current_screen {
        CurrentScreen::LiveTv => match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.next_category(),
            KeyCode::Up | KeyCode::Char('k') => app.previous_category(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                if let Some(category) = app.highlighted_category().cloned() {
                    app.select_category(category);
                }
            }
            _ => {}
        },
        CurrentScreen::CategoryDetail => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.move_channel_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => app.move_channel_cursor(0, 1),
            KeyCode::Left | KeyCode::Char('h') => app.move_channel_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => app.move_channel_cursor(1, 0),
            KeyCode::Char('f') => {
                if let Some(id) = app.highlighted_channel().map(|c| c.id.clone()) {
                    app.toggle_favorite(&id);
                }
            }
            KeyCode::Enter => {
                if let Some(channel) = app.highlighted_channel().cloned() {
                    app.select_channel(channel);
                    start_playback(app, ctx.player, ctx.tx);
                }
            }
            _ => {}
        },
        CurrentScreen::LiveEvent => match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.next_match(),
            KeyCode::Up | KeyCode::Char('k') => app.previous_match(),
            KeyCode::Enter => play_highlighted_match(app, ctx),
            _ => {}
        },
        CurrentScreen::ChannelPlayer => {}
    }

    Ok(InputResult::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app() -> App {
        let mut app = App::default();
        app.install_catalog(CatalogSnapshot::fallback());
        app
    }

    #[tokio::test]
    async fn test_enter_opens_highlighted_category() {
        let (tx, _rx) = mpsc::channel(8);
        let (refresh, _refresh_rx) = mpsc::channel(8);
        let player = Player::new();
        let ctx = InputContext {
            tx: &tx,
            refresh: &refresh,
            player: &player,
        };
        let mut app = loaded_app();

        handle_key_event(&mut app, press(KeyCode::Down), &ctx).await.unwrap();
        handle_key_event(&mut app, press(KeyCode::Enter), &ctx).await.unwrap();

        assert_eq!(app.view.current_screen, CurrentScreen::CategoryDetail);
        assert_eq!(app.view.selected_category.as_ref().map(|c| c.id.as_str()), Some("bein-720"));
        assert_eq!(app.current_channels().len(), 10);
    }

    #[tokio::test]
    async fn test_search_typing_filters() {
        let (tx, _rx) = mpsc::channel(8);
        let (refresh, _refresh_rx) = mpsc::channel(8);
        let player = Player::new();
        let ctx = InputContext {
            tx: &tx,
            refresh: &refresh,
            player: &player,
        };
        let mut app = loaded_app();

        handle_key_event(&mut app, press(KeyCode::Char('/')), &ctx).await.unwrap();
        for c in "news".chars() {
            handle_key_event(&mut app, press(KeyCode::Char(c)), &ctx).await.unwrap();
        }
        assert_eq!(app.search_term(), "news");
        assert_eq!(app.current_channels().len(), 1);

        // 'q' is text while searching
        let res = handle_key_event(&mut app, press(KeyCode::Char('q')), &ctx).await.unwrap();
        assert_eq!(res, InputResult::Continue);
        handle_key_event(&mut app, press(KeyCode::Backspace), &ctx).await.unwrap();
        assert_eq!(app.search_term(), "news");
    }

    #[tokio::test]
    async fn test_manual_refresh_queues_trigger() {
        let (tx, _rx) = mpsc::channel(8);
        let (refresh, mut refresh_rx) = mpsc::channel(8);
        let player = Player::new();
        let ctx = InputContext {
            tx: &tx,
            refresh: &refresh,
            player: &player,
        };
        let mut app = loaded_app();

        handle_key_event(&mut app, press(KeyCode::Char('r')), &ctx).await.unwrap();
        assert_eq!(refresh_rx.try_recv().ok(), Some(RefreshTrigger::Manual));
    }

    #[tokio::test]
    async fn test_release_events_ignored() {
        let (tx, _rx) = mpsc::channel(8);
        let (refresh, _refresh_rx) = mpsc::channel(8);
        let player = Player::new();
        let ctx = InputContext {
            tx: &tx,
            refresh: &refresh,
            player: &player,
        };
        let mut app = loaded_app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(&mut app, key, &ctx).await.unwrap(), InputResult::Continue);
    }

    #[tokio::test]
    async fn test_enter_while_searching_events_plays_fixture() {
        let (tx, _rx) = mpsc::channel(8);
        let (refresh, _refresh_rx) = mpsc::channel(8);
        let player = Player::new();
        let ctx = InputContext {
            tx: &tx,
            refresh: &refresh,
            player: &player,
        };
        let mut app = loaded_app();
        let hd = app.catalog.categories.iter().find(|c| c.id == "bein-720").cloned().unwrap();
        app.select_category(hd);
        app.go_events();

        handle_key_event(&mut app, press(KeyCode::Char('/')), &ctx).await.unwrap();
        assert!(app.view.search_mode);
        handle_key_event(&mut app, press(KeyCode::Down), &ctx).await.unwrap();
        assert_eq!(app.highlighted_match().map(|m| m.id.as_str()), Some("m1"));
        handle_key_event(&mut app, press(KeyCode::Enter), &ctx).await.unwrap();

        assert_eq!(app.view.current_screen, CurrentScreen::ChannelPlayer);
        assert_eq!(app.view.selected_channel.as_ref().map(|c| c.id.as_str()), Some("match-m1"));
        assert!(!player.is_running());
    }

    #[tokio::test]
    async fn test_ctrl_f_favorites_search_result() {
        let (tx, _rx) = mpsc::channel(8);
        let (refresh, _refresh_rx) = mpsc::channel(8);
        let player = Player::new();
        let ctx = InputContext {
            tx: &tx,
            refresh: &refresh,
            player: &player,
        };
        let mut app = loaded_app();

        handle_key_event(&mut app, press(KeyCode::Char('/')), &ctx).await.unwrap();
        for c in "news".chars() {
            handle_key_event(&mut app, press(KeyCode::Char(c)), &ctx).await.unwrap();
        }
        let ctrl_f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        handle_key_event(&mut app, ctrl_f, &ctx).await.unwrap();
        assert!(app.is_favorite("bn-news"));
        assert_eq!(app.search_term(), "news");

        handle_key_event(&mut app, ctrl_f, &ctx).await.unwrap();
        assert!(!app.is_favorite("bn-news"));
    }
}
