use tracing::{debug, warn};

use crate::app::{App, AsyncAction};

pub fn handle_async_action(app: &mut App, action: AsyncAction) {
    match action {
        AsyncAction::CatalogLoaded(snapshot) => {
            app.install_catalog(snapshot);
        }
        AsyncAction::Media(session, event) => {
            if app.on_media_event(session, event) {
                debug!("Player session {} reported {:?}", session, event);
            }
        }
        AsyncAction::PlayerFailed(reason) => {
            warn!("Playback failed: {}", reason);
        }
        AsyncAction::RealtimeStatus(connected) => {
            app.realtime_connected = connected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Channel;
    use crate::catalog::CatalogSnapshot;
    use crate::playback::{MediaEvent, PlaybackState};

    #[test]
    fn test_catalog_loaded_ends_loading() {
        let mut app = App::default();
        assert!(app.is_loading());
        handle_async_action(&mut app, AsyncAction::CatalogLoaded(CatalogSnapshot::fallback()));
        assert!(!app.is_loading());
        assert_eq!(app.catalog.categories.len(), 6);
    }

    #[test]
    fn test_media_event_for_current_session() {
        let mut app = App::default();
        app.select_channel(Channel {
            id: "c".into(),
            name: "C".into(),
            stream_url: Some("https://cdn/c.m3u8".into()),
            ..Default::default()
        });
        app.attach_player_session(4);
        handle_async_action(&mut app, AsyncAction::Media(4, MediaEvent::CanPlay));
        assert_eq!(app.surface.as_ref().map(|s| s.state()), Some(PlaybackState::Playing));
    }

    #[test]
    fn test_realtime_status_follows_socket() {
        let mut app = App::default();
        handle_async_action(&mut app, AsyncAction::RealtimeStatus(true));
        assert!(app.realtime_connected);
        handle_async_action(&mut app, AsyncAction::RealtimeStatus(false));
        assert!(!app.realtime_connected);
    }
}
