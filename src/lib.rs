pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod playback;
pub mod player;
pub mod preferences;
pub mod realtime;
pub mod setup;
pub mod social;
pub mod state;
pub mod sync;
pub mod ui;

#[cfg(test)]
mod tests {
    use crate::app::{App, CurrentScreen};

    #[test]
    fn test_app_starts_on_live_tv() {
        let app = App::default();
        assert_eq!(app.view.current_screen, CurrentScreen::LiveTv);
        assert!(app.is_loading());
        assert!(app.view.is_playing);
    }
}
