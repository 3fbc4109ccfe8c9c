use crate::api::is_playable;

/// Signals reported by the media player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Stalled or refilling its cache
    Waiting,
    /// Frames are being presented
    Playing,
    /// Enough data is loaded to start
    CanPlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    NoSignal,
    Loading,
    Playing,
}

/// Per-mount view of the player surface.
///
/// Buffering is read from player events only; nothing here guesses.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSurface {
    url: Option<String>,
    state: PlaybackState,
}

impl VideoSurface {
    pub fn mount(url: Option<&str>) -> Self {
        if is_playable(url) {
            Self {
                url: url.map(str::to_string),
                state: PlaybackState::Loading,
            }
        } else {
            Self {
                url: None,
                state: PlaybackState::NoSignal,
            }
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn has_signal(&self) -> bool {
        self.state != PlaybackState::NoSignal
    }

    pub fn is_buffering(&self) -> bool {
        self.state == PlaybackState::Loading
    }

    pub fn on_media_event(&mut self, event: MediaEvent) {
        self.state = match (self.state, event) {
            (PlaybackState::NoSignal, _) => PlaybackState::NoSignal,
            (_, MediaEvent::Waiting) => PlaybackState::Loading,
            (_, MediaEvent::Playing) | (_, MediaEvent::CanPlay) => PlaybackState::Playing,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_no_signal() {
        for url in [None, Some(""), Some("#")] {
            let surface = VideoSurface::mount(url);
            assert_eq!(surface.state(), PlaybackState::NoSignal);
            assert!(!surface.is_buffering());
            assert_eq!(surface.url(), None);
        }
    }

    #[test]
    fn test_starts_buffering_then_plays() {
        let mut surface = VideoSurface::mount(Some("https://cdn.example/a.m3u8"));
        assert!(surface.is_buffering());

        surface.on_media_event(MediaEvent::CanPlay);
        assert_eq!(surface.state(), PlaybackState::Playing);

        surface.on_media_event(MediaEvent::Waiting);
        assert!(surface.is_buffering());

        surface.on_media_event(MediaEvent::Playing);
        assert!(!surface.is_buffering());
    }

    #[test]
    fn test_no_signal_ignores_events() {
        let mut surface = VideoSurface::mount(Some("#"));
        surface.on_media_event(MediaEvent::Playing);
        assert_eq!(surface.state(), PlaybackState::NoSignal);
    }
}
