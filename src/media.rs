use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playback rejected by host: {0}")]
    Rejected(String),
}

/// Minimal control surface of a video/audio element.
pub trait MediaElement {
    fn rewind(&self);
    /// Starts playback. Hosts may refuse (autoplay policy).
    fn play(&self) -> Result<(), PlaybackError>;
    fn pause(&self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateAction {
    Started,
    /// Autoplay was refused; nothing is retried.
    StartRejected(PlaybackError),
    Paused,
    PausedAtEnd,
}

/// Plays media while its container is in view and pauses it otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MediaGate {
    in_view: bool,
}

impl MediaGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Reacts to a re-entrant visibility signal. Repeated values are ignored.
    pub fn on_visibility<M: MediaElement>(&mut self, media: &M, in_view: bool) -> Option<GateAction> {
        if in_view == self.in_view {
            return None;
        }
        self.in_view = in_view;

        if in_view {
            media.rewind();
            match media.play() {
                Ok(()) => Some(GateAction::Started),
                Err(error) => Some(GateAction::StartRejected(error)),
            }
        } else {
            media.pause();
            Some(GateAction::Paused)
        }
    }

    /// Natural end of media: stay paused on the last frame.
    pub fn on_ended<M: MediaElement>(&self, media: &M) -> GateAction {
        media.pause();
        GateAction::PausedAtEnd
    }
}
