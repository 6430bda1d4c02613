//! Play/pause state for the optional love song.
//!
//! Starting playback is the only fallible thing on the page: the asset may be
//! missing or the browser may refuse autoplay. A failure flips `error` on (the
//! page then shows the hint) and leaves `playing` alone; nothing retries.

use std::fmt;

use wasm_bindgen::JsValue;

/// Where the page expects the song to live.
pub const SONG_PATH: &str = "love-song.mp3";

/// Text of the hint shown while the song cannot be played.
pub fn missing_song_hint() -> String {
    format!("Add your song as {SONG_PATH} to enable playback.")
}

/// What the caller has to do with the media element after a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SongCommand {
    Pause,
    Play,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackError {
    /// `play()` threw synchronously (element detached, bad state).
    Rejected(String),
    /// The play promise rejected (missing asset, autoplay policy).
    Failed(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Rejected(msg) => write!(f, "play() rejected: {msg}"),
            PlaybackError::Failed(msg) => write!(f, "playback failed: {msg}"),
        }
    }
}

impl std::error::Error for PlaybackError {}

impl PlaybackError {
    pub fn from_js(value: &JsValue, sync: bool) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        if sync {
            PlaybackError::Rejected(msg)
        } else {
            PlaybackError::Failed(msg)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongToggle {
    playing: bool,
    error: bool,
}

impl SongToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Set after a failed start; keeps the hint visible.
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Button pressed. Pausing is immediate; playing has to wait for
    /// [`SongToggle::play_finished`].
    pub fn toggle(&mut self) -> SongCommand {
        if self.playing {
            self.playing = false;
            SongCommand::Pause
        } else {
            SongCommand::Play
        }
    }

    pub fn play_finished(&mut self, result: Result<(), PlaybackError>) {
        match result {
            Ok(()) => {
                self.playing = true;
                self.error = false;
            }
            Err(_) => self.error = true,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.playing { "Pause our song" } else { "Play our song" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_sets_error_and_keeps_state() {
        let mut song = SongToggle::new();
        assert_eq!(song.toggle(), SongCommand::Play);
        song.play_finished(Err(PlaybackError::Failed("NotSupportedError".into())));
        assert!(song.has_error());
        assert!(!song.is_playing());
        assert_eq!(song.label(), "Play our song");
    }

    #[test]
    fn test_play_then_pause() {
        let mut song = SongToggle::new();
        song.toggle();
        song.play_finished(Ok(()));
        assert!(song.is_playing());
        assert_eq!(song.label(), "Pause our song");
        assert_eq!(song.toggle(), SongCommand::Pause);
        assert!(!song.is_playing());
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut song = SongToggle::new();
        song.play_finished(Err(PlaybackError::Rejected("x".into())));
        song.play_finished(Ok(()));
        assert!(!song.has_error());
    }

    #[test]
    fn test_hint_names_song_path() {
        assert!(missing_song_hint().contains(SONG_PATH));
    }

    #[test]
    fn test_error_display() {
        let e = PlaybackError::Failed("NotAllowedError".into());
        assert_eq!(e.to_string(), "playback failed: NotAllowedError");
    }
}
