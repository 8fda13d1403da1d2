//! Sound cue catalog and playback service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`SoundService`].
pub type SoundFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

const CLICK_FALLBACK_SOURCE: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/ion-sound/3.0.7/sounds/button_tiny.mp3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// UI sound cues emitted by the desktop.
pub enum SoundCue {
    /// Generic pointer click.
    Click,
    /// A window was opened.
    WindowOpen,
    /// A window was closed.
    WindowClose,
    /// Modem handshake played when the browser window opens.
    DialUp,
    /// Startup chime.
    Boot,
}

impl SoundCue {
    /// Stable token for logs and CSS hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::WindowOpen => "window-open",
            Self::WindowClose => "window-close",
            Self::DialUp => "dial-up",
            Self::Boot => "boot",
        }
    }

    /// Preferred bundled source.
    pub const fn source(self) -> &'static str {
        match self {
            Self::Click => "sounds/click.mp3",
            Self::WindowOpen => "sounds/window-open.mp3",
            Self::WindowClose => "sounds/window-close.mp3",
            Self::DialUp => "sounds/dial-up.mp3",
            Self::Boot => "sounds/startup.mp3",
        }
    }

    /// Alternate source tried once when the preferred one fails.
    pub const fn fallback_source(self) -> Option<&'static str> {
        match self {
            Self::Click | Self::WindowOpen | Self::WindowClose => Some(CLICK_FALLBACK_SOURCE),
            Self::DialUp | Self::Boot => None,
        }
    }

    /// Playback volume in `0.0..=1.0`.
    pub const fn volume(self) -> f64 {
        match self {
            Self::DialUp => 0.3,
            _ => 0.4,
        }
    }
}

/// Host service playing short audio clips.
pub trait SoundService {
    /// Plays `source` at `volume`; resolves once playback started or failed.
    fn play<'a>(&'a self, source: &'a str, volume: f64) -> SoundFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Silent sound service for unsupported targets.
pub struct NoopSoundService;

impl SoundService for NoopSoundService {
    fn play<'a>(&'a self, _source: &'a str, _volume: f64) -> SoundFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Recording sound service; sources listed in `failing` reject playback.
pub struct MemorySoundService {
    played: Rc<RefCell<Vec<String>>>,
    failing: Rc<RefCell<Vec<String>>>,
}

impl MemorySoundService {
    /// Makes every future `play(source)` call fail.
    pub fn fail_source(&self, source: &str) {
        self.failing.borrow_mut().push(source.to_string());
    }

    /// Sources successfully played so far.
    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }
}

impl SoundService for MemorySoundService {
    fn play<'a>(&'a self, source: &'a str, _volume: f64) -> SoundFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if self.failing.borrow().iter().any(|s| s == source) {
                return Err(format!("playback rejected for {source}"));
            }
            self.played.borrow_mut().push(source.to_string());
            Ok(())
        })
    }
}
