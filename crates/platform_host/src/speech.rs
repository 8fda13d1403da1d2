//! Companion speech service contracts.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    pin::Pin,
    rc::Rc,
};

/// Object-safe boxed future used by [`SpeechService`].
pub type SpeechFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service voicing companion remarks.
pub trait SpeechService {
    /// Plays a pre-rendered clip when `audio` is given, otherwise synthesizes `text`.
    fn speak<'a>(
        &'a self,
        text: &'a str,
        audio: Option<&'a str>,
    ) -> SpeechFuture<'a, Result<(), String>>;

    /// Stops any remark currently playing.
    fn stop(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// Silent speech service.
pub struct NoopSpeechService;

impl SpeechService for NoopSpeechService {
    fn speak<'a>(
        &'a self,
        _text: &'a str,
        _audio: Option<&'a str>,
    ) -> SpeechFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn stop(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Entry recorded by [`MemorySpeechService`].
pub enum SpeechRecord {
    /// A remark was voiced.
    Spoke(String),
    /// Playback was stopped.
    Stopped,
}

#[derive(Debug, Clone, Default)]
/// Recording speech service for tests.
pub struct MemorySpeechService {
    log: Rc<RefCell<Vec<SpeechRecord>>>,
    reject_clips: Rc<Cell<bool>>,
}

impl MemorySpeechService {
    /// Makes every future call that carries a pre-rendered clip fail.
    pub fn reject_clips(&self) {
        self.reject_clips.set(true);
    }

    /// Recorded calls in order.
    pub fn log(&self) -> Vec<SpeechRecord> {
        self.log.borrow().clone()
    }
}

impl SpeechService for MemorySpeechService {
    fn speak<'a>(
        &'a self,
        text: &'a str,
        audio: Option<&'a str>,
    ) -> SpeechFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if let Some(clip) = audio.filter(|_| self.reject_clips.get()) {
                return Err(format!("clip {clip} unavailable"));
            }
            self.log
                .borrow_mut()
                .push(SpeechRecord::Spoke(text.to_string()));
            Ok(())
        })
    }

    fn stop(&self) {
        self.log.borrow_mut().push(SpeechRecord::Stopped);
    }
}
