//! Host service bundle injected into the desktop runtime by the entry layer.

use std::rc::Rc;

use crate::{
    NoopPrefsStore, NoopSoundService, NoopSpeechService, PrefsStore, SoundService, SpeechService,
};

#[derive(Clone)]
/// Services the desktop effect executor runs side effects against.
pub struct HostServices {
    /// Durable preference storage (holds the note).
    pub prefs: Rc<dyn PrefsStore>,
    /// UI sound playback.
    pub sound: Rc<dyn SoundService>,
    /// Companion voice.
    pub speech: Rc<dyn SpeechService>,
}

impl HostServices {
    /// Bundles concrete services.
    pub fn new(
        prefs: Rc<dyn PrefsStore>,
        sound: Rc<dyn SoundService>,
        speech: Rc<dyn SpeechService>,
    ) -> Self {
        Self {
            prefs,
            sound,
            speech,
        }
    }

    /// Services that accept every call and do nothing.
    pub fn noop() -> Self {
        Self::new(
            Rc::new(NoopPrefsStore),
            Rc::new(NoopSoundService),
            Rc::new(NoopSpeechService),
        )
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices").finish_non_exhaustive()
    }
}
