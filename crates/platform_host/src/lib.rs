//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services: durable preference storage
//! (which holds the single persisted note), UI sound playback, and companion speech. Concrete
//! browser adapters live in `platform_host_web`; in-memory adapters here back tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audio;
pub mod host;
pub mod speech;
pub mod storage;
pub mod time;

pub use audio::{MemorySoundService, NoopSoundService, SoundCue, SoundFuture, SoundService};
pub use host::HostServices;
pub use speech::{
    MemorySpeechService, NoopSpeechService, SpeechFuture, SpeechRecord, SpeechService,
};
pub use storage::prefs::{
    load_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
    PrefsStoreFuture, DESKTOP_CONFIG_KEY, NOTE_STORAGE_KEY,
};
pub use time::{clock_time_label, unix_time_ms_now};
