//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Adapters wrap `window.localStorage`, `HTMLAudioElement` and `speechSynthesis`. On
//! non-wasm targets every adapter compiles to an inert stub so the workspace builds and
//! tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audio;
pub mod speech;
pub mod storage;

use std::rc::Rc;

use platform_host::HostServices;

pub use audio::WebSoundService;
pub use speech::WebSpeechService;
pub use storage::local_prefs::WebPrefsStore;

/// Builds the browser host service bundle injected into the desktop runtime.
pub fn build_host_services() -> HostServices {
    HostServices::new(
        Rc::new(WebPrefsStore),
        Rc::new(WebSoundService),
        Rc::new(WebSpeechService::default()),
    )
}
