//! Explicit runtime effect-queue executor for reducer-emitted side effects.
//!
//! Host effects (sound, speech, note storage) run asynchronously against [`HostServices`].
//! Shell effects (timers, exit animations, input focus) run against the browser directly.

use desktop_app_contract::AppInput;
use leptos::*;
use platform_host::{HostServices, SoundCue, NOTE_STORAGE_KEY};

use crate::reducer::{DesktopAction, RuntimeEffect};
use crate::runtime_context::DesktopRuntimeContext;

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the queue before processing so nested dispatches enqueue a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            if effect.is_host_effect() {
                let host = runtime.host.get_value();
                spawn_local(async move {
                    for follow_up in run_host_effect(&host, effect).await {
                        runtime.dispatch_action(follow_up);
                    }
                });
            } else {
                crate::host::run_shell_effect(runtime, effect);
            }
        }
    });
}

/// Runs one host effect and returns follow-up actions (for example, a loaded note).
///
/// Failures are logged and never propagate: sounds and speech get one fallback attempt.
pub async fn run_host_effect(host: &HostServices, effect: RuntimeEffect) -> Vec<DesktopAction> {
    match effect {
        RuntimeEffect::PlaySound(cue) => {
            play_cue(host, cue).await;
            Vec::new()
        }
        RuntimeEffect::CompanionSpeak { text, audio } => {
            speak(host, &text, audio.as_deref()).await;
            Vec::new()
        }
        RuntimeEffect::StopCompanionAudio => {
            host.speech.stop();
            Vec::new()
        }
        RuntimeEffect::PersistNote(text) => {
            if let Err(err) = host.prefs.save_pref(NOTE_STORAGE_KEY, &text).await {
                logging::warn!("note save failed: {err}");
            }
            Vec::new()
        }
        RuntimeEffect::LoadNote(window_id) => {
            let note = host
                .prefs
                .load_pref(NOTE_STORAGE_KEY)
                .await
                .unwrap_or_else(|err| {
                    logging::warn!("note load failed: {err}");
                    None
                });
            vec![DesktopAction::AppInput {
                window_id,
                input: AppInput::NoteLoaded(note),
            }]
        }
        RuntimeEffect::DeleteNote => {
            if let Err(err) = host.prefs.delete_pref(NOTE_STORAGE_KEY).await {
                logging::warn!("note delete failed: {err}");
            }
            Vec::new()
        }
        RuntimeEffect::StartAppTimer { .. }
        | RuntimeEffect::StopAppTimer(_)
        | RuntimeEffect::FinishCloseAfter { .. }
        | RuntimeEffect::FocusWindowInput(_) => Vec::new(),
    }
}

async fn play_cue(host: &HostServices, cue: SoundCue) {
    let Err(err) = host.sound.play(cue.source(), cue.volume()).await else {
        return;
    };
    let Some(fallback) = cue.fallback_source() else {
        logging::warn!("sound `{}` failed: {err}", cue.token());
        return;
    };
    if let Err(err) = host.sound.play(fallback, cue.volume()).await {
        logging::warn!("sound `{}` failed after fallback: {err}", cue.token());
    }
}

async fn speak(host: &HostServices, text: &str, audio: Option<&str>) {
    let Err(err) = host.speech.speak(text, audio).await else {
        return;
    };
    if audio.is_none() {
        logging::warn!("companion speech failed: {err}");
        return;
    }
    if let Err(err) = host.speech.speak(text, None).await {
        logging::warn!("companion speech failed after synthesis fallback: {err}");
    }
}
