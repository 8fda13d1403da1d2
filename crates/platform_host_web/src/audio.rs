//! `HTMLAudioElement` sound service.

use platform_host::{SoundFuture, SoundService};

#[derive(Debug, Clone, Copy, Default)]
/// Plays sound cues through detached audio elements.
pub struct WebSoundService;

impl SoundService for WebSoundService {
    fn play<'a>(&'a self, source: &'a str, volume: f64) -> SoundFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen::JsValue;
                use wasm_bindgen_futures::JsFuture;

                let audio = web_sys::HtmlAudioElement::new_with_src(source)
                    .map_err(|err: JsValue| format!("audio element creation failed: {err:?}"))?;
                audio.set_volume(volume.clamp(0.0, 1.0));
                let promise = audio
                    .play()
                    .map_err(|err: JsValue| format!("audio play failed: {err:?}"))?;
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err: JsValue| format!("audio play rejected for {source}: {err:?}"))
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (source, volume);
                Ok(())
            }
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;
    use platform_host::{SoundCue, SoundService};

    use super::WebSoundService;

    #[test]
    fn native_stub_accepts_every_cue() {
        let cue = SoundCue::DialUp;
        assert_eq!(
            block_on(WebSoundService.play(cue.source(), cue.volume())),
            Ok(())
        );
    }
}
