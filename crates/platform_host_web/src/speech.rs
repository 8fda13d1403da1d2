//! Companion voice backed by pre-rendered clips or `speechSynthesis`.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;

use platform_host::{SpeechFuture, SpeechService};

#[derive(Debug, Default)]
/// Browser speech service. Holds the clip currently playing so it can be stopped.
pub struct WebSpeechService {
    #[cfg(target_arch = "wasm32")]
    current: RefCell<Option<web_sys::HtmlAudioElement>>,
}

impl SpeechService for WebSpeechService {
    fn speak<'a>(
        &'a self,
        text: &'a str,
        audio: Option<&'a str>,
    ) -> SpeechFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                self.stop();
                match audio {
                    Some(source) => self.play_clip(source).await,
                    None => synthesize(text),
                }
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (text, audio);
                Ok(())
            }
        })
    }

    fn stop(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(clip) = self.current.borrow_mut().take() {
                let _ = clip.pause();
                clip.set_current_time(0.0);
            }
            if let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) {
                synth.cancel();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl WebSpeechService {
    async fn play_clip(&self, source: &str) -> Result<(), String> {
        use wasm_bindgen_futures::JsFuture;

        let clip = web_sys::HtmlAudioElement::new_with_src(source)
            .map_err(|e| format!("speech clip creation failed: {e:?}"))?;
        let promise = clip
            .play()
            .map_err(|e| format!("speech clip play failed: {e:?}"))?;
        self.current.replace(Some(clip));
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| format!("speech clip rejected for {source}: {e:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
fn synthesize(text: &str) -> Result<(), String> {
    let synth = web_sys::window()
        .ok_or_else(|| "window unavailable".to_string())?
        .speech_synthesis()
        .map_err(|e| format!("speechSynthesis unavailable: {e:?}"))?;
    let utterance = web_sys::SpeechSynthesisUtterance::new_with_text(text)
        .map_err(|e| format!("utterance creation failed: {e:?}"))?;
    utterance.set_rate(1.1);
    synth.speak(&utterance);
    Ok(())
}
