//! Ordered lifecycle subscribers notified when windows open and close.
//!
//! Subscribers only emit [`RuntimeEffect`] intents. A failing subscriber is logged and
//! skipped; it never blocks window creation or destruction.

use desktop_app_contract::AppLifecycleEvent;
use platform_host::SoundCue;
use thiserror::Error;

use crate::model::WindowId;
use crate::reducer::RuntimeEffect;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Lifecycle notification for one window.
pub struct LifecycleNotice {
    /// Opened or closed.
    pub event: AppLifecycleEvent,
    /// Window the event concerns.
    pub window_id: WindowId,
}

impl LifecycleNotice {
    /// Builds an `opened` notice.
    pub fn opened(window_id: WindowId) -> Self {
        Self {
            event: AppLifecycleEvent::Opened,
            window_id,
        }
    }

    /// Builds a `closed` notice.
    pub fn closed(window_id: WindowId) -> Self {
        Self {
            event: AppLifecycleEvent::Closed,
            window_id,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure reported by a lifecycle subscriber.
pub enum SubscriberError {
    /// The subscriber could not handle the notice.
    #[error("{event} notice for `{window_id}` failed: {reason}")]
    Failed {
        /// Event token.
        event: &'static str,
        /// Window the notice concerned.
        window_id: WindowId,
        /// Human-readable cause.
        reason: String,
    },
}

/// Observer of window lifecycle notices.
///
/// The built-in subscribers never fail. The error path is for subscribers added through
/// [`LifecycleBus::subscribe`]: a failure is logged under [`LifecycleSubscriber::name`] and
/// the remaining subscribers still run.
pub trait LifecycleSubscriber {
    /// Name used in failure logs.
    fn name(&self) -> &'static str;

    /// Handles a notice, appending any effects it wants run.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriberError`] on failure; effects already appended are kept.
    fn notify(
        &mut self,
        notice: &LifecycleNotice,
        effects: &mut Vec<RuntimeEffect>,
    ) -> Result<(), SubscriberError>;
}

/// Subscribers registered once at startup, notified in registration order.
#[derive(Default)]
pub struct LifecycleBus {
    subscribers: Vec<Box<dyn LifecycleSubscriber>>,
}

impl std::fmt::Debug for LifecycleBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.subscribers.iter().map(|s| s.name()).collect();
        f.debug_struct("LifecycleBus")
            .field("subscribers", &names)
            .finish()
    }
}

impl LifecycleBus {
    /// Bus with the desktop's built-in subscribers: sound cues, then companion commentary.
    pub fn with_defaults() -> Self {
        let mut bus = Self::default();
        bus.subscribe(Box::new(SoundCues));
        bus.subscribe(Box::new(CompanionCommentary));
        bus
    }

    /// Appends a subscriber.
    pub fn subscribe(&mut self, subscriber: Box<dyn LifecycleSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Notifies every subscriber and returns the collected effects.
    pub fn publish(&mut self, notice: &LifecycleNotice) -> Vec<RuntimeEffect> {
        let mut effects = Vec::new();
        for subscriber in &mut self.subscribers {
            if let Err(err) = subscriber.notify(notice, &mut effects) {
                leptos::logging::warn!("lifecycle subscriber `{}`: {err}", subscriber.name());
            }
        }
        effects
    }
}

/// Window open/close sound cues; opening the browser window adds the modem handshake.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundCues;

const BROWSER_WINDOW_ID: &str = "ie";

impl LifecycleSubscriber for SoundCues {
    fn name(&self) -> &'static str {
        "sound-cues"
    }

    fn notify(
        &mut self,
        notice: &LifecycleNotice,
        effects: &mut Vec<RuntimeEffect>,
    ) -> Result<(), SubscriberError> {
        match notice.event {
            AppLifecycleEvent::Opened => {
                effects.push(RuntimeEffect::PlaySound(SoundCue::WindowOpen));
                if notice.window_id.as_str() == BROWSER_WINDOW_ID {
                    effects.push(RuntimeEffect::PlaySound(SoundCue::DialUp));
                }
            }
            AppLifecycleEvent::Closed => {
                effects.push(RuntimeEffect::PlaySound(SoundCue::WindowClose));
            }
        }
        Ok(())
    }
}

/// Companion remarks for specific windows, and silencing the companion on close.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanionCommentary;

const REMARKS: &[(&str, &str, &str)] = &[
    (
        "notepad-enhanced",
        "Writing something important? Don't forget to save!",
        "sounds/companion/notepad.mp3",
    ),
    (
        "cmd",
        "Ooh, the command prompt! You must be a power user.",
        "sounds/companion/cmd.mp3",
    ),
    (
        "ie",
        "Looking for more projects? Check the favorites sidebar!",
        "sounds/companion/ie.mp3",
    ),
    (
        "calculator",
        "Crunching numbers? Division by zero is still off limits.",
        "sounds/companion/calculator.mp3",
    ),
    (
        "snake",
        "A wild snake appeared! Use the arrow keys.",
        "sounds/companion/snake.mp3",
    ),
    (
        "paint",
        "Drawing something for the portfolio? I can help you with shapes!",
        "sounds/companion/paint.mp3",
    ),
];

/// Remark text and clip voiced when `id` opens, if it has one.
pub fn remark_for(id: &WindowId) -> Option<(&'static str, &'static str)> {
    REMARKS
        .iter()
        .find(|(key, _, _)| *key == id.as_str())
        .map(|(_, text, audio)| (*text, *audio))
}

impl LifecycleSubscriber for CompanionCommentary {
    fn name(&self) -> &'static str {
        "companion-commentary"
    }

    fn notify(
        &mut self,
        notice: &LifecycleNotice,
        effects: &mut Vec<RuntimeEffect>,
    ) -> Result<(), SubscriberError> {
        match notice.event {
            AppLifecycleEvent::Opened => {
                if let Some((text, audio)) = remark_for(&notice.window_id) {
                    effects.push(RuntimeEffect::CompanionSpeak {
                        text: text.to_string(),
                        audio: Some(audio.to_string()),
                    });
                }
            }
            AppLifecycleEvent::Closed => effects.push(RuntimeEffect::StopCompanionAudio),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Broken;

    impl LifecycleSubscriber for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn notify(
            &mut self,
            notice: &LifecycleNotice,
            effects: &mut Vec<RuntimeEffect>,
        ) -> Result<(), SubscriberError> {
            effects.push(RuntimeEffect::DeleteNote);
            Err(SubscriberError::Failed {
                event: notice.event.token(),
                window_id: notice.window_id.clone(),
                reason: "boom".to_string(),
            })
        }
    }

    #[test]
    fn opening_cmd_plays_cue_then_remark() {
        let mut bus = LifecycleBus::with_defaults();
        let effects = bus.publish(&LifecycleNotice::opened(WindowId::from("cmd")));
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PlaySound(SoundCue::WindowOpen),
                RuntimeEffect::CompanionSpeak {
                    text: "Ooh, the command prompt! You must be a power user.".to_string(),
                    audio: Some("sounds/companion/cmd.mp3".to_string()),
                },
            ]
        );
    }

    #[test]
    fn browser_window_adds_dial_up() {
        let mut bus = LifecycleBus::with_defaults();
        let effects = bus.publish(&LifecycleNotice::opened(WindowId::from("ie")));
        assert!(effects.contains(&RuntimeEffect::PlaySound(SoundCue::DialUp)));
    }

    #[test]
    fn closing_plays_cue_and_silences_companion() {
        let mut bus = LifecycleBus::with_defaults();
        let effects = bus.publish(&LifecycleNotice::closed(WindowId::from("about")));
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PlaySound(SoundCue::WindowClose),
                RuntimeEffect::StopCompanionAudio,
            ]
        );
    }

    #[test]
    fn failing_subscriber_does_not_stop_later_ones() {
        let mut bus = LifecycleBus::default();
        bus.subscribe(Box::new(Broken));
        bus.subscribe(Box::new(SoundCues));
        let effects = bus.publish(&LifecycleNotice::opened(WindowId::from("about")));
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::DeleteNote,
                RuntimeEffect::PlaySound(SoundCue::WindowOpen),
            ]
        );
        assert_eq!(format!("{bus:?}"), "LifecycleBus { subscribers: [\"broken\", \"sound-cues\"] }");
    }

    #[test]
    fn subscriber_failures_name_the_notice() {
        let mut broken = Broken;
        let mut effects = Vec::new();
        let err = broken
            .notify(&LifecycleNotice::closed(WindowId::from("paint")), &mut effects)
            .expect_err("broken subscriber fails");
        assert_eq!(err.to_string(), "closed notice for `paint` failed: boom");
        assert_eq!(effects, vec![RuntimeEffect::DeleteNote]);
    }

    #[test]
    fn windows_without_remarks_stay_quiet() {
        assert_eq!(remark_for(&WindowId::from("my-computer")), None);
        assert!(remark_for(&WindowId::from("notepad-enhanced")).is_some());
    }
}
