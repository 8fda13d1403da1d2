//! Shared contract types between the desktop window manager runtime and the mini-apps it hosts.
//!
//! A window's body is either opaque trusted markup or a hosted mini-app implementing
//! [`AppHost`]. Hosts never reach into the manager; they receive lifecycle hooks and input,
//! and answer with [`AppCommand`] requests collected through an [`AppContext`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};

/// Stable string key for a window; one live window per id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    /// Returns a window id when `raw` conforms to the lowercase `kebab-case` policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_window_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid window id `{raw}`; expected lowercase kebab-case"
            ))
        }
    }

    /// Creates an id without validation for trusted catalog constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WindowId {
    fn from(raw: &str) -> Self {
        Self::trusted(raw)
    }
}

fn is_valid_window_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Lifecycle notifications published by the window manager.
pub enum AppLifecycleEvent {
    /// A window was created and its content mounted.
    Opened,
    /// A window was logically removed; its visual exit may still be running.
    Closed,
}

impl AppLifecycleEvent {
    /// Returns a stable string token for logging hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Input routed by the runtime to a hosted mini-app.
pub enum AppInput {
    /// Keyboard key (DOM `KeyboardEvent.key` naming).
    Key(String),
    /// Full replacement text of the app's primary text field.
    Text(String),
    /// Named button inside the app body was activated.
    Button(String),
    /// Repeating timer tick requested through [`AppCommand::StartTimer`].
    Tick,
    /// Result of an [`AppCommand::LoadNote`] request.
    NoteLoaded(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Requests a hosted app sends back to the desktop runtime.
pub enum AppCommand {
    /// Open (or focus) the window registered under `window_id`.
    OpenWindow {
        /// Catalog id to open.
        window_id: WindowId,
    },
    /// Close the window hosting this app.
    CloseSelf,
    /// Start a repeating timer delivering [`AppInput::Tick`].
    StartTimer {
        /// Tick interval in milliseconds.
        interval_ms: u32,
    },
    /// Stop this app's repeating timer.
    StopTimer,
    /// Persist the single durable note.
    PersistNote {
        /// Note text.
        text: String,
    },
    /// Request the durable note; answered with [`AppInput::NoteLoaded`].
    LoadNote,
    /// Remove the durable note.
    DeleteNote,
    /// Ask the desktop companion to say something.
    Speak {
        /// Bubble text.
        text: String,
        /// Optional pre-rendered audio path.
        audio: Option<String>,
    },
    /// Enter the simulated system-crash screen.
    TriggerCrash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Live text of a body element, updated in place by the runtime instead of re-rendered.
///
/// The element is the one whose `data-app-bind` attribute equals [`Self::name`]. Form fields get
/// their value set only when it differs, so the caret of a field being typed into is left alone.
pub struct BoundText {
    /// `data-app-bind` attribute value.
    pub name: String,
    /// Current text.
    pub value: String,
}

impl BoundText {
    /// Creates a binding.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Per-call context handed to an [`AppHost`]; collects the commands it emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    window_id: WindowId,
    commands: Vec<AppCommand>,
}

impl AppContext {
    /// Creates an empty context for the window hosting the app.
    pub fn new(window_id: WindowId) -> Self {
        Self {
            window_id,
            commands: Vec::new(),
        }
    }

    /// Window hosting the app.
    pub fn window_id(&self) -> &WindowId {
        &self.window_id
    }

    /// Queues a command for the runtime.
    pub fn send(&mut self, command: AppCommand) {
        self.commands.push(command);
    }

    /// Requests opening another window by catalog id.
    pub fn open_window(&mut self, window_id: impl Into<WindowId>) {
        self.send(AppCommand::OpenWindow {
            window_id: window_id.into(),
        });
    }

    /// Asks the companion to speak.
    pub fn speak(&mut self, text: impl Into<String>, audio: Option<&str>) {
        self.send(AppCommand::Speak {
            text: text.into(),
            audio: audio.map(str::to_string),
        });
    }

    /// Commands queued so far, in emission order.
    pub fn commands(&self) -> &[AppCommand] {
        &self.commands
    }

    /// Consumes the context, returning queued commands.
    pub fn into_commands(self) -> Vec<AppCommand> {
        self.commands
    }
}

/// Capability interface implemented by every interactive mini-app.
pub trait AppHost {
    /// Called once after the hosting window is created.
    fn mount(&mut self, ctx: &mut AppContext);

    /// Called once before the hosting window is removed, on every close path.
    fn unmount(&mut self, _ctx: &mut AppContext) {}

    /// Handles routed input.
    fn handle_input(&mut self, input: AppInput, ctx: &mut AppContext);

    /// Renders the current body markup.
    fn render(&self) -> String;

    /// Text kept live inside the rendered markup without replacing it.
    fn bindings(&self) -> Vec<BoundText> {
        Vec::new()
    }
}

/// Body of a window: trusted static markup or a hosted mini-app.
pub enum WindowContent {
    /// Opaque markup supplied by a content provider.
    Markup(String),
    /// Interactive mini-app owned by the window.
    Hosted(Box<dyn AppHost>),
}

impl WindowContent {
    /// Renders the body markup.
    pub fn render(&self) -> String {
        match self {
            Self::Markup(markup) => markup.clone(),
            Self::Hosted(host) => host.render(),
        }
    }

    /// Live bindings of a hosted app; static markup has none.
    pub fn bindings(&self) -> Vec<BoundText> {
        match self {
            Self::Markup(_) => Vec::new(),
            Self::Hosted(host) => host.bindings(),
        }
    }

    /// Returns `true` when the content is an interactive host.
    pub fn is_hosted(&self) -> bool {
        matches!(self, Self::Hosted(_))
    }
}

impl std::fmt::Debug for WindowContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markup(markup) => f.debug_tuple("Markup").field(&markup.len()).finish(),
            Self::Hosted(_) => f.write_str("Hosted(..)"),
        }
    }
}

/// Escapes user-entered text before it is embedded in app markup.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
