//! Notepad mini-app bound to the single durable note.
//!
//! The host never touches storage itself. It asks the runtime to load the note on mount and
//! persists through [`AppCommand::PersistNote`] on every edit; the runtime answers loads with
//! [`AppInput::NoteLoaded`].
//!
//! The markup never changes; the editor text and status line are [`BoundText`] values, so an edit
//! does not rebuild the field being typed into.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{AppCommand, AppContext, AppHost, AppInput, BoundText};
use platform_host::{clock_time_label, unix_time_ms_now};

const READY_STATUS: &str = "Ready | Autosave enabled";
const SAVE_REMARK: &str = "Your note has been saved! I'll remember it for you.";
const SAVE_REMARK_AUDIO: &str = "sounds/companion/notepad_save.mp3";
const MARKUP: &str = concat!(
    r#"<div class="notepad-enhanced"><div class="notepad-toolbar">"#,
    r#"<button data-app-button="save">💾 Save</button>"#,
    r#"<button data-app-button="load">📂 Load</button>"#,
    r#"<button data-app-button="clear">🗑️ Clear</button></div>"#,
    r#"<textarea class="notepad-textarea" data-app-text data-app-bind="text" placeholder="Start typing your notes here..."></textarea>"#,
    r#"<div class="notepad-status" data-app-bind="status"></div></div>"#
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingLoad {
    Mount,
    Manual,
}

/// Notepad window host.
#[derive(Debug)]
pub struct NotepadApp {
    text: String,
    status: String,
    pending_load: Option<PendingLoad>,
    clock: fn() -> u64,
}

impl Default for NotepadApp {
    fn default() -> Self {
        Self::with_clock(unix_time_ms_now)
    }
}

impl NotepadApp {
    /// Creates an empty notepad.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notepad whose status timestamps come from `clock` (unix ms).
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            text: String::new(),
            status: READY_STATUS.to_string(),
            pending_load: None,
            clock,
        }
    }

    /// Current editor text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    fn stamped(&self, label: &str) -> String {
        format!("{label} | {}", clock_time_label((self.clock)()))
    }

    fn save(&mut self, ctx: &mut AppContext) {
        ctx.send(AppCommand::PersistNote {
            text: self.text.clone(),
        });
        self.status = self.stamped("Saved!");
        ctx.speak(SAVE_REMARK, Some(SAVE_REMARK_AUDIO));
    }

    fn request_load(&mut self, reason: PendingLoad, ctx: &mut AppContext) {
        self.pending_load = Some(reason);
        ctx.send(AppCommand::LoadNote);
    }

    fn note_loaded(&mut self, saved: Option<String>) {
        let Some(reason) = self.pending_load.take() else {
            return;
        };
        match (reason, saved) {
            (_, Some(saved)) if !saved.is_empty() => {
                if reason == PendingLoad::Manual {
                    self.status = format!("Loaded! | {} characters", saved.chars().count());
                }
                self.text = saved;
            }
            (PendingLoad::Manual, _) => self.status = "No saved notes found".to_string(),
            (PendingLoad::Mount, _) => {}
        }
    }
}

impl AppHost for NotepadApp {
    fn mount(&mut self, ctx: &mut AppContext) {
        self.request_load(PendingLoad::Mount, ctx);
    }

    fn handle_input(&mut self, input: AppInput, ctx: &mut AppContext) {
        match input {
            AppInput::Text(text) => {
                // The user's edit wins over a note still loading from mount.
                if self.pending_load == Some(PendingLoad::Mount) {
                    self.pending_load = None;
                }
                self.text = text;
                ctx.send(AppCommand::PersistNote {
                    text: self.text.clone(),
                });
                self.status = self.stamped("Autosaved");
            }
            AppInput::Button(button) => match button.as_str() {
                "save" => self.save(ctx),
                "load" => self.request_load(PendingLoad::Manual, ctx),
                "clear" => {
                    self.text.clear();
                    ctx.send(AppCommand::DeleteNote);
                    self.status = "Cleared!".to_string();
                }
                _ => {}
            },
            AppInput::Key(key) if key == "Ctrl+s" || key == "Ctrl+S" => self.save(ctx),
            AppInput::NoteLoaded(saved) => self.note_loaded(saved),
            AppInput::Key(_) | AppInput::Tick => {}
        }
    }

    fn render(&self) -> String {
        MARKUP.to_string()
    }

    fn bindings(&self) -> Vec<BoundText> {
        vec![
            BoundText::new("text", self.text.clone()),
            BoundText::new("status", self.status.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::WindowId;
    use pretty_assertions::assert_eq;

    use super::*;

    // 13:05:09 UTC
    fn fixed_clock() -> u64 {
        (13 * 3600 + 5 * 60 + 9) * 1000
    }

    fn ctx() -> AppContext {
        AppContext::new(WindowId::trusted("notepad-enhanced"))
    }

    #[test]
    fn mount_requests_note_and_fills_editor_silently() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let mut ctx = ctx();
        app.mount(&mut ctx);
        assert_eq!(ctx.commands(), &[AppCommand::LoadNote]);

        app.handle_input(AppInput::NoteLoaded(Some("buy milk".into())), &mut ctx);
        assert_eq!(app.text(), "buy milk");
        assert_eq!(app.status(), READY_STATUS);
    }

    #[test]
    fn every_edit_persists_and_stamps_autosave() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let mut ctx = ctx();
        app.handle_input(AppInput::Text("draft".into()), &mut ctx);
        assert_eq!(
            ctx.commands(),
            &[AppCommand::PersistNote {
                text: "draft".into()
            }]
        );
        assert_eq!(app.status(), "Autosaved | 13:05:09");
    }

    #[test]
    fn save_button_persists_and_asks_companion() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let mut ctx = ctx();
        app.handle_input(AppInput::Text("x".into()), &mut ctx);
        app.handle_input(AppInput::Button("save".into()), &mut ctx);
        let commands = ctx.into_commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[2], AppCommand::Speak { .. }));
        assert_eq!(app.status(), "Saved! | 13:05:09");
    }

    #[test]
    fn manual_load_reports_length_or_absence() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let mut ctx = ctx();
        app.handle_input(AppInput::Button("load".into()), &mut ctx);
        app.handle_input(AppInput::NoteLoaded(Some("héllo".into())), &mut ctx);
        assert_eq!(app.status(), "Loaded! | 5 characters");

        app.handle_input(AppInput::Button("load".into()), &mut ctx);
        app.handle_input(AppInput::NoteLoaded(None), &mut ctx);
        assert_eq!(app.status(), "No saved notes found");
        assert_eq!(app.text(), "héllo");
    }

    #[test]
    fn unsolicited_note_loaded_is_ignored() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        app.handle_input(AppInput::NoteLoaded(Some("stale".into())), &mut ctx());
        assert_eq!(app.text(), "");
    }

    #[test]
    fn clear_wipes_editor_and_storage() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let mut ctx = ctx();
        app.handle_input(AppInput::Text("bye".into()), &mut ctx);
        app.handle_input(AppInput::Button("clear".into()), &mut ctx);
        assert_eq!(ctx.commands().last(), Some(&AppCommand::DeleteNote));
        assert_eq!(app.text(), "");
        assert_eq!(app.status(), "Cleared!");
    }

    #[test]
    fn ctrl_s_saves() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let mut ctx = ctx();
        app.handle_input(AppInput::Key("Ctrl+s".into()), &mut ctx);
        assert_eq!(
            ctx.commands()[0],
            AppCommand::PersistNote {
                text: String::new()
            }
        );
    }

    #[test]
    fn edits_change_bindings_but_not_markup() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let before = app.render();
        app.handle_input(AppInput::Text("<script>".into()), &mut ctx());
        assert_eq!(app.render(), before);
        assert_eq!(
            app.bindings(),
            vec![
                BoundText::new("text", "<script>"),
                BoundText::new("status", "Autosaved | 13:05:09"),
            ]
        );
        assert!(before.contains(r#"data-app-bind="text""#));
        assert!(before.contains(r#"data-app-bind="status""#));
    }

    #[test]
    fn edit_before_mount_load_answers_keeps_the_edit() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let mut ctx = ctx();
        app.mount(&mut ctx);
        app.handle_input(AppInput::Text("typed first".into()), &mut ctx);
        app.handle_input(AppInput::NoteLoaded(Some("older note".into())), &mut ctx);
        assert_eq!(app.text(), "typed first");
        assert_eq!(app.status(), "Autosaved | 13:05:09");
    }

    #[test]
    fn edit_does_not_cancel_a_manual_load() {
        let mut app = NotepadApp::with_clock(fixed_clock);
        let mut ctx = ctx();
        app.handle_input(AppInput::Button("load".into()), &mut ctx);
        app.handle_input(AppInput::Text("x".into()), &mut ctx);
        app.handle_input(AppInput::NoteLoaded(Some("saved".into())), &mut ctx);
        assert_eq!(app.text(), "saved");
        assert_eq!(app.status(), "Loaded! | 5 characters");
    }
}
