//! Command prompt mini-app: a tiny line interpreter with window and crash side effects.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{escape_html, AppCommand, AppContext, AppHost, AppInput, WindowId};

/// Prompt shown before every echoed command line.
pub const PROMPT: &str = r"C:\Documents and Settings\User>";
const MAX_TRANSCRIPT_ENTRIES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TranscriptEntry {
    System(String),
    Prompt(String),
    Output(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command<'a> {
    Empty,
    Help,
    Dir,
    Cls,
    Exit,
    Whoami,
    Start(Option<&'a str>),
    Snake,
    Destructive,
    Unknown,
}

fn parse_command(lowered: &str) -> Command<'_> {
    let mut args = lowered.split_whitespace();
    match args.next() {
        None => Command::Empty,
        Some("help") => Command::Help,
        Some("dir") => Command::Dir,
        Some("cls") => Command::Cls,
        Some("exit") => Command::Exit,
        Some("whoami") => Command::Whoami,
        Some("start") => Command::Start(args.next()),
        Some("snake") => Command::Snake,
        Some("del" | "rd" | "format") => Command::Destructive,
        Some(_) => Command::Unknown,
    }
}

fn targets_system(lowered: &str) -> bool {
    ["system32", "/s", "c:"]
        .iter()
        .any(|needle| lowered.contains(needle))
}

fn banner() -> Vec<TranscriptEntry> {
    vec![
        TranscriptEntry::System("Microsoft Windows XP [Version 5.1.2600]".to_string()),
        TranscriptEntry::System("(C) Copyright 1985-2001 Microsoft Corp.".to_string()),
    ]
}

/// Command prompt window host.
#[derive(Debug)]
pub struct CommandPromptApp {
    transcript: Vec<TranscriptEntry>,
    launchable: Vec<String>,
}

impl CommandPromptApp {
    /// Creates a prompt that can `start` any of `launchable` catalog ids.
    pub fn new(launchable: impl IntoIterator<Item = String>) -> Self {
        Self {
            transcript: banner(),
            launchable: launchable.into_iter().collect(),
        }
    }

    /// Visible transcript lines, prompts included.
    pub fn lines(&self) -> Vec<String> {
        self.transcript.iter().map(render_entry).collect()
    }

    fn output(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry::Output(text.into()));
    }

    fn run(&mut self, raw: &str, ctx: &mut AppContext) {
        let line = raw.trim();
        self.transcript.push(TranscriptEntry::Prompt(line.to_string()));
        let lowered = line.to_lowercase();

        match parse_command(&lowered) {
            Command::Empty => {}
            Command::Help => {
                self.output("Available commands:");
                self.output("HELP, DIR, CLS, EXIT, WHOAMI, START [app]");
            }
            Command::Dir => {
                for text in [
                    " Volume in drive C has no label.",
                    r" Directory of C:\Documents and Settings\User",
                    "01/01/2001  <DIR>          .",
                    "01/01/2001  <DIR>          ..",
                    "15/05/2023  <DIR>          My Documents",
                    "10/10/2023           1,337 resume.txt",
                    "               1 File(s)          1,337 bytes",
                ] {
                    self.output(text);
                }
            }
            Command::Cls => self.transcript.clear(),
            Command::Exit => ctx.send(AppCommand::CloseSelf),
            Command::Whoami => self.output(r"user\admin"),
            Command::Start(Some(target)) if self.launchable.iter().any(|id| id == target) => {
                self.output(format!("Starting {target}..."));
                ctx.send(AppCommand::OpenWindow {
                    window_id: WindowId::trusted(target),
                });
            }
            Command::Start(_) => self.output("Usage: start [app name]"),
            Command::Snake => {
                self.output("Launching Snake Easter Egg...");
                ctx.open_window("snake");
            }
            Command::Destructive if targets_system(&lowered) => ctx.send(AppCommand::TriggerCrash),
            Command::Destructive => self.output("Access is denied."),
            Command::Unknown => self.output(format!(
                "'{line}' is not recognized as an internal or external command, operable program or batch file."
            )),
        }

        if self.transcript.len() > MAX_TRANSCRIPT_ENTRIES {
            let overflow = self.transcript.len() - MAX_TRANSCRIPT_ENTRIES;
            self.transcript.drain(0..overflow);
        }
    }
}

fn render_entry(entry: &TranscriptEntry) -> String {
    match entry {
        TranscriptEntry::System(text) | TranscriptEntry::Output(text) => text.clone(),
        TranscriptEntry::Prompt(command) => format!("{PROMPT} {command}"),
    }
}

impl AppHost for CommandPromptApp {
    fn mount(&mut self, _ctx: &mut AppContext) {}

    fn handle_input(&mut self, input: AppInput, ctx: &mut AppContext) {
        if let AppInput::Text(line) = input {
            self.run(&line, ctx);
        }
    }

    fn render(&self) -> String {
        let mut html = String::from(r#"<div class="cmd-container"><div class="cmd-output">"#);
        for entry in &self.transcript {
            html.push_str("<p>");
            html.push_str(&escape_html(&render_entry(entry)));
            html.push_str("</p>");
        }
        html.push_str(&format!(
            r#"</div><div class="cmd-line"><span>{}</span><input type="text" data-app-submit autocomplete="off" spellcheck="false"></div></div>"#,
            escape_html(PROMPT)
        ));
        html
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn prompt() -> CommandPromptApp {
        CommandPromptApp::new(["notepad-enhanced".to_string(), "snake".to_string()])
    }

    fn run(app: &mut CommandPromptApp, line: &str) -> Vec<AppCommand> {
        let mut ctx = AppContext::new(WindowId::trusted("cmd"));
        app.handle_input(AppInput::Text(line.to_string()), &mut ctx);
        ctx.into_commands()
    }

    #[test]
    fn commands_echo_with_prompt() {
        let mut app = prompt();
        run(&mut app, "  whoami ");
        let lines = app.lines();
        assert_eq!(
            &lines[lines.len() - 2..],
            &[format!("{PROMPT} whoami"), r"user\admin".to_string()]
        );
    }

    #[test]
    fn empty_input_only_echoes_prompt() {
        let mut app = prompt();
        let before = app.lines().len();
        assert!(run(&mut app, "   ").is_empty());
        assert_eq!(app.lines().len(), before + 1);
    }

    #[test]
    fn start_opens_known_ids_and_explains_usage_otherwise() {
        let mut app = prompt();
        assert_eq!(
            run(&mut app, "START Notepad-Enhanced"),
            vec![AppCommand::OpenWindow {
                window_id: WindowId::trusted("notepad-enhanced")
            }]
        );
        assert!(run(&mut app, "start minesweeper").is_empty());
        assert_eq!(app.lines().last().map(String::as_str), Some("Usage: start [app name]"));
        assert!(run(&mut app, "start").is_empty());
    }

    #[test]
    fn snake_command_opens_snake() {
        let mut app = prompt();
        assert_eq!(
            run(&mut app, "snake"),
            vec![AppCommand::OpenWindow {
                window_id: WindowId::trusted("snake")
            }]
        );
    }

    #[test]
    fn destructive_commands_crash_only_on_system_targets() {
        let mut app = prompt();
        assert_eq!(run(&mut app, "del C:\\boot.ini"), vec![AppCommand::TriggerCrash]);
        assert_eq!(run(&mut app, "rd /s temp"), vec![AppCommand::TriggerCrash]);
        assert_eq!(run(&mut app, "format system32"), vec![AppCommand::TriggerCrash]);
        assert!(run(&mut app, "del notes.txt").is_empty());
        assert_eq!(app.lines().last().map(String::as_str), Some("Access is denied."));
    }

    #[test]
    fn exit_closes_own_window_and_cls_clears() {
        let mut app = prompt();
        assert_eq!(run(&mut app, "exit"), vec![AppCommand::CloseSelf]);
        run(&mut app, "cls");
        assert!(app.lines().is_empty());
    }

    #[test]
    fn unknown_command_is_reported_verbatim() {
        let mut app = prompt();
        run(&mut app, "Foo Bar");
        assert!(app
            .lines()
            .last()
            .is_some_and(|line| line.starts_with("'Foo Bar' is not recognized")));
    }

    #[test]
    fn transcript_is_bounded() {
        let mut app = prompt();
        for _ in 0..150 {
            run(&mut app, "whoami");
        }
        assert_eq!(app.lines().len(), MAX_TRANSCRIPT_ENTRIES);
    }

    #[test]
    fn render_escapes_echoed_input() {
        let mut app = prompt();
        run(&mut app, "<b>");
        assert!(app.render().contains("&lt;b&gt;"));
    }
}
