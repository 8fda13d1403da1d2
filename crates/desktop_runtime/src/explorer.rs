//! "My Computer" browser over a small fixed folder tree.

use desktop_app_contract::{escape_html, AppContext, AppHost, AppInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Folder(&'static str, &'static str),
    Window(&'static str, &'static str),
    File(&'static str),
}

const ROOT: &str = "root";

fn folder(id: &str) -> Option<&'static [Entry]> {
    const ROOT_ENTRIES: &[Entry] = &[
        Entry::Folder("documents", "My Documents"),
        Entry::Folder("pictures", "My Pictures"),
        Entry::Folder("music", "My Music"),
        Entry::Window("recycle-bin", "Recycle Bin"),
    ];
    const DOCUMENTS: &[Entry] = &[
        Entry::File("Resume.txt"),
        Entry::File("Cover Letter.doc"),
        Entry::Window("notepad-enhanced", "Notes"),
        Entry::Folder("projects", "Projects"),
    ];
    const PICTURES: &[Entry] = &[
        Entry::File("Me-pixel.jpeg"),
        Entry::File("Me-pixel-smile.jpeg"),
        Entry::File("sitting-me.jpeg"),
    ];
    const MUSIC: &[Entry] = &[Entry::File("Bass.mp3"), Entry::File("Chill Mix.mp3")];

    match id {
        ROOT => Some(ROOT_ENTRIES),
        "documents" => Some(DOCUMENTS),
        "pictures" => Some(PICTURES),
        "music" => Some(MUSIC),
        "projects" => Some(&[]),
        _ => None,
    }
}

fn path_label(id: &str) -> String {
    if id == ROOT {
        return "C:\\".to_string();
    }
    let mut chars = id.chars();
    let head = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
    format!("C:\\{head}{}", chars.as_str())
}

/// Folder browser whose window entries open through the desktop's `open_by_id` path.
#[derive(Debug)]
pub struct ExplorerApp {
    folder: &'static str,
    status: String,
}

impl Default for ExplorerApp {
    fn default() -> Self {
        Self {
            folder: ROOT,
            status: String::new(),
        }
    }
}

impl ExplorerApp {
    /// Creates a browser showing `C:\`.
    pub fn new() -> Self {
        Self::default()
    }

    fn navigate(&mut self, target: &str) {
        let found = [ROOT, "documents", "pictures", "music", "projects"]
            .into_iter()
            .find(|id| *id == target);
        if let Some(id) = found {
            self.folder = id;
            self.status.clear();
        }
    }
}

impl AppHost for ExplorerApp {
    fn mount(&mut self, _ctx: &mut AppContext) {}

    fn handle_input(&mut self, input: AppInput, ctx: &mut AppContext) {
        let AppInput::Button(button) = input else {
            return;
        };
        match button.split_once(':') {
            Some(("folder", id)) => self.navigate(id),
            Some(("open", id)) => ctx.open_window(id),
            Some(("file", name)) => self.status = format!("Opening {name}..."),
            _ if button == "back" => self.navigate(ROOT),
            _ => {}
        }
    }

    fn render(&self) -> String {
        let entries = folder(self.folder).unwrap_or_default();
        let mut html = format!(
            r#"<div class="xp-explorer"><div class="explorer-toolbar"><button data-app-button="back">← Back</button><span class="explorer-path">{}</span></div><div class="explorer-grid">"#,
            escape_html(&path_label(self.folder))
        );
        if entries.is_empty() {
            html.push_str(r#"<p class="explorer-empty">This folder is empty.</p>"#);
        }
        for entry in entries {
            let (action, kind, name) = match *entry {
                Entry::Folder(id, name) => (format!("folder:{id}"), "folder", name),
                Entry::Window(id, name) => (format!("open:{id}"), "shortcut", name),
                Entry::File(name) => (format!("file:{name}"), "file", name),
            };
            html.push_str(&format!(
                r#"<div class="explorer-item {kind}" data-app-button="{}"><span>{}</span></div>"#,
                escape_html(&action),
                escape_html(name)
            ));
        }
        html.push_str(&format!(
            r#"</div><div class="explorer-status">{}</div></div>"#,
            escape_html(&self.status)
        ));
        html
    }
}
