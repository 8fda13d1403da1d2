//! App catalog: manifest-declared mini-apps plus built-in static windows, and content factories.

use desktop_app_calculator::CalculatorApp;
use desktop_app_contract::WindowContent;
use desktop_app_notepad::NotepadApp;
use desktop_app_snake::SnakeApp;
use desktop_app_terminal::CommandPromptApp;
use serde::Deserialize;

use crate::config::DesktopConfig;
use crate::explorer::ExplorerApp;
use crate::model::{Size, WindowId};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a window body is produced.
pub enum ContentKind {
    /// Calculator host.
    Calculator,
    /// Notepad host bound to the persisted note.
    Notepad,
    /// Command prompt host.
    CommandPrompt,
    /// Snake game host.
    Snake,
    /// "My Computer" folder browser.
    Explorer,
    /// Fixed trusted markup.
    Static(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Registered window descriptor resolved by `open_by_id`.
pub struct AppDescriptor {
    /// Window id.
    pub id: WindowId,
    /// Title bar, taskbar, and icon label.
    pub title: String,
    /// Icon image reference.
    pub icon: String,
    /// Whether a desktop shortcut is registered at startup.
    pub show_on_desktop: bool,
    /// Whether the start menu lists it.
    pub show_in_launcher: bool,
    /// Preferred window size; the configured default when `None`.
    pub size: Option<Size>,
    /// Body factory.
    pub kind: ContentKind,
}

#[derive(Debug, Deserialize)]
struct ManifestWindowDefaults {
    width: i32,
    height: i32,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    app_id: String,
    display_name: String,
    icon: String,
    show_in_launcher: bool,
    show_on_desktop: bool,
    window_defaults: ManifestWindowDefaults,
}

const MY_DOCUMENTS_HTML: &str = r#"<div class="explorer-view"><h3>My Documents</h3><ul class="folder-list"><li>My Pictures</li><li>My Music</li><li>Projects</li></ul></div>"#;
const IE_HTML: &str = r#"<div class="ie-view"><div class="ie-address">Address: http://www.example.com/</div><div class="ie-page"><h2>Welcome to the World Wide Web</h2><p>Connected at 56 Kbps.</p></div></div>"#;
const RECYCLE_BIN_HTML: &str = r#"<div class="explorer-view"><h3>Recycle Bin</h3><p>The Recycle Bin is empty.</p></div>"#;
const ABOUT_HTML: &str = r#"<div class="about-view"><h2>About this desktop</h2><p>A retro desktop simulation. Drag icons, open windows, and try the command prompt.</p></div>"#;

struct StaticWindow {
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    show_on_desktop: bool,
    kind: ContentKind,
}

const STATIC_WINDOWS: [StaticWindow; 5] = [
    StaticWindow {
        id: "my-computer",
        title: "My Computer",
        icon: "icons/my-computer.png",
        show_on_desktop: true,
        kind: ContentKind::Explorer,
    },
    StaticWindow {
        id: "my-documents",
        title: "My Documents",
        icon: "icons/my-documents.png",
        show_on_desktop: true,
        kind: ContentKind::Static(MY_DOCUMENTS_HTML),
    },
    StaticWindow {
        id: "ie",
        title: "Internet Explorer",
        icon: "icons/ie.png",
        show_on_desktop: true,
        kind: ContentKind::Static(IE_HTML),
    },
    StaticWindow {
        id: "recycle-bin",
        title: "Recycle Bin",
        icon: "icons/recycle-bin.png",
        show_on_desktop: true,
        kind: ContentKind::Static(RECYCLE_BIN_HTML),
    },
    StaticWindow {
        id: "about",
        title: "About",
        icon: "icons/about.png",
        show_on_desktop: false,
        kind: ContentKind::Static(ABOUT_HTML),
    },
];

fn hosted_kind(app_id: &str) -> Option<ContentKind> {
    match app_id {
        "calculator" => Some(ContentKind::Calculator),
        "notepad-enhanced" => Some(ContentKind::Notepad),
        "cmd" => Some(ContentKind::CommandPrompt),
        "snake" => Some(ContentKind::Snake),
        _ => None,
    }
}

fn manifest_descriptors(raw: &str) -> Vec<AppDescriptor> {
    let entries: Vec<ManifestEntry> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            leptos::logging::warn!("app manifest catalog parse failed: {err}");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| {
            let Some(kind) = hosted_kind(&entry.app_id) else {
                leptos::logging::warn!("manifest app `{}` has no host; skipped", entry.app_id);
                return None;
            };
            let id = match WindowId::new(entry.app_id) {
                Ok(id) => id,
                Err(err) => {
                    leptos::logging::warn!("{err}");
                    return None;
                }
            };
            Some(AppDescriptor {
                id,
                title: entry.display_name,
                icon: entry.icon,
                show_on_desktop: entry.show_on_desktop,
                show_in_launcher: entry.show_in_launcher,
                size: Some(Size {
                    width: entry.window_defaults.width,
                    height: entry.window_defaults.height,
                }),
                kind,
            })
        })
        .collect()
}

/// Every window the desktop can open, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCatalog {
    entries: Vec<AppDescriptor>,
}

impl AppCatalog {
    /// Built-in static windows followed by the manifest-declared mini-apps.
    pub fn builtin() -> Self {
        let (leading, trailing) = STATIC_WINDOWS.split_at(4);
        let statics = |windows: &[StaticWindow]| -> Vec<AppDescriptor> {
            windows
                .iter()
                .map(|w| AppDescriptor {
                    id: WindowId::trusted(w.id),
                    title: w.title.to_string(),
                    icon: w.icon.to_string(),
                    show_on_desktop: w.show_on_desktop,
                    show_in_launcher: true,
                    size: None,
                    kind: w.kind,
                })
                .collect()
        };
        let mut entries = statics(leading);
        entries.extend(manifest_descriptors(APP_MANIFEST_CATALOG_JSON));
        entries.extend(statics(trailing));
        Self { entries }
    }

    /// Looks up a descriptor.
    pub fn get(&self, id: &WindowId) -> Option<&AppDescriptor> {
        self.entries.iter().find(|d| d.id == *id)
    }

    /// All descriptors.
    pub fn entries(&self) -> &[AppDescriptor] {
        &self.entries
    }

    /// Descriptors registered as desktop shortcuts at startup.
    pub fn desktop_entries(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.entries.iter().filter(|d| d.show_on_desktop)
    }

    /// Descriptors listed in the start menu.
    pub fn launcher_entries(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.entries.iter().filter(|d| d.show_in_launcher)
    }

    /// Ids the command prompt's `start` command may open.
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|d| d.id.to_string()).collect()
    }

    /// Builds a fresh body for `descriptor`.
    pub fn build_content(
        &self,
        descriptor: &AppDescriptor,
        config: &DesktopConfig,
        seed: u64,
    ) -> WindowContent {
        match descriptor.kind {
            ContentKind::Calculator => WindowContent::Hosted(Box::new(CalculatorApp::new())),
            ContentKind::Notepad => WindowContent::Hosted(Box::new(NotepadApp::new())),
            ContentKind::CommandPrompt => {
                WindowContent::Hosted(Box::new(CommandPromptApp::new(self.ids())))
            }
            ContentKind::Snake => {
                WindowContent::Hosted(Box::new(SnakeApp::new(config.snake_tick_ms, seed)))
            }
            ContentKind::Explorer => WindowContent::Hosted(Box::new(ExplorerApp::new())),
            ContentKind::Static(markup) => WindowContent::Markup(markup.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn generated_manifest_catalog_registers_every_host() {
        let catalog = AppCatalog::builtin();
        for (id, kind) in [
            ("calculator", ContentKind::Calculator),
            ("notepad-enhanced", ContentKind::Notepad),
            ("cmd", ContentKind::CommandPrompt),
            ("snake", ContentKind::Snake),
        ] {
            let descriptor = catalog.get(&WindowId::from(id)).expect("registered");
            assert_eq!(descriptor.kind, kind);
            assert!(descriptor.size.is_some());
        }
    }

    #[test]
    fn snake_is_hidden_from_the_desktop_but_launchable() {
        let catalog = AppCatalog::builtin();
        let snake = WindowId::from("snake");
        assert!(catalog.desktop_entries().all(|d| d.id != snake));
        assert!(catalog.launcher_entries().any(|d| d.id == snake));
    }

    #[test]
    fn desktop_order_starts_with_static_shortcuts() {
        let catalog = AppCatalog::builtin();
        let ids: Vec<&str> = catalog.desktop_entries().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "my-computer",
                "my-documents",
                "ie",
                "recycle-bin",
                "calculator",
                "cmd",
                "notepad-enhanced",
            ]
        );
    }

    #[test]
    fn malformed_manifest_json_yields_no_entries() {
        assert!(manifest_descriptors("not json").is_empty());
        assert!(manifest_descriptors(
            r#"[{"app_id":"paint","display_name":"Paint","icon":"p.png","show_in_launcher":true,"show_on_desktop":true,"window_defaults":{"width":1,"height":1}}]"#
        )
        .is_empty());
    }

    #[test]
    fn static_content_is_markup_and_hosts_are_interactive() {
        let catalog = AppCatalog::builtin();
        let config = DesktopConfig::default();
        let about = catalog.get(&WindowId::from("about")).expect("about");
        assert!(!catalog.build_content(about, &config, 1).is_hosted());
        let cmd = catalog.get(&WindowId::from("cmd")).expect("cmd");
        assert!(catalog.build_content(cmd, &config, 1).is_hosted());
        let computer = catalog.get(&WindowId::from("my-computer")).expect("my-computer");
        assert_eq!(computer.kind, ContentKind::Explorer);
        assert!(catalog.build_content(computer, &config, 1).is_hosted());
    }
}
