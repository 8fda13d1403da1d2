//! Window registry: creation, stacking, focus, minimize/maximize, geometry, and teardown.
//!
//! The manager exclusively owns each window's record, its taskbar entry, and its content.
//! Every operation on an unknown id is a no-op reported through a `false`/`None` return.

use std::collections::BTreeMap;

use desktop_app_contract::{AppCommand, AppContext, AppInput, WindowContent};

use crate::config::DesktopConfig;
use crate::model::{
    Geometry, Point, ResizeEdge, Size, TaskbarEntry, Viewport, WindowId, WindowRecord, WindowState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Identity and optional preferred size for a window to open.
pub struct OpenRequest {
    /// Registry key.
    pub id: WindowId,
    /// Title bar text.
    pub title: String,
    /// Icon reference.
    pub icon: String,
    /// Preferred size; the configured default when `None`.
    pub size: Option<Size>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of [`WindowManager::open`].
pub enum OpenOutcome {
    /// A window with this id already existed and was focused.
    Focused,
    /// A fresh window was created; carries the commands its content emitted on mount.
    Created {
        /// Mount-time commands, in emission order.
        commands: Vec<AppCommand>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WindowSettings {
    cascade_origin: i32,
    cascade_step: i32,
    default_size: Size,
    min_size: Size,
    taskbar_height: i32,
    z_base: u64,
}

impl From<&DesktopConfig> for WindowSettings {
    fn from(config: &DesktopConfig) -> Self {
        Self {
            cascade_origin: config.cascade_origin,
            cascade_step: config.cascade_step,
            default_size: Size {
                width: config.default_width,
                height: config.default_height,
            },
            min_size: Size {
                width: config.min_width,
                height: config.min_height,
            },
            taskbar_height: config.taskbar_height,
            z_base: config.z_base,
        }
    }
}

/// Owns all live windows, their taskbar mirror, and their hosted content.
#[derive(Debug)]
pub struct WindowManager {
    settings: WindowSettings,
    windows: Vec<WindowRecord>,
    taskbar: Vec<TaskbarEntry>,
    contents: BTreeMap<WindowId, WindowContent>,
    closing: Vec<WindowRecord>,
    z_counter: u64,
}

impl WindowManager {
    /// Creates an empty manager.
    pub fn new(config: &DesktopConfig) -> Self {
        let settings = WindowSettings::from(config);
        Self {
            settings,
            windows: Vec::new(),
            taskbar: Vec::new(),
            contents: BTreeMap::new(),
            closing: Vec::new(),
            z_counter: settings.z_base,
        }
    }

    /// Opens a window, or focuses the existing one with the same id.
    ///
    /// `content` is only built when a new window is created.
    pub fn open(
        &mut self,
        request: OpenRequest,
        content: impl FnOnce() -> WindowContent,
    ) -> OpenOutcome {
        if self.contains(&request.id) {
            self.focus(&request.id);
            return OpenOutcome::Focused;
        }

        let offset = self.settings.cascade_origin
            + self.windows.len() as i32 * self.settings.cascade_step;
        let size = request.size.unwrap_or(self.settings.default_size);
        let z_order = self.next_z();

        for window in &mut self.windows {
            if window.state == WindowState::Active {
                window.state = WindowState::Inactive;
            }
        }
        for entry in &mut self.taskbar {
            entry.active = false;
        }

        self.windows.push(WindowRecord {
            id: request.id.clone(),
            title: request.title.clone(),
            icon: request.icon.clone(),
            geometry: Geometry {
                position: Point::new(offset, offset),
                size,
            },
            z_order,
            state: WindowState::Active,
            maximized: false,
            saved_geometry: None,
        });
        self.taskbar.push(TaskbarEntry {
            window_id: request.id.clone(),
            title: request.title,
            icon: request.icon,
            active: true,
        });

        let mut content = content();
        let mut ctx = AppContext::new(request.id.clone());
        if let WindowContent::Hosted(host) = &mut content {
            host.mount(&mut ctx);
        }
        self.contents.insert(request.id, content);
        OpenOutcome::Created {
            commands: ctx.into_commands(),
        }
    }

    /// Makes `id` the sole active window and raises it above every other window.
    pub fn focus(&mut self, id: &WindowId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let z_order = self.next_z();
        for window in &mut self.windows {
            if window.id == *id {
                window.state = WindowState::Active;
                window.z_order = z_order;
            } else if window.state == WindowState::Active {
                window.state = WindowState::Inactive;
            }
        }
        for entry in &mut self.taskbar {
            entry.active = entry.window_id == *id;
        }
        true
    }

    /// Hides `id`; its stacking order is kept.
    pub fn minimize(&mut self, id: &WindowId) -> bool {
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        window.state = WindowState::Minimized;
        if let Some(entry) = self.taskbar.iter_mut().find(|e| e.window_id == *id) {
            entry.active = false;
        }
        true
    }

    /// Taskbar click: focus a minimized or background window, minimize the active one.
    pub fn toggle(&mut self, id: &WindowId) -> bool {
        match self.window(id).map(|w| w.state) {
            None => false,
            Some(WindowState::Active) => self.minimize(id),
            Some(_) => self.focus(id),
        }
    }

    /// Minimizes every live window.
    pub fn minimize_all(&mut self) {
        let ids: Vec<WindowId> = self.windows.iter().map(|w| w.id.clone()).collect();
        for id in &ids {
            self.minimize(id);
        }
    }

    /// Logically removes `id`: unmounts its content and drops its taskbar entry.
    ///
    /// The record lingers in [`WindowManager::closing`] until [`WindowManager::finish_close`]
    /// for the exit animation. Returns the unmount commands, or `None` for unknown ids.
    pub fn close(&mut self, id: &WindowId) -> Option<Vec<AppCommand>> {
        let index = self.windows.iter().position(|w| w.id == *id)?;
        let mut ctx = AppContext::new(id.clone());
        if let Some(WindowContent::Hosted(host)) = self.contents.get_mut(id) {
            host.unmount(&mut ctx);
        }
        self.contents.remove(id);
        self.taskbar.retain(|e| e.window_id != *id);
        let record = self.windows.remove(index);
        self.closing.retain(|w| w.id != *id);
        self.closing.push(record);
        Some(ctx.into_commands())
    }

    /// Drops the exit-animation record for `id`.
    pub fn finish_close(&mut self, id: &WindowId) -> bool {
        let before = self.closing.len();
        self.closing.retain(|w| w.id != *id);
        before != self.closing.len()
    }

    /// Toggles maximize: snapshot and fill the area above the taskbar, or restore the snapshot.
    pub fn maximize(&mut self, id: &WindowId, viewport: Viewport) -> bool {
        let area = self.maximized_geometry(viewport);
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        if window.maximized {
            if let Some(saved) = window.saved_geometry.take() {
                window.geometry = saved;
            }
            window.maximized = false;
        } else {
            window.saved_geometry = Some(window.geometry);
            window.geometry = area;
            window.maximized = true;
        }
        true
    }

    /// Re-fits maximized windows after a viewport change.
    pub fn refit_maximized(&mut self, viewport: Viewport) {
        let area = self.maximized_geometry(viewport);
        for window in self.windows.iter_mut().filter(|w| w.maximized) {
            window.geometry = area;
        }
    }

    /// Moves `id` by a pointer delta.
    pub fn drag_by(&mut self, id: &WindowId, dx: i32, dy: i32) -> bool {
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        window.geometry.position = window.geometry.position.offset(dx, dy);
        true
    }

    /// Grows or shrinks `id` along `edge`, never moving its top-left corner.
    pub fn resize(&mut self, id: &WindowId, edge: ResizeEdge, dw: i32, dh: i32) -> bool {
        let min = self.settings.min_size;
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        let (dw, dh) = edge.mask(dw, dh);
        let size = &mut window.geometry.size;
        size.width = (size.width + dw).max(min.width);
        size.height = (size.height + dh).max(min.height);
        true
    }

    /// Routes input to the hosted app in `id`. `None` when the window is unknown or static.
    pub fn route_input(&mut self, id: &WindowId, input: AppInput) -> Option<Vec<AppCommand>> {
        let WindowContent::Hosted(host) = self.contents.get_mut(id)? else {
            return None;
        };
        let mut ctx = AppContext::new(id.clone());
        host.handle_input(input, &mut ctx);
        Some(ctx.into_commands())
    }

    /// Live window records in creation order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Taskbar entries, one per live window.
    pub fn taskbar(&self) -> &[TaskbarEntry] {
        &self.taskbar
    }

    /// Windows playing their exit animation. Not addressable by any operation.
    pub fn closing(&self) -> &[WindowRecord] {
        &self.closing
    }

    /// Looks up a live window.
    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == *id)
    }

    /// Content hosted in a live window.
    pub fn content(&self, id: &WindowId) -> Option<&WindowContent> {
        self.contents.get(id)
    }

    /// Returns `true` when `id` is a live window.
    pub fn contains(&self, id: &WindowId) -> bool {
        self.window(id).is_some()
    }

    /// The focused window, if any.
    pub fn active(&self) -> Option<&WindowId> {
        self.windows.iter().find(|w| w.is_active()).map(|w| &w.id)
    }

    fn window_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == *id)
    }

    fn next_z(&mut self) -> u64 {
        self.z_counter += 1;
        self.z_counter
    }

    fn maximized_geometry(&self, viewport: Viewport) -> Geometry {
        Geometry {
            position: Point::new(0, 0),
            size: Size {
                width: viewport.width,
                height: (viewport.height - self.settings.taskbar_height).max(0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use desktop_app_contract::AppHost;
    use pretty_assertions::assert_eq;

    use super::*;

    fn manager() -> WindowManager {
        WindowManager::new(&DesktopConfig::default())
    }

    fn request(id: &str) -> OpenRequest {
        OpenRequest {
            id: WindowId::from(id),
            title: id.to_uppercase(),
            icon: format!("icons/{id}.png"),
            size: None,
        }
    }

    fn markup() -> WindowContent {
        WindowContent::Markup("<p>body</p>".to_string())
    }

    fn open(wm: &mut WindowManager, id: &str) -> WindowId {
        wm.open(request(id), markup);
        WindowId::from(id)
    }

    fn active_count(wm: &WindowManager) -> usize {
        wm.windows().iter().filter(|w| w.is_active()).count()
    }

    #[test]
    fn opening_twice_keeps_one_window_and_one_taskbar_entry() {
        let mut wm = manager();
        assert!(matches!(
            wm.open(request("calculator"), markup),
            OpenOutcome::Created { .. }
        ));
        assert_eq!(wm.open(request("calculator"), markup), OpenOutcome::Focused);
        assert_eq!(wm.open(request("calculator"), markup), OpenOutcome::Focused);

        assert_eq!(wm.windows().len(), 1);
        assert_eq!(wm.taskbar().len(), 1);
    }

    #[test]
    fn focus_raises_above_all_others_and_is_exclusive() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        let b = open(&mut wm, "b");
        let c = open(&mut wm, "c");
        let before = wm.window(&a).expect("a").z_order;

        assert!(wm.focus(&a));

        let z = |id: &WindowId| wm.window(id).expect("window").z_order;
        assert!(z(&a) > before);
        assert!(z(&a) > z(&b));
        assert!(z(&a) > z(&c));
        assert_eq!(wm.active(), Some(&a));
        assert_eq!(active_count(&wm), 1);
        let active_entries: Vec<&WindowId> = wm
            .taskbar()
            .iter()
            .filter(|e| e.active)
            .map(|e| &e.window_id)
            .collect();
        assert_eq!(active_entries, vec![&a]);
    }

    #[test]
    fn z_order_never_repeats_across_open_focus_and_close() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        let first = wm.window(&a).expect("a").z_order;
        wm.close(&a);
        let a = open(&mut wm, "a");
        assert!(wm.window(&a).expect("a").z_order > first);
        assert!(first > DesktopConfig::default().z_base);
    }

    #[test]
    fn cascade_offsets_follow_live_window_count() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        let b = open(&mut wm, "b");
        assert_eq!(wm.window(&a).expect("a").geometry.position, Point::new(100, 100));
        assert_eq!(wm.window(&b).expect("b").geometry.position, Point::new(120, 120));
        assert_eq!(
            wm.window(&a).expect("a").geometry.size,
            Size {
                width: 450,
                height: 350
            }
        );
    }

    #[test]
    fn reopening_after_close_starts_fresh_at_cascade_origin() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        wm.drag_by(&a, 40, 40);
        wm.maximize(&a, Viewport::default());
        assert!(wm.close(&a).is_some());
        assert!(!wm.contains(&a));
        assert!(wm.taskbar().is_empty());

        let a = open(&mut wm, "a");
        let record = wm.window(&a).expect("a");
        assert_eq!(record.geometry.position, Point::new(100, 100));
        assert!(!record.maximized);
        assert_eq!(record.saved_geometry, None);
    }

    #[test]
    fn minimize_then_toggle_restores_and_toggle_on_active_minimizes() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        let z = wm.window(&a).expect("a").z_order;

        assert!(wm.minimize(&a));
        assert_eq!(wm.window(&a).expect("a").state, WindowState::Minimized);
        assert_eq!(wm.window(&a).expect("a").z_order, z);
        assert!(!wm.taskbar()[0].active);

        assert!(wm.toggle(&a));
        assert_eq!(wm.window(&a).expect("a").state, WindowState::Active);

        assert!(wm.toggle(&a));
        assert_eq!(wm.window(&a).expect("a").state, WindowState::Minimized);
    }

    #[test]
    fn toggle_on_background_window_focuses_it() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        let b = open(&mut wm, "b");
        assert!(wm.toggle(&a));
        assert_eq!(wm.active(), Some(&a));
        assert_eq!(wm.window(&b).expect("b").state, WindowState::Inactive);
    }

    #[test]
    fn maximize_twice_restores_exact_geometry() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        wm.drag_by(&a, 13, -7);
        wm.resize(&a, ResizeEdge::BottomRight, 30, 40);
        let before = wm.window(&a).expect("a").geometry;

        let viewport = Viewport {
            width: 1280,
            height: 800,
        };
        assert!(wm.maximize(&a, viewport));
        let maxed = wm.window(&a).expect("a");
        assert!(maxed.maximized);
        assert_eq!(maxed.geometry.position, Point::new(0, 0));
        assert_eq!(
            maxed.geometry.size,
            Size {
                width: 1280,
                height: 752
            }
        );

        assert!(wm.maximize(&a, viewport));
        let restored = wm.window(&a).expect("a");
        assert!(!restored.maximized);
        assert_eq!(restored.geometry, before);
        assert_eq!(restored.saved_geometry, None);
    }

    #[test]
    fn resize_changes_only_the_grabbed_dimensions_and_respects_minimums() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        let origin = wm.window(&a).expect("a").geometry.position;

        wm.resize(&a, ResizeEdge::Right, 50, 999);
        assert_eq!(
            wm.window(&a).expect("a").geometry.size,
            Size {
                width: 500,
                height: 350
            }
        );
        wm.resize(&a, ResizeEdge::Bottom, 999, -1000);
        assert_eq!(
            wm.window(&a).expect("a").geometry.size,
            Size {
                width: 500,
                height: 140
            }
        );
        assert_eq!(wm.window(&a).expect("a").geometry.position, origin);
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let mut wm = manager();
        let ghost = WindowId::from("ghost");
        assert!(!wm.focus(&ghost));
        assert!(!wm.minimize(&ghost));
        assert!(!wm.toggle(&ghost));
        assert!(!wm.maximize(&ghost, Viewport::default()));
        assert!(!wm.drag_by(&ghost, 1, 1));
        assert!(!wm.resize(&ghost, ResizeEdge::Right, 1, 1));
        assert_eq!(wm.close(&ghost), None);
        assert_eq!(wm.route_input(&ghost, AppInput::Tick), None);
        assert!(wm.windows().is_empty());
    }

    #[test]
    fn closing_windows_linger_until_finished_but_are_not_addressable() {
        let mut wm = manager();
        let a = open(&mut wm, "a");
        wm.close(&a);
        assert_eq!(wm.closing().len(), 1);
        assert!(!wm.focus(&a));
        assert!(wm.finish_close(&a));
        assert!(wm.closing().is_empty());
        assert!(!wm.finish_close(&a));
    }

    #[test]
    fn show_desktop_minimizes_everything() {
        let mut wm = manager();
        open(&mut wm, "a");
        open(&mut wm, "b");
        wm.minimize_all();
        assert!(wm.windows().iter().all(WindowRecord::is_minimized));
        assert_eq!(wm.active(), None);
    }

    struct Probe(Rc<RefCell<Vec<&'static str>>>);

    impl AppHost for Probe {
        fn mount(&mut self, ctx: &mut AppContext) {
            self.0.borrow_mut().push("mount");
            ctx.send(AppCommand::LoadNote);
        }

        fn unmount(&mut self, ctx: &mut AppContext) {
            self.0.borrow_mut().push("unmount");
            ctx.send(AppCommand::StopTimer);
        }

        fn handle_input(&mut self, _input: AppInput, ctx: &mut AppContext) {
            self.0.borrow_mut().push("input");
            ctx.send(AppCommand::CloseSelf);
        }

        fn render(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn hosted_content_sees_mount_input_and_unmount() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut wm = manager();
        let probe_log = log.clone();
        let outcome = wm.open(request("probe"), move || {
            WindowContent::Hosted(Box::new(Probe(probe_log)))
        });
        assert_eq!(
            outcome,
            OpenOutcome::Created {
                commands: vec![AppCommand::LoadNote]
            }
        );

        let id = WindowId::from("probe");
        assert_eq!(
            wm.route_input(&id, AppInput::Tick),
            Some(vec![AppCommand::CloseSelf])
        );
        assert_eq!(wm.close(&id), Some(vec![AppCommand::StopTimer]));
        assert_eq!(*log.borrow(), vec!["mount", "input", "unmount"]);
    }
}
