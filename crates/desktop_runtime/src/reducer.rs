//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.
//!
//! [`DesktopRuntime::dispatch`] is the single writer of desktop state. It performs no I/O:
//! every side effect leaves as an ordered [`RuntimeEffect`] for the shell to execute.

use std::collections::BTreeSet;

use desktop_app_contract::{AppCommand, AppInput, BoundText};
use platform_host::SoundCue;

use crate::apps::AppCatalog;
use crate::config::DesktopConfig;
use crate::drag::{DragController, DragError, ListenerScope};
use crate::icons::IconLayout;
use crate::lifecycle::{LifecycleBus, LifecycleNotice};
use crate::model::{Point, PointerPosition, ResizeEdge, Viewport, WindowId};
use crate::window_manager::{OpenOutcome, OpenRequest, WindowManager};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Entity a drag gesture moves.
pub enum DragTarget {
    /// Window title bar.
    Window(WindowId),
    /// Window resize handle.
    Resize(WindowId, ResizeEdge),
    /// Desktop icon; snaps to the grid on release.
    Icon(WindowId),
    /// Desktop companion; never snaps.
    Companion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`DesktopRuntime::dispatch`].
pub enum DesktopAction {
    /// Open a catalog window, or focus it when already open.
    OpenById {
        /// Catalog id.
        window_id: WindowId,
    },
    /// Focus (and raise) a window.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Taskbar button click.
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Close a window through the full teardown path.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Exit animation finished; drop the lingering record.
    FinishCloseAnimation {
        /// Closed window.
        window_id: WindowId,
    },
    /// Toggle maximize for a window.
    MaximizeWindow {
        /// Window to maximize or restore.
        window_id: WindowId,
    },
    /// Resize a window by explicit deltas.
    ResizeWindow {
        /// Window to resize.
        window_id: WindowId,
        /// Grabbed edge.
        edge: ResizeEdge,
        /// Width delta.
        dw: i32,
        /// Height delta.
        dh: i32,
    },
    /// Minimize every window.
    ShowDesktop,
    /// Add a desktop shortcut.
    RegisterIcon {
        /// Id opened by the shortcut.
        window_id: WindowId,
        /// Label.
        title: String,
        /// Icon image.
        icon: String,
    },
    /// Re-apply insertion-order grid placement.
    ArrangeIcons,
    /// Select a desktop icon.
    SelectIcon {
        /// Icon to select.
        window_id: WindowId,
    },
    /// Click on empty desktop.
    ClearIconSelection,
    /// Browser viewport changed size.
    ViewportResized {
        /// New viewport.
        viewport: Viewport,
    },
    /// Pointer moved during a drag gesture.
    PointerMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Pointer released; ends the drag gesture.
    PointerUp,
    /// Start button click.
    ToggleStartMenu,
    /// Right-click on the desktop.
    OpenContextMenu {
        /// Menu anchor.
        pointer: PointerPosition,
    },
    /// Global click: close start and context menus.
    DismissMenus,
    /// Companion bubble timed out.
    DismissCompanionBubble,
    /// Keyboard input not claimed by a focused text field.
    KeyPress {
        /// DOM key name.
        key: String,
        /// Alt modifier.
        alt: bool,
        /// Control modifier.
        ctrl: bool,
    },
    /// Input from inside a window body.
    AppInput {
        /// Target window.
        window_id: WindowId,
        /// Routed input.
        input: AppInput,
    },
    /// Repeating timer fired for a window.
    AppTick {
        /// Timer owner.
        window_id: WindowId,
    },
    /// Toggle UI sound cues.
    ToggleSound,
    /// Enter the simulated crash screen.
    TriggerCrash,
    /// Rebuild the desktop from scratch.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`DesktopRuntime::dispatch`] for the shell to execute.
pub enum RuntimeEffect {
    /// Play a UI sound cue.
    PlaySound(SoundCue),
    /// Voice a companion remark.
    CompanionSpeak {
        /// Bubble text.
        text: String,
        /// Optional pre-rendered clip.
        audio: Option<String>,
    },
    /// Stop whatever the companion is saying.
    StopCompanionAudio,
    /// Write the persisted note.
    PersistNote(String),
    /// Read the persisted note and deliver it to the window.
    LoadNote(WindowId),
    /// Remove the persisted note.
    DeleteNote,
    /// Start a repeating timer dispatching [`DesktopAction::AppTick`].
    StartAppTimer {
        /// Timer owner.
        window_id: WindowId,
        /// Period in milliseconds.
        interval_ms: u32,
    },
    /// Clear a window's repeating timer.
    StopAppTimer(WindowId),
    /// Dispatch [`DesktopAction::FinishCloseAnimation`] after a delay.
    FinishCloseAfter {
        /// Closed window.
        window_id: WindowId,
        /// Delay in milliseconds.
        delay_ms: u32,
    },
    /// Move keyboard focus into the window's primary input.
    FocusWindowInput(WindowId),
}

impl RuntimeEffect {
    /// Returns `true` for effects run against host services rather than the shell's timers.
    pub fn is_host_effect(&self) -> bool {
        matches!(
            self,
            Self::PlaySound(_)
                | Self::CompanionSpeak { .. }
                | Self::StopCompanionAudio
                | Self::PersistNote(_)
                | Self::LoadNote(_)
                | Self::DeleteNote
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Desktop companion position and speech bubble.
pub struct CompanionState {
    /// Top-left corner.
    pub position: Point,
    /// Text currently shown in the bubble.
    pub bubble: Option<String>,
}

/// Complete desktop state: windows, icons, menus, companion, and crash mode.
#[derive(Debug)]
pub struct DesktopRuntime {
    config: DesktopConfig,
    viewport: Viewport,
    catalog: AppCatalog,
    windows: WindowManager,
    icons: IconLayout,
    lifecycle: LifecycleBus,
    drag: DragController<DragTarget>,
    timers: BTreeSet<WindowId>,
    start_menu_open: bool,
    context_menu: Option<Point>,
    sound_enabled: bool,
    crashed: bool,
    companion: CompanionState,
    seed: u64,
}

impl DesktopRuntime {
    /// Builds a fresh desktop and registers the catalog's desktop shortcuts.
    pub fn new(config: DesktopConfig, viewport: Viewport, seed: u64) -> Self {
        let catalog = AppCatalog::builtin();
        let mut icons = IconLayout::new(config.grid_metrics(), viewport);
        for descriptor in catalog.desktop_entries() {
            icons.register(
                descriptor.id.clone(),
                descriptor.title.clone(),
                descriptor.icon.clone(),
            );
        }
        Self {
            windows: WindowManager::new(&config),
            companion: CompanionState {
                position: Point::new(viewport.width - 160, viewport.height - config.taskbar_height - 160),
                bubble: None,
            },
            config,
            viewport,
            catalog,
            icons,
            lifecycle: LifecycleBus::with_defaults(),
            drag: DragController::default(),
            timers: BTreeSet::new(),
            start_menu_open: false,
            context_menu: None,
            sound_enabled: true,
            crashed: false,
            seed,
        }
    }

    /// Applies an action and returns the side effects to run, in order.
    ///
    /// While the crash screen is up every action except [`DesktopAction::Reset`] is ignored.
    pub fn dispatch(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        if self.crashed && action != DesktopAction::Reset {
            return Vec::new();
        }
        let mut effects = Vec::new();
        match action {
            DesktopAction::OpenById { window_id } => {
                self.open_by_id(&window_id, &mut effects);
            }
            DesktopAction::FocusWindow { window_id } => {
                if self.windows.focus(&window_id) {
                    effects.push(RuntimeEffect::FocusWindowInput(window_id));
                }
            }
            DesktopAction::MinimizeWindow { window_id } => {
                self.windows.minimize(&window_id);
            }
            DesktopAction::ToggleTaskbarWindow { window_id } => {
                if self.windows.toggle(&window_id)
                    && self.windows.active() == Some(&window_id)
                {
                    effects.push(RuntimeEffect::FocusWindowInput(window_id));
                }
            }
            DesktopAction::CloseWindow { window_id } => {
                self.close_window(&window_id, &mut effects);
            }
            DesktopAction::FinishCloseAnimation { window_id } => {
                self.windows.finish_close(&window_id);
            }
            DesktopAction::MaximizeWindow { window_id } => {
                self.windows.maximize(&window_id, self.viewport);
            }
            DesktopAction::ResizeWindow {
                window_id,
                edge,
                dw,
                dh,
            } => {
                self.windows.resize(&window_id, edge, dw, dh);
            }
            DesktopAction::ShowDesktop => self.windows.minimize_all(),
            DesktopAction::RegisterIcon {
                window_id,
                title,
                icon,
            } => {
                self.icons.register(window_id, title, icon);
            }
            DesktopAction::ArrangeIcons => self.icons.arrange_all(),
            DesktopAction::SelectIcon { window_id } => {
                if self.icons.select(&window_id) {
                    effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
                }
            }
            DesktopAction::ClearIconSelection => self.icons.clear_selection(),
            DesktopAction::ViewportResized { viewport } => {
                self.viewport = viewport;
                self.icons.set_viewport(viewport);
                self.windows.refit_maximized(viewport);
            }
            DesktopAction::PointerMove { pointer } => self.pointer_move(pointer),
            DesktopAction::PointerUp => self.pointer_up(),
            DesktopAction::ToggleStartMenu => {
                self.start_menu_open = !self.start_menu_open;
                self.context_menu = None;
                effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            }
            DesktopAction::OpenContextMenu { pointer } => {
                self.context_menu = Some(Point::new(pointer.x, pointer.y));
                self.start_menu_open = false;
            }
            DesktopAction::DismissMenus => {
                self.start_menu_open = false;
                self.context_menu = None;
            }
            DesktopAction::DismissCompanionBubble => self.companion.bubble = None,
            DesktopAction::KeyPress { key, alt, ctrl } => {
                self.key_press(key, alt, ctrl, &mut effects);
            }
            DesktopAction::AppInput { window_id, input } => {
                self.route_input(&window_id, input, &mut effects);
            }
            DesktopAction::AppTick { window_id } => {
                if self.timers.contains(&window_id) {
                    self.route_input(&window_id, AppInput::Tick, &mut effects);
                }
            }
            DesktopAction::ToggleSound => {
                self.sound_enabled = !self.sound_enabled;
                effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            }
            DesktopAction::TriggerCrash => self.crash(&mut effects),
            DesktopAction::Reset => self.reset(&mut effects),
        }

        if !self.sound_enabled {
            effects.retain(|effect| !matches!(effect, RuntimeEffect::PlaySound(_)));
        }
        if let Some(text) = effects.iter().rev().find_map(|effect| match effect {
            RuntimeEffect::CompanionSpeak { text, .. } => Some(text.clone()),
            _ => None,
        }) {
            self.companion.bubble = Some(text);
        }
        effects
    }

    /// Starts a drag gesture. Window and icon drags also focus or select their target.
    pub fn begin_drag(
        &mut self,
        target: DragTarget,
        pointer: PointerPosition,
        mut listeners: Box<dyn ListenerScope>,
    ) -> Vec<RuntimeEffect> {
        let accepted = !self.crashed
            && match &target {
                DragTarget::Window(id) | DragTarget::Resize(id, _) => {
                    if self.windows.contains(id) && self.windows.active() != Some(id) {
                        self.windows.focus(id);
                    }
                    self.windows.contains(id)
                }
                DragTarget::Icon(id) => self.icons.select(id),
                DragTarget::Companion => true,
            };
        if accepted {
            self.drag.begin(target, pointer, listeners);
        } else {
            listeners.release();
        }
        Vec::new()
    }

    fn open_by_id(&mut self, id: &WindowId, effects: &mut Vec<RuntimeEffect>) -> bool {
        let Some(descriptor) = self.catalog.get(id).cloned() else {
            return false;
        };
        self.start_menu_open = false;
        self.context_menu = None;
        let seed = self.next_seed();
        let request = OpenRequest {
            id: descriptor.id.clone(),
            title: descriptor.title.clone(),
            icon: descriptor.icon.clone(),
            size: descriptor.size,
        };
        let catalog = &self.catalog;
        let config = &self.config;
        let outcome = self
            .windows
            .open(request, || catalog.build_content(&descriptor, config, seed));
        if let OpenOutcome::Created { commands } = outcome {
            self.apply_app_commands(id, commands, effects);
            effects.extend(self.lifecycle.publish(&LifecycleNotice::opened(id.clone())));
        }
        effects.push(RuntimeEffect::FocusWindowInput(id.clone()));
        true
    }

    fn close_window(&mut self, id: &WindowId, effects: &mut Vec<RuntimeEffect>) -> bool {
        let Some(commands) = self.windows.close(id) else {
            return false;
        };
        self.apply_app_commands(id, commands, effects);
        if self.timers.remove(id) {
            effects.push(RuntimeEffect::StopAppTimer(id.clone()));
        }
        effects.extend(self.lifecycle.publish(&LifecycleNotice::closed(id.clone())));
        effects.push(RuntimeEffect::FinishCloseAfter {
            window_id: id.clone(),
            delay_ms: self.config.close_animation_ms,
        });
        true
    }

    fn route_input(&mut self, id: &WindowId, input: AppInput, effects: &mut Vec<RuntimeEffect>) {
        if let Some(commands) = self.windows.route_input(id, input) {
            self.apply_app_commands(id, commands, effects);
        }
    }

    fn apply_app_commands(
        &mut self,
        id: &WindowId,
        commands: Vec<AppCommand>,
        effects: &mut Vec<RuntimeEffect>,
    ) {
        for command in commands {
            if self.crashed {
                return;
            }
            match command {
                AppCommand::OpenWindow { window_id } => {
                    self.open_by_id(&window_id, effects);
                }
                AppCommand::CloseSelf => {
                    self.close_window(id, effects);
                }
                AppCommand::StartTimer { interval_ms } => {
                    if self.windows.contains(id) && self.timers.insert(id.clone()) {
                        effects.push(RuntimeEffect::StartAppTimer {
                            window_id: id.clone(),
                            interval_ms,
                        });
                    }
                }
                AppCommand::StopTimer => {
                    if self.timers.remove(id) {
                        effects.push(RuntimeEffect::StopAppTimer(id.clone()));
                    }
                }
                AppCommand::PersistNote { text } => effects.push(RuntimeEffect::PersistNote(text)),
                AppCommand::LoadNote => effects.push(RuntimeEffect::LoadNote(id.clone())),
                AppCommand::DeleteNote => effects.push(RuntimeEffect::DeleteNote),
                AppCommand::Speak { text, audio } => {
                    effects.push(RuntimeEffect::CompanionSpeak { text, audio });
                }
                AppCommand::TriggerCrash => self.crash(effects),
            }
        }
    }

    fn key_press(&mut self, key: String, alt: bool, ctrl: bool, effects: &mut Vec<RuntimeEffect>) {
        let close_shortcut = (alt && key == "F4") || (ctrl && key.eq_ignore_ascii_case("w"));
        if close_shortcut {
            if let Some(active) = self.windows.active().cloned() {
                self.close_window(&active, effects);
            }
            return;
        }
        if key == "Meta" || key == "OS" {
            self.start_menu_open = !self.start_menu_open;
            return;
        }
        if key == "Escape" && (self.start_menu_open || self.context_menu.is_some()) {
            self.start_menu_open = false;
            self.context_menu = None;
            return;
        }
        let Some(active) = self.windows.active().cloned() else {
            return;
        };
        let key = if ctrl { format!("Ctrl+{key}") } else { key };
        self.route_input(&active, AppInput::Key(key), effects);
    }

    fn pointer_move(&mut self, pointer: PointerPosition) {
        let Some((target, dx, dy)) = self.drag.pointer_move(pointer) else {
            return;
        };
        match target {
            DragTarget::Window(id) => {
                self.windows.drag_by(&id, dx, dy);
            }
            DragTarget::Resize(id, edge) => {
                self.windows.resize(&id, edge, dx, dy);
            }
            DragTarget::Icon(id) => {
                self.icons.drag_by(&id, dx, dy);
            }
            DragTarget::Companion => {
                self.companion.position = self.companion.position.offset(dx, dy);
            }
        }
    }

    fn pointer_up(&mut self) {
        let icons = &mut self.icons;
        let windows = &self.windows;
        let result = self.drag.end(|target| match target {
            DragTarget::Icon(id) => icons
                .snap(id)
                .map(|_| ())
                .ok_or_else(|| DragError::TargetGone(id.to_string())),
            DragTarget::Window(id) | DragTarget::Resize(id, _) => {
                if windows.contains(id) {
                    Ok(())
                } else {
                    Err(DragError::TargetGone(id.to_string()))
                }
            }
            DragTarget::Companion => Ok(()),
        });
        if let Err(err) = result {
            leptos::logging::warn!("drag end: {err}");
        }
    }

    fn crash(&mut self, effects: &mut Vec<RuntimeEffect>) {
        if self.crashed {
            return;
        }
        leptos::logging::log!("desktop entered crash screen");
        self.stop_all_timers(effects);
        self.drag.cancel();
        self.start_menu_open = false;
        self.context_menu = None;
        self.companion.bubble = None;
        effects.push(RuntimeEffect::StopCompanionAudio);
        self.crashed = true;
    }

    fn reset(&mut self, effects: &mut Vec<RuntimeEffect>) {
        leptos::logging::log!("desktop reset");
        self.stop_all_timers(effects);
        let seed = self.next_seed();
        *self = Self::new(self.config.clone(), self.viewport, seed);
    }

    fn stop_all_timers(&mut self, effects: &mut Vec<RuntimeEffect>) {
        for id in std::mem::take(&mut self.timers) {
            effects.push(RuntimeEffect::StopAppTimer(id));
        }
    }

    fn next_seed(&mut self) -> u64 {
        self.seed = self
            .seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.seed
    }

    /// Active configuration.
    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Registered windows.
    pub fn catalog(&self) -> &AppCatalog {
        &self.catalog
    }

    /// Window registry.
    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    /// Desktop icons.
    pub fn icons(&self) -> &IconLayout {
        &self.icons
    }

    /// Body markup of a live window.
    pub fn window_body(&self, id: &WindowId) -> Option<String> {
        self.windows.content(id).map(|content| content.render())
    }

    /// Live text bindings of a window body; empty for unknown ids and static markup.
    pub fn window_bindings(&self, id: &WindowId) -> Vec<BoundText> {
        self.windows
            .content(id)
            .map(|content| content.bindings())
            .unwrap_or_default()
    }

    /// Whether the start menu is showing.
    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    /// Context menu anchor, when open.
    pub fn context_menu(&self) -> Option<Point> {
        self.context_menu
    }

    /// Whether sound cues are enabled.
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Whether the crash screen is up.
    pub fn crashed(&self) -> bool {
        self.crashed
    }

    /// Companion position and bubble.
    pub fn companion(&self) -> &CompanionState {
        &self.companion
    }

    /// Windows whose repeating timer is running.
    pub fn running_timers(&self) -> impl Iterator<Item = &WindowId> {
        self.timers.iter()
    }

    /// Current drag target, if a gesture is active.
    pub fn drag_target(&self) -> Option<&DragTarget> {
        self.drag.target()
    }
}
