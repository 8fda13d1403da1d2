//! Core desktop data model: geometry, windows, taskbar entries, and desktop icons.

use serde::{Deserialize, Serialize};

pub use desktop_app_contract::WindowId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Top-left position in desktop pixels.
pub struct Point {
    /// Distance from the left edge.
    pub left: i32,
    /// Distance from the top edge.
    pub top: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// Returns this point moved by a delta.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Width and height in pixels.
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Window position plus size.
pub struct Geometry {
    /// Top-left corner.
    pub position: Point,
    /// Outer size.
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Browser viewport size, taskbar included.
pub struct Viewport {
    /// Viewport width.
    pub width: i32,
    /// Viewport height.
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Focus state of a window. Maximization is tracked separately.
pub enum WindowState {
    /// The single focused window.
    Active,
    /// Visible but not focused.
    Inactive,
    /// Hidden; reachable through its taskbar entry.
    Minimized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A live window tracked by the window manager.
pub struct WindowRecord {
    /// Unique key; one live window per id.
    pub id: WindowId,
    /// Title bar text.
    pub title: String,
    /// Icon reference shown in the title bar and taskbar.
    pub icon: String,
    /// Current geometry.
    pub geometry: Geometry,
    /// Stacking order; higher is on top.
    pub z_order: u64,
    /// Focus state.
    pub state: WindowState,
    /// Whether the window fills the desktop.
    pub maximized: bool,
    /// Geometry captured on maximize, restored on the next toggle.
    pub saved_geometry: Option<Geometry>,
}

impl WindowRecord {
    /// Returns `true` when the window is the focused one.
    pub fn is_active(&self) -> bool {
        self.state == WindowState::Active
    }

    /// Returns `true` when the window is hidden.
    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Taskbar button mirroring exactly one live window.
pub struct TaskbarEntry {
    /// Window the button toggles.
    pub window_id: WindowId,
    /// Button label.
    pub title: String,
    /// Button icon.
    pub icon: String,
    /// Whether the button shows active styling.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Desktop shortcut that opens a window by id.
pub struct DesktopIcon {
    /// Window content id opened on activation.
    pub id: WindowId,
    /// Label under the icon.
    pub title: String,
    /// Icon image reference.
    pub icon: String,
    /// Current position.
    pub position: Point,
    /// Whether the icon is the selected one.
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Window edge grabbed for resizing.
pub enum ResizeEdge {
    /// Right edge: width only.
    Right,
    /// Bottom edge: height only.
    Bottom,
    /// Bottom-right corner: width and height.
    BottomRight,
}

impl ResizeEdge {
    /// Keeps only the delta components this edge affects.
    pub const fn mask(self, dw: i32, dh: i32) -> (i32, i32) {
        match self {
            Self::Right => (dw, 0),
            Self::Bottom => (0, dh),
            Self::BottomRight => (dw, dh),
        }
    }

    /// CSS class suffix of the resize handle.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Right => "r",
            Self::Bottom => "b",
            Self::BottomRight => "rb",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Pointer sample in client coordinates.
pub struct PointerPosition {
    /// Client X.
    pub x: i32,
    /// Client Y.
    pub y: i32,
}
