//! Desktop icon layout: column-major grid arrangement, single selection, drag-then-snap.

use crate::grid::{self, GridMetrics};
use crate::model::{DesktopIcon, Point, Viewport, WindowId};

/// Owns the desktop icons in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLayout {
    icons: Vec<DesktopIcon>,
    metrics: GridMetrics,
    viewport: Viewport,
}

impl IconLayout {
    /// Creates an empty layout for `viewport`.
    pub fn new(metrics: GridMetrics, viewport: Viewport) -> Self {
        Self {
            icons: Vec::new(),
            metrics,
            viewport,
        }
    }

    /// Appends a shortcut and re-arranges the grid. Returns `false` for a duplicate id.
    pub fn register(
        &mut self,
        id: WindowId,
        title: impl Into<String>,
        icon: impl Into<String>,
    ) -> bool {
        if self.icon(&id).is_some() {
            return false;
        }
        self.icons.push(DesktopIcon {
            id,
            title: title.into(),
            icon: icon.into(),
            position: Point::default(),
            selected: false,
        });
        self.arrange_all();
        true
    }

    /// Places every icon at its insertion-order slot, discarding manual placement.
    pub fn arrange_all(&mut self) {
        let height = self.viewport.height;
        for (index, icon) in self.icons.iter_mut().enumerate() {
            icon.position = grid::compute_slot(index, height, &self.metrics);
        }
    }

    /// Records a new viewport and re-arranges.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.arrange_all();
    }

    /// Makes `id` the only selected icon.
    pub fn select(&mut self, id: &WindowId) -> bool {
        if self.icon(id).is_none() {
            return false;
        }
        for icon in &mut self.icons {
            icon.selected = icon.id == *id;
        }
        true
    }

    /// Deselects every icon.
    pub fn clear_selection(&mut self) {
        for icon in &mut self.icons {
            icon.selected = false;
        }
    }

    /// Moves `id` freely by a pointer delta.
    pub fn drag_by(&mut self, id: &WindowId, dx: i32, dy: i32) -> bool {
        let Some(icon) = self.icons.iter_mut().find(|i| i.id == *id) else {
            return false;
        };
        icon.position = icon.position.offset(dx, dy);
        true
    }

    /// Snaps `id` to the nearest in-bounds grid cell and returns its new position.
    pub fn snap(&mut self, id: &WindowId) -> Option<Point> {
        let viewport = self.viewport;
        let metrics = self.metrics;
        let icon = self.icons.iter_mut().find(|i| i.id == *id)?;
        icon.position = grid::snap(icon.position, viewport, &metrics);
        Some(icon.position)
    }

    /// Icons in insertion order.
    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    /// Looks up an icon.
    pub fn icon(&self, id: &WindowId) -> Option<&DesktopIcon> {
        self.icons.iter().find(|i| i.id == *id)
    }

    /// The selected icon, if any.
    pub fn selected(&self) -> Option<&WindowId> {
        self.icons.iter().find(|i| i.selected).map(|i| &i.id)
    }
}
