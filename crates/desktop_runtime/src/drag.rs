//! Pointer-drag state machine shared by windows, resize handles, icons, and the companion.
//!
//! The controller knows nothing about what is being dragged. It turns pointer samples into
//! incremental deltas and owns the document-level listener registration for the gesture, so
//! listeners are released on every end path.

use std::fmt;

use thiserror::Error;

use crate::model::PointerPosition;

/// Document-level listener registration held for the duration of one drag gesture.
pub trait ListenerScope {
    /// Removes the listeners. Called exactly once per gesture.
    fn release(&mut self);
}

/// Listener scope for callers that do not install real listeners (tests, synthetic drags).
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedListeners;

impl ListenerScope for DetachedListeners {
    fn release(&mut self) {}
}

struct ListenerGuard(Option<Box<dyn ListenerScope>>);

impl ListenerGuard {
    fn release(&mut self) {
        if let Some(mut scope) = self.0.take() {
            scope.release();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by a drag end handler.
pub enum DragError {
    /// The dragged entity disappeared during the gesture.
    #[error("drag target `{0}` no longer exists")]
    TargetGone(String),
    /// The end handler rejected the final position.
    #[error("drag end handler failed: {0}")]
    Handler(String),
}

struct DragSession<T> {
    target: T,
    last: PointerPosition,
    listeners: ListenerGuard,
}

/// Tracks at most one in-flight drag gesture over targets of type `T`.
pub struct DragController<T> {
    session: Option<DragSession<T>>,
}

impl<T> Default for DragController<T> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<T: fmt::Debug> fmt::Debug for DragController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("target", &self.session.as_ref().map(|s| &s.target))
            .field("last", &self.session.as_ref().map(|s| s.last))
            .finish()
    }
}

impl<T: Clone> DragController<T> {
    /// Starts a gesture. Any gesture still in flight is dropped and its listeners released.
    pub fn begin(&mut self, target: T, pointer: PointerPosition, listeners: Box<dyn ListenerScope>) {
        self.cancel();
        self.session = Some(DragSession {
            target,
            last: pointer,
            listeners: ListenerGuard(Some(listeners)),
        });
    }

    /// Feeds a pointer sample and returns the delta since the previous sample.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> Option<(T, i32, i32)> {
        let session = self.session.as_mut()?;
        let dx = pointer.x - session.last.x;
        let dy = pointer.y - session.last.y;
        session.last = pointer;
        Some((session.target.clone(), dx, dy))
    }

    /// Ends the gesture: listeners are released first, then `on_end` runs.
    ///
    /// Returns the finished target, or `Ok(None)` when no gesture was active.
    ///
    /// # Errors
    ///
    /// Propagates the [`DragError`] returned by `on_end`. Listeners are already released.
    pub fn end<F>(&mut self, on_end: F) -> Result<Option<T>, DragError>
    where
        F: FnOnce(&T) -> Result<(), DragError>,
    {
        let Some(mut session) = self.session.take() else {
            return Ok(None);
        };
        session.listeners.release();
        on_end(&session.target)?;
        Ok(Some(session.target))
    }

    /// Abandons the gesture without running an end handler.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Current drag target, if a gesture is active.
    pub fn target(&self) -> Option<&T> {
        self.session.as_ref().map(|s| &s.target)
    }

    /// Returns `true` while a gesture is active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
