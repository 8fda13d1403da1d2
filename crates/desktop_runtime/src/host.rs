//! Shell-side effect execution and browser environment queries.
//!
//! Host service effects run in [`crate::effect_executor`]; this module handles the effects that
//! touch browser timers and DOM focus, plus viewport and drag-listener plumbing.

use std::time::Duration;

use leptos::leptos_dom::helpers::WindowListenerHandle;
use leptos::{ev, logging, set_interval_with_handle, set_timeout, window_event_listener};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{
    drag::ListenerScope,
    model::{PointerPosition, Viewport, WindowId},
    reducer::{DesktopAction, DragTarget, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

/// Executes a timer, animation, or focus effect.
pub(crate) fn run_shell_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::StartAppTimer {
            window_id,
            interval_ms,
        } => start_app_timer(runtime, window_id, interval_ms),
        RuntimeEffect::StopAppTimer(window_id) => stop_app_timer(runtime, &window_id),
        RuntimeEffect::FinishCloseAfter {
            window_id,
            delay_ms,
        } => set_timeout(
            move || runtime.dispatch_action(DesktopAction::FinishCloseAnimation { window_id }),
            Duration::from_millis(u64::from(delay_ms)),
        ),
        RuntimeEffect::FocusWindowInput(window_id) => focus_window_input(&window_id),
        _ => {}
    }
}

fn start_app_timer(runtime: DesktopRuntimeContext, window_id: WindowId, interval_ms: u32) {
    stop_app_timer(runtime, &window_id);
    let tick_id = window_id.clone();
    let handle = set_interval_with_handle(
        move || {
            runtime.dispatch_action(DesktopAction::AppTick {
                window_id: tick_id.clone(),
            })
        },
        Duration::from_millis(u64::from(interval_ms)),
    );
    match handle {
        Ok(handle) => runtime.timers.update_value(|timers| {
            timers.insert(window_id, handle);
        }),
        Err(err) => logging::warn!("app timer for `{window_id}` failed to start: {err:?}"),
    }
}

fn stop_app_timer(runtime: DesktopRuntimeContext, window_id: &WindowId) {
    let handle = runtime
        .timers
        .try_update_value(|timers| timers.remove(window_id))
        .flatten();
    if let Some(handle) = handle {
        handle.clear();
    }
}

/// Selector of the primary input rendered inside a window body.
pub(crate) fn primary_input_selector(window_id: &WindowId) -> String {
    format!(
        "#{id} [data-app-text], #{id} [data-app-submit]",
        id = window_dom_id(window_id)
    )
}

/// DOM id of a window's root element.
pub(crate) fn window_dom_id(window_id: &WindowId) -> String {
    format!("win-{window_id}")
}

/// Focuses the window's primary text field with the caret at the end.
pub(crate) fn focus_window_input(window_id: &WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(Some(element)) = document.query_selector(&primary_input_selector(window_id)) else {
            return;
        };
        if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            let _ = area.focus();
            let end = area.value().encode_utf16().count() as u32;
            let _ = area.set_selection_range(end, end);
        } else if let Some(input) = element.dyn_ref::<web_sys::HtmlElement>() {
            let _ = input.focus();
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}

/// Current browser viewport, taskbar included.
pub(crate) fn desktop_viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback| {
                value
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(fallback)
            };
            return Viewport {
                width: read(window.inner_width(), 1024),
                height: read(window.inner_height(), 768),
            };
        }
    }
    Viewport::default()
}

/// Re-arranges icons and re-fits maximized windows whenever the browser window resizes.
pub(crate) fn install_viewport_listener(runtime: DesktopRuntimeContext) {
    // Never removed; the desktop lives as long as the page.
    let _ = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_action(DesktopAction::ViewportResized {
            viewport: desktop_viewport(),
        });
    });
}

struct DocumentDragListeners(Vec<WindowListenerHandle>);

impl ListenerScope for DocumentDragListeners {
    fn release(&mut self) {
        for handle in self.0.drain(..) {
            handle.remove();
        }
    }
}

impl Drop for DocumentDragListeners {
    fn drop(&mut self) {
        self.release();
    }
}

/// Installs document-level move/up listeners and starts a drag gesture on `target`.
pub(crate) fn begin_pointer_drag(
    runtime: DesktopRuntimeContext,
    target: DragTarget,
    pointer: PointerPosition,
) {
    let on_move = window_event_listener(ev::pointermove, move |ev| {
        runtime.dispatch_action(DesktopAction::PointerMove {
            pointer: PointerPosition {
                x: ev.client_x(),
                y: ev.client_y(),
            },
        });
    });
    let on_up = window_event_listener(ev::pointerup, move |_| {
        runtime.dispatch_action(DesktopAction::PointerUp);
    });
    runtime.begin_drag(
        target,
        pointer,
        Box::new(DocumentDragListeners(vec![on_move, on_up])),
    );
}
