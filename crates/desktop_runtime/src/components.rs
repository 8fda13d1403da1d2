//! Desktop shell UI composition and interaction surfaces.

mod menus;
mod taskbar;
mod window;

use leptos::*;
use wasm_bindgen::JsCast;

use self::{
    menus::{DesktopContextMenu, StartMenu},
    taskbar::Taskbar,
    window::{ClosingWindow, DesktopWindow},
};

use crate::{
    host,
    model::{DesktopIcon, PointerPosition, WindowId},
    reducer::{DesktopAction, DragTarget},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

const BSOD_TEXT: &str = "A problem has been detected and Windows has been shut down to prevent damage to your computer.\n\nDRIVER_IRQL_NOT_LESS_OR_EQUAL\n\nIf this is the first time you've seen this stop error screen, restart your computer.\n\nTechnical information:\n\n*** STOP: 0x000000D1 (0x0000000C, 0x00000002, 0x00000000, 0xF86B5A89)\n\nPress ESC to restart.";

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn is_text_field(ev: &web_sys::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|element| matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA"))
        .unwrap_or(false)
}

fn is_desktop_shortcut(ev: &web_sys::KeyboardEvent) -> bool {
    let key = ev.key();
    (ev.alt_key() && key == "F4")
        || (ev.ctrl_key() && (key.eq_ignore_ascii_case("w") || key.eq_ignore_ascii_case("s")))
        || key == "Meta"
        || key == "OS"
}

#[component]
/// Renders the full desktop shell UI. Must be mounted under [`DesktopProvider`].
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let crashed = create_memo(move |_| runtime.with(|rt| rt.crashed()));

    let key_listener = window_event_listener(ev::keydown, move |ev| {
        if runtime.runtime.with_value(|rt| rt.crashed()) {
            if ev.key() == "Escape" {
                ev.prevent_default();
                runtime.dispatch_action(DesktopAction::Reset);
            }
            return;
        }
        if is_text_field(&ev) && !is_desktop_shortcut(&ev) {
            return;
        }
        if is_desktop_shortcut(&ev) || ev.key().starts_with("Arrow") {
            ev.prevent_default();
        }
        runtime.dispatch_action(DesktopAction::KeyPress {
            key: ev.key(),
            alt: ev.alt_key(),
            ctrl: ev.ctrl_key(),
        });
    });
    on_cleanup(move || key_listener.remove());

    let icons = create_memo(move |_| runtime.with(|rt| rt.icons().icons().to_vec()));
    let window_ids = create_memo(move |_| {
        runtime.with(|rt| {
            rt.windows()
                .windows()
                .iter()
                .map(|w| w.id.clone())
                .collect::<Vec<_>>()
        })
    });
    let closing = create_memo(move |_| runtime.with(|rt| rt.windows().closing().to_vec()));
    let dismiss_menus = move |_| {
        let menus_open = runtime
            .runtime
            .with_value(|rt| rt.start_menu_open() || rt.context_menu().is_some());
        if menus_open {
            runtime.dispatch_action(DesktopAction::DismissMenus);
        }
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            on:click=dismiss_menus
        >
            <div
                class="desktop"
                on:mousedown=move |ev: web_sys::MouseEvent| {
                    if ev.button() == 0 {
                        runtime.dispatch_action(DesktopAction::ClearIconSelection);
                    }
                }
                on:contextmenu=move |ev: web_sys::MouseEvent| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::OpenContextMenu {
                        pointer: pointer_from_mouse_event(&ev),
                    });
                }
            >
                <For each=move || icons.get() key=|icon| (icon.id.clone(), icon.position, icon.selected) let:icon>
                    <DesktopIconView icon />
                </For>
            </div>

            <div class="window-layer">
                <For each=move || window_ids.get() key=|id| id.clone() let:window_id>
                    <DesktopWindow window_id />
                </For>
                <For each=move || closing.get() key=|w| w.id.clone() let:record>
                    <ClosingWindow record />
                </For>
            </div>

            <Companion />
            <StartMenu />
            <DesktopContextMenu />
            <Taskbar />

            <Show when=move || crashed.get() fallback=|| ()>
                <div class="bsod" on:click=move |ev| stop_mouse_event(&ev)>
                    <pre>{BSOD_TEXT}</pre>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn DesktopIconView(icon: DesktopIcon) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let drag_id = icon.id.clone();
    let open_id = icon.id.clone();
    let style = format!("left:{}px;top:{}px;", icon.position.left, icon.position.top);
    let class = if icon.selected {
        "desktop-icon selected"
    } else {
        "desktop-icon"
    };

    view! {
        <div
            class=class
            style=style
            on:pointerdown=move |ev: web_sys::PointerEvent| {
                if ev.button() != 0 {
                    return;
                }
                ev.stop_propagation();
                host::begin_pointer_drag(
                    runtime,
                    DragTarget::Icon(drag_id.clone()),
                    PointerPosition { x: ev.client_x(), y: ev.client_y() },
                );
            }
            on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            on:dblclick=move |ev: web_sys::MouseEvent| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::OpenById { window_id: open_id.clone() });
            }
        >
            <img src=icon.icon.clone() alt="" draggable="false" />
            <span>{icon.title.clone()}</span>
        </div>
    }
}

#[component]
fn Companion() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let companion = create_memo(move |_| runtime.with(|rt| rt.companion().clone()));

    view! {
        <div
            class="companion"
            style=move || {
                let position = companion.get().position;
                format!("left:{}px;top:{}px;", position.left, position.top)
            }
            on:pointerdown=move |ev: web_sys::PointerEvent| {
                if ev.button() != 0 {
                    return;
                }
                ev.stop_propagation();
                host::begin_pointer_drag(
                    runtime,
                    DragTarget::Companion,
                    PointerPosition { x: ev.client_x(), y: ev.client_y() },
                );
            }
        >
            <Show when=move || companion.get().bubble.is_some() fallback=|| ()>
                <div
                    class="companion-bubble"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        runtime.dispatch_action(DesktopAction::DismissCompanionBubble);
                    }
                >
                    {move || companion.get().bubble.unwrap_or_default()}
                </div>
            </Show>
            <img class="companion-sprite" src="images/companion.gif" alt="" draggable="false" />
        </div>
    }
}

/// Dispatches the app input carried by a DOM event raised inside a window body.
fn route_body_event(runtime: DesktopRuntimeContext, window_id: &WindowId, input: desktop_app_contract::AppInput) {
    runtime.dispatch_action(DesktopAction::AppInput {
        window_id: window_id.clone(),
        input,
    });
    host::focus_window_input(window_id);
}
