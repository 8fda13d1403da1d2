use desktop_app_contract::{AppInput, BoundText};

use super::*;
use crate::model::{ResizeEdge, WindowRecord};

fn window_style(record: &WindowRecord) -> String {
    let geometry = record.geometry;
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        geometry.position.left,
        geometry.position.top,
        geometry.size.width,
        geometry.size.height,
        record.z_order
    )
}

fn window_class(record: &WindowRecord) -> String {
    format!(
        "window{}{}{}",
        if record.is_active() { " active" } else { "" },
        if record.is_minimized() { " minimized" } else { "" },
        if record.maximized { " maximized" } else { "" },
    )
}

fn event_element(ev: &web_sys::Event) -> Option<web_sys::Element> {
    ev.target()?.dyn_into::<web_sys::Element>().ok()
}

fn closest_attribute(ev: &web_sys::MouseEvent, attribute: &str) -> Option<String> {
    event_element(ev)?
        .closest(&format!("[{attribute}]"))
        .ok()
        .flatten()?
        .get_attribute(attribute)
}

fn body_text(ev: &web_sys::Event) -> Option<String> {
    let area = event_element(ev)
        .filter(|el| el.has_attribute("data-app-text"))?
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .ok()?;
    Some(area.value())
}

fn take_submitted_line(ev: &web_sys::KeyboardEvent) -> Option<String> {
    if ev.key() != "Enter" {
        return None;
    }
    let input = event_element(ev)
        .filter(|el| el.has_attribute("data-app-submit"))?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    ev.prevent_default();
    let line = input.value();
    input.set_value("");
    Some(line)
}

/// Writes live text into the body; field values are only touched when they differ.
fn apply_bindings(body: &web_sys::Element, bindings: &[BoundText]) {
    for binding in bindings {
        let selector = format!("[data-app-bind=\"{}\"]", binding.name);
        let Ok(Some(element)) = body.query_selector(&selector) else {
            continue;
        };
        if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            if area.value() != binding.value {
                area.set_value(&binding.value);
            }
        } else if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
            if input.value() != binding.value {
                input.set_value(&binding.value);
            }
        } else if element.text_content().as_deref() != Some(binding.value.as_str()) {
            element.set_text_content(Some(&binding.value));
        }
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let Some(initial) = runtime
        .runtime
        .with_value(|rt| rt.windows().window(&window_id).cloned())
    else {
        return ().into_view();
    };

    let record_id = window_id.clone();
    let record = create_memo(move |_| runtime.with(|rt| rt.windows().window(&record_id).cloned()));
    let body_id = window_id.clone();
    let body = create_memo(move |_| runtime.with(|rt| rt.window_body(&body_id).unwrap_or_default()));
    let bind_id = window_id.clone();
    let bindings = create_memo(move |_| runtime.with(|rt| rt.window_bindings(&bind_id)));
    let maximized = create_memo(move |_| record.get().map(|w| w.maximized).unwrap_or(false));

    // Markup is replaced only when it changes; bindings are re-applied on top of it.
    let body_ref = create_node_ref::<html::Div>();
    create_effect(move |rendered: Option<Option<String>>| {
        let markup = body.get();
        let bindings = bindings.get();
        let element = body_ref.get()?;
        if rendered.flatten().as_ref() != Some(&markup) {
            element.set_inner_html(&markup);
        }
        apply_bindings(&element, &bindings);
        Some(markup)
    });

    let (focus_id, move_id, dbl_id, min_id, max_id, close_id) = (
        window_id.clone(),
        window_id.clone(),
        window_id.clone(),
        window_id.clone(),
        window_id.clone(),
        window_id.clone(),
    );
    let (click_id, input_id, submit_id, handle_id) = (
        window_id.clone(),
        window_id.clone(),
        window_id.clone(),
        window_id.clone(),
    );

    view! {
        <section
            id=host::window_dom_id(&window_id)
            class=move || record.get().map(|w| window_class(&w)).unwrap_or_default()
            style=move || record.get().map(|w| window_style(&w)).unwrap_or_default()
            role="dialog"
            aria-label=initial.title.clone()
            on:pointerdown=move |_| {
                let active = record.get_untracked().map(|w| w.is_active()).unwrap_or(true);
                if !active {
                    runtime.dispatch_action(DesktopAction::FocusWindow { window_id: focus_id.clone() });
                }
            }
        >
            <header
                class="title-bar"
                on:pointerdown=move |ev: web_sys::PointerEvent| {
                    if ev.button() != 0 {
                        return;
                    }
                    ev.prevent_default();
                    ev.stop_propagation();
                    host::begin_pointer_drag(
                        runtime,
                        DragTarget::Window(move_id.clone()),
                        PointerPosition { x: ev.client_x(), y: ev.client_y() },
                    );
                }
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::MaximizeWindow { window_id: dbl_id.clone() });
                }
            >
                <img class="title-bar-icon" src=initial.icon.clone() alt="" />
                <span class="title-bar-text">{initial.title.clone()}</span>
                <div class="title-bar-controls">
                    <button
                        aria-label="Minimize"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id: min_id.clone() });
                        }
                    ></button>
                    <button
                        aria-label=move || if maximized.get() { "Restore" } else { "Maximize" }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::MaximizeWindow { window_id: max_id.clone() });
                        }
                    ></button>
                    <button
                        aria-label="Close"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseWindow { window_id: close_id.clone() });
                        }
                    ></button>
                </div>
            </header>
            <div
                class="window-body"
                node_ref=body_ref
                on:click=move |ev| {
                    if let Some(button) = closest_attribute(&ev, "data-app-button") {
                        route_body_event(runtime, &click_id, AppInput::Button(button));
                    }
                }
                on:input=move |ev| {
                    // No refocus: the field already has focus and its caret must stay put.
                    if let Some(text) = body_text(&ev) {
                        runtime.dispatch_action(DesktopAction::AppInput {
                            window_id: input_id.clone(),
                            input: AppInput::Text(text),
                        });
                    }
                }
                on:keydown=move |ev| {
                    if let Some(line) = take_submitted_line(&ev) {
                        route_body_event(runtime, &submit_id, AppInput::Text(line));
                    }
                }
            ></div>
            {move || {
                (!maximized.get()).then(|| {
                    [ResizeEdge::Right, ResizeEdge::Bottom, ResizeEdge::BottomRight]
                        .into_iter()
                        .map(|edge| view! { <WindowResizeHandle window_id=handle_id.clone() edge /> })
                        .collect_view()
                })
            }}
        </section>
    }
    .into_view()
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    view! {
        <div
            class=format!("resize-handle resize-{}", edge.token())
            on:pointerdown=move |ev: web_sys::PointerEvent| {
                if ev.button() != 0 {
                    return;
                }
                ev.prevent_default();
                ev.stop_propagation();
                host::begin_pointer_drag(
                    runtime,
                    DragTarget::Resize(window_id.clone(), edge),
                    PointerPosition { x: ev.client_x(), y: ev.client_y() },
                );
            }
        ></div>
    }
}

#[component]
pub(super) fn ClosingWindow(record: WindowRecord) -> impl IntoView {
    view! {
        <section class="window closing" style=window_style(&record) aria-hidden="true">
            <header class="title-bar">
                <span class="title-bar-text">{record.title.clone()}</span>
            </header>
        </section>
    }
}
