use std::time::Duration;

use platform_host::{clock_time_label, unix_time_ms_now};

use super::*;
use crate::model::TaskbarEntry;

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let entries = create_memo(move |_| runtime.with(|rt| rt.windows().taskbar().to_vec()));
    let start_open = create_memo(move |_| runtime.with(|rt| rt.start_menu_open()));
    let sound_enabled = create_memo(move |_| runtime.with(|rt| rt.sound_enabled()));

    let clock = create_rw_signal(clock_time_label(unix_time_ms_now()));
    if let Ok(interval) = set_interval_with_handle(
        move || clock.set(clock_time_label(unix_time_ms_now())),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <footer class="taskbar" on:contextmenu=move |ev: web_sys::MouseEvent| stop_mouse_event(&ev)>
            <button
                class=move || if start_open.get() { "start-button pressed" } else { "start-button" }
                aria-haspopup="menu"
                aria-expanded=move || start_open.get().to_string()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::ToggleStartMenu);
                }
            >
                <img src="images/start.png" alt="" />
                "start"
            </button>

            <div class="taskbar-entries" role="toolbar" aria-label="Open windows">
                <For each=move || entries.get() key=|entry| (entry.window_id.clone(), entry.active, entry.title.clone()) let:entry>
                    <TaskbarButton entry />
                </For>
            </div>

            <div class="taskbar-tray">
                <button
                    class="tray-button"
                    aria-label=move || if sound_enabled.get() { "Mute sounds" } else { "Unmute sounds" }
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        runtime.dispatch_action(DesktopAction::ToggleSound);
                    }
                >
                    {move || if sound_enabled.get() { "\u{1F50A}" } else { "\u{1F507}" }}
                </button>
                <span class="taskbar-clock">{move || clock.get()}</span>
                <button
                    class="show-desktop"
                    aria-label="Show desktop"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        runtime.dispatch_action(DesktopAction::ShowDesktop);
                    }
                ></button>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarButton(entry: TaskbarEntry) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_id = entry.window_id.clone();

    view! {
        <button
            class=if entry.active { "taskbar-entry active" } else { "taskbar-entry" }
            aria-pressed=entry.active.to_string()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow {
                    window_id: window_id.clone(),
                });
            }
        >
            <img src=entry.icon.clone() alt="" />
            <span>{entry.title.clone()}</span>
        </button>
    }
}
