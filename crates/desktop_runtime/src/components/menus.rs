use super::*;
use crate::apps::AppDescriptor;

fn open_item(runtime: DesktopRuntimeContext, window_id: WindowId) -> impl Fn(web_sys::MouseEvent) + Clone {
    move |ev| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::OpenById {
            window_id: window_id.clone(),
        });
    }
}

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let open = create_memo(move |_| runtime.with(|rt| rt.start_menu_open()));
    let launcher: Vec<AppDescriptor> = runtime
        .runtime
        .with_value(|rt| rt.catalog().launcher_entries().cloned().collect());

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <nav
                class="start-menu"
                role="menu"
                aria-label="Start menu"
                on:click=move |ev| ev.stop_propagation()
            >
                <header class="start-menu-header">"User"</header>
                <ul class="start-menu-items">
                    {launcher
                        .iter()
                        .map(|app| {
                            view! {
                                <li role="menuitem" on:click=open_item(runtime, app.id.clone())>
                                    <img src=app.icon.clone() alt="" />
                                    <span>{app.title.clone()}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <footer class="start-menu-footer">
                    <button
                        class="shut-down"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::TriggerCrash);
                        }
                    >
                        "Shut Down"
                    </button>
                </footer>
            </nav>
        </Show>
    }
}

#[component]
pub(super) fn DesktopContextMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let anchor = create_memo(move |_| runtime.with(|rt| rt.context_menu()));

    move || {
        anchor.get().map(|at| {
            view! {
                <ul
                    class="context-menu"
                    role="menu"
                    style=format!("left:{}px;top:{}px;", at.left, at.top)
                    on:click=move |ev| ev.stop_propagation()
                    on:contextmenu=move |ev: web_sys::MouseEvent| stop_mouse_event(&ev)
                >
                    <li
                        role="menuitem"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::ArrangeIcons);
                            runtime.dispatch_action(DesktopAction::DismissMenus);
                        }
                    >
                        "Arrange Icons"
                    </li>
                    <li
                        role="menuitem"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::ShowDesktop);
                            runtime.dispatch_action(DesktopAction::DismissMenus);
                        }
                    >
                        "Show Desktop"
                    </li>
                    <li class="separator" role="separator"></li>
                    <li role="menuitem" on:click=open_item(runtime, WindowId::trusted("about"))>
                        "Properties"
                    </li>
                </ul>
            }
        })
    }
}
