use desktop_runtime::{DesktopConfig, DesktopProvider, DesktopShell};
use leptos::*;
use platform_host::HostServices;

#[component]
pub fn SiteApp(host_services: HostServices, config: DesktopConfig) -> impl IntoView {
    view! {
        <main class="site-root">
            <DesktopProvider host_services config>
                <DesktopShell />
            </DesktopProvider>
        </main>
    }
}
