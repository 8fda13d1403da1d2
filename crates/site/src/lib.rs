mod web_app;

pub use web_app::SiteApp;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    let host_services = platform_host_web::build_host_services();
    leptos::spawn_local(async move {
        let config = desktop_runtime::DesktopConfig::load(host_services.prefs.as_ref()).await;
        leptos::mount_to_body(move || leptos::view! { <SiteApp host_services config /> })
    });
}
