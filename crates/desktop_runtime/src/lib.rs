pub mod apps;
pub mod components;
pub mod config;
pub mod drag;
pub mod effect_executor;
pub mod explorer;
pub mod grid;
mod host;
pub mod icons;
pub mod lifecycle;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use apps::{AppCatalog, AppDescriptor};
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, DesktopConfig};
pub use model::*;
pub use reducer::{DesktopAction, DesktopRuntime, RuntimeEffect};
pub use window_manager::WindowManager;
