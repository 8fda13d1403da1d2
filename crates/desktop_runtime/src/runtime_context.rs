//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived [`DesktopRuntime`] container, the runtime effect queue, and
//! the app timer handles. UI composition stays in [`crate::components`].

use std::collections::BTreeMap;

use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::*;
use platform_host::{unix_time_ms_now, HostServices};

use crate::{
    config::DesktopConfig,
    drag::ListenerScope,
    effect_executor, host,
    model::{PointerPosition, WindowId},
    reducer::{DesktopAction, DesktopRuntime, DragTarget, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<HostServices>,
    /// Single-writer desktop state.
    pub runtime: StoredValue<DesktopRuntime>,
    /// Bumped after every mutation; views track it to re-read [`Self::runtime`].
    pub revision: RwSignal<u64>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Repeating app timers keyed by owning window.
    pub timers: StoredValue<BTreeMap<WindowId, IntervalHandle>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Starts a drag gesture owning `listeners` until pointer-up.
    pub fn begin_drag(
        &self,
        target: DragTarget,
        pointer: PointerPosition,
        listeners: Box<dyn ListenerScope>,
    ) {
        let effects = self
            .runtime
            .try_update_value(|rt| rt.begin_drag(target, pointer, listeners))
            .unwrap_or_default();
        commit(self.revision, self.effects, effects);
    }

    /// Reads the runtime, subscribing the caller to changes.
    pub fn with<R>(&self, f: impl FnOnce(&DesktopRuntime) -> R) -> R {
        let _revision = self.revision.get();
        self.runtime.with_value(f)
    }
}

fn commit(
    revision: RwSignal<u64>,
    effects: RwSignal<Vec<RuntimeEffect>>,
    new_effects: Vec<RuntimeEffect>,
) {
    revision.update(|revision| *revision += 1);
    if !new_effects.is_empty() {
        let mut queue = effects.get_untracked();
        queue.extend(new_effects);
        effects.set(queue);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and installs the executor.
pub fn DesktopProvider(
    /// Injected browser host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Desktop tunables.
    #[prop(optional)]
    config: DesktopConfig,
    children: Children,
) -> impl IntoView {
    let viewport = host::desktop_viewport();
    let runtime = store_value(DesktopRuntime::new(config, viewport, unix_time_ms_now()));
    let host_services = store_value(host_services);
    let revision = create_rw_signal(0_u64);
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let timers = store_value(BTreeMap::<WindowId, IntervalHandle>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let new_effects = runtime
            .try_update_value(|rt| rt.dispatch(action))
            .unwrap_or_default();
        commit(revision, effects, new_effects);
    });

    let context = DesktopRuntimeContext {
        host: host_services,
        runtime,
        revision,
        effects,
        timers,
        dispatch,
    };

    provide_context(context);
    effect_executor::install(context);
    host::install_viewport_listener(context);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
