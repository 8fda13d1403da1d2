use desktop_runtime::{
    drag::DetachedListeners,
    grid::{self, GridMetrics},
    reducer::DragTarget,
    DesktopAction, DesktopConfig, DesktopRuntime, Point, PointerPosition, Viewport, WindowId,
    WindowState,
};
use pretty_assertions::assert_eq;

fn runtime() -> DesktopRuntime {
    DesktopRuntime::new(DesktopConfig::default(), Viewport::default(), 7)
}

fn open(rt: &mut DesktopRuntime, id: &str) {
    rt.dispatch(DesktopAction::OpenById {
        window_id: WindowId::trusted(id),
    });
}

fn z_of(rt: &DesktopRuntime, id: &str) -> u64 {
    rt.windows()
        .window(&WindowId::trusted(id))
        .map(|w| w.z_order)
        .unwrap_or_default()
}

fn metrics() -> GridMetrics {
    DesktopConfig::default().grid_metrics()
}

#[test]
fn repeated_open_keeps_one_window_and_one_taskbar_entry() {
    let mut rt = runtime();
    for _ in 0..4 {
        open(&mut rt, "calculator");
    }
    assert_eq!(rt.windows().windows().len(), 1);
    assert_eq!(rt.windows().taskbar().len(), 1);
}

#[test]
fn focus_raises_window_above_later_ones() {
    let mut rt = runtime();
    open(&mut rt, "calculator");
    open(&mut rt, "notepad-enhanced");
    open(&mut rt, "cmd");
    let before = z_of(&rt, "calculator");

    rt.dispatch(DesktopAction::FocusWindow {
        window_id: WindowId::trusted("calculator"),
    });

    let active: Vec<_> = rt
        .windows()
        .windows()
        .iter()
        .filter(|w| w.state == WindowState::Active)
        .map(|w| w.id.as_str().to_string())
        .collect();
    assert_eq!(active, vec!["calculator".to_string()]);
    let after = z_of(&rt, "calculator");
    assert!(after > before);
    assert!(after > z_of(&rt, "notepad-enhanced"));
    assert!(after > z_of(&rt, "cmd"));
}

#[test]
fn reopening_after_close_creates_a_fresh_window_at_the_cascade_origin() {
    let mut rt = runtime();
    open(&mut rt, "calculator");
    let first_z = z_of(&rt, "calculator");
    rt.dispatch(DesktopAction::CloseWindow {
        window_id: WindowId::trusted("calculator"),
    });
    assert!(rt.windows().window(&WindowId::trusted("calculator")).is_none());
    assert!(rt.windows().taskbar().is_empty());

    open(&mut rt, "calculator");
    let window = rt
        .windows()
        .window(&WindowId::trusted("calculator"))
        .cloned()
        .expect("reopened");
    assert_eq!(window.geometry.position, Point::new(100, 100));
    assert!(window.z_order > first_z);
    assert!(rt
        .window_body(&WindowId::trusted("calculator"))
        .unwrap_or_default()
        .contains(r#"<div class="calc-display">0</div>"#));
}

#[test]
fn minimize_then_toggle_restores_and_toggle_again_minimizes() {
    let mut rt = runtime();
    open(&mut rt, "cmd");
    let id = WindowId::trusted("cmd");

    rt.dispatch(DesktopAction::MinimizeWindow { window_id: id.clone() });
    rt.dispatch(DesktopAction::ToggleTaskbarWindow { window_id: id.clone() });
    assert_eq!(rt.windows().window(&id).map(|w| w.state), Some(WindowState::Active));

    rt.dispatch(DesktopAction::ToggleTaskbarWindow { window_id: id.clone() });
    assert_eq!(rt.windows().window(&id).map(|w| w.state), Some(WindowState::Minimized));
}

#[test]
fn maximize_twice_restores_exact_geometry() {
    let mut rt = runtime();
    open(&mut rt, "notepad-enhanced");
    let id = WindowId::trusted("notepad-enhanced");
    rt.dispatch(DesktopAction::ResizeWindow {
        window_id: id.clone(),
        edge: desktop_runtime::ResizeEdge::BottomRight,
        dw: 13,
        dh: -7,
    });
    let before = rt.windows().window(&id).map(|w| w.geometry);

    rt.dispatch(DesktopAction::MaximizeWindow { window_id: id.clone() });
    let maximized = rt.windows().window(&id).cloned().expect("open");
    assert!(maximized.maximized);
    assert_eq!(maximized.geometry.size.height, 768 - 48);

    rt.dispatch(DesktopAction::MaximizeWindow { window_id: id.clone() });
    let restored = rt.windows().window(&id).cloned().expect("open");
    assert!(!restored.maximized);
    assert_eq!(Some(restored.geometry), before);
    assert_eq!(restored.saved_geometry, None);
}

#[test]
fn five_rows_put_index_seven_in_second_column_third_row() {
    let metrics = metrics();
    let height = 563;
    assert_eq!(grid::rows_per_column(height, &metrics), 5);
    assert_eq!(grid::compute_slot(7, height, &metrics), Point::new(15 + 90, 15 + 200));
}

#[test]
fn released_icon_lands_on_a_grid_slot() {
    let mut rt = runtime();
    let id = WindowId::trusted("my-computer");
    rt.begin_drag(
        DragTarget::Icon(id.clone()),
        PointerPosition { x: 20, y: 20 },
        Box::new(DetachedListeners),
    );
    for (x, y) in [(80, 70), (300, 260), (5000, 5000)] {
        rt.dispatch(DesktopAction::PointerMove {
            pointer: PointerPosition { x, y },
        });
    }
    rt.dispatch(DesktopAction::PointerUp);

    let landed = rt.icons().icon(&id).map(|icon| icon.position).expect("registered");
    let viewport = Viewport::default();
    let metrics = metrics();
    let slots = grid::rows_per_column(viewport.height, &metrics) as usize * 16;
    let on_grid = (0..slots).any(|index| grid::compute_slot(index, viewport.height, &metrics) == landed);
    assert!(on_grid, "{landed:?} is not a grid slot");
    assert!(landed.left + metrics.icon_footprint <= viewport.width);
    assert!(landed.top + metrics.icon_footprint <= viewport.height - metrics.taskbar_height);
    assert!(rt.drag_target().is_none());
}

#[test]
fn calculator_window_adds_and_survives_division_by_zero() {
    let mut rt = runtime();
    open(&mut rt, "calculator");
    let id = WindowId::trusted("calculator");
    let press = |rt: &mut DesktopRuntime, key: &str| {
        rt.dispatch(DesktopAction::AppInput {
            window_id: id.clone(),
            input: desktop_app_contract::AppInput::Button(key.to_string()),
        });
    };

    for key in ["7", "+", "3", "="] {
        press(&mut rt, key);
    }
    assert!(rt.window_body(&id).unwrap_or_default().contains(">10</div>"));

    for key in ["C", "1", "/", "0", "="] {
        press(&mut rt, key);
    }
    assert!(rt.window_body(&id).unwrap_or_default().contains(">Error</div>"));
}
