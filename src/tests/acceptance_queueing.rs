//! Acceptance: switch queueing discipline.
//!
//! One plan in flight at a time; later requests wait in FIFO order and
//! never touch a surface until the in-flight transition has snapped.

use std::sync::Arc;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::controller::{LayoutController, SwitchOptions};
use crate::model::{ComponentKey, LayoutId, Rect};
use crate::persistence::MemoryStore;
use crate::transition::{ManualClock, MemorySurfaces};

fn ckey(raw: &str) -> ComponentKey {
    ComponentKey::new(raw).unwrap()
}

fn lid(raw: &str) -> LayoutId {
    LayoutId::new(raw).unwrap()
}

fn harness() -> (LayoutController<MemorySurfaces>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let mut surfaces = MemorySurfaces::new();
    for key in ["stream", "chat", "controls", "participants"] {
        surfaces.register(ckey(key));
    }
    let ctrl = LayoutController::new(
        &EngineConfig::default(),
        surfaces,
        Box::new(MemoryStore::new()),
        clock.clone(),
    );
    (ctrl, clock)
}

#[test]
fn queued_switch_does_not_start_before_commit() {
    let (mut ctrl, clock) = harness();

    // default -> grid in flight, theater queued behind it.
    assert!(ctrl.set_layout(&lid("grid"), SwitchOptions::animated()));
    assert!(ctrl.set_layout(&lid("theater"), SwitchOptions::animated()));

    // Drive the grid transition in small steps. Until it commits, chat
    // must never dim: fading chat out is the queued theater transition's
    // first phase.
    let mut committed = false;
    for _ in 0..29 {
        clock.advance(Duration::from_millis(10));
        committed = ctrl.tick();
        assert!(!committed);
        assert_eq!(
            ctrl.surfaces().state(&ckey("chat")).unwrap().opacity,
            1.0,
            "queued transition leaked into the in-flight one"
        );
    }
    clock.advance(Duration::from_millis(10));
    committed = ctrl.tick() || committed;
    assert!(committed, "grid transition should commit at its duration");

    // The grid target was snapped before theater started.
    let stream = ctrl.surfaces().state(&ckey("stream")).unwrap();
    assert!(stream.rect.approx_eq(&Rect::new(0.0, 0.0, 75.0, 50.0)));
    assert!(ctrl.in_flight(), "queued theater transition should now run");

    // Now the theater transition plays out: chat fades, stream lands.
    clock.advance(Duration::from_millis(450));
    assert!(ctrl.tick());
    assert_eq!(ctrl.surfaces().state(&ckey("chat")).unwrap().opacity, 0.0);
    let stream = ctrl.surfaces().state(&ckey("stream")).unwrap();
    assert!(stream.rect.approx_eq(&Rect::new(0.0, 0.0, 100.0, 92.0)));
}

#[test]
fn queue_preserves_arrival_order() {
    use crate::controller::MemoryNotifications;
    use std::sync::Mutex;

    let (mut ctrl, clock) = harness();
    let notifications = Arc::new(Mutex::new(MemoryNotifications::new()));
    ctrl.add_notification_sink(Box::new(notifications.clone()));

    assert!(ctrl.set_layout(&lid("grid"), SwitchOptions::animated()));
    assert!(ctrl.set_layout(&lid("theater"), SwitchOptions::instant()));
    assert!(ctrl.set_layout(&lid("spotlight"), SwitchOptions::instant()));

    clock.advance(Duration::from_millis(300));
    assert!(ctrl.tick());

    // Both queued requests were instant, so the commit tick drained them
    // in arrival order and landed on spotlight.
    assert_eq!(ctrl.current_layout_id(), Some(&lid("spotlight")));
    assert!(!ctrl.in_flight());

    let events = notifications.lock().unwrap();
    let order: Vec<_> = events
        .events()
        .iter()
        .map(|e| e.layout_id.as_str().to_string())
        .collect();
    assert_eq!(order, vec!["grid", "theater", "spotlight"]);
}

#[test]
fn queued_options_are_honored_per_request() {
    let (mut ctrl, clock) = harness();

    assert!(ctrl.set_layout(&lid("grid"), SwitchOptions::animated()));
    assert!(ctrl.set_layout(
        &lid("theater"),
        SwitchOptions::animated().with_duration(Duration::from_millis(100))
    ));

    clock.advance(Duration::from_millis(300));
    assert!(ctrl.tick());
    assert!(ctrl.in_flight());

    // grid -> theater has a fade-out batch: 50ms + 100ms with the
    // per-request duration.
    clock.advance(Duration::from_millis(150));
    assert!(ctrl.tick());
    assert_eq!(ctrl.current_layout_id(), Some(&lid("theater")));
    assert!(!ctrl.in_flight());
}
