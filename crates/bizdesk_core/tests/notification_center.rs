use bizdesk_core::{
    ConfirmChoice, ConfirmLabels, Continuation, HeadlessPresenter, HeadlessSurface, ManualClock,
    NotificationCenter, NotificationConfig, NotificationPhase, Severity, SurfaceEvent,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

struct Harness {
    center: NotificationCenter,
    clock: ManualClock,
    surface: HeadlessSurface,
    presenter: HeadlessPresenter,
}

fn harness() -> Harness {
    let clock = ManualClock::new();
    let surface = HeadlessSurface::new();
    let presenter = HeadlessPresenter::with_log("Confirm", surface.log());
    let center = NotificationCenter::with_clock(
        NotificationConfig::default(),
        Box::new(clock.clone()),
        Box::new(surface.clone()),
        Box::new(presenter.clone()),
    );
    Harness {
        center,
        clock,
        surface,
        presenter,
    }
}

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    (hits.clone(), hits)
}

fn counting(hits: Rc<Cell<u32>>) -> Continuation {
    Box::new(move |_: &mut NotificationCenter| hits.set(hits.get() + 1))
}

#[test]
fn notify_then_dismiss_leaves_no_active_notifications() {
    let mut h = harness();
    let handle = h
        .center
        .notify("Client saved", Severity::Success, Duration::from_millis(5000));
    assert_eq!(h.center.active_count(), 1);

    assert!(h.center.dismiss(handle));
    assert_eq!(h.center.active_count(), 0);
    assert!(!h.center.dismiss(handle));
}

#[test]
fn clear_all_empties_regardless_of_ttl() {
    let mut h = harness();
    h.center.notify("a", Severity::Info, Duration::ZERO);
    h.center.notify("b", Severity::Warning, Duration::from_millis(10));
    h.center.notify("c", Severity::Error, Duration::from_secs(60));
    h.center.success("d");

    assert_eq!(h.center.clear_all(), 4);
    assert_eq!(h.center.active_count(), 0);
    assert_eq!(h.center.clear_all(), 0);

    h.clock.advance(Duration::from_millis(300));
    h.center.advance();
    assert_eq!(h.center.rendered_count(), 0);
    assert!(h.surface.stack().is_empty());
}

#[test]
fn severity_helpers_use_configured_durations() {
    let mut h = harness();
    let info = h.center.info("Loading client data...");
    let error = h.center.error("Could not delete cost");

    h.clock.advance(Duration::from_millis(5000));
    h.center.advance();
    assert_eq!(h.center.phase(info), NotificationPhase::Exiting);
    assert!(h.center.is_active(error));

    h.clock.advance(Duration::from_millis(2000));
    h.center.advance();
    assert_eq!(h.center.phase(info), NotificationPhase::Removed);
    assert_eq!(h.center.phase(error), NotificationPhase::Exiting);
}

#[test]
fn mounted_markup_escapes_message() {
    let mut h = harness();
    h.center.warning("<img src=x onerror=alert(1)> Rossi & Figli");
    let markup = h
        .surface
        .events()
        .into_iter()
        .find_map(|event| match event {
            SurfaceEvent::Mounted { markup, .. } => Some(markup),
            _ => None,
        })
        .expect("notification mounted");
    assert!(markup.contains("&lt;img src=x onerror=alert(1)&gt; Rossi &amp; Figli"));
    assert!(markup.contains("alert-warning"));
}

#[test]
fn confirm_runs_only_on_confirm() {
    let mut h = harness();
    let (confirm_hits, confirm_seen) = counter();
    let (cancel_hits, cancel_seen) = counter();
    let id = h.center.confirm(
        "Delete client Mario Rossi?",
        move |_| confirm_hits.set(confirm_hits.get() + 1),
        Some(counting(cancel_hits)),
        None,
    );

    assert!(h.center.resolve(id, ConfirmChoice::Confirm));
    assert!(!h.center.resolve(id, ConfirmChoice::Cancel));
    assert_eq!(confirm_seen.get(), 1);
    assert_eq!(cancel_seen.get(), 0);
    assert_eq!(h.center.pending_confirmations(), 0);
    assert!(h.presenter.open_dialogs().is_empty());
}

#[test]
fn cancel_runs_only_on_cancel() {
    let mut h = harness();
    let (confirm_hits, confirm_seen) = counter();
    let (cancel_hits, cancel_seen) = counter();
    let id = h.center.confirm(
        "Delete cost?",
        move |_| confirm_hits.set(confirm_hits.get() + 1),
        Some(counting(cancel_hits)),
        Some(ConfirmLabels::new("Delete", "Keep")),
    );

    assert!(h.center.resolve(id, ConfirmChoice::Cancel));
    assert!(!h.center.resolve(id, ConfirmChoice::Confirm));
    assert_eq!(confirm_seen.get(), 0);
    assert_eq!(cancel_seen.get(), 1);
}

#[test]
fn dismiss_without_cancel_continuation_is_silent_but_disposes() {
    let mut h = harness();
    let (confirm_hits, confirm_seen) = counter();
    let id = h.center.confirm(
        "Delete invoice?",
        move |_| confirm_hits.set(confirm_hits.get() + 1),
        None,
        None,
    );

    assert!(h.center.resolve(id, ConfirmChoice::Dismiss));
    assert_eq!(confirm_seen.get(), 0);
    assert!(h
        .presenter
        .events()
        .contains(&SurfaceEvent::Disposed(id)));
}

#[test]
fn stacked_confirmations_are_independent() {
    let mut h = harness();
    let (first_hits, first_seen) = counter();
    let (second_hits, second_seen) = counter();
    let first = h
        .center
        .confirm("first?", move |_| first_hits.set(first_hits.get() + 1), None, None);
    let second = h
        .center
        .confirm("second?", move |_| second_hits.set(second_hits.get() + 1), None, None);
    assert_eq!(h.presenter.open_dialogs(), vec![first, second]);

    h.center.resolve(second, ConfirmChoice::Confirm);
    assert_eq!(h.presenter.open_dialogs(), vec![first]);
    assert_eq!((first_seen.get(), second_seen.get()), (0, 1));
}

#[test]
fn cancel_continuation_can_post_feedback() {
    let mut h = harness();
    let id = h.center.confirm(
        "Delete client?",
        |_| {},
        Some(Box::new(|center: &mut NotificationCenter| {
            center.notify("Deletion cancelled.", Severity::Info, Duration::from_millis(2000));
        })),
        None,
    );
    h.center.resolve(id, ConfirmChoice::Cancel);
    let active = h.center.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].message, "Deletion cancelled.");
    assert_eq!(active[0].ttl, Duration::from_millis(2000));
}

#[tokio::test]
async fn confirm_decision_resolves_true_on_confirm() {
    let mut h = harness();
    let decision = h.center.confirm_decision("Proceed?", None);
    let id = h.presenter.open_dialogs()[0];
    h.center.resolve(id, ConfirmChoice::Confirm);
    assert!(decision.await.expect("decision delivered"));
}

#[tokio::test]
async fn confirm_decision_resolves_false_on_dismiss() {
    let mut h = harness();
    let decision = h.center.confirm_decision("Proceed?", None);
    let id = h.presenter.open_dialogs()[0];
    h.center.resolve(id, ConfirmChoice::Dismiss);
    assert!(!decision.await.expect("decision delivered"));
}

#[tokio::test]
async fn confirm_decision_errors_when_center_is_dropped() {
    let mut h = harness();
    let decision = h.center.confirm_decision("Proceed?", None);
    drop(h.center);
    assert!(decision.await.is_err());
}
