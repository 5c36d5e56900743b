// SPDX-License-Identifier: MPL-2.0
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tempfile::tempdir;
use toastkit::config::{self, Config};
use toastkit::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
use toastkit::notifications::{
    use_toaster, Clock, DismissReason, ManualClock, Message, Phase, Position, ToastAction, ToastId,
    ToastOptions, ToastProvider, Toaster, Variant,
};

struct Harness {
    toaster: Toaster,
    clock: ManualClock,
}

impl Harness {
    fn new() -> Self {
        let clock = ManualClock::new();
        Self {
            toaster: Toaster::with_clock(clock.clone()),
            clock,
        }
    }

    fn advance(&self, ms: u64) {
        let now = self.clock.advance(Duration::from_millis(ms));
        self.toaster.advance(now);
    }

    fn phase(&self, id: &ToastId) -> Option<Phase> {
        self.toaster.get(id).map(|t| t.phase)
    }

    fn messages(&self) -> Vec<String> {
        self.toaster.list().into_iter().map(|t| t.message).collect()
    }
}

fn counter() -> (Rc<Cell<u32>>, impl Fn() -> u32) {
    let count = Rc::new(Cell::new(0));
    let read = Rc::clone(&count);
    (count, move || read.get())
}

#[test]
fn default_toast_enters_shows_and_leaves() {
    let h = Harness::new();
    let id = h.toaster.show("Hi", ToastOptions::new());

    assert_eq!(h.toaster.len(), 1);
    assert_eq!(h.phase(&id), Some(Phase::Entering));

    h.advance(10);
    assert_eq!(h.phase(&id), Some(Phase::Visible));

    h.advance(4_989);
    assert_eq!(h.phase(&id), Some(Phase::Visible));

    h.advance(1);
    assert_eq!(h.phase(&id), Some(Phase::Exiting));

    h.advance(299);
    assert_eq!(h.phase(&id), Some(Phase::Exiting));

    h.advance(1);
    assert!(h.toaster.is_empty());
}

#[test]
fn one_large_advance_runs_the_whole_lifecycle() {
    let h = Harness::new();
    h.toaster.show("Hi", ToastOptions::new());

    h.advance(5_300);
    assert!(h.toaster.is_empty());
}

#[test]
fn zero_duration_toast_persists() {
    let h = Harness::new();
    let id = h
        .toaster
        .show("X", ToastOptions::new().duration(Duration::ZERO));

    h.advance(10_000);
    assert_eq!(h.phase(&id), Some(Phase::Visible));
}

#[test]
fn prevent_auto_dismiss_overrides_duration() {
    let h = Harness::new();
    let id = h.toaster.warning(
        "Unsaved changes",
        ToastOptions::new()
            .duration(Duration::from_millis(100))
            .prevent_auto_dismiss(true),
    );

    h.advance(60_000);
    assert_eq!(h.phase(&id), Some(Phase::Visible));

    h.toaster.dismiss(&id);
    h.advance(300);
    assert!(h.toaster.is_empty());
}

#[test]
fn action_runs_once_and_dismisses() {
    let h = Harness::new();
    let (count, clicks) = counter();
    let id = h.toaster.success(
        "Saved",
        ToastOptions::new().action(ToastAction::new("Undo", move || {
            count.set(count.get() + 1);
        })),
    );
    h.advance(10);

    h.toaster.activate_action(&id);
    h.toaster.activate_action(&id);

    assert_eq!(clicks(), 1);
    assert_eq!(h.phase(&id), Some(Phase::Exiting));
    assert_eq!(
        h.toaster.get(&id).and_then(|t| t.action_label),
        Some("Undo".to_string())
    );
}

#[test]
fn dismissing_one_toast_leaves_the_other_alone() {
    let h = Harness::new();
    let a = h.toaster.show("A", ToastOptions::new());
    let b = h.toaster.show("B", ToastOptions::new());
    assert_eq!(h.messages(), vec!["A", "B"]);

    h.advance(10);
    h.toaster.dismiss(&a);
    assert_eq!(h.phase(&b), Some(Phase::Visible));

    h.advance(300);
    assert_eq!(h.messages(), vec!["B"]);

    // B keeps its own countdown: 5000 ms after creation
    h.advance(4_689);
    assert_eq!(h.phase(&b), Some(Phase::Visible));
    h.advance(1);
    assert_eq!(h.phase(&b), Some(Phase::Exiting));
}

#[test]
fn double_dismiss_fires_on_close_once() {
    let h = Harness::new();
    let (count, closes) = counter();
    let id = h.toaster.show(
        "Once",
        ToastOptions::new().on_close(move |_| count.set(count.get() + 1)),
    );

    h.toaster.dismiss(&id);
    h.toaster.dismiss(&id);
    h.advance(300);
    h.toaster.dismiss(&id);
    h.advance(300);

    assert_eq!(closes(), 1);
}

#[test]
fn on_close_receives_the_toast_id() {
    let h = Harness::new();
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let id = h.toaster.show(
        "Bye",
        ToastOptions::new()
            .duration(Duration::from_millis(50))
            .on_close(move |id| *sink.borrow_mut() = Some(id.clone())),
    );

    h.advance(350);
    assert_eq!(seen.borrow().as_ref(), Some(&id));
}

#[test]
fn resume_restarts_the_full_duration() {
    let h = Harness::new();
    let id = h.toaster.show("Hover", ToastOptions::new());
    h.advance(10);

    h.advance(3_000);
    h.toaster.handle_message(&Message::PointerEntered(id.clone()));
    h.advance(20_000);
    assert_eq!(h.phase(&id), Some(Phase::Visible));

    h.toaster.handle_message(&Message::PointerLeft(id.clone()));
    h.advance(4_999);
    assert_eq!(h.phase(&id), Some(Phase::Visible));

    h.advance(1);
    assert_eq!(h.phase(&id), Some(Phase::Exiting));
}

#[test]
fn repeated_hover_never_leaves_two_countdowns() {
    let h = Harness::new();
    let id = h.toaster.show("Hover", ToastOptions::new());
    h.advance(10);

    for _ in 0..3 {
        h.toaster.pause(&id);
        h.toaster.resume(&id);
        h.advance(1_000);
    }
    // Last resume was 1000 ms ago
    h.advance(3_999);
    assert_eq!(h.phase(&id), Some(Phase::Visible));
    h.advance(1);
    assert_eq!(h.phase(&id), Some(Phase::Exiting));
}

#[test]
fn resume_without_pause_is_a_no_op() {
    let h = Harness::new();
    let id = h.toaster.show("Steady", ToastOptions::new());
    h.advance(2_000);

    h.toaster.resume(&id);
    h.advance(3_000);
    assert_eq!(h.phase(&id), Some(Phase::Exiting));
}

#[test]
fn dismiss_all_exits_every_live_toast_only() {
    let h = Harness::new();
    let first = h.toaster.show("one", ToastOptions::new());
    let second = h.toaster.show("two", ToastOptions::new().duration(Duration::ZERO));
    h.advance(10);

    h.toaster.dismiss_all();
    let late = h.toaster.show("three", ToastOptions::new());

    assert_eq!(h.phase(&first), Some(Phase::Exiting));
    assert_eq!(h.phase(&second), Some(Phase::Exiting));
    assert_eq!(h.phase(&late), Some(Phase::Entering));

    h.advance(300);
    assert_eq!(h.messages(), vec!["three"]);
}

#[test]
fn clear_skips_exit_delay_but_closes_each_toast() {
    let h = Harness::new();
    let (count, closes) = counter();
    for message in ["a", "b", "c"] {
        let count = Rc::clone(&count);
        h.toaster.show(
            message,
            ToastOptions::new().on_close(move |_| count.set(count.get() + 1)),
        );
    }

    h.toaster.clear();
    assert!(h.toaster.is_empty());
    assert_eq!(closes(), 3);

    h.advance(10_000);
    assert_eq!(closes(), 3);
}

#[test]
fn variant_helpers_force_their_variant() {
    let h = Harness::new();
    let ids = [
        h.toaster.success("s", ToastOptions::new().variant(Variant::Error)),
        h.toaster.error("e", ToastOptions::new()),
        h.toaster.warning("w", ToastOptions::new()),
        h.toaster.info("i", ToastOptions::new().variant(Variant::Warning)),
    ];
    let variants: Vec<_> = ids
        .iter()
        .filter_map(|id| h.toaster.get(id).map(|t| t.variant))
        .collect();

    assert_eq!(
        variants,
        vec![Variant::Success, Variant::Error, Variant::Warning, Variant::Info]
    );
}

#[test]
fn ids_are_unique_across_toasters() {
    let a = Harness::new();
    let b = Harness::new();
    let first = a.toaster.show("x", ToastOptions::new());
    let second = b.toaster.show("x", ToastOptions::new());

    assert_ne!(first, second);
    assert!(first.as_str().starts_with("toast-"));
}

#[test]
fn subscriber_sees_every_phase() {
    let h = Harness::new();
    let phases = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&phases);
    h.toaster.subscribe(move |toasts| {
        sink.borrow_mut().push(toasts.first().map(|t| t.phase));
    });

    let id = h.toaster.show("Watch", ToastOptions::new());
    h.advance(10);
    h.toaster.dismiss(&id);
    h.advance(300);

    assert_eq!(
        *phases.borrow(),
        vec![
            Some(Phase::Entering),
            Some(Phase::Visible),
            Some(Phase::Exiting),
            None,
        ]
    );
}

#[test]
fn next_deadline_tracks_the_earliest_timer() {
    let h = Harness::new();
    let start = h.clock.now();
    h.toaster
        .show("a", ToastOptions::new().duration(Duration::from_millis(700)));

    assert_eq!(
        h.toaster.next_deadline(),
        Some(start + Duration::from_millis(10))
    );
    h.advance(10);
    assert_eq!(
        h.toaster.next_deadline(),
        Some(start + Duration::from_millis(700))
    );
}

#[test]
fn provider_scope_exposes_the_toaster() {
    let clock = ManualClock::new();
    let provider = ToastProvider::from_toaster(Toaster::with_clock(clock.clone()));

    let id = provider.scope(|| use_toaster().error("Upload failed", ToastOptions::new()));

    assert_eq!(
        provider.toaster().get(&id).map(|t| t.variant),
        Some(Variant::Error)
    );
}

#[test]
fn overlay_reports_phase_flags() {
    let h = Harness::new();
    let id = h.toaster.show("Layout", ToastOptions::new().title("Hint"));

    let overlay = h.toaster.overlay();
    assert_eq!(overlay.position, Position::TopRight);
    assert!(!overlay.toasts[0].shown);

    h.advance(10);
    let overlay = h.toaster.overlay();
    assert_eq!(overlay.toasts[0].id, id);
    assert!(overlay.toasts[0].shown);
    assert!(overlay.toasts[0].interactive);
    assert_eq!(overlay.toasts[0].title.as_deref(), Some("Hint"));
}

#[test]
fn diagnostics_record_expiry_reason() {
    let h = Harness::new();
    let mut collector = DiagnosticsCollector::default();
    h.toaster.set_diagnostics(collector.handle());

    let id = h
        .toaster
        .show("Tracked", ToastOptions::new().duration(Duration::from_millis(100)));
    h.advance(400);
    collector.process_pending();

    let reasons: Vec<_> = collector
        .events_for(&id)
        .filter_map(|kind| match kind {
            DiagnosticEventKind::Dismissed { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(reasons, vec![DismissReason::Expired]);
    assert!(collector
        .events_for(&id)
        .any(|kind| matches!(kind, DiagnosticEventKind::Removed { .. })));
}

#[test]
fn configured_defaults_reach_the_toaster() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let settings = Config {
        default_duration_ms: Some(1_500),
        position: Some(Position::BottomLeft),
        diagnostics_capacity: None,
    };
    config::save_to_path(&settings, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config file");
    let clock = ManualClock::new();
    let toaster = Toaster::new(loaded.toaster_config(), clock.clone());
    let id = toaster.show("Configured", ToastOptions::new());

    assert_eq!(toaster.overlay().position, Position::BottomLeft);
    toaster.advance(clock.advance(Duration::from_millis(1_500)));
    assert_eq!(toaster.get(&id).map(|t| t.phase), Some(Phase::Exiting));
}
