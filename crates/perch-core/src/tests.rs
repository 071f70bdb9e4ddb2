use std::rc::Rc;

use crate::animation::*;
use crate::scope::*;
use crate::signal::*;
use crate::{Color, ErrorBoundary, Rect, Vec2, View, ViewKind, remember_with_key, reset_composer};
use web_time::Duration;

#[test]
fn signal_basic() {
    let sig = signal(42);
    assert_eq!(sig.get(), 42);

    sig.set(100);
    assert_eq!(sig.get(), 100);

    sig.update(|v| *v += 1);
    assert_eq!(sig.get(), 101);
}

#[test]
fn signal_subscription() {
    let sig = signal(0);
    let called = Rc::new(std::cell::RefCell::new(false));

    let called_clone = called.clone();
    sig.subscribe(move |_| {
        *called_clone.borrow_mut() = true;
    });

    sig.set(42);
    assert!(*called.borrow());
}

#[test]
fn subscriber_can_read_signal_during_notification() {
    let sig = signal(1);
    let seen = Rc::new(std::cell::RefCell::new(None));

    let seen_clone = seen.clone();
    let reader = sig.clone();
    sig.subscribe(move |_| {
        *seen_clone.borrow_mut() = Some(reader.get());
    });

    sig.set(7);
    assert_eq!(*seen.borrow(), Some(7));
}

#[test]
fn bool_signal_toggle() {
    let sig = signal(false);
    sig.toggle();
    assert!(sig.get());
    sig.toggle();
    assert!(!sig.get());
}

#[test]
fn scope_explicit_dispose() {
    let cleaned_up = Rc::new(std::cell::RefCell::new(false));

    let scope = Scope::new();
    let cleaned_up_clone = cleaned_up.clone();
    scope.add_disposer(move || {
        *cleaned_up_clone.borrow_mut() = true;
    });

    assert!(!*cleaned_up.borrow());
    scope.dispose();
    assert!(*cleaned_up.borrow());
}

#[test]
fn effect_cleanup_runs_on_scope_dispose() {
    let cleaned = Rc::new(std::cell::RefCell::new(false));

    let scope = Scope::new();
    scope.run(|| {
        let cleaned = cleaned.clone();
        crate::effect(move || crate::on_unmount(move || *cleaned.borrow_mut() = true));
    });

    assert!(!*cleaned.borrow());
    scope.dispose();
    assert!(*cleaned.borrow());
}

#[test]
fn key_based_remember_is_stable() {
    reset_composer();

    let val1 = remember_with_key("test", || 42);
    let val2 = remember_with_key("test", || 100);

    // Same slot: the second initializer never runs.
    assert_eq!(*val1, 42);
    assert_eq!(*val2, 42);
}

#[test]
fn color_from_hex() {
    let c = Color::from_hex("#FF5733");
    assert_eq!(c, Color(255, 87, 51, 255));

    let c_alpha = Color::from_hex("#FF5733AA");
    assert_eq!(c_alpha, Color(255, 87, 51, 170));
}

#[test]
fn rect_contains() {
    let rect = Rect {
        x: 10.0,
        y: 10.0,
        w: 100.0,
        h: 50.0,
    };

    assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
    assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
    assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
}

#[test]
fn animation_deterministic_under_test_clock() {
    let clock = TestClock::start_now();
    set_clock(Rc::new(clock.clone()));

    let mut a = AnimatedValue::new(
        0.0f32,
        AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
    );
    a.set_target(10.0);

    clock.advance(Duration::from_millis(250));
    assert!(a.update());
    assert!((*a.get() - 2.5).abs() < 0.01);

    clock.advance(Duration::from_millis(750));
    let cont = a.update();
    assert!(!cont);
    assert!((*a.get() - 10.0).abs() < 0.001);
    assert!(!a.is_animating());
}

#[test]
fn animation_snap_to_cancels_in_flight_transition() {
    let clock = TestClock::start_now();
    set_clock(Rc::new(clock.clone()));

    let mut a = AnimatedValue::new(
        0.0f32,
        AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
    );
    a.set_target(1.0);
    clock.advance(Duration::from_millis(50));
    assert!(a.update());

    a.snap_to(0.3);
    assert!(!a.is_animating());
    assert_eq!(*a.get(), 0.3);
    assert_eq!(*a.target(), 0.3);
}

#[test]
fn error_boundary_catches_panicking_content() {
    let view = ErrorBoundary(
        |info| {
            View::new(
                0,
                ViewKind::Text {
                    text: info.message,
                    color: Color::WHITE,
                    font_size: 16.0,
                },
            )
        },
        || panic!("boom"),
    );

    match view.kind {
        ViewKind::Text { text, .. } => assert_eq!(text, "boom"),
        other => panic!("expected fallback text view, got {other:?}"),
    }
}
