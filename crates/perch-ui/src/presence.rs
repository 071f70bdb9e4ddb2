//! Animated presence.
//!
//! `AnimatedVisibility` keeps its content mounted through an explicit
//! three-phase machine (hidden, visible, exiting) instead of unmounting the
//! moment visibility flips off. Exit runs to completion first; only the frame
//! that observes all exit animations settled stops composing the content.

use perch_core::*;

use crate::ViewExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Hidden,
    Visible,
    Exiting,
}

/// Where entering content starts from, and how fast it travels.
#[derive(Clone, Copy, Debug)]
pub struct EnterTransition {
    pub from_alpha: f32,
    pub from_scale: f32,
    pub from_offset_y: f32,
    pub spec: AnimationSpec,
}

impl EnterTransition {
    /// Fade in while scaling up from slightly below, on a spring.
    pub fn spring_pop() -> Self {
        Self {
            from_alpha: 0.0,
            from_scale: 0.85,
            from_offset_y: 24.0,
            spec: AnimationSpec::spring(),
        }
    }
}

/// Where exiting content travels to.
#[derive(Clone, Copy, Debug)]
pub struct ExitTransition {
    pub to_alpha: f32,
    pub to_scale: f32,
    pub to_offset_y: f32,
    pub spec: AnimationSpec,
}

impl ExitTransition {
    /// Mirror of [`EnterTransition::spring_pop`]: fade out, shrink, drop.
    pub fn spring_drop() -> Self {
        Self {
            to_alpha: 0.0,
            to_scale: 0.85,
            to_offset_y: 24.0,
            spec: AnimationSpec::spring(),
        }
    }
}

struct PresenceState {
    phase: Phase,
    alpha: AnimatedValue<f32>,
    scale: AnimatedValue<f32>,
    offset_y: AnimatedValue<f32>,
}

impl PresenceState {
    fn new(enter: &EnterTransition) -> Self {
        Self {
            phase: Phase::Hidden,
            alpha: AnimatedValue::new(enter.from_alpha, enter.spec),
            scale: AnimatedValue::new(enter.from_scale, enter.spec),
            offset_y: AnimatedValue::new(enter.from_offset_y, enter.spec),
        }
    }
}

/// Compose `content` while `visible` is set, animating it in and out.
///
/// State lives in a keyed slot so it survives the frames where the content is
/// not composed. Returns `None` only in the hidden phase; during exit the
/// content stays mounted (still hit-testable, still in semantics) until its
/// animations settle. Flipping `visible` back on mid-exit reverses in place
/// from the current values rather than restarting from the enter origin.
#[allow(non_snake_case)]
pub fn AnimatedVisibility(
    key: &str,
    visible: bool,
    enter: EnterTransition,
    exit: ExitTransition,
    content: impl FnOnce() -> View,
) -> Option<View> {
    let state = remember_state_with_key(key, || PresenceState::new(&enter));
    let mut s = state.borrow_mut();

    match (s.phase, visible) {
        (Phase::Hidden, true) => {
            s.alpha.snap_to(enter.from_alpha);
            s.scale.snap_to(enter.from_scale);
            s.offset_y.snap_to(enter.from_offset_y);
            s.alpha.animate_to(1.0, enter.spec);
            s.scale.animate_to(1.0, enter.spec);
            s.offset_y.animate_to(0.0, enter.spec);
            s.phase = Phase::Visible;
        }
        (Phase::Visible, false) => {
            s.alpha.animate_to(exit.to_alpha, exit.spec);
            s.scale.animate_to(exit.to_scale, exit.spec);
            s.offset_y.animate_to(exit.to_offset_y, exit.spec);
            s.phase = Phase::Exiting;
        }
        (Phase::Exiting, true) => {
            s.alpha.animate_to(1.0, enter.spec);
            s.scale.animate_to(1.0, enter.spec);
            s.offset_y.animate_to(0.0, enter.spec);
            s.phase = Phase::Visible;
        }
        _ => {}
    }

    let running = [
        s.alpha.update(),
        s.scale.update(),
        s.offset_y.update(),
    ]
    .iter()
    .any(|r| *r);

    if s.phase == Phase::Exiting && !running {
        s.phase = Phase::Hidden;
        log::debug!("presence '{key}': exit settled, unmounting");
    }

    if s.phase == Phase::Hidden {
        return None;
    }

    let alpha = *s.alpha.get();
    let scale = *s.scale.get();
    let dy = *s.offset_y.get();
    drop(s);

    Some(
        crate::Box(
            Modifier::new()
                .alpha(alpha)
                .scale(scale)
                .translate(0.0, dy),
        )
        .child(content()),
    )
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use perch_core::*;
    use web_time::Duration;

    use super::*;

    fn tween_enter(ms: u64) -> EnterTransition {
        EnterTransition {
            spec: AnimationSpec::tween(Duration::from_millis(ms), Easing::Linear),
            ..EnterTransition::spring_pop()
        }
    }

    fn tween_exit(ms: u64) -> ExitTransition {
        ExitTransition {
            spec: AnimationSpec::tween(Duration::from_millis(ms), Easing::Linear),
            ..ExitTransition::spring_drop()
        }
    }

    fn install_clock() -> TestClock {
        reset_composer();
        let clock = TestClock::start_now();
        set_clock(Rc::new(clock.clone()));
        clock
    }

    fn content() -> View {
        View::new(0, ViewKind::Box)
    }

    #[test]
    fn hidden_content_is_never_composed() {
        install_clock();
        let composed = Rc::new(Cell::new(false));
        let c = composed.clone();

        let v = AnimatedVisibility("p", false, tween_enter(100), tween_exit(100), move || {
            c.set(true);
            content()
        });

        assert!(v.is_none());
        assert!(!composed.get());
    }

    #[test]
    fn enter_starts_at_transition_origin() {
        install_clock();

        let v = AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content)
            .expect("visible content should compose");

        assert_eq!(v.modifier.alpha, Some(0.0));
        let t = v.modifier.transform.expect("enter applies a transform");
        assert!((t.scale_x - 0.85).abs() < 1e-6);
        assert!((t.translate_y - 24.0).abs() < 1e-6);
    }

    #[test]
    fn enter_settles_fully_shown() {
        let clock = install_clock();

        AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content);
        clock.advance(Duration::from_millis(150));
        let v = AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content)
            .expect("still visible");

        assert_eq!(v.modifier.alpha, Some(1.0));
        let t = v.modifier.transform.unwrap();
        assert!((t.scale_x - 1.0).abs() < 1e-6);
        assert!((t.translate_y - 0.0).abs() < 1e-6);
    }

    #[test]
    fn exit_keeps_content_mounted_until_settled() {
        let clock = install_clock();

        AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content);
        clock.advance(Duration::from_millis(150));
        AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content);

        // Toggle off: exit begins, content stays mounted.
        let mid = AnimatedVisibility("p", false, tween_enter(100), tween_exit(100), content);
        assert!(mid.is_some());

        clock.advance(Duration::from_millis(50));
        let still = AnimatedVisibility("p", false, tween_enter(100), tween_exit(100), content);
        assert!(still.is_some());

        clock.advance(Duration::from_millis(100));
        let gone = AnimatedVisibility("p", false, tween_enter(100), tween_exit(100), content);
        assert!(gone.is_none());
    }

    #[test]
    fn reenter_mid_exit_reverses_in_place() {
        let clock = install_clock();

        AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content);
        clock.advance(Duration::from_millis(150));
        AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content);

        AnimatedVisibility("p", false, tween_enter(100), tween_exit(100), content);
        clock.advance(Duration::from_millis(50));
        let mid = AnimatedVisibility("p", false, tween_enter(100), tween_exit(100), content)
            .expect("mid-exit content still mounted");
        let mid_alpha = mid.modifier.alpha.unwrap();
        assert!(mid_alpha > 0.0 && mid_alpha < 1.0);

        // Flip back on before exit finishes: no restart from alpha 0.
        let back = AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content)
            .expect("re-entered content mounts");
        assert!(back.modifier.alpha.unwrap() >= mid_alpha - 1e-6);

        clock.advance(Duration::from_millis(150));
        let settled = AnimatedVisibility("p", true, tween_enter(100), tween_exit(100), content)
            .expect("settled visible");
        assert_eq!(settled.modifier.alpha, Some(1.0));
    }
}
