use std::cell::RefCell;
use std::rc::Rc;

use web_time::{Duration, Instant};

thread_local! {
    static CLOCK: RefCell<Option<Rc<dyn Clock>>> = const { RefCell::new(None) };
}

pub(crate) fn now() -> Instant {
    CLOCK.with(|c| c.borrow().as_ref().map(|c| c.now()).unwrap_or_else(Instant::now))
}

#[derive(Clone, Copy, Debug)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Spring { damping: f32, stiffness: f32 },
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Spring { damping, stiffness } => {
                // Simplified spring physics
                let omega = (stiffness / damping).sqrt();
                let zeta = damping / (2.0 * (stiffness * damping).sqrt());

                if zeta < 1.0 {
                    // Underdamped
                    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
                    let t = t * 2.0; // Adjust time scale
                    1.0 - ((-zeta * omega * t).exp() * (omega_d * t).cos())
                } else {
                    // Overdamped or critically damped - fallback to ease out
                    t * (2.0 - t)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }
    pub fn spring() -> Self {
        Self {
            duration: Duration::from_millis(500),
            easing: Easing::Spring {
                damping: 0.8,
                stiffness: 200.0,
            },
            delay: Duration::ZERO,
        }
    }
    pub fn fast() -> Self {
        Self {
            duration: Duration::from_millis(150),
            easing: Easing::EaseOut,
            delay: Duration::ZERO,
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for crate::Color {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        crate::Color(
            (self.0 as f32 + (other.0 as f32 - self.0 as f32) * t) as u8,
            (self.1 as f32 + (other.1 as f32 - self.1 as f32) * t) as u8,
            (self.2 as f32 + (other.2 as f32 - self.2 as f32) * t) as u8,
            (self.3 as f32 + (other.3 as f32 - self.3 as f32) * t) as u8,
        )
    }
}

// Animation clock. Thread-local so parallel test threads stay isolated.
pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Install an animation clock for this thread. The platform installs
/// `SystemClock`; tests install a `TestClock` and advance it by hand.
pub fn set_clock(clock: Rc<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

/// Install the system clock if none is present (idempotent).
pub fn ensure_system_clock() {
    CLOCK.with(|c| {
        let mut c = c.borrow_mut();
        if c.is_none() {
            *c = Some(Rc::new(SystemClock));
        }
    });
}

/// A test clock you can drive deterministically.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<RefCell<Instant>>,
}

impl TestClock {
    pub fn start_now() -> Self {
        Self {
            t: Rc::new(RefCell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut t = self.t.borrow_mut();
        *t += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        *self.t.borrow()
    }
}

/// Animated value that transitions smoothly toward its target.
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_time: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_time: None,
        }
    }

    pub fn set_target(&mut self, target: T) {
        self.start = self.current.clone();
        self.target = target;
        self.start_time = Some(now());
    }

    /// Retarget under a new spec. Enter and exit transitions carry their own
    /// specs, so presence animations swap specs when direction flips.
    pub fn animate_to(&mut self, target: T, spec: AnimationSpec) {
        self.spec = spec;
        self.set_target(target);
    }

    /// Jump to `value` without animating. Used to seed enter transitions.
    pub fn snap_to(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.start_time = None;
    }

    pub fn update(&mut self) -> bool {
        if let Some(start) = self.start_time {
            let elapsed = now().saturating_duration_since(start);

            if elapsed < self.spec.delay {
                return true; // Still waiting for delay
            }

            let animation_time = elapsed - self.spec.delay;

            if animation_time >= self.spec.duration {
                self.current = self.target.clone();
                self.start_time = None;
                return false; // Animation complete
            }

            let t = animation_time.as_secs_f32() / self.spec.duration.as_secs_f32();
            let eased_t = self.spec.easing.interpolate(t);
            self.current = self.start.interpolate(&self.target, eased_t);

            true // Animation ongoing
        } else {
            false // No animation
        }
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.start_time.is_some()
    }
}
