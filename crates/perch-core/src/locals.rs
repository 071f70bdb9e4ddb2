//! # Composition locals
//!
//! Perch uses thread-local "composition locals" for ambient UI parameters:
//! theme colors, dp density, and any capability a composition root wants to
//! provide to a subtree without threading it through every call (the help
//! affordance's handle is the canonical example, see `perch-ui`).
//!
//! Locals are scoped: `with_local` pushes a frame for the duration of the
//! closure, and lookups walk the stack innermost-first. Reading a local that
//! no provider installed falls back to `Default`, so a component composed
//! outside its provider degrades safely instead of panicking.
//!
//! ```rust
//! use perch_core::*;
//!
//! let light = Theme {
//!     background: Color::WHITE,
//!     on_surface: Color::from_hex("#222222"),
//!     ..Theme::default()
//! };
//!
//! with_theme(light, || {
//!     // all views composed here see the light theme
//! });
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = const { RefCell::new(Vec::new()) };
}

/// density-independent pixels (dp)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dp(pub f32);

impl Dp {
    /// Converts this dp value into physical pixels using the current Density.
    pub fn to_px(self) -> f32 {
        self.0 * density().scale
    }
}

/// Convenience: convert a raw dp scalar into px using current Density.
pub fn dp_to_px(dp: f32) -> f32 {
    Dp(dp).to_px()
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        } else {
            // no frame: create a temporary one
            let mut m = HashMap::new();
            m.insert(t, v);
            st.borrow_mut().push(m);
        }
    });
}

/// Provide `value` as the local of type `T` for the duration of `f`.
pub fn with_local<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

/// Innermost provided local of type `T`, if any provider is on the stack.
pub fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}

/// Like [`local`], but falls back to `T::default()` when no provider is
/// installed.
pub fn local_or_default<T: Clone + Default + 'static>() -> T {
    local::<T>().unwrap_or_default()
}

// Typed API

/// High-level color theme used by widgets.
///
/// Intentionally small and semantic rather than a full Material spec; the
/// handful of slots below is what perch-ui's widgets actually read.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Window background / app root.
    pub background: Color,
    /// Default container surface (cards, sheets, panels).
    pub surface: Color,
    /// Primary foreground color on top of `surface`/`background`.
    pub on_surface: Color,

    /// Primary accent color for buttons and highlights.
    pub primary: Color,
    /// Foreground color used on top of `primary`.
    pub on_primary: Color,

    /// Low-emphasis outline/border color.
    pub outline: Color,

    /// Default button background.
    pub button_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#121212"),
            surface: Color::from_hex("#1E1E1E"),
            on_surface: Color::from_hex("#DDDDDD"),
            primary: Color::from_hex("#34AF82"),
            on_primary: Color::WHITE,
            outline: Color::from_hex("#555555"),
            button_bg: Color::from_hex("#34AF82"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Density {
    pub scale: f32, // dp→px multiplier
}
impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    with_local(theme, f)
}

pub fn with_density<R>(density: Density, f: impl FnOnce() -> R) -> R {
    with_local(density, f)
}

// Getters with defaults if not set

pub fn theme() -> Theme {
    local_or_default()
}

pub fn density() -> Density {
    local_or_default()
}
