//! # State, signals, and composition
//!
//! Perch uses a small reactive core instead of an explicit widget tree with
//! mutable fields. The main pieces:
//!
//! - `Signal<T>` — observable, cloneable value handle.
//! - `remember*` — lifecycle-aware storage bound to composition.
//! - `effect` / `scoped_effect` — side-effects with cleanup.
//! - `AnimatedValue<T>` — a value transitioning toward a target under a
//!   pluggable clock, so tests can drive time deterministically.
//!
//! ## Signals
//!
//! ```rust
//! use perch_core::*;
//!
//! let enabled = signal(false);
//! enabled.set(true);
//! enabled.toggle();
//! assert_eq!(enabled.get(), false);
//! ```
//!
//! ## Remembered state
//!
//! UI state is held in `remember_*` slots rather than globals:
//!
//! - `remember` and `remember_state` are order-based: the Nth call in a
//!   composition always refers to the Nth stored value.
//! - `remember_with_key` and `remember_state_with_key` are key-based and
//!   stable across conditional branches — animated presence state uses these
//!   so toggling visibility never duplicates or loses its slot.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use perch_core::*;
//!
//! fn Example() -> View {
//!     scoped_effect(|| {
//!         log::info!("mounted");
//!         Box::new(|| log::info!("unmounted")) as Box<dyn FnOnce()>
//!     });
//!     View::new(0, ViewKind::Box)
//! }
//! ```

pub mod animation;
pub mod color;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
#[cfg(test)]
mod tests;
pub mod view;

pub use color::*;
pub use effects::*;
pub use geometry::*;
pub use locals::*;
pub use modifier::*;
pub use prelude::*;
pub use runtime::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
