//! Floating help affordance.
//!
//! A page that can offer help composes [`HelpAffordance`] near its root and
//! hands it a [`HelpHandle`]. The handle carries visibility (a `Signal<bool>`
//! owned by the host) and the action to run when the user asks for help. The
//! handle is passed explicitly; [`with_help`] / [`current_help`] is a thin
//! composition-local adapter for hosts that prefer ambient wiring, and it
//! degrades to a disabled handle when no provider is installed.

use std::fmt;
use std::rc::Rc;

use perch_core::*;

use crate::presence::{AnimatedVisibility, EnterTransition, ExitTransition};
use crate::{Button, ViewExt};

/// Visible text and accessibility name of the help button. The semantics
/// label is attached explicitly so the announced name stays stable even if a
/// host restyles the visible text.
pub const HELP_LABEL: &str = "How to use this page";

const PRESENCE_KEY: &str = "help-affordance";

/// Margin between the affordance and the window edges, in dp.
const EDGE_MARGIN_DP: f32 = 16.0;

#[derive(Clone)]
pub struct HelpHandle {
    enabled: Signal<bool>,
    on_trigger: Rc<dyn Fn()>,
}

impl HelpHandle {
    pub fn new(enabled: Signal<bool>, on_trigger: impl Fn() + 'static) -> Self {
        Self {
            enabled,
            on_trigger: Rc::new(on_trigger),
        }
    }

    /// A handle that never shows and whose trigger does nothing.
    pub fn disabled() -> Self {
        Self::new(signal(false), || {})
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Run the host's help action. Synchronous; one call per activation.
    pub fn trigger(&self) {
        (self.on_trigger)()
    }
}

impl Default for HelpHandle {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for HelpHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpHandle")
            .field("enabled", &self.enabled.get())
            .field("on_trigger", &"<callback>")
            .finish()
    }
}

/// Provide `help` as the ambient handle for the duration of `f`.
pub fn with_help<R>(help: HelpHandle, f: impl FnOnce() -> R) -> R {
    with_local(help, f)
}

/// The ambient handle, or a disabled one when nothing was provided.
pub fn current_help() -> HelpHandle {
    local_or_default()
}

fn help_button(help: &HelpHandle) -> View {
    let th = theme();
    let on_trigger = help.clone();
    Button(HELP_LABEL, move || on_trigger.trigger())
        .modifier(
            Modifier::new()
                .background(th.button_bg)
                .border(1.0, th.outline, 24.0)
                .clip_rounded(24.0)
                .padding(12.0)
                // Hit-testing priority over page content under the corner.
                .z_index(10.0),
        )
        .semantics(Semantics::new(Role::Button).label(HELP_LABEL))
}

/// Conditionally-visible floating help button, pinned to the bottom-right
/// corner of its nearest `Stack` ancestor. Enters with a spring pop when the
/// handle enables it and plays its exit to completion before unmounting.
#[allow(non_snake_case)]
pub fn HelpAffordance(help: &HelpHandle) -> View {
    let wrapper = crate::Box(
        Modifier::new()
            .absolute()
            .offset(None, None, Some(EDGE_MARGIN_DP), Some(EDGE_MARGIN_DP)),
    );

    let button = {
        let help = help.clone();
        move || help_button(&help)
    };

    match AnimatedVisibility(
        PRESENCE_KEY,
        help.is_enabled(),
        EnterTransition::spring_pop(),
        ExitTransition::spring_drop(),
        button,
    ) {
        Some(content) => wrapper.child(content),
        None => wrapper,
    }
}
