pub use crate::animation::*;
pub use crate::color::Color;
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::error::*;
pub use crate::geometry::{Rect, Size, Transform, Vec2};
pub use crate::locals::{
    Density, Dp, Theme, density, dp_to_px, local, local_or_default, theme, with_density,
    with_local, with_theme,
};
pub use crate::modifier::Modifier;
pub use crate::runtime::{
    ComposeGuard, Frame, HitRegion, Scheduler, SemNode, remember, remember_state,
    remember_state_with_key, remember_with_key, reset_composer,
};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::view::{Scene, SceneNode, View, ViewId, ViewKind};
pub use taffy::{AlignItems, AlignSelf, JustifyContent};
