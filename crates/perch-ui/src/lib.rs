#![allow(non_snake_case)]
//! Widgets, layout and the floating help affordance.
//!
//! The widget constructors here build a [`View`] tree; [`layout_and_paint`]
//! resolves it with taffy flexbox into a paintable [`Scene`] plus the hit
//! regions and flattened semantics nodes a platform (or the headless test
//! rule) consumes.

pub mod help;
pub mod presence;
pub mod testing;

use std::collections::HashMap;
use std::rc::Rc;

use perch_core::*;
use taffy::prelude::{AvailableSpace, Position, auto, length, percent};
use taffy::style::{Display, FlexDirection, Style};
use taffy::{NodeId, TaffyTree};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

pub use help::{HELP_LABEL, HelpAffordance, HelpHandle, current_help, with_help};
pub use presence::{AnimatedVisibility, EnterTransition, ExitTransition};
pub use testing::UiTestRule;

pub fn Surface(modifier: Modifier, child: View) -> View {
    let mut v = View::new(0, ViewKind::Surface).modifier(modifier);
    v.children = vec![child];
    v
}

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

pub fn Stack(modifier: Modifier) -> View {
    View::new(0, ViewKind::Stack).modifier(modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            color: Color::WHITE,
            font_size: 16.0, // dp (converted to px in layout/paint)
        },
    )
}

pub fn Spacer() -> View {
    Box(Modifier::new().flex_grow(1.0))
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    View::new(
        0,
        ViewKind::Button {
            text: text.into(),
            on_click: Some(Rc::new(on_click)),
        },
    )
    .semantics(Semantics::new(Role::Button))
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

// Tuple implementations
macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);

/// Styling helpers for `Text` views.
pub trait TextStyle: Sized {
    fn color(self, c: Color) -> Self;
    fn font_size(self, dp: f32) -> Self;
}

impl TextStyle for View {
    fn color(mut self, c: Color) -> Self {
        if let ViewKind::Text { color, .. } = &mut self.kind {
            *color = c;
        }
        self
    }
    fn font_size(mut self, dp: f32) -> Self {
        if let ViewKind::Text { font_size, .. } = &mut self.kind {
            *font_size = dp;
        }
        self
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("flex layout failed: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

// Button content padding defaults (dp), used when the modifier sets none.
const BUTTON_PAD_X_DP: f32 = 12.0;
const BUTTON_PAD_Y_DP: f32 = 8.0;

/// Grapheme-count estimate of rendered text extent. No rasterizer is
/// carried, so this is the headless stand-in for real shaping.
pub(crate) fn measure_text(text: &str, font_px_val: f32) -> (f32, f32) {
    let cols = text.graphemes(true).count() as f32;
    (cols * font_px_val * 0.6, font_px_val * 1.3)
}

#[derive(Clone)]
enum NodeCtx {
    Text { text: String, font_dp: f32 },
    Button { label: String, pad_dp: f32 },
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind, px: &dyn Fn(f32) -> f32) -> Style {
    let mut s = Style::default();

    s.display = match kind {
        ViewKind::Stack => Display::Grid,
        _ => Display::Flex,
    };

    if matches!(kind, ViewKind::Row) {
        s.flex_direction = FlexDirection::Row;
    }
    if matches!(kind, ViewKind::Column | ViewKind::Surface) {
        s.flex_direction = FlexDirection::Column;
    }

    s.align_items = Some(AlignItems::FlexStart);
    s.justify_content = Some(JustifyContent::FlexStart);

    if let Some(g) = m.flex_grow {
        s.flex_grow = g;
    }
    if let Some(a) = m.align_self {
        s.align_self = Some(a);
    }
    if let Some(j) = m.justify_content {
        s.justify_content = Some(j);
    }
    if let Some(a) = m.align_items_container {
        s.align_items = Some(a);
    }

    // Absolute positioning (insets converted from dp to px)
    if m.absolute {
        s.position = Position::Absolute;
        s.inset = taffy::geometry::Rect {
            left: m.offset_left.map(|v| length(px(v))).unwrap_or_else(auto),
            right: m.offset_right.map(|v| length(px(v))).unwrap_or_else(auto),
            top: m.offset_top.map(|v| length(px(v))).unwrap_or_else(auto),
            bottom: m.offset_bottom.map(|v| length(px(v))).unwrap_or_else(auto),
        };
    }

    // Padding (content box). Buttons keep padding out of the style; their
    // measure already includes it.
    if !matches!(kind, ViewKind::Button { .. })
        && let Some(p_dp) = m.padding
    {
        let v = length(px(p_dp));
        s.padding = taffy::geometry::Rect {
            left: v,
            right: v,
            top: v,
            bottom: v,
        };
    }

    // Explicit size — highest priority
    let mut width_set = false;
    let mut height_set = false;
    if let Some(sz_dp) = m.size {
        s.size.width = length(px(sz_dp.width.max(0.0)));
        s.size.height = length(px(sz_dp.height.max(0.0)));
        width_set = true;
        height_set = true;
    }
    if let Some(w_dp) = m.width {
        s.size.width = length(px(w_dp.max(0.0)));
        width_set = true;
    }
    if let Some(h_dp) = m.height {
        s.size.height = length(px(h_dp.max(0.0)));
        height_set = true;
    }

    // Fill: tight percent sizing against the parent box
    if (m.fill_max || m.fill_max_w) && !width_set {
        s.size.width = percent(1.0);
    }
    if (m.fill_max || m.fill_max_h) && !height_set {
        s.size.height = percent(1.0);
    }

    s
}

fn build_node(
    v: &View,
    t: &mut TaffyTree<NodeCtx>,
    nodes_map: &mut HashMap<ViewId, NodeId>,
    px: &dyn Fn(f32) -> f32,
) -> Result<NodeId, LayoutError> {
    let style = style_from_modifier(&v.modifier, &v.kind, px);

    let node = match &v.kind {
        ViewKind::Text {
            text,
            font_size: font_dp,
            ..
        } => t.new_leaf_with_context(
            style,
            NodeCtx::Text {
                text: text.clone(),
                font_dp: *font_dp,
            },
        )?,
        ViewKind::Button { text, .. } => t.new_leaf_with_context(
            style,
            NodeCtx::Button {
                label: text.clone(),
                pad_dp: v.modifier.padding.unwrap_or(BUTTON_PAD_X_DP),
            },
        )?,
        _ => {
            let children: Vec<NodeId> = v
                .children
                .iter()
                .map(|c| build_node(c, t, nodes_map, px))
                .collect::<Result<_, _>>()?;
            t.new_with_children(style, &children)?
        }
    };

    nodes_map.insert(v.id, node);
    Ok(node)
}

struct PaintOut {
    scene: Scene,
    hits: Vec<HitRegion>,
    sems: Vec<SemNode>,
    focused: Option<u64>,
}

/// Layout the stamped view tree and flatten it into scene + hit regions +
/// semantics. `focused` is the id of the keyboard-focused node, if any.
pub fn layout_and_paint(
    root: &View,
    size_px_u32: (u32, u32),
    focused: Option<u64>,
) -> Result<(Scene, Vec<HitRegion>, Vec<SemNode>), LayoutError> {
    let px = |dp_val: f32| dp_to_px(dp_val);

    // Assign stable preorder ids
    let mut id = 1u64;
    fn stamp(mut v: View, id: &mut u64) -> View {
        v.id = *id;
        *id += 1;
        v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
        v
    }
    let root = stamp(root.clone(), &mut id);

    let mut taffy: TaffyTree<NodeCtx> = TaffyTree::new();
    let mut nodes_map: HashMap<ViewId, NodeId> = HashMap::new();

    let root_node = build_node(&root, &mut taffy, &mut nodes_map, &px)?;

    // The root always gets the exact window box; fill/percent children
    // resolve against it.
    {
        let mut rs = taffy.style(root_node)?.clone();
        rs.size.width = length(size_px_u32.0 as f32);
        rs.size.height = length(size_px_u32.1 as f32);
        taffy.set_style(root_node, rs)?;
    }

    let available = taffy::geometry::Size {
        width: AvailableSpace::Definite(size_px_u32.0 as f32),
        height: AvailableSpace::Definite(size_px_u32.1 as f32),
    };

    taffy.compute_layout_with_measure(root_node, available, |known, _avail, _node, ctx, _style| {
        match ctx {
            Some(NodeCtx::Text { text, font_dp }) => {
                let (w, h) = measure_text(text, px(*font_dp));
                taffy::geometry::Size {
                    width: known.width.unwrap_or(w),
                    height: known.height.unwrap_or(h),
                }
            }
            Some(NodeCtx::Button { label, pad_dp }) => {
                let (w, h) = measure_text(label, px(16.0));
                taffy::geometry::Size {
                    width: known.width.unwrap_or(w + 2.0 * px(*pad_dp)),
                    height: known.height.unwrap_or(h + 2.0 * px(BUTTON_PAD_Y_DP.max(*pad_dp))),
                }
            }
            None => taffy::geometry::Size {
                width: known.width.unwrap_or(0.0),
                height: known.height.unwrap_or(0.0),
            },
        }
    })?;

    let mut out = PaintOut {
        scene: Scene {
            clear_color: theme().background,
            nodes: vec![],
        },
        hits: vec![],
        sems: vec![],
        focused,
    };

    walk(
        &root,
        &taffy,
        &nodes_map,
        &mut out,
        (0.0, 0.0),
        1.0,
        None,
    )?;

    Ok((out.scene, out.hits, out.sems))
}

fn walk(
    v: &View,
    t: &TaffyTree<NodeCtx>,
    nodes: &HashMap<ViewId, NodeId>,
    out: &mut PaintOut,
    parent_offset_px: (f32, f32),
    alpha_accum: f32,
    xform: Option<(Transform, Vec2)>,
) -> Result<(), LayoutError> {
    let layout = t.layout(nodes[&v.id])?;
    let rect = Rect {
        x: parent_offset_px.0 + layout.location.x,
        y: parent_offset_px.1 + layout.location.y,
        w: layout.size.width,
        h: layout.size.height,
    };

    // Own alpha applies to this view and everything below it.
    let alpha_accum = (alpha_accum * v.modifier.alpha.unwrap_or(1.0)).clamp(0.0, 1.0);

    // A transform scales about the center of the view it was applied to;
    // descendants inherit that anchor so the subtree moves as one.
    let xform = match (xform, v.modifier.transform) {
        (None, None) => None,
        (prev @ Some(_), None) => prev,
        (None, Some(tf)) => Some((tf, rect.center())),
        (Some((ptf, anchor)), Some(tf)) => Some((ptf.combine(&tf), anchor)),
    };
    let placed = |r: Rect| match xform {
        Some((tf, anchor)) => tf.apply_about(anchor, r),
        None => r,
    };

    let draw_rect = placed(rect);

    if let Some(bg) = v.modifier.background {
        out.scene.nodes.push(SceneNode::Rect {
            rect: draw_rect,
            color: bg.mul_alpha(alpha_accum),
            radius: v.modifier.clip_rounded.map(dp_to_px).unwrap_or(0.0),
        });
    }

    if let Some(b) = &v.modifier.border {
        out.scene.nodes.push(SceneNode::Border {
            rect: draw_rect,
            color: b.color.mul_alpha(alpha_accum),
            width: dp_to_px(b.width),
            radius: dp_to_px(b.radius.max(v.modifier.clip_rounded.unwrap_or(0.0))),
        });
    }

    match &v.kind {
        ViewKind::Text {
            text,
            color,
            font_size,
        } => {
            let font_px_val = dp_to_px(*font_size);
            out.scene.nodes.push(SceneNode::Text {
                rect: draw_rect,
                text: text.clone(),
                color: color.mul_alpha(alpha_accum),
                size: font_px_val,
            });
            if let Some(sem) = &v.semantics {
                push_sem(out, v.id, sem, Some(text.clone()), draw_rect);
            }
        }
        ViewKind::Button { text, on_click } => {
            let th = theme();
            let bg = v.modifier.background.unwrap_or(th.button_bg);
            let radius = v.modifier.clip_rounded.map(dp_to_px).unwrap_or(dp_to_px(6.0));
            out.scene.nodes.push(SceneNode::Rect {
                rect: draw_rect,
                color: bg.mul_alpha(alpha_accum),
                radius,
            });
            let font_px_val = dp_to_px(16.0);
            let (tw, th_px) = measure_text(text, font_px_val);
            out.scene.nodes.push(SceneNode::Text {
                rect: placed(Rect {
                    x: rect.x + (rect.w - tw) * 0.5,
                    y: rect.y + (rect.h - th_px) * 0.5,
                    w: tw,
                    h: th_px,
                }),
                text: text.clone(),
                color: th.on_primary.mul_alpha(alpha_accum),
                size: font_px_val,
            });

            out.hits.push(HitRegion {
                id: v.id,
                rect: draw_rect,
                on_click: on_click.clone(),
                focusable: true,
                z_index: v.modifier.z_index,
            });
            let sem = v
                .semantics
                .clone()
                .unwrap_or_else(|| Semantics::new(Role::Button));
            push_sem(out, v.id, &sem, Some(text.clone()), draw_rect);
        }
        _ => {
            if v.modifier.click {
                out.hits.push(HitRegion {
                    id: v.id,
                    rect: draw_rect,
                    on_click: None,
                    focusable: v.semantics.is_some(),
                    z_index: v.modifier.z_index,
                });
            }
            if let Some(sem) = &v.semantics {
                push_sem(out, v.id, sem, None, draw_rect);
            }
        }
    }

    for child in &v.children {
        walk(child, t, nodes, out, (rect.x, rect.y), alpha_accum, xform)?;
    }

    Ok(())
}

fn push_sem(out: &mut PaintOut, id: u64, sem: &Semantics, fallback_label: Option<String>, rect: Rect) {
    out.sems.push(SemNode {
        id,
        role: sem.role,
        label: sem.label.clone().or(fallback_label),
        rect,
        focused: out.focused == Some(id),
        enabled: sem.enabled,
    });
}
