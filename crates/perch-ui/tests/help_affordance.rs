use std::cell::Cell;
use std::rc::Rc;

use perch_core::*;
use perch_ui::*;
use web_time::Duration;

fn spring() -> AnimationSpec {
    AnimationSpec::spring()
}

/// A small page with the affordance wired through the ambient adapter.
fn page(help: HelpHandle) -> View {
    with_help(help, || {
        Stack(Modifier::new().fill_max_size()).child((
            Column(Modifier::new().fill_max_size().padding(24.0))
                .child(Text("Reading list").font_size(20.0)),
            HelpAffordance(&current_help()),
        ))
    })
}

fn rule_with(enabled: Signal<bool>, triggers: Rc<Cell<u32>>) -> UiTestRule {
    UiTestRule::new(move || {
        let t = triggers.clone();
        let handle = HelpHandle::new(enabled.clone(), move || t.set(t.get() + 1));
        page(handle)
    })
}

#[test]
fn disabled_page_has_no_help_button() {
    let mut rule = rule_with(signal(false), Rc::new(Cell::new(0)));
    rule.frame().unwrap();

    assert_eq!(rule.count_labeled(HELP_LABEL), 0);
    assert!(rule.last_frame().hit_regions.is_empty());
}

#[test]
fn enabled_page_has_exactly_one_help_button() {
    let mut rule = rule_with(signal(true), Rc::new(Cell::new(0)));
    rule.frame().unwrap();
    rule.settle(spring()).unwrap();

    let nodes = rule.nodes_labeled(HELP_LABEL);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].role, Role::Button);
    assert!(nodes[0].enabled);
}

#[test]
fn click_fires_trigger_once_per_activation() {
    let triggers = Rc::new(Cell::new(0));
    let mut rule = rule_with(signal(true), triggers.clone());
    rule.frame().unwrap();
    rule.settle(spring()).unwrap();

    assert!(rule.click_labeled(HELP_LABEL));
    assert_eq!(triggers.get(), 1);

    assert!(rule.click_labeled(HELP_LABEL));
    assert_eq!(triggers.get(), 2);
}

#[test]
fn keyboard_focus_and_activation() {
    let triggers = Rc::new(Cell::new(0));
    let mut rule = rule_with(signal(true), triggers.clone());
    rule.frame().unwrap();
    rule.settle(spring()).unwrap();

    rule.focus_next();
    rule.frame().unwrap();

    let nodes = rule.nodes_labeled(HELP_LABEL);
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].focused);

    assert!(rule.activate_focused());
    assert_eq!(triggers.get(), 1);
}

#[test]
fn exit_keeps_button_mounted_until_animation_completes() {
    let enabled = signal(true);
    let mut rule = rule_with(enabled.clone(), Rc::new(Cell::new(0)));
    rule.frame().unwrap();
    rule.settle(spring()).unwrap();
    assert_eq!(rule.count_labeled(HELP_LABEL), 1);

    enabled.set(false);
    rule.frame().unwrap();
    // Exit in progress: still present and still hit-testable.
    assert_eq!(rule.count_labeled(HELP_LABEL), 1);

    rule.advance(Duration::from_millis(100));
    rule.frame().unwrap();
    assert_eq!(rule.count_labeled(HELP_LABEL), 1);

    rule.settle(spring()).unwrap();
    assert_eq!(rule.count_labeled(HELP_LABEL), 0);
    assert!(rule.last_frame().hit_regions.is_empty());
}

#[test]
fn toggling_is_idempotent_and_leaks_no_state() {
    let enabled = signal(true);
    let mut rule = rule_with(enabled.clone(), Rc::new(Cell::new(0)));
    rule.frame().unwrap();
    rule.settle(spring()).unwrap();

    let slots_after_first_show = COMPOSER.with(|c| c.borrow().keyed_slots.len());

    for _ in 0..3 {
        enabled.set(false);
        rule.frame().unwrap();
        rule.settle(spring()).unwrap();
        assert_eq!(rule.count_labeled(HELP_LABEL), 0);

        enabled.set(true);
        rule.frame().unwrap();
        rule.settle(spring()).unwrap();
        assert_eq!(rule.count_labeled(HELP_LABEL), 1);
    }

    let slots_after_cycles = COMPOSER.with(|c| c.borrow().keyed_slots.len());
    assert_eq!(slots_after_first_show, slots_after_cycles);
}

#[test]
fn ambient_handle_defaults_to_disabled_outside_provider() {
    let handle = current_help();
    assert!(!handle.is_enabled());
    handle.trigger(); // must be a no-op, not a panic

    let mut rule = UiTestRule::new(|| {
        Stack(Modifier::new().fill_max_size()).child(HelpAffordance(&current_help()))
    });
    rule.frame().unwrap();
    assert_eq!(rule.count_labeled(HELP_LABEL), 0);
}

#[test]
fn enter_fades_in_from_transparent() {
    let mut rule = rule_with(signal(true), Rc::new(Cell::new(0)));
    rule.frame().unwrap();

    let label_alpha = |frame: &Frame| {
        frame
            .scene
            .nodes
            .iter()
            .find_map(|n| match n {
                SceneNode::Text { text, color, .. } if text == HELP_LABEL => Some(color.3),
                _ => None,
            })
            .expect("help label in scene")
    };

    assert_eq!(label_alpha(rule.last_frame()), 0);

    rule.settle(spring()).unwrap();
    assert_eq!(label_alpha(rule.last_frame()), 255);
}

#[test]
fn help_button_hit_region_wins_over_page_content() {
    let mut rule = rule_with(signal(true), Rc::new(Cell::new(0)));
    rule.frame().unwrap();
    rule.settle(spring()).unwrap();

    let id = rule.nodes_labeled(HELP_LABEL)[0].id;
    let hit = rule
        .last_frame()
        .hit_regions
        .iter()
        .find(|h| h.id == id)
        .expect("help button hit region");
    assert!(hit.z_index > 0.0);
}

#[test]
fn settles_in_bottom_right_corner() {
    let mut rule = rule_with(signal(true), Rc::new(Cell::new(0)));
    rule.frame().unwrap();
    rule.settle(spring()).unwrap();

    let nodes = rule.nodes_labeled(HELP_LABEL);
    let r = nodes[0].rect;

    // 16dp margin from each edge of the 1280x800 window.
    assert!(((1280.0 - 16.0) - (r.x + r.w)).abs() < 1.5, "right edge at {}", r.x + r.w);
    assert!(((800.0 - 16.0) - (r.y + r.h)).abs() < 1.5, "bottom edge at {}", r.y + r.h);
}
