//! Headless demo: composes a page with the floating help affordance, runs a
//! short frame loop, and toggles the affordance off partway through so the
//! exit animation is visible in the logs.

use std::time::Duration as StdDuration;

use perch_core::*;
use perch_ui::*;

fn page() -> View {
    Stack(Modifier::new().fill_max_size()).child((
        Column(Modifier::new().fill_max_size().padding(24.0)).child((
            Text("Reading list").font_size(20.0),
            Text("A quiet page with one floating affordance."),
        )),
        HelpAffordance(&current_help()),
    ))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    ensure_system_clock();

    let enabled = signal(true);
    let help = HelpHandle::new(enabled.clone(), || {
        log::info!("help requested: opening the how-to overlay");
    });

    let mut scheduler = Scheduler::new();

    for tick in 0..120u32 {
        if tick == 60 {
            log::info!("toggling help off");
            enabled.set(false);
        }

        let help = help.clone();
        let frame = scheduler.compose(
            move |_s| with_help(help.clone(), page),
            |view, size| layout_and_paint(view, size, None),
        )?;

        if tick % 15 == 0 {
            log::info!(
                "tick {tick}: {} scene nodes, {} hit regions, {} semantics nodes",
                frame.scene.nodes.len(),
                frame.hit_regions.len(),
                frame.semantics_nodes.len()
            );
        }

        // Simulate a click shortly after the affordance settles.
        if tick == 45
            && let Some(help_node) = frame
                .semantics_nodes
                .iter()
                .find(|n| n.label.as_deref() == Some(HELP_LABEL))
            && let Some(hit) = frame
                .hit_regions
                .iter()
                .find(|h| h.id == help_node.id)
            && let Some(cb) = &hit.on_click
        {
            cb();
        }

        std::thread::sleep(StdDuration::from_millis(16));
    }

    Ok(())
}
