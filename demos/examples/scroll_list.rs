// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A clipped, draggable list: `UiScrollView` + `UiGroup` of `UiText` rows + `UiScrollBar`.
//!
//! Shows how the scroll view:
//! - clips its content to the scroll bounds (rows outside never hit),
//! - maps a drag along its axis to a scroll value,
//! - drives its scroll bar thumb and fades it out again.
//!
//! Run:
//! - `cargo run -p magicscript_demos --example scroll_list`

use std::error::Error;

use log::info;
use magicscript_demos::{init_logging, log_events, poke, props};
use magicscript_nodes::{Group, NodeFactory, ScrollBar, ScrollView};
use magicscript_scene::{Layoutable, NodeId, Scene};
use serde_json::json;

const ROWS: usize = 12;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut scene = Scene::new();
    let factory = NodeFactory::for_scene(&scene);
    let spawn = |scene: &mut Scene,
                 parent: Option<NodeId>,
                 kind: &str,
                 value: serde_json::Value|
     -> Result<NodeId, Box<dyn Error>> {
        let props = props(value)?;
        let id = factory
            .spawn(scene, parent, kind, &props)
            .ok_or_else(|| format!("unknown kind {kind}"))?;
        Ok(id)
    };

    let view = spawn(
        &mut scene,
        None,
        "UiScrollView",
        json!({
            "name": "list",
            "scrollDirection": "vertical",
            "scrollBounds": { "min": [-0.25, -0.2, -0.05], "max": [0.25, 0.2, 0.05] },
        }),
    )?;
    let rows = spawn(&mut scene, Some(view), "UiGroup", json!({}))?;
    for row in 0..ROWS {
        let y = 0.15 - 0.1 * row as f64;
        spawn(
            &mut scene,
            Some(rows),
            "UiText",
            json!({
                "text": format!("Row {row}"),
                "textSize": 0.04,
                "localPosition": [-0.2, y, 0],
            }),
        )?;
    }
    let bar = spawn(
        &mut scene,
        Some(view),
        "UiScrollBar",
        json!({ "length": 0.4, "localPosition": [0.24, 0, 0] }),
    )?;

    let measured = scene.layout();
    info!("first layout measured {measured} nodes");
    if let Some(group) = scene.node::<Group>(rows) {
        info!("{} rows covering {:?}", group.items_count(), group.get_bounds(false, false));
    }

    // The top row is inside the viewport; the bottom rows are clipped away.
    info!("hit at the top: {:?}", scene.hit_test(view, &poke(-0.15, 0.17)));
    info!("hit below the viewport: {:?}", scene.hit_test(view, &poke(-0.15, -0.6)));

    // Drag the list up by 10 cm.
    let session = scene
        .begin_drag(view, &poke(0.0, 0.0))
        .ok_or("nothing draggable under the pointer")?;
    for step in 1..=4 {
        let y = 0.025 * f64::from(step);
        let value = scene.drag(&session, &poke(0.0, y));
        info!("drag to y={y:.3}: scroll value {value:?}");
    }
    scene.layout();
    log_events(&mut scene);

    if let (Some(list), Some(bar)) = (scene.node::<ScrollView>(view), scene.node::<ScrollBar>(bar)) {
        info!(
            "scroll value {:.3}, content moved by {:?}, thumb at {:.3}",
            list.scroll_value(),
            list.content_translation(),
            bar.thumb_position()
        );
    }

    // Let the automatic scroll bar fade out.
    for _ in 0..30 {
        scene.tick(0.1);
    }
    if let Some(bar) = scene.node::<ScrollBar>(bar) {
        info!("after 3 s the bar is visible: {}", bar.base().is_visible());
    }
    Ok(())
}
