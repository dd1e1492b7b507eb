// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input on the basic controls, and a host serving image loads.
//!
//! Walks through:
//! - tapping a `UiButton` and letting its press animation finish,
//! - focusing a `UiToggle` (focus flips it and is released at once),
//! - dragging a `UiSlider`,
//! - holding a `UiCircleConfirmation` until it completes,
//! - a `UiImage` whose first location is replaced before it arrives, and whose second fails.
//!
//! Run:
//! - `cargo run -p magicscript_demos --example controls`

use std::error::Error;

use glam::DVec3;
use log::info;
use magicscript_demos::{FakeHost, init_logging, log_events, poke, props};
use magicscript_nodes::{Button, CircleConfirmation, Image, Slider, Toggle};
use magicscript_scene::{Layoutable, LoadError, Resource, ResourceKind, Scene};
use serde_json::json;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut scene = Scene::new();

    let button = scene.insert(
        None,
        Button::with_props(&props(json!({ "text": "Save", "localPosition": [0, 0.3, 0] }))?),
    );
    let toggle = scene.insert(
        None,
        Toggle::with_props(&props(json!({ "text": "Wi-Fi", "localPosition": [0, 0.15, 0] }))?),
    );
    let slider = scene.insert(
        None,
        Slider::with_props(&props(json!({ "width": 0.4, "min": 0, "max": 100, "value": 50 }))?),
    );
    let ring = scene.insert(
        None,
        CircleConfirmation::with_props(&props(json!({ "localPosition": [0, -0.15, 0] }))?),
    );
    scene.layout();

    if let Some(node) = scene.node::<Button>(button) {
        info!("button size {:?}, outline {:?}", node.get_size(false), node.outline());
    }

    // Button: activation taps it and starts the press animation.
    scene.activate(button);
    for _ in 0..3 {
        scene.tick(0.05);
        if let Some(node) = scene.node::<Button>(button) {
            info!("button pressed in by {:.4}", node.press_offset());
        }
    }
    log_events(&mut scene);

    // Toggle: focus acts as a click.
    let change = scene.request_focus(toggle);
    info!("focus change {change:?}, focused now {:?}", scene.focused());
    if let Some(node) = scene.node::<Toggle>(toggle) {
        info!("toggle is on: {}", node.is_on());
    }
    log_events(&mut scene);

    // Slider: drag from the middle of the track to three quarters.
    if let Some(session) = scene.begin_drag(slider, &poke(0.0, 0.0)) {
        let value = scene.drag(&session, &poke(0.1, 0.0));
        info!("slider dragged to {value:?}");
    }
    if let Some(node) = scene.node::<Slider>(slider) {
        info!("slider value {}", node.value());
    }
    log_events(&mut scene);

    // Circle confirmation: hold for the full configured duration.
    scene.long_press_started(ring);
    let duration = scene.config().confirmation_duration;
    for _ in 0..4 {
        scene.tick(duration / 4.0);
    }
    scene.long_press_ended(ring);
    if let Some(node) = scene.node::<CircleConfirmation>(ring) {
        info!("confirmation value {} completed {}", node.value(), node.is_completed());
    }
    log_events(&mut scene);

    // Image: the host answers after the location already changed, then fails the new one.
    let image = scene.insert(
        None,
        Image::with_props(&props(json!({ "filePath": "https://example.com/a.png", "width": 0.3 }))?),
    );
    scene.update(image, &props(json!({ "filePath": { "uri": "file:///missing.png" } }))?)?;
    let host = FakeHost::new(|url: &str, kind: ResourceKind| match (url, kind) {
        (url, ResourceKind::Image) if url.starts_with("https") => Ok(Resource::Image {
            width: 640.0,
            height: 480.0,
        }),
        (url, ResourceKind::Image) => Err(LoadError::NotFound(url.to_owned())),
        (_, ResourceKind::Model) => Ok(Resource::Model {
            min: DVec3::splat(-0.5),
            max: DVec3::splat(0.5),
        }),
    });
    info!("host delivered {} loads", host.serve(&mut scene));
    scene.layout();
    if let Some(node) = scene.node::<Image>(image) {
        info!("image size {:?}, picture {:?}", node.get_size(false), node.image_size());
    }
    log_events(&mut scene);

    scene.remove(image)?;
    log_events(&mut scene);
    Ok(())
}
