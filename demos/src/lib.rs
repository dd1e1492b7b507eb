// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers shared by the MagicScript demos.
//!
//! Run:
//! - `cargo run -p magicscript_demos --example scroll_list`
//! - `cargo run -p magicscript_demos --example controls`
//!
//! Set `RUST_LOG=debug` to also see what the nodes ignore.

use glam::DVec3;
use log::info;
use magicscript_math::Ray;
use magicscript_props::{Props, PropsError};
use magicscript_scene::{HostRequest, LoadError, Resource, ResourceKind, Scene};

/// Install `env_logger`, defaulting to `info`.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Property bag from a JSON literal.
pub fn props(value: serde_json::Value) -> Result<Props, PropsError> {
    Props::try_from(value)
}

/// A ray from in front of the `z = 0` plane, pointing straight into it at `(x, y)`.
pub fn poke(x: f64, y: f64) -> Ray {
    Ray::new(DVec3::new(x, y, 1.0), DVec3::NEG_Z, 10.0)
}

/// Log and clear every event the scene queued.
pub fn log_events(scene: &mut Scene) {
    for (id, event) in scene.drain_events() {
        info!("{id:?}: {event:?}");
    }
}

/// Stand-in for the platform: answers load requests with `resolve` and logs the rest.
#[derive(Debug)]
pub struct FakeHost<F> {
    resolve: F,
}

impl<F> FakeHost<F>
where
    F: Fn(&str, ResourceKind) -> Result<Resource, LoadError>,
{
    /// A host resolving locations with `resolve`.
    pub fn new(resolve: F) -> Self {
        Self { resolve }
    }

    /// Handle everything the scene asked for so far.
    ///
    /// Returns how many loads were delivered and accepted.
    pub fn serve(&self, scene: &mut Scene) -> usize {
        let mut delivered = 0;
        for (id, request) in scene.drain_requests() {
            match request {
                HostRequest::Load { ticket, kind, url } => {
                    info!("{id:?}: loading {kind:?} from {url}");
                    if scene.complete_load(id, ticket, (self.resolve)(&url, kind)) {
                        delivered += 1;
                    }
                }
                other => info!("{id:?}: host request {other:?}"),
            }
        }
        delivered
    }
}
