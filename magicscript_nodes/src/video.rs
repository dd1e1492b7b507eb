// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use magicscript_math::{Alignment, clamp};
use magicscript_props::{Props, token_enum};
use magicscript_scene::{
    Component, HitTestable, HostRequest, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
    PlaybackCommand,
};

use crate::util::replace;

/// Where a media node is in its playback.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Not playing, positioned at the start.
    #[default]
    Stopped,
    /// Playing.
    Playing,
    /// Paused at the current position.
    Paused,
}

impl PlaybackState {
    /// State after the player runs `command`.
    pub fn after(self, command: PlaybackCommand) -> Self {
        match command {
            PlaybackCommand::Start => Self::Playing,
            PlaybackCommand::Stop => Self::Stopped,
            PlaybackCommand::Pause if self == Self::Playing => Self::Paused,
            PlaybackCommand::Resume if self == Self::Paused => Self::Playing,
            PlaybackCommand::Pause | PlaybackCommand::Resume => self,
        }
    }
}

token_enum! {
    /// How a video frame is mapped onto the surface.
    pub enum ViewMode: "video view mode" {
        /// The whole frame covers the surface.
        FullArea => "full-area",
        /// Side by side stereo: left half for the left eye, right half for the right.
        LeftRight => "left-right",
    }
}

token_enum! {
    /// Playback actions a script can send to a video.
    pub enum VideoAction: "video action" {
        /// Play from the beginning.
        Start => "start",
        /// Stop and rewind.
        Stop => "stop",
        /// Pause at the current position.
        Pause => "pause",
    }
}

impl From<VideoAction> for PlaybackCommand {
    fn from(action: VideoAction) -> Self {
        match action {
            VideoAction::Start => Self::Start,
            VideoAction::Stop => Self::Stop,
            VideoAction::Pause => Self::Pause,
        }
    }
}

/// A video surface (`UiVideo`).
///
/// Decoding and playback belong to the host. The node keeps the settings and forwards every
/// action as a [`HostRequest::Playback`].
#[derive(Debug)]
pub struct Video {
    base: NodeBase,
    resolution: (u32, u32),
    size: Size,
    volume: f64,
    looping: bool,
    path: Option<String>,
    view_mode: ViewMode,
    state: PlaybackState,
}

impl Default for Video {
    fn default() -> Self {
        Self::new()
    }
}

impl Video {
    /// Largest accepted resolution along either axis, in pixels.
    pub const MAX_RESOLUTION: u32 = 2048;
    /// Resolution along either axis when not set.
    pub const DEFAULT_RESOLUTION: u32 = 512;
    /// Volume when not set.
    pub const DEFAULT_VOLUME: f64 = 0.5;

    /// A stopped, empty video.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// A stopped, empty video. Videos take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            resolution: (Self::DEFAULT_RESOLUTION, Self::DEFAULT_RESOLUTION),
            size: Size::new(1.0, 1.0),
            volume: Self::DEFAULT_VOLUME,
            looping: true,
            path: None,
            view_mode: ViewMode::FullArea,
            state: PlaybackState::Stopped,
        };
        node.setup_node();
        node
    }

    /// A video built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Texture resolution in pixels, `(width, height)`.
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// Texture width in pixels, clamped to `[1, 2048]`.
    pub fn set_resolution_width(&mut self, width: f64) {
        if replace(&mut self.resolution.0, pixels(width)) {
            self.set_needs_layout();
        }
    }

    /// Texture height in pixels, clamped to `[1, 2048]`.
    pub fn set_resolution_height(&mut self, height: f64) {
        if replace(&mut self.resolution.1, pixels(height)) {
            self.set_needs_layout();
        }
    }

    /// Surface size in meters.
    pub fn set_size(&mut self, size: Size) {
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        if replace(&mut self.size, size) {
            self.set_needs_layout();
        }
    }

    /// Volume, in `[0, 1]`.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether playback restarts at the end.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Location of the video.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Frame mapping.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Playback state as last commanded.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Run a playback command and forward it to the host.
    pub fn play(&mut self, command: PlaybackCommand) {
        self.state = self.state.after(command);
        self.base.request(HostRequest::Playback {
            command,
            source: self.path.clone(),
        });
    }
}

/// Pixel dimension from a script number.
fn pixels(value: f64) -> u32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is clamped to [1, 2048] first"
    )]
    let pixels = clamp(value.round(), 1.0, f64::from(Video::MAX_RESOLUTION)) as u32;
    pixels
}

impl Measurable for Video {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        self.size
    }
}

impl Layoutable for Video {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}

impl HitTestable for Video {}

impl Component for Video {
    fn kind(&self) -> &'static str {
        "UiVideo"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(width) = props.number("width") {
            self.set_resolution_width(width);
        }
        if let Some(height) = props.number("height") {
            self.set_resolution_height(height);
        }
        if let Some(size) = props.size("size") {
            self.set_size(size);
        }
        if let Some(volume) = props.number("volume") {
            self.volume = clamp(volume, 0.0, 1.0);
        }
        if let Some(looping) = props.bool("looping") {
            self.looping = looping;
        }
        if let Some(path) = props.file_url("videoPath")
            && self.path.as_deref() != Some(path)
        {
            self.path = Some(path.to_owned());
            self.state = PlaybackState::Stopped;
        }
        if let Some(mode) = props.token("viewMode") {
            self.view_mode = mode;
        }
        if let Some(action) = props.token::<VideoAction>("action") {
            self.play(action.into());
        }
    }

    fn destroy(&mut self) {
        if self.state != PlaybackState::Stopped {
            self.play(PlaybackCommand::Stop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{props, settle};
    use serde_json::json;

    #[test]
    fn defaults() {
        let mut video = Video::new();
        settle(&mut video);
        assert_eq!(video.get_size(false), Size::new(1.0, 1.0));
        assert_eq!(video.resolution(), (512, 512));
        assert_eq!(video.volume(), 0.5);
        assert!(video.is_looping());
        assert_eq!(video.view_mode(), ViewMode::FullArea);
        assert_eq!(video.base().alignment(), Alignment::CenterCenter);
    }

    #[test]
    fn numbers_are_clamped() {
        let video = Video::with_props(&props(json!({
            "width": 4096,
            "height": 0,
            "volume": 1.5,
        })));
        assert_eq!(video.resolution(), (2048, 1));
        assert_eq!(video.volume(), 1.0);
    }

    #[test]
    fn actions_are_forwarded() {
        let mut video = Video::with_props(&props(json!({
            "videoPath": "file:///clip.mp4",
            "action": "start",
        })));
        assert_eq!(video.state(), PlaybackState::Playing);
        video.update(&props(json!({ "action": "pause" })));
        assert_eq!(video.state(), PlaybackState::Paused);
        video.update(&props(json!({ "action": "rewind" })));
        assert_eq!(video.state(), PlaybackState::Paused, "unknown actions are ignored");

        let source = Some("file:///clip.mp4".to_owned());
        assert_eq!(
            video.base_mut().take_requests(),
            vec![
                HostRequest::Playback {
                    command: PlaybackCommand::Start,
                    source: source.clone(),
                },
                HostRequest::Playback {
                    command: PlaybackCommand::Pause,
                    source,
                },
            ]
        );
    }

    #[test]
    fn resolution_dirties_only_on_change() {
        let mut video = Video::new();
        settle(&mut video);
        video.update(&props(json!({ "width": 4096 })));
        assert_eq!(video.resolution(), (2048, 512));
        assert!(video.is_layout_needed());

        settle(&mut video);
        video.update(&props(json!({ "width": 5000, "height": 512 })));
        assert!(!video.is_layout_needed(), "same clamped values");

        video.update(&props(json!({ "height": -3 })));
        assert_eq!(video.resolution(), (2048, 1));
        assert!(video.is_layout_needed());
    }

    #[test]
    fn surface_size_relayouts() {
        let mut video = Video::new();
        settle(&mut video);
        video.update(&props(json!({ "volume": 0.1 })));
        assert!(!video.is_layout_needed(), "volume is not layout");
        video.update(&props(json!({ "size": [1.6, 0.9] })));
        settle(&mut video);
        assert_eq!(video.get_size(false), Size::new(1.6, 0.9));
    }

    #[test]
    fn stopped_on_destroy() {
        let mut video = Video::with_props(&props(json!({ "action": "start" })));
        video.base_mut().take_requests();
        video.destroy();
        assert_eq!(video.state(), PlaybackState::Stopped);
        assert_eq!(video.base_mut().take_requests().len(), 1);
    }

    #[test]
    fn pause_needs_playback() {
        assert_eq!(
            PlaybackState::Stopped.after(PlaybackCommand::Pause),
            PlaybackState::Stopped
        );
        assert_eq!(
            PlaybackState::Paused.after(PlaybackCommand::Resume),
            PlaybackState::Playing
        );
    }
}
