// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::{DQuat, DVec3};
use kurbo::{Rect, Size};
use magicscript_math::clamp;
use magicscript_props::{Props, token_enum};
use magicscript_scene::{
    Component, HitTestable, HostRequest, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
    PlaybackCommand,
};
use smallvec::SmallVec;

use crate::util::centered_bounds;
use crate::video::PlaybackState;

token_enum! {
    /// Playback actions a script can send to a sound.
    pub enum AudioAction: "audio action" {
        /// Play from the beginning.
        Start => "start",
        /// Stop and rewind.
        Stop => "stop",
        /// Pause at the current position.
        Pause => "pause",
        /// Continue after a pause.
        Resume => "resume",
    }
}

impl From<AudioAction> for PlaybackCommand {
    fn from(action: AudioAction) -> Self {
        match action {
            AudioAction::Start => Self::Start,
            AudioAction::Stop => Self::Stop,
            AudioAction::Pause => Self::Pause,
            AudioAction::Resume => Self::Resume,
        }
    }
}

/// Placement of one output channel of a spatial sound, relative to the node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpatialChannel {
    /// Offset of the channel's emitter.
    pub position: DVec3,
    /// Orientation of the channel's emitter.
    pub direction: DQuat,
}

/// A sound source (`Audio`).
///
/// Audio nodes take no space; their bounds are an empty box at the origin. Playback belongs
/// to the host and every action is forwarded as a [`HostRequest::Playback`].
#[derive(Debug)]
pub struct Audio {
    base: NodeBase,
    file: Option<String>,
    looping: bool,
    muted: bool,
    pitch: f64,
    volume: f64,
    spatial: bool,
    channels: SmallVec<[SpatialChannel; 2]>,
    streamed_offset: f64,
    state: PlaybackState,
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

impl Audio {
    /// Lowest accepted pitch factor.
    pub const MIN_PITCH: f64 = 0.5;
    /// Highest accepted pitch factor.
    pub const MAX_PITCH: f64 = 2.0;
    /// Highest accepted linear volume.
    pub const MAX_VOLUME: f64 = 8.0;

    /// A silent source.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// A silent source. Audio takes nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::default(),
            file: None,
            looping: false,
            muted: false,
            pitch: 1.0,
            volume: 1.0,
            spatial: false,
            channels: SmallVec::new(),
            streamed_offset: 0.0,
            state: PlaybackState::Stopped,
        };
        node.setup_node();
        node
    }

    /// A source built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Sound file location.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Whether playback restarts at the end.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Whether output is muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Pitch factor, in `[0.5, 2]`.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Linear volume, in `[0, 8]`.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether the sound is positioned in space.
    pub fn is_spatial(&self) -> bool {
        self.spatial
    }

    /// Placement of a spatial channel.
    pub fn channel(&self, index: usize) -> Option<SpatialChannel> {
        self.channels.get(index).copied()
    }

    /// Start offset for streamed files, in seconds.
    pub fn streamed_offset(&self) -> f64 {
        self.streamed_offset
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
            source: self.file.clone(),
        });
    }

    fn channel_mut(&mut self, index: usize) -> &mut SpatialChannel {
        if self.channels.len() <= index {
            self.channels.resize(index + 1, SpatialChannel::default());
        }
        &mut self.channels[index]
    }
}

/// Channel index from a spatial sound property object.
fn channel_index(props: &Props) -> Option<usize> {
    props.int("channel").and_then(|c| usize::try_from(c).ok())
}

impl Measurable for Audio {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        Size::ZERO
    }
}

impl Layoutable for Audio {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_pivot(&mut self) {}

    fn get_bounds(&self, parent_space: bool, scaled: bool) -> Rect {
        centered_bounds(self, parent_space, scaled)
    }
}

impl HitTestable for Audio {}

impl Component for Audio {
    fn kind(&self) -> &'static str {
        "Audio"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(file) = props
            .string("fileName")
            .or_else(|| props.file_url("filePath"))
            && self.file.as_deref() != Some(file)
        {
            self.file = Some(file.to_owned());
            self.state = PlaybackState::Stopped;
        }
        if let Some(looping) = props.bool("soundLooping") {
            self.looping = looping;
        }
        if let Some(muted) = props.bool("soundMute") {
            self.muted = muted;
        }
        if let Some(pitch) = props.number("soundPitch") {
            self.pitch = clamp(pitch, Self::MIN_PITCH, Self::MAX_PITCH);
        }
        if let Some(volume) = props.number("soundVolumeLinear") {
            self.volume = clamp(volume, 0.0, Self::MAX_VOLUME);
        }
        if let Some(spatial) = props.bool("spatialSoundEnable") {
            self.spatial = spatial;
        }
        if let Some(position) = props.object("spatialSoundPosition")
            && let Some(index) = channel_index(&position)
            && let Some(offset) = position.vec3("channelPosition")
        {
            self.channel_mut(index).position = offset;
        }
        if let Some(direction) = props.object("spatialSoundDirection")
            && let Some(index) = channel_index(&direction)
            && let Some(rotation) = direction.quat("channelDirection")
        {
            self.channel_mut(index).direction = rotation;
        }
        if let Some(offset) = props.number("streamedFileOffset") {
            self.streamed_offset = offset.max(0.0);
        }
        if let Some(action) = props.token::<AudioAction>("action") {
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
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn takes_no_space() {
        let mut audio = Audio::with_props(&props(json!({ "localPosition": [1, 2, 0] })));
        settle(&mut audio);
        assert_eq!(audio.get_size(false), Size::ZERO);
        assert_eq!(audio.get_bounds(true, false), Rect::new(1.0, 2.0, 1.0, 2.0));
    }

    #[test]
    fn actions_follow_the_state() {
        let mut audio = Audio::with_props(&props(json!({
            "fileName": "chime.wav",
            "action": "start",
        })));
        audio.update(&props(json!({ "action": "pause" })));
        audio.update(&props(json!({ "action": "resume" })));
        assert_eq!(audio.state(), PlaybackState::Playing);
        let commands: Vec<_> = audio
            .base_mut()
            .take_requests()
            .into_iter()
            .map(|r| match r {
                HostRequest::Playback { command, source } => {
                    assert_eq!(source.as_deref(), Some("chime.wav"));
                    command
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            commands,
            [PlaybackCommand::Start, PlaybackCommand::Pause, PlaybackCommand::Resume]
        );
    }

    #[test]
    fn spatial_channels() {
        let audio = Audio::with_props(&props(json!({
            "spatialSoundEnable": true,
            "spatialSoundPosition": { "channel": 1, "channelPosition": [0, 0, -1] },
            "spatialSoundDirection": { "channel": 1, "channelDirection": [0, 0, 0, 1] },
        })));
        assert!(audio.is_spatial());
        assert_eq!(audio.channel(0), Some(SpatialChannel::default()));
        let right = audio.channel(1).unwrap();
        assert_eq!(right.position, DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(right.direction, DQuat::IDENTITY);
        assert_eq!(audio.channel(2), None);
    }

    #[test]
    fn defaults() {
        let audio = Audio::new();
        assert_eq!((audio.pitch(), audio.volume()), (1.0, 1.0));
        assert!(!audio.is_looping() && !audio.is_muted() && !audio.is_spatial());
        assert_eq!(audio.state(), PlaybackState::Stopped);
    }

    proptest! {
        #[test]
        fn pitch_and_volume_are_clamped(pitch in -10.0..10.0_f64, volume in -10.0..20.0_f64) {
            let audio = Audio::with_props(&props(json!({
                "soundPitch": pitch,
                "soundVolumeLinear": volume,
            })));
            prop_assert!((0.5..=2.0).contains(&audio.pitch()));
            prop_assert!((0.0..=8.0).contains(&audio.volume()));
        }
    }
}
