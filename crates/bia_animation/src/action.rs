use bia_core::Transform;
use glam::Vec3;

use crate::channel::TransformChannel;
use crate::tracks::{InterpolationMode, KeyframeTrack};

/// Keyframed transform of one object.
///
/// Frames are stored as `f32` times like any animation curve; the bake only
/// ever writes whole frames.
#[derive(Debug, Clone, Default)]
pub struct TransformAction {
    pub location: KeyframeTrack<Vec3>,
    pub rotation_euler: KeyframeTrack<Vec3>,
    pub scale: KeyframeTrack<Vec3>,
}

impl TransformAction {
    #[must_use]
    pub fn new(interpolation: InterpolationMode) -> Self {
        let track = || KeyframeTrack {
            times: Vec::new(),
            values: Vec::new(),
            interpolation,
        };
        Self {
            location: track(),
            rotation_euler: track(),
            scale: track(),
        }
    }

    #[must_use]
    pub fn track(&self, channel: TransformChannel) -> &KeyframeTrack<Vec3> {
        match channel {
            TransformChannel::Location => &self.location,
            TransformChannel::RotationEuler => &self.rotation_euler,
            TransformChannel::Scale => &self.scale,
        }
    }

    pub fn track_mut(&mut self, channel: TransformChannel) -> &mut KeyframeTrack<Vec3> {
        match channel {
            TransformChannel::Location => &mut self.location,
            TransformChannel::RotationEuler => &mut self.rotation_euler,
            TransformChannel::Scale => &mut self.scale,
        }
    }

    /// Keys the current value of `channel` from `transform` at `frame`.
    pub fn insert_keyframe(&mut self, channel: TransformChannel, frame: f32, transform: &Transform) {
        let value = match channel {
            TransformChannel::Location => transform.location,
            TransformChannel::RotationEuler => transform.rotation_euler,
            TransformChannel::Scale => transform.scale,
        };
        log::trace!("key {} = {value} @ {frame}", channel.data_path());
        self.track_mut(channel).insert(frame, value);
    }

    /// The transform keyed exactly at `frame`, if all three channels carry a key there.
    #[must_use]
    pub fn keyed_transform(&self, frame: f32) -> Option<Transform> {
        Some(Transform {
            location: self.location.key_at(frame)?,
            rotation_euler: self.rotation_euler.key_at(frame)?,
            scale: self.scale.key_at(frame)?,
        })
    }

    /// Evaluates every channel at `frame`. Channels without keys keep the value
    /// from `rest`.
    #[must_use]
    pub fn evaluate(&self, frame: f32, rest: &Transform) -> Transform {
        Transform {
            location: self.location.sample(frame).unwrap_or(rest.location),
            rotation_euler: self.rotation_euler.sample(frame).unwrap_or(rest.rotation_euler),
            scale: self.scale.sample(frame).unwrap_or(rest.scale),
        }
    }

    /// Frames carrying a location key, ascending.
    #[must_use]
    pub fn keyed_frames(&self) -> &[f32] {
        self.location.times()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        TransformChannel::ALL.iter().all(|&channel| self.track(channel).is_empty())
    }
}
