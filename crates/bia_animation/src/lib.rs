//! Keyframe storage for baked objects.
//!
//! Each baked object owns one [`TransformAction`]: three keyframe tracks, one
//! per transform channel, holding a value per keyed frame.

mod values;
pub mod action;
pub mod channel;
pub mod tracks;

pub use action::TransformAction;
pub use channel::TransformChannel;
pub use tracks::{InterpolationMode, KeyframeTrack};
pub use values::Interpolatable;
