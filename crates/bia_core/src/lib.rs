//! Core types shared by every crate of the instance baking workspace.
//!
//! - [`errors`]: the error taxonomy of a bake run
//! - [`identity`]: how a live instance is recognised across frames
//! - [`frame`]: inclusive frame ranges and the frame bounds accepted by the host
//! - [`settings`]: user-facing bake configuration
//! - [`transform`]: location / Euler rotation / scale decomposition of world matrices

pub mod errors;
pub mod frame;
pub mod identity;
pub mod settings;
pub mod transform;

pub use errors::{BakeError, EvalError, ExtractError, Result, SceneError};
pub use frame::{FRAME_MAX, FRAME_MIN, FrameRange};
pub use identity::{IdentityKey, InstanceIdentity};
pub use settings::{BakeSettings, DEFAULT_COLLECTION_NAME};
pub use transform::{Transform, compatible_euler};
