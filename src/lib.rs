#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Bake procedurally generated instances into keyframed objects.
//!
//! A bake runs two phases per selected source object:
//!
//! 1. [`snapshot`]: at the starting frame, every instance the source generates
//!    becomes a persistent mesh object, tagged with the instance's identity.
//! 2. [`sampler`]: for every frame of the range, the graph is re-evaluated and
//!    each object is keyed with the world transform of its instance, found by
//!    stable id ([`matching`]).
//!
//! [`operator`] wraps the run into the user-facing action.

pub mod about;
pub mod bake;
pub mod matching;
pub mod operator;
pub mod report;
pub mod sampler;
pub mod snapshot;

pub use bia_animation as animation;
pub use bia_core as core;
pub use bia_depsgraph as depsgraph;
pub use bia_scene as scene;

pub use bake::{bake_instance_animation, eligible_sources};
pub use bia_core::{BakeError, BakeSettings, FrameRange, IdentityKey, InstanceIdentity, Transform};
pub use bia_depsgraph::{DependencyGraph, EvaluationContext, ProceduralGraph};
pub use bia_scene::{Scene, SceneObject};
pub use matching::{InstanceIndex, MatchResult};
pub use operator::{BakeInstanceAnimation, OperatorOutcome, ShowReadme};
pub use report::{BakeReport, SourceReport};
pub use snapshot::{BakedOutput, SourceSnapshot};
