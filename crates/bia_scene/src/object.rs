use bia_animation::TransformAction;
use bia_core::{IdentityKey, Transform};
use glam::Mat4;
use smallvec::SmallVec;

use crate::modifier::{Modifier, ModifierHandle};
use crate::{MeshKey, ObjectKey};

/// Object data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Mesh,
    Curve,
    Empty,
    Camera,
    Light,
}

/// Where a baked object came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BakeOrigin {
    /// The source object the bake read from. Lookup only.
    pub source: ObjectKey,
    pub identity: IdentityKey,
}

/// A persistent scene object.
///
/// Objects are never parented in this store, so `transform` is both the local
/// and the world transform.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub(crate) name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub mesh: Option<MeshKey>,
    pub modifiers: SmallVec<[Modifier; 2]>,
    /// Keyframed transform, created on the first inserted key.
    pub animation: Option<TransformAction>,
    /// Set on objects produced by a bake.
    pub origin: Option<BakeOrigin>,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            mesh: None,
            modifiers: SmallVec::new(),
            animation: None,
            origin: None,
        }
    }

    /// A mesh object using `mesh`.
    #[must_use]
    pub fn mesh(name: impl Into<String>, mesh: MeshKey) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::new(name, ObjectKind::Mesh)
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The first geometry-node modifier with a node group attached.
    #[must_use]
    pub fn procedural_modifier(&self) -> Option<ModifierHandle> {
        self.modifiers
            .iter()
            .position(Modifier::is_procedural)
            .map(ModifierHandle)
    }

    #[must_use]
    pub fn modifier(&self, handle: ModifierHandle) -> Option<&Modifier> {
        self.modifiers.get(handle.0)
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    /// Decomposes `matrix` into the object's channels.
    pub fn set_world_matrix(&mut self, matrix: &Mat4) {
        self.transform.apply_matrix(matrix);
    }

    /// The transform the object has at `frame`, with its keyframes applied.
    #[must_use]
    pub fn transform_at(&self, frame: f32) -> Transform {
        self.animation
            .as_ref()
            .map_or(self.transform, |action| action.evaluate(frame, &self.transform))
    }
}
