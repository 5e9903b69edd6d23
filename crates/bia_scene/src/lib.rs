//! In-memory scene store.
//!
//! Holds the persistent side of a scene:
//! - [`SceneObject`]: named objects with a transform, optional mesh, modifier stack and keyframes
//! - [`MeshData`]: static triangle meshes owned by the scene
//! - [`Collection`]: named groupings of objects under a master collection
//! - the user's selection
//!
//! Evaluated (per-frame) state is not stored here; see `bia_depsgraph`.

pub mod collection;
pub mod mesh;
pub mod modifier;
pub mod object;
pub mod scene;

pub use collection::Collection;
pub use mesh::MeshData;
pub use modifier::{Modifier, ModifierHandle, ModifierKind};
pub use object::{BakeOrigin, ObjectKind, SceneObject};
pub use scene::{MASTER_COLLECTION_NAME, Scene};

use slotmap::new_key_type;

new_key_type! {
    pub struct ObjectKey;
    pub struct MeshKey;
    pub struct CollectionKey;
}
