use bia_animation::{TransformAction, TransformChannel};
use bia_core::SceneError;
use glam::Mat4;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::collection::Collection;
use crate::mesh::MeshData;
use crate::object::{ObjectKind, SceneObject};
use crate::{CollectionKey, MeshKey, ObjectKey};

/// Name of the collection every scene starts with.
pub const MASTER_COLLECTION_NAME: &str = "Scene Collection";

/// Persistent scene storage.
///
/// Object and collection names are unique within a scene; a taken name gets a
/// `.001`, `.002`, ... suffix.
pub struct Scene {
    objects: SlotMap<ObjectKey, SceneObject>,
    meshes: SlotMap<MeshKey, MeshData>,
    collections: SlotMap<CollectionKey, Collection>,

    master_collection: CollectionKey,
    object_names: FxHashMap<String, ObjectKey>,
    collection_names: FxHashMap<String, CollectionKey>,

    selection: Vec<ObjectKey>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let mut collections = SlotMap::with_key();
        let master_collection = collections.insert(Collection::new(MASTER_COLLECTION_NAME));
        let mut collection_names = FxHashMap::default();
        collection_names.insert(MASTER_COLLECTION_NAME.to_owned(), master_collection);
        Self {
            objects: SlotMap::with_key(),
            meshes: SlotMap::with_key(),
            collections,
            master_collection,
            object_names: FxHashMap::default(),
            collection_names,
            selection: Vec::new(),
        }
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Returns `base` if no object uses it yet, otherwise the first free
    /// `base.NNN` variant.
    #[must_use]
    pub fn unique_object_name(&self, base: &str) -> String {
        unique_name(base, |name| self.object_names.contains_key(name))
    }

    /// Adds an object without linking it to any collection.
    ///
    /// The object's name is made unique first.
    pub fn add_object(&mut self, mut object: SceneObject) -> ObjectKey {
        object.name = self.unique_object_name(&object.name);
        let name = object.name.clone();
        let key = self.objects.insert(object);
        self.object_names.insert(name, key);
        key
    }

    /// Adds an object and links it to the master collection.
    pub fn spawn(&mut self, object: SceneObject) -> ObjectKey {
        let key = self.add_object(object);
        self.collections[self.master_collection].objects.push(key);
        key
    }

    #[must_use]
    pub fn object(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn object_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    /// Like [`Scene::object`], but a stale key is an error.
    pub fn try_object(&self, key: ObjectKey) -> Result<&SceneObject, SceneError> {
        self.objects
            .get(key)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{key:?}")))
    }

    fn try_object_mut(&mut self, key: ObjectKey) -> Result<&mut SceneObject, SceneError> {
        self.objects
            .get_mut(key)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{key:?}")))
    }

    #[must_use]
    pub fn find_object(&self, name: &str) -> Option<ObjectKey> {
        self.object_names.get(name).copied()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Writes a world matrix onto an object.
    pub fn set_world_matrix(&mut self, key: ObjectKey, matrix: &Mat4) -> Result<(), SceneError> {
        self.try_object_mut(key)?.set_world_matrix(matrix);
        Ok(())
    }

    /// Keys the object's current value of `channel` at `frame`.
    pub fn insert_transform_keyframe(
        &mut self,
        key: ObjectKey,
        channel: TransformChannel,
        frame: i32,
    ) -> Result<(), SceneError> {
        let object = self.try_object_mut(key)?;
        let transform = object.transform;
        object
            .animation
            .get_or_insert_with(TransformAction::default)
            .insert_keyframe(channel, frame as f32, &transform);
        Ok(())
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshKey {
        self.meshes.insert(mesh)
    }

    #[must_use]
    pub fn mesh(&self, key: MeshKey) -> Option<&MeshData> {
        self.meshes.get(key)
    }

    /// Convenience: adds `mesh` and a mesh object using it, linked to the master collection.
    pub fn spawn_mesh(&mut self, name: &str, mesh: MeshData) -> ObjectKey {
        let mesh = self.add_mesh(mesh);
        self.spawn(SceneObject::mesh(name, mesh))
    }

    // ========================================================================
    // Collections
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn master_collection(&self) -> CollectionKey {
        self.master_collection
    }

    #[must_use]
    pub fn collection(&self, key: CollectionKey) -> Option<&Collection> {
        self.collections.get(key)
    }

    #[must_use]
    pub fn find_collection(&self, name: &str) -> Option<CollectionKey> {
        self.collection_names.get(name).copied()
    }

    /// Returns the collection called `name`, creating it under the master
    /// collection if it does not exist yet. An existing collection is reused
    /// as is.
    pub fn ensure_collection(&mut self, name: &str) -> CollectionKey {
        if let Some(key) = self.find_collection(name) {
            return key;
        }
        let key = self.collections.insert(Collection::new(name));
        self.collection_names.insert(name.to_owned(), key);
        self.collections[self.master_collection].children.push(key);
        log::debug!("Created collection '{name}'");
        key
    }

    /// Links an object into a collection. Linking twice is a no-op.
    pub fn link_object(
        &mut self,
        collection: CollectionKey,
        object: ObjectKey,
    ) -> Result<(), SceneError> {
        if !self.objects.contains_key(object) {
            return Err(SceneError::ObjectNotFound(format!("{object:?}")));
        }
        let target = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| SceneError::CollectionNotFound(format!("{collection:?}")))?;
        if !target.objects.contains(&object) {
            target.objects.push(object);
        }
        Ok(())
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Adds an object to the selection, keeping selection order.
    pub fn select(&mut self, key: ObjectKey) {
        if self.objects.contains_key(key) && !self.selection.contains(&key) {
            self.selection.push(key);
        }
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    #[must_use]
    pub fn selection(&self) -> &[ObjectKey] {
        &self.selection
    }

    /// Selected mesh objects, in selection order.
    pub fn selected_meshes(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.selection.iter().filter_map(|&key| {
            self.objects
                .get(key)
                .filter(|object| object.kind == ObjectKind::Mesh)
                .map(|object| (key, object))
        })
    }
}

fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_owned();
    }
    (1..)
        .map(|n| format!("{base}.{n:03}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_owned())
}
