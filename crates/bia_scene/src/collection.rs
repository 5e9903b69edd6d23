use crate::{CollectionKey, ObjectKey};

/// A named grouping of objects. Collections own their objects' membership,
/// not the objects themselves.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub name: String,
    pub(crate) objects: Vec<ObjectKey>,
    pub(crate) children: Vec<CollectionKey>,
}

impl Collection {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn objects(&self) -> &[ObjectKey] {
        &self.objects
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[CollectionKey] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, object: ObjectKey) -> bool {
        self.objects.contains(&object)
    }
}
