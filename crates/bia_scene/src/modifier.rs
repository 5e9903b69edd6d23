//! Modifier stack entries.

/// What a modifier does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierKind {
    /// Geometry-node modifier. Procedural only once a node group is attached.
    Nodes { node_group: Option<String> },
    Subdivision { levels: u8 },
    Array { count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    pub name: String,
    pub kind: ModifierKind,
    pub enabled: bool,
}

impl Modifier {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ModifierKind) -> Self {
        Self {
            name: name.into(),
            kind,
            enabled: true,
        }
    }

    /// A geometry-node modifier driven by `node_group`.
    #[must_use]
    pub fn nodes(name: impl Into<String>, node_group: impl Into<String>) -> Self {
        Self::new(
            name,
            ModifierKind::Nodes {
                node_group: Some(node_group.into()),
            },
        )
    }

    /// The attached node group, for a geometry-node modifier that has one.
    #[must_use]
    pub fn node_group(&self) -> Option<&str> {
        match &self.kind {
            ModifierKind::Nodes { node_group } => node_group.as_deref(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_procedural(&self) -> bool {
        self.node_group().is_some()
    }
}

/// Position of a modifier in its object's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierHandle(pub(crate) usize);

impl ModifierHandle {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}
